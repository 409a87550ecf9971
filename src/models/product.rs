use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use crate::models::Pagination;

/// Row of the `produtos` table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: i32,
    #[sqlx(rename = "descricao")]
    #[serde(rename = "descricao")]
    pub description: String,
    #[sqlx(rename = "valor_venda")]
    #[serde(rename = "valor_venda")]
    pub sale_price: f64,
    #[sqlx(rename = "codigo_barras")]
    #[serde(rename = "codigo_barras")]
    pub barcode: String,
    #[sqlx(rename = "secao")]
    #[serde(rename = "secao")]
    pub section: String,
    #[sqlx(rename = "estoque")]
    #[serde(rename = "estoque")]
    pub stock: i32,
    #[sqlx(rename = "data_validade")]
    #[serde(rename = "data_validade")]
    pub expiration_date: Option<NaiveDate>,
    #[sqlx(rename = "imagens")]
    #[serde(rename = "imagens")]
    pub images: Option<Json<Vec<String>>>,
    #[sqlx(rename = "preco")]
    #[serde(rename = "preco")]
    pub price: f64,
    #[sqlx(rename = "categoria")]
    #[serde(rename = "categoria")]
    pub category: String,
    #[sqlx(rename = "disponibilidade")]
    #[serde(rename = "disponibilidade")]
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip)]
    pub deleted: bool,
}

pub const PRODUCT_REQUIRED_FIELDS: [&str; 6] = [
    "descricao",
    "codigo_barras",
    "estoque",
    "data_validade",
    "preco",
    "categoria",
];

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "codigo_barras")]
    pub barcode: String,
    #[serde(rename = "estoque")]
    pub stock: i32,
    #[serde(rename = "data_validade")]
    pub expiration_date: NaiveDate,
    #[serde(rename = "preco")]
    pub price: f64,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "imagens", default)]
    pub images: Vec<String>,
    #[serde(rename = "valor_venda")]
    pub sale_price: Option<f64>,
    #[serde(rename = "secao")]
    pub section: Option<String>,
    #[serde(rename = "disponibilidade")]
    pub available: Option<bool>,
}

/// Product values ready to be inserted, with optional fields resolved
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub description: String,
    pub barcode: String,
    pub stock: i32,
    pub expiration_date: NaiveDate,
    pub price: f64,
    pub sale_price: f64,
    pub category: String,
    pub section: String,
    pub images: Vec<String>,
    pub available: bool,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(request: CreateProductRequest) -> Self {
        Self {
            sale_price: request.sale_price.unwrap_or(request.price),
            section: request.section.unwrap_or_else(|| request.category.clone()),
            available: request.available.unwrap_or(true),
            description: request.description,
            barcode: request.barcode,
            stock: request.stock,
            expiration_date: request.expiration_date,
            price: request.price,
            category: request.category,
            images: request.images,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductRequest {
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    #[serde(rename = "codigo_barras")]
    pub barcode: Option<String>,
    #[serde(rename = "estoque")]
    pub stock: Option<i32>,
    #[serde(rename = "data_validade")]
    pub expiration_date: Option<NaiveDate>,
    #[serde(rename = "preco")]
    pub price: Option<f64>,
    #[serde(rename = "valor_venda")]
    pub sale_price: Option<f64>,
    #[serde(rename = "categoria")]
    pub category: Option<String>,
    #[serde(rename = "secao")]
    pub section: Option<String>,
    #[serde(rename = "imagens")]
    pub images: Option<Vec<String>>,
    #[serde(rename = "disponibilidade")]
    pub available: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProductFilter {
    #[serde(rename = "categoria")]
    pub category: Option<String>,
    #[serde(rename = "preco")]
    pub price: Option<f64>,
    #[serde(rename = "disponibilidade")]
    pub available: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ProductFilter {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.limit, self.offset)
    }
}
