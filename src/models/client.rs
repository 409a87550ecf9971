use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::Pagination;

/// Row of the `clients` table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Client {
    pub id: i32,
    pub email: String,
    pub cpf: String,
    #[sqlx(rename = "nome")]
    #[serde(rename = "nome")]
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip)]
    pub deleted: bool,
}

pub const CLIENT_REQUIRED_FIELDS: [&str; 3] = ["email", "cpf", "nome"];

#[derive(Debug, Deserialize)]
pub struct CreateClientRequest {
    pub email: String,
    pub cpf: String,
    #[serde(rename = "nome")]
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateClientRequest {
    pub email: Option<String>,
    pub cpf: Option<String>,
    #[serde(rename = "nome")]
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ClientFilter {
    #[serde(rename = "nome")]
    pub name: Option<String>,
    pub email: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ClientFilter {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.limit, self.offset)
    }
}
