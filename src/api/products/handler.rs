use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};
use tracing::{info, instrument};

use crate::api::middleware::AuthenticatedUser;
use crate::config::state::AppState;
use crate::database::products;
use crate::models::product::{
    CreateProductRequest, NewProduct, Product, ProductFilter, UpdateProductRequest,
    PRODUCT_REQUIRED_FIELDS,
};
use crate::utils::app_error::AppError;
use crate::utils::response_handler::HandlerResponse;
use crate::utils::validation::{parse_body, require_fields};

fn product_not_found() -> AppError {
    AppError::NotFound("Product not found".into())
}

/// Prices and stock can never go below zero
fn check_amounts(price: Option<f64>, sale_price: Option<f64>, stock: Option<i32>) -> Result<(), AppError> {
    if price.is_some_and(|p| p < 0.0) || sale_price.is_some_and(|p| p < 0.0) {
        return Err(AppError::BadRequest("Price cannot be negative".into()));
    }
    if stock.is_some_and(|s| s < 0) {
        return Err(AppError::BadRequest("Stock cannot be negative".into()));
    }
    Ok(())
}

#[instrument(name = "list_products", skip(state, user))]
pub async fn list_products(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(filter): Query<ProductFilter>,
) -> Result<HandlerResponse, AppError> {
    let (limit, offset) = filter.pagination().resolve()?;
    let found: Vec<Product> = products::list(state.database.pool(), &filter, limit, offset).await?;

    if found.is_empty() {
        return Err(AppError::NotFound("No products found".into()));
    }

    Ok(HandlerResponse::new(StatusCode::OK).data(json!({
        "usuario": user.username,
        "total": found.len(),
        "produtos": found,
    })))
}

#[instrument(name = "get_product", skip(state, user))]
pub async fn get_product(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> Result<HandlerResponse, AppError> {
    let product: Product = products::find_active(state.database.pool(), id)
        .await?
        .ok_or_else(product_not_found)?;

    Ok(HandlerResponse::new(StatusCode::OK).data(json!({
        "usuario": user.username,
        "produto": product,
    })))
}

#[instrument(name = "create_product", skip(state, user, body))]
pub async fn create_product(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<Value>,
) -> Result<HandlerResponse, AppError> {
    require_fields(&body, &PRODUCT_REQUIRED_FIELDS, "Required product information not provided.")?;
    let request: CreateProductRequest = parse_body(body)?;
    let new_product: NewProduct = request.into();
    check_amounts(Some(new_product.price), Some(new_product.sale_price), Some(new_product.stock))?;

    let pool = state.database.pool();
    if products::barcode_taken(pool, &new_product.barcode, None).await? {
        return Err(AppError::Conflict("Barcode already registered".into()));
    }

    let product: Product = products::insert(pool, &new_product).await?;
    info!(product_id = product.id, user = %user.username, "Product created");

    Ok(HandlerResponse::new(StatusCode::CREATED)
        .message("Product created successfully")
        .data(json!({
            "usuario": user.username,
            "produto": product,
        })))
}

#[instrument(name = "update_product", skip(state, user, body))]
pub async fn update_product(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
    Json(body): Json<Value>,
) -> Result<HandlerResponse, AppError> {
    let changes: UpdateProductRequest = parse_body(body)?;
    check_amounts(changes.price, changes.sale_price, changes.stock)?;

    let pool = state.database.pool();
    products::find_active(pool, id).await?.ok_or_else(product_not_found)?;

    if let Some(barcode) = changes.barcode.as_deref() {
        if products::barcode_taken(pool, barcode, Some(id)).await? {
            return Err(AppError::Conflict("Barcode already registered".into()));
        }
    }

    let product: Product = products::update(pool, id, &changes)
        .await?
        .ok_or_else(product_not_found)?;
    info!(product_id = product.id, user = %user.username, "Product updated");

    Ok(HandlerResponse::new(StatusCode::OK)
        .message("Product updated successfully")
        .data(json!({
            "usuario": user.username,
            "produto": product,
        })))
}

#[instrument(name = "delete_product", skip(state, user))]
pub async fn delete_product(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> Result<HandlerResponse, AppError> {
    let product: Product = products::soft_delete(state.database.pool(), id)
        .await?
        .ok_or_else(product_not_found)?;
    info!(product_id = product.id, user = %user.username, "Product deleted");

    Ok(HandlerResponse::new(StatusCode::OK)
        .message("Product deleted successfully")
        .data(json!({
            "usuario": user.username,
            "id": product.id,
        })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_amounts_are_rejected() {
        assert!(matches!(check_amounts(Some(-1.0), None, None), Err(AppError::BadRequest(_))));
        assert!(matches!(check_amounts(None, Some(-0.01), None), Err(AppError::BadRequest(_))));
        assert!(matches!(check_amounts(None, None, Some(-3)), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn zero_and_missing_amounts_pass() {
        assert!(check_amounts(Some(0.0), Some(0.0), Some(0)).is_ok());
        assert!(check_amounts(None, None, None).is_ok());
    }
}
