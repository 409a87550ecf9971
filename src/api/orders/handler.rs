use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};
use sqlx::PgPool;
use tracing::{debug, info, instrument};

use crate::api::middleware::AuthenticatedUser;
use crate::config::state::AppState;
use crate::database::{clients, orders, products};
use crate::models::order::{
    CreateOrderRequest, Order, OrderDetail, OrderFilter, OrderItem, OrderStatus, UpdateOrderRequest,
    ORDER_ITEM_REQUIRED_FIELDS, ORDER_REQUIRED_FIELDS,
};
use crate::utils::app_error::AppError;
use crate::utils::response_handler::HandlerResponse;
use crate::utils::validation::{parse_body, require_fields};

const ORDER_FIELDS_MESSAGE: &str = "Required order information not provided.";

fn order_not_found() -> AppError {
    AppError::NotFound("Order not found".into())
}

/// Sum of unit price times quantity, rounded to cents
pub fn order_total(lines: &[(i32, f64)]) -> f64 {
    let total: f64 = lines
        .iter()
        .map(|(quantity, unit_price)| f64::from(*quantity) * unit_price)
        .sum();
    (total * 100.0).round() / 100.0
}

/// Checks the order body shape before anything touches the database
fn validate_order_body(body: Value) -> Result<CreateOrderRequest, AppError> {
    let empty_list: bool = body
        .get("produtos")
        .and_then(Value::as_array)
        .is_some_and(|items| items.is_empty());

    if empty_list {
        require_fields(&body, &["cliente_id"], ORDER_FIELDS_MESSAGE)?;
        return Err(AppError::BadRequest("Order must contain at least one product".into()));
    }
    require_fields(&body, &ORDER_REQUIRED_FIELDS, ORDER_FIELDS_MESSAGE)?;

    if let Some(items) = body.get("produtos").and_then(Value::as_array) {
        for (index, item) in items.iter().enumerate() {
            require_fields(
                item,
                &ORDER_ITEM_REQUIRED_FIELDS,
                &format!("Product at position {index} is incomplete."),
            )?;
        }
    }

    let request: CreateOrderRequest = parse_body(body)?;

    if let Some(item) = request.items.iter().find(|item| item.quantity < 1) {
        return Err(AppError::BadRequest(format!(
            "Quantity for product {} must be at least 1",
            item.product_id
        )));
    }

    Ok(request)
}

/// Creates the order in a single transaction. Product rows stay locked until commit,
/// and any early return drops the transaction, rolling back stock changes.
async fn place_order(pool: &PgPool, request: &CreateOrderRequest) -> Result<OrderDetail, AppError> {
    let mut tx = pool.begin().await?;

    if !clients::exists_active(&mut *tx, request.client_id).await? {
        return Err(AppError::NotFound("Client not found".into()));
    }

    let mut lines: Vec<(i32, f64)> = Vec::with_capacity(request.items.len());
    for item in &request.items {
        let product = products::find_active_for_update(&mut *tx, item.product_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", item.product_id)))?;

        if !product.available {
            return Err(AppError::Conflict(format!("Product {} is not available", product.id)));
        }
        if product.stock < item.quantity {
            return Err(AppError::Conflict(format!(
                "Insufficient stock for product {}: requested {}, available {}",
                product.id, item.quantity, product.stock
            )));
        }

        // Repeated products see the already decremented stock on the next lookup
        products::decrement_stock(&mut *tx, product.id, item.quantity).await?;
        lines.push((item.quantity, product.price));
    }

    let order: Order = orders::insert(&mut *tx, request.client_id, OrderStatus::Pendente, order_total(&lines)).await?;

    let mut items: Vec<OrderItem> = Vec::with_capacity(lines.len());
    for (item, (_, unit_price)) in request.items.iter().zip(&lines) {
        items.push(orders::insert_item(&mut *tx, order.id, item.product_id, item.quantity, *unit_price).await?);
    }

    tx.commit().await?;
    debug!(order_id = order.id, items = items.len(), "Order transaction committed");

    Ok(OrderDetail { order, items })
}

#[instrument(name = "list_orders", skip(state, user))]
pub async fn list_orders(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(filter): Query<OrderFilter>,
) -> Result<HandlerResponse, AppError> {
    let (limit, offset) = filter.pagination().resolve()?;
    let found: Vec<Order> = orders::list(state.database.pool(), &filter, limit, offset).await?;

    if found.is_empty() {
        return Err(AppError::NotFound("No orders found".into()));
    }

    Ok(HandlerResponse::new(StatusCode::OK).data(json!({
        "usuario": user.username,
        "total": found.len(),
        "pedidos": found,
    })))
}

#[instrument(name = "get_order", skip(state, user))]
pub async fn get_order(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> Result<HandlerResponse, AppError> {
    let pool = state.database.pool();
    let order: Order = orders::find_active(pool, id).await?.ok_or_else(order_not_found)?;
    let items: Vec<OrderItem> = orders::items_of(pool, order.id).await?;

    Ok(HandlerResponse::new(StatusCode::OK).data(json!({
        "usuario": user.username,
        "pedido": OrderDetail { order, items },
    })))
}

#[instrument(name = "create_order", skip(state, user, body))]
pub async fn create_order(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<Value>,
) -> Result<HandlerResponse, AppError> {
    let request: CreateOrderRequest = validate_order_body(body)?;
    let detail: OrderDetail = place_order(state.database.pool(), &request).await?;

    info!(
        order_id = detail.order.id,
        total = detail.order.total_price,
        user = %user.username,
        "Order created"
    );

    Ok(HandlerResponse::new(StatusCode::CREATED)
        .message("Order created successfully")
        .data(json!({
            "usuario": user.username,
            "pedido": detail,
        })))
}

#[instrument(name = "update_order", skip(state, user, body))]
pub async fn update_order(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
    Json(body): Json<Value>,
) -> Result<HandlerResponse, AppError> {
    let changes: UpdateOrderRequest = parse_body(body)?;
    let pool = state.database.pool();

    orders::find_active(pool, id).await?.ok_or_else(order_not_found)?;

    if let Some(client_id) = changes.client_id {
        if !clients::exists_active(pool, client_id).await? {
            return Err(AppError::NotFound("Client not found".into()));
        }
    }

    let order: Order = orders::update(pool, id, changes.status, changes.client_id)
        .await?
        .ok_or_else(order_not_found)?;
    let items: Vec<OrderItem> = orders::items_of(pool, order.id).await?;
    info!(order_id = order.id, status = %order.status, user = %user.username, "Order updated");

    Ok(HandlerResponse::new(StatusCode::OK)
        .message("Order updated successfully")
        .data(json!({
            "usuario": user.username,
            "pedido": OrderDetail { order, items },
        })))
}

#[instrument(name = "delete_order", skip(state, user))]
pub async fn delete_order(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> Result<HandlerResponse, AppError> {
    let order: Order = orders::soft_delete(state.database.pool(), id)
        .await?
        .ok_or_else(order_not_found)?;
    info!(order_id = order.id, user = %user.username, "Order deleted");

    Ok(HandlerResponse::new(StatusCode::OK)
        .message("Order deleted successfully")
        .data(json!({
            "usuario": user.username,
            "id": order.id,
        })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bad_request_message(result: Result<CreateOrderRequest, AppError>) -> String {
        match result {
            Err(AppError::BadRequest(message)) => message,
            other => panic!("expected bad request, got {other:?}"),
        }
    }

    #[test]
    fn total_multiplies_price_by_quantity() {
        assert_eq!(order_total(&[(2, 10.0), (3, 1.5)]), 24.5);
        assert_eq!(order_total(&[(3, 0.1)]), 0.3);
        assert_eq!(order_total(&[]), 0.0);
    }

    #[test]
    fn accepts_a_well_formed_order() {
        let request = validate_order_body(json!({
            "cliente_id": 1,
            "produtos": [{ "produto_id": 4, "quantidade": 2 }]
        }))
        .unwrap();

        assert_eq!(request.client_id, 1);
        assert_eq!(request.items.len(), 1);
        assert_eq!(request.items[0].quantity, 2);
    }

    #[test]
    fn missing_client_is_reported_first() {
        let message = bad_request_message(validate_order_body(json!({ "produtos": [] })));
        assert!(message.contains("cliente_id"));
    }

    #[test]
    fn empty_product_list_is_rejected() {
        let message = bad_request_message(validate_order_body(json!({ "cliente_id": 1, "produtos": [] })));
        assert!(message.contains("at least one product"));
    }

    #[test]
    fn incomplete_items_are_rejected() {
        let message = bad_request_message(validate_order_body(json!({
            "cliente_id": 1,
            "produtos": [{ "produto_id": 4, "quantidade": 1 }, { "produto_id": 5 }]
        })));
        assert!(message.contains("position 1"));
        assert!(message.contains("quantidade"));
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let message = bad_request_message(validate_order_body(json!({
            "cliente_id": 1,
            "produtos": [{ "produto_id": 4, "quantidade": 0 }]
        })));
        assert!(message.contains("at least 1"));
    }

    #[test]
    fn wrongly_typed_fields_are_rejected() {
        let message = bad_request_message(validate_order_body(json!({
            "cliente_id": "one",
            "produtos": [{ "produto_id": 4, "quantidade": 1 }]
        })));
        assert!(message.contains("Invalid request body"));
    }
}
