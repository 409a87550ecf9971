use axum::{routing::get, Router};
use crate::config::state::AppState;
use super::handler;

/// Guarded by `require_auth`, layered in `create_app`
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/pedidos", get(handler::list_orders).post(handler::create_order))
        .route(
            "/pedidos/{id}",
            get(handler::get_order)
                .put(handler::update_order)
                .delete(handler::delete_order),
        )
}
