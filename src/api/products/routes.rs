use axum::{routing::get, Router};
use crate::config::state::AppState;
use super::handler;

/// Guarded by `require_auth`, layered in `create_app`
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/produtos", get(handler::list_products).post(handler::create_product))
        .route(
            "/produtos/{id}",
            get(handler::get_product)
                .put(handler::update_product)
                .delete(handler::delete_product),
        )
}
