use axum::{routing::get, Router};
use crate::config::state::AppState;
use super::handler;

pub fn client_routes() -> Router<AppState> {
    Router::new()
        .route("/clients", get(handler::list_clients).post(handler::create_client))
        .route(
            "/clients/{id}",
            get(handler::get_client)
                .put(handler::update_client)
                .delete(handler::delete_client),
        )
}
