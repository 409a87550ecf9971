pub mod handler;
pub mod routes;

pub use routes::status_routes;
