pub mod handler;
pub mod routes;

pub use routes::order_routes;
