pub mod handler;
pub mod routes;

pub use routes::product_routes;
