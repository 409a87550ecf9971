pub mod handler;
pub mod routes;

pub use routes::client_routes;
