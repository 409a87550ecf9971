// HTTP surface: one directory per resource, each with its handlers and routes

pub mod auth;
pub mod clients;
pub mod middleware;
pub mod orders;
pub mod products;
pub mod status;
