pub mod logging;
pub mod server;

pub use logging::init_tracing;
pub use server::{create_app, setup_listener, shutdown_signal};
