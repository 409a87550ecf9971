// Start of file: /src/utils/mod.rs

/*
    * Re-exports for all utility modules like error handling,
    * response formats, request validation and shared utilities.
*/

pub mod app_error;
pub mod error_handler;
pub mod response_handler;
pub mod utils;
pub mod validation;

pub use app_error::AppError;
pub use response_handler::HandlerResponse;

// End of file: /src/utils/mod.rs
