//! tests/global_errors.rs
//! Aggregates the envelope tests for errors raised outside the handlers
//! (unknown routes, layer errors and failures of the database pool).

#[cfg(test)]
mod global_errors {
    #[path = "../global_errors/404.rs"]
    mod e404;

    #[path = "../global_errors/408.rs"]
    mod e408;

    #[path = "../global_errors/413.rs"]
    mod e413;

    #[path = "../global_errors/500.rs"]
    mod e500;
}
