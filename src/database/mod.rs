pub mod clients;
pub mod orders;
pub mod postgres_service;
pub mod products;
pub mod users;

pub use postgres_service::{DatabaseService, PoolStats};

/// Wraps a user supplied fragment for a `ILIKE` partial match,
/// escaping the pattern metacharacters it may contain.
pub(crate) fn contains_pattern(fragment: &str) -> String {
    let mut escaped: String = String::with_capacity(fragment.len() + 2);
    escaped.push('%');
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Treats empty query parameters as absent
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
