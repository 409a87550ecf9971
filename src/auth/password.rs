use bcrypt::{hash, verify, BcryptError};

/// Hash a plain text password with the given bcrypt cost.
/// Blocking; call it through `tokio::task::spawn_blocking` from handlers.
pub fn hash_password(password: &str, cost: u32) -> Result<String, BcryptError> {
    hash(password, cost)
}

/// Verify a password against a stored bcrypt hash
pub fn verify_password(password: &str, hashed: &str) -> Result<bool, BcryptError> {
    verify(password, hashed)
}
