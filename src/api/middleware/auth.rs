use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::config::state::AppState;
use crate::utils::app_error::AppError;

const BEARER_SCHEME: &str = "bearer";

/// Identity of the caller, stored in request extensions once the token is verified
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub username: String,
}

/// Middleware guarding routes behind `Authorization: Bearer <token>`
pub async fn require_auth(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // 1. Extract the token from the header
    let token: &str = bearer_token(&headers)
        .ok_or_else(|| AppError::Unauthorized("Missing or malformed Authorization header".into()))?;

    // 2. Verify signature and expiration
    let claims = state.jwt.validate_token(token).map_err(|e| {
        debug!("Token rejected: {}", e);
        AppError::Unauthorized("Invalid or expired token".into())
    })?;

    debug!("Token verified for user: {}", claims.sub);

    // 3. Make the caller available to handlers
    request.extensions_mut().insert(AuthenticatedUser { username: claims.sub });

    Ok(next.run(request).await)
}

/// Token part of a `Bearer` Authorization header, scheme matched case-insensitively
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value: &str = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
    let (scheme, token) = value.split_once(' ')?;

    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return None;
    }

    let token: &str = token.trim();
    (!token.is_empty()).then_some(token)
}
