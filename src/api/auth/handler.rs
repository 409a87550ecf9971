use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use tracing::{info, instrument};

use crate::auth::{hash_password, verify_password};
use crate::config::state::AppState;
use crate::database::users;
use crate::models::user::{
    LoginRequest, RegisterRequest, TokenResponse, User, UserView, LOGIN_REQUIRED_FIELDS,
    REGISTER_REQUIRED_FIELDS,
};
use crate::utils::app_error::AppError;
use crate::utils::response_handler::HandlerResponse;
use crate::utils::validation::{normalize_email, parse_body, require_fields};

/// Register a new user
#[instrument(name = "register", skip(state, body))]
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<HandlerResponse, AppError> {
    require_fields(&body, &REGISTER_REQUIRED_FIELDS, "Required information for registration not provided.")?;
    let request: RegisterRequest = parse_body(body)?;
    let email: String = normalize_email(&request.email)?;

    let pool = state.database.pool();

    if users::find_active_by_username_or_email(pool, &request.username, &email)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("User with this information already registered".into()));
    }

    // bcrypt is CPU bound, keep it off the async workers
    let cost: u32 = state.environment.bcrypt_cost;
    let password: String = request.password;
    let password_hash: String = tokio::task::spawn_blocking(move || hash_password(&password, cost)).await??;

    let user: User = users::insert(pool, &request.username, &email, &password_hash).await?;
    info!(user_id = user.id, "User registered");

    Ok(HandlerResponse::new(StatusCode::CREATED)
        .message("User registered successfully")
        .data(json!({ "usuario": UserView::from(user) })))
}

/// Check credentials and issue an access token
#[instrument(name = "login", skip(state, body))]
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<HandlerResponse, AppError> {
    require_fields(&body, &LOGIN_REQUIRED_FIELDS, "Required information for login not provided.")?;
    let request: LoginRequest = parse_body(body)?;

    let user: User = users::find_active_by_username(state.database.pool(), &request.username)
        .await?
        .ok_or_else(|| AppError::NotFound("User with this information not found".into()))?;

    let password: String = request.password;
    let stored_hash: String = user.password_hash.clone();
    let matches: bool = tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash)).await??;

    if !matches {
        return Err(AppError::BadRequest("Incorrect password".into()));
    }

    let token: String = state
        .jwt
        .generate_access_token(&user.username)
        .map_err(|e| AppError::Internal(format!("failed to sign token: {e}")))?;

    info!(user_id = user.id, "User logged in");

    Ok(HandlerResponse::new(StatusCode::OK)
        .message("Login successful")
        .data(json!(TokenResponse::bearer(token, state.jwt.expires_in_seconds()))))
}
