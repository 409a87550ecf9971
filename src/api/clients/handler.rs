use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::{info, instrument};

use crate::config::state::AppState;
use crate::database::clients;
use crate::models::client::{
    Client, ClientFilter, CreateClientRequest, UpdateClientRequest, CLIENT_REQUIRED_FIELDS,
};
use crate::utils::app_error::AppError;
use crate::utils::response_handler::HandlerResponse;
use crate::utils::validation::{normalize_cpf, normalize_email, parse_body, require_fields};

fn client_not_found() -> AppError {
    AppError::NotFound("Client not found".into())
}

#[instrument(name = "list_clients", skip(state))]
pub async fn list_clients(
    State(state): State<AppState>,
    Query(filter): Query<ClientFilter>,
) -> Result<HandlerResponse, AppError> {
    let (limit, offset) = filter.pagination().resolve()?;
    let found: Vec<Client> = clients::list(state.database.pool(), &filter, limit, offset).await?;

    if found.is_empty() {
        return Err(AppError::NotFound("No clients found".into()));
    }

    Ok(HandlerResponse::new(StatusCode::OK).data(json!({
        "total": found.len(),
        "clientes": found,
    })))
}

#[instrument(name = "get_client", skip(state))]
pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<HandlerResponse, AppError> {
    let client: Client = clients::find_active(state.database.pool(), id)
        .await?
        .ok_or_else(client_not_found)?;

    Ok(HandlerResponse::new(StatusCode::OK).data(json!({ "cliente": client })))
}

#[instrument(name = "create_client", skip(state, body))]
pub async fn create_client(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<HandlerResponse, AppError> {
    require_fields(&body, &CLIENT_REQUIRED_FIELDS, "Required client information not provided.")?;
    let request: CreateClientRequest = parse_body(body)?;

    let email: String = normalize_email(&request.email)?;
    let cpf: String = normalize_cpf(&request.cpf)?;

    let pool = state.database.pool();
    if clients::email_taken(pool, &email, None).await? {
        return Err(AppError::Conflict("Email already registered".into()));
    }
    if clients::cpf_taken(pool, &cpf, None).await? {
        return Err(AppError::Conflict("CPF already registered".into()));
    }

    let client: Client = clients::insert(pool, &email, &cpf, &request.name).await?;
    info!(client_id = client.id, "Client created");

    Ok(HandlerResponse::new(StatusCode::CREATED)
        .message("Client created successfully")
        .data(json!({ "cliente": client })))
}

#[instrument(name = "update_client", skip(state, body))]
pub async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<Value>,
) -> Result<HandlerResponse, AppError> {
    let request: UpdateClientRequest = parse_body(body)?;
    let email: Option<String> = request.email.as_deref().map(normalize_email).transpose()?;
    let cpf: Option<String> = request.cpf.as_deref().map(normalize_cpf).transpose()?;

    let pool = state.database.pool();
    clients::find_active(pool, id).await?.ok_or_else(client_not_found)?;

    if let Some(email) = email.as_deref() {
        if clients::email_taken(pool, email, Some(id)).await? {
            return Err(AppError::Conflict("Email already registered".into()));
        }
    }
    if let Some(cpf) = cpf.as_deref() {
        if clients::cpf_taken(pool, cpf, Some(id)).await? {
            return Err(AppError::Conflict("CPF already registered".into()));
        }
    }

    let client: Client = clients::update(pool, id, email.as_deref(), cpf.as_deref(), request.name.as_deref())
        .await?
        .ok_or_else(client_not_found)?;
    info!(client_id = client.id, "Client updated");

    Ok(HandlerResponse::new(StatusCode::OK)
        .message("Client updated successfully")
        .data(json!({ "cliente": client })))
}

#[instrument(name = "delete_client", skip(state))]
pub async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<HandlerResponse, AppError> {
    let client: Client = clients::soft_delete(state.database.pool(), id)
        .await?
        .ok_or_else(client_not_found)?;
    info!(client_id = client.id, "Client deleted");

    Ok(HandlerResponse::new(StatusCode::OK)
        .message("Client deleted successfully")
        .data(json!({ "id": client.id })))
}
