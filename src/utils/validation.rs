// Request body validation shared by the handlers

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::utils::app_error::AppError;

const CPF_LENGTH: usize = 11;

/// Names of required fields that are absent, null, blank strings or empty lists.
/// Numbers and booleans always count as present, including 0 and false.
pub fn missing_fields<'a>(body: &Value, required: &[&'a str]) -> Vec<&'a str> {
    required
        .iter()
        .copied()
        .filter(|field| match body.get(field.to_lowercase()) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.trim().is_empty(),
            Some(Value::Array(items)) => items.is_empty(),
            Some(Value::Object(map)) => map.is_empty(),
            Some(_) => false,
        })
        .collect()
}

/// Fails with 400 when any required field is missing
pub fn require_fields(body: &Value, required: &[&str], message: &str) -> Result<(), AppError> {
    let missing: Vec<&str> = missing_fields(body, required);

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!("{message} Missing: {}", missing.join(", "))))
    }
}

/// Deserializes a JSON body into a typed request; type mismatches become 400
pub fn parse_body<T: DeserializeOwned>(body: Value) -> Result<T, AppError> {
    serde_json::from_value(body).map_err(|e| AppError::BadRequest(format!("Invalid request body: {e}")))
}

/// Strips the usual `.` and `-` separators and checks for 11 digits
pub fn normalize_cpf(raw: &str) -> Result<String, AppError> {
    let cpf: String = raw.trim().replace(['.', '-'], "");

    if cpf.len() != CPF_LENGTH || !cpf.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::BadRequest("CPF must contain exactly 11 digits".into()));
    }

    Ok(cpf)
}

/// Loose structural check: one `@`, non-empty local part, dotted domain
pub fn is_valid_email(email: &str) -> bool {
    let email: &str = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

/// Trims the address and checks its shape; the trimmed value is what gets stored
pub fn normalize_email(raw: &str) -> Result<String, AppError> {
    let email: &str = raw.trim();

    if is_valid_email(email) {
        Ok(email.to_string())
    } else {
        Err(AppError::BadRequest(format!("Invalid email address '{email}'")))
    }
}
