use serde::Deserialize;

use super::TransportError;
use crate::domain::{UserKey, ValidateResponse};

#[derive(Debug, Clone, Deserialize)]
struct ValidateJsonResponse {
    status: i64,
    #[serde(default)]
    request: Option<String>,
    #[serde(default)]
    errors: Vec<String>,
}

pub fn encode_validate_form(user: &UserKey) -> Vec<(String, String)> {
    vec![(UserKey::FIELD.to_owned(), user.as_str().to_owned())]
}

pub fn decode_validate_json_response(json: &str) -> Result<ValidateResponse, TransportError> {
    let parsed: ValidateJsonResponse = serde_json::from_str(json)?;
    Ok(ValidateResponse {
        status: parsed.status,
        request: parsed.request,
        errors: parsed.errors,
    })
}
