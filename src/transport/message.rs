use serde::Deserialize;

use super::TransportError;
use crate::domain::{
    EMERGENCY_PRIORITY, EmergencyOptions, MessageResponse, MessageText, Priority, SendMessage,
    Title, UserKey,
};

#[derive(Debug, Clone, Deserialize)]
struct MessageJsonResponse {
    status: i64,
    #[serde(default)]
    request: Option<String>,
    #[serde(default)]
    receipt: Option<String>,
    #[serde(default)]
    errors: Vec<String>,
}

pub fn encode_message_form(request: &SendMessage) -> Vec<(String, String)> {
    let mut params = vec![
        (UserKey::FIELD.to_owned(), request.user().as_str().to_owned()),
        (
            MessageText::FIELD.to_owned(),
            request.message().as_str().to_owned(),
        ),
    ];
    if let Some(title) = request.title() {
        params.push((Title::FIELD.to_owned(), title.as_str().to_owned()));
    }
    if let Priority::Emergency(options) = request.priority() {
        params.push(("priority".to_owned(), EMERGENCY_PRIORITY.to_owned()));
        params.push((
            EmergencyOptions::RETRY_FIELD.to_owned(),
            options.retry().value().to_string(),
        ));
        params.push((
            EmergencyOptions::EXPIRE_FIELD.to_owned(),
            options.expire().value().to_string(),
        ));
    }
    params
}

pub fn decode_message_json_response(json: &str) -> Result<MessageResponse, TransportError> {
    let parsed: MessageJsonResponse = serde_json::from_str(json)?;
    Ok(MessageResponse {
        status: parsed.status,
        request: parsed.request,
        receipt: parsed.receipt.filter(|receipt| !receipt.trim().is_empty()),
        errors: parsed.errors,
    })
}
