//! Transport layer: HTTP and wire-format details (serialization/deserialization).

mod flag;
mod message;
mod receipt;
mod validate;

pub use message::{decode_message_json_response, encode_message_form};
pub use receipt::{decode_receipt_json_response, receipt_url};
pub use validate::{decode_validate_json_response, encode_validate_form};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid receipt URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("endpoint cannot carry path segments: {endpoint}")]
    CannotBeABase { endpoint: String },
}
