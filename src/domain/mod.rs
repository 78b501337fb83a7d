//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{EMERGENCY_PRIORITY, EmergencyOptions, Priority, SendMessage};
pub use response::{
    MessageResponse, MessageSent, ReceiptPoll, ReceiptResponse, STATUS_OK, ValidateResponse,
    ValidationStatus,
};
pub use validation::ValidationError;
pub use value::{ApiToken, MessageText, PollInterval, ReceiptId, Seconds, Title, UserKey};
