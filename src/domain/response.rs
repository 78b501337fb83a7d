use std::fmt;

use crate::domain::value::ReceiptId;

/// Top-level `status` value Pushover uses for a successful request.
pub const STATUS_OK: i64 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageResponse {
    pub status: i64,
    pub request: Option<String>,
    pub receipt: Option<String>,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Outcome of a successful `messages.json` call.
pub struct MessageSent {
    /// Request id assigned by Pushover, when reported.
    pub request: Option<String>,
    /// Present only for emergency-priority messages.
    pub receipt: Option<ReceiptId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptResponse {
    pub status: i64,
    pub acknowledged: bool,
    pub request: Option<String>,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Result of a single receipt lookup that Pushover accepted.
pub enum ReceiptPoll {
    Acknowledged,
    NotYetAcknowledged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidateResponse {
    pub status: i64,
    pub request: Option<String>,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Validity of a user or group key.
///
/// `Unknown` is the unresolved placeholder; a successful check is always `Valid` or `Invalid`.
///
/// `Display` prints `OK` for `Valid`.
pub enum ValidationStatus {
    #[default]
    Unknown,
    Valid,
    Invalid,
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Unknown => "UNKNOWN",
            Self::Valid => "OK",
            Self::Invalid => "INVALID",
        };
        f.write_str(text)
    }
}
