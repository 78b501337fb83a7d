use std::fmt;
use std::time::Duration;

use crate::domain::validation::ValidationError;

#[derive(Clone, PartialEq, Eq, Hash)]
/// Pushover application API token (`token`).
///
/// Invariant: non-empty after trimming. `Debug` output redacts the value.
pub struct ApiToken(String);

impl ApiToken {
    /// Form field name used by Pushover (`token`).
    pub const FIELD: &'static str = "token";

    /// Create a validated [`ApiToken`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(\"***\")")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Pushover user or group key (`user`).
///
/// Invariant: non-empty after trimming.
pub struct UserKey(String);

impl UserKey {
    /// Form field name used by Pushover (`user`).
    pub const FIELD: &'static str = "user";

    /// Create a validated [`UserKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Notification body (`message`).
///
/// Invariant: non-empty after trimming. The original value (including whitespace) is preserved.
pub struct MessageText(String);

impl MessageText {
    /// Form field name used by Pushover (`message`).
    pub const FIELD: &'static str = "message";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Notification title (`title`).
///
/// Invariant: non-empty after trimming.
pub struct Title(String);

impl Title {
    /// Form field name used by Pushover (`title`).
    pub const FIELD: &'static str = "title";

    /// Create a validated [`Title`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the title as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Receipt id issued by Pushover for an emergency-priority message.
///
/// Invariant: non-empty after trimming.
pub struct ReceiptId(String);

impl ReceiptId {
    /// Response field name used by Pushover (`receipt`).
    pub const FIELD: &'static str = "receipt";

    /// Create a validated [`ReceiptId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated receipt id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// A duration with whole-second precision, as sent in `retry` / `expire`.
pub struct Seconds(u64);

impl Seconds {
    /// Create [`Seconds`] from a duration, rejecting sub-second remainders.
    ///
    /// `field` names the form field the value is destined for and only feeds the error.
    pub fn from_duration(field: &'static str, value: Duration) -> Result<Self, ValidationError> {
        if value.subsec_nanos() != 0 {
            return Err(ValidationError::FractionalSeconds {
                field,
                actual: value,
            });
        }
        Ok(Self(value.as_secs()))
    }

    /// Return the number of seconds.
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Delay between receipt polls.
///
/// Invariant: at least [`PollInterval::MIN`].
pub struct PollInterval(Duration);

impl PollInterval {
    /// Twice the documented receipt API rate limit of one request per 5 seconds.
    pub const MIN: Duration = Duration::from_secs(10);

    /// Create a validated [`PollInterval`].
    pub fn new(value: Duration) -> Result<Self, ValidationError> {
        if value < Self::MIN {
            return Err(ValidationError::PollIntervalTooShort {
                min: Self::MIN,
                actual: value,
            });
        }
        Ok(Self(value))
    }

    /// Return the interval.
    pub fn get(self) -> Duration {
        self.0
    }
}
