use std::time::Duration;

use crate::domain::validation::ValidationError;
use crate::domain::value::{MessageText, Seconds, Title, UserKey};

/// Wire value of `priority` for emergency messages.
pub const EMERGENCY_PRIORITY: &str = "2";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Redelivery settings for an emergency-priority message.
pub struct EmergencyOptions {
    retry: Seconds,
    expire: Seconds,
}

impl EmergencyOptions {
    /// Form field name for the redelivery period (`retry`).
    pub const RETRY_FIELD: &'static str = "retry";
    /// Form field name for the redelivery deadline (`expire`).
    pub const EXPIRE_FIELD: &'static str = "expire";

    /// Unacknowledged messages are redelivered every `retry` until `expire` has elapsed.
    ///
    /// Both durations must be whole seconds.
    pub fn new(retry: Duration, expire: Duration) -> Result<Self, ValidationError> {
        Ok(Self {
            retry: Seconds::from_duration(Self::RETRY_FIELD, retry)?,
            expire: Seconds::from_duration(Self::EXPIRE_FIELD, expire)?,
        })
    }

    pub fn retry(&self) -> Seconds {
        self.retry
    }

    pub fn expire(&self) -> Seconds {
        self.expire
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Priority {
    #[default]
    Normal,
    Emergency(EmergencyOptions),
}

impl Priority {
    pub fn is_emergency(&self) -> bool {
        matches!(self, Self::Emergency(_))
    }
}

#[derive(Debug, Clone)]
pub struct SendMessage {
    user: UserKey,
    message: MessageText,
    title: Option<Title>,
    priority: Priority,
}

impl SendMessage {
    /// A normal-priority message without a title.
    pub fn new(user: UserKey, message: MessageText) -> Self {
        Self {
            user,
            message,
            title: None,
            priority: Priority::Normal,
        }
    }

    pub fn with_title(mut self, title: Title) -> Self {
        self.title = Some(title);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn user(&self) -> &UserKey {
        &self.user
    }

    pub fn message(&self) -> &MessageText {
        &self.message
    }

    pub fn title(&self) -> Option<&Title> {
        self.title.as_ref()
    }

    pub fn priority(&self) -> &Priority {
        &self.priority
    }
}
