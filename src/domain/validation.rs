use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    FractionalSeconds { field: &'static str, actual: Duration },
    PollIntervalTooShort { min: Duration, actual: Duration },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::FractionalSeconds { field, actual } => {
                write!(f, "{field} must be a whole number of seconds: {actual:?}")
            }
            Self::PollIntervalTooShort { min, actual } => {
                write!(f, "poll interval {actual:?} is too small (minimum: {min:?})")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
