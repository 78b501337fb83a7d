use std::fmt;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::{ClientBuilder, ClientOptions, HttpTransport, PushoverError, decode_response};
use crate::domain::{ApiToken, STATUS_OK, UserKey, ValidationStatus};

/// Non-2xx statuses whose body is a Pushover JSON rejection. Anything else, such as a
/// 429 or 401, is an [`PushoverError::HttpStatus`] and never [`ValidationStatus::Invalid`].
const API_STATUSES: &[u16] = &[400];

#[derive(Clone)]
/// Client for `POST /1/users/validate.json`.
pub struct ValidateClient {
    token: ApiToken,
    endpoint: String,
    http: Arc<dyn HttpTransport>,
}

impl fmt::Debug for ValidateClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidateClient")
            .field("token", &self.token)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl ValidateClient {
    /// Create a client using the default endpoint.
    ///
    /// For more customization, use [`ClientBuilder::validate_client`].
    pub fn new(options: ClientOptions) -> Result<Self, PushoverError> {
        ClientBuilder::new().validate_client(options)
    }

    pub(super) fn from_parts(
        token: ApiToken,
        endpoint: String,
        http: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            token,
            endpoint,
            http,
        }
    }

    /// Check whether `user` is a valid user or group key.
    ///
    /// Returns [`ValidationStatus::Valid`] or [`ValidationStatus::Invalid`]; failures to get
    /// an answer are errors, never `Invalid`.
    pub async fn check(
        &self,
        user: &UserKey,
        cancel: &CancellationToken,
    ) -> Result<ValidationStatus, PushoverError> {
        let mut params = vec![(ApiToken::FIELD.to_owned(), self.token.as_str().to_owned())];
        params.extend(crate::transport::encode_validate_form(user));

        debug!(endpoint = %self.endpoint, "validating user key");
        let response = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(PushoverError::Cancelled),
            response = self.http.post_form(&self.endpoint, params) => {
                response.map_err(PushoverError::Transport)?
            }
        };

        let parsed = decode_response(
            response,
            API_STATUSES,
            crate::transport::decode_validate_json_response,
        )?;

        if parsed.status == STATUS_OK {
            Ok(ValidationStatus::Valid)
        } else {
            debug!(status = parsed.status, errors = ?parsed.errors, "user key rejected");
            Ok(ValidationStatus::Invalid)
        }
    }
}
