use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use super::{ClientBuilder, ClientOptions, HttpTransport, PushoverError, decode_response};
use crate::domain::{ApiToken, MessageSent, ReceiptId, STATUS_OK, SendMessage};

/// Non-2xx statuses whose body is a Pushover JSON rejection.
const API_STATUSES: &[u16] = &[400];

#[derive(Clone)]
/// Client for `POST /1/messages.json`.
///
/// Sends one notification per call. Network failures are returned as-is; nothing is retried.
pub struct MessageClient {
    token: ApiToken,
    endpoint: String,
    http: Arc<dyn HttpTransport>,
}

impl fmt::Debug for MessageClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageClient")
            .field("token", &self.token)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl MessageClient {
    /// Create a client using the default endpoint.
    ///
    /// For more customization, use [`ClientBuilder::message_client`].
    pub fn new(options: ClientOptions) -> Result<Self, PushoverError> {
        ClientBuilder::new().message_client(options)
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

    /// Send a message.
    ///
    /// Emergency-priority messages yield the receipt id to poll with
    /// [`ReceiptClient::wait`](crate::ReceiptClient::wait); normal messages never carry one.
    ///
    /// Errors:
    /// - [`PushoverError::Transport`] / [`PushoverError::HttpStatus`] for HTTP failures,
    /// - [`PushoverError::Parse`] for undecodable bodies or an emergency reply without receipt,
    /// - [`PushoverError::Api`] when Pushover returns `status != 1`.
    pub async fn send(&self, request: SendMessage) -> Result<MessageSent, PushoverError> {
        let mut params = vec![(ApiToken::FIELD.to_owned(), self.token.as_str().to_owned())];
        params.extend(crate::transport::encode_message_form(&request));

        debug!(
            endpoint = %self.endpoint,
            emergency = request.priority().is_emergency(),
            "sending message"
        );
        let response = self
            .http
            .post_form(&self.endpoint, params)
            .await
            .map_err(PushoverError::Transport)?;

        let parsed = decode_response(
            response,
            API_STATUSES,
            crate::transport::decode_message_json_response,
        )?;

        if parsed.status != STATUS_OK {
            warn!(status = parsed.status, request = ?parsed.request, "message rejected");
            return Err(PushoverError::Api {
                status: parsed.status,
                request: parsed.request,
                errors: parsed.errors,
            });
        }

        let receipt = if request.priority().is_emergency() {
            let raw = parsed.receipt.ok_or_else(|| {
                PushoverError::Parse("emergency message accepted without a receipt".into())
            })?;
            Some(ReceiptId::new(raw).map_err(|err| PushoverError::Parse(Box::new(err)))?)
        } else {
            None
        };

        Ok(MessageSent {
            request: parsed.request,
            receipt,
        })
    }
}
