//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::{ApiToken, PollInterval, ReceiptId, ValidationError};

mod message;
mod receipt;
mod validate;

#[cfg(test)]
mod fake;

pub use message::MessageClient;
pub use receipt::ReceiptClient;
pub use validate::ValidateClient;

const DEFAULT_BASE_URL: &str = "https://api.pushover.net/1";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
type BoxError = Box<dyn StdError + Send + Sync>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

impl HttpResponse {
    fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

trait HttpTransport: Send + Sync {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>>;

    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<HttpResponse, BoxError>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
        Box::pin(async move {
            let response = self.client.post(url).form(&params).send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }

    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
        Box::pin(async move {
            let response = self.client.get(url).send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by the Pushover clients.
///
/// This error preserves:
/// - configuration failures detected before any request is made,
/// - HTTP-level failures (transport failures or non-2xx status without an API body),
/// - API-level failures (top-level `status != 1`),
/// - parse failures and cancellation.
pub enum PushoverError {
    /// Client options or request values were rejected before any network activity.
    #[error("configuration error: {0}")]
    Configuration(#[from] ValidationError),

    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// Non-successful HTTP status code returned without a recognizable API body.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// Pushover rejected the request (`status != 1`).
    #[error(
        "API returned non-OK status ({status}) for request {}: {}",
        .request.as_deref().unwrap_or("-"),
        .errors.join(", ")
    )]
    Api {
        status: i64,
        request: Option<String>,
        errors: Vec<String>,
    },

    /// Pushover rejected a receipt lookup (`status != 1`).
    #[error(
        "receipt API returned non-OK status ({status}) for receipt {receipt}: {}",
        .errors.join(", ")
    )]
    ReceiptRejected {
        receipt: ReceiptId,
        status: i64,
        request: Option<String>,
        errors: Vec<String>,
    },

    /// Response body could not be parsed as the expected format.
    #[error("parse error: {0}")]
    Parse(#[source] BoxError),

    /// The caller's cancellation token fired before the operation finished.
    #[error("operation cancelled")]
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Options shared by the message and validate clients.
pub struct ClientOptions {
    /// Application API token; validated when the client is built.
    pub token: String,
}

impl ClientOptions {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Options for [`ReceiptClient`].
pub struct ReceiptOptions {
    /// Application API token; validated when the client is built.
    pub token: String,
    /// Delay between receipt lookups; must be at least [`PollInterval::MIN`].
    pub poll_interval: Duration,
}

impl ReceiptOptions {
    pub fn new(token: impl Into<String>, poll_interval: Duration) -> Self {
        Self {
            token: token.into(),
            poll_interval,
        }
    }
}

#[derive(Debug, Clone)]
/// Builder for the Pushover clients.
///
/// Use this when you need to customize the API base URL, timeout, or user-agent.
/// The `*_client` finishers validate the options before any request is made.
pub struct ClientBuilder {
    base_url: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    /// Create a builder with the default base URL and no timeout/user-agent override.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the API base URL (`https://api.pushover.net/1`).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set an HTTP client timeout applied to each request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`MessageClient`].
    pub fn message_client(self, options: ClientOptions) -> Result<MessageClient, PushoverError> {
        let token = ApiToken::new(options.token)?;
        let endpoint = self.endpoint("messages.json");
        Ok(MessageClient::from_parts(token, endpoint, self.transport()?))
    }

    /// Build a [`ReceiptClient`].
    pub fn receipt_client(self, options: ReceiptOptions) -> Result<ReceiptClient, PushoverError> {
        let token = ApiToken::new(options.token)?;
        let poll_interval = PollInterval::new(options.poll_interval)?;
        let endpoint = self.endpoint("receipts");
        Ok(ReceiptClient::from_parts(
            token,
            poll_interval,
            endpoint,
            self.transport()?,
        ))
    }

    /// Build a [`ValidateClient`].
    pub fn validate_client(self, options: ClientOptions) -> Result<ValidateClient, PushoverError> {
        let token = ApiToken::new(options.token)?;
        let endpoint = self.endpoint("users/validate.json");
        Ok(ValidateClient::from_parts(token, endpoint, self.transport()?))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.trim_end_matches('/'))
    }

    fn transport(self) -> Result<Arc<dyn HttpTransport>, PushoverError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| PushoverError::Transport(Box::new(err)))?;
        Ok(Arc::new(ReqwestTransport { client }))
    }
}

/// Decode a response body, falling back to [`PushoverError::HttpStatus`] when the
/// server did not answer with a usable API body.
///
/// Bodies are decoded for 2xx and for the non-2xx statuses in `api_statuses`, which
/// Pushover uses to report rejected input. Every other status is an HTTP error.
fn decode_response<T, E>(
    response: HttpResponse,
    api_statuses: &[u16],
    decode: impl FnOnce(&str) -> Result<T, E>,
) -> Result<T, PushoverError>
where
    E: StdError + Send + Sync + 'static,
{
    if !response.is_success() && !api_statuses.contains(&response.status) {
        return Err(http_status_error(response));
    }
    match decode(&response.body) {
        Ok(parsed) => Ok(parsed),
        Err(err) if response.is_success() => Err(PushoverError::Parse(Box::new(err))),
        Err(_) => Err(http_status_error(response)),
    }
}

fn http_status_error(response: HttpResponse) -> PushoverError {
    let body = if response.body.trim().is_empty() {
        None
    } else {
        Some(response.body)
    };
    PushoverError::HttpStatus {
        status: response.status,
        body,
    }
}
