use std::fmt;
use std::sync::Arc;

use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::{HttpTransport, PushoverError, ReceiptOptions, decode_response};
use crate::domain::{ApiToken, PollInterval, ReceiptId, ReceiptPoll, STATUS_OK};

/// Non-2xx statuses whose body is a Pushover JSON rejection; unknown receipts come back as 404.
const API_STATUSES: &[u16] = &[400, 404];

#[derive(Clone)]
/// Client for `GET /1/receipts/{receipt}.json`.
///
/// Waits for a human to acknowledge an emergency-priority message. Lookups are spaced
/// by the configured [`PollInterval`], which is never shorter than [`PollInterval::MIN`].
pub struct ReceiptClient {
    token: ApiToken,
    poll_interval: PollInterval,
    endpoint: String,
    http: Arc<dyn HttpTransport>,
}

impl fmt::Debug for ReceiptClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReceiptClient")
            .field("token", &self.token)
            .field("poll_interval", &self.poll_interval)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl ReceiptClient {
    /// Create a client using the default endpoint.
    ///
    /// For more customization, use [`ClientBuilder::receipt_client`](super::ClientBuilder::receipt_client).
    pub fn new(options: ReceiptOptions) -> Result<Self, PushoverError> {
        super::ClientBuilder::new().receipt_client(options)
    }

    pub(super) fn from_parts(
        token: ApiToken,
        poll_interval: PollInterval,
        endpoint: String,
        http: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            token,
            poll_interval,
            endpoint,
            http,
        }
    }

    pub fn poll_interval(&self) -> PollInterval {
        self.poll_interval
    }

    /// Look the receipt up once.
    ///
    /// Only [`ReceiptPoll::NotYetAcknowledged`] is worth retrying; every error is terminal.
    /// A `status != 1` reply yields [`PushoverError::ReceiptRejected`] naming `receipt`.
    pub async fn poll(&self, receipt: &ReceiptId) -> Result<ReceiptPoll, PushoverError> {
        let url = crate::transport::receipt_url(&self.endpoint, receipt, &self.token)
            .map_err(|err| PushoverError::Transport(Box::new(err)))?;

        info!(receipt = %receipt, "polling for acknowledgement");
        let response = self
            .http
            .get(url.as_str())
            .await
            .map_err(PushoverError::Transport)?;

        let parsed = decode_response(
            response,
            API_STATUSES,
            crate::transport::decode_receipt_json_response,
        )?;

        if parsed.status != STATUS_OK {
            warn!(receipt = %receipt, status = parsed.status, "receipt lookup rejected");
            return Err(PushoverError::ReceiptRejected {
                receipt: receipt.clone(),
                status: parsed.status,
                request: parsed.request,
                errors: parsed.errors,
            });
        }

        if parsed.acknowledged {
            Ok(ReceiptPoll::Acknowledged)
        } else {
            Ok(ReceiptPoll::NotYetAcknowledged)
        }
    }

    /// Poll until the receipt is acknowledged.
    ///
    /// The first lookup is immediate; later ones follow the poll interval. There is no
    /// iteration cap: the loop ends on acknowledgement, on the first error, or when
    /// `cancel` fires, whichever comes first. Cancellation interrupts both the sleep and an
    /// in-flight lookup and yields [`PushoverError::Cancelled`].
    pub async fn wait(
        &self,
        receipt: &ReceiptId,
        cancel: &CancellationToken,
    ) -> Result<(), PushoverError> {
        let mut ticker = time::interval(self.poll_interval.get());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(PushoverError::Cancelled),
                _ = ticker.tick() => {}
            }

            let outcome = tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(PushoverError::Cancelled),
                outcome = self.poll(receipt) => outcome?,
            };

            match outcome {
                ReceiptPoll::Acknowledged => {
                    info!(receipt = %receipt, "receipt acknowledged");
                    return Ok(());
                }
                ReceiptPoll::NotYetAcknowledged => {
                    debug!(
                        receipt = %receipt,
                        interval = ?self.poll_interval.get(),
                        "not acknowledged yet"
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::Instant;

    use super::super::fake::{FakeReply, FakeTransport};
    use super::*;

    const INTERVAL: Duration = Duration::from_secs(30);

    fn make_client(transport: FakeTransport) -> ReceiptClient {
        ReceiptClient::from_parts(
            ApiToken::new("test_token").unwrap(),
            PollInterval::new(INTERVAL).unwrap(),
            "https://example.invalid/1/receipts".to_owned(),
            Arc::new(transport),
        )
    }

    fn receipt() -> ReceiptId {
        ReceiptId::new("rLqVuqTRh62UzxtmqiaLzQmVcPgiCy").unwrap()
    }

    const PENDING: &str = r#"{"status": 1, "acknowledged": 0, "expired": 0}"#;
    const ACKED: &str = r#"{"status": 1, "acknowledged": 1, "acknowledged_at": 1360019238}"#;

    #[tokio::test]
    async fn poll_uses_receipt_url_with_token() {
        let transport = FakeTransport::new([FakeReply::ok(PENDING)]);
        let client = make_client(transport.clone());

        let outcome = client.poll(&receipt()).await.unwrap();
        assert_eq!(outcome, ReceiptPoll::NotYetAcknowledged);

        let recorded = transport.last_request();
        assert_eq!(recorded.method, "GET");
        assert_eq!(
            recorded.url,
            "https://example.invalid/1/receipts/rLqVuqTRh62UzxtmqiaLzQmVcPgiCy.json?token=test_token"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn wait_returns_after_third_poll_spaced_by_interval() {
        let transport = FakeTransport::new([
            FakeReply::ok(PENDING),
            FakeReply::ok(PENDING),
            FakeReply::ok(ACKED),
        ]);
        let client = make_client(transport.clone());
        let cancel = CancellationToken::new();

        let started = Instant::now();
        client.wait(&receipt(), &cancel).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].at, started);
        assert_eq!(requests[1].at - requests[0].at, INTERVAL);
        assert_eq!(requests[2].at - requests[1].at, INTERVAL);
    }

    #[tokio::test(start_paused = true)]
    async fn wait_stops_on_first_acknowledgement() {
        let transport = FakeTransport::new([FakeReply::ok(ACKED), FakeReply::ok(PENDING)]);
        let client = make_client(transport.clone());

        client
            .wait(&receipt(), &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn wait_fails_fast_on_non_ok_status() {
        let transport = FakeTransport::new([
            FakeReply::ok(PENDING),
            FakeReply::status(404, r#"{"status": 0, "errors": ["receipt not found"]}"#),
            FakeReply::ok(ACKED),
        ]);
        let client = make_client(transport.clone());

        let err = client
            .wait(&receipt(), &CancellationToken::new())
            .await
            .unwrap_err();
        match err {
            PushoverError::ReceiptRejected {
                receipt: rejected,
                status,
                errors,
                ..
            } => {
                assert_eq!(rejected, receipt());
                assert_eq!(status, 0);
                assert_eq!(errors, vec!["receipt not found".to_owned()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn poll_surfaces_unexpected_http_status() {
        let transport = FakeTransport::new([FakeReply::status(
            429,
            r#"{"status": 0, "errors": ["too many requests"]}"#,
        )]);
        let client = make_client(transport);

        let err = client.poll(&receipt()).await.unwrap_err();
        assert!(matches!(
            err,
            PushoverError::HttpStatus {
                status: 429,
                body: Some(_)
            }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn wait_does_not_retry_malformed_body_or_transport_failure() {
        let transport = FakeTransport::new([FakeReply::ok("<html>"), FakeReply::ok(ACKED)]);
        let client = make_client(transport.clone());
        let err = client
            .wait(&receipt(), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, PushoverError::Parse(_)));
        assert_eq!(transport.requests().len(), 1);

        let transport = FakeTransport::new([
            FakeReply::Fail("connection refused".to_owned()),
            FakeReply::ok(ACKED),
        ]);
        let client = make_client(transport.clone());
        let err = client
            .wait(&receipt(), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, PushoverError::Transport(_)));
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn wait_is_cancelled_while_request_hangs() {
        let transport = FakeTransport::new([FakeReply::Hang]);
        let client = make_client(transport);
        let cancel = CancellationToken::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            time::sleep(Duration::from_secs(5)).await;
            trigger.cancel();
        });

        let started = Instant::now();
        let err = client.wait(&receipt(), &cancel).await.unwrap_err();
        assert!(matches!(err, PushoverError::Cancelled));
        assert_eq!(started.elapsed(), Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn wait_is_cancelled_between_polls() {
        let transport = FakeTransport::new([FakeReply::ok(PENDING), FakeReply::ok(ACKED)]);
        let client = make_client(transport.clone());
        let cancel = CancellationToken::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            time::sleep(Duration::from_secs(10)).await;
            trigger.cancel();
        });

        let err = client.wait(&receipt(), &cancel).await.unwrap_err();
        assert!(matches!(err, PushoverError::Cancelled));
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn wait_returns_immediately_when_already_cancelled() {
        let transport = FakeTransport::new([FakeReply::ok(ACKED)]);
        let client = make_client(transport.clone());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = client.wait(&receipt(), &cancel).await.unwrap_err();
        assert!(matches!(err, PushoverError::Cancelled));
        assert!(transport.requests().is_empty());
    }
}
