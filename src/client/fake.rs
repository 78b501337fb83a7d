use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tokio::time::Instant;

use super::{BoxError, BoxFuture, HttpResponse, HttpTransport};

#[derive(Debug, Clone)]
pub(super) enum FakeReply {
    Respond { status: u16, body: String },
    Fail(String),
    Hang,
}

impl FakeReply {
    pub(super) fn ok(body: impl Into<String>) -> Self {
        Self::Respond {
            status: 200,
            body: body.into(),
        }
    }

    pub(super) fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Respond {
            status,
            body: body.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub(super) struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    pub params: Vec<(String, String)>,
    pub at: Instant,
}

/// Scripted [`HttpTransport`]: replays replies in order and records every request.
#[derive(Debug, Clone, Default)]
pub(super) struct FakeTransport {
    state: Arc<Mutex<FakeTransportState>>,
}

#[derive(Debug, Default)]
struct FakeTransportState {
    requests: Vec<RecordedRequest>,
    replies: VecDeque<FakeReply>,
}

impl FakeTransport {
    pub(super) fn new(replies: impl IntoIterator<Item = FakeReply>) -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeTransportState {
                requests: Vec::new(),
                replies: replies.into_iter().collect(),
            })),
        }
    }

    pub(super) fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub(super) fn last_request(&self) -> RecordedRequest {
        self.requests().pop().unwrap()
    }

    fn record(
        &self,
        method: &'static str,
        url: &str,
        params: Vec<(String, String)>,
    ) -> Option<FakeReply> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(RecordedRequest {
            method,
            url: url.to_owned(),
            params,
            at: Instant::now(),
        });
        state.replies.pop_front()
    }

    async fn reply(reply: Option<FakeReply>) -> Result<HttpResponse, BoxError> {
        match reply {
            Some(FakeReply::Respond { status, body }) => Ok(HttpResponse { status, body }),
            Some(FakeReply::Fail(message)) => Err(message.into()),
            Some(FakeReply::Hang) => std::future::pending().await,
            None => Err("no scripted reply left".into()),
        }
    }
}

impl HttpTransport for FakeTransport {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
        let reply = self.record("POST", url, params);
        Box::pin(Self::reply(reply))
    }

    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
        let reply = self.record("GET", url, Vec::new());
        Box::pin(Self::reply(reply))
    }
}

pub(super) fn assert_param(params: &[(String, String)], key: &str, value: &str) {
    assert!(
        params.iter().any(|(k, v)| k == key && v == value),
        "missing param {key}={value}; got: {params:?}"
    );
}

pub(super) fn assert_no_param(params: &[(String, String)], key: &str) {
    assert!(
        !params.iter().any(|(k, _)| k == key),
        "unexpected param {key}; got: {params:?}"
    );
}
