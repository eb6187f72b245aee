//! In-memory [`HttpTransport`] used by unit tests across the crate.

use std::collections::VecDeque;
use std::error::Error as StdError;
use std::io;
use std::sync::{Arc, Mutex};

use super::{BoxFuture, HttpResponse, HttpTransport};

#[derive(Debug, Clone)]
pub(crate) enum FakeReply {
    Status(u16, String),
    Unreachable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Default)]
struct FakeTransportState {
    requests: Vec<RecordedRequest>,
    login_replies: VecDeque<FakeReply>,
    send_replies: VecDeque<FakeReply>,
}

/// Replays queued replies: `GET` requests consume login replies, `POST`
/// requests consume send replies. The last queued reply repeats forever.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeTransport {
    state: Arc<Mutex<FakeTransportState>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_login(self, status: u16, body: impl Into<String>) -> Self {
        self.state
            .lock()
            .unwrap()
            .login_replies
            .push_back(FakeReply::Status(status, body.into()));
        self
    }

    pub fn on_send(self, status: u16, body: impl Into<String>) -> Self {
        self.state
            .lock()
            .unwrap()
            .send_replies
            .push_back(FakeReply::Status(status, body.into()));
        self
    }

    pub fn on_send_unreachable(self, reason: impl Into<String>) -> Self {
        self.state
            .lock()
            .unwrap()
            .send_replies
            .push_back(FakeReply::Unreachable(reason.into()));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn login_calls(&self) -> usize {
        self.requests().iter().filter(|r| r.method == "GET").count()
    }

    pub fn send_calls(&self) -> usize {
        self.requests().iter().filter(|r| r.method == "POST").count()
    }

    fn record(&self, request: RecordedRequest) -> FakeReply {
        let mut state = self.state.lock().unwrap();
        let is_login = request.method == "GET";
        state.requests.push(request);
        let queue = if is_login {
            &mut state.login_replies
        } else {
            &mut state.send_replies
        };
        let reply = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };
        reply.unwrap_or_else(|| FakeReply::Unreachable("no reply queued".to_owned()))
    }
}

fn into_result(reply: FakeReply) -> Result<HttpResponse, Box<dyn StdError + Send + Sync>> {
    match reply {
        FakeReply::Status(status, body) => Ok(HttpResponse { status, body }),
        FakeReply::Unreachable(reason) => Err(Box::new(io::Error::new(
            io::ErrorKind::ConnectionRefused,
            reason,
        ))),
    }
}

impl HttpTransport for FakeTransport {
    fn get<'a>(
        &'a self,
        url: &'a str,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let reply = self.record(RecordedRequest {
                method: "GET",
                url: url.to_owned(),
                headers: Vec::new(),
                body: None,
            });
            into_result(reply)
        })
    }

    fn post_json<'a>(
        &'a self,
        url: &'a str,
        headers: Vec<(String, String)>,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let reply = self.record(RecordedRequest {
                method: "POST",
                url: url.to_owned(),
                headers,
                body: Some(body),
            });
            into_result(reply)
        })
    }
}
