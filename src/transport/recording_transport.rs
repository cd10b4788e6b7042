use std::collections::VecDeque;

use serde_json::Value;

use crate::core::OutputKind;
use crate::error::{SubmitError, SubmitResult};

use super::{RenderRequest, RenderTransport, status_error_message};

/// Canned outcome for one exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Body(String),
    Status { status: u16, body: String },
    Unreachable(String),
}

/// A request as it would have gone over the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub output_kind: OutputKind,
    pub query: Vec<(String, String)>,
    /// JSON body, decoded back so tests can compare structurally.
    pub body: Value,
}

/// In-memory transport used by tests and dry runs.
///
/// It still encodes the body to JSON so tests see exactly what the HTTP
/// transport would send. Queued replies are consumed in order; once the queue
/// is empty the fallback reply is used.
#[derive(Debug)]
pub struct RecordingTransport {
    requests: Vec<RecordedRequest>,
    replies: VecDeque<Reply>,
    fallback: Reply,
    ping_count: usize,
}

impl Default for RecordingTransport {
    fn default() -> Self {
        Self::replying("")
    }
}

impl RecordingTransport {
    /// Transport answering every request with `body`.
    #[must_use]
    pub fn replying(body: impl Into<String>) -> Self {
        Self {
            requests: Vec::new(),
            replies: VecDeque::new(),
            fallback: Reply::Body(body.into()),
            ping_count: 0,
        }
    }

    pub fn push_reply(&mut self, reply: Reply) {
        self.replies.push_back(reply);
    }

    #[must_use]
    pub fn requests(&self) -> &[RecordedRequest] {
        &self.requests
    }

    #[must_use]
    pub fn last_request(&self) -> Option<&RecordedRequest> {
        self.requests.last()
    }

    /// Number of health checks received.
    #[must_use]
    pub fn ping_count(&self) -> usize {
        self.ping_count
    }
}

impl RenderTransport for RecordingTransport {
    fn post_render(&mut self, request: &RenderRequest) -> SubmitResult<String> {
        let body = request.spec.to_json_body()?;
        let body: Value = serde_json::from_str(&body)
            .map_err(|e| SubmitError::InvalidPayload(format!("request body is not JSON: {e}")))?;
        self.requests.push(RecordedRequest {
            output_kind: request.output_kind,
            query: request
                .query_pairs()
                .into_iter()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect(),
            body,
        });

        match self.replies.pop_front().unwrap_or_else(|| self.fallback.clone()) {
            Reply::Body(body) => Ok(body),
            Reply::Status { status, body } => {
                Err(SubmitError::Network(status_error_message(status, &body)))
            }
            Reply::Unreachable(message) => Err(SubmitError::Network(message)),
        }
    }

    fn ping(&mut self) -> SubmitResult<()> {
        self.ping_count += 1;
        Ok(())
    }
}
