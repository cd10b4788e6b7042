mod http_transport;
mod recording_transport;

pub use http_transport::HttpTransport;
pub use recording_transport::{RecordedRequest, RecordingTransport, Reply};

use serde_json::Value;

use crate::core::{ChartSpec, OutputKind};
use crate::error::SubmitResult;

/// Query parameter carrying the requested output kind.
pub const OUTPUT_TYPE_PARAM: &str = "outputType";

/// One render call: the chart specification and the requested output kind.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub output_kind: OutputKind,
    pub spec: ChartSpec,
}

impl RenderRequest {
    #[must_use]
    pub fn new(spec: ChartSpec, output_kind: OutputKind) -> Self {
        Self { output_kind, spec }
    }

    /// Query pairs appended to the render endpoint; empty for SVG.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, &'static str)> {
        self.output_kind
            .query_value()
            .map(|value| (OUTPUT_TYPE_PARAM, value))
            .into_iter()
            .collect()
    }
}

/// Contract implemented by anything that can reach the render service.
///
/// The submitter only sees response text; status handling and wire details
/// stay inside the transport.
pub trait RenderTransport {
    /// Sends the request and returns the response body of a successful exchange.
    fn post_render(&mut self, request: &RenderRequest) -> SubmitResult<String>;

    /// Health check against the service's `ping` route.
    fn ping(&mut self) -> SubmitResult<()>;
}

/// Message for a non-success HTTP status.
///
/// The render service reports failures as JSON with a `message` field; that
/// field is preferred over the raw body when present.
pub(crate) fn status_error_message(status: u16, body: &str) -> String {
    let body = body.trim();
    let detail = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value.get("message").and_then(Value::as_str).map(str::to_owned))
        .unwrap_or_else(|| body.to_owned());
    if detail.is_empty() {
        format!("render service returned status {status}")
    } else {
        format!("render service returned status {status}: {detail}")
    }
}
