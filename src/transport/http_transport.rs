use reqwest::Url;
use reqwest::blocking::Client;
use tracing::{debug, warn};

use crate::api::SubmitterConfig;
use crate::error::{SubmitError, SubmitResult};

use super::{RenderRequest, RenderTransport, status_error_message};

const USER_AGENT: &str = concat!("chart-submit/", env!("CARGO_PKG_VERSION"));
const PING_PATH: &str = "ping";
const PING_REPLY: &str = "pong";

/// Blocking HTTP transport talking to a chart render service.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(config: &SubmitterConfig) -> SubmitResult<Self> {
        let base_url = config.base_url()?;
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout())
            .build()
            .map_err(|e| SubmitError::Network(format!("failed to build http client: {e}")))?;
        Ok(Self { client, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Render endpoint for `request`, with `outputType` appended only for PNG.
    #[must_use]
    pub fn render_url(&self, request: &RenderRequest) -> Url {
        let mut url = self.base_url.clone();
        let pairs = request.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        url
    }
}

impl RenderTransport for HttpTransport {
    fn post_render(&mut self, request: &RenderRequest) -> SubmitResult<String> {
        let url = self.render_url(request);
        debug!(%url, output_kind = %request.output_kind, "posting chart spec");

        let response = self
            .client
            .post(url)
            .json(&request.spec)
            .send()
            .map_err(|e| SubmitError::Network(format!("render request failed: {e}")))?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|e| SubmitError::Network(format!("failed to read render response: {e}")))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "render service rejected chart spec");
            return Err(SubmitError::Network(status_error_message(
                status.as_u16(),
                &body,
            )));
        }
        debug!(status = status.as_u16(), bytes = body.len(), "render response received");
        Ok(body)
    }

    fn ping(&mut self) -> SubmitResult<()> {
        let url = self
            .base_url
            .join(PING_PATH)
            .map_err(|e| SubmitError::InvalidConfig(format!("invalid ping url: {e}")))?;
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| SubmitError::Network(format!("ping failed: {e}")))?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|e| SubmitError::Network(format!("failed to read ping response: {e}")))?;
        if !status.is_success() {
            return Err(SubmitError::Network(status_error_message(
                status.as_u16(),
                &body,
            )));
        }
        if body.trim() != PING_REPLY {
            return Err(SubmitError::Network(format!(
                "unexpected ping reply `{}`",
                body.trim()
            )));
        }
        Ok(())
    }
}
