use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::core::OutputKind;
use crate::error::{SubmitError, SubmitResult};

/// Address the render service listens on by default.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:7001/";

/// Public submitter bootstrap configuration.
///
/// Serializable so hosts can keep it next to their own settings; every field
/// has a default, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitterConfig {
    /// Root endpoint of the render service. Charts are posted here.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Initial value of the output kind selector.
    #[serde(default)]
    pub output_kind: OutputKind,
    /// Request timeout; `None` waits for as long as the service takes.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl Default for SubmitterConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            output_kind: OutputKind::default(),
            timeout_ms: None,
        }
    }
}

impl SubmitterConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_output_kind(mut self, output_kind: OutputKind) -> Self {
        self.output_kind = output_kind;
        self
    }

    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: Option<u64>) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn from_json_str(input: &str) -> SubmitResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| SubmitError::InvalidConfig(format!("failed to parse config json: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> SubmitResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SubmitError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    pub fn validate(&self) -> SubmitResult<()> {
        self.base_url()?;
        if self.timeout_ms == Some(0) {
            return Err(SubmitError::InvalidConfig(
                "timeout_ms must be > 0 when set".to_owned(),
            ));
        }
        Ok(())
    }

    /// Parsed base URL, with the path normalized to end in `/` so relative
    /// routes resolve under it.
    pub fn base_url(&self) -> SubmitResult<Url> {
        let mut url = Url::parse(self.base_url.trim()).map_err(|e| {
            SubmitError::InvalidConfig(format!("invalid base url `{}`: {e}", self.base_url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SubmitError::InvalidConfig(format!(
                "base url must use http or https, got `{}`",
                url.scheme()
            )));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_owned()
}
