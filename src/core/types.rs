use std::fmt;
use std::str::FromStr;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{SubmitError, SubmitResult};

/// Requested response format of the render service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    #[default]
    Svg,
    Png,
}

impl OutputKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }

    /// Value of the `outputType` query parameter, if one is sent at all.
    ///
    /// SVG is the service default and is requested by omitting the parameter.
    #[must_use]
    pub fn query_value(self) -> Option<&'static str> {
        match self {
            Self::Svg => None,
            Self::Png => Some("png"),
        }
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            other => Err(format!("unknown output kind `{other}` (expected svg or png)")),
        }
    }
}

/// Chart configuration parsed from editor text.
///
/// The payload is opaque to this crate: it is forwarded to the render service
/// as-is. Object key order follows the source text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChartSpec(Value);

impl ChartSpec {
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Top-level key count, or `0` when the specification is not an object.
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.0.as_object().map_or(0, serde_json::Map::len)
    }

    pub fn to_json_body(&self) -> SubmitResult<String> {
        serde_json::to_string(&self.0).map_err(|e| {
            SubmitError::InvalidPayload(format!("failed to encode chart spec: {e}"))
        })
    }
}

impl From<Value> for ChartSpec {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Response of the render service, interpreted per requested [`OutputKind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderResult {
    pub kind: OutputKind,
    /// SVG markup for `svg`, base64 PNG data for `png`.
    pub payload: String,
}

impl RenderResult {
    #[must_use]
    pub fn new(kind: OutputKind, payload: impl Into<String>) -> Self {
        Self {
            kind,
            payload: payload.into(),
        }
    }

    /// Markup placed into the display region.
    #[must_use]
    pub fn to_markup(&self) -> String {
        match self.kind {
            OutputKind::Svg => self.payload.clone(),
            OutputKind::Png => format!(r#"<img src="data:image/png;base64,{}" />"#, self.payload),
        }
    }

    /// Raw file contents: SVG text, or the decoded PNG image.
    pub fn to_bytes(&self) -> SubmitResult<Vec<u8>> {
        match self.kind {
            OutputKind::Svg => Ok(self.payload.as_bytes().to_vec()),
            OutputKind::Png => STANDARD.decode(self.payload.trim()).map_err(|e| {
                SubmitError::InvalidPayload(format!("png payload is not valid base64: {e}"))
            }),
        }
    }
}
