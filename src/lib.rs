//! chart-submit: client for chart render services.
//!
//! Editor text (strict JSON, or an `option = { ... }` object literal) is turned
//! into a chart specification, posted to the render service, and the SVG or
//! PNG answer is placed into a display region.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;
pub mod transport;

pub use api::{OptionSubmitter, SubmitterConfig};
pub use crate::core::{ChartSpec, OutputKind, RenderResult, parse_chart_spec};
pub use error::{ParseError, SubmitError, SubmitResult};
pub use transport::{HttpTransport, RenderTransport};
