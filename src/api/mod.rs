mod display;
mod example_option;
mod json_contract;
mod submit_controller;
mod submitter;
mod submitter_config;

pub use display::{CollectingNotifier, DisplayRegion, Notifier, TracingNotifier};
pub use example_option::EXAMPLE_OPTION;
pub use json_contract::{RENDER_RESULT_JSON_SCHEMA_V1, RenderResultJsonContractV1};
pub use submitter::{OptionSubmitter, SubmitState};
pub use submitter_config::{DEFAULT_BASE_URL, SubmitterConfig};
