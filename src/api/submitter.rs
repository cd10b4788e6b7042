use crate::core::{OutputKind, RenderResult};
use crate::error::SubmitResult;
use crate::transport::RenderTransport;

use super::{DisplayRegion, EXAMPLE_OPTION, Notifier, SubmitterConfig, TracingNotifier};

/// Lifecycle of a single submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitState {
    #[default]
    Idle,
    Submitting,
}

/// Session controller tying editor text, output selector and display region
/// to a render transport.
///
/// One instance per session. The transport is injected so hosts can swap the
/// HTTP client for an in-memory one.
pub struct OptionSubmitter<T: RenderTransport> {
    pub(super) transport: T,
    pub(super) config: SubmitterConfig,
    pub(super) editor: String,
    pub(super) output_kind: OutputKind,
    pub(super) display: DisplayRegion,
    pub(super) last_result: Option<RenderResult>,
    pub(super) state: SubmitState,
    pub(super) notifier: Box<dyn Notifier>,
}

impl<T: RenderTransport> OptionSubmitter<T> {
    pub fn new(transport: T, config: SubmitterConfig) -> SubmitResult<Self> {
        config.validate()?;
        Ok(Self {
            transport,
            output_kind: config.output_kind,
            config,
            editor: EXAMPLE_OPTION.to_owned(),
            display: DisplayRegion::default(),
            last_result: None,
            state: SubmitState::Idle,
            notifier: Box::new(TracingNotifier),
        })
    }

    #[must_use]
    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    #[must_use]
    pub fn editor_text(&self) -> &str {
        &self.editor
    }

    pub fn set_editor_text(&mut self, text: impl Into<String>) {
        self.editor = text.into();
    }

    #[must_use]
    pub fn output_kind(&self) -> OutputKind {
        self.output_kind
    }

    pub fn set_output_kind(&mut self, output_kind: OutputKind) {
        self.output_kind = output_kind;
    }

    #[must_use]
    pub fn display(&self) -> &DisplayRegion {
        &self.display
    }

    #[must_use]
    pub fn display_markup(&self) -> &str {
        self.display.markup()
    }

    #[must_use]
    pub fn last_result(&self) -> Option<&RenderResult> {
        self.last_result.as_ref()
    }

    #[must_use]
    pub fn state(&self) -> SubmitState {
        self.state
    }

    #[must_use]
    pub fn config(&self) -> &SubmitterConfig {
        &self.config
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}
