use tracing::{debug, info, warn};

use crate::core::{EChartsSummary, OutputKind, RenderResult, parse_chart_spec};
use crate::error::SubmitResult;
use crate::transport::{RenderRequest, RenderTransport};

use super::{OptionSubmitter, SubmitState};

impl<T: RenderTransport> OptionSubmitter<T> {
    /// Parses `raw_text` and renders it through the transport.
    ///
    /// Leaves the display region and notifier untouched; a parse failure
    /// returns before anything is sent.
    pub fn submit(&mut self, raw_text: &str, output_kind: OutputKind) -> SubmitResult<RenderResult> {
        let spec = parse_chart_spec(raw_text)?;
        debug!(keys = spec.key_count(), %output_kind, "parsed chart spec");
        for warning in EChartsSummary::from_spec(&spec).warnings() {
            warn!(%warning, "chart option looks suspicious");
        }

        let request = RenderRequest::new(spec, output_kind);
        let payload = self.transport.post_render(&request)?;
        Ok(RenderResult::new(output_kind, payload))
    }

    /// Submits the editor text with the selected output kind.
    ///
    /// On success the display region is replaced with the result markup. On
    /// failure the message goes to the notifier and the display keeps its
    /// previous content.
    pub fn run(&mut self) -> SubmitResult<RenderResult> {
        self.state = SubmitState::Submitting;
        let editor = std::mem::take(&mut self.editor);
        let outcome = self.submit(&editor, self.output_kind);
        self.editor = editor;
        self.state = SubmitState::Idle;

        match &outcome {
            Ok(result) => {
                info!(
                    output_kind = %result.kind,
                    bytes = result.payload.len(),
                    "chart rendered"
                );
                self.display.replace(result.to_markup());
                self.last_result = Some(result.clone());
            }
            Err(err) => self.notifier.notify(&err.to_string()),
        }
        outcome
    }

    /// Checks that the render service is reachable.
    pub fn ping(&mut self) -> SubmitResult<()> {
        self.transport.ping()
    }

    /// Parses the editor text without sending it.
    pub fn summarize_editor(&self) -> SubmitResult<EChartsSummary> {
        let spec = parse_chart_spec(&self.editor)?;
        Ok(EChartsSummary::from_spec(&spec))
    }
}
