use tracing::debug;

use crate::core::object_literal::parse_literal_at;
use crate::core::types::ChartSpec;
use crate::error::ParseError;

/// Marker that switches editor text from strict JSON to object-literal parsing.
pub const OPTION_ASSIGNMENT: &str = "option = ";

/// How a piece of editor text is going to be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionSyntax {
    Json,
    /// `option = { ... }` assignment; the literal starts at `literal_start` (byte offset).
    Assignment { literal_start: usize },
}

impl OptionSyntax {
    #[must_use]
    pub fn detect(raw_text: &str) -> Self {
        match raw_text.find(OPTION_ASSIGNMENT) {
            Some(idx) => Self::Assignment {
                literal_start: idx + OPTION_ASSIGNMENT.len(),
            },
            None => Self::Json,
        }
    }
}

/// Builds a chart specification from editor text.
///
/// Text containing `option = ` is read as an assignment: the literal after the
/// first occurrence is parsed with the object-literal grammar, while anything
/// before it and any statements after it are ignored. All other text must be
/// strict JSON.
pub fn parse_chart_spec(raw_text: &str) -> Result<ChartSpec, ParseError> {
    match OptionSyntax::detect(raw_text) {
        OptionSyntax::Assignment { literal_start } => {
            let parsed = parse_literal_at(raw_text, literal_start)?;
            let ignored = raw_text[parsed.end..].trim();
            if !ignored.is_empty() {
                debug!(
                    ignored_bytes = ignored.len(),
                    "ignoring statements after option literal"
                );
            }
            Ok(ChartSpec::new(parsed.value))
        }
        OptionSyntax::Json => serde_json::from_str(raw_text)
            .map(ChartSpec::new)
            .map_err(|e| ParseError::Json {
                line: e.line(),
                column: e.column(),
                message: json_error_message(&e),
            }),
    }
}

/// `serde_json` appends " at line X column Y" to its messages; the position is
/// carried in dedicated fields instead.
fn json_error_message(err: &serde_json::Error) -> String {
    let full = err.to_string();
    match full.rfind(" at line ") {
        Some(idx) => full[..idx].to_owned(),
        None => full,
    }
}
