use thiserror::Error;

pub type SubmitResult<T> = Result<T, SubmitError>;

/// Failure to turn editor text into a chart specification.
///
/// Line and column are 1-based and point into the text that was handed to the
/// parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid JSON at line {line}, column {column}: {message}")]
    Json {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("invalid option literal at line {line}, column {column}: {message}")]
    Literal {
        line: usize,
        column: usize,
        message: String,
    },
}

impl ParseError {
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            Self::Json { line, .. } | Self::Literal { line, .. } => *line,
        }
    }

    #[must_use]
    pub fn column(&self) -> usize {
        match self {
            Self::Json { column, .. } | Self::Literal { column, .. } => *column,
        }
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("network error: {0}")]
    Network(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid render payload: {0}")]
    InvalidPayload(String),
}

impl SubmitError {
    #[must_use]
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }

    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}
