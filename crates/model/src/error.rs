use serde_json::error::Category;
use thiserror::Error;

/// Failure raised while decoding an upstream payload.
///
/// The decoder never recovers locally: callers decide whether to refetch,
/// skip the document, or abort.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The input is not well-formed JSON, or ended early.
    #[error("malformed JSON at line {line}, column {column}")]
    Syntax {
        line: usize,
        column: usize,
        #[source]
        source: serde_json::Error,
    },

    /// The JSON is well formed but a field has the wrong type or a required
    /// field is missing.
    #[error("unexpected document shape at line {line}, column {column}")]
    Shape {
        line: usize,
        column: usize,
        #[source]
        source: serde_json::Error,
    },

    /// Reading from the underlying source failed.
    #[error("failed to read document")]
    Io(#[source] serde_json::Error),
}

impl DecodeError {
    /// Return `true` when the input was not valid JSON at all.
    #[must_use]
    pub fn is_syntax(&self) -> bool {
        matches!(self, Self::Syntax { .. })
    }

    /// Return `true` when the JSON was valid but did not match the expected shape.
    #[must_use]
    pub fn is_shape(&self) -> bool {
        matches!(self, Self::Shape { .. })
    }

    /// Line of the offending input, when known.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Syntax { line, .. } | Self::Shape { line, .. } => Some(*line),
            Self::Io(_) => None,
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(source: serde_json::Error) -> Self {
        let line = source.line();
        let column = source.column();
        match source.classify() {
            Category::Syntax | Category::Eof => Self::Syntax {
                line,
                column,
                source,
            },
            Category::Data => Self::Shape {
                line,
                column,
                source,
            },
            Category::Io => Self::Io(source),
        }
    }
}
