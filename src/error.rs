//! Error types for the fetch-parse-aggregate core

use std::time::Duration;

/// Errors produced while listing, fetching, parsing or aggregating prefixes
#[derive(Debug, thiserror::Error)]
pub enum StatError {
    /// External collaborator failed: spawn error, non-zero exit or stderr output
    #[error("transport error while running `{command}`: {reason}")]
    Transport { command: String, reason: String },

    /// Content line without the `date time size file` shape
    #[error("malformed report row at line {line}: {reason} ({text:?})")]
    MalformedRow {
        line: usize,
        text: String,
        reason: String,
    },

    /// `Total Objects` / `Total Size` line without a `:` or a numeric value
    #[error("malformed report header at line {line}: {reason} ({text:?})")]
    MalformedHeader {
        line: usize,
        text: String,
        reason: String,
    },

    #[error("report structure mismatch: {0}")]
    StructuralMismatch(String),

    /// Prefix reported zero objects, so no average exists
    #[error("prefix {prefix:?} reports zero objects, cannot compute average size")]
    DivisionByZero { prefix: String },

    #[error("prefix {0:?} has no non-empty path segment to derive a label from")]
    InvalidPrefix(String),

    /// Two prefixes derive the same output key
    #[error("prefixes {first:?} and {second:?} both map to label {label:?}")]
    LabelCollision {
        label: String,
        first: String,
        second: String,
    },

    #[error("fetching report for prefix {prefix:?} timed out after {after:?}")]
    TimedOut { prefix: String, after: Duration },

    /// Collaborator output could not be decoded
    #[error("failed to decode {what}: {source}")]
    Decode {
        what: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StatError {
    pub(crate) fn transport(command: impl Into<String>, reason: impl Into<String>) -> Self {
        StatError::Transport {
            command: command.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StatError>;
