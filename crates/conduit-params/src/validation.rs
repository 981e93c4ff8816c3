//! Structured validation failures.

use serde::Serialize;

/// A validation failure: what went wrong, and every field path it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{message}: {}", .paths.join(", "))]
pub struct FieldError {
    pub message: String,
    pub paths: Vec<String>,
}

impl FieldError {
    pub fn new<I, S>(message: impl Into<String>, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            message: message.into(),
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// Fold another failure into this one.
    ///
    /// Paths are merged (sorted, deduplicated) when both carry the same
    /// message; otherwise `other`'s message is appended after a `; `.
    pub fn also(mut self, other: FieldError) -> Self {
        if self.message != other.message {
            self.message = format!("{}; {}", self.message, other.message);
        }
        self.paths.extend(other.paths);
        self.paths.sort();
        self.paths.dedup();
        self
    }
}
