//! Error types for parameter decoding and encoding.

use thiserror::Error;

/// Result type for parameter codec operations.
pub type Result<T> = std::result::Result<T, ParamsError>;

/// Errors raised by the wire codec.
///
/// Only malformed payload syntax is an error. Resolution and reference
/// parsing have no failure path.
#[derive(Debug, Error)]
pub enum ParamsError {
    /// The payload is not well-formed JSON.
    #[error("failed to decode parameter payload: {0}")]
    Decode(#[source] serde_json::Error),

    /// A value could not be written out.
    #[error("failed to encode parameter value: {0}")]
    Encode(#[source] serde_json::Error),
}
