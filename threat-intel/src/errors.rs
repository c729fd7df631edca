//! Error types for the threat intelligence provider

use thiserror::Error;

/// Failures from the vendor source path.
///
/// None of these escape the public read operations: `LiveSource` catches
/// every variant, logs it, and serves the fixture list instead.
#[derive(Debug, Error)]
pub enum IntelError {
    #[error("vendor request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("vendor payload failed schema validation: {0}")]
    Schema(#[from] validator::ValidationErrors),

    #[error("invalid record `{id}`: {reason}")]
    InvalidRecord { id: String, reason: String },
}
