//! Error types for fittrack-core

use thiserror::Error;

/// Errors surfaced by the parsing and aggregation core.
///
/// Aggregation queries that match zero records are never errors: they resolve
/// to zero-valued summaries, so chart consumers never branch on missing data.
#[derive(Debug, Error)]
pub enum CoreError {
    /// User-correctable input problem: missing `#` marker, wrong segment
    /// count, unparsable numeric field, or missing delimiter literal.
    #[error("Malformed workout input: {0}")]
    MalformedInput(String),

    /// Referenced user identifier does not resolve.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Missing, invalid, or expired credential. Produced by the identity
    /// collaborator and propagated unchanged.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Persistence collaborator failure. Not retried by the core.
    #[error("Store failure: {0}")]
    StoreFailure(String),

    /// Missing or invalid startup configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}
