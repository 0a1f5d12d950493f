//! Model backend error taxonomy

use thiserror::Error;

/// Errors surfaced by model backends.
///
/// `Misconfiguration` is the only variant callers should treat as fatal;
/// the rest describe a single failed call and leave the pipeline free to
/// continue with the remaining elements.
#[derive(Debug, Error)]
pub enum LlmError {
    /// The backend cannot be constructed, e.g. a missing API key.
    #[error("Backend misconfigured: {0}")]
    Misconfiguration(String),

    /// The request never produced an HTTP response.
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The provider answered with a non-success status.
    #[error("Provider error (HTTP {status}): {message}")]
    Provider { status: u16, message: String },

    /// The response arrived but did not have the expected shape.
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    /// The request exceeded the configured timeout.
    #[error("Request timed out after {0}s")]
    Timeout(u64),
}
