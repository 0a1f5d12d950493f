//! Model backend abstraction for tutorgen
//!
//! Every pipeline stage talks to a model through the [`LlmBackend`] trait.
//! The production implementation is [`DeepSeekBackend`]; tests swap in
//! [`MockBackend`] and drive stages with scripted responses. Call pacing is
//! handled by [`RateLimiter`], injected alongside the backend rather than
//! hidden inside it.

mod deepseek;
mod error;
mod throttle;
mod types;

#[cfg(any(test, feature = "test-utils"))]
mod mock;

pub use deepseek::DeepSeekBackend;
pub use error::LlmError;
pub use throttle::RateLimiter;
pub use types::{CompletionRequest, Message, Role};

#[cfg(any(test, feature = "test-utils"))]
pub use mock::MockBackend;

use async_trait::async_trait;
use tutorgen_config::Config;

/// A model backend that can answer one completion request.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Run one completion and return the assistant text, trimmed.
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError>;
}

/// Build the production backend from configuration.
///
/// # Errors
///
/// Returns `LlmError::Misconfiguration` if the API key environment variable
/// is unset or the HTTP client cannot be constructed.
pub fn backend_from_config(config: &Config) -> Result<Box<dyn LlmBackend>, LlmError> {
    let backend = DeepSeekBackend::new_from_config(config)?;
    Ok(Box::new(backend))
}

/// Build the call gate from configuration.
#[must_use]
pub fn limiter_from_config(config: &Config) -> RateLimiter {
    RateLimiter::new(config.llm.call_delay_ms)
}
