//! Mock backend for tests
//!
//! Returns scripted responses in order, then falls back to a constant
//! response once the script is exhausted. Call counts are tracked so tests
//! can assert exactly how many external calls a stage made.

use crate::error::LlmError;
use crate::types::CompletionRequest;
use crate::LlmBackend;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Scriptable in-memory backend.
pub struct MockBackend {
    script: Mutex<VecDeque<Result<String, LlmError>>>,
    fallback: String,
    calls: AtomicUsize,
}

impl MockBackend {
    /// Backend that always answers with `response`.
    #[must_use]
    pub fn always(response: impl Into<String>) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: response.into(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Backend that plays `script` in order, then answers with `fallback`.
    #[must_use]
    pub fn with_script(
        script: Vec<Result<String, LlmError>>,
        fallback: impl Into<String>,
    ) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback: fallback.into(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `complete` calls made so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmBackend for MockBackend {
    async fn complete(&self, _request: CompletionRequest) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let scripted = self.script.lock().expect("mock script lock").pop_front();
        match scripted {
            Some(result) => result,
            None => Ok(self.fallback.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CompletionRequest {
        CompletionRequest::new("system", "user", 100, 0.5)
    }

    #[tokio::test]
    async fn plays_script_then_falls_back() {
        let backend = MockBackend::with_script(
            vec![
                Ok("first".to_string()),
                Err(LlmError::Transport("boom".to_string())),
            ],
            "fallback",
        );

        assert_eq!(backend.complete(request()).await.unwrap(), "first");
        assert!(backend.complete(request()).await.is_err());
        assert_eq!(backend.complete(request()).await.unwrap(), "fallback");
        assert_eq!(backend.call_count(), 3);
    }

    #[tokio::test]
    async fn always_returns_constant() {
        let backend = MockBackend::always("same");

        assert_eq!(backend.complete(request()).await.unwrap(), "same");
        assert_eq!(backend.complete(request()).await.unwrap(), "same");
        assert_eq!(backend.call_count(), 2);
    }
}
