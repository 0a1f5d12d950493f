//! Per-element explanation and docstring generation
//!
//! Walks the element list in order and makes two throttled calls per
//! element. A failed call leaves the field `None` and moves on; one bad
//! element never aborts the stage.

use crate::prompts;
use tracing::{info, warn};
use tutorgen_config::Config;
use tutorgen_extract::CodeElement;
use tutorgen_llm::{CompletionRequest, LlmBackend, RateLimiter};

/// Fill in `explanation` and `docstring` for every element, in place.
pub async fn annotate(
    elements: &mut [CodeElement],
    backend: &dyn LlmBackend,
    limiter: &RateLimiter,
    config: &Config,
) {
    let total = elements.len();
    info!(total, "Starting annotation stage");

    for (index, element) in elements.iter_mut().enumerate() {
        info!(
            element = %element.qualified_name(),
            kind = element.kind.label(),
            file = %element.file_path,
            index = index + 1,
            total,
            "Annotating element"
        );

        limiter.acquire().await;
        let explanation_request = CompletionRequest::new(
            prompts::EXPLANATION_SYSTEM,
            prompts::explanation_prompt(element),
            config.llm.max_tokens_explanation,
            config.llm.temperature,
        );
        match backend.complete(explanation_request).await {
            Ok(text) => element.explanation = Some(text),
            Err(e) => {
                warn!(element = %element.qualified_name(), error = %e, "Explanation call failed");
                element.explanation = None;
            }
        }

        limiter.acquire().await;
        let docstring_request = CompletionRequest::new(
            prompts::DOCSTRING_SYSTEM,
            prompts::docstring_prompt(element),
            config.llm.max_tokens_docstring,
            config.llm.temperature,
        );
        match backend.complete(docstring_request).await {
            Ok(text) => element.docstring = Some(clean_docstring(&text)),
            Err(e) => {
                warn!(element = %element.qualified_name(), error = %e, "Docstring call failed");
                element.docstring = None;
            }
        }
    }

    let annotated = elements.iter().filter(|e| e.has_explanation()).count();
    info!(annotated, total, "Annotation stage complete");
}

/// Strip one markdown fence pair and one layer of triple quotes that models
/// sometimes wrap docstrings in. Best effort, single pass.
pub(crate) fn clean_docstring(raw: &str) -> String {
    let mut text = raw.trim();

    for fence in ["```rust", "```"] {
        if let Some(stripped) = text.strip_prefix(fence) {
            text = stripped;
            if let Some(stripped_end) = text.trim_end().strip_suffix("```") {
                text = stripped_end;
            }
            break;
        }
    }

    text = text.trim();
    for quotes in ["\"\"\"", "'''"] {
        if text.len() >= quotes.len() * 2
            && text.starts_with(quotes)
            && text.ends_with(quotes)
        {
            text = &text[quotes.len()..text.len() - quotes.len()];
            break;
        }
    }

    text.trim().to_string()
}
