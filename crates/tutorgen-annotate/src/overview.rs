//! Project overview generation
//!
//! Builds one bullet per element from the annotation results and asks the
//! model for a README-style narrative. The bullet list is bounded in both
//! count and per-bullet length so the single call stays inside a predictable
//! token budget.

use crate::prompts;
use tracing::{info, warn};
use tutorgen_config::Config;
use tutorgen_extract::{CodeElement, ElementKind};
use tutorgen_llm::{CompletionRequest, LlmBackend, RateLimiter};

/// Generate the project overview narrative.
///
/// Returns `None` when there is nothing to summarize (no elements, or no
/// element with an explanation) or when the model call fails. The pipeline
/// treats a missing overview as degraded output, not an error.
pub async fn summarize(
    elements: &[CodeElement],
    project_name: &str,
    backend: &dyn LlmBackend,
    limiter: &RateLimiter,
    config: &Config,
) -> Option<String> {
    if elements.is_empty() {
        info!("No elements available, skipping overview");
        return None;
    }

    let mut bullets = element_bullets(elements, config.overview.snippet_chars);
    if bullets.is_empty() {
        info!("No explanations available, skipping overview");
        return None;
    }
    bullets.truncate(config.overview.max_elements);

    limiter.acquire().await;
    let request = CompletionRequest::new(
        prompts::OVERVIEW_SYSTEM,
        prompts::overview_prompt(project_name, &bullets),
        config.llm.max_tokens_overview,
        config.llm.temperature,
    );

    match backend.complete(request).await {
        Ok(overview) => {
            info!(chars = overview.len(), "Project overview generated");
            Some(overview)
        }
        Err(e) => {
            warn!(error = %e, "Overview call failed");
            None
        }
    }
}

/// One bullet per summarizable element.
///
/// Explained elements get their explanation truncated to `snippet_chars`
/// characters; unexplained classes are still listed by name so the overview
/// can mention them.
fn element_bullets(elements: &[CodeElement], snippet_chars: usize) -> Vec<String> {
    let mut bullets = Vec::new();

    for element in elements {
        if let Some(explanation) = element.explanation.as_deref().filter(|e| !e.trim().is_empty())
        {
            let snippet: String = explanation.chars().take(snippet_chars).collect();
            let bullet = match &element.owning_class {
                Some(class) => format!(
                    "- {} '{}' (在'{class}'类中): {snippet}...",
                    element.kind.display_name(),
                    element.name
                ),
                None => format!(
                    "- {} '{}': {snippet}...",
                    element.kind.display_name(),
                    element.name
                ),
            };
            bullets.push(bullet);
        } else if element.kind == ElementKind::Class {
            bullets.push(format!("- 类 '{}'", element.name));
        }
    }

    bullets
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tutorgen_llm::{LlmError, MockBackend};

    fn explained(name: &str, explanation: &str) -> CodeElement {
        let mut element = CodeElement::top_level(
            Utf8PathBuf::from("src/lib.rs"),
            name,
            ElementKind::Function,
            "fn x() {}",
            1,
            1,
        );
        element.explanation = Some(explanation.to_string());
        element
    }

    fn unexplained_class(name: &str) -> CodeElement {
        CodeElement::top_level(
            Utf8PathBuf::from("src/lib.rs"),
            name,
            ElementKind::Class,
            "struct X;",
            1,
            1,
        )
    }

    #[tokio::test]
    async fn returns_overview_from_backend() {
        let elements = vec![explained("alpha", "计算某个值。")];
        let backend = MockBackend::always("项目概述文本。");
        let limiter = RateLimiter::unthrottled();
        let config = Config::minimal_for_testing();

        let overview = summarize(&elements, "demo", &backend, &limiter, &config).await;

        assert_eq!(overview.as_deref(), Some("项目概述文本。"));
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn skips_call_when_nothing_is_explained() {
        let elements = vec![CodeElement::top_level(
            Utf8PathBuf::from("src/lib.rs"),
            "alpha",
            ElementKind::Function,
            "fn alpha() {}",
            1,
            1,
        )];
        let backend = MockBackend::always("never used");
        let limiter = RateLimiter::unthrottled();
        let config = Config::minimal_for_testing();

        let overview = summarize(&elements, "demo", &backend, &limiter, &config).await;

        assert!(overview.is_none());
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn failed_call_yields_none() {
        let elements = vec![explained("alpha", "解释")];
        let backend = MockBackend::with_script(
            vec![Err(LlmError::Timeout(120))],
            "unused",
        );
        let limiter = RateLimiter::unthrottled();
        let config = Config::minimal_for_testing();

        let overview = summarize(&elements, "demo", &backend, &limiter, &config).await;
        assert!(overview.is_none());
    }

    #[test]
    fn bullets_truncate_explanations_by_characters() {
        let elements = vec![explained("alpha", &"长".repeat(200))];
        let bullets = element_bullets(&elements, 150);

        assert_eq!(bullets.len(), 1);
        assert!(bullets[0].ends_with("..."));
        // 150 chars of explanation, not 150 bytes
        let snippet: String = "长".repeat(150);
        assert!(bullets[0].contains(&snippet));
        assert!(!bullets[0].contains(&"长".repeat(151)));
    }

    #[test]
    fn unexplained_classes_are_listed_by_name() {
        let elements = vec![unexplained_class("Engine")];
        let bullets = element_bullets(&elements, 150);

        assert_eq!(bullets, vec!["- 类 'Engine'"]);
    }

    #[test]
    fn bullets_name_the_owning_class() {
        let mut method = CodeElement::method(
            Utf8PathBuf::from("src/lib.rs"),
            "run",
            ElementKind::Method,
            "Engine",
            "fn run(&self) {}",
            2,
            2,
        );
        method.explanation = Some("启动引擎。".to_string());

        let bullets = element_bullets(&[method], 150);
        assert!(bullets[0].contains("(在'Engine'类中)"));
    }
}
