//! Narration script synthesis
//!
//! Walks the tutorial outline in order and produces one [`ScriptPart`] per
//! leaf. Every section kind has a dedicated prompt template; the match is
//! exhaustive, so adding a section kind forces a template decision here. A
//! failed call yields a sentinel part instead of aborting the stage, and the
//! part count always equals the outline's leaf count.

mod templates;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use tutorgen_config::Config;
use tutorgen_llm::{CompletionRequest, LlmBackend, RateLimiter};
use tutorgen_outline::{Section, TutorialOutline};

/// Script text used for a part whose model call failed.
pub const SCRIPT_FAILURE_SENTINEL: &str = "# 未能生成此部分的脚本";

/// Kind of a rendered script part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartKind {
    Introduction,
    Setup,
    CoreFeatureDetail,
    Conclusion,
}

impl PartKind {
    /// Snake-case label, identical to the serialized form.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Introduction => "introduction",
            Self::Setup => "setup",
            Self::CoreFeatureDetail => "core_feature_detail",
            Self::Conclusion => "conclusion",
        }
    }
}

/// One narrated part of the final tutorial script.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptPart {
    pub title: String,
    pub kind: PartKind,
    pub script: String,
}

impl ScriptPart {
    /// True when the model call behind this part failed.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.script == SCRIPT_FAILURE_SENTINEL
    }
}

/// Render the full tutorial script for an outline.
///
/// One throttled model call per leaf, in outline order. The result always
/// has exactly `outline.leaf_count()` parts.
pub async fn render(
    outline: &TutorialOutline,
    target_audience: &str,
    backend: &dyn LlmBackend,
    limiter: &RateLimiter,
    config: &Config,
) -> Vec<ScriptPart> {
    let project_name = outline.project_name.as_str();
    let system = templates::system_message(target_audience);
    let mut parts = Vec::with_capacity(outline.leaf_count());

    info!(
        project = project_name,
        parts = outline.leaf_count(),
        "Starting script synthesis"
    );

    for section in &outline.sections {
        match section {
            Section::Introduction { title, narrative } => {
                let prompt = templates::introduction_prompt(project_name, narrative.as_deref());
                let script = invoke(backend, limiter, config, &system, prompt, title).await;
                parts.push(ScriptPart {
                    title: title.clone(),
                    kind: PartKind::Introduction,
                    script,
                });
            }
            Section::Setup { title } => {
                let prompt = templates::setup_prompt(project_name);
                let script = invoke(backend, limiter, config, &system, prompt, title).await;
                parts.push(ScriptPart {
                    title: title.clone(),
                    kind: PartKind::Setup,
                    script,
                });
            }
            Section::CoreFeaturesParent { title, details } => {
                info!(group = %title, features = details.len(), "Rendering core feature group");
                for detail in details {
                    let prompt = templates::core_feature_prompt(project_name, detail);
                    let script =
                        invoke(backend, limiter, config, &system, prompt, &detail.title).await;
                    parts.push(ScriptPart {
                        title: detail.title.clone(),
                        kind: PartKind::CoreFeatureDetail,
                        script,
                    });
                }
            }
            Section::Conclusion { title } => {
                let prompt = templates::conclusion_prompt(project_name);
                let script = invoke(backend, limiter, config, &system, prompt, title).await;
                parts.push(ScriptPart {
                    title: title.clone(),
                    kind: PartKind::Conclusion,
                    script,
                });
            }
        }
    }

    let failures = parts.iter().filter(|p| p.is_failure()).count();
    info!(parts = parts.len(), failures, "Script synthesis complete");
    parts
}

/// One throttled call; failures become the sentinel text.
async fn invoke(
    backend: &dyn LlmBackend,
    limiter: &RateLimiter,
    config: &Config,
    system: &str,
    prompt: String,
    title: &str,
) -> String {
    limiter.acquire().await;

    let request = CompletionRequest::new(
        system,
        prompt,
        config.llm.max_tokens_script,
        config.llm.script_temperature,
    );

    match backend.complete(request).await {
        Ok(script) => script,
        Err(e) => {
            warn!(part = %title, error = %e, "Script call failed");
            SCRIPT_FAILURE_SENTINEL.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tutorgen_extract::{CodeElement, ElementKind};
    use tutorgen_llm::MockBackend;
    use tutorgen_outline::build;

    fn explained_function(name: &str) -> CodeElement {
        let mut element = CodeElement::top_level(
            Utf8PathBuf::from("src/lib.rs"),
            name,
            ElementKind::Function,
            "fn x() {}",
            1,
            1,
        );
        element.explanation = Some("解释。".to_string());
        element
    }

    #[tokio::test]
    async fn one_part_per_leaf_in_outline_order() {
        let elements = vec![explained_function("alpha"), explained_function("beta")];
        let outline = build(&elements, "demo", Some("概述。"));
        let backend = MockBackend::always("旁白脚本。");
        let limiter = RateLimiter::unthrottled();
        let config = Config::minimal_for_testing();

        let parts = render(&outline, "初学者", &backend, &limiter, &config).await;

        assert_eq!(parts.len(), outline.leaf_count());
        assert_eq!(backend.call_count(), outline.leaf_count());

        let kinds: Vec<_> = parts.iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![
                PartKind::Introduction,
                PartKind::Setup,
                PartKind::CoreFeatureDetail,
                PartKind::CoreFeatureDetail,
                PartKind::Conclusion,
            ]
        );
        assert_eq!(parts[2].title, "Function：`alpha`");
        assert!(parts.iter().all(|p| p.script == "旁白脚本。"));
    }

    #[tokio::test]
    async fn failed_call_becomes_sentinel_part() {
        let outline = build(&[explained_function("alpha")], "demo", None);
        // Introduction succeeds, setup fails, the rest succeed.
        let backend = MockBackend::with_script(
            vec![
                Ok("开场白。".to_string()),
                Err(tutorgen_llm::LlmError::Transport("down".to_string())),
            ],
            "正常脚本。",
        );
        let limiter = RateLimiter::unthrottled();
        let config = Config::minimal_for_testing();

        let parts = render(&outline, "初学者", &backend, &limiter, &config).await;

        assert_eq!(parts.len(), 4);
        assert!(!parts[0].is_failure());
        assert!(parts[1].is_failure());
        assert_eq!(parts[1].script, SCRIPT_FAILURE_SENTINEL);
        assert!(!parts[2].is_failure());
    }

    #[tokio::test]
    async fn empty_outline_still_renders_fixed_sections() {
        let outline = build(&[], "demo", None);
        let backend = MockBackend::always("脚本。");
        let limiter = RateLimiter::unthrottled();
        let config = Config::minimal_for_testing();

        let parts = render(&outline, "初学者", &backend, &limiter, &config).await;

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].kind, PartKind::Introduction);
        assert_eq!(parts[1].kind, PartKind::Setup);
        assert_eq!(parts[2].kind, PartKind::Conclusion);
    }

    #[test]
    fn part_kind_labels_match_serialized_form() {
        let json = serde_json::to_string(&PartKind::CoreFeatureDetail).unwrap();
        assert_eq!(json, format!("\"{}\"", PartKind::CoreFeatureDetail.label()));
    }
}
