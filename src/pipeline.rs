//! Pipeline orchestration
//!
//! Two entry points mirror the two halves of a run: the annotation stages
//! (scan, annotate, overview, checkpoint) and the script stages (outline,
//! narration, script artifact). The script half reads everything it needs
//! from the checkpoint, so it can run in a separate invocation, days later,
//! without repeating a single annotation call.

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use tracing::{info, warn};
use tutorgen_checkpoint::CheckpointStore;
use tutorgen_config::Config;
use tutorgen_llm::{LlmBackend, RateLimiter};

use crate::artifacts;

/// Everything a run needs to know that is not configuration: which project,
/// where its sources live, where output goes, and who the tutorial is for.
#[derive(Debug, Clone)]
pub struct PipelineContext {
    pub project_name: String,
    pub source_root: Utf8PathBuf,
    pub output_dir: Utf8PathBuf,
    pub target_audience: String,
}

impl PipelineContext {
    #[must_use]
    pub fn new(
        project_name: impl Into<String>,
        source_root: impl Into<Utf8PathBuf>,
        output_dir: impl Into<Utf8PathBuf>,
        target_audience: impl Into<String>,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            source_root: source_root.into(),
            output_dir: output_dir.into(),
            target_audience: target_audience.into(),
        }
    }

    fn store(&self) -> CheckpointStore {
        CheckpointStore::new(self.output_dir.clone())
    }
}

/// What the annotation half of a run produced.
#[derive(Debug)]
pub struct AnnotationReport {
    pub checkpoint_path: Utf8PathBuf,
    pub annotated: usize,
    pub total: usize,
    pub overview_written: bool,
}

/// Run the annotation stages: scan the source tree, annotate every element,
/// synthesize the overview, and persist checkpoint plus artifacts.
///
/// # Errors
///
/// Fails when the source tree cannot be scanned or an artifact cannot be
/// written. Individual model call failures degrade to missing fields and do
/// not fail the run.
pub async fn run_annotation(
    ctx: &PipelineContext,
    backend: &dyn LlmBackend,
    limiter: &RateLimiter,
    config: &Config,
) -> Result<AnnotationReport> {
    info!(
        project = %ctx.project_name,
        root = %ctx.source_root,
        "Running annotation stages"
    );

    let mut elements = tutorgen_extract::scan(&ctx.source_root)
        .with_context(|| format!("Failed to scan source tree: {}", ctx.source_root))?;
    if elements.is_empty() {
        warn!(root = %ctx.source_root, "No code elements found");
    }

    tutorgen_annotate::annotate(&mut elements, backend, limiter, config).await;

    let overview =
        tutorgen_annotate::summarize(&elements, &ctx.project_name, backend, limiter, config)
            .await;

    let checkpoint_path = ctx.store().save(&ctx.project_name, &elements)?;
    artifacts::write_individual_artifacts(&elements, &ctx.output_dir)?;

    let overview_written = match &overview {
        Some(narrative) => {
            artifacts::write_overview_artifact(narrative, &elements, &ctx.output_dir)?;
            true
        }
        None => false,
    };

    let annotated = elements.iter().filter(|e| e.has_explanation()).count();
    info!(
        annotated,
        total = elements.len(),
        overview = overview_written,
        "Annotation stages complete"
    );

    Ok(AnnotationReport {
        checkpoint_path,
        annotated,
        total: elements.len(),
        overview_written,
    })
}

/// Run the script stages against a previously written checkpoint: build the
/// outline, narrate every leaf, and write the script artifact.
///
/// A missing or corrupt checkpoint degrades rather than aborts: the outline
/// still has its three fixed sections, so a skeleton script is written and
/// the absence is logged.
///
/// # Errors
///
/// Fails when the script artifact cannot be written.
pub async fn run_script(
    ctx: &PipelineContext,
    backend: &dyn LlmBackend,
    limiter: &RateLimiter,
    config: &Config,
) -> Result<Utf8PathBuf> {
    info!(project = %ctx.project_name, "Running script stages");

    let store = ctx.store();
    let elements = store.load(&ctx.project_name);
    if elements.is_empty() {
        warn!(
            checkpoint = %store.checkpoint_path(&ctx.project_name),
            "No annotated elements to work from, generating a skeleton script"
        );
    }
    let narrative = artifacts::load_overview_narrative(&ctx.output_dir);

    let outline =
        tutorgen_outline::build(&elements, &ctx.project_name, narrative.as_deref());

    let parts = tutorgen_script::render(
        &outline,
        &ctx.target_audience,
        backend,
        limiter,
        config,
    )
    .await;

    let path = artifacts::write_script_artifact(&parts, &ctx.project_name, &ctx.output_dir)?;
    info!(path = %path, parts = parts.len(), "Script stages complete");
    Ok(path)
}

/// Run the whole pipeline. The script half deliberately reads back the
/// checkpoint the annotation half just wrote, so a full run exercises the
/// same resume path as two separate invocations.
pub async fn run_full(
    ctx: &PipelineContext,
    backend: &dyn LlmBackend,
    limiter: &RateLimiter,
    config: &Config,
) -> Result<Utf8PathBuf> {
    run_annotation(ctx, backend, limiter, config).await?;
    run_script(ctx, backend, limiter, config).await
}

/// Output directory for a project under the configured base directory.
#[must_use]
pub fn project_output_dir(config: &Config, explicit: Option<&Utf8Path>) -> Utf8PathBuf {
    match explicit {
        Some(dir) => dir.to_owned(),
        None => config.output.base_dir.clone(),
    }
}
