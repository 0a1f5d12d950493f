//! tutorgen CLI entry point

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use tracing::info;
use tutorgen::pipeline::{self, PipelineContext};
use tutorgen_config::Config;

const DEFAULT_AUDIENCE: &str = "初学者";

#[derive(Parser)]
#[command(
    name = "tutorgen",
    version,
    about = "Generate documentation and a narrated tutorial script for a codebase"
)]
struct Cli {
    /// Path to a configuration file (defaults to ./tutorgen.toml when present)
    #[arg(long, global = true)]
    config: Option<Utf8PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full pipeline: annotate, checkpoint, then generate the script
    Run(RunArgs),
    /// Run only the annotation stages and write the checkpoint
    Annotate(AnnotateArgs),
    /// Generate the tutorial script from an existing checkpoint
    Script(ScriptArgs),
}

#[derive(clap::Args)]
struct RunArgs {
    /// Source tree to process
    path: Utf8PathBuf,

    /// Project name (defaults to the directory name)
    #[arg(long)]
    project_name: Option<String>,

    /// Output directory (defaults to the configured base directory)
    #[arg(long)]
    output_dir: Option<Utf8PathBuf>,

    /// Audience the tutorial narration is written for
    #[arg(long, default_value = DEFAULT_AUDIENCE)]
    audience: String,
}

#[derive(clap::Args)]
struct AnnotateArgs {
    /// Source tree to process
    path: Utf8PathBuf,

    /// Project name (defaults to the directory name)
    #[arg(long)]
    project_name: Option<String>,

    /// Output directory (defaults to the configured base directory)
    #[arg(long)]
    output_dir: Option<Utf8PathBuf>,
}

#[derive(clap::Args)]
struct ScriptArgs {
    /// Project name the checkpoint was written under
    #[arg(long)]
    project_name: String,

    /// Output directory (defaults to the configured base directory)
    #[arg(long)]
    output_dir: Option<Utf8PathBuf>,

    /// Audience the tutorial narration is written for
    #[arg(long, default_value = DEFAULT_AUDIENCE)]
    audience: String,
}

/// Project name for a source tree: its directory name.
fn derive_project_name(path: &Utf8PathBuf) -> String {
    path.canonicalize_utf8()
        .ok()
        .and_then(|p| p.file_name().map(String::from))
        .or_else(|| path.file_name().map(String::from))
        .unwrap_or_else(|| "Unknown_Project".to_string())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tutorgen_utils::logging::init_tracing(cli.verbose)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    let backend = tutorgen_llm::backend_from_config(&config)
        .context("Failed to construct model backend")?;
    let limiter = tutorgen_llm::limiter_from_config(&config);

    match cli.command {
        Command::Run(args) => {
            let project_name = args
                .project_name
                .clone()
                .unwrap_or_else(|| derive_project_name(&args.path));
            let ctx = PipelineContext::new(
                project_name,
                args.path,
                pipeline::project_output_dir(&config, args.output_dir.as_deref()),
                args.audience,
            );

            let script_path =
                pipeline::run_full(&ctx, backend.as_ref(), &limiter, &config).await?;
            info!(script = %script_path, "Pipeline finished");
        }
        Command::Annotate(args) => {
            let project_name = args
                .project_name
                .clone()
                .unwrap_or_else(|| derive_project_name(&args.path));
            let ctx = PipelineContext::new(
                project_name,
                args.path,
                pipeline::project_output_dir(&config, args.output_dir.as_deref()),
                DEFAULT_AUDIENCE,
            );

            let report =
                pipeline::run_annotation(&ctx, backend.as_ref(), &limiter, &config).await?;
            info!(
                checkpoint = %report.checkpoint_path,
                annotated = report.annotated,
                total = report.total,
                "Annotation finished"
            );
        }
        Command::Script(args) => {
            let ctx = PipelineContext::new(
                args.project_name,
                Utf8PathBuf::from("."),
                pipeline::project_output_dir(&config, args.output_dir.as_deref()),
                args.audience,
            );

            let script_path =
                pipeline::run_script(&ctx, backend.as_ref(), &limiter, &config).await?;
            info!(script = %script_path, "Script generation finished");
        }
    }

    Ok(())
}
