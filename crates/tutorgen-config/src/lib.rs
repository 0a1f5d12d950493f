//! Configuration model and loading for tutorgen
//!
//! Configuration is read from an optional `tutorgen.toml` file; every field
//! has a default taken from the observed behavior of the pipeline, so a
//! missing file is not an error. An explicitly passed `--config` path must
//! exist.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default config filename searched in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "tutorgen.toml";

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub llm: LlmConfig,
    pub overview: OverviewConfig,
    pub output: OutputConfig,
}

/// Model-session settings.
///
/// The API key itself never lives in the config file; `api_key_env` names
/// the environment variable it is read from at backend construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL of the OpenAI-compatible chat completions endpoint.
    pub base_url: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Sampling temperature for explanation/docstring/overview calls.
    pub temperature: f32,
    /// Sampling temperature for narration script calls.
    pub script_temperature: f32,
    /// Per-call output token budgets.
    pub max_tokens_explanation: u32,
    pub max_tokens_docstring: u32,
    pub max_tokens_overview: u32,
    pub max_tokens_script: u32,
    /// Minimum delay between consecutive external calls, in milliseconds.
    pub call_delay_ms: u64,
    /// Per-request transport timeout, in seconds.
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.deepseek.com/v1".to_string(),
            api_key_env: "DEEPSEEK_API_KEY".to_string(),
            model: "deepseek-coder".to_string(),
            temperature: 0.5,
            script_temperature: 0.6,
            max_tokens_explanation: 500,
            max_tokens_docstring: 300,
            max_tokens_overview: 600,
            max_tokens_script: 700,
            call_delay_ms: 2000,
            timeout_secs: 120,
        }
    }
}

/// Bounds on the overview prompt.
///
/// Both bounds cap the size of the single overview call: at most
/// `max_elements` bullets, each quoting at most `snippet_chars` characters
/// of the explanation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverviewConfig {
    /// Maximum number of element bullets included in the overview prompt.
    pub max_elements: usize,
    /// Maximum characters of each explanation quoted in a bullet.
    pub snippet_chars: usize,
}

impl Default for OverviewConfig {
    fn default() -> Self {
        Self {
            max_elements: 20,
            snippet_chars: 150,
        }
    }
}

/// Output locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Base directory for checkpoints and generated artifacts.
    pub base_dir: Utf8PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            base_dir: Utf8PathBuf::from("output_generated_docs"),
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// With an explicit `path`, the file must exist and parse. With `None`,
    /// `tutorgen.toml` in the working directory is used when present,
    /// otherwise defaults apply.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when an explicit file is unreadable or any file
    /// fails to parse.
    pub fn load(path: Option<&Utf8Path>) -> Result<Self, ConfigError> {
        match path {
            Some(explicit) => Self::from_file(explicit),
            None => {
                let default_path = Utf8Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Utf8Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    /// Minimal configuration for tests: defaults with call throttling off.
    #[cfg(any(test, feature = "test-utils"))]
    #[must_use]
    pub fn minimal_for_testing() -> Self {
        let mut config = Self::default();
        config.llm.call_delay_ms = 0;
        config
    }
}
