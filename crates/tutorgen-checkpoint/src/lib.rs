//! Annotation checkpoints
//!
//! The annotation stage is the expensive half of a run, so its results are
//! persisted as one JSON file per project. The script stages load that file
//! and never repeat the annotation calls. Loading is tolerant: a missing or
//! unreadable checkpoint yields an empty element list, and the caller
//! decides whether that means "run annotation first".

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use tracing::{info, warn};
use tutorgen_extract::CodeElement;
use tutorgen_utils::atomic_write::write_file_atomic;
use tutorgen_utils::paths::sanitize_filename;

/// Stores and loads per-project annotation checkpoints under a base
/// directory.
pub struct CheckpointStore {
    base_dir: Utf8PathBuf,
}

impl CheckpointStore {
    #[must_use]
    pub fn new(base_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Path of the checkpoint file for `project_name`.
    #[must_use]
    pub fn checkpoint_path(&self, project_name: &str) -> Utf8PathBuf {
        self.base_dir.join(format!(
            "{}_documentation_data.json",
            sanitize_filename(project_name)
        ))
    }

    /// Persist the annotated elements atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the atomic write fails.
    pub fn save(&self, project_name: &str, elements: &[CodeElement]) -> Result<Utf8PathBuf> {
        let path = self.checkpoint_path(project_name);

        let json = serde_json::to_string_pretty(elements)
            .context("Failed to serialize checkpoint data")?;
        write_file_atomic(&path, &json)
            .with_context(|| format!("Failed to write checkpoint: {path}"))?;

        info!(path = %path, elements = elements.len(), "Checkpoint saved");
        Ok(path)
    }

    /// Load a previously saved checkpoint.
    ///
    /// Missing, unreadable, or malformed checkpoints all yield an empty
    /// list; the condition is logged rather than raised.
    #[must_use]
    pub fn load(&self, project_name: &str) -> Vec<CodeElement> {
        let path = self.checkpoint_path(project_name);

        if !path.exists() {
            info!(path = %path, "No checkpoint found");
            return Vec::new();
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %path, error = %e, "Failed to read checkpoint");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<CodeElement>>(&content) {
            Ok(elements) => {
                info!(path = %path, elements = elements.len(), "Checkpoint loaded");
                elements
            }
            Err(e) => {
                warn!(path = %path, error = %e, "Failed to parse checkpoint");
                Vec::new()
            }
        }
    }

    /// Base directory the store writes under.
    #[must_use]
    pub fn base_dir(&self) -> &Utf8Path {
        &self.base_dir
    }
}
