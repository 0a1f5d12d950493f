//! tutorgen: staged tutorial generation for source codebases
//!
//! The pipeline runs four dependent stages against an external model:
//! per-element annotation, project overview, outline construction, and
//! narration script synthesis. The annotation results are checkpointed to
//! disk so the script stages can run later, or again, without repeating the
//! expensive calls.
//!
//! Each stage lives in its own crate; this facade re-exports them and adds
//! the orchestration ([`pipeline`]) and artifact rendering ([`artifacts`])
//! that tie a full run together.

pub use tutorgen_annotate as annotate;
pub use tutorgen_checkpoint as checkpoint;
pub use tutorgen_config as config;
pub use tutorgen_extract as extract;
pub use tutorgen_llm as llm;
pub use tutorgen_outline as outline;
pub use tutorgen_script as script;
pub use tutorgen_utils as utils;

pub mod artifacts;
pub mod pipeline;

pub use pipeline::PipelineContext;
