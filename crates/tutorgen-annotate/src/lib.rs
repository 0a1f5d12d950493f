//! Annotation stages for tutorgen
//!
//! Two stages live here: per-element annotation (explanation plus docstring,
//! two calls per element) and the single-call project overview. Both take
//! the backend and the call gate as arguments so tests drive them with
//! scripted responses and no delays.

mod annotator;
mod overview;
mod prompts;

pub use annotator::annotate;
pub use overview::summarize;
