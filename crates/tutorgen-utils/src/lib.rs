//! Shared infrastructure for tutorgen
//!
//! This crate hosts the small cross-cutting pieces the pipeline crates share:
//! atomic file writes, tracing initialization, and filename/path helpers.

pub mod atomic_write;
pub mod logging;
pub mod paths;
