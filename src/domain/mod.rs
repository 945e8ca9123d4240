//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - normalized sample observations (`SamplePoint`)
//! - fitted dataset models as stored in `compiled.json` (`DatasetModel`)
//! - the run configuration derived from CLI flags (`FitConfig`)

pub mod types;

pub use types::*;
