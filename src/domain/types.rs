//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting
//! - exported to the compiled JSON document
//! - reloaded later for validation, prediction listings, and trend reports

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A normalized observation used for fitting.
///
/// `score` is the raw total score of a record; `percent` is its rank
/// percentile in `[0, 100]` (input files store it scaled by 100).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    pub score: f64,
    pub percent: f64,
}

/// A sample point annotated with the model's prediction at its score.
///
/// `predicted_percent` is rounded to 2 decimal places by convention; downstream
/// reports compare it against `percent` directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictedPoint {
    pub score: f64,
    pub percent: f64,
    pub predicted_percent: f64,
}

/// A fitted per-dataset model, as stored in `compiled.json`.
///
/// `coefficients` is a variable-length array in ascending power order:
/// `coefficients[i]` multiplies `x^i`. The cubic case is just length 4, not a
/// separate shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetModel {
    /// Human-readable formula, highest power first, 12 decimal places.
    pub line: String,
    /// Polynomial coefficients, ascending power.
    pub coefficients: Vec<f64>,
    /// Model percentile at the reference score, rounded to 2 decimals.
    ///
    /// Stored under the historical key `60Percent` (reference score 60000).
    #[serde(rename = "60Percent")]
    pub reference_percent: f64,
    /// The fitted points with their predictions.
    pub data: Vec<PredictedPoint>,
}

/// A per-file problem encountered during ingest.
///
/// Ingest never fails a whole run because one record is bad; problems are
/// collected and reported at the end.
#[derive(Debug, Clone)]
pub struct FileWarning {
    pub path: String,
    pub message: String,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct FitConfig {
    /// Directory containing numeric dataset subdirectories of record JSON files.
    pub data_dir: PathBuf,
    /// Where the compiled document is written.
    pub output_path: PathBuf,
    /// Explicit polynomial degree; `None` selects the adaptive policy.
    pub degree: Option<usize>,
    /// Score at which every model is evaluated for the summary percentile.
    pub reference_score: f64,
}
