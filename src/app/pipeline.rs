//! Shared fit-pipeline logic for the `process` subcommand.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! scan records -> group by dataset -> fit each dataset -> compile entries
//!
//! The CLI front-end then focuses on presentation (printing and writing).

use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::domain::{DatasetModel, FileWarning, FitConfig, SamplePoint};
use crate::error::AppError;
use crate::fit::{adaptive_degree, fit_polynomial};
use crate::models::{evaluate, format_polynomial, round2};
use crate::report::predict_points;

/// A dataset needs at least this many points before a fit is attempted.
const MIN_POINTS: usize = 2;

/// All computed outputs of a single `rank process` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Compiled entries, keyed by dataset number.
    pub models: BTreeMap<u32, DatasetModel>,
    /// Datasets that could not be fitted, with the reason.
    pub skipped: Vec<(u32, String)>,
    /// Per-file ingest problems.
    pub warnings: Vec<FileWarning>,
    pub files_read: usize,
}

/// Execute the full fitting pipeline and return the computed outputs.
pub fn run_process(config: &FitConfig) -> Result<RunOutput, AppError> {
    let scanned = crate::io::scan_datasets(&config.data_dir)?;

    // Fit datasets concurrently. Each fit owns its own matrix/vector buffers,
    // so the only coordination point is collecting the results.
    let groups: Vec<(u32, Vec<SamplePoint>)> = scanned.datasets.into_iter().collect();
    let results: Vec<(u32, Result<DatasetModel, AppError>)> = groups
        .into_par_iter()
        .map(|(number, points)| (number, build_dataset_model(&points, config)))
        .collect();

    let mut models = BTreeMap::new();
    let mut skipped = Vec::new();
    for (number, result) in results {
        match result {
            Ok(model) => {
                models.insert(number, model);
            }
            Err(e) => skipped.push((number, e.to_string())),
        }
    }

    Ok(RunOutput {
        models,
        skipped,
        warnings: scanned.warnings,
        files_read: scanned.files_read,
    })
}

/// Fit one dataset and assemble its compiled entry.
///
/// Uses the configured fixed degree when present, otherwise the adaptive
/// policy. The entry carries the rendered formula, the percentile at the
/// reference score, and per-point predictions (both rounded to 2 decimals).
pub fn build_dataset_model(
    points: &[SamplePoint],
    config: &FitConfig,
) -> Result<DatasetModel, AppError> {
    if points.len() < MIN_POINTS {
        return Err(AppError::insufficient_data(format!(
            "Insufficient data points: {}",
            points.len()
        )));
    }

    let degree = config
        .degree
        .unwrap_or_else(|| adaptive_degree(points.len()));
    let coefficients = fit_polynomial(points, degree)?;

    let line = format_polynomial(&coefficients);
    let reference_percent = round2(evaluate(&coefficients, config.reference_score));
    let data = predict_points(points, &coefficients);

    Ok(DatasetModel {
        line,
        coefficients,
        reference_percent,
        data,
    })
}
