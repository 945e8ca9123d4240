//! Reporting utilities: predictions, error statistics, and degree comparison.
//!
//! We keep formatting code in `format` so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

pub mod format;

pub use format::*;

use crate::domain::{PredictedPoint, SamplePoint};
use crate::error::AppError;
use crate::fit::fit_polynomial;
use crate::models::{evaluate, round2};

/// Average and maximum absolute prediction error over a point set.
#[derive(Debug, Clone, Copy)]
pub struct ErrorStats {
    pub avg: f64,
    pub max: f64,
}

impl ErrorStats {
    /// Aggregate a sequence of absolute errors.
    ///
    /// Returns zeros for an empty sequence so report math stays finite.
    pub fn from_errors(errors: impl Iterator<Item = f64>) -> Self {
        let mut total = 0.0;
        let mut max = 0.0f64;
        let mut count = 0usize;
        for e in errors {
            total += e;
            max = max.max(e);
            count += 1;
        }

        Self {
            avg: if count == 0 { 0.0 } else { total / count as f64 },
            max,
        }
    }
}

/// Annotate each sample with the model's prediction, rounded to 2 decimals.
pub fn predict_points(points: &[SamplePoint], coeffs: &[f64]) -> Vec<PredictedPoint> {
    points
        .iter()
        .map(|p| PredictedPoint {
            score: p.score,
            percent: p.percent,
            predicted_percent: round2(evaluate(coeffs, p.score)),
        })
        .collect()
}

/// Errors of a coefficient set against stored points, recomputed from scratch.
///
/// Validation uses this rather than the stored `predicted_percent` so it
/// checks the coefficient array actually persisted in the document.
pub fn model_errors(data: &[PredictedPoint], coeffs: &[f64]) -> ErrorStats {
    ErrorStats::from_errors(
        data.iter()
            .map(|p| (evaluate(coeffs, p.score) - p.percent).abs()),
    )
}

/// Errors between stored real and predicted percentiles.
pub fn stored_errors(data: &[PredictedPoint]) -> ErrorStats {
    ErrorStats::from_errors(data.iter().map(|p| (p.percent - p.predicted_percent).abs()))
}

/// One point's contribution to a comparison, for worst-point listings.
#[derive(Debug, Clone, Copy)]
pub struct PointError {
    pub score: f64,
    pub actual: f64,
    pub predicted: f64,
    pub error: f64,
}

/// Fit quality of a single candidate degree.
#[derive(Debug, Clone)]
pub struct DegreeComparison {
    /// The requested degree (the fit may clamp below it).
    pub degree: usize,
    pub coefficients: Vec<f64>,
    pub errors: ErrorStats,
    /// Unrounded model value at the reference score.
    pub reference_percent: f64,
    /// The three largest-error points, worst first.
    pub worst: Vec<PointError>,
}

/// Fit every degree in `degrees` against the same point set.
pub fn compare_degrees(
    points: &[SamplePoint],
    degrees: std::ops::RangeInclusive<usize>,
    reference_score: f64,
) -> Result<Vec<DegreeComparison>, AppError> {
    let mut out = Vec::new();

    for degree in degrees {
        let coefficients = fit_polynomial(points, degree)?;

        let mut point_errors: Vec<PointError> = points
            .iter()
            .map(|p| {
                let predicted = evaluate(&coefficients, p.score);
                PointError {
                    score: p.score,
                    actual: p.percent,
                    predicted,
                    error: (predicted - p.percent).abs(),
                }
            })
            .collect();

        let errors = ErrorStats::from_errors(point_errors.iter().map(|e| e.error));

        point_errors.sort_by(|a, b| {
            b.error
                .partial_cmp(&a.error)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        point_errors.truncate(3);

        out.push(DegreeComparison {
            degree,
            reference_percent: evaluate(&coefficients, reference_score),
            coefficients,
            errors,
            worst: point_errors,
        });
    }

    Ok(out)
}
