//! Formatted terminal output for every subcommand.
//!
//! All tables and summaries are assembled into plain strings here; the app
//! layer only decides which ones to print.

use std::collections::BTreeMap;

use crate::domain::{DatasetModel, FileWarning, FitConfig};
use crate::report::{model_errors, stored_errors, DegreeComparison};

/// Threshold below which a prediction counts as matching its point.
const DIFF_OK: f64 = 0.1;

/// Threshold below which a prediction counts as close.
const DIFF_CLOSE: f64 = 0.5;

/// Summary of a `process` run: per-dataset fit lines, skips, and warnings.
pub fn format_run_summary(
    models: &BTreeMap<u32, DatasetModel>,
    skipped: &[(u32, String)],
    warnings: &[FileWarning],
    files_read: usize,
    config: &FitConfig,
) -> String {
    let mut out = String::new();

    out.push_str("=== rank - Percentile Curve Fit ===\n");
    out.push_str(&format!("Data dir: {}\n", config.data_dir.display()));
    out.push_str(&format!(
        "Files read: {files_read} | datasets fitted: {}\n\n",
        models.len()
    ));

    for (number, model) in models {
        out.push_str(&format!(
            "Processed dataset {number}: {} points (polynomial degree: {})\n",
            model.data.len(),
            model.coefficients.len().saturating_sub(1)
        ));
    }
    for (number, reason) in skipped {
        out.push_str(&format!("  (skipped {number}) {reason}\n"));
    }

    if !warnings.is_empty() {
        out.push_str("\nWarnings:\n");
        for w in warnings {
            out.push_str(&format!("  {}: {}\n", w.path, w.message));
        }
    }

    out
}

/// Per-dataset accuracy table, recomputed from the stored coefficient arrays.
pub fn format_validation(models: &BTreeMap<u32, DatasetModel>) -> String {
    let mut out = String::new();

    out.push_str("=== Validation of All Datasets Accuracy ===\n");
    out.push_str("Dataset | Average Error | Max. Error | Data Points\n");
    out.push_str("--------|---------------|------------|------------\n");

    let mut total_avg = 0.0;
    let mut total_max = 0.0f64;

    for (number, model) in models {
        let stats = model_errors(&model.data, &model.coefficients);
        out.push_str(&format!(
            "{number:>7} | {:>12.6}% | {:>9.6}% | {:>11}\n",
            stats.avg,
            stats.max,
            model.data.len()
        ));

        total_avg += stats.avg;
        total_max = total_max.max(stats.max);
    }

    out.push_str("\n=== Overall Statistics ===\n");
    out.push_str(&format!("Total datasets: {}\n", models.len()));
    if !models.is_empty() {
        out.push_str(&format!(
            "Average error across all datasets: {:.6}%\n",
            total_avg / models.len() as f64
        ));
    }
    out.push_str(&format!(
        "Maximum error among all datasets: {total_max:.6}%\n"
    ));

    if total_max < 1.0 {
        out.push_str("\nAll datasets calculated with high accuracy!\n");
    } else {
        out.push_str("\nSome datasets have increased error.\n");
    }

    out
}

/// Per-dataset prediction listing with closeness markers, plus overall accuracy.
pub fn format_predictions(models: &BTreeMap<u32, DatasetModel>) -> String {
    let mut out = String::new();

    out.push_str("=== Predictions vs Real Values ===\n\n");

    for (number, model) in models {
        out.push_str(&format!("Dataset {number}:\n"));
        out.push_str(&format!("Formula: {}\n", model.line));
        out.push_str(&format!("60Percent: {}%\n", model.reference_percent));
        out.push_str("Data points:\n");

        for p in &model.data {
            let diff = (p.percent - p.predicted_percent).abs();
            let status = if diff < DIFF_OK {
                "ok"
            } else if diff < DIFF_CLOSE {
                "~"
            } else {
                "!!"
            };
            out.push_str(&format!(
                "  Score: {}, Real: {}%, Predicted: {:.2}%, Diff: {diff:.3}% {status}\n",
                p.score, p.percent, p.predicted_percent
            ));
        }
        out.push('\n');
    }

    let mut total_points = 0usize;
    let mut total_error = 0.0;
    let mut max_error = 0.0f64;
    for model in models.values() {
        let stats = stored_errors(&model.data);
        total_error += stats.avg * model.data.len() as f64;
        total_points += model.data.len();
        max_error = max_error.max(stats.max);
    }

    out.push_str("=== Overall Accuracy ===\n");
    out.push_str(&format!("Total data points: {total_points}\n"));
    if total_points > 0 {
        let avg_error = total_error / total_points as f64;
        out.push_str(&format!("Average error: {avg_error:.3}%\n"));
        out.push_str(&format!("Maximum error: {max_error:.3}%\n"));
        out.push_str(&format!(
            "Accuracy: {:.1}%\n",
            (1.0 - avg_error / 50.0) * 100.0
        ));
    }

    out
}

/// Reference-percentile dynamics across datasets in numeric order.
pub fn format_trend(models: &BTreeMap<u32, DatasetModel>) -> String {
    let mut out = String::new();

    out.push_str("=== Reference Percentile Dynamics Across Datasets ===\n");
    out.push_str("Dataset | 60Percent | Data Points\n");
    out.push_str("--------|-----------|------------\n");

    let entries: Vec<(u32, f64, usize)> = models
        .iter()
        .map(|(n, m)| (*n, m.reference_percent, m.data.len()))
        .collect();

    for (number, percent, count) in &entries {
        out.push_str(&format!("{number:>7} | {percent:>9} | {count:>11}\n"));
    }

    if entries.is_empty() {
        return out;
    }

    let values: Vec<f64> = entries.iter().map(|(_, p, _)| *p).collect();
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let avg = values.iter().sum::<f64>() / values.len() as f64;

    out.push_str("\n=== Statistics ===\n");
    out.push_str(&format!("Minimum: {min}%\n"));
    out.push_str(&format!("Maximum: {max}%\n"));
    out.push_str(&format!("Average: {avg:.2}%\n"));

    let head = 5.min(values.len());
    let first: &[f64] = &values[..head];
    let last: &[f64] = &values[values.len() - head..];
    let avg_first = first.iter().sum::<f64>() / first.len() as f64;
    let avg_last = last.iter().sum::<f64>() / last.len() as f64;
    let change = avg_last - avg_first;

    out.push_str("\n=== Trend Analysis ===\n");
    out.push_str(&format!(
        "Average of first {head} datasets: {avg_first:.2}%\n"
    ));
    out.push_str(&format!("Average of last {head} datasets: {avg_last:.2}%\n"));
    out.push_str(&format!(
        "Change: {}{change:.2}%\n",
        if change > 0.0 { "+" } else { "" }
    ));

    out.push_str("\n=== Detailed Dynamics ===\n");
    for pair in entries.windows(2) {
        let (prev_n, prev_p, _) = pair[0];
        let (next_n, next_p, _) = pair[1];
        let delta = next_p - prev_p;
        out.push_str(&format!(
            "Dataset {prev_n} -> {next_n}: {}{delta:.2}%\n",
            if delta > 0.0 { "+" } else { "" }
        ));
    }

    out
}

/// Side-by-side accuracy report for several candidate degrees on one dataset.
pub fn format_degree_comparison(
    dataset: u32,
    n_points: usize,
    reference_score: f64,
    comparisons: &[DegreeComparison],
) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Comparing polynomial degrees for dataset {dataset} ({n_points} points)\n"
    ));
    out.push_str(&"=".repeat(80));
    out.push('\n');

    for c in comparisons {
        out.push_str(&format!("\nDegree {}:\n", c.degree));
        out.push_str(&"-".repeat(80));
        out.push('\n');

        out.push_str("Coefficients:\n");
        for (i, coeff) in c.coefficients.iter().enumerate() {
            let power = if i == 0 {
                "x^0 (const)".to_string()
            } else {
                format!("x^{i}")
            };
            out.push_str(&format!("  a{i}: {coeff:.4e} ({power})\n"));
        }

        out.push_str("\nErrors:\n");
        out.push_str(&format!("  Average error: {:.4}%\n", c.errors.avg));
        out.push_str(&format!("  Max error: {:.4}%\n", c.errors.max));
        out.push_str(&format!(
            "  Prediction (score={reference_score}): {:.2}%\n",
            c.reference_percent
        ));

        out.push_str("\n  Worst points:\n");
        for e in &c.worst {
            out.push_str(&format!(
                "    {}: {:.2}% vs {:.2}% (error: {:.4}%)\n",
                e.score, e.actual, e.predicted, e.error
            ));
        }
    }

    out.push('\n');
    out.push_str(&"=".repeat(80));
    out.push('\n');

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PredictedPoint;

    fn model(reference_percent: f64, data: Vec<PredictedPoint>) -> DatasetModel {
        DatasetModel {
            line: "1.000000000000x".to_string(),
            coefficients: vec![0.0, 1.0],
            reference_percent,
            data,
        }
    }

    #[test]
    fn validation_reports_recomputed_errors() {
        let mut models = BTreeMap::new();
        models.insert(
            5,
            model(
                10.0,
                vec![PredictedPoint {
                    score: 4.0,
                    percent: 5.0, // coefficients say y = x -> error 1.0
                    predicted_percent: 5.0,
                }],
            ),
        );

        let text = format_validation(&models);
        assert!(text.contains("      5 |"));
        assert!(text.contains("1.000000%"));
        assert!(text.contains("Some datasets have increased error."));
    }

    #[test]
    fn validation_flags_high_accuracy() {
        let mut models = BTreeMap::new();
        models.insert(
            1,
            model(
                1.0,
                vec![PredictedPoint {
                    score: 4.0,
                    percent: 4.0,
                    predicted_percent: 4.0,
                }],
            ),
        );

        let text = format_validation(&models);
        assert!(text.contains("All datasets calculated with high accuracy!"));
    }

    #[test]
    fn prediction_markers_follow_thresholds() {
        let mut models = BTreeMap::new();
        models.insert(
            1,
            model(
                1.0,
                vec![
                    PredictedPoint {
                        score: 1.0,
                        percent: 10.0,
                        predicted_percent: 10.05,
                    },
                    PredictedPoint {
                        score: 2.0,
                        percent: 10.0,
                        predicted_percent: 10.3,
                    },
                    PredictedPoint {
                        score: 3.0,
                        percent: 10.0,
                        predicted_percent: 11.0,
                    },
                ],
            ),
        );

        let text = format_predictions(&models);
        assert!(text.contains("Diff: 0.050% ok"));
        assert!(text.contains("Diff: 0.300% ~"));
        assert!(text.contains("Diff: 1.000% !!"));
    }

    #[test]
    fn trend_reports_deltas_between_datasets() {
        let mut models = BTreeMap::new();
        models.insert(2, model(10.0, vec![]));
        models.insert(3, model(12.5, vec![]));
        models.insert(4, model(11.0, vec![]));

        let text = format_trend(&models);
        assert!(text.contains("Dataset 2 -> 3: +2.50%"));
        assert!(text.contains("Dataset 3 -> 4: -1.50%"));
        assert!(text.contains("Minimum: 10%"));
        assert!(text.contains("Maximum: 12.5%"));
    }

    #[test]
    fn run_summary_lists_fits_and_skips() {
        let mut models = BTreeMap::new();
        models.insert(
            26,
            DatasetModel {
                line: String::new(),
                coefficients: vec![0.0; 8],
                reference_percent: 0.0,
                data: vec![
                    PredictedPoint {
                        score: 0.0,
                        percent: 0.0,
                        predicted_percent: 0.0
                    };
                    17
                ],
            },
        );

        let config = FitConfig {
            data_dir: "data".into(),
            output_path: "compiled.json".into(),
            degree: None,
            reference_score: 60000.0,
        };

        let skipped = vec![(31u32, "Insufficient data points: 1".to_string())];
        let text = format_run_summary(&models, &skipped, &[], 18, &config);

        assert!(text.contains("Processed dataset 26: 17 points (polynomial degree: 7)"));
        assert!(text.contains("(skipped 31) Insufficient data points: 1"));
    }
}
