//! Record ingest and normalization.
//!
//! This module turns a directory tree of per-record JSON files into clean
//! per-dataset sample sets that are safe to fit.
//!
//! Layout: `<data_dir>/<dataset>/<record>.json`, where `<dataset>` is a
//! purely numeric directory name and each record file carries one scored
//! entry. The dataset number is re-derived from the leading digits of each
//! filename and cross-checked against the record's zone id.
//!
//! Design goals:
//! - **File-level validation** (skip bad records, but report what happened)
//! - **Deterministic behavior** (directory entries are processed in sorted order)
//! - **Separation of concerns**: no fitting logic here

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::domain::{FileWarning, SamplePoint};
use crate::error::AppError;

/// Zone ids are dataset numbers offset by this base.
const ZONE_ID_BASE: u32 = 69_000;

/// Input files store the rank percentile scaled by this factor.
const PERCENT_SCALE: f64 = 100.0;

/// On-disk record file shape.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordFile {
    pub data: RecordData,
}

/// The scored entry inside a record file.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordData {
    pub zone_id: u32,
    pub total_score: f64,
    pub rank_percent: f64,
}

/// Scan output: grouped sample points + per-file warnings.
#[derive(Debug, Clone)]
pub struct ScannedData {
    /// Sample points grouped by dataset number, in numeric order.
    pub datasets: BTreeMap<u32, Vec<SamplePoint>>,
    pub warnings: Vec<FileWarning>,
    pub files_read: usize,
}

/// Extract the dataset number from a record filename.
///
/// Accepts leading digits followed by optional whitespace and a `-`
/// (e.g. `"26 - 60k - 4,69%.json"` yields `26`).
pub fn extract_dataset_number(filename: &str) -> Option<u32> {
    let digits: String = filename.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }

    let rest = &filename[digits.len()..];
    if !rest.trim_start().starts_with('-') {
        return None;
    }

    digits.parse().ok()
}

/// Validate a parsed record against its filename-derived dataset number and
/// convert it to a sample point.
pub fn record_to_point(dataset: u32, record: &RecordFile) -> Result<SamplePoint, String> {
    let expected_zone = dataset + ZONE_ID_BASE;
    if record.data.zone_id != expected_zone {
        return Err(format!(
            "Zone id mismatch: expected {expected_zone}, got {}",
            record.data.zone_id
        ));
    }

    Ok(SamplePoint {
        score: record.data.total_score,
        percent: record.data.rank_percent / PERCENT_SCALE,
    })
}

/// Scan `data_dir` for numeric dataset subdirectories and load every record.
///
/// Unreadable or mismatched records become [`FileWarning`]s; only a missing
/// or unreadable `data_dir` itself is fatal.
pub fn scan_datasets(data_dir: &Path) -> Result<ScannedData, AppError> {
    let entries = fs::read_dir(data_dir).map_err(|e| {
        AppError::input(format!(
            "Failed to read data directory '{}': {e}",
            data_dir.display()
        ))
    })?;

    let mut subdirs = Vec::new();
    for entry in entries {
        let entry = entry
            .map_err(|e| AppError::input(format!("Failed to enumerate data directory: {e}")))?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        if path.is_dir() && !name.is_empty() && name.chars().all(|c| c.is_ascii_digit()) {
            subdirs.push(path);
        }
    }
    subdirs.sort();

    let mut datasets: BTreeMap<u32, Vec<SamplePoint>> = BTreeMap::new();
    let mut warnings = Vec::new();
    let mut files_read = 0usize;

    for subdir in subdirs {
        let mut files: Vec<_> = fs::read_dir(&subdir)
            .map_err(|e| {
                AppError::input(format!(
                    "Failed to read dataset directory '{}': {e}",
                    subdir.display()
                ))
            })?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        files.sort();

        for file in files {
            files_read += 1;
            let display = file.display().to_string();

            let filename = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let Some(dataset) = extract_dataset_number(&filename) else {
                warnings.push(FileWarning {
                    path: display,
                    message: "Failed to extract dataset number from filename".to_string(),
                });
                continue;
            };

            let contents = match fs::read_to_string(&file) {
                Ok(c) => c,
                Err(e) => {
                    warnings.push(FileWarning {
                        path: display,
                        message: format!("Failed to read file: {e}"),
                    });
                    continue;
                }
            };

            let record: RecordFile = match serde_json::from_str(&contents) {
                Ok(r) => r,
                Err(e) => {
                    warnings.push(FileWarning {
                        path: display,
                        message: format!("Invalid record JSON: {e}"),
                    });
                    continue;
                }
            };

            match record_to_point(dataset, &record) {
                Ok(point) => datasets.entry(dataset).or_default().push(point),
                Err(message) => warnings.push(FileWarning {
                    path: display,
                    message,
                }),
            }
        }
    }

    Ok(ScannedData {
        datasets,
        warnings,
        files_read,
    })
}
