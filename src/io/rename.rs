//! Rename record files to their canonical display names.
//!
//! Raw record files arrive with opaque names. This renames every record in a
//! dataset directory to
//!
//! ```text
//! <dataset> - <score rounded to thousands>k - <percent with decimal comma>%.json
//! ```
//!
//! so the score and percentile are visible at a glance in a file listing.

use std::fs;
use std::path::Path;

use crate::error::AppError;
use crate::io::ingest::{RecordData, RecordFile};

/// A single performed rename, for reporting.
#[derive(Debug, Clone)]
pub struct RenamedFile {
    pub from: String,
    pub to: String,
}

/// Canonical display name for a record.
///
/// The score renders rounded to the nearest thousand with a `k` suffix; the
/// percentile renders fixed to 2 decimals with a decimal comma.
pub fn display_file_name(dataset: u32, record: &RecordData) -> String {
    let score_k = (record.total_score / 1000.0).round() as i64;
    let percent = format!("{:.2}", record.rank_percent / 100.0).replace('.', ",");
    format!("{dataset} - {score_k}k - {percent}%.json")
}

/// Rename every record JSON in `<data_dir>/<dataset>/` to its display name.
///
/// Returns the performed renames in filename order.
pub fn rename_dataset_files(data_dir: &Path, dataset: u32) -> Result<Vec<RenamedFile>, AppError> {
    let dir = data_dir.join(dataset.to_string());

    let mut files: Vec<_> = fs::read_dir(&dir)
        .map_err(|e| {
            AppError::input(format!(
                "Failed to read dataset directory '{}': {e}",
                dir.display()
            ))
        })?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();

    let mut renamed = Vec::with_capacity(files.len());
    for file in files {
        let contents = fs::read_to_string(&file).map_err(|e| {
            AppError::input(format!("Failed to read record '{}': {e}", file.display()))
        })?;
        let record: RecordFile = serde_json::from_str(&contents).map_err(|e| {
            AppError::input(format!("Invalid record JSON '{}': {e}", file.display()))
        })?;

        let new_name = display_file_name(dataset, &record.data);
        let new_path = dir.join(&new_name);
        if new_path == file {
            continue;
        }

        fs::rename(&file, &new_path).map_err(|e| {
            AppError::input(format!(
                "Failed to rename '{}' to '{new_name}': {e}",
                file.display()
            ))
        })?;

        renamed.push(RenamedFile {
            from: file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            to: new_name,
        });
    }

    Ok(renamed)
}
