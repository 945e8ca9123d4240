//! Read/write the compiled model document.
//!
//! The compiled JSON is the "portable" representation of a whole run:
//! one entry per dataset number, each carrying the formula string, the
//! ascending coefficient array, the reference-score percentile, and the
//! fitted points with predictions. Validation, prediction listings, and
//! trend reports all reload this file instead of refitting.
//!
//! The schema is defined by `domain::DatasetModel`.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use crate::domain::DatasetModel;
use crate::error::AppError;

/// Write the compiled document, pretty-printed, keyed by dataset number.
pub fn write_compiled(path: &Path, models: &BTreeMap<u32, DatasetModel>) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::input(format!(
            "Failed to create compiled JSON '{}': {e}",
            path.display()
        ))
    })?;

    serde_json::to_writer_pretty(file, models)
        .map_err(|e| AppError::input(format!("Failed to write compiled JSON: {e}")))?;

    Ok(())
}

/// Read a compiled document back.
pub fn read_compiled(path: &Path) -> Result<BTreeMap<u32, DatasetModel>, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::input(format!(
            "Failed to open compiled JSON '{}': {e}",
            path.display()
        ))
    })?;

    let models: BTreeMap<u32, DatasetModel> = serde_json::from_reader(file)
        .map_err(|e| AppError::input(format!("Invalid compiled JSON: {e}")))?;

    Ok(models)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PredictedPoint;

    fn sample_models() -> BTreeMap<u32, DatasetModel> {
        let mut models = BTreeMap::new();
        models.insert(
            26,
            DatasetModel {
                line: "1.000000000000x + 0.000000000000".to_string(),
                coefficients: vec![0.0, 1.0],
                reference_percent: 31.07,
                data: vec![PredictedPoint {
                    score: 61283.0,
                    percent: 31.07,
                    predicted_percent: 31.07,
                }],
            },
        );
        models
    }

    #[test]
    fn compiled_document_round_trips() {
        let models = sample_models();
        let json = serde_json::to_string_pretty(&models).unwrap();
        let back: BTreeMap<u32, DatasetModel> = serde_json::from_str(&json).unwrap();

        assert_eq!(back.len(), 1);
        let entry = &back[&26];
        assert_eq!(entry.coefficients, vec![0.0, 1.0]);
        assert_eq!(entry.reference_percent, 31.07);
        assert_eq!(entry.data.len(), 1);
    }

    #[test]
    fn dataset_numbers_serialize_as_object_keys() {
        let models = sample_models();
        let json = serde_json::to_string(&models).unwrap();
        assert!(json.starts_with("{\"26\":"));
    }
}
