//! Expression matrix CSV/TSV reader.
use std::collections::HashSet;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use csv::StringRecord;

use crate::config::InputConfig;
use crate::data_handling::Dataset;
use crate::math::{Array1, Array2};

/// Read an expression table: one row per sample, a label column and one
/// numeric column per feature. `.tsv` files are read tab-delimited.
pub fn read_expression_csv<P: AsRef<Path>>(path: P, config: &InputConfig) -> Result<Dataset> {
    let path = path.as_ref();
    let delimiter = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
        _ => b',',
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open expression file: {}", path.display()))?;

    let headers = reader
        .headers()
        .context("Failed to read expression header row")?
        .clone();

    let mut seen = HashSet::new();
    if let Some(dup) = headers.iter().find(|h| !seen.insert(*h)) {
        bail!("Duplicate column '{}' in {}", dup, path.display());
    }

    let label_idx = find_column(&headers, &config.label_column)
        .ok_or_else(|| anyhow!("Missing label column '{}'", config.label_column))?;

    let feature_indices: Vec<usize> = (0..headers.len()).filter(|&i| i != label_idx).collect();
    if feature_indices.is_empty() {
        bail!("No feature columns found in {}", path.display());
    }
    let feature_names: Vec<String> = feature_indices
        .iter()
        .map(|&i| headers[i].to_string())
        .collect();

    let mut values = Vec::new();
    let mut labels = Vec::new();

    for (row_idx, result) in reader.records().enumerate() {
        let row = row_idx + 1;
        let record = result.with_context(|| format!("Failed to read row {}", row))?;

        let raw_label = record
            .get(label_idx)
            .ok_or_else(|| anyhow!("Missing label value at row {}", row))?;
        labels.push(encode_label(raw_label, config).with_context(|| format!("Invalid label at row {}", row))?);

        for &col in &feature_indices {
            let cell = record.get(col).unwrap_or("");
            let value = cell.parse::<f64>().with_context(|| {
                format!(
                    "Non-numeric value '{}' in column '{}' at row {}",
                    cell, &headers[col], row
                )
            })?;
            values.push(value);
        }
    }

    if labels.is_empty() {
        bail!("Expression file {} has no samples", path.display());
    }

    let x = Array2::from_shape_vec((labels.len(), feature_names.len()), values)?;
    let dataset = Dataset::new(x, Array1::from_vec(labels), feature_names)?;
    log::debug!(
        "Read {} samples x {} features from {}",
        dataset.n_samples(),
        dataset.n_features(),
        path.display()
    );
    Ok(dataset)
}

fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

/// Map a raw label to 1 (case) or 0 (control). Numeric spellings compare
/// numerically, so `1.0` matches a case label of `1`.
fn encode_label(raw: &str, config: &InputConfig) -> Result<i32> {
    if raw.is_empty() {
        bail!("label is missing");
    }
    let same = |expected: &str| {
        raw == expected
            || matches!(
                (raw.parse::<f64>(), expected.parse::<f64>()),
                (Ok(a), Ok(b)) if a == b
            )
    };
    if same(&config.case_label) {
        Ok(1)
    } else if same(&config.control_label) {
        Ok(0)
    } else {
        bail!(
            "'{}' is neither the case label '{}' nor the control label '{}'",
            raw,
            config.case_label,
            config.control_label
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_encode_by_configured_spelling() {
        let config = InputConfig {
            control_label: "healthy".to_string(),
            case_label: "disease".to_string(),
            ..InputConfig::default()
        };
        assert_eq!(encode_label("disease", &config).unwrap(), 1);
        assert_eq!(encode_label("healthy", &config).unwrap(), 0);
        assert!(encode_label("unknown", &config).is_err());
        assert!(encode_label("", &config).is_err());
    }

    #[test]
    fn numeric_labels_compare_numerically() {
        let config = InputConfig::default();
        assert_eq!(encode_label("1.0", &config).unwrap(), 1);
        assert_eq!(encode_label("0", &config).unwrap(), 0);
        assert!(encode_label("2", &config).is_err());
    }
}
