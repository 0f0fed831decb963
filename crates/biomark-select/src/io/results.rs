//! CSV writers for the two result tables.
//!
//! Headers are written explicitly so an empty table still yields a valid
//! header-only file.
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::feature_selection::ScoredIntersectionTable;
use crate::stats::TTestResultTable;

fn write_table<P: AsRef<Path>, T: Serialize>(path: P, header: &[&str], rows: &[T]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    writer.write_record(header)?;
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("Failed to write row to {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to flush {}", path.display()))?;
    log::info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

/// `Feature,Lasso,Random Forest,SVM-RFE`
pub fn write_scored_features<P: AsRef<Path>>(path: P, table: &ScoredIntersectionTable) -> Result<()> {
    write_table(path, &ScoredIntersectionTable::HEADER, &table.rows)
}

/// `Feature,t-statistic,p-value`
pub fn write_ttest_results<P: AsRef<Path>>(path: P, table: &TTestResultTable) -> Result<()> {
    write_table(path, &TTestResultTable::HEADER, &table.rows)
}
