use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{Result, ScrapeError};
use crate::extract::TransientMetadata;

/// Read the input name list: a CSV file with a header row and a `Name`
/// column. Empty cells are skipped.
pub fn read_name_list(path: &Path) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    let headers = reader.headers()?.clone();
    let name_idx = headers
        .iter()
        .position(|h| h.trim() == "Name")
        .ok_or_else(|| ScrapeError::MissingField("'Name' column in input list".into()))?;

    let mut names = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(name) = record.get(name_idx) {
            let name = name.trim();
            if !name.is_empty() {
                names.push(name.to_string());
            }
        }
    }
    debug!("Read {} names from {}", names.len(), path.display());
    Ok(names)
}

/// Write the aggregate metadata mapping as pretty-printed JSON, once at
/// the end of a run.
pub fn write_aggregate(
    metadata: &BTreeMap<String, TransientMetadata>,
    path: &Path,
) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(metadata)?;
    fs::write(path, json)?;
    Ok(())
}
