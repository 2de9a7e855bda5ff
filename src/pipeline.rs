use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{error, info};

use crate::catalog;
use crate::error::Result;
use crate::extract::{self, TransientMetadata};
use crate::fetch::TransientSource;
use crate::types::TransientRecord;

/// Result of a complete batch run
#[derive(Debug, Serialize)]
pub struct BatchResult {
    pub requested: usize,
    pub extracted: usize,
    pub errors: Vec<String>,
    pub meta_path: String,
}

async fn process_transient(
    source: &dyn TransientSource,
    name: &str,
    data_dir: Option<&Path>,
) -> Result<TransientMetadata> {
    let doc = source.fetch_transient(name).await?;
    let record = TransientRecord::from_document(name, &doc)?;
    extract::extract_metadata(&record, data_dir)
}

/// Run the batch: fetch each named transient in order, extract its
/// metadata and spectra, and write the aggregate mapping once at the end.
///
/// The name list is truncated to `limit`. A failed transient is logged
/// and skipped; it contributes nothing to the aggregate (no partial
/// entries). With `data_dir` unset, spectrum tables are not written and
/// each entry's path is left empty.
pub async fn run_batch(
    source: &dyn TransientSource,
    names: &[String],
    limit: usize,
    data_dir: Option<&Path>,
    meta_path: &Path,
) -> Result<BatchResult> {
    let batch = &names[..names.len().min(limit)];
    info!(
        "Processing {} of {} requested transients",
        batch.len(),
        names.len()
    );

    let mut metadata: BTreeMap<String, TransientMetadata> = BTreeMap::new();
    let mut errors = Vec::new();

    for name in batch {
        info!("Parsing {}", name);
        match process_transient(source, name, data_dir).await {
            Ok(meta) => {
                metadata.insert(name.clone(), meta);
            }
            Err(e) => {
                error!("Failed to process {}: {}", name, e);
                errors.push(format!("{name}: {e}"));
            }
        }
    }

    catalog::write_aggregate(&metadata, meta_path)?;
    info!(
        "Wrote metadata for {} transients to {}",
        metadata.len(),
        meta_path.display()
    );

    Ok(BatchResult {
        requested: batch.len(),
        extracted: metadata.len(),
        errors,
        meta_path: meta_path.to_string_lossy().to_string(),
    })
}
