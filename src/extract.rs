use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::Result;
use crate::timebase;
use crate::types::TransientRecord;

/// Derived metadata for one spectral observation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpectrumMetadata {
    pub phase: f64,
    pub source: Value,
    pub path: Option<String>,
}

/// Object-level metadata for one transient, plus one entry per spectrum
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransientMetadata {
    pub name: String,
    pub t_max: f64,
    pub sources: Value,
    pub redshift: f64,
    pub spectra: Vec<SpectrumMetadata>,
}

/// File name for a spectrum table: `P` (at or after peak) or `M` (before
/// peak) followed by |phase| in tenths of a day, truncated toward zero.
pub fn spectrum_filename(name: &str, phase: f64) -> String {
    let tenths = (phase.abs() * 10.0) as i64;
    if phase >= 0.0 {
        format!("{name}_P{tenths}.txt")
    } else {
        format!("{name}_M{tenths}.txt")
    }
}

/// Write a spectrum's data table as comma-separated rows, no header row
/// and no index column.
fn write_spectrum(data: &[Vec<f64>], path: &Path) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    for row in data {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Compute the derived metadata for one transient.
///
/// `t_max` comes from the record's peak-brightness date; each spectrum's
/// phase is its observation MJD minus `t_max`. When `data_dir` is given
/// the spectrum tables are written there (the directory is created if
/// absent) and each entry carries the path it was written to. A failure
/// on any spectrum aborts the remaining ones for this transient.
pub fn extract_metadata(
    record: &TransientRecord,
    data_dir: Option<&Path>,
) -> Result<TransientMetadata> {
    let t_max = timebase::calendar_to_mjd(&record.max_visual_date)?;

    let mut spectra = Vec::with_capacity(record.spectra.len());
    for observation in &record.spectra {
        let obs_mjd = timebase::to_mjd(observation.time, &observation.time_unit)?;
        let phase = obs_mjd - t_max;

        let path = match data_dir {
            Some(dir) => {
                fs::create_dir_all(dir)?;
                let filepath = dir.join(spectrum_filename(&record.name, phase));
                write_spectrum(&observation.data, &filepath)?;
                debug!(
                    "Wrote spectrum for {} at phase {:+.1} to {}",
                    record.name,
                    phase,
                    filepath.display()
                );
                Some(filepath.to_string_lossy().to_string())
            }
            None => None,
        };

        spectra.push(SpectrumMetadata {
            phase,
            source: observation.source.clone(),
            path,
        });
    }

    Ok(TransientMetadata {
        name: record.name.clone(),
        t_max,
        sources: record.sources.clone(),
        redshift: record.redshift,
        spectra,
    })
}
