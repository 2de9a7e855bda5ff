use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, ScrapeError};

/// Raw catalog document as fetched, one JSON object per transient
pub type RawDocument = serde_json::Value;

/// One spectral measurement belonging to a transient
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpectrumObservation {
    pub time: f64,
    pub time_unit: String,
    pub source: Value,
    pub data: Vec<Vec<f64>>,
}

/// One astronomical transient, parsed and validated from a raw document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransientRecord {
    pub name: String,
    pub max_visual_date: String,
    pub redshift: f64,
    pub sources: Value,
    pub spectra: Vec<SpectrumObservation>,
}

/// Numeric field that the catalog encodes either as a JSON number or as a
/// string holding one.
fn as_number(value: &Value, field: &str) -> Result<f64> {
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| ScrapeError::Api {
            message: format!("{field} is out of f64 range: {n}"),
        }),
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| ScrapeError::Api {
            message: format!("{field} is not numeric: '{s}'"),
        }),
        other => Err(ScrapeError::Api {
            message: format!("{field} is not numeric: {other}"),
        }),
    }
}

/// First entry's `value` from one of the catalog's measurement lists
/// (`maxvisualdate`, `redshift`, ...).
fn first_value<'a>(body: &'a Value, field: &str) -> Result<&'a Value> {
    body.get(field)
        .and_then(Value::as_array)
        .and_then(|entries| entries.first())
        .and_then(|entry| entry.get("value"))
        .filter(|value| !value.is_null())
        .ok_or_else(|| ScrapeError::MissingField(field.to_string()))
}

impl SpectrumObservation {
    fn from_entry(entry: &Value) -> Result<Self> {
        let time = as_number(
            entry
                .get("time")
                .ok_or_else(|| ScrapeError::MissingField("spectrum time".into()))?,
            "spectrum time",
        )?;
        let time_unit = entry
            .get("u_time")
            .and_then(Value::as_str)
            .ok_or_else(|| ScrapeError::MissingField("spectrum u_time".into()))?
            .to_string();
        let source = entry
            .get("source")
            .cloned()
            .ok_or_else(|| ScrapeError::MissingField("spectrum source".into()))?;

        let rows = entry
            .get("data")
            .and_then(Value::as_array)
            .ok_or_else(|| ScrapeError::MissingField("spectrum data".into()))?;
        let mut data = Vec::with_capacity(rows.len());
        for row in rows {
            let cells = row.as_array().ok_or_else(|| ScrapeError::Api {
                message: "spectrum data row is not an array".into(),
            })?;
            data.push(
                cells
                    .iter()
                    .map(|cell| as_number(cell, "spectrum data cell"))
                    .collect::<Result<Vec<f64>>>()?,
            );
        }

        Ok(Self {
            time,
            time_unit,
            source,
            data,
        })
    }
}

impl TransientRecord {
    /// Parse a fetched document into a validated record.
    ///
    /// The caller supplies the transient's name; the document must be a
    /// single-entry object keyed by exactly that name. Field-presence
    /// checks all happen here so downstream code never indexes into
    /// half-shaped JSON.
    pub fn from_document(name: &str, doc: &RawDocument) -> Result<Self> {
        let entries = doc.as_object().ok_or_else(|| ScrapeError::Api {
            message: format!("document for '{name}' is not a JSON object"),
        })?;
        if entries.len() != 1 {
            return Err(ScrapeError::Api {
                message: format!(
                    "document for '{name}' has {} entries, expected exactly one",
                    entries.len()
                ),
            });
        }
        let body = entries.get(name).ok_or_else(|| ScrapeError::Api {
            message: format!("document is not keyed by '{name}'"),
        })?;

        let max_visual_date = first_value(body, "maxvisualdate")?
            .as_str()
            .ok_or_else(|| ScrapeError::MissingField("maxvisualdate value".into()))?
            .to_string();
        let redshift = as_number(first_value(body, "redshift")?, "redshift")?;
        // Opaque provenance, passed through untouched
        let sources = body.get("sources").cloned().unwrap_or(Value::Null);

        let spectra = body
            .get("spectra")
            .and_then(Value::as_array)
            .ok_or_else(|| ScrapeError::MissingField("spectra".into()))?
            .iter()
            .map(SpectrumObservation::from_entry)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: name.to_string(),
            max_visual_date,
            redshift,
            sources,
            spectra,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sn2011fe_doc() -> RawDocument {
        json!({
            "SN2011fe": {
                "maxvisualdate": [{"value": "2011/08/24"}],
                "redshift": [{"value": 0.001208}, {"value": 0.0012}],
                "sources": "src1",
                "spectra": [{
                    "time": 55798.0,
                    "u_time": "MJD",
                    "source": "s1",
                    "data": [[4000.0, 1.2], [4010.0, 1.3]]
                }]
            }
        })
    }

    #[test]
    fn parses_full_document() {
        let record = TransientRecord::from_document("SN2011fe", &sn2011fe_doc()).unwrap();
        assert_eq!(record.name, "SN2011fe");
        assert_eq!(record.max_visual_date, "2011/08/24");
        assert_eq!(record.redshift, 0.001208);
        assert_eq!(record.sources, json!("src1"));
        assert_eq!(record.spectra.len(), 1);
        assert_eq!(record.spectra[0].time, 55798.0);
        assert_eq!(record.spectra[0].time_unit, "MJD");
        assert_eq!(record.spectra[0].data, vec![vec![4000.0, 1.2], vec![4010.0, 1.3]]);
    }

    #[test]
    fn accepts_string_encoded_numbers() {
        let doc = json!({
            "SN2007af": {
                "maxvisualdate": [{"value": "2007/03/15"}],
                "redshift": [{"value": "0.005464"}],
                "sources": [{"name": "CfA"}],
                "spectra": [{
                    "time": "54170.5",
                    "u_time": "mjd",
                    "source": "1",
                    "data": [["3800.2", "0.9"]]
                }]
            }
        });
        let record = TransientRecord::from_document("SN2007af", &doc).unwrap();
        assert_eq!(record.redshift, 0.005464);
        assert_eq!(record.spectra[0].time, 54170.5);
        assert_eq!(record.spectra[0].data, vec![vec![3800.2, 0.9]]);
    }

    #[test]
    fn missing_redshift_is_an_error() {
        let mut doc = sn2011fe_doc();
        doc["SN2011fe"].as_object_mut().unwrap().remove("redshift");
        let err = TransientRecord::from_document("SN2011fe", &doc).unwrap_err();
        assert!(matches!(err, ScrapeError::MissingField(ref f) if f == "redshift"));
    }

    #[test]
    fn empty_redshift_list_is_an_error() {
        let mut doc = sn2011fe_doc();
        doc["SN2011fe"]["redshift"] = json!([]);
        let err = TransientRecord::from_document("SN2011fe", &doc).unwrap_err();
        assert!(matches!(err, ScrapeError::MissingField(ref f) if f == "redshift"));
    }

    #[test]
    fn missing_peak_date_is_an_error() {
        let mut doc = sn2011fe_doc();
        doc["SN2011fe"].as_object_mut().unwrap().remove("maxvisualdate");
        let err = TransientRecord::from_document("SN2011fe", &doc).unwrap_err();
        assert!(matches!(err, ScrapeError::MissingField(ref f) if f == "maxvisualdate"));
    }

    #[test]
    fn missing_spectra_is_an_error() {
        let mut doc = sn2011fe_doc();
        doc["SN2011fe"].as_object_mut().unwrap().remove("spectra");
        let err = TransientRecord::from_document("SN2011fe", &doc).unwrap_err();
        assert!(matches!(err, ScrapeError::MissingField(ref f) if f == "spectra"));
    }

    #[test]
    fn missing_spectrum_time_unit_is_an_error() {
        let mut doc = sn2011fe_doc();
        doc["SN2011fe"]["spectra"][0].as_object_mut().unwrap().remove("u_time");
        let err = TransientRecord::from_document("SN2011fe", &doc).unwrap_err();
        assert!(matches!(err, ScrapeError::MissingField(_)));
    }

    #[test]
    fn multi_entry_document_is_an_error() {
        let mut doc = sn2011fe_doc();
        doc.as_object_mut().unwrap().insert("SN2011by".into(), json!({}));
        let err = TransientRecord::from_document("SN2011fe", &doc).unwrap_err();
        assert!(matches!(err, ScrapeError::Api { .. }));
    }

    #[test]
    fn mismatched_key_is_an_error() {
        let err = TransientRecord::from_document("SN2011by", &sn2011fe_doc()).unwrap_err();
        assert!(matches!(err, ScrapeError::Api { .. }));
    }
}
