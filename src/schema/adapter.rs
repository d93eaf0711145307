//! Adapter for converting raw store documents to validated records
//!
//! Parses NDJSON or JSON-array payloads of attendance documents and converts
//! them into typed records, preserving input order. Input order matters: the
//! calendar projector collapses same-day duplicates first-wins, so documents
//! must be supplied in store insertion order.

use crate::error::EngineError;
use crate::schema::raw_record::{RawRecord, ValidationError};
use crate::types::AttendanceRecord;

/// Adapter for parsing and validating raw attendance documents
pub struct RawRecordAdapter;

impl RawRecordAdapter {
    /// Parse a JSON string containing an array of documents
    pub fn parse_array(json: &str) -> Result<Vec<RawRecord>, EngineError> {
        let records: Vec<RawRecord> = serde_json::from_str(json)?;
        Ok(records)
    }

    /// Parse NDJSON (newline-delimited JSON) documents
    pub fn parse_ndjson(ndjson: &str) -> Result<Vec<RawRecord>, EngineError> {
        let mut records = Vec::new();
        for (line_num, line) in ndjson.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match serde_json::from_str::<RawRecord>(trimmed) {
                Ok(record) => records.push(record),
                Err(e) => {
                    return Err(EngineError::ParseError(format!(
                        "Failed to parse line {}: {}",
                        line_num + 1,
                        e
                    )));
                }
            }
        }
        Ok(records)
    }

    /// Convert raw documents to validated records, preserving input order
    ///
    /// Fails on the first document missing its student key or carrying an
    /// unparsable date; missing status/subject fall under the defaulting
    /// policy and never fail.
    pub fn to_records(raw: Vec<RawRecord>) -> Result<Vec<AttendanceRecord>, EngineError> {
        let mut records = Vec::with_capacity(raw.len());
        for (idx, document) in raw.into_iter().enumerate() {
            let record = document.into_record().map_err(|e| {
                EngineError::ParseError(format!("Invalid document at index {}: {}", idx, e))
            })?;
            records.push(record);
        }
        Ok(records)
    }

    /// Validate a batch of documents, reporting every failure
    pub fn validate_records(raw: &[RawRecord]) -> Vec<ValidationOutcome> {
        raw.iter()
            .enumerate()
            .map(|(idx, record)| ValidationOutcome {
                index: idx,
                record_id: record.record_id.clone(),
                error: record.validate().err(),
            })
            .filter(|outcome| outcome.error.is_some())
            .collect()
    }
}

/// Result of validating one document in a batch
#[derive(Debug)]
pub struct ValidationOutcome {
    pub index: usize,
    pub record_id: Option<String>,
    pub error: Option<ValidationError>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AttendanceStatus, Subject};

    #[test]
    fn test_parse_array() {
        let json = r#"[
            {"student": "RBT23CB001", "date": "2025-03-01", "status": "Present", "subject": "DAA"},
            {"student": "RBT23CB001", "date": "2025-03-02", "status": "Absent", "subject": "DBMS"}
        ]"#;

        let raw = RawRecordAdapter::parse_array(json).unwrap();
        assert_eq!(raw.len(), 2);
    }

    #[test]
    fn test_parse_ndjson_reports_line_number() {
        let ndjson = concat!(
            r#"{"student": "RBT23CB001", "date": "2025-03-01", "status": "Present"}"#,
            "\n",
            "not valid json\n",
        );

        let err = RawRecordAdapter::parse_ndjson(ndjson).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_parse_ndjson_skips_blank_lines() {
        let ndjson = concat!(
            r#"{"student": "RBT23CB001", "date": "2025-03-01"}"#,
            "\n\n",
            r#"{"student": "RBT23CB001", "date": "2025-03-02"}"#,
            "\n",
        );

        let raw = RawRecordAdapter::parse_ndjson(ndjson).unwrap();
        assert_eq!(raw.len(), 2);
    }

    #[test]
    fn test_to_records_applies_defaulting_and_keeps_order() {
        let json = r#"[
            {"student": "RBT23CB001", "date": "2025-03-01"},
            {"student": "RBT23CB001", "date": "2025-03-02", "status": "Present", "subject": "DAA"}
        ]"#;

        let raw = RawRecordAdapter::parse_array(json).unwrap();
        let records = RawRecordAdapter::to_records(raw).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].status, AttendanceStatus::Absent);
        assert!(records[0].subject.is_unknown());
        assert_eq!(records[1].subject, Subject::named("DAA"));
        assert!(records[0].date < records[1].date);
    }

    #[test]
    fn test_to_records_rejects_missing_student() {
        let json = r#"[{"date": "2025-03-01", "status": "Present"}]"#;

        let raw = RawRecordAdapter::parse_array(json).unwrap();
        let err = RawRecordAdapter::to_records(raw).unwrap_err();
        assert!(err.to_string().contains("index 0"));
    }

    #[test]
    fn test_validate_records_collects_failures() {
        let raw = vec![
            RawRecord::new("RBT23CB001", "2025-03-01", "Present", "DAA", "kavitapatil"),
            RawRecord {
                student_id: Some("RBT23CB002".to_string()),
                date: Some("yesterday".to_string()),
                ..Default::default()
            },
            RawRecord::default(),
        ];

        let outcomes = RawRecordAdapter::validate_records(&raw);
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].index, 1);
        assert_eq!(outcomes[1].index, 2);
    }
}
