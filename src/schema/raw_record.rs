//! Raw attendance document as persisted by the record store
//!
//! Every field is optional because the store enforces no shape. Validation
//! distinguishes hard failures (no student key, unparsable date) from the
//! soft conditions that defaulting covers (missing status or subject).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{AttendanceRecord, AttendanceStatus, Subject};

/// A loosely shaped attendance document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRecord {
    /// Unique record identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
    /// Student roll number
    #[serde(rename = "student", skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    /// ISO calendar date string (YYYY-MM-DD)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// One of "Present", "Absent", "NoCollege"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Subject tag, "Unknown" when resolution failed at mark-time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Recorder identity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marked_by: Option<String>,
}

impl RawRecord {
    /// Create a fully populated document with a fresh record id
    pub fn new(
        student_id: impl Into<String>,
        date: impl Into<String>,
        status: impl Into<String>,
        subject: impl Into<String>,
        marked_by: impl Into<String>,
    ) -> Self {
        RawRecord {
            record_id: Some(uuid::Uuid::new_v4().to_string()),
            student_id: Some(student_id.into()),
            date: Some(date.into()),
            status: Some(status.into()),
            subject: Some(subject.into()),
            marked_by: Some(marked_by.into()),
        }
    }

    /// Validate the document against the schema
    ///
    /// Missing status/subject are not errors; they fall under the defaulting
    /// policy applied by [`RawRecord::into_record`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.student_id.as_deref().map_or(true, str::is_empty) {
            return Err(ValidationError::MissingStudent);
        }

        match &self.date {
            None => Err(ValidationError::MissingDate),
            Some(date) => match date.parse::<NaiveDate>() {
                Ok(_) => Ok(()),
                Err(_) => Err(ValidationError::InvalidDate { date: date.clone() }),
            },
        }
    }

    /// Convert into a validated record, applying the defaulting policy:
    /// missing or unrecognized status becomes `Absent`, missing subject
    /// becomes `Unknown`.
    pub fn into_record(self) -> Result<AttendanceRecord, ValidationError> {
        self.validate()?;

        // validate() guarantees both fields are present and the date parses
        let student_id = self.student_id.unwrap_or_default();
        let date: NaiveDate = self
            .date
            .as_deref()
            .unwrap_or_default()
            .parse()
            .map_err(|_| ValidationError::MissingDate)?;

        let status = self
            .status
            .as_deref()
            .and_then(AttendanceStatus::parse)
            .unwrap_or(AttendanceStatus::Absent);

        let subject = match self.subject {
            Some(tag) => Subject::named(tag),
            None => Subject::Unknown,
        };

        Ok(AttendanceRecord {
            record_id: self.record_id,
            student_id,
            date,
            status,
            subject,
            marked_by: self.marked_by,
        })
    }
}

impl From<AttendanceRecord> for RawRecord {
    fn from(record: AttendanceRecord) -> Self {
        RawRecord {
            record_id: record.record_id,
            student_id: Some(record.student_id),
            date: Some(record.date.to_string()),
            status: Some(record.status.as_str().to_string()),
            subject: Some(record.subject.as_str().to_string()),
            marked_by: record.marked_by,
        }
    }
}

/// Validation errors for raw attendance documents
#[derive(Debug, Clone, thiserror::Error)]
pub enum ValidationError {
    #[error("Document has no student key")]
    MissingStudent,

    #[error("Document has no date")]
    MissingDate,

    #[error("Invalid date (expected YYYY-MM-DD): {date}")]
    InvalidDate { date: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_document_converts() {
        let raw = RawRecord::new("RBT23CB001", "2025-03-01", "Present", "DAA", "kavitapatil");
        let record = raw.into_record().unwrap();

        assert_eq!(record.student_id, "RBT23CB001");
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert_eq!(record.status, AttendanceStatus::Present);
        assert_eq!(record.subject.as_str(), "DAA");
        assert_eq!(record.marked_by.as_deref(), Some("kavitapatil"));
        assert!(record.record_id.is_some());
    }

    #[test]
    fn test_missing_status_defaults_to_absent() {
        let raw = RawRecord {
            student_id: Some("RBT23CB002".to_string()),
            date: Some("2025-03-02".to_string()),
            subject: Some("DBMS".to_string()),
            ..Default::default()
        };

        let record = raw.into_record().unwrap();
        assert_eq!(record.status, AttendanceStatus::Absent);
    }

    #[test]
    fn test_unrecognized_status_defaults_to_absent() {
        let raw = RawRecord {
            student_id: Some("RBT23CB002".to_string()),
            date: Some("2025-03-02".to_string()),
            status: Some("Maybe".to_string()),
            ..Default::default()
        };

        let record = raw.into_record().unwrap();
        assert_eq!(record.status, AttendanceStatus::Absent);
    }

    #[test]
    fn test_missing_subject_defaults_to_unknown() {
        let raw = RawRecord {
            student_id: Some("RBT23CB003".to_string()),
            date: Some("2025-03-03".to_string()),
            status: Some("Present".to_string()),
            ..Default::default()
        };

        let record = raw.into_record().unwrap();
        assert!(record.subject.is_unknown());
    }

    #[test]
    fn test_missing_student_rejected() {
        let raw = RawRecord {
            date: Some("2025-03-03".to_string()),
            ..Default::default()
        };

        assert!(matches!(raw.validate(), Err(ValidationError::MissingStudent)));
    }

    #[test]
    fn test_bad_date_rejected() {
        let raw = RawRecord {
            student_id: Some("RBT23CB001".to_string()),
            date: Some("03/01/2025".to_string()),
            ..Default::default()
        };

        assert!(matches!(
            raw.validate(),
            Err(ValidationError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_deserialize_store_document() {
        let json = r#"{
            "student": "RBT23CB001",
            "date": "2025-03-01",
            "status": "Present",
            "subject": "DAA",
            "marked_by": "kavitapatil"
        }"#;

        let raw: RawRecord = serde_json::from_str(json).unwrap();
        assert!(raw.validate().is_ok());
        assert_eq!(raw.student_id.as_deref(), Some("RBT23CB001"));
    }
}
