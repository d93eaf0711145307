//! Report encoding
//!
//! Wraps the derived views into a versioned, serializable payload for the
//! dashboard renderers, stamped with producer metadata and a generation
//! timestamp.

use chrono::Utc;
use uuid::Uuid;

use crate::error::EngineError;
use crate::types::{
    AttendanceSummary, CalendarEntry, DefaulterStatus, ReportProducer, StudentReport,
};
use crate::{ENGINE_VERSION, PRODUCER_NAME};

/// Current report schema version
pub const REPORT_VERSION: &str = "attendance.report.v1";

/// Encoder for producing student report payloads
pub struct ReportEncoder {
    instance_id: String,
}

impl Default for ReportEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportEncoder {
    /// Create a new encoder with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    /// Assemble a report payload from the derived views
    pub fn encode(
        &self,
        student_id: &str,
        summary: AttendanceSummary,
        defaulter_status: DefaulterStatus,
        calendar: Vec<CalendarEntry>,
    ) -> StudentReport {
        StudentReport {
            report_version: REPORT_VERSION.to_string(),
            producer: ReportProducer {
                name: PRODUCER_NAME.to_string(),
                version: ENGINE_VERSION.to_string(),
                instance_id: self.instance_id.clone(),
            },
            student_id: student_id.to_string(),
            generated_at_utc: Utc::now().to_rfc3339(),
            subjects: summary.subjects,
            overall: summary.overall,
            defaulter_status,
            calendar,
        }
    }

    /// Encode a report payload to JSON
    pub fn encode_to_json(&self, report: &StudentReport) -> Result<String, EngineError> {
        serde_json::to_string_pretty(report).map_err(EngineError::JsonError)
    }
}
