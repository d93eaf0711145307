//! Pipeline orchestration
//!
//! This module provides the public API for Attender Core. It wires the stages
//! together: validated records in, derived views out (subject aggregates,
//! defaulter classification, calendar timeline), plus the mark-time ingestion
//! step and the all-students roster table.

use std::collections::HashSet;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::aggregator::Aggregator;
use crate::calendar::{CalendarProjector, SubjectFilter};
use crate::classifier::classify;
use crate::error::EngineError;
use crate::report::ReportEncoder;
use crate::resolver::SubjectResolver;
use crate::schema::RawRecordAdapter;
use crate::store::RecordStore;
use crate::types::{AttendanceRecord, AttendanceStatus, RosterRow, StudentReport};

/// Build a student report from raw store documents (JSON array)
///
/// Parses, validates, and runs the full reporting pipeline, returning the
/// report as pretty-printed JSON. The payload may contain documents for any
/// number of students; only the named student's records enter the report.
///
/// # Example
/// ```ignore
/// let report_json = report_from_json(fetched_json, "RBT23CB001")?;
/// ```
pub fn report_from_json(raw_json: &str, student_id: &str) -> Result<String, EngineError> {
    let raw = RawRecordAdapter::parse_array(raw_json)?;
    let mut records = RawRecordAdapter::to_records(raw)?;
    records.retain(|r| r.student_id == student_id);

    let engine = AttendanceEngine::default();
    let report = engine.student_report(student_id, &records);
    engine.encoder.encode_to_json(&report)
}

/// Stateless processor bundling the resolver and report encoder
///
/// One engine serves any number of calls; every derived view is recomputed
/// from scratch from the record sequence it is given.
pub struct AttendanceEngine {
    resolver: SubjectResolver,
    encoder: ReportEncoder,
}

impl Default for AttendanceEngine {
    fn default() -> Self {
        Self::new(SubjectResolver::default())
    }
}

impl AttendanceEngine {
    /// Create an engine over an explicit recorder-to-subject table
    pub fn new(resolver: SubjectResolver) -> Self {
        Self {
            resolver,
            encoder: ReportEncoder::new(),
        }
    }

    pub fn resolver(&self) -> &SubjectResolver {
        &self.resolver
    }

    /// Produce a validated record for one attendance mark
    ///
    /// Resolves the recorder to their subject; unmapped recorders produce an
    /// `Unknown`-subject record that is kept for later correction rather
    /// than rejected.
    pub fn mark(
        &self,
        recorder: &str,
        student_id: &str,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> AttendanceRecord {
        AttendanceRecord {
            record_id: Some(Uuid::new_v4().to_string()),
            student_id: student_id.to_string(),
            date,
            status,
            subject: self.resolver.resolve(recorder),
            marked_by: Some(recorder.to_string()),
        }
    }

    /// Build the full per-student report: subject-wise and overall
    /// aggregates, defaulter classification, and the unfiltered calendar
    /// timeline
    pub fn student_report(
        &self,
        student_id: &str,
        records: &[AttendanceRecord],
    ) -> StudentReport {
        let summary = Aggregator::aggregate(records);
        let status = classify(summary.overall.percentage);
        let calendar = CalendarProjector::project(records, &SubjectFilter::All);

        self.encoder.encode(student_id, summary, status, calendar)
    }

    /// Encode a report to pretty-printed JSON
    pub fn report_to_json(&self, report: &StudentReport) -> Result<String, EngineError> {
        self.encoder.encode_to_json(report)
    }

    /// Build the all-students defaulter table
    ///
    /// One row per distinct roster entry (duplicate roll numbers are
    /// skipped); students with no records get a zeroed row rather than being
    /// dropped. Rows reuse the aggregator so the Unknown-subject and
    /// NoCollege exclusions apply uniformly across views.
    pub fn roster_report(
        &self,
        roster: &[(String, String)],
        store: &dyn RecordStore,
    ) -> Vec<RosterRow> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut rows = Vec::new();

        for (roll_no, name) in roster {
            if !seen.insert(roll_no.as_str()) {
                continue;
            }

            let records = store.find(roll_no);
            let summary = Aggregator::aggregate(&records);
            let overall = summary.overall;

            rows.push(RosterRow {
                roll_no: roll_no.clone(),
                name: name.clone(),
                total_classes: overall.total_count,
                present_days: overall.present_count,
                percentage: round2(overall.percentage),
                status: classify(overall.percentage),
            });
        }

        rows
    }
}

/// Round to two decimals for display parity with the dashboard table
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
