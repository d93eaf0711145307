//! Core types for the Attender engine
//!
//! This module defines the data structures that flow through each stage of the
//! engine: validated attendance records, per-subject and overall aggregates,
//! the defaulter classification, and the calendar timeline.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-session attendance mark
///
/// `NoCollege` marks a day on which no classes were held; it appears in the
/// calendar timeline but is excluded from presence counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
    NoCollege,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
            AttendanceStatus::NoCollege => "NoCollege",
        }
    }

    /// Parse a wire status string. Returns `None` for anything unrecognized;
    /// callers apply the Absent defaulting policy at the schema boundary.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Present" => Some(AttendanceStatus::Present),
            "Absent" => Some(AttendanceStatus::Absent),
            "NoCollege" => Some(AttendanceStatus::NoCollege),
            _ => None,
        }
    }
}

/// Subject tag resolved at mark-time from the recorder's identity
///
/// `Unknown` is the sentinel for records whose recorder could not be mapped to
/// a subject; such records are excluded from aggregation but kept in raw fetch
/// results so they can be corrected later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Subject {
    Unknown,
    #[serde(untagged)]
    Named(String),
}

impl Subject {
    /// Build a subject from a wire tag, normalizing the literal sentinel
    pub fn named(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        if tag == "Unknown" {
            Subject::Unknown
        } else {
            Subject::Named(tag)
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Subject::Unknown)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Subject::Unknown => "Unknown",
            Subject::Named(tag) => tag.as_str(),
        }
    }
}

/// One validated attendance observation
///
/// Constructed once at the store-adapter boundary (see [`crate::schema`]) so
/// downstream computations never see loosely shaped documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Unique record identifier (audit only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
    /// Stable roll-number key for the student
    #[serde(rename = "student")]
    pub student_id: String,
    /// Calendar date of the session (no time component)
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub subject: Subject,
    /// Recorder identity (audit only, never used in aggregation)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marked_by: Option<String>,
}

/// Presence figures for a single subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectAggregate {
    pub subject: String,
    pub present_count: u32,
    pub total_count: u32,
    /// `present / total * 100`, or 0.0 when no classes were held
    pub percentage: f64,
}

/// Presence figures summed across all counted subjects
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverallAggregate {
    pub present_count: u32,
    pub total_count: u32,
    /// Same zero-division policy as the per-subject figure
    pub percentage: f64,
}

/// Derived attendance statistics for one student
///
/// Ephemeral: recomputed from the record sequence on every query, never
/// persisted or cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    /// Per-subject figures, keyed by subject tag (sorted for stable output)
    pub subjects: BTreeMap<String, SubjectAggregate>,
    pub overall: OverallAggregate,
}

/// Binary defaulter classification against the fixed threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefaulterStatus {
    Defaulter,
    NotDefaulter,
}

impl DefaulterStatus {
    pub fn is_defaulter(&self) -> bool {
        matches!(self, DefaulterStatus::Defaulter)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DefaulterStatus::Defaulter => "Defaulter",
            DefaulterStatus::NotDefaulter => "NotDefaulter",
        }
    }
}

/// One day in the calendar timeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalendarEntry {
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

/// One row of the all-students defaulter table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterRow {
    pub roll_no: String,
    pub name: String,
    pub total_classes: u32,
    pub present_days: u32,
    /// Rounded to two decimals for display parity with the dashboard
    pub percentage: f64,
    pub status: DefaulterStatus,
}

/// Report producer metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Complete per-student report payload consumed by the rendering layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentReport {
    pub report_version: String,
    pub producer: ReportProducer,
    #[serde(rename = "student")]
    pub student_id: String,
    pub generated_at_utc: String,
    pub subjects: BTreeMap<String, SubjectAggregate>,
    pub overall: OverallAggregate,
    pub defaulter_status: DefaulterStatus,
    pub calendar: Vec<CalendarEntry>,
}
