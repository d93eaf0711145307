//! Record store contract
//!
//! The engine never talks to a database; it consumes record sequences the
//! store adapter has already fetched. This module pins down that contract as
//! a trait and provides an in-memory implementation used by tests and the
//! CLI. Implementations must return records from `find` in insertion order:
//! the calendar projector's first-wins duplicate collapse depends on it.

use chrono::NaiveDate;

use crate::types::{AttendanceRecord, AttendanceStatus};

/// Persistence contract for attendance records
pub trait RecordStore {
    /// Append one record
    fn insert(&mut self, record: AttendanceRecord);

    /// Fetch every record for a student, all subjects and dates, in
    /// insertion order
    fn find(&self, student_id: &str) -> Vec<AttendanceRecord>;

    /// Delete every record matching (student, date); returns how many were
    /// removed
    fn delete(&mut self, student_id: &str, date: NaiveDate) -> usize;

    /// Count a student's records, optionally restricted to one status
    fn count_by_student(&self, student_id: &str, status: Option<AttendanceStatus>) -> usize;
}

/// In-memory record store preserving insertion order
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<AttendanceRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total records across all students
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordStore for MemoryStore {
    fn insert(&mut self, record: AttendanceRecord) {
        self.records.push(record);
    }

    fn find(&self, student_id: &str) -> Vec<AttendanceRecord> {
        self.records
            .iter()
            .filter(|r| r.student_id == student_id)
            .cloned()
            .collect()
    }

    fn delete(&mut self, student_id: &str, date: NaiveDate) -> usize {
        let before = self.records.len();
        self.records
            .retain(|r| !(r.student_id == student_id && r.date == date));
        before - self.records.len()
    }

    fn count_by_student(&self, student_id: &str, status: Option<AttendanceStatus>) -> usize {
        self.records
            .iter()
            .filter(|r| r.student_id == student_id)
            .filter(|r| status.map_or(true, |s| r.status == s))
            .count()
    }
}
