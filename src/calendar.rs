//! Calendar projection
//!
//! Converts a record sequence into a date-ordered status timeline for the
//! calendar renderer. Same-day duplicates are never merged or reconciled:
//! the first record in input order wins, so callers must supply records in
//! the order they want tie-break priority (the store contract returns them
//! in insertion order). The projector emits categorical statuses only;
//! mapping them onto an ordinal color scale is a rendering concern.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::types::{AttendanceRecord, AttendanceStatus, CalendarEntry, Subject};

/// Optional subject restriction for the timeline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubjectFilter {
    /// Keep every record regardless of subject
    #[default]
    All,
    /// Keep only records carrying this subject
    One(Subject),
}

impl SubjectFilter {
    /// Restrict to a single subject tag
    pub fn one(tag: impl Into<String>) -> Self {
        SubjectFilter::One(Subject::named(tag))
    }

    fn matches(&self, subject: &Subject) -> bool {
        match self {
            SubjectFilter::All => true,
            SubjectFilter::One(wanted) => subject == wanted,
        }
    }
}

/// Projector for building the calendar timeline
pub struct CalendarProjector;

impl CalendarProjector {
    /// Project records onto a date-ordered timeline
    ///
    /// Output is fully materialized, ascending by date, with exactly one
    /// entry per distinct date in the filtered input. Empty input yields an
    /// empty timeline, which callers treat as "no data" rather than an error.
    pub fn project(records: &[AttendanceRecord], filter: &SubjectFilter) -> Vec<CalendarEntry> {
        let mut by_date: BTreeMap<NaiveDate, AttendanceStatus> = BTreeMap::new();

        for record in records {
            if !filter.matches(&record.subject) {
                continue;
            }
            // first record for a date wins
            by_date.entry(record.date).or_insert(record.status);
        }

        by_date
            .into_iter()
            .map(|(date, status)| CalendarEntry { date, status })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(day: u32, status: AttendanceStatus, subject: Subject) -> AttendanceRecord {
        AttendanceRecord {
            record_id: None,
            student_id: "RBT23CB001".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            status,
            subject,
            marked_by: None,
        }
    }

    #[test]
    fn test_empty_input_yields_empty_timeline() {
        let timeline = CalendarProjector::project(&[], &SubjectFilter::All);
        assert!(timeline.is_empty());
    }

    #[test]
    fn test_timeline_is_ascending_by_date() {
        let records = vec![
            record(9, AttendanceStatus::Absent, Subject::named("DAA")),
            record(2, AttendanceStatus::Present, Subject::named("DBMS")),
            record(5, AttendanceStatus::NoCollege, Subject::named("DAA")),
        ];

        let timeline = CalendarProjector::project(&records, &SubjectFilter::All);

        assert_eq!(timeline.len(), 3);
        assert!(timeline.windows(2).all(|w| w[0].date < w[1].date));
        assert_eq!(timeline[0].status, AttendanceStatus::Present);
        assert_eq!(timeline[1].status, AttendanceStatus::NoCollege);
        assert_eq!(timeline[2].status, AttendanceStatus::Absent);
    }

    #[test]
    fn test_single_record_per_date_reproduces_status() {
        let records = vec![record(4, AttendanceStatus::NoCollege, Subject::named("DAA"))];

        let timeline = CalendarProjector::project(&records, &SubjectFilter::All);

        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline[0].date, NaiveDate::from_ymd_opt(2025, 3, 4).unwrap());
        assert_eq!(timeline[0].status, AttendanceStatus::NoCollege);
    }

    #[test]
    fn test_duplicate_date_first_record_wins() {
        let records = vec![
            record(7, AttendanceStatus::Absent, Subject::named("DAA")),
            record(7, AttendanceStatus::Present, Subject::named("DAA")),
        ];

        let timeline = CalendarProjector::project(&records, &SubjectFilter::All);

        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline[0].status, AttendanceStatus::Absent);

        // reversed input order flips the winner
        let reversed: Vec<_> = records.into_iter().rev().collect();
        let timeline = CalendarProjector::project(&reversed, &SubjectFilter::All);
        assert_eq!(timeline[0].status, AttendanceStatus::Present);
    }

    #[test]
    fn test_subject_filter_excludes_other_subjects() {
        let records = vec![
            record(1, AttendanceStatus::Present, Subject::named("DAA")),
            record(2, AttendanceStatus::Absent, Subject::named("DBMS")),
            record(3, AttendanceStatus::Present, Subject::Unknown),
        ];

        let timeline = CalendarProjector::project(&records, &SubjectFilter::one("DAA"));

        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline[0].date, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
    }

    #[test]
    fn test_all_filter_keeps_unknown_subject_records() {
        // the raw timeline shows every fetched record, Unknown subject included
        let records = vec![record(1, AttendanceStatus::Present, Subject::Unknown)];

        let timeline = CalendarProjector::project(&records, &SubjectFilter::All);
        assert_eq!(timeline.len(), 1);
    }
}
