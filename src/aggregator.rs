//! Attendance aggregation
//!
//! This module turns a raw record sequence into per-subject and overall
//! presence figures:
//! - records with an `Unknown` subject are dropped from both the grouping and
//!   the overall totals (they do not count as a class held)
//! - `NoCollege` records are likewise excluded from both counts, symmetric
//!   with the Unknown-subject exclusion
//! - duplicate marks on the same date are NOT deduplicated; each counts as a
//!   session

use std::collections::BTreeMap;

use crate::types::{
    AttendanceRecord, AttendanceStatus, AttendanceSummary, OverallAggregate, SubjectAggregate,
};

/// Aggregator for computing attendance summaries
pub struct Aggregator;

impl Aggregator {
    /// Aggregate a record sequence into per-subject and overall figures
    ///
    /// Pure function of its input; empty input yields an empty subject map
    /// and a zeroed overall aggregate.
    pub fn aggregate(records: &[AttendanceRecord]) -> AttendanceSummary {
        let mut counts: BTreeMap<String, (u32, u32)> = BTreeMap::new();

        for record in records {
            if record.subject.is_unknown() {
                continue;
            }
            if record.status == AttendanceStatus::NoCollege {
                continue;
            }

            let entry = counts.entry(record.subject.as_str().to_string()).or_insert((0, 0));
            entry.1 += 1;
            if record.status == AttendanceStatus::Present {
                entry.0 += 1;
            }
        }

        let mut subjects = BTreeMap::new();
        let mut overall_present = 0u32;
        let mut overall_total = 0u32;

        for (subject, (present, total)) in counts {
            overall_present += present;
            overall_total += total;
            subjects.insert(
                subject.clone(),
                SubjectAggregate {
                    subject,
                    present_count: present,
                    total_count: total,
                    percentage: percentage(present, total),
                },
            );
        }

        AttendanceSummary {
            subjects,
            overall: OverallAggregate {
                present_count: overall_present,
                total_count: overall_total,
                percentage: percentage(overall_present, overall_total),
            },
        }
    }
}

/// `present / total * 100`, defined as 0.0 when no classes were held
pub fn percentage(present: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        f64::from(present) / f64::from(total) * 100.0
    }
}
