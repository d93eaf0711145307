//! attendance.record.v1 schema
//!
//! The documents the record store hands back are loosely shaped: any field may
//! be missing and `status`/`subject` may carry unrecognized tags. This module
//! owns that boundary. [`RawRecord`] models the document as stored,
//! [`RawRecordAdapter`] validates and converts it into the typed
//! [`crate::types::AttendanceRecord`] the rest of the engine consumes.

mod adapter;
mod raw_record;

pub use adapter::{RawRecordAdapter, ValidationOutcome};
pub use raw_record::{RawRecord, ValidationError};

/// Current schema version
pub const SCHEMA_VERSION: &str = "attendance.record.v1";
