//! Attender Core - attendance aggregation and reporting engine
//!
//! Attender Core turns a raw, unordered stream of per-date attendance
//! documents into presentation-ready views through a deterministic pipeline:
//! document validation → subject resolution → aggregation → defaulter
//! classification → calendar projection → report encoding.
//!
//! ## Modules
//!
//! - **Schema**: validate loosely shaped store documents into typed records
//! - **Aggregator / Classifier / Calendar**: pure derivations over fetched
//!   records
//! - **Pipeline**: the [`AttendanceEngine`] orchestrating the full report

pub mod aggregator;
pub mod calendar;
pub mod classifier;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod resolver;
pub mod schema;
pub mod store;
pub mod types;

pub use aggregator::Aggregator;
pub use calendar::{CalendarProjector, SubjectFilter};
pub use classifier::{classify, DEFAULTER_THRESHOLD_PCT};
pub use error::EngineError;
pub use pipeline::{report_from_json, AttendanceEngine};
pub use resolver::SubjectResolver;
pub use store::{MemoryStore, RecordStore};

// Schema exports
pub use schema::{RawRecord, RawRecordAdapter, SCHEMA_VERSION};

/// Engine version embedded in all report payloads
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for report payloads
pub const PRODUCER_NAME: &str = "attender-core";
