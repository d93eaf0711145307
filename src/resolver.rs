//! Recorder-to-subject resolution
//!
//! Each faculty recorder is authorized to mark attendance for exactly one
//! subject. The table is injected at construction time so deployments and
//! tests can supply their own fixtures; unmapped recorders resolve to the
//! `Unknown` sentinel instead of failing, so their marks are kept and tagged
//! for later correction.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::EngineError;
use crate::types::Subject;

/// Static recorder-to-subject lookup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubjectResolver {
    table: HashMap<String, String>,
}

impl SubjectResolver {
    /// Create a resolver over an explicit table
    pub fn new(table: HashMap<String, String>) -> Self {
        Self { table }
    }

    /// Build a resolver from (recorder, subject) pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            table: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Load the table from a JSON object of recorder -> subject
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let table: HashMap<String, String> = serde_json::from_str(json)
            .map_err(|e| EngineError::InvalidSubjectTable(e.to_string()))?;
        Ok(Self { table })
    }

    /// Save the table as JSON
    pub fn to_json(&self) -> Result<String, EngineError> {
        serde_json::to_string_pretty(&self.table).map_err(EngineError::JsonError)
    }

    /// Resolve a recorder identity to its subject
    ///
    /// Total over all inputs: unmapped recorders yield `Subject::Unknown`.
    pub fn resolve(&self, recorder: &str) -> Subject {
        match self.table.get(recorder) {
            Some(tag) => Subject::named(tag.clone()),
            None => Subject::Unknown,
        }
    }

    /// Number of mapped recorders
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> SubjectResolver {
        SubjectResolver::from_pairs([
            ("Kavita Patil", "DAA"),
            ("Kirti Deshpande", "DBMS"),
            ("Neeraj Sathawane", "DAV"),
        ])
    }

    #[test]
    fn test_resolve_mapped_recorder() {
        let resolver = fixture();
        assert_eq!(resolver.resolve("Kavita Patil"), Subject::named("DAA"));
        assert_eq!(resolver.resolve("Kirti Deshpande"), Subject::named("DBMS"));
    }

    #[test]
    fn test_unmapped_recorder_resolves_to_unknown() {
        let resolver = fixture();
        assert!(resolver.resolve("Visiting Lecturer").is_unknown());
        assert!(resolver.resolve("").is_unknown());
    }

    #[test]
    fn test_empty_table_is_total() {
        let resolver = SubjectResolver::default();
        assert!(resolver.is_empty());
        assert!(resolver.resolve("Kavita Patil").is_unknown());
    }

    #[test]
    fn test_table_json_round_trip() {
        let resolver = fixture();
        let json = resolver.to_json().unwrap();

        let restored = SubjectResolver::from_json(&json).unwrap();
        assert_eq!(restored.len(), 3);
        assert_eq!(restored.resolve("Neeraj Sathawane"), Subject::named("DAV"));
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert!(SubjectResolver::from_json("[1, 2, 3]").is_err());
    }
}
