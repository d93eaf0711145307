//! Error types for Attender Core

use thiserror::Error;

/// Errors that can occur at the engine's parsing and encoding boundaries
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to parse record document: {0}")]
    ParseError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid subject table: {0}")]
    InvalidSubjectTable(String),
}
