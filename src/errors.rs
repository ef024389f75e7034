// ⚠️ Error Types
// Fatal source/sink failures vs. per-row rejections that never stop the batch

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The row source could not be read. Nothing can be produced after this.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("source '{path}' is unavailable: {reason}")]
    Unavailable { path: PathBuf, reason: String },
    #[error("source record {record} could not be read: {reason}")]
    Malformed { record: usize, reason: String },
}

/// Why a single row was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowErrorKind {
    /// Identifier did not yield an integer id (and optional variant).
    #[error("cannot decode identifier: {0}")]
    Decode(String),
    /// Worth field, once cleaned, is not a decimal number in the active locale.
    #[error("cannot parse worth '{value}' as a decimal number")]
    NumberFormat { value: String },
}

/// A rejected row: its 1-based record number, the raw content and the reason.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("row {row} ({raw}): {kind}")]
pub struct RowError {
    pub row: usize,
    pub raw: String,
    pub kind: RowErrorKind,
}

impl RowError {
    pub fn new(row: usize, raw: impl Into<String>, kind: RowErrorKind) -> Self {
        RowError {
            row,
            raw: raw.into(),
            kind,
        }
    }
}

/// Writing the rendered document failed.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("cannot create directory for '{path}': {source}")]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("cannot write '{destination}': {source}")]
    Write { destination: String, source: io::Error },
}

// ============================================================================
// TESTS
// ============================================================================
