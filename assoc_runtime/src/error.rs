//! Runtime error type: wraps kernel, I/O and JSON failures together
//! with the ingestion-specific ones.

use std::io;

use assoc_graph::GraphError;
use thiserror::Error;

/// All possible ingestion and export failures.
#[derive(Debug, Error)]
pub enum IngestError {
    /// File I/O error.
    #[error("IoError: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization or config parsing failed.
    #[error("JsonError: {0}")]
    Json(#[from] serde_json::Error),

    /// The kernel rejected an `add`.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// A continuation row appeared with no entry open.
    #[error("OrphanContinuation: row {row} continues an entry but none is open")]
    OrphanContinuation { row: usize },

    /// A count cell is not an integer in 0..=255.
    #[error("InvalidCount: row {row}: {value:?} is not an integer in 0..=255")]
    InvalidCount { row: usize, value: String },

    /// Merging counts of one reaction exceeded 255.
    #[error("CountOverflow: {reaction:?} for {incentive:?} exceeds 255")]
    CountOverflow { incentive: String, reaction: String },

    /// Column layout is inconsistent.
    #[error("InvalidConfig: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, IngestError>;
