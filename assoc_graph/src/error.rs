//! Error taxonomy for the incidence kernel.
//!
//! Every failure is reported synchronously to the caller and leaves the
//! structure that produced it unchanged.

use thiserror::Error;

/// All possible kernel failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A fixed slot array was requested with zero capacity.
    #[error("InvalidSize: slot array capacity must be > 0, got {requested}")]
    InvalidSize { requested: usize },

    /// Bounds violation on a slot array or sequence access.
    #[error("IndexOutOfRange: index {index} outside [0, {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// The incentive label is already present in the graph.
    #[error("DuplicateIncentive: {0:?} is already present in the graph")]
    DuplicateIncentive(String),

    /// The same reaction label was supplied twice in one `add` call.
    #[error("DuplicateReaction: {0:?} appears more than once for a single incentive")]
    DuplicateReaction(String),

    /// Lookup on an incentive label that was never added.
    #[error("UnknownIncentive: {0:?} is not in the graph")]
    UnknownIncentive(String),

    /// Reverse lookup on a reaction label that was never seen.
    #[error("UnknownReaction: {0:?} is not in the graph")]
    UnknownReaction(String),

    /// Removal of a value that the sequence does not hold.
    #[error("ValueNotFound: value not present in sequence")]
    ValueNotFound,
}

/// Kernel result alias.
pub type Result<T> = std::result::Result<T, GraphError>;
