//! Deterministic graph fingerprint.
//!
//! SHA-256 over a canonical byte stream, lowercase hex:
//!
//!   "incentives" ‖ for each label in row order: len(u64 LE) ‖ UTF-8 bytes
//!   "reactions"  ‖ for each label in column order: len(u64 LE) ‖ UTF-8 bytes
//!   "matrix"     ‖ rows(u64 LE) ‖ cols(u64 LE) ‖ cells row-major, one byte each
//!
//! Two graphs built from the same ordered `add` calls always share a
//! fingerprint, on every platform.

use sha2::{Digest, Sha256};

use crate::graph::IncidenceGraph;
use crate::labels::LabelIndex;

/// Lowercase-hex SHA-256 fingerprint of `graph`.
pub fn fingerprint(graph: &IncidenceGraph) -> String {
    let mut hasher = Sha256::new();

    hasher.update(b"incentives");
    hash_labels(&mut hasher, graph.incentive_labels());
    hasher.update(b"reactions");
    hash_labels(&mut hasher, graph.reaction_labels());

    let (rows, cols) = graph.shape();
    hasher.update(b"matrix");
    hasher.update((rows as u64).to_le_bytes());
    hasher.update((cols as u64).to_le_bytes());
    for &cell in graph.matrix().cells() {
        hasher.update([cell]);
    }

    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

fn hash_labels(hasher: &mut Sha256, labels: &LabelIndex) {
    for label in labels.iter() {
        hasher.update((label.len() as u64).to_le_bytes());
        hasher.update(label.as_bytes());
    }
}
