//! Structural invariant checks for `IncidenceGraph`.
//!
//! `validate_invariants` panics on the first failure and runs after every
//! `add` in debug builds. `try_validate_invariants` is the non-panicking
//! variant for callers that want to report instead of abort.

use crate::graph::IncidenceGraph;
use crate::labels::LabelIndex;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run every check. Panics on the first failure.
pub fn validate_invariants(graph: &IncidenceGraph) {
    if let Err(msg) = try_validate_invariants(graph) {
        panic!("Invariant violation: {}", msg);
    }
}

/// Returns `Err(message)` on the first failure, `Ok(())` if all pass.
pub fn try_validate_invariants(graph: &IncidenceGraph) -> Result<(), String> {
    check_label_bijection("incentive", graph.incentive_labels())?;
    check_label_bijection("reaction", graph.reaction_labels())?;
    check_matrix_shape(graph)?;
    check_buffer_length(graph)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Individual checks (private)
// ---------------------------------------------------------------------------

/// The label map and the label order are inverses of each other.
fn check_label_bijection(space: &str, labels: &LabelIndex) -> Result<(), String> {
    let mut mapped = 0usize;
    for (label, index) in labels.entries() {
        mapped += 1;
        match labels.label(index) {
            Some(found) if found == label => {}
            Some(found) => {
                return Err(format!(
                    "[INVARIANT:{space}_bijection] index {index} maps to {label:?} \
                     but order holds {found:?}"
                ));
            }
            None => {
                return Err(format!(
                    "[INVARIANT:{space}_bijection] {label:?} maps to index {index} \
                     beyond order length {}",
                    labels.len()
                ));
            }
        }
    }
    if mapped != labels.len() {
        return Err(format!(
            "[INVARIANT:{space}_bijection] {mapped} mapped labels but order length {}",
            labels.len()
        ));
    }
    Ok(())
}

/// Rows track incentives, columns track reactions.
fn check_matrix_shape(graph: &IncidenceGraph) -> Result<(), String> {
    let expected = (graph.incentive_count(), graph.reaction_count());
    if graph.shape() != expected {
        return Err(format!(
            "[INVARIANT:matrix_shape] matrix is {:?}, label spaces are {:?}",
            graph.shape(),
            expected
        ));
    }
    Ok(())
}

/// No partially initialised row or column in the flat buffer.
fn check_buffer_length(graph: &IncidenceGraph) -> Result<(), String> {
    let (rows, cols) = graph.shape();
    let cells = graph.matrix().cells().count();
    if cells != rows * cols {
        return Err(format!(
            "[INVARIANT:buffer_length] {cells} cells for shape ({rows}, {cols})"
        ));
    }
    Ok(())
}
