#![forbid(unsafe_code)]

//! Bipartite incentive/reaction incidence kernel.
//!
//! Storage layers, leaves first: `slots` (fixed-capacity array),
//! `sequence` (amortized-doubling sequence), `labels` and `matrix`
//! built on them, and `graph` on top of both.

pub mod error;
pub mod domain;
pub mod slots;
pub mod sequence;
pub mod labels;
pub mod matrix;
pub mod graph;
pub mod invariants;
pub mod hashing;

pub use domain::{Association, Count};
pub use error::{GraphError, Result};
pub use graph::IncidenceGraph;
