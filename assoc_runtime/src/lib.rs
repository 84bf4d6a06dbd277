#![forbid(unsafe_code)]

//! Runtime around the `assoc_graph` kernel.
//!
//! Sheet ingestion, dictionary export, graph building and a
//! single-writer shared handle. No incidence logic lives here; every
//! mutation goes through `IncidenceGraph::add`.

pub mod error;
pub mod config;
pub mod sheet;
pub mod ingest;
pub mod dictionary;
pub mod shared;
