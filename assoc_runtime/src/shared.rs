//! Thread-safe graph handle: single writer, many readers.
//!
//! `add` holds the write lock for its whole duration, so readers never
//! observe a half-grown matrix. Lookups share the read lock.
//! The kernel never leaves partial state behind, so a poisoned lock is
//! recovered rather than propagated.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use assoc_graph::hashing::fingerprint;
use assoc_graph::{Association, Count, IncidenceGraph, Result};

#[derive(Debug, Default)]
pub struct SharedGraph {
    inner: RwLock<IncidenceGraph>,
}

impl SharedGraph {
    pub fn new(graph: IncidenceGraph) -> Self {
        Self {
            inner: RwLock::new(graph),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, IncidenceGraph> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, IncidenceGraph> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add under the write lock.
    pub fn add<L, I>(&self, incentive: impl Into<String>, reactions: I) -> Result<()>
    where
        L: Into<String>,
        I: IntoIterator<Item = (L, Count)>,
    {
        self.write().add(incentive, reactions)
    }

    pub fn lookup(&self, incentive: &str) -> Result<Vec<Association>> {
        self.read().lookup(incentive)
    }

    pub fn lookup_reverse(&self, reaction: &str) -> Result<Vec<Association>> {
        self.read().lookup_reverse(reaction)
    }

    pub fn count(&self, incentive: &str, reaction: &str) -> Result<Count> {
        self.read().count(incentive, reaction)
    }

    pub fn shape(&self) -> (usize, usize) {
        self.read().shape()
    }

    pub fn render(&self) -> String {
        self.read().render()
    }

    pub fn fingerprint(&self) -> String {
        fingerprint(&self.read())
    }

    /// Consistent copy of the current graph.
    pub fn snapshot(&self) -> IncidenceGraph {
        self.read().clone()
    }

    pub fn into_inner(self) -> IncidenceGraph {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<IncidenceGraph> for SharedGraph {
    fn from(graph: IncidenceGraph) -> Self {
        Self::new(graph)
    }
}
