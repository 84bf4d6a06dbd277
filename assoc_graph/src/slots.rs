//! Fixed-capacity slot array: the allocation primitive under every
//! growable structure in this crate.
//!
//! Capacity is chosen once at construction and never changes.
//! All positional access is bounds-checked and fails with
//! `IndexOutOfRange` instead of panicking.

use std::fmt;

use crate::error::{GraphError, Result};

/// Homogeneous, bounds-checked array of `capacity` slots.
#[derive(Clone, PartialEq, Eq)]
pub struct FixedSlotArray<T> {
    slots: Box<[T]>,
}

impl<T: Clone> FixedSlotArray<T> {
    /// Allocate `capacity` slots, each initialised to `fill`.
    pub fn new(capacity: usize, fill: T) -> Result<Self> {
        Self::from_fn(capacity, |_| fill.clone())
    }

    /// Reset every slot to `value`.
    pub fn clear(&mut self, value: T) {
        for slot in self.slots.iter_mut() {
            *slot = value.clone();
        }
    }
}

impl<T> FixedSlotArray<T> {
    /// Allocate `capacity` slots, initialising slot `i` with `init(i)`.
    pub fn from_fn(capacity: usize, init: impl FnMut(usize) -> T) -> Result<Self> {
        if capacity == 0 {
            return Err(GraphError::InvalidSize { requested: capacity });
        }
        Ok(Self::allocate(capacity, init))
    }

    /// Infallible allocation for callers that have already validated
    /// a non-zero capacity.
    pub(crate) fn allocate(capacity: usize, init: impl FnMut(usize) -> T) -> Self {
        debug_assert!(capacity > 0);
        Self {
            slots: (0..capacity).map(init).collect(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn get(&self, index: usize) -> Result<&T> {
        self.slots.get(index).ok_or(GraphError::IndexOutOfRange {
            index,
            len: self.slots.len(),
        })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.slots.len();
        self.slots
            .get_mut(index)
            .ok_or(GraphError::IndexOutOfRange { index, len })
    }

    /// Overwrite slot `index`, returning the previous occupant.
    pub fn set(&mut self, index: usize, value: T) -> Result<T> {
        let slot = self.get_mut(index)?;
        Ok(std::mem::replace(slot, value))
    }

    /// Forward iteration over every slot, in index order.
    /// Restartable: each call yields a fresh iterator.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.slots.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.slots
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.slots
    }
}

impl<'a, T> IntoIterator for &'a FixedSlotArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for FixedSlotArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.slots.iter()).finish()
    }
}
