//! Amortized-doubling growable sequence built on `FixedSlotArray`.
//!
//! Capacity starts at 1 and doubles whenever an append or insert finds
//! the backing array full. Capacity never shrinks. Slots past the
//! logical length hold `None` and are never exposed.

use std::fmt;

use crate::error::{GraphError, Result};
use crate::slots::FixedSlotArray;

/// Resizable sequence with bounds-checked positional access.
#[derive(Clone)]
pub struct GrowableSequence<T> {
    slots: FixedSlotArray<Option<T>>,
    len: usize,
}

/// Iterator over the live elements of a `GrowableSequence`.
pub type Iter<'a, T> = std::iter::Flatten<std::slice::Iter<'a, Option<T>>>;

impl<T> GrowableSequence<T> {
    pub fn new() -> Self {
        Self::with_capacity(1)
    }

    /// Empty sequence with room for `capacity` elements before the first
    /// doubling. A zero request is rounded up to 1.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: FixedSlotArray::allocate(capacity.max(1), |_| None),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Add `value` at the end. Amortized O(1); O(n) on a doubling step.
    pub fn append(&mut self, value: T) {
        self.reserve_one();
        self.slots.as_mut_slice()[self.len] = Some(value);
        self.len += 1;
    }

    /// Insert `value` at position `index` (`0 <= index <= len`), shifting
    /// `[index, len)` one slot to the right.
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        if index > self.len {
            return Err(GraphError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        self.reserve_one();
        let slots = self.slots.as_mut_slice();
        // Highest index first so nothing is overwritten before it moves.
        for j in (index + 1..=self.len).rev() {
            slots[j] = slots[j - 1].take();
        }
        slots[index] = Some(value);
        self.len += 1;
        Ok(())
    }

    pub fn get(&self, index: usize) -> Result<&T> {
        self.live_slot(index)
            .and_then(|slot| slot.as_ref())
            .ok_or(GraphError::IndexOutOfRange {
                index,
                len: self.len,
            })
    }

    /// Overwrite the element at `index`, returning the previous one.
    pub fn set(&mut self, index: usize, value: T) -> Result<T> {
        if index >= self.len {
            return Err(GraphError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        self.slots
            .set(index, Some(value))?
            .ok_or(GraphError::IndexOutOfRange {
                index,
                len: self.len,
            })
    }

    pub fn last(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|i| self.get(i).ok())
    }

    /// Live elements in index order. Stops at `len`, not at capacity.
    pub fn iter(&self) -> Iter<'_, T> {
        self.slots.as_slice()[..self.len].iter().flatten()
    }

    fn live_slot(&self, index: usize) -> Option<&Option<T>> {
        if index < self.len {
            self.slots.get(index).ok()
        } else {
            None
        }
    }

    fn reserve_one(&mut self) {
        if self.len == self.slots.capacity() {
            self.resize(2 * self.slots.capacity());
        }
    }

    /// Move the live elements into a fresh array of `capacity` slots.
    fn resize(&mut self, capacity: usize) {
        let mut grown = FixedSlotArray::allocate(capacity, |_| None);
        let old = self.slots.as_mut_slice();
        for (dst, src) in grown.as_mut_slice().iter_mut().zip(&mut old[..self.len]) {
            *dst = src.take();
        }
        self.slots = grown;
    }
}

impl<T: PartialEq> GrowableSequence<T> {
    /// Remove and return the first element equal to `value`, shifting the
    /// tail one slot left. Fails with `ValueNotFound` when absent.
    pub fn remove(&mut self, value: &T) -> Result<T> {
        let found = self
            .iter()
            .position(|candidate| candidate == value)
            .ok_or(GraphError::ValueNotFound)?;

        let slots = self.slots.as_mut_slice();
        let removed = slots[found].take();
        for j in found..self.len - 1 {
            slots[j] = slots[j + 1].take();
        }
        slots[self.len - 1] = None;
        self.len -= 1;
        removed.ok_or(GraphError::ValueNotFound)
    }

    pub fn contains(&self, value: &T) -> bool {
        self.iter().any(|candidate| candidate == value)
    }
}

impl<T> Default for GrowableSequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> PartialEq for GrowableSequence<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for GrowableSequence<T> {}

impl<T: fmt::Debug> fmt::Debug for GrowableSequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Extend<T> for GrowableSequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.append(value);
        }
    }
}

impl<T> FromIterator<T> for GrowableSequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut seq = Self::new();
        seq.extend(iter);
        seq
    }
}

impl<'a, T> IntoIterator for &'a GrowableSequence<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
