//! # Guarded Sequence
//!
//! Ordered list behind a single `parking_lot::RwLock`.
//!
//! ## Lock Modes
//!
//! - Shared: `len`, `get`, `contains`, `index_of`, `copy_into`, `snapshot`
//! - Exclusive: `push`, `insert`, `set`, `remove_value`, `take_value`,
//!   `remove_selected`, `remove_at`, `take_at`, `clear`, `drain_all`
//!
//! Every operation acquires its guard once and holds it for the whole
//! critical section. Guards release on drop, so an early return or a
//! panicking selector cannot leave the lock held.

use std::fmt;

use parking_lot::RwLock;

use super::{Selection, Snapshot};
use crate::config::{SequenceConfig, DEFAULT_LABEL};
use crate::error::{SequenceError, SequenceResult};

/// Thread-safe ordered list allowing simultaneous reads and exclusive writes.
///
/// Share it between threads with `Arc`. Elements are returned by clone;
/// no reference into the backing storage ever escapes the lock.
///
/// ## Usage
///
/// ```rust
/// use std::sync::Arc;
/// use std::thread;
/// use rampart_core::GuardedSequence;
///
/// let shared = Arc::new(GuardedSequence::new());
///
/// let workers: Vec<_> = (0..4)
///     .map(|id| {
///         let shared = Arc::clone(&shared);
///         thread::spawn(move || shared.push(id))
///     })
///     .collect();
/// for worker in workers {
///     worker.join().unwrap();
/// }
///
/// assert_eq!(shared.len(), 4);
/// ```
pub struct GuardedSequence<T> {
    /// The elements. Only touched through a guard.
    items: RwLock<Vec<T>>,
    /// Name carried on log events.
    label: String,
}

impl<T> GuardedSequence<T> {
    /// Creates an empty sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(Vec::new(), DEFAULT_LABEL.to_owned())
    }

    /// Creates an empty sequence with room for `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_parts(Vec::with_capacity(capacity), DEFAULT_LABEL.to_owned())
    }

    /// Creates an empty sequence from a config.
    #[must_use]
    pub fn with_config(config: &SequenceConfig) -> Self {
        Self::with_values(Vec::new(), config)
    }

    /// Creates a sequence owning `values`, with the config's label and
    /// at least its initial capacity.
    #[must_use]
    pub fn with_values(mut values: Vec<T>, config: &SequenceConfig) -> Self {
        values.reserve(config.initial_capacity.saturating_sub(values.len()));
        Self::from_parts(values, config.label.clone())
    }

    fn from_parts(items: Vec<T>, label: String) -> Self {
        tracing::debug!(label = %label, len = items.len(), "sequence created");
        Self {
            items: RwLock::new(items),
            label,
        }
    }

    /// The label given at construction.
    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Current element count.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Whether the sequence is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Appends `value` at the end.
    pub fn push(&self, value: T) {
        self.items.write().push(value);
    }

    /// Inserts `value` before position `index`, shifting later elements.
    ///
    /// `index == len` appends.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::OutOfRange`] if `index > len`.
    pub fn insert(&self, index: usize, value: T) -> SequenceResult<()> {
        let mut items = self.items.write();
        let len = items.len();
        if index > len {
            return Err(self.out_of_range(index, len));
        }
        items.insert(index, value);
        Ok(())
    }

    /// Replaces the element at `index`, returning the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::OutOfRange`] if `index >= len`.
    pub fn set(&self, index: usize, value: T) -> SequenceResult<T> {
        let mut items = self.items.write();
        let len = items.len();
        match items.get_mut(index) {
            Some(slot) => Ok(std::mem::replace(slot, value)),
            None => Err(self.out_of_range(index, len)),
        }
    }

    /// Removes the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::OutOfRange`] if `index >= len`.
    pub fn remove_at(&self, index: usize) -> SequenceResult<()> {
        self.take_at(index).map(drop)
    }

    /// Removes and returns the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::OutOfRange`] if `index >= len`.
    pub fn take_at(&self, index: usize) -> SequenceResult<T> {
        let mut items = self.items.write();
        let len = items.len();
        if index >= len {
            return Err(self.out_of_range(index, len));
        }
        Ok(items.remove(index))
    }

    /// Removes every element. A no-op on an empty sequence.
    pub fn clear(&self) {
        let mut items = self.items.write();
        let removed = items.len();
        items.clear();
        tracing::trace!(label = %self.label, removed, "sequence cleared");
    }

    /// Removes and returns every element in order, under one exclusive
    /// acquisition.
    ///
    /// Concurrent drains never see the same element twice.
    #[must_use]
    pub fn drain_all(&self) -> Vec<T> {
        let drained = std::mem::take(&mut *self.items.write());
        tracing::trace!(label = %self.label, drained = drained.len(), "sequence drained");
        drained
    }

    /// Whether any element satisfies `predicate`.
    #[must_use]
    pub fn contains_where<F>(&self, predicate: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        self.items.read().iter().any(predicate)
    }

    /// Index of the first element satisfying `predicate`.
    #[must_use]
    pub fn index_where<F>(&self, predicate: F) -> Option<usize>
    where
        F: FnMut(&T) -> bool,
    {
        self.items.read().iter().position(predicate)
    }

    /// Consumes the container and returns its elements.
    #[must_use]
    pub fn into_inner(self) -> Vec<T> {
        self.items.into_inner()
    }

    fn out_of_range(&self, index: usize, len: usize) -> SequenceError {
        tracing::debug!(label = %self.label, index, len, "index out of range");
        SequenceError::OutOfRange { index, len }
    }
}

impl<T: Clone> GuardedSequence<T> {
    /// Creates a sequence holding clones of `values`.
    #[must_use]
    pub fn from_slice(values: &[T]) -> Self {
        Self::from_parts(values.to_vec(), DEFAULT_LABEL.to_owned())
    }

    /// Returns a clone of the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::OutOfRange`] if `index >= len`.
    pub fn get(&self, index: usize) -> SequenceResult<T> {
        let items = self.items.read();
        match items.get(index) {
            Some(value) => Ok(value.clone()),
            None => Err(self.out_of_range(index, items.len())),
        }
    }

    /// Clones the whole sequence into `dest` starting at `offset`.
    ///
    /// Elements of `dest` outside `offset..offset + len` are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::DestinationTooSmall`] if `dest` cannot hold
    /// every element from `offset` on. Nothing is written in that case.
    pub fn copy_into(&self, dest: &mut [T], offset: usize) -> SequenceResult<()> {
        let items = self.items.read();
        let required = items.len();
        let capacity = dest.len();
        let end = match offset.checked_add(required) {
            Some(end) if end <= capacity => end,
            _ => {
                tracing::debug!(label = %self.label, offset, required, capacity, "copy destination too small");
                return Err(SequenceError::DestinationTooSmall {
                    offset,
                    required,
                    capacity,
                });
            }
        };
        dest[offset..end].clone_from_slice(&items);
        Ok(())
    }

    /// Takes a snapshot of the current contents.
    ///
    /// The read guard is held only while copying.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<T> {
        Snapshot::new(self.to_vec())
    }

    /// Alias for [`snapshot`](Self::snapshot).
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Snapshot<T> {
        self.snapshot()
    }

    /// Copies the current contents into a `Vec`.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.items.read().clone()
    }
}

impl<T: PartialEq> GuardedSequence<T> {
    /// Whether some element equals `value`.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.items.read().contains(value)
    }

    /// Index of the first element equal to `value`.
    #[must_use]
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.index_where(|item| item == value)
    }

    /// Removes the first element equal to `value`. Returns whether one was
    /// removed.
    pub fn remove_value(&self, value: &T) -> bool {
        self.take_value(value).is_some()
    }

    /// Removes and returns the first element equal to `value`.
    ///
    /// The returned element is the stored one, which may differ from
    /// `value` when equality is looser than identity.
    pub fn take_value(&self, value: &T) -> Option<T> {
        let mut items = self.items.write();
        let index = items.iter().position(|item| item == value)?;
        Some(items.remove(index))
    }

    /// Atomically picks an element with `selector` and removes it.
    ///
    /// The selector sees the current contents while the exclusive guard is
    /// held, so no other writer can act between the choice and the removal.
    /// It must be quick and must not touch this sequence, since every other
    /// reader and writer waits on it.
    ///
    /// The first element equal to the chosen value is removed. A chosen
    /// value that is not present leaves the sequence unchanged and yields
    /// `matched == false` with `chosen` set.
    ///
    /// ```rust
    /// use rampart_core::GuardedSequence;
    ///
    /// let counters = GuardedSequence::from(vec![0, 5, 0]);
    /// let picked = counters.remove_selected(|items| items.first().copied());
    /// assert!(picked.matched);
    /// assert_eq!(picked.chosen, Some(0));
    /// assert_eq!(counters.len(), 2);
    /// ```
    pub fn remove_selected<F>(&self, selector: F) -> Selection<T>
    where
        F: FnOnce(&[T]) -> Option<T>,
    {
        let mut items = self.items.write();
        let Some(chosen) = selector(items.as_slice()) else {
            tracing::trace!(label = %self.label, "selector chose nothing");
            return Selection::no_match();
        };
        let matched = match items.iter().position(|item| *item == chosen) {
            Some(index) => {
                items.remove(index);
                true
            }
            None => false,
        };
        tracing::trace!(label = %self.label, matched, "selector removal");
        Selection {
            matched,
            chosen: Some(chosen),
        }
    }
}

impl<T> Default for GuardedSequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for GuardedSequence<T> {
    fn clone(&self) -> Self {
        Self::from_parts(self.to_vec(), self.label.clone())
    }
}

impl<T: fmt::Debug> fmt::Debug for GuardedSequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardedSequence")
            .field("label", &self.label)
            .field("items", &*self.items.read())
            .finish()
    }
}

impl<T> From<Vec<T>> for GuardedSequence<T> {
    fn from(values: Vec<T>) -> Self {
        Self::from_parts(values, DEFAULT_LABEL.to_owned())
    }
}

impl<T> FromIterator<T> for GuardedSequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<T: Clone> IntoIterator for &GuardedSequence<T> {
    type Item = T;
    type IntoIter = Snapshot<T>;

    fn into_iter(self) -> Snapshot<T> {
        self.snapshot()
    }
}
