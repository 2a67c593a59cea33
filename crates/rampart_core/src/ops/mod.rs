//! # Sequence Capabilities
//!
//! [`SequenceOps`] is the full operation set of a guarded sequence as a
//! trait. Extensions wrap an implementor instead of overriding its methods:
//!
//! ```text
//! SequenceOps defines:        Extensions wrap:
//! ┌──────────────────┐        ┌──────────────────────────────┐
//! │ trait SequenceOps│ ←───── │ ObservedSequence<T, S, O>    │
//! └──────────────────┘        │   inner: S: SequenceOps<T>   │
//!          ▲                  │   observer: O                │
//!          │                  └──────────────────────────────┘
//! GuardedSequence<T>
//! ```

mod observed;

pub use observed::{ChangeLog, ChangeObserver, ObservedSequence, SequenceChange};

use std::sync::Arc;

use crate::error::SequenceResult;
use crate::sequence::{GuardedSequence, Selection, Snapshot};

/// Operations of an ordered, index-addressable, thread-safe sequence.
///
/// All methods take `&self`; implementors synchronize internally. Method
/// contracts match the inherent methods of [`GuardedSequence`].
pub trait SequenceOps<T> {
    /// Current element count.
    fn len(&self) -> usize;

    /// Whether the sequence is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a clone of the element at `index`.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `index >= len`.
    fn get(&self, index: usize) -> SequenceResult<T>;

    /// Replaces the element at `index`, returning the previous one.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `index >= len`.
    fn set(&self, index: usize, value: T) -> SequenceResult<T>;

    /// Appends `value`.
    fn push(&self, value: T);

    /// Inserts `value` before `index`.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `index > len`.
    fn insert(&self, index: usize, value: T) -> SequenceResult<()>;

    /// Removes every element.
    fn clear(&self);

    /// Whether some element equals `value`.
    fn contains(&self, value: &T) -> bool;

    /// Index of the first element equal to `value`.
    fn index_of(&self, value: &T) -> Option<usize>;

    /// Clones the whole sequence into `dest` from `offset`.
    ///
    /// # Errors
    ///
    /// `DestinationTooSmall` if it does not fit.
    fn copy_into(&self, dest: &mut [T], offset: usize) -> SequenceResult<()>;

    /// Removes the first element equal to `value`.
    fn remove_value(&self, value: &T) -> bool {
        self.take_value(value).is_some()
    }

    /// Removes and returns the first element equal to `value`.
    fn take_value(&self, value: &T) -> Option<T>;

    /// Atomically chooses an element with `selector` and removes it.
    fn remove_selected<F>(&self, selector: F) -> Selection<T>
    where
        F: FnOnce(&[T]) -> Option<T>;

    /// Removes the element at `index`.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `index >= len`.
    fn remove_at(&self, index: usize) -> SequenceResult<()> {
        self.take_at(index).map(drop)
    }

    /// Removes and returns the element at `index`.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `index >= len`.
    fn take_at(&self, index: usize) -> SequenceResult<T>;

    /// Removes and returns every element in order.
    fn drain_all(&self) -> Vec<T>;

    /// Independent copy of the current contents.
    fn snapshot(&self) -> Snapshot<T>;
}

impl<T: Clone + PartialEq> SequenceOps<T> for GuardedSequence<T> {
    fn len(&self) -> usize {
        GuardedSequence::len(self)
    }

    fn is_empty(&self) -> bool {
        GuardedSequence::is_empty(self)
    }

    fn get(&self, index: usize) -> SequenceResult<T> {
        GuardedSequence::get(self, index)
    }

    fn set(&self, index: usize, value: T) -> SequenceResult<T> {
        GuardedSequence::set(self, index, value)
    }

    fn push(&self, value: T) {
        GuardedSequence::push(self, value);
    }

    fn insert(&self, index: usize, value: T) -> SequenceResult<()> {
        GuardedSequence::insert(self, index, value)
    }

    fn clear(&self) {
        GuardedSequence::clear(self);
    }

    fn contains(&self, value: &T) -> bool {
        GuardedSequence::contains(self, value)
    }

    fn index_of(&self, value: &T) -> Option<usize> {
        GuardedSequence::index_of(self, value)
    }

    fn copy_into(&self, dest: &mut [T], offset: usize) -> SequenceResult<()> {
        GuardedSequence::copy_into(self, dest, offset)
    }

    fn remove_value(&self, value: &T) -> bool {
        GuardedSequence::remove_value(self, value)
    }

    fn take_value(&self, value: &T) -> Option<T> {
        GuardedSequence::take_value(self, value)
    }

    fn remove_selected<F>(&self, selector: F) -> Selection<T>
    where
        F: FnOnce(&[T]) -> Option<T>,
    {
        GuardedSequence::remove_selected(self, selector)
    }

    fn remove_at(&self, index: usize) -> SequenceResult<()> {
        GuardedSequence::remove_at(self, index)
    }

    fn take_at(&self, index: usize) -> SequenceResult<T> {
        GuardedSequence::take_at(self, index)
    }

    fn drain_all(&self) -> Vec<T> {
        GuardedSequence::drain_all(self)
    }

    fn snapshot(&self) -> Snapshot<T> {
        GuardedSequence::snapshot(self)
    }
}

impl<T, S: SequenceOps<T> + ?Sized> SequenceOps<T> for Arc<S> {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }

    fn get(&self, index: usize) -> SequenceResult<T> {
        (**self).get(index)
    }

    fn set(&self, index: usize, value: T) -> SequenceResult<T> {
        (**self).set(index, value)
    }

    fn push(&self, value: T) {
        (**self).push(value);
    }

    fn insert(&self, index: usize, value: T) -> SequenceResult<()> {
        (**self).insert(index, value)
    }

    fn clear(&self) {
        (**self).clear();
    }

    fn contains(&self, value: &T) -> bool {
        (**self).contains(value)
    }

    fn index_of(&self, value: &T) -> Option<usize> {
        (**self).index_of(value)
    }

    fn copy_into(&self, dest: &mut [T], offset: usize) -> SequenceResult<()> {
        (**self).copy_into(dest, offset)
    }

    fn remove_value(&self, value: &T) -> bool {
        (**self).remove_value(value)
    }

    fn take_value(&self, value: &T) -> Option<T> {
        (**self).take_value(value)
    }

    fn remove_selected<F>(&self, selector: F) -> Selection<T>
    where
        F: FnOnce(&[T]) -> Option<T>,
    {
        (**self).remove_selected(selector)
    }

    fn remove_at(&self, index: usize) -> SequenceResult<()> {
        (**self).remove_at(index)
    }

    fn take_at(&self, index: usize) -> SequenceResult<T> {
        (**self).take_at(index)
    }

    fn drain_all(&self) -> Vec<T> {
        (**self).drain_all()
    }

    fn snapshot(&self) -> Snapshot<T> {
        (**self).snapshot()
    }
}
