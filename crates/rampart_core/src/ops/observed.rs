//! # Observed Sequence
//!
//! Decorator that reports successful mutations of any [`SequenceOps`]
//! implementor to a [`ChangeObserver`].
//!
//! Observers run after the inner operation returns, outside its lock. Each
//! event describes a mutation that really happened, but events from
//! concurrent writers may reach the observer in a different order than the
//! mutations were applied.

use std::marker::PhantomData;

use parking_lot::Mutex;

use super::SequenceOps;
use crate::error::SequenceResult;
use crate::sequence::{Selection, Snapshot};

/// A mutation applied to a sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceChange<T> {
    /// Value appended at the end.
    Pushed(T),
    /// Value inserted before `index`.
    Inserted {
        /// Insertion position.
        index: usize,
        /// The inserted value.
        value: T,
    },
    /// Element at `index` replaced.
    Replaced {
        /// Position of the replaced element.
        index: usize,
        /// Value that was there before.
        previous: T,
        /// Value now stored.
        value: T,
    },
    /// Element removed by value or by selector, as it was stored.
    Removed(T),
    /// Element removed by position.
    RemovedAt {
        /// Position it was removed from.
        index: usize,
        /// The removed value.
        value: T,
    },
    /// Every element removed by `clear`.
    Cleared {
        /// How many elements were dropped.
        removed: usize,
    },
    /// Every element removed and handed out by `drain_all`.
    Drained(Vec<T>),
}

/// Receives change events from an [`ObservedSequence`].
///
/// Implemented for any `Fn(&SequenceChange<T>) + Send + Sync` closure.
pub trait ChangeObserver<T>: Send + Sync {
    /// Called once per successful mutation.
    fn on_change(&self, change: &SequenceChange<T>);
}

impl<T, F> ChangeObserver<T> for F
where
    F: Fn(&SequenceChange<T>) + Send + Sync,
{
    fn on_change(&self, change: &SequenceChange<T>) {
        self(change);
    }
}

/// Observer that buffers events until they are drained.
///
/// Events arrive in notification order, which under concurrent writers is
/// not always mutation order. Replaying the log of a sequence shared
/// between writers can therefore rebuild a different state; positional
/// events (`Inserted`, `RemovedAt`, `Replaced`) are the ones affected.
#[derive(Debug)]
pub struct ChangeLog<T> {
    events: Mutex<Vec<SequenceChange<T>>>,
}

impl<T> ChangeLog<T> {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    /// Takes every buffered event, oldest first.
    #[must_use]
    pub fn drain_events(&self) -> Vec<SequenceChange<T>> {
        std::mem::take(&mut *self.events.lock())
    }

    /// Number of buffered events.
    #[must_use]
    pub fn pending_event_count(&self) -> usize {
        self.events.lock().len()
    }
}

impl<T> Default for ChangeLog<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send> ChangeObserver<T> for ChangeLog<T> {
    fn on_change(&self, change: &SequenceChange<T>) {
        self.events.lock().push(change.clone());
    }
}

/// Wraps a sequence and reports every successful mutation.
///
/// Reads pass straight through. Failed mutations and mutations that change
/// nothing (a miss in `remove_value`, `clear` on an empty sequence) report
/// nothing.
///
/// ## Usage
///
/// ```rust
/// use rampart_core::{ChangeLog, GuardedSequence, ObservedSequence, SequenceChange, SequenceOps};
///
/// let observed = ObservedSequence::new(GuardedSequence::<&str>::new(), ChangeLog::new());
/// observed.push("a");
/// observed.push("b");
/// assert!(observed.remove_value(&"a"));
///
/// assert_eq!(
///     observed.observer().drain_events(),
///     vec![
///         SequenceChange::Pushed("a"),
///         SequenceChange::Pushed("b"),
///         SequenceChange::Removed("a"),
///     ]
/// );
/// ```
#[derive(Debug)]
pub struct ObservedSequence<T, S, O> {
    inner: S,
    observer: O,
    _marker: PhantomData<fn() -> T>,
}

impl<T, S, O> ObservedSequence<T, S, O>
where
    S: SequenceOps<T>,
    O: ChangeObserver<T>,
{
    /// Wraps `inner`, reporting to `observer`.
    #[must_use]
    pub fn new(inner: S, observer: O) -> Self {
        Self {
            inner,
            observer,
            _marker: PhantomData,
        }
    }

    /// The wrapped sequence. Mutations made through it are not reported.
    #[inline]
    #[must_use]
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// The observer.
    #[inline]
    #[must_use]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Splits into the wrapped sequence and the observer.
    #[must_use]
    pub fn into_parts(self) -> (S, O) {
        (self.inner, self.observer)
    }

    fn notify(&self, change: &SequenceChange<T>) {
        self.observer.on_change(change);
    }
}

impl<T, S, O> SequenceOps<T> for ObservedSequence<T, S, O>
where
    T: Clone,
    S: SequenceOps<T>,
    O: ChangeObserver<T>,
{
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    fn get(&self, index: usize) -> SequenceResult<T> {
        self.inner.get(index)
    }

    fn set(&self, index: usize, value: T) -> SequenceResult<T> {
        let previous = self.inner.set(index, value.clone())?;
        self.notify(&SequenceChange::Replaced {
            index,
            previous: previous.clone(),
            value,
        });
        Ok(previous)
    }

    fn push(&self, value: T) {
        self.inner.push(value.clone());
        self.notify(&SequenceChange::Pushed(value));
    }

    fn insert(&self, index: usize, value: T) -> SequenceResult<()> {
        self.inner.insert(index, value.clone())?;
        self.notify(&SequenceChange::Inserted { index, value });
        Ok(())
    }

    fn clear(&self) {
        // Drain so the count comes from the same exclusive acquisition.
        let removed = self.inner.drain_all().len();
        if removed > 0 {
            self.notify(&SequenceChange::Cleared { removed });
        }
    }

    fn contains(&self, value: &T) -> bool {
        self.inner.contains(value)
    }

    fn index_of(&self, value: &T) -> Option<usize> {
        self.inner.index_of(value)
    }

    fn copy_into(&self, dest: &mut [T], offset: usize) -> SequenceResult<()> {
        self.inner.copy_into(dest, offset)
    }

    fn take_value(&self, value: &T) -> Option<T> {
        let removed = self.inner.take_value(value)?;
        self.notify(&SequenceChange::Removed(removed.clone()));
        Some(removed)
    }

    fn remove_selected<F>(&self, selector: F) -> Selection<T>
    where
        F: FnOnce(&[T]) -> Option<T>,
    {
        let selection = self.inner.remove_selected(selector);
        if let Some(chosen) = selection.chosen.as_ref().filter(|_| selection.matched) {
            self.notify(&SequenceChange::Removed(chosen.clone()));
        }
        selection
    }

    fn take_at(&self, index: usize) -> SequenceResult<T> {
        let value = self.inner.take_at(index)?;
        self.notify(&SequenceChange::RemovedAt {
            index,
            value: value.clone(),
        });
        Ok(value)
    }

    fn drain_all(&self) -> Vec<T> {
        let drained = self.inner.drain_all();
        if !drained.is_empty() {
            self.notify(&SequenceChange::Drained(drained.clone()));
        }
        drained
    }

    fn snapshot(&self) -> Snapshot<T> {
        self.inner.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::GuardedSequence;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn observed() -> ObservedSequence<i32, GuardedSequence<i32>, ChangeLog<i32>> {
        ObservedSequence::new(GuardedSequence::new(), ChangeLog::new())
    }

    #[test]
    fn test_reports_each_mutation() {
        let seq = observed();
        seq.push(1);
        seq.push(3);
        seq.insert(1, 2).unwrap();
        assert_eq!(seq.set(0, 10).unwrap(), 1);
        assert_eq!(seq.take_at(2).unwrap(), 3);

        assert_eq!(
            seq.observer().drain_events(),
            vec![
                SequenceChange::Pushed(1),
                SequenceChange::Pushed(3),
                SequenceChange::Inserted { index: 1, value: 2 },
                SequenceChange::Replaced {
                    index: 0,
                    previous: 1,
                    value: 10,
                },
                SequenceChange::RemovedAt { index: 2, value: 3 },
            ]
        );
        assert_eq!(seq.snapshot().collect::<Vec<_>>(), vec![10, 2]);
    }

    #[test]
    fn test_failures_and_misses_are_silent() {
        let seq = observed();
        assert!(seq.insert(1, 5).is_err());
        assert!(seq.set(0, 5).is_err());
        assert!(seq.take_at(0).is_err());
        assert!(seq.remove_at(0).is_err());
        assert!(!seq.remove_value(&5));
        seq.clear();
        assert!(seq.drain_all().is_empty());
        assert!(!seq.remove_selected(|_| Some(5)).matched);
        assert_eq!(seq.observer().pending_event_count(), 0);
    }

    #[test]
    fn test_removals() {
        let seq = observed();
        for v in [1, 2, 3, 4, 5] {
            seq.push(v);
        }
        let _ = seq.observer().drain_events();

        assert!(seq.remove_value(&2));
        let picked = seq.remove_selected(|items| items.iter().copied().find(|&v| v > 3));
        assert_eq!(picked.removed(), Some(4));
        seq.remove_at(0).unwrap();

        assert_eq!(
            seq.observer().drain_events(),
            vec![
                SequenceChange::Removed(2),
                SequenceChange::Removed(4),
                SequenceChange::RemovedAt { index: 0, value: 1 },
            ]
        );
    }

    #[test]
    fn test_value_removal_reports_stored_element() {
        // Case-insensitive equality, so query and stored text differ
        #[derive(Debug, Clone)]
        struct Name(&'static str);

        impl PartialEq for Name {
            fn eq(&self, other: &Self) -> bool {
                self.0.eq_ignore_ascii_case(other.0)
            }
        }

        let seq = ObservedSequence::new(GuardedSequence::<Name>::new(), ChangeLog::new());
        seq.push(Name("Alice"));
        seq.push(Name("Bob"));
        let _ = seq.observer().drain_events();

        assert!(seq.remove_value(&Name("ALICE")));
        assert_eq!(seq.take_value(&Name("bob")).map(|n| n.0), Some("Bob"));

        let removed: Vec<_> = seq
            .observer()
            .drain_events()
            .into_iter()
            .map(|event| match event {
                SequenceChange::Removed(name) => name.0,
                other => panic!("unexpected event {other:?}"),
            })
            .collect();
        assert_eq!(removed, vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_clear_and_drain_report_counts() {
        let seq = observed();
        seq.push(1);
        seq.push(2);
        seq.clear();
        seq.push(3);
        assert_eq!(seq.drain_all(), vec![3]);

        let events = seq.observer().drain_events();
        assert_eq!(events[2], SequenceChange::Cleared { removed: 2 });
        assert_eq!(events[4], SequenceChange::Drained(vec![3]));
        assert!(seq.is_empty());
    }

    #[test]
    fn test_reads_pass_through() {
        let seq = ObservedSequence::new(GuardedSequence::from(vec![4, 5, 6]), ChangeLog::<i32>::new());
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.get(1).unwrap(), 5);
        assert!(seq.contains(&6));
        assert_eq!(seq.index_of(&4), Some(0));
        let mut dest = [0; 3];
        seq.copy_into(&mut dest, 0).unwrap();
        assert_eq!(dest, [4, 5, 6]);
        assert_eq!(seq.observer().pending_event_count(), 0);
    }

    #[test]
    fn test_closure_observer() {
        let pushes = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&pushes);
        let seq = ObservedSequence::new(
            GuardedSequence::<u8>::new(),
            move |change: &SequenceChange<u8>| {
                if matches!(change, SequenceChange::Pushed(_)) {
                    counter.fetch_add(1, Ordering::Relaxed);
                }
            },
        );
        seq.push(1);
        seq.push(2);
        seq.clear();
        assert_eq!(pushes.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn test_shared_inner_bypasses_observer() {
        let shared = Arc::new(GuardedSequence::<i32>::new());
        let seq = ObservedSequence::new(Arc::clone(&shared), ChangeLog::<i32>::new());
        seq.push(1);
        shared.push(2);
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.observer().drain_events(), vec![SequenceChange::Pushed(1)]);

        let (inner, _log) = seq.into_parts();
        assert_eq!(inner.to_vec(), vec![1, 2]);
    }
}
