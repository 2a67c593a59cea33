//! # Snapshot Iteration
//!
//! Owned iterator over a copy taken under a momentary read guard.

use std::iter::FusedIterator;
use std::vec;

/// Iterator over an independent copy of a sequence's contents.
///
/// Holds no lock and shares nothing with the container it came from, so
/// later writes to that container are never observed. Ask the container
/// for a new snapshot to see fresh contents.
#[derive(Debug, Clone)]
pub struct Snapshot<T> {
    items: vec::IntoIter<T>,
}

impl<T> Snapshot<T> {
    pub(crate) fn new(items: Vec<T>) -> Self {
        Self {
            items: items.into_iter(),
        }
    }

    /// Elements not yet yielded.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        self.items.as_slice()
    }
}

impl<T> Iterator for Snapshot<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.items.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl<T> DoubleEndedIterator for Snapshot<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.items.next_back()
    }
}

impl<T> ExactSizeIterator for Snapshot<T> {}

impl<T> FusedIterator for Snapshot<T> {}
