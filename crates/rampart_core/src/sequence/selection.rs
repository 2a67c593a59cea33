//! Outcome of a selector-driven removal.

/// Result of [`GuardedSequence::remove_selected`](crate::GuardedSequence::remove_selected).
///
/// `chosen` is whatever the selector returned. `matched` is true only when
/// the selector chose a value and an equal element was found and removed.
/// A chosen value equal to `T::default()` is treated like any other value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Selection<T> {
    /// Whether an element was removed.
    pub matched: bool,
    /// The selector's choice, `None` if it reported no match.
    pub chosen: Option<T>,
}

impl<T> Selection<T> {
    /// The selector chose nothing.
    #[inline]
    pub const fn no_match() -> Self {
        Self {
            matched: false,
            chosen: None,
        }
    }

    /// Returns the removed value, or `None` if nothing was removed.
    #[inline]
    #[must_use]
    pub fn removed(self) -> Option<T> {
        if self.matched {
            self.chosen
        } else {
            None
        }
    }
}
