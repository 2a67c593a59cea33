//! # Sequence Error Types
//!
//! All errors a guarded sequence can return. Misses (nothing to remove,
//! value not found) are not errors and are reported through `bool` and
//! `Option` results instead.

use thiserror::Error;

/// Errors that can occur when operating on a guarded sequence.
///
/// Both variants are raised before the sequence (or the copy destination)
/// is touched, so a failed call never leaves a partial mutation behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    /// Index outside `[0, len)`, or outside `[0, len]` for insertion.
    #[error("index {index} out of range for sequence of length {len}")]
    OutOfRange {
        /// The rejected index.
        index: usize,
        /// Length observed under the same lock acquisition.
        len: usize,
    },

    /// Copy destination cannot hold the whole sequence at the given offset.
    #[error("destination too small: {required} elements at offset {offset} into capacity {capacity}")]
    DestinationTooSmall {
        /// Requested start offset in the destination.
        offset: usize,
        /// Number of elements that had to be copied.
        required: usize,
        /// Total length of the destination.
        capacity: usize,
    },
}

/// Coarse classification of a [`SequenceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An index argument was outside the valid range.
    OutOfRange,
    /// A non-index argument was unusable.
    InvalidArgument,
}

impl SequenceError {
    /// Returns the error class.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::OutOfRange { .. } => ErrorKind::OutOfRange,
            Self::DestinationTooSmall { .. } => ErrorKind::InvalidArgument,
        }
    }
}

/// Result type for sequence operations.
pub type SequenceResult<T> = Result<T, SequenceError>;
