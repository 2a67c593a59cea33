//! # RAMPART Core
//!
//! An ordered, index-addressable list shared between worker threads:
//! - Any number of concurrent readers
//! - Exactly one writer at a time, never alongside readers
//! - Enumeration over snapshots, so iteration never holds the lock
//!
//! ## Architecture Rules
//!
//! 1. **One lock** - every operation goes through a single reader/writer guard
//! 2. **Scoped release** - guards drop on every exit path, including errors
//! 3. **No raw handles** - the backing storage never leaves the container
//!
//! ## Example
//!
//! ```rust
//! use rampart_core::GuardedSequence;
//!
//! let jobs = GuardedSequence::from(vec![1, 2, 3, 4, 5]);
//!
//! // Find-and-remove runs under one exclusive acquisition
//! let picked = jobs.remove_selected(|items| items.iter().copied().find(|&j| j > 3));
//! assert!(picked.matched);
//! assert_eq!(picked.chosen, Some(4));
//! assert_eq!(jobs.to_vec(), vec![1, 2, 3, 5]);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod config;
pub mod error;
pub mod ops;
pub mod sequence;

pub use config::{ConfigError, SequenceConfig};
pub use error::{ErrorKind, SequenceError, SequenceResult};
pub use ops::{ChangeLog, ChangeObserver, ObservedSequence, SequenceChange, SequenceOps};
pub use sequence::{GuardedSequence, Selection, Snapshot};
