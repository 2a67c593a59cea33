//! # Guarded Sequence
//!
//! One ordered list, one reader/writer lock.
//!
//! ```text
//!   readers (shared)                 writers (exclusive)
//!   len/get/contains/index_of        push/insert/set/remove*/clear/drain_all
//!   copy_into/snapshot                        │
//!        │                                    │
//!        └──────────────┬─────────────────────┘
//!                       ▼
//!            ┌──────────────────────┐
//!            │ RwLock<Vec<T>>       │
//!            └──────────┬───────────┘
//!                       │ clone under a momentary read guard
//!                       ▼
//!            ┌──────────────────────┐
//!            │ Snapshot<T>          │  iterated with no lock held
//!            └──────────────────────┘
//! ```
//!
//! Index checks always use the length seen under the same guard that
//! performs the access.

mod guarded;
mod selection;
mod snapshot;

pub use guarded::GuardedSequence;
pub use selection::Selection;
pub use snapshot::Snapshot;
