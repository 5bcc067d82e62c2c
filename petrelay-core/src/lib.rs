//! Core library for Pet Relay.
//!
//! Scanners submit findings keyed by a `(jobId, placeId)` pair and notifiers
//! poll for whatever is still live. Everything with lifecycle rules lives in
//! [`FindingsStore`]: replace-by-key on submit, time-based expiry, and a hard
//! capacity bound, both enforced lazily when the store is read.
//!
//! The crate performs no I/O. Transport layers own a single store behind an
//! `Arc` and call [`FindingsStore::submit`], [`FindingsStore::list`],
//! [`FindingsStore::stats`] and [`FindingsStore::clear`].

pub mod clock;
pub mod error;
pub mod finding;
pub mod stats;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{Result, StoreError, ValidationError};
pub use finding::{Finding, FindingKey, Rate, SubmitFinding};
pub use stats::{FindingStats, PetCount, TOP_PETS_LIMIT};
pub use store::{
    Compaction, FINDING_TTL_MS, FindingsSnapshot, FindingsStore, MAX_FINDINGS,
    StoreLimits, SubmitOutcome, compact,
};
