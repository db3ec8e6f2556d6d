//! Culler Activity Ledger
//!
//! The single source of truth for "when was member X last active."
//!
//! # Architecture
//!
//! - [`ActivityLedger`]: an in-memory map from [`MemberId`](culler_domain::MemberId)
//!   to last-activity time in seconds since the Unix epoch
//! - Plain-text persistence: one `<identity> <timestamp>` record per line,
//!   malformed lines skipped, missing file treated as no prior state
//! - [`SharedLedger`]: the mutex-guarded handle shared between the sweep task
//!   and the host's activity-event path
//!
//! Ledger operations never block on I/O and never suspend; the persisted
//! file is touched only at load (startup) and save (shutdown or an explicit
//! checkpoint).
//!
//! # Examples
//!
//! ```
//! use culler_domain::MemberId;
//! use culler_ledger::ActivityLedger;
//!
//! let mut ledger = ActivityLedger::new();
//! ledger.touch(MemberId::new(7));
//! assert_eq!(ledger.len(), 1);
//! ```

#![warn(missing_docs)]

mod clock;
mod ledger;
mod persist;
mod shared;

pub use clock::epoch_secs;
pub use ledger::ActivityLedger;
pub use persist::LedgerError;
pub use shared::SharedLedger;
