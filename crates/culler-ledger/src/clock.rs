//! Wall-clock time source for idle accounting

use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time in seconds since the Unix epoch
///
/// Both activity stamping and the sweep's idle arithmetic read this clock, so
/// the two always agree at seconds granularity. Wall clock, not monotonic:
/// idle durations survive process restarts, at the cost of being exposed to
/// manual clock changes.
pub fn epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
