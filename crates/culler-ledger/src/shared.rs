//! Mutex-guarded ledger handle shared between the sweep task and event paths

use crate::ledger::ActivityLedger;
use culler_domain::MemberId;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Cloneable, thread-safe handle to an [`ActivityLedger`]
///
/// The original host ran activity callbacks and the sweep on one cooperative
/// scheduler, so its ledger mutations could never race. Under preemptive
/// threads that guarantee has to be made explicit: a single mutex guards
/// every mutation and every read. No ledger operation suspends, so the lock
/// is only ever held for the duration of one map operation.
///
/// # Examples
///
/// ```
/// use culler_domain::MemberId;
/// use culler_ledger::SharedLedger;
///
/// let ledger = SharedLedger::new();
/// ledger.touch(MemberId::new(3));
/// assert_eq!(ledger.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedLedger {
    inner: Arc<Mutex<ActivityLedger>>,
}

impl SharedLedger {
    /// Create a handle to a new empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing ledger (e.g. one restored from persisted storage)
    pub fn from_ledger(ledger: ActivityLedger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ActivityLedger> {
        // A panic while holding the lock leaves the map itself intact, so
        // recover the guard rather than wedging every later sweep.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record the current time as `id`'s last-activity timestamp
    pub fn touch(&self, id: MemberId) {
        self.lock().touch(id);
    }

    /// Record an explicit last-activity timestamp for `id`
    pub fn touch_at(&self, id: MemberId, timestamp: u64) {
        self.lock().touch_at(id, timestamp);
    }

    /// Record a timestamp for `id` only if no entry exists yet
    pub fn observe(&self, id: MemberId, timestamp: u64) -> bool {
        self.lock().observe(id, timestamp)
    }

    /// Delete the entry for `id` if present
    pub fn remove(&self, id: MemberId) -> bool {
        self.lock().remove(id)
    }

    /// Last-activity timestamp for `id`, if tracked
    pub fn get(&self, id: MemberId) -> Option<u64> {
        self.lock().get(id)
    }

    /// Detached snapshot of all entries
    pub fn entries(&self) -> Vec<(MemberId, u64)> {
        self.lock().entries()
    }

    /// Number of tracked members
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the ledger tracks no members
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Replace the ledger's contents wholesale
    ///
    /// Used at startup to swap in the state restored from persisted storage.
    pub fn replace(&self, ledger: ActivityLedger) {
        *self.lock() = ledger;
    }

    /// Clone the current ledger state, e.g. for saving
    pub fn snapshot(&self) -> ActivityLedger {
        self.lock().clone()
    }
}
