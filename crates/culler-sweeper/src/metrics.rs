//! Metrics collection for sweep operations

/// Metrics collected across sweep passes
///
/// Tracks members reclaimed, protected, dropped as vanished, and discovered,
/// plus pass counts and accumulated runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepMetrics {
    /// Idle members destroyed and dropped from the ledger
    pub reclaimed: usize,

    /// Idle members left alone because they were occupied (timestamp refreshed)
    pub protected: usize,

    /// Ledger entries dropped because the member no longer resolves
    pub vanished: usize,

    /// Newly observed members stamped with a fresh idle clock
    pub discovered: usize,

    /// Stale entries purged by the one-time startup reconciliation
    pub purged_at_startup: usize,

    /// Total sweep passes completed
    pub sweep_count: usize,

    /// Total runtime spent inside sweep passes, in seconds
    pub total_runtime_secs: u64,
}

impl SweepMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a reclaimed member
    pub fn record_reclaimed(&mut self) {
        self.reclaimed += 1;
    }

    /// Record an occupancy-protected refresh
    pub fn record_protected(&mut self) {
        self.protected += 1;
    }

    /// Record a vanished-member entry drop
    pub fn record_vanished(&mut self) {
        self.vanished += 1;
    }

    /// Record a newly discovered member
    pub fn record_discovered(&mut self) {
        self.discovered += 1;
    }

    /// Record entries purged during startup reconciliation
    pub fn record_purged(&mut self, count: usize) {
        self.purged_at_startup += count;
    }

    /// Record a sweep pass completion
    pub fn record_sweep(&mut self) {
        self.sweep_count += 1;
    }

    /// Total ledger entries dropped, for any reason
    pub fn total_removed(&self) -> usize {
        self.reclaimed + self.vanished + self.purged_at_startup
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let lines = vec![
            format!("Sweep Metrics Summary"),
            format!("====================="),
            format!("Sweep passes: {}", self.sweep_count),
            format!("Total runtime: {}s", self.total_runtime_secs),
            format!(""),
            format!("Reclaimed (idle, destroyed): {}", self.reclaimed),
            format!("Protected (occupied, refreshed): {}", self.protected),
            format!("Vanished (entry dropped): {}", self.vanished),
            format!("Discovered (new members): {}", self.discovered),
            format!("Purged at startup: {}", self.purged_at_startup),
            format!("Total entries dropped: {}", self.total_removed()),
        ];

        lines.join("\n")
    }
}
