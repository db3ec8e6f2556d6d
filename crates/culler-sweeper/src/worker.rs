//! Background worker for continuous sweep operation

use crate::{SharedConfig, SweepMetrics, Sweeper, SweeperConfig};
use culler_domain::{DestroyAction, OccupancyProbe, PoolSource};
use culler_ledger::SharedLedger;
use std::time::Duration;
use tokio::sync::watch;

/// Background worker that runs the sweeper on a schedule
///
/// Runs forever once started: it waits for the pool to become ready, performs
/// the one-time startup reconciliation after a short settling delay, then
/// sweeps at the configured cadence until the shutdown signal fires.
///
/// Every delay races the shutdown receiver, so cancellation interrupts an
/// in-progress sleep instead of waiting it out. The cadence is re-read from
/// the shared configuration after every pass, so configuration changes take
/// effect without a restart.
///
/// # Examples
///
/// ```no_run
/// use culler_ledger::SharedLedger;
/// use culler_sweeper::{SweepWorker, SweeperConfig};
/// use tokio::sync::watch;
/// # use culler_domain::{DestroyAction, MemberId, OccupancyProbe, PoolSource};
/// # struct Host;
/// # impl PoolSource for Host {
/// #     type Member = ();
/// #     fn is_ready(&self) -> bool { true }
/// #     fn resolve(&self, _: MemberId) -> Option<()> { None }
/// #     fn all_members(&self) -> Vec<(MemberId, ())> { Vec::new() }
/// #     fn is_dead(&self, _: &()) -> bool { false }
/// # }
/// # impl OccupancyProbe<()> for Host {
/// #     fn is_occupied(&self, _: &()) -> bool { false }
/// # }
/// # impl DestroyAction<()> for Host {
/// #     fn destroy(&self, _: &()) {}
/// # }
///
/// #[tokio::main]
/// async fn main() {
///     let host = Host;
///     let ledger = SharedLedger::new();
///     let (shutdown_tx, shutdown_rx) = watch::channel(false);
///     let mut worker = SweepWorker::with_config(SweeperConfig::default());
///
///     // Run until shutdown_tx fires
///     worker.run(ledger, &host, &host, &host, shutdown_rx).await;
///     # drop(shutdown_tx);
/// }
/// ```
pub struct SweepWorker {
    sweeper: Sweeper,
    config: SharedConfig,
}

impl SweepWorker {
    /// Create a new worker reading the given shared configuration
    pub fn new(config: SharedConfig) -> Self {
        Self {
            sweeper: Sweeper::new(config.clone()),
            config,
        }
    }

    /// Create a worker with a fixed configuration
    pub fn with_config(config: SweeperConfig) -> Self {
        Self::new(config.into_shared())
    }

    /// Get a reference to the worker's current metrics
    pub fn metrics(&self) -> &SweepMetrics {
        self.sweeper.metrics()
    }

    /// Reset the worker's metrics counters
    pub fn reset_metrics(&mut self) {
        self.sweeper.reset_metrics();
    }

    /// Run the worker until the shutdown signal fires
    pub async fn run<P, O, D>(
        &mut self,
        ledger: SharedLedger,
        pool: &P,
        occupancy: &O,
        destroy: &D,
        mut shutdown: watch::Receiver<bool>,
    ) where
        P: PoolSource,
        O: OccupancyProbe<P::Member>,
        D: DestroyAction<P::Member>,
    {
        self.run_inner(&ledger, pool, occupancy, destroy, &mut shutdown, None)
            .await;
    }

    /// Run for at most `cycles` sweep passes (useful for testing)
    ///
    /// The startup phases (pool wait, settling delay, reconciliation) run
    /// exactly as in [`run`](Self::run); only the steady-state loop is
    /// bounded.
    pub async fn run_cycles<P, O, D>(
        &mut self,
        ledger: SharedLedger,
        pool: &P,
        occupancy: &O,
        destroy: &D,
        mut shutdown: watch::Receiver<bool>,
        cycles: usize,
    ) where
        P: PoolSource,
        O: OccupancyProbe<P::Member>,
        D: DestroyAction<P::Member>,
    {
        if cycles == 0 {
            return;
        }
        self.run_inner(&ledger, pool, occupancy, destroy, &mut shutdown, Some(cycles))
            .await;
    }

    async fn run_inner<P, O, D>(
        &mut self,
        ledger: &SharedLedger,
        pool: &P,
        occupancy: &O,
        destroy: &D,
        shutdown: &mut watch::Receiver<bool>,
        cycles: Option<usize>,
    ) where
        P: PoolSource,
        O: OccupancyProbe<P::Member>,
        D: DestroyAction<P::Member>,
    {
        tracing::info!("Sweep worker started");

        // Wait for the pool to come up before touching anything.
        while !pool.is_ready() {
            let poll = self.config.get().check_interval();
            if sleep_or_shutdown(poll, shutdown).await {
                tracing::info!("Shutdown requested before pool became ready");
                return;
            }
        }

        // One-time startup reconciliation, after a settling delay so the pool
        // has finished populating.
        let delay = self.config.get().startup_delay();
        if sleep_or_shutdown(delay, shutdown).await {
            tracing::info!("Shutdown requested during startup delay");
            return;
        }

        let purged = self.sweeper.reconcile(ledger, pool);
        tracing::info!(purged, "Startup reconciliation complete");

        // Steady-state loop.
        let mut completed = 0usize;
        loop {
            let metrics = self.sweeper.sweep(ledger, pool, occupancy, destroy);
            tracing::debug!(
                reclaimed = metrics.reclaimed,
                protected = metrics.protected,
                vanished = metrics.vanished,
                discovered = metrics.discovered,
                "Sweep pass complete"
            );

            completed += 1;
            if let Some(cycles) = cycles {
                if completed >= cycles {
                    break;
                }
            }

            let interval = self.config.get().check_interval();
            if sleep_or_shutdown(interval, shutdown).await {
                break;
            }
        }

        tracing::info!(
            "Sweep worker stopped. Final metrics:\n{}",
            self.sweeper.metrics().summary()
        );
    }
}

/// Suspend for `duration` unless shutdown is requested first
///
/// Returns true if shutdown was requested, either before the suspension or
/// while it was in progress. A closed channel counts as shutdown.
async fn sleep_or_shutdown(duration: Duration, shutdown: &mut watch::Receiver<bool>) -> bool {
    if *shutdown.borrow() {
        return true;
    }

    tokio::select! {
        _ = tokio::time::sleep(duration) => false,
        _ = shutdown.changed() => true,
    }
}
