//! Host-facing lifecycle facade
//!
//! The original system shipped two near-identical plugins for two host
//! frameworks; everything either plugin did beyond event wiring lives here,
//! once, behind the collaborator traits. A host adapter only forwards its
//! lifecycle hooks and activity events to this type.

use crate::{SharedConfig, SweepWorker, SweeperConfig};
use culler_domain::{DestroyAction, MemberId, OccupancyProbe, PoolSource};
use culler_ledger::{ActivityLedger, LedgerError, SharedLedger};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// The reaper service a host adapter drives
///
/// Owns the activity ledger, its persistence, and the background sweep
/// worker. Collaborators are injected at construction; there is no ambient
/// global handle.
///
/// Hook mapping for host adapters:
///
/// | Host event | Call |
/// |---|---|
/// | plugin load | [`start`](Self::start) |
/// | pool/level (re)loaded | [`pool_ready`](Self::pool_ready) |
/// | member activity (enter/exit) | [`on_activity`](Self::on_activity) |
/// | plugin unload | [`stop`](Self::stop) |
///
/// `stop` is terminal: a stopped service stays stopped.
///
/// # Examples
///
/// ```no_run
/// use culler_sweeper::{Culler, SweeperConfig};
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
///     let host = std::sync::Arc::new(Host);
///     let mut culler = Culler::new(
///         host.clone(),
///         host.clone(),
///         host,
///         SweeperConfig::default(),
///         "updates.dat",
///     );
///
///     culler.start();
///     culler.on_activity(MemberId::new(42));
///     culler.stop().await;
/// }
/// ```
pub struct Culler<P, O, D> {
    ledger: SharedLedger,
    config: SharedConfig,
    pool: Arc<P>,
    occupancy: Arc<O>,
    destroy: Arc<D>,
    ledger_path: PathBuf,
    shutdown: watch::Sender<bool>,
    worker: Option<JoinHandle<()>>,
}

impl<P, O, D> Culler<P, O, D>
where
    P: PoolSource + Send + Sync + 'static,
    O: OccupancyProbe<P::Member> + Send + Sync + 'static,
    D: DestroyAction<P::Member> + Send + Sync + 'static,
{
    /// Create a service with injected collaborators
    ///
    /// `ledger_path` is where activity state is persisted across restarts;
    /// by convention a file named `updates.dat` in the host's data directory.
    pub fn new(
        pool: Arc<P>,
        occupancy: Arc<O>,
        destroy: Arc<D>,
        config: SweeperConfig,
        ledger_path: impl AsRef<Path>,
    ) -> Self {
        let (shutdown, _) = watch::channel(false);
        Self {
            ledger: SharedLedger::new(),
            config: config.into_shared(),
            pool,
            occupancy,
            destroy,
            ledger_path: ledger_path.as_ref().to_path_buf(),
            shutdown,
            worker: None,
        }
    }

    /// Start the service: restore the persisted ledger and begin sweeping
    ///
    /// A missing state file means no prior run; a file that cannot be read is
    /// logged and the ledger starts empty rather than failing the host's
    /// load. Idempotent while the worker is running.
    pub fn start(&mut self) {
        let restored = match ActivityLedger::load_path(&self.ledger_path) {
            Ok(ledger) => ledger,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load persisted ledger, starting empty");
                ActivityLedger::new()
            }
        };

        tracing::info!(entries = restored.len(), "Culler starting");
        self.ledger.replace(restored);
        self.spawn_worker();
    }

    /// Notify the service that the pool became ready
    ///
    /// The running worker already polls for readiness, so this only respawns
    /// the sweep loop if the previous worker task has finished.
    pub fn pool_ready(&mut self) {
        self.spawn_worker();
    }

    /// Record activity for a member
    ///
    /// Host event wiring (e.g. occupant entered/exited) forwards here.
    pub fn on_activity(&self, id: MemberId) {
        self.ledger.touch(id);
    }

    /// Handle to the shared ledger
    pub fn ledger(&self) -> &SharedLedger {
        &self.ledger
    }

    /// Handle to the live-updatable configuration
    pub fn config(&self) -> &SharedConfig {
        &self.config
    }

    /// Write the current ledger state to the persisted file
    ///
    /// Safe to call at any checkpoint; the shutdown path calls it last.
    pub fn flush(&self) -> Result<(), LedgerError> {
        self.ledger.snapshot().save_path(&self.ledger_path)
    }

    /// Stop the service: cancel the sweep loop, then save the ledger
    ///
    /// Cancellation interrupts any in-progress delay; the worker exits at its
    /// next suspension point. A save failure is logged and shutdown proceeds.
    pub async fn stop(&mut self) {
        tracing::info!("Culler stopping");
        let _ = self.shutdown.send(true);

        if let Some(handle) = self.worker.take() {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "Sweep worker task failed during shutdown");
            }
        }

        if let Err(e) = self.flush() {
            tracing::warn!(error = %e, "Failed to save activity ledger during shutdown");
        }
    }

    fn spawn_worker(&mut self) {
        if let Some(handle) = &self.worker {
            if !handle.is_finished() {
                return;
            }
        }

        let ledger = self.ledger.clone();
        let config = self.config.clone();
        let pool = self.pool.clone();
        let occupancy = self.occupancy.clone();
        let destroy = self.destroy.clone();
        let shutdown = self.shutdown.subscribe();

        self.worker = Some(tokio::spawn(async move {
            let mut worker = SweepWorker::new(config);
            worker
                .run(
                    ledger,
                    pool.as_ref(),
                    occupancy.as_ref(),
                    destroy.as_ref(),
                    shutdown,
                )
                .await;
        }));
    }
}
