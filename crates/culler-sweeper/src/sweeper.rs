//! Core sweep implementation: reconciliation and idle reclamation

use crate::{SharedConfig, SweepMetrics, SweeperConfig};
use culler_domain::{DestroyAction, OccupancyProbe, PoolSource};
use culler_ledger::{epoch_secs, SharedLedger};
use std::time::SystemTime;

/// Sweep service that keeps the ledger consistent with the live pool and
/// reclaims idle members
///
/// Responsible for:
/// - Purging entries restored from disk whose members vanished while the
///   process was stopped (startup reconciliation)
/// - Destroying members idle past the configured threshold, unless occupied
/// - Refreshing occupied members' timestamps instead of reclaiming them
/// - Stamping newly observed members so they get a full idle window
/// - Collecting metrics on every pass
///
/// # Examples
///
/// ```no_run
/// use culler_ledger::SharedLedger;
/// use culler_sweeper::{Sweeper, SweeperConfig};
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
/// # let host = Host;
///
/// let ledger = SharedLedger::new();
/// let mut sweeper = Sweeper::with_config(SweeperConfig::default());
///
/// // Perform a single pass
/// let metrics = sweeper.sweep(&ledger, &host, &host, &host);
/// println!("{}", metrics.summary());
/// ```
pub struct Sweeper {
    config: SharedConfig,
    metrics: SweepMetrics,
}

impl Sweeper {
    /// Create a new sweeper reading the given shared configuration
    pub fn new(config: SharedConfig) -> Self {
        Self {
            config,
            metrics: SweepMetrics::new(),
        }
    }

    /// Create a sweeper with a fixed configuration
    pub fn with_config(config: SweeperConfig) -> Self {
        Self::new(config.into_shared())
    }

    /// Get a reference to the current metrics
    pub fn metrics(&self) -> &SweepMetrics {
        &self.metrics
    }

    /// Reset metrics counters
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// One-time startup reconciliation
    ///
    /// Removes every ledger entry whose identity no longer resolves to a live
    /// pool member, or whose member the pool reports as already dead. This
    /// handles entries restored from persisted storage that refer to members
    /// that vanished while the process was stopped.
    ///
    /// Returns the number of entries purged.
    pub fn reconcile<P>(&mut self, ledger: &SharedLedger, pool: &P) -> usize
    where
        P: PoolSource,
    {
        let mut purged = 0;

        for (id, _) in ledger.entries() {
            let gone = match pool.resolve(id) {
                Some(member) => pool.is_dead(&member),
                None => true,
            };

            if gone && ledger.remove(id) {
                purged += 1;
            }
        }

        self.metrics.record_purged(purged);

        if purged > 0 {
            tracing::info!(purged, "Reconciled ledger against live pool");
        }

        purged
    }

    /// Perform one steady-state sweep pass
    ///
    /// 1. Skips entirely while the pool is not ready
    /// 2. Reclaims members idle past the threshold: occupied members get a
    ///    fresh timestamp instead, vanished members just lose their entry
    /// 3. Stamps every live member not yet in the ledger with the pass's
    ///    `now`, so newly observed members always get a full idle window
    ///    before becoming eligible
    ///
    /// The reclamation step runs before discovery so a member first observed
    /// in this pass can never be reclaimed by it.
    ///
    /// Returns the updated metrics after the pass.
    pub fn sweep<P, O, D>(
        &mut self,
        ledger: &SharedLedger,
        pool: &P,
        occupancy: &O,
        destroy: &D,
    ) -> SweepMetrics
    where
        P: PoolSource,
        O: OccupancyProbe<P::Member>,
        D: DestroyAction<P::Member>,
    {
        if !pool.is_ready() {
            tracing::debug!("Pool not ready, skipping sweep pass");
            return self.metrics.clone();
        }

        let start = SystemTime::now();
        let config = self.config.get();
        let now = epoch_secs();

        self.reclaim_idle(ledger, pool, occupancy, destroy, &config, now);
        self.discover_new(ledger, pool, &config, now);

        self.metrics.record_sweep();

        if let Ok(elapsed) = start.elapsed() {
            self.metrics.total_runtime_secs += elapsed.as_secs();
        }

        self.metrics.clone()
    }

    /// Reclamation step: visit every ledger entry and act on the idle ones
    fn reclaim_idle<P, O, D>(
        &mut self,
        ledger: &SharedLedger,
        pool: &P,
        occupancy: &O,
        destroy: &D,
        config: &SweeperConfig,
        now: u64,
    ) where
        P: PoolSource,
        O: OccupancyProbe<P::Member>,
        D: DestroyAction<P::Member>,
    {
        for (id, _) in ledger.entries() {
            // Re-read under the lock: an activity event that landed after the
            // snapshot was taken must be honored, not swept away.
            let Some(last_active) = ledger.get(id) else {
                continue;
            };

            let idle_secs = now.saturating_sub(last_active);
            if idle_secs as f64 <= config.unused_duration_secs {
                continue;
            }

            match pool.resolve(id) {
                Some(member) => {
                    if occupancy.is_occupied(&member) {
                        // Continued occupancy counts as activity.
                        if !config.dry_run {
                            ledger.touch_at(id, now);
                        }
                        self.metrics.record_protected();
                        continue;
                    }

                    if config.dry_run {
                        tracing::info!(%id, idle_secs, "DRY RUN: would reclaim idle member");
                        continue;
                    }

                    destroy.destroy(&member);
                    ledger.remove(id);
                    self.metrics.record_reclaimed();
                    tracing::info!(%id, idle_secs, "Reclaimed idle member");
                }
                None => {
                    if config.dry_run {
                        tracing::info!(%id, "DRY RUN: would drop entry for vanished member");
                        continue;
                    }

                    ledger.remove(id);
                    self.metrics.record_vanished();
                    tracing::debug!(%id, "Dropped entry for vanished member");
                }
            }
        }
    }

    /// Discovery step: stamp live members the ledger does not know yet
    fn discover_new<P>(
        &mut self,
        ledger: &SharedLedger,
        pool: &P,
        config: &SweeperConfig,
        now: u64,
    ) where
        P: PoolSource,
    {
        for (id, _member) in pool.all_members() {
            if config.dry_run {
                if ledger.get(id).is_none() {
                    tracing::debug!(%id, "DRY RUN: would start idle clock for new member");
                }
                continue;
            }

            if ledger.observe(id, now) {
                self.metrics.record_discovered();
                tracing::debug!(%id, "Started idle clock for new member");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use culler_domain::MemberId;
    use std::cell::RefCell;
    use std::rc::Rc;

    // Mock host for testing. The pool and the destroy action share the
    // member list, so a destroyed member disappears from enumeration the way
    // it does on a real host.
    #[derive(Debug, Clone)]
    struct TestMember {
        id: MemberId,
        dead: bool,
        occupied: bool,
    }

    type Members = Rc<RefCell<Vec<TestMember>>>;

    struct TestPool {
        ready: bool,
        members: Members,
    }

    impl TestPool {
        fn ready(members: Vec<TestMember>) -> (Self, Members) {
            let members = Rc::new(RefCell::new(members));
            (
                Self {
                    ready: true,
                    members: members.clone(),
                },
                members,
            )
        }
    }

    impl PoolSource for TestPool {
        type Member = TestMember;

        fn is_ready(&self) -> bool {
            self.ready
        }

        fn resolve(&self, id: MemberId) -> Option<TestMember> {
            self.members.borrow().iter().find(|m| m.id == id).cloned()
        }

        fn all_members(&self) -> Vec<(MemberId, TestMember)> {
            self.members
                .borrow()
                .iter()
                .map(|m| (m.id, m.clone()))
                .collect()
        }

        fn is_dead(&self, member: &TestMember) -> bool {
            member.dead
        }
    }

    struct TestOccupancy;

    impl OccupancyProbe<TestMember> for TestOccupancy {
        fn is_occupied(&self, member: &TestMember) -> bool {
            member.occupied
        }
    }

    struct TestDestroy {
        members: Members,
        destroyed: RefCell<Vec<MemberId>>,
    }

    impl TestDestroy {
        fn for_pool(members: &Members) -> Self {
            Self {
                members: members.clone(),
                destroyed: RefCell::new(Vec::new()),
            }
        }
    }

    impl DestroyAction<TestMember> for TestDestroy {
        fn destroy(&self, member: &TestMember) {
            self.members.borrow_mut().retain(|m| m.id != member.id);
            self.destroyed.borrow_mut().push(member.id);
        }
    }

    fn member(id: u64) -> TestMember {
        TestMember {
            id: MemberId::new(id),
            dead: false,
            occupied: false,
        }
    }

    fn occupied_member(id: u64) -> TestMember {
        TestMember {
            occupied: true,
            ..member(id)
        }
    }

    fn dead_member(id: u64) -> TestMember {
        TestMember {
            dead: true,
            ..member(id)
        }
    }

    fn config_with_threshold(unused_duration_secs: f64) -> SweeperConfig {
        SweeperConfig {
            unused_duration_secs,
            ..Default::default()
        }
    }

    #[test]
    fn test_sweeper_creation() {
        let sweeper = Sweeper::with_config(SweeperConfig::default());
        assert_eq!(sweeper.metrics().sweep_count, 0);
        assert_eq!(sweeper.metrics().total_removed(), 0);
    }

    #[test]
    fn test_idle_member_is_reclaimed() {
        let ledger = SharedLedger::new();
        let now = epoch_secs();
        ledger.touch_at(MemberId::new(5), now - 150);
        ledger.touch_at(MemberId::new(6), now - 50);

        let (pool, members) = TestPool::ready(vec![member(5), member(6)]);
        let destroy = TestDestroy::for_pool(&members);
        let mut sweeper = Sweeper::with_config(config_with_threshold(100.0));

        sweeper.sweep(&ledger, &pool, &TestOccupancy, &destroy);

        assert_eq!(*destroy.destroyed.borrow(), vec![MemberId::new(5)]);
        assert_eq!(ledger.get(MemberId::new(5)), None);
        // Still within the idle window: untouched
        assert_eq!(ledger.get(MemberId::new(6)), Some(now - 50));
        assert_eq!(sweeper.metrics().reclaimed, 1);
    }

    #[test]
    fn test_occupied_member_is_refreshed_not_reclaimed() {
        let ledger = SharedLedger::new();
        let now = epoch_secs();
        ledger.touch_at(MemberId::new(7), now - 500);

        let (pool, members) = TestPool::ready(vec![occupied_member(7)]);
        let destroy = TestDestroy::for_pool(&members);
        let mut sweeper = Sweeper::with_config(config_with_threshold(100.0));

        sweeper.sweep(&ledger, &pool, &TestOccupancy, &destroy);

        assert!(destroy.destroyed.borrow().is_empty());
        let refreshed = ledger.get(MemberId::new(7)).unwrap();
        assert!(refreshed >= now);
        assert_eq!(sweeper.metrics().protected, 1);
        assert_eq!(sweeper.metrics().reclaimed, 0);
    }

    #[test]
    fn test_vanished_member_entry_is_dropped_without_destroy() {
        let ledger = SharedLedger::new();
        let now = epoch_secs();
        ledger.touch_at(MemberId::new(8), now - 500);

        let (pool, members) = TestPool::ready(vec![]);
        let destroy = TestDestroy::for_pool(&members);
        let mut sweeper = Sweeper::with_config(config_with_threshold(100.0));

        sweeper.sweep(&ledger, &pool, &TestOccupancy, &destroy);

        assert!(destroy.destroyed.borrow().is_empty());
        assert_eq!(ledger.get(MemberId::new(8)), None);
        assert_eq!(sweeper.metrics().vanished, 1);
    }

    #[test]
    fn test_new_member_gets_fresh_idle_clock() {
        let ledger = SharedLedger::new();
        let before = epoch_secs();

        let (pool, members) = TestPool::ready(vec![member(9)]);
        let destroy = TestDestroy::for_pool(&members);
        let mut sweeper = Sweeper::with_config(config_with_threshold(100.0));

        sweeper.sweep(&ledger, &pool, &TestOccupancy, &destroy);

        let stamped = ledger.get(MemberId::new(9)).unwrap();
        assert!(stamped >= before);
        assert!(destroy.destroyed.borrow().is_empty());
        assert_eq!(sweeper.metrics().discovered, 1);
    }

    #[test]
    fn test_discovery_never_regresses_existing_stamp() {
        let ledger = SharedLedger::new();
        let now = epoch_secs();
        // Entry fresher than any stamp discovery would write
        ledger.touch_at(MemberId::new(9), now + 100);

        let (pool, members) = TestPool::ready(vec![member(9)]);
        let destroy = TestDestroy::for_pool(&members);
        let mut sweeper = Sweeper::with_config(config_with_threshold(100.0));

        sweeper.sweep(&ledger, &pool, &TestOccupancy, &destroy);

        assert_eq!(ledger.get(MemberId::new(9)), Some(now + 100));
        assert_eq!(sweeper.metrics().discovered, 0);
    }

    #[test]
    fn test_sweep_skips_when_pool_not_ready() {
        let ledger = SharedLedger::new();
        let now = epoch_secs();
        ledger.touch_at(MemberId::new(5), now - 500);

        let members = Rc::new(RefCell::new(vec![member(5)]));
        let pool = TestPool {
            ready: false,
            members: members.clone(),
        };
        let destroy = TestDestroy::for_pool(&members);
        let mut sweeper = Sweeper::with_config(config_with_threshold(100.0));

        let metrics = sweeper.sweep(&ledger, &pool, &TestOccupancy, &destroy);

        assert_eq!(metrics.sweep_count, 0);
        assert_eq!(ledger.get(MemberId::new(5)), Some(now - 500));
        assert!(destroy.destroyed.borrow().is_empty());
    }

    #[test]
    fn test_sweep_respects_dry_run() {
        let ledger = SharedLedger::new();
        let now = epoch_secs();
        ledger.touch_at(MemberId::new(5), now - 500);
        ledger.touch_at(MemberId::new(6), now - 500);

        let (pool, members) = TestPool::ready(vec![member(5), member(7)]);
        let destroy = TestDestroy::for_pool(&members);
        let mut sweeper = Sweeper::with_config(SweeperConfig {
            unused_duration_secs: 100.0,
            dry_run: true,
            ..Default::default()
        });

        sweeper.sweep(&ledger, &pool, &TestOccupancy, &destroy);

        // Nothing destroyed, nothing dropped, nothing stamped
        assert!(destroy.destroyed.borrow().is_empty());
        assert_eq!(ledger.get(MemberId::new(5)), Some(now - 500));
        assert_eq!(ledger.get(MemberId::new(6)), Some(now - 500));
        assert_eq!(ledger.get(MemberId::new(7)), None);
        assert_eq!(sweeper.metrics().reclaimed, 0);
    }

    #[test]
    fn test_reconcile_purges_dead_and_vanished_entries() {
        let ledger = SharedLedger::new();
        ledger.touch_at(MemberId::new(1), 100); // resolves, alive
        ledger.touch_at(MemberId::new(2), 100); // resolves, dead
        ledger.touch_at(MemberId::new(3), 100); // does not resolve

        let (pool, _members) = TestPool::ready(vec![member(1), dead_member(2)]);
        let mut sweeper = Sweeper::with_config(SweeperConfig::default());

        let purged = sweeper.reconcile(&ledger, &pool);

        assert_eq!(purged, 2);
        assert_eq!(ledger.get(MemberId::new(1)), Some(100));
        assert_eq!(ledger.get(MemberId::new(2)), None);
        assert_eq!(ledger.get(MemberId::new(3)), None);
        assert_eq!(sweeper.metrics().purged_at_startup, 2);
    }

    #[test]
    fn test_reclaim_runs_before_discovery() {
        // A member whose entry is removed as vanished in the reclamation step
        // but which the pool still reports must be re-added by discovery with
        // a fresh stamp, not reclaimed in the same pass.
        let ledger = SharedLedger::new();
        let now = epoch_secs();
        ledger.touch_at(MemberId::new(5), now - 500);

        // resolve() misses, all_members() still lists it: the member list and
        // the resolver can disagree transiently on a real host
        struct SplitPool {
            listed: TestMember,
        }

        impl PoolSource for SplitPool {
            type Member = TestMember;

            fn is_ready(&self) -> bool {
                true
            }

            fn resolve(&self, _id: MemberId) -> Option<TestMember> {
                None
            }

            fn all_members(&self) -> Vec<(MemberId, TestMember)> {
                vec![(self.listed.id, self.listed.clone())]
            }

            fn is_dead(&self, _member: &TestMember) -> bool {
                false
            }
        }

        let pool = SplitPool { listed: member(5) };
        let side_pool = Rc::new(RefCell::new(Vec::new()));
        let destroy = TestDestroy::for_pool(&side_pool);
        let mut sweeper = Sweeper::with_config(config_with_threshold(100.0));

        sweeper.sweep(&ledger, &pool, &TestOccupancy, &destroy);

        // Dropped as vanished, then rediscovered with a full idle window
        assert!(destroy.destroyed.borrow().is_empty());
        let stamped = ledger.get(MemberId::new(5)).unwrap();
        assert!(stamped >= now);
        assert_eq!(sweeper.metrics().vanished, 1);
        assert_eq!(sweeper.metrics().discovered, 1);
    }

    #[test]
    fn test_full_pass_counts_runtime_and_passes() {
        let ledger = SharedLedger::new();
        let (pool, members) = TestPool::ready(vec![member(1)]);
        let destroy = TestDestroy::for_pool(&members);
        let mut sweeper = Sweeper::with_config(SweeperConfig::default());

        sweeper.sweep(&ledger, &pool, &TestOccupancy, &destroy);
        let metrics = sweeper.sweep(&ledger, &pool, &TestOccupancy, &destroy);

        assert_eq!(metrics.sweep_count, 2);
        assert_eq!(metrics.discovered, 1);
    }

    #[test]
    fn test_metrics_reset() {
        let ledger = SharedLedger::new();
        let (pool, members) = TestPool::ready(vec![member(1)]);
        let destroy = TestDestroy::for_pool(&members);
        let mut sweeper = Sweeper::with_config(SweeperConfig::default());

        sweeper.sweep(&ledger, &pool, &TestOccupancy, &destroy);
        assert!(sweeper.metrics().sweep_count > 0);

        sweeper.reset_metrics();

        assert_eq!(sweeper.metrics().sweep_count, 0);
        assert_eq!(sweeper.metrics().discovered, 0);
    }
}
