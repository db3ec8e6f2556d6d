//! Configuration for sweep operations
//!
//! Defines the sweep cadence, the idle threshold, and the startup delay.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

/// Configuration for the sweep scheduler
///
/// All durations are float seconds, matching the host configuration surface
/// this was built against.
///
/// # Examples
///
/// ```
/// use culler_sweeper::SweeperConfig;
///
/// // Default configuration (balanced)
/// let config = SweeperConfig::default();
/// assert_eq!(config.unused_duration_secs, 172800.0);
///
/// // Aggressive reclamation
/// let config = SweeperConfig::aggressive();
/// assert!(config.unused_duration_secs < SweeperConfig::default().unused_duration_secs);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweeperConfig {
    /// Seconds between sweep passes
    /// Default: 30
    pub check_interval_secs: f64,

    /// Idle threshold in seconds before a member becomes eligible for
    /// reclamation
    /// Default: 172800 (2 days)
    pub unused_duration_secs: f64,

    /// Delay before the one-time startup reconciliation pass, counted from
    /// the moment the pool becomes ready
    /// Default: 10
    #[serde(default = "default_startup_delay")]
    pub startup_delay_secs: f64,

    /// Dry-run mode: log what a sweep would do without destroying members or
    /// mutating the ledger
    /// Default: false
    #[serde(default)]
    pub dry_run: bool,
}

fn default_startup_delay() -> f64 {
    10.0
}

impl Default for SweeperConfig {
    /// Create default configuration
    ///
    /// - Check interval: 30 seconds
    /// - Unused duration: 172800 seconds (2 days)
    /// - Startup delay: 10 seconds
    fn default() -> Self {
        Self {
            check_interval_secs: 30.0,
            unused_duration_secs: 172_800.0,
            startup_delay_secs: 10.0,
            dry_run: false,
        }
    }
}

impl SweeperConfig {
    /// Aggressive reclamation configuration (short idle window, frequent sweeps)
    ///
    /// Suitable for crowded pools where idle members crowd out new spawns.
    ///
    /// - Check interval: 15 seconds
    /// - Unused duration: 21600 seconds (6 hours)
    pub fn aggressive() -> Self {
        Self {
            check_interval_secs: 15.0,
            unused_duration_secs: 21_600.0,
            startup_delay_secs: 10.0,
            dry_run: false,
        }
    }

    /// Lenient reclamation configuration (long idle window, infrequent sweeps)
    ///
    /// Suitable for sparsely used pools where members should linger.
    ///
    /// - Check interval: 60 seconds
    /// - Unused duration: 604800 seconds (7 days)
    pub fn lenient() -> Self {
        Self {
            check_interval_secs: 60.0,
            unused_duration_secs: 604_800.0,
            startup_delay_secs: 10.0,
            dry_run: false,
        }
    }

    /// Get the sweep cadence as a Duration
    pub fn check_interval(&self) -> Duration {
        duration_or(self.check_interval_secs, 30.0)
    }

    /// Get the idle threshold as a Duration
    pub fn unused_duration(&self) -> Duration {
        duration_or(self.unused_duration_secs, 172_800.0)
    }

    /// Get the startup delay as a Duration
    pub fn startup_delay(&self) -> Duration {
        duration_or(self.startup_delay_secs, 10.0)
    }

    /// Wrap this configuration in a live-updatable shared handle
    pub fn into_shared(self) -> SharedConfig {
        SharedConfig::new(self)
    }
}

/// Convert float seconds to a Duration; negative or non-finite values fall
/// back to the documented default.
fn duration_or(secs: f64, fallback: f64) -> Duration {
    Duration::try_from_secs_f64(secs)
        .unwrap_or_else(|_| Duration::from_secs_f64(fallback))
}

/// Live-updatable handle to a [`SweeperConfig`]
///
/// The worker re-reads the configuration on every iteration, so values
/// changed through this handle take effect without a restart.
#[derive(Debug, Clone, Default)]
pub struct SharedConfig {
    inner: Arc<RwLock<SweeperConfig>>,
}

impl SharedConfig {
    /// Create a shared handle holding the given configuration
    pub fn new(config: SweeperConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    /// Current configuration values
    pub fn get(&self) -> SweeperConfig {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the configuration; the next worker iteration sees the change
    pub fn set(&self, config: SweeperConfig) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = config;
    }
}
