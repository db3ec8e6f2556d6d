//! Culler Sweeper
//!
//! Background reclamation service for idle pool members.
//!
//! # Overview
//!
//! The sweeper is responsible for:
//! - **Startup reconciliation**: dropping restored ledger entries whose
//!   members vanished while the process was stopped
//! - **Idle reclamation**: destroying members inactive longer than the
//!   configured threshold
//! - **Occupancy protection**: refreshing, never reclaiming, members that are
//!   currently in protected use
//! - **Discovery**: stamping newly observed members so each gets a full idle
//!   window before becoming eligible
//! - **Metrics collection**: tracking what every pass did
//!
//! # Architecture
//!
//! The sweeper only decides *when* to act. *What exists*, *who is occupied*,
//! and *how to destroy* are answered by the host through the
//! [`PoolSource`](culler_domain::PoolSource),
//! [`OccupancyProbe`](culler_domain::OccupancyProbe), and
//! [`DestroyAction`](culler_domain::DestroyAction) trait seams, and all
//! activity state lives in a [`SharedLedger`](culler_ledger::SharedLedger).
//!
//! A pass visits existing entries before stamping discoveries, so a member
//! first observed in a pass can never be reclaimed by that same pass.
//!
//! # Usage
//!
//! ## One-time pass
//!
//! ```no_run
//! use culler_ledger::SharedLedger;
//! use culler_sweeper::{Sweeper, SweeperConfig};
//! # use culler_domain::{DestroyAction, MemberId, OccupancyProbe, PoolSource};
//! # struct Host;
//! # impl PoolSource for Host {
//! #     type Member = ();
//! #     fn is_ready(&self) -> bool { true }
//! #     fn resolve(&self, _: MemberId) -> Option<()> { None }
//! #     fn all_members(&self) -> Vec<(MemberId, ())> { Vec::new() }
//! #     fn is_dead(&self, _: &()) -> bool { false }
//! # }
//! # impl OccupancyProbe<()> for Host {
//! #     fn is_occupied(&self, _: &()) -> bool { false }
//! # }
//! # impl DestroyAction<()> for Host {
//! #     fn destroy(&self, _: &()) {}
//! # }
//! # let host = Host;
//!
//! let ledger = SharedLedger::new();
//! let mut sweeper = Sweeper::with_config(SweeperConfig::default());
//!
//! let metrics = sweeper.sweep(&ledger, &host, &host, &host);
//! println!("{}", metrics.summary());
//! ```
//!
//! ## Full service
//!
//! The [`Culler`] facade owns persistence and the background
//! [`SweepWorker`]; a host adapter forwards its lifecycle hooks to it. See
//! the type-level documentation for the hook mapping.
//!
//! ## Configuration Presets
//!
//! ```
//! use culler_sweeper::SweeperConfig;
//!
//! // Default: sweep every 30s, reclaim after 2 idle days
//! let config = SweeperConfig::default();
//!
//! // Aggressive: crowded pools, short idle window
//! let config = SweeperConfig::aggressive();
//!
//! // Lenient: sparse pools, members linger for a week
//! let config = SweeperConfig::lenient();
//! ```
//!
//! Configuration is re-read on every worker iteration through
//! [`SharedConfig`], so tuning takes effect without a restart.

#![warn(missing_docs)]

mod config;
mod metrics;
mod service;
mod sweeper;
mod worker;

pub use config::{SharedConfig, SweeperConfig};
pub use metrics::SweepMetrics;
pub use service::Culler;
pub use sweeper::Sweeper;
pub use worker::SweepWorker;
