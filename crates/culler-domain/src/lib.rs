//! Culler Domain Layer
//!
//! This crate contains the core domain model for Culler: the identity handle
//! for pool members and the trait interfaces behind which the host
//! environment lives. It has ZERO external dependencies and every other
//! crate in the workspace depends on it.
//!
//! ## Key Concepts
//!
//! - **Member**: one live object in an externally owned pool (e.g. a spawned
//!   vehicle on a game server)
//! - **MemberId**: the stable unsigned-integer handle the pool assigns to a
//!   member for its lifetime
//! - **Collaborators**: the pool source, occupancy probe, and destroy action
//!   are provided by the host; Culler only decides *when* to act
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Pure domain definitions only
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod member;
pub mod traits;

// Re-exports for convenience
pub use member::MemberId;
pub use traits::{DestroyAction, OccupancyProbe, PoolSource};
