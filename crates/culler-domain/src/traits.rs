//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the reaping logic and the host
//! environment that owns the pool. Host integrations implement them in their
//! own crates; the sweeper only sees these seams.

use crate::MemberId;

/// Trait for enumerating and resolving live pool members
///
/// Implemented by the host integration layer. Lookups returning `None` are a
/// normal outcome (the member despawned, the level unloaded), never a fault.
pub trait PoolSource {
    /// Handle to a resolved live member, as the host represents it
    type Member;

    /// Whether the pool is initialized and can be queried at all
    fn is_ready(&self) -> bool;

    /// Look up a live member by identity
    fn resolve(&self, id: MemberId) -> Option<Self::Member>;

    /// Enumerate all currently live members with their identities
    fn all_members(&self) -> Vec<(MemberId, Self::Member)>;

    /// Whether a resolved member is already logically destroyed
    fn is_dead(&self, member: &Self::Member) -> bool;
}

/// Trait for asking whether a member is in protected use
///
/// Implemented by the host integration layer. A member that is occupied at
/// sweep time is never reclaimed, no matter how long it has been idle.
pub trait OccupancyProbe<M> {
    /// True if the member currently has an active protected occupant
    fn is_occupied(&self, member: &M) -> bool;
}

/// Trait for requesting destruction of a member
///
/// Implemented by the host integration layer. Destruction is fire-and-forget:
/// the caller gets no confirmation, and a member that fails to despawn is
/// simply rediscovered as new on a later sweep.
pub trait DestroyAction<M> {
    /// Request that the host destroy the member
    fn destroy(&self, member: &M);
}
