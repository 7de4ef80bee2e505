//! Entity trait: identity-based equality.

/// A domain object with a stable identity.
///
/// Two entities with the same id refer to the same thing even if their other
/// attributes differ (e.g. a product whose stock level changed between two
/// catalog snapshots).
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
