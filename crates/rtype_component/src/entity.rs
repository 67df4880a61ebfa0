//! Entity type and allocation utilities.
//!
//! An [`Entity`] is a lightweight `u64` identifier with no inherent data.
//! All entity IDs come from an [`EntityAllocator`] owned by the registry.

use serde::{Deserialize, Serialize};

/// A unique entity identifier.
///
/// Entities are pure identifiers and carry no data of their own. Components
/// are attached to entities to give them meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Entity(pub u64);

impl Entity {
    /// Create an entity from a raw `u64` identifier.
    #[must_use]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw `u64` identifier.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Allocates monotonically increasing entity IDs.
///
/// IDs start at 0 and are never recycled; there is no way to destroy an
/// entity short of dropping its registry.
#[derive(Debug, Default)]
pub struct EntityAllocator {
    next_id: u64,
}

impl EntityAllocator {
    /// Creates a new allocator whose first ID is 0.
    #[must_use]
    pub fn new() -> Self {
        Self { next_id: 0 }
    }

    /// Allocates a fresh entity ID.
    pub fn allocate(&mut self) -> Entity {
        let id = self.next_id;
        self.next_id += 1;
        Entity(id)
    }

    /// Returns the number of entities allocated so far.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.next_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_creation() {
        let e = Entity::from_raw(42);
        assert_eq!(e.id(), 42);
        assert_eq!(e.to_string(), "Entity(42)");
    }

    #[test]
    fn test_allocator_starts_at_zero() {
        let mut alloc = EntityAllocator::new();
        assert_eq!(alloc.count(), 0);
        assert_eq!(alloc.allocate().id(), 0);
    }

    #[test]
    fn test_allocator_produces_consecutive_ids() {
        let mut alloc = EntityAllocator::default();
        let ids: Vec<u64> = (0..100).map(|_| alloc.allocate().id()).collect();
        assert_eq!(ids, (0..100).collect::<Vec<_>>());
        assert_eq!(alloc.count(), 100);
    }

    #[test]
    fn test_entity_serialization_roundtrip() {
        let entity = Entity::from_raw(999);
        let bytes = rmp_serde::to_vec(&entity).unwrap();
        let restored: Entity = rmp_serde::from_slice(&bytes).unwrap();
        assert_eq!(entity, restored);
    }
}
