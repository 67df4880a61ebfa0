//! Entity registry: owns entities and the components attached to them.
//!
//! The registry is an unindexed map from [`Entity`] to that entity's named
//! components. It also runs the per-tick movement update.

use std::collections::HashMap;

use rtype_component::{
    Component, ComponentData, ComponentTypeId, Entity, EntityAllocator, Position, Velocity,
};
use tracing::{debug, info};

/// Components of a single entity, keyed by the id of their name.
type ComponentSet = HashMap<ComponentTypeId, Component>;

/// Owner and lookup table for entities and their components.
///
/// Every allocated entity has an entry, possibly empty. Entities are never
/// removed; they live as long as the registry.
#[derive(Debug, Default)]
pub struct Registry {
    allocator: EntityAllocator,
    entities: HashMap<Entity, ComponentSet>,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new entity with no components.
    pub fn create_entity(&mut self) -> Entity {
        let entity = self.allocator.allocate();
        self.entities.insert(entity, ComponentSet::new());
        entity
    }

    /// Returns `true` if `entity` was created by this registry.
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains_key(&entity)
    }

    /// Number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Attach `component` to `entity` under `name`, replacing any component
    /// already stored under that name.
    ///
    /// Unknown entities are ignored. Returns `true` if the component was
    /// stored.
    pub fn add_component(
        &mut self,
        entity: Entity,
        name: &str,
        component: impl Into<Component>,
    ) -> bool {
        let Some(components) = self.entities.get_mut(&entity) else {
            debug!(%entity, name, "ignoring component for unknown entity");
            return false;
        };
        components.insert(ComponentTypeId::from_name(name), component.into());
        true
    }

    /// Attach `value` under its canonical [`ComponentData::NAME`].
    pub fn insert<T: ComponentData>(&mut self, entity: Entity, value: T) -> bool {
        self.add_component(entity, T::NAME, value)
    }

    /// The component stored under `name`, if any.
    #[must_use]
    pub fn get_component(&self, entity: Entity, name: &str) -> Option<&Component> {
        self.entities
            .get(&entity)?
            .get(&ComponentTypeId::from_name(name))
    }

    /// The component stored under `name`, if it is a `T`.
    #[must_use]
    pub fn get<T: ComponentData>(&self, entity: Entity, name: &str) -> Option<&T> {
        self.get_component(entity, name).and_then(T::from_component)
    }

    /// Mutable variant of [`Registry::get`].
    pub fn get_mut<T: ComponentData>(&mut self, entity: Entity, name: &str) -> Option<&mut T> {
        self.entities
            .get_mut(&entity)?
            .get_mut(&ComponentTypeId::from_name(name))
            .and_then(T::from_component_mut)
    }

    #[must_use]
    pub fn has_component(&self, entity: Entity, name: &str) -> bool {
        self.get_component(entity, name).is_some()
    }

    /// All entities carrying a component under every one of `names`.
    ///
    /// The order of the result is unspecified.
    #[must_use]
    pub fn entities_with(&self, names: &[&str]) -> Vec<Entity> {
        let ids: Vec<ComponentTypeId> = names
            .iter()
            .map(|name| ComponentTypeId::from_name(name))
            .collect();

        self.entities
            .iter()
            .filter(|(_, components)| ids.iter().all(|id| components.contains_key(id)))
            .map(|(&entity, _)| entity)
            .collect()
    }

    /// Advance every entity that has both a [`Position`] and a [`Velocity`]
    /// by `velocity * dt`. Returns the number of entities moved.
    pub fn update(&mut self, dt: f64) -> usize {
        let mut moved = 0;

        for (entity, components) in &mut self.entities {
            let Some(velocity) = components
                .get(&Velocity::component_type_id())
                .and_then(Velocity::from_component)
                .copied()
            else {
                continue;
            };
            let Some(position) = components
                .get_mut(&Position::component_type_id())
                .and_then(Position::from_component_mut)
            else {
                continue;
            };

            position.advance(&velocity, dt);
            moved += 1;
            info!(entity = entity.id(), position = %position, "entity moved");
        }

        moved
    }
}
