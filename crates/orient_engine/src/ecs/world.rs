//! ECS World implementation

use super::storage::{AnyStorage, ComponentStorage};
use super::{Component, Entity};
use crate::ecs::components::NameComponent;
use slotmap::{DefaultKey, SlotMap};
use std::any::TypeId;
use std::collections::HashMap;
use thiserror::Error;

/// World errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    /// The handle does not refer to a live entity
    #[error("entity {0} does not exist")]
    NoSuchEntity(Entity),
}

/// ECS World containing all entities and components
pub struct World {
    entities: SlotMap<DefaultKey, ()>,
    component_storages: HashMap<TypeId, Box<dyn AnyStorage>>,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self {
            entities: SlotMap::new(),
            component_storages: HashMap::new(),
        }
    }

    /// Create a new entity
    pub fn create_entity(&mut self) -> Entity {
        let entity = Entity::from_key(self.entities.insert(()));
        log::trace!("Created entity {}", entity);
        entity
    }

    /// Destroy an entity and every component attached to it
    ///
    /// Returns `false` if the entity was already gone. Other entities holding
    /// the handle are not touched; their lookups simply start failing.
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        if self.entities.remove(entity.key()).is_none() {
            return false;
        }

        for storage in self.component_storages.values_mut() {
            storage.remove_entity(entity);
        }
        log::trace!("Destroyed entity {}", entity);
        true
    }

    /// Whether the handle refers to a live entity
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.contains_key(entity.key())
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Add a component to an entity, returning the one it replaced
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) -> Result<Option<T>, WorldError> {
        if !self.is_alive(entity) {
            return Err(WorldError::NoSuchEntity(entity));
        }
        Ok(self.storage_mut::<T>().insert(entity, component))
    }

    /// Get a component from an entity
    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.storage::<T>()?.get(entity)
    }

    /// Get a mutable component from an entity
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.component_storages
            .get_mut(&TypeId::of::<T>())?
            .as_any_mut()
            .downcast_mut::<ComponentStorage<T>>()?
            .get_mut(entity)
    }

    /// Remove a component from an entity
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.component_storages
            .get_mut(&TypeId::of::<T>())?
            .as_any_mut()
            .downcast_mut::<ComponentStorage<T>>()?
            .remove(entity)
    }

    /// Whether the entity has a component of type `T`
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.storage::<T>().is_some_and(|storage| storage.contains(entity))
    }

    /// Snapshot of every entity carrying a `T`
    ///
    /// Collected up front so callers can mutate the world while walking it.
    pub fn entities_with<T: Component>(&self) -> Vec<Entity> {
        self.storage::<T>()
            .map(|storage| storage.entities().collect())
            .unwrap_or_default()
    }

    /// Find the first entity with the given name
    pub fn find_by_name(&self, name: &str) -> Option<Entity> {
        let storage = self.storage::<NameComponent>()?;
        storage
            .entities()
            .find(|&entity| storage.get(entity).is_some_and(|n| n.as_str() == name))
    }

    /// Name of an entity for log output, falling back to its handle
    pub fn display_name(&self, entity: Entity) -> String {
        self.get_component::<NameComponent>(entity)
            .map_or_else(|| entity.to_string(), |name| name.as_str().to_string())
    }

    /// Get an iterator over all entities
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.keys().map(Entity::from_key)
    }

    fn storage<T: Component>(&self) -> Option<&ComponentStorage<T>> {
        self.component_storages
            .get(&TypeId::of::<T>())?
            .as_any()
            .downcast_ref::<ComponentStorage<T>>()
    }

    fn storage_mut<T: Component>(&mut self) -> &mut ComponentStorage<T> {
        self.component_storages
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(ComponentStorage::<T>::new()))
            .as_any_mut()
            .downcast_mut::<ComponentStorage<T>>()
            .unwrap_or_else(|| unreachable!("storage registered under a foreign TypeId"))
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
