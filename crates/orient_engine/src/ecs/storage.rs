//! Component Storage
//!
//! One `SecondaryMap` per component type, keyed by the same generational
//! handles as the entity store, so a stale `Entity` can never read another
//! entity's data.

use std::any::Any;
use slotmap::{DefaultKey, SecondaryMap};

use crate::ecs::{Component, Entity};

/// Type-erased view of a storage, used by the world for entity teardown
pub(crate) trait AnyStorage {
    /// Drop whatever component this storage holds for `entity`
    fn remove_entity(&mut self, entity: Entity);

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Storage for all components of type `T`
pub(crate) struct ComponentStorage<T: Component> {
    components: SecondaryMap<DefaultKey, T>,
}

impl<T: Component> ComponentStorage<T> {
    pub fn new() -> Self {
        Self {
            components: SecondaryMap::new(),
        }
    }

    pub fn insert(&mut self, entity: Entity, component: T) -> Option<T> {
        self.components.insert(entity.key(), component)
    }

    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.components.get(entity.key())
    }

    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        self.components.get_mut(entity.key())
    }

    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        self.components.remove(entity.key())
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.components.contains_key(entity.key())
    }

    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.components.keys().map(Entity::from_key)
    }
}

impl<T: Component> AnyStorage for ComponentStorage<T> {
    fn remove_entity(&mut self, entity: Entity) {
        self.components.remove(entity.key());
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
