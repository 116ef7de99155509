//! Spawns scene descriptions into a world

use std::collections::{HashMap, HashSet};
use std::path::Path;

use super::description::{EntityDescription, SceneDescription};
use crate::config::{Config, ConfigError};
use crate::ecs::components::{NameComponent, OrientationSyncComponent, TransformComponent};
use crate::ecs::{Entity, World, WorldError};
use crate::foundation::math::{Vec3, DIRECTION_EPSILON};
use thiserror::Error;

/// Name → handle map for a spawned scene
pub type SceneHandles = HashMap<String, Entity>;

/// Scene loading errors
#[derive(Error, Debug)]
pub enum SceneError {
    /// Two entities share a name, within the scene or with the world
    #[error("Entity name '{0}' is used more than once")]
    DuplicateName(String),

    /// An orientation target names an entity the scene does not declare
    #[error("Entity '{owner}' follows unknown entity '{target}'")]
    UnknownTarget {
        /// Following entity
        owner: String,
        /// Missing target name
        target: String,
    },

    /// The initial facing cannot be normalised
    #[error("Entity '{0}' has a zero-length or non-finite forward direction")]
    DegenerateForward(String),

    /// Reading or parsing the scene file failed
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Spawning into the world failed
    #[error("World error: {0}")]
    World(#[from] WorldError),
}

/// Scene loader
pub struct SceneLoader;

impl SceneLoader {
    /// Read a `.ron` or `.toml` scene file and spawn it
    pub fn load(world: &mut World, path: impl AsRef<Path>) -> Result<SceneHandles, SceneError> {
        let description = SceneDescription::load_from_file(path)?;
        Self::spawn(world, &description)
    }

    /// Spawn every entity of `description`, then bind orientation targets
    ///
    /// The description is validated first, so a rejected scene leaves the
    /// world untouched. Names must also be unused by entities already in the
    /// world, so `World::find_by_name` stays unambiguous.
    pub fn spawn(world: &mut World, description: &SceneDescription) -> Result<SceneHandles, SceneError> {
        Self::validate(world, description)?;

        let mut handles = SceneHandles::with_capacity(description.entities.len());
        for entity_desc in &description.entities {
            let entity = Self::spawn_entity(world, entity_desc)?;
            handles.insert(entity_desc.name.clone(), entity);
        }

        for entity_desc in &description.entities {
            let Some(sync_desc) = &entity_desc.orientation_sync else {
                continue;
            };

            let mut sync = OrientationSyncComponent::new().with_up_reference(sync_desc.up);
            match &sync_desc.target {
                Some(target) => {
                    sync.target = handles.get(target).copied();
                    log::debug!("Bound '{}' to follow '{}'", entity_desc.name, target);
                }
                None => log::warn!("'{}' has an orientation sync with no target", entity_desc.name),
            }
            world.add_component(handles[&entity_desc.name], sync)?;
        }

        log::info!("Spawned scene with {} entities", handles.len());
        Ok(handles)
    }

    fn validate(world: &World, description: &SceneDescription) -> Result<(), SceneError> {
        let mut names = HashSet::with_capacity(description.entities.len());
        for entity_desc in &description.entities {
            let name = entity_desc.name.as_str();
            if !names.insert(name) || world.find_by_name(name).is_some() {
                return Err(SceneError::DuplicateName(entity_desc.name.clone()));
            }
            if let Some(forward) = entity_desc.forward {
                let forward = Vec3::from(forward);
                if !forward.iter().all(|c| c.is_finite()) || forward.norm() < DIRECTION_EPSILON {
                    return Err(SceneError::DegenerateForward(entity_desc.name.clone()));
                }
            }
        }

        for entity_desc in &description.entities {
            let target = entity_desc
                .orientation_sync
                .as_ref()
                .and_then(|sync| sync.target.as_deref());
            if let Some(target) = target {
                if !names.contains(target) {
                    return Err(SceneError::UnknownTarget {
                        owner: entity_desc.name.clone(),
                        target: target.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    fn spawn_entity(world: &mut World, entity_desc: &EntityDescription) -> Result<Entity, SceneError> {
        let mut transform = TransformComponent::from_position(Vec3::from(entity_desc.position))
            .with_scale(Vec3::from(entity_desc.scale));
        if let Some(forward) = entity_desc.forward {
            transform = transform.with_forward(Vec3::from(forward));
        }

        let entity = world.create_entity();
        world.add_component(entity, NameComponent::new(entity_desc.name.as_str()))?;
        world.add_component(entity, transform)?;
        Ok(entity)
    }
}
