//! Serializable scene layout

use crate::config::Config;
use crate::ecs::components::UpReference;
use serde::{Deserialize, Serialize};

/// A scene: a flat list of named entities
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    /// Entities to spawn, in order
    #[serde(default)]
    pub entities: Vec<EntityDescription>,
}

impl Config for SceneDescription {}

/// One entity and its components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDescription {
    /// Unique name within the scene
    pub name: String,

    /// World position
    #[serde(default)]
    pub position: [f32; 3],

    /// Initial facing; defaults to -Z
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward: Option<[f32; 3]>,

    /// Scale factors
    #[serde(default = "unit_scale")]
    pub scale: [f32; 3],

    /// Follow another entity's facing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation_sync: Option<OrientationSyncDescription>,
}

/// Orientation sync binding for an entity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrientationSyncDescription {
    /// Name of the entity to follow; left empty the synchronizer is unbound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    /// Up vector convention
    #[serde(default)]
    pub up: UpReference,
}

fn unit_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

impl EntityDescription {
    /// Entity at `position` with default facing and no components
    pub fn new(name: impl Into<String>, position: [f32; 3]) -> Self {
        Self {
            name: name.into(),
            position,
            forward: None,
            scale: unit_scale(),
            orientation_sync: None,
        }
    }

    /// Builder pattern: Set the initial facing
    pub fn facing(mut self, forward: [f32; 3]) -> Self {
        self.forward = Some(forward);
        self
    }

    /// Builder pattern: Follow the named entity's facing
    pub fn following(mut self, target: impl Into<String>) -> Self {
        self.orientation_sync = Some(OrientationSyncDescription {
            target: Some(target.into()),
            up: UpReference::World,
        });
        self
    }
}
