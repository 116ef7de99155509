//! Orientation sync system
//!
//! Copies each target's forward direction onto the entities following it.
//! Registered in [`SystemPhase::LateUpdate`] so every target has finished
//! moving for the frame before it is read.

use std::collections::HashSet;

use crate::ecs::components::{OrientationSyncComponent, TransformComponent};
use crate::ecs::scheduler::SystemPhase;
use crate::ecs::system::{System, SystemError, SystemId};
use crate::ecs::{Entity, World};
use thiserror::Error;

/// Orientation sync errors
///
/// All of these are configuration mistakes; the owner's transform is left
/// exactly as it was when one is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// The entity carries no [`OrientationSyncComponent`]
    #[error("entity {owner} has no orientation sync component")]
    NotSynchronized {
        /// Entity passed to `synchronize`
        owner: Entity,
    },

    /// The target slot was never filled
    #[error("entity {owner} has no orientation target bound")]
    UnboundTarget {
        /// Synchronized entity
        owner: Entity,
    },

    /// The target was destroyed after binding
    #[error("orientation target {target} of entity {owner} no longer exists")]
    TargetDespawned {
        /// Synchronized entity
        owner: Entity,
        /// Stale target handle
        target: Entity,
    },

    /// Owner or target lacks a transform
    #[error("entity {entity} has no transform")]
    MissingTransform {
        /// Entity without a transform
        entity: Entity,
    },

    /// Following the target chain from `owner` never reaches a fixed target
    #[error("orientation targets form a cycle starting at entity {owner}")]
    TargetCycle {
        /// Entity whose chain loops
        owner: Entity,
    },
}

/// Set `owner`'s forward direction to its target's forward direction
pub fn synchronize(world: &mut World, owner: Entity) -> Result<(), SyncError> {
    let sync = *world
        .get_component::<OrientationSyncComponent>(owner)
        .ok_or(SyncError::NotSynchronized { owner })?;

    let target = sync.target.ok_or(SyncError::UnboundTarget { owner })?;
    if !world.is_alive(target) {
        return Err(SyncError::TargetDespawned { owner, target });
    }

    let forward = world
        .get_component::<TransformComponent>(target)
        .ok_or(SyncError::MissingTransform { entity: target })?
        .forward();

    let transform = world
        .get_component_mut::<TransformComponent>(owner)
        .ok_or(SyncError::MissingTransform { entity: owner })?;
    transform.set_forward(forward, sync.up_reference);

    Ok(())
}

/// Synchronized entities ordered so that a follower runs after any target
/// that is itself following something
fn update_order(world: &World) -> Result<Vec<Entity>, SyncError> {
    let mut ordered: Vec<(usize, Entity)> = world
        .entities_with::<OrientationSyncComponent>()
        .into_iter()
        .map(|owner| chain_depth(world, owner).map(|depth| (depth, owner)))
        .collect::<Result<_, _>>()?;

    ordered.sort_by_key(|&(depth, _)| depth);
    Ok(ordered.into_iter().map(|(_, owner)| owner).collect())
}

/// Number of synchronized links between `owner` and the first target that
/// does not follow anything
fn chain_depth(world: &World, owner: Entity) -> Result<usize, SyncError> {
    let mut visited = HashSet::from([owner]);
    let mut current = owner;
    let mut depth = 0;

    while let Some(target) = world
        .get_component::<OrientationSyncComponent>(current)
        .and_then(|sync| sync.target)
    {
        // A self-target holds still, so it orders like a fixed target
        if target == current || !world.has_component::<OrientationSyncComponent>(target) {
            break;
        }
        if !visited.insert(target) {
            return Err(SyncError::TargetCycle { owner });
        }
        depth += 1;
        current = target;
    }

    Ok(depth)
}

/// Late-update system driving every [`OrientationSyncComponent`]
///
/// Fails fast: the first misconfigured entity aborts the frame.
#[derive(Debug, Default)]
pub struct OrientationSyncSystem {
    synchronized_last_frame: usize,
}

impl OrientationSyncSystem {
    /// Scheduler id
    pub const ID: SystemId = SystemId("orientation_sync");

    /// Create the system
    pub fn new() -> Self {
        Self::default()
    }

    /// Entities updated by the most recent successful frame
    pub fn synchronized_last_frame(&self) -> usize {
        self.synchronized_last_frame
    }
}

impl System for OrientationSyncSystem {
    fn id(&self) -> SystemId {
        Self::ID
    }

    fn phase(&self) -> SystemPhase {
        SystemPhase::LateUpdate
    }

    fn execute(&mut self, world: &mut World, _delta_time: f32) -> Result<(), SystemError> {
        let order = update_order(world)?;

        for &owner in &order {
            if let Err(error) = synchronize(world, owner) {
                log::error!("Orientation sync failed for '{}': {}", world.display_name(owner), error);
                return Err(error.into());
            }
        }

        self.synchronized_last_frame = order.len();
        log::trace!("Synchronized {} orientations", order.len());
        Ok(())
    }
}
