//! Orientation sync component
//!
//! Marks an entity whose forward direction follows another entity's forward
//! direction every frame; the classic use is a billboard tracking the camera.
//! See [`crate::ecs::systems::OrientationSyncSystem`] for the per-frame update.

use crate::ecs::components::UpReference;
use crate::ecs::{Component, Entity};

/// Follow another entity's facing
///
/// `target` is a weak handle: the target's lifetime belongs to the world, and
/// destroying it leaves this component pointing at a stale handle, which the
/// sync system reports as an error rather than skipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrientationSyncComponent {
    /// Entity whose forward direction is copied; `None` until bound
    pub target: Option<Entity>,

    /// How the owner's up vector is re-derived after the copy
    pub up_reference: UpReference,
}

impl Component for OrientationSyncComponent {}

impl OrientationSyncComponent {
    /// Unbound synchronizer; must be bound before the first frame runs
    pub fn new() -> Self {
        Self::default()
    }

    /// Synchronizer already bound to `target`
    pub fn targeting(target: Entity) -> Self {
        Self {
            target: Some(target),
            ..Self::default()
        }
    }

    /// Builder pattern: Set the up reference
    pub fn with_up_reference(mut self, up_reference: UpReference) -> Self {
        self.up_reference = up_reference;
        self
    }

    /// Point at a new target, returning the previous one
    pub fn bind(&mut self, target: Entity) -> Option<Entity> {
        self.target.replace(target)
    }

    /// Clear the target slot
    pub fn unbind(&mut self) -> Option<Entity> {
        self.target.take()
    }

    /// Whether a target is set (it may still be stale)
    pub fn is_bound(&self) -> bool {
        self.target.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::World;

    #[test]
    fn test_bind_and_unbind() {
        let mut world = World::new();
        let camera = world.create_entity();
        let other = world.create_entity();

        let mut sync = OrientationSyncComponent::new();
        assert!(!sync.is_bound());
        assert_eq!(sync.up_reference, UpReference::World);

        assert_eq!(sync.bind(camera), None);
        assert_eq!(sync.bind(other), Some(camera));
        assert_eq!(sync.unbind(), Some(other));
        assert!(!sync.is_bound());
    }

    #[test]
    fn test_targeting_builder() {
        let mut world = World::new();
        let camera = world.create_entity();

        let sync = OrientationSyncComponent::targeting(camera).with_up_reference(UpReference::Current);
        assert_eq!(sync.target, Some(camera));
        assert_eq!(sync.up_reference, UpReference::Current);
    }
}
