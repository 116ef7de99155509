//! Transform component for the ECS system
//!
//! Pure data plus the derived direction vectors. All coordinates follow
//! Y-up right-handed conventions: an unrotated object faces -Z with +Y up
//! and +X to its right.

use crate::ecs::Component;
use crate::foundation::math::{axes, look_rotation, Mat4, Quat, Transform as MathTransform, Unit, Vec3, DIRECTION_EPSILON};
use serde::{Deserialize, Serialize};

/// Which up vector to keep when a new forward direction is assigned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UpReference {
    /// Keep the object's up as close to world +Y as possible
    #[default]
    World,
    /// Keep the object's up as close to its current up as possible
    Current,
}

/// ECS Transform component
///
/// Position, rotation and scale in world space. Forward, right and up are
/// derived from the rotation, so they are always unit length and mutually
/// orthogonal.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformComponent {
    /// World space position
    pub position: Vec3,

    /// World space rotation quaternion
    pub rotation: Quat,

    /// World space scale factors
    pub scale: Vec3,
}

impl Component for TransformComponent {}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl TransformComponent {
    /// Create identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create from position only
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create from position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Convert to foundation math Transform for calculations
    pub fn to_math_transform(&self) -> MathTransform {
        MathTransform {
            position: self.position,
            rotation: self.rotation,
            scale: self.scale,
        }
    }

    /// Convert to transformation matrix (TRS order)
    pub fn to_matrix(&self) -> Mat4 {
        self.to_math_transform().to_matrix()
    }

    /// Direction the object is facing
    pub fn forward(&self) -> Vec3 {
        self.rotation * axes::forward()
    }

    /// Object's right direction
    pub fn right(&self) -> Vec3 {
        self.rotation * axes::right()
    }

    /// Object's up direction
    pub fn up(&self) -> Vec3 {
        self.rotation * axes::up()
    }

    /// Point the object along `forward`, re-deriving up per `up_reference`.
    ///
    /// When `forward` is parallel to the chosen up, the object turns by the
    /// shortest arc from its current facing instead. A zero-length `forward`
    /// leaves the transform untouched and returns `false`.
    pub fn set_forward(&mut self, forward: Vec3, up_reference: UpReference) -> bool {
        let Some(direction) = forward.try_normalize(DIRECTION_EPSILON) else {
            log::warn!("Ignoring degenerate forward direction {:?}", forward);
            return false;
        };

        let up_hint = match up_reference {
            UpReference::World => axes::up(),
            UpReference::Current => self.up(),
        };

        if let Some(rotation) = look_rotation(&direction, &up_hint) {
            self.rotation = rotation;
            return true;
        }

        // Shortest arc is undefined for opposite vectors; half-turn about our own up
        let delta = Quat::rotation_between(&self.forward(), &direction)
            .unwrap_or_else(|| Quat::from_axis_angle(&Unit::new_normalize(self.up()), std::f32::consts::PI));
        self.rotation = delta * self.rotation;
        true
    }

    /// Builder pattern: Set position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Builder pattern: Face a direction, keeping world up
    pub fn with_forward(mut self, forward: Vec3) -> Self {
        self.set_forward(forward, UpReference::World);
        self
    }

    /// Builder pattern: Set scale (uniform)
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::new(scale, scale, scale);
        self
    }

    /// Builder pattern: Set scale (non-uniform)
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }
}

/// Transform factory for common configurations
pub struct TransformFactory;

impl TransformFactory {
    /// Camera-style transform at `position` looking at `target`
    ///
    /// Falls back to the default facing when `target` coincides with
    /// `position` or lies straight along `up`.
    pub fn look_at(position: Vec3, target: Vec3, up: Vec3) -> TransformComponent {
        let rotation = look_rotation(&(target - position), &up).unwrap_or_else(Quat::identity);
        TransformComponent::from_position_rotation(position, rotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants::PI;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_transform_identity_directions() {
        let transform = TransformComponent::identity();

        assert_relative_eq!(transform.forward(), Vec3::new(0.0, 0.0, -1.0), epsilon = EPSILON);
        assert_relative_eq!(transform.right(), Vec3::new(1.0, 0.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(transform.up(), Vec3::new(0.0, 1.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_directions_follow_rotation() {
        // 90 degrees around Y turns -Z into -X
        let rotation = Quat::from_axis_angle(&Vec3::y_axis(), PI / 2.0);
        let transform = TransformComponent::from_position_rotation(Vec3::zeros(), rotation);

        assert_relative_eq!(transform.forward(), Vec3::new(-1.0, 0.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(transform.right(), Vec3::new(0.0, 0.0, -1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_set_forward_world_up() {
        let mut transform = TransformComponent::identity();
        let direction = Vec3::new(1.0, 0.5, -2.0);

        assert!(transform.set_forward(direction, UpReference::World));
        assert_relative_eq!(transform.forward(), direction.normalize(), epsilon = EPSILON);
        assert_relative_eq!(transform.right().y, 0.0, epsilon = EPSILON);
        assert!(transform.up().y > 0.0);
    }

    #[test]
    fn test_set_forward_current_up_keeps_roll() {
        // Rolled 90 degrees: up points along -X
        let roll = Quat::from_axis_angle(&Vec3::z_axis(), PI / 2.0);
        let mut transform = TransformComponent::from_position_rotation(Vec3::zeros(), roll);
        let up_before = transform.up();

        assert!(transform.set_forward(Vec3::new(0.0, 1.0, -1.0), UpReference::Current));
        assert_relative_eq!(transform.forward(), Vec3::new(0.0, 1.0, -1.0).normalize(), epsilon = EPSILON);
        assert_relative_eq!(transform.up(), up_before, epsilon = EPSILON);
    }

    #[test]
    fn test_set_forward_parallel_to_up() {
        let mut transform = TransformComponent::identity();

        assert!(transform.set_forward(Vec3::new(0.0, 1.0, 0.0), UpReference::World));
        assert_relative_eq!(transform.forward(), Vec3::new(0.0, 1.0, 0.0), epsilon = EPSILON);
        // Shortest arc from -Z pitches up around +X
        assert_relative_eq!(transform.right(), Vec3::new(1.0, 0.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_set_forward_parallel_and_opposite() {
        // Facing straight down, then asked to face straight up
        let mut transform = TransformComponent::identity();
        transform.set_forward(Vec3::new(0.0, -1.0, 0.0), UpReference::World);

        assert!(transform.set_forward(Vec3::new(0.0, 1.0, 0.0), UpReference::World));
        assert_relative_eq!(transform.forward(), Vec3::new(0.0, 1.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_set_forward_rejects_zero() {
        let mut transform = TransformComponent::identity().with_forward(Vec3::new(1.0, 0.0, 0.0));
        let before = transform.clone();

        assert!(!transform.set_forward(Vec3::zeros(), UpReference::World));
        assert_eq!(transform, before);
    }

    #[test]
    fn test_set_forward_leaves_position_and_scale() {
        let mut transform = TransformComponent::from_position(Vec3::new(1.0, 2.0, 3.0)).with_uniform_scale(2.0);
        transform.set_forward(Vec3::new(0.0, 0.0, 1.0), UpReference::World);

        assert_eq!(transform.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(transform.scale, Vec3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn test_look_at_transform() {
        let eye = Vec3::new(0.0, 0.0, 5.0);
        let transform = TransformFactory::look_at(eye, Vec3::zeros(), Vec3::new(0.0, 1.0, 0.0));

        assert_relative_eq!(transform.position, eye, epsilon = EPSILON);
        assert_relative_eq!(transform.forward(), Vec3::new(0.0, 0.0, -1.0), epsilon = EPSILON);

        let degenerate = TransformFactory::look_at(eye, eye, Vec3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(degenerate.rotation, Quat::identity(), epsilon = EPSILON);
    }

    #[test]
    fn test_matrix_places_position() {
        let transform = TransformComponent::from_position(Vec3::new(1.0, 2.0, 3.0));
        let matrix = transform.to_matrix();

        assert_relative_eq!(matrix[(0, 3)], 1.0);
        assert_relative_eq!(matrix[(1, 3)], 2.0);
        assert_relative_eq!(matrix[(2, 3)], 3.0);
    }
}
