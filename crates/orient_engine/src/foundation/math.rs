//! Math utilities and types
//!
//! Provides the vector, quaternion and transform types used by the ECS.
//! All directions follow Y-up right-handed conventions: objects face -Z.

pub use nalgebra::{Matrix4, Unit, Vector3};
use nalgebra::Quaternion;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Local-space direction vectors of an unrotated object
pub mod axes {
    use super::Vec3;

    /// Local forward (-Z)
    pub fn forward() -> Vec3 {
        Vec3::new(0.0, 0.0, -1.0)
    }

    /// Local right (+X)
    pub fn right() -> Vec3 {
        Vec3::new(1.0, 0.0, 0.0)
    }

    /// Local up (+Y), also the world up
    pub fn up() -> Vec3 {
        Vec3::new(0.0, 1.0, 0.0)
    }
}

/// Length below which a direction is treated as degenerate
pub const DIRECTION_EPSILON: f32 = 1e-6;

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Convert to a transformation matrix
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Combine this transform with another
    pub fn combine(&self, other: &Self) -> Self {
        Self {
            position: self.position + self.rotation * (self.scale.component_mul(&other.position)),
            rotation: self.rotation * other.rotation,
            scale: self.scale.component_mul(&other.scale),
        }
    }
}

/// Rotation whose local forward (-Z) points along `forward` with its up as
/// close to `up` as possible.
///
/// Returns `None` when either vector is degenerate or when they are parallel,
/// since no unique roll exists in that case.
pub fn look_rotation(forward: &Vec3, up: &Vec3) -> Option<Quat> {
    let forward = forward.try_normalize(DIRECTION_EPSILON)?;
    let up = up.try_normalize(DIRECTION_EPSILON)?;

    if forward.cross(&up).norm() < DIRECTION_EPSILON {
        return None;
    }

    // face_towards maps +Z onto its direction, so aim +Z away from forward
    Some(Quat::face_towards(&-forward, &up))
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Wrap an angle in radians into `[0, TAU)`
    pub fn wrap_angle(radians: f32) -> f32 {
        radians.rem_euclid(constants::TAU)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_look_rotation_identity() {
        let rotation = look_rotation(&axes::forward(), &axes::up()).expect("valid basis");
        assert_relative_eq!(rotation, Quat::identity(), epsilon = 1e-6);
    }

    #[test]
    fn test_look_rotation_maps_forward() {
        let direction = Vec3::new(-0.7, -1.0, 0.3);
        let rotation = look_rotation(&direction, &axes::up()).expect("valid basis");

        assert_relative_eq!(rotation * axes::forward(), direction.normalize(), epsilon = 1e-5);
        // Right stays horizontal when rolling around world up
        assert_relative_eq!((rotation * axes::right()).y, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_look_rotation_rejects_degenerate() {
        assert!(look_rotation(&Vec3::zeros(), &axes::up()).is_none());
        assert!(look_rotation(&axes::forward(), &Vec3::zeros()).is_none());
        assert!(look_rotation(&Vec3::new(0.0, -2.0, 0.0), &axes::up()).is_none());
    }

    #[test]
    fn test_transform_combine() {
        let parent = Transform {
            position: Vec3::new(1.0, 0.0, 0.0),
            rotation: Quat::from_axis_angle(&Vec3::y_axis(), constants::PI / 2.0),
            scale: Vec3::new(1.0, 1.0, 1.0),
        };
        let child = Transform::from_position(Vec3::new(0.0, 0.0, 1.0));

        let combined = parent.combine(&child);
        assert_relative_eq!(combined.position, Vec3::new(2.0, 0.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_wrap_angle() {
        assert_relative_eq!(utils::wrap_angle(-constants::PI), constants::PI, epsilon = 1e-5);
        assert_relative_eq!(utils::wrap_angle(utils::deg_to_rad(450.0)), constants::PI / 2.0, epsilon = 1e-5);
    }
}
