//! Camera orbit system for the demo

use orient_engine::ecs::components::TransformFactory;
use orient_engine::prelude::*;
use orient_engine::foundation::math::utils::wrap_angle;

/// Circles the camera around a point, always looking at it
pub struct OrbitCameraSystem {
    camera: Entity,
    center: Vec3,
    radius: f32,
    height: f32,
    angular_speed: f32,
    angle: f32,
}

impl OrbitCameraSystem {
    /// Orbit `camera` around `center` at `radius`, keeping its current height
    pub fn new(camera: Entity, center: Vec3, radius: f32, height: f32, angular_speed: f32) -> Self {
        Self {
            camera,
            center,
            radius,
            height,
            angular_speed,
            angle: 0.0,
        }
    }
}

impl System for OrbitCameraSystem {
    fn id(&self) -> SystemId {
        SystemId("orbit_camera")
    }

    fn phase(&self) -> SystemPhase {
        SystemPhase::Update
    }

    fn execute(&mut self, world: &mut World, delta_time: f32) -> Result<(), SystemError> {
        self.angle = wrap_angle(self.angle + self.angular_speed * delta_time);

        let position = self.center
            + Vec3::new(self.radius * self.angle.sin(), self.height, self.radius * self.angle.cos());
        let look = TransformFactory::look_at(position, self.center, Vec3::y());

        let transform = world
            .get_component_mut::<TransformComponent>(self.camera)
            .ok_or_else(|| SystemError::Custom("orbit camera has no transform".to_string()))?;
        transform.position = look.position;
        transform.rotation = look.rotation;
        Ok(())
    }
}
