//! # Orient Engine
//!
//! A small ECS transform engine whose headline feature is orientation
//! synchronization: entities that copy another entity's facing every frame,
//! the usual way to keep a billboard turned toward the camera.
//!
//! ## Features
//!
//! - **ECS Architecture**: generational entity handles, typed components
//! - **Phase Scheduling**: `PreUpdate` → `Update` → `PostUpdate` → `LateUpdate`
//! - **Orientation Sync**: late-update forward copying with explicit errors
//! - **Scenes**: RON/TOML scene files with name-based target binding
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use orient_engine::prelude::*;
//!
//! struct MyApp;
//!
//! impl Application for MyApp {
//!     fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
//!         SceneLoader::load(&mut engine.world, "scene.ron")?;
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, _engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
//!         Ok(())
//!     }
//!
//!     fn cleanup(&mut self, _engine: &mut Engine) {}
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig { max_frames: Some(600), ..Default::default() };
//!     Engine::run(config, &mut MyApp)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod ecs;
pub mod scene;

mod application;
mod engine;

pub use application::{Application, AppError};
pub use engine::{Engine, EngineConfig, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Application, AppError,
        Engine, EngineConfig, EngineError,
        config::{Config, ConfigError},
        foundation::math::{Vec3, Quat, Transform},
        ecs::{World, Entity, Component, System, SystemError, SystemId, SystemPhase},
        ecs::components::{NameComponent, OrientationSyncComponent, TransformComponent, UpReference},
        ecs::systems::{synchronize, OrientationSyncSystem, SyncError},
        scene::{SceneDescription, SceneLoader},
    };
}
