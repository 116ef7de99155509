//! Scene description and loading
//!
//! Scenes are declared in RON or TOML and spawned into an ECS [`World`].
//! Orientation targets are bound by entity name, which is the only way the
//! scene file refers to another entity.
//!
//! ```text
//! scene.ron ──▶ SceneDescription ──▶ SceneLoader::spawn ──▶ World
//!                                     (names → Entity handles)
//! ```
//!
//! [`World`]: crate::ecs::World

mod description;
mod loader;

pub use description::{EntityDescription, OrientationSyncDescription, SceneDescription};
pub use loader::{SceneError, SceneHandles, SceneLoader};
