//! ECS Components module
//!
//! Contains all engine components

pub mod transform;
pub mod orientation_sync;
pub mod name;

pub use transform::{TransformComponent, TransformFactory, UpReference};
pub use orientation_sync::OrientationSyncComponent;
pub use name::NameComponent;
