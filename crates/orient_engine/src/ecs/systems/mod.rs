//! ECS Systems module

pub mod orientation_sync;

pub use orientation_sync::{synchronize, OrientationSyncSystem, SyncError};
