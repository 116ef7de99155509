//! System trait and implementations

use crate::ecs::scheduler::SystemPhase;
use crate::ecs::systems::SyncError;
use crate::ecs::World;
use thiserror::Error;

/// Unique identifier for systems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SystemId(pub &'static str);

impl std::fmt::Display for SystemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// System trait with phase and dependency declaration
pub trait System {
    /// System identifier
    fn id(&self) -> SystemId;

    /// Which phase this system belongs to
    fn phase(&self) -> SystemPhase;

    /// Systems that must execute before this one
    ///
    /// Systems in an earlier phase are always satisfied.
    fn dependencies(&self) -> &[SystemId] {
        &[]
    }

    /// Execute the system
    fn execute(&mut self, world: &mut World, delta_time: f32) -> Result<(), SystemError>;
}

/// Errors raised while a system runs
#[derive(Error, Debug)]
pub enum SystemError {
    /// Orientation synchronization failed
    #[error("Orientation sync error: {0}")]
    OrientationSync(#[from] SyncError),

    /// Custom system error
    #[error("System error: {0}")]
    Custom(String),
}
