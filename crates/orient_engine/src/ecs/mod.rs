//! Entity-Component-System implementation
//!
//! A single-threaded ECS: generational entity handles, typed component
//! storage, and a phase-ordered system scheduler.

pub mod world;
pub mod entity;
pub mod component;
pub mod system;
pub mod scheduler;
pub mod components;
pub mod systems;

mod storage;

#[cfg(test)]
mod tests;

pub use world::{World, WorldError};
pub use entity::Entity;
pub use component::Component;
pub use system::{System, SystemError, SystemId};
pub use scheduler::{ExecutionPlan, SchedulerError, SystemPhase, SystemScheduler};
