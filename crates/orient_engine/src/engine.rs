//! Core engine implementation

use crate::{
    application::Application,
    config::{Config, ConfigError},
    ecs::{System, SchedulerError, SystemScheduler, World},
    ecs::systems::OrientationSyncSystem,
    foundation::time::Timer,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Simulation rate; every tick advances by `1 / target_fps` seconds
    pub target_fps: f32,

    /// Stop after this many frames (`None` runs until stopped)
    pub max_frames: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            target_fps: 60.0,
            max_frames: None,
        }
    }
}

impl Config for EngineConfig {}

impl EngineConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.target_fps.is_finite() || self.target_fps <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "target_fps",
                reason: format!("must be a positive number, got {}", self.target_fps),
            });
        }
        Ok(())
    }

    /// Seconds per tick
    pub fn fixed_delta(&self) -> f32 {
        1.0 / self.target_fps
    }
}

/// Main engine struct
///
/// Owns the world and runs the registered systems once per tick. The
/// orientation sync system is always registered.
pub struct Engine {
    /// ECS world containing all entities and components
    pub world: World,

    scheduler: SystemScheduler,

    /// Frame timing
    timer: Timer,

    config: EngineConfig,

    /// Whether the engine should continue running
    running: bool,
}

impl Engine {
    /// Create a new engine instance
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        log::info!("Initializing engine at {} fps...", config.target_fps);
        config.validate()?;

        let mut scheduler = SystemScheduler::new();
        scheduler.add_system(Box::new(OrientationSyncSystem::new()))?;

        Ok(Self {
            world: World::new(),
            scheduler,
            timer: Timer::new(),
            config,
            running: true,
        })
    }

    /// Register a system
    pub fn add_system(&mut self, system: Box<dyn System>) -> Result<(), EngineError> {
        self.scheduler.add_system(system)?;
        Ok(())
    }

    /// Run every system once
    pub fn tick(&mut self, delta_time: f32) -> Result<(), EngineError> {
        self.scheduler.execute_frame(&mut self.world, delta_time)?;
        self.timer.advance(delta_time);
        Ok(())
    }

    /// Run the engine main loop with the given application
    ///
    /// `cleanup` is called whether or not the loop ends in an error.
    pub fn run<T: Application>(config: EngineConfig, app: &mut T) -> Result<(), EngineError> {
        let mut engine = Self::new(config)?;

        app.initialize(&mut engine)
            .map_err(|e| EngineError::ApplicationError(format!("App initialization: {}", e)))?;

        log::info!("Starting main loop...");
        let result = engine.main_loop(app);

        app.cleanup(&mut engine);
        match &result {
            Ok(()) => log::info!("Engine shutdown after {} frames", engine.frame_count()),
            Err(e) => log::error!("Engine stopped at frame {}: {}", engine.frame_count(), e),
        }
        result
    }

    fn main_loop<T: Application>(&mut self, app: &mut T) -> Result<(), EngineError> {
        let delta_time = self.config.fixed_delta();

        while self.running {
            if self.config.max_frames.is_some_and(|max| self.frame_count() >= max) {
                break;
            }

            app.update(self, delta_time)
                .map_err(|e| EngineError::ApplicationError(format!("App update: {}", e)))?;
            self.tick(delta_time)?;
        }
        Ok(())
    }

    /// Ask the main loop to exit after the current frame
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Frames completed so far
    pub fn frame_count(&self) -> u64 {
        self.timer.frame_count()
    }

    /// Simulated seconds elapsed
    pub fn total_time(&self) -> f32 {
        self.timer.total_time()
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

/// Engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// System registration or execution failed
    #[error("Scheduler error: {0}")]
    Scheduler(#[from] SchedulerError),

    /// Application error
    #[error("Application error: {0}")]
    ApplicationError(String),
}
