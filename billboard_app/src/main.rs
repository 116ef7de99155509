//! Billboard demo
//!
//! Loads a scene, orbits the camera around the origin and keeps every
//! billboard in the scene facing the same way as the camera.
//!
//! Usage: `billboard_demo [scene.ron|scene.toml] [engine.toml|engine.ron]`

mod orbit;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use orient_engine::foundation::logging;
use orient_engine::prelude::*;
use orbit::OrbitCameraSystem;

const CAMERA_NAME: &str = "camera";
const ORBIT_RADIUS: f32 = 10.0;
const ORBIT_HEIGHT: f32 = 2.0;
const ORBIT_SPEED: f32 = 0.5; // radians per second
const REPORT_EVERY_FRAMES: u64 = 60;
const DEFAULT_MAX_FRAMES: u64 = 240;

struct BillboardDemoApp {
    scene_path: PathBuf,
}

impl BillboardDemoApp {
    fn report(engine: &Engine) {
        let world = &engine.world;
        for entity in world.entities_with::<OrientationSyncComponent>() {
            if let Some(transform) = world.get_component::<TransformComponent>(entity) {
                let forward = transform.forward();
                log::info!(
                    "frame {:>4} | {:<12} forward ({:+.3}, {:+.3}, {:+.3})",
                    engine.frame_count(),
                    world.display_name(entity),
                    forward.x,
                    forward.y,
                    forward.z
                );
            }
        }
    }
}

impl Application for BillboardDemoApp {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        log::info!("Loading scene from {}", self.scene_path.display());
        let handles = SceneLoader::load(&mut engine.world, &self.scene_path)?;

        let camera = *handles
            .get(CAMERA_NAME)
            .ok_or_else(|| AppError::Custom(format!("scene has no entity named '{}'", CAMERA_NAME)))?;
        engine.add_system(Box::new(OrbitCameraSystem::new(
            camera,
            Vec3::zeros(),
            ORBIT_RADIUS,
            ORBIT_HEIGHT,
            ORBIT_SPEED,
        )))?;
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
        if engine.frame_count() % REPORT_EVERY_FRAMES == 0 {
            Self::report(engine);
        }
        Ok(())
    }

    fn cleanup(&mut self, engine: &mut Engine) {
        Self::report(engine);
        log::info!("Simulated {:.2}s", engine.total_time());
    }
}

fn asset_path(file: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("assets").join(file)
}

/// Read the engine config, falling back to a bounded default run only when
/// the file does not exist
fn load_engine_config(path: &Path) -> Result<EngineConfig, ConfigError> {
    match EngineConfig::load_from_file(path) {
        Err(ConfigError::Io(e)) if e.kind() == ErrorKind::NotFound => {
            log::warn!("No engine config at {}, using defaults", path.display());
            Ok(EngineConfig {
                max_frames: Some(DEFAULT_MAX_FRAMES),
                ..Default::default()
            })
        }
        result => result,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init("info");

    let mut args = std::env::args().skip(1);
    let scene_path = args.next().map_or_else(|| asset_path("scene.ron"), PathBuf::from);
    let config_path = args.next().map_or_else(|| asset_path("engine.toml"), PathBuf::from);

    let config = load_engine_config(&config_path)?;

    log::info!("Starting billboard demo");
    let mut app = BillboardDemoApp { scene_path };
    match Engine::run(config, &mut app) {
        Ok(()) => {
            log::info!("Billboard demo finished successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Application error: {}", e);
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_engine_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let config = load_engine_config(&dir.path().join("engine.toml")).unwrap();
        assert_eq!(config.max_frames, Some(DEFAULT_MAX_FRAMES));
    }

    #[test]
    fn test_malformed_engine_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.toml");
        std::fs::write(&path, "target_fps = \"fast\"").unwrap();

        assert!(matches!(load_engine_config(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_bundled_assets_load() {
        let config = load_engine_config(&asset_path("engine.toml")).unwrap();
        assert!(config.validate().is_ok());

        let scene = SceneDescription::load_from_file(asset_path("scene.ron")).unwrap();
        assert!(scene.entities.iter().any(|entity| entity.name == CAMERA_NAME));
    }
}
