//! Collision Demo
//!
//! Runs a fixed number of frames in which one cube slides through another
//! while spinning, and logs when the two meshes start and stop touching:
//! - Cube A stays at the origin (its transform refresh is memoized)
//! - Cube B moves along X and rotates around Y every frame
//! - Collision transitions are logged with the first offending triangle pair
//!
//! Usage: `collision_demo [config.toml|config.ron]`

use mesh_bvh::foundation::logging;
use mesh_bvh::prelude::*;
use serde::{Deserialize, Serialize};

/// Simulated frame duration
const FRAME_TIME: f32 = 1.0 / 60.0;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
enum AppError {
    /// Invalid build parameters
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Generated geometry was rejected
    #[error("Mesh error: {0}")]
    Mesh(#[from] MeshError),
}

/// Demo settings, loadable from TOML or RON
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct AppConfig {
    /// Default log filter when `RUST_LOG` is unset
    log_level: String,
    /// Hierarchy construction parameters
    bvh: BvhConfig,
    /// Number of frames to simulate
    frames: u32,
    /// Speed of cube B along X in units per second
    speed: f32,
    /// Starting X distance between the two cubes
    separation: f32,
    /// Rotation of cube B around Y in radians per second
    spin: f32,
    /// Grid resolution of each cube face
    subdivisions: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            bvh: BvhConfig::default(),
            frames: 600,
            speed: 1.0,
            separation: 5.0,
            spin: 0.5,
            subdivisions: 8,
        }
    }
}

impl Config for AppConfig {}

/// Load the config named on the command line, falling back to defaults
fn load_config() -> (AppConfig, Option<(String, ConfigError)>) {
    match std::env::args().nth(1) {
        None => (AppConfig::default(), None),
        Some(path) => match AppConfig::load_from_file(&path) {
            Ok(config) => (config, None),
            Err(e) => (AppConfig::default(), Some((path, e))),
        },
    }
}

fn build_cube(config: &AppConfig) -> Result<CollisionMesh, AppError> {
    let mesh = TriangleMesh::subdivided_cube(1.0, config.subdivisions);
    Ok(CollisionMesh::from_indices(&mesh.vertices, &mesh.indices, config.bvh)?)
}

fn run(config: &AppConfig) -> Result<(), AppError> {
    config.bvh.validate()?;

    let mut cube_a = build_cube(config)?;
    let mut cube_b = build_cube(config)?;

    let stats = cube_a.tree().stats();
    log::info!(
        "Built cube hierarchies: {} triangles, {} nodes, {} leaves, depth {}",
        stats.triangle_count, stats.node_count, stats.leaf_count, stats.depth
    );
    log::trace!("Cube A hierarchy:\n{}", cube_a.tree());

    let mut colliding = false;
    let mut contact_frames = 0u32;

    for frame in 0..config.frames {
        let t = frame as f32 * FRAME_TIME;
        let x = -config.separation + config.speed * t;

        let model_b = Mat4::new_translation(&Vec3::new(x, 0.0, 0.0))
            * Mat4::from_axis_angle(&Vec3::y_axis(), config.spin * t);

        cube_a.set_transform(&Mat4::identity());
        cube_b.set_transform(&model_b);

        match cube_a.first_contact(&cube_b) {
            Some(pair) => {
                if !colliding {
                    log::info!(
                        "Frame {}: collision started at x = {:.3} (A {:?}, B {:?})",
                        frame, x, pair.triangle_a, pair.triangle_b
                    );
                }
                colliding = true;
                contact_frames += 1;
            }
            None => {
                if colliding {
                    log::info!("Frame {}: collision ended at x = {:.3}", frame, x);
                }
                colliding = false;
            }
        }
    }

    log::info!("{} of {} frames in contact", contact_frames, config.frames);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (config, load_error) = load_config();
    logging::init_with_level(&config.log_level);

    if let Some((path, e)) = load_error {
        log::warn!("Failed to load config '{}': {}. Using defaults", path, e);
    }

    run(&config)?;
    Ok(())
}
