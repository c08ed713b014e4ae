//! Contact demo
//!
//! Loads a scene (or scatters a random one), runs every body pair through the
//! narrow phase and logs the resulting contacts.
//!
//! ```text
//! contact_demo [--config detector.toml] [--scene FILE | --random COUNT] [--seed N]
//! ```

mod scene;

use clap::Parser;
use planar_collision::foundation::logging;
use planar_collision::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use scene::Scene;

const DEFAULT_SCENE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/scenes/stack.ron");
const RANDOM_EXTENT: f32 = 20.0;

/// Runs every body pair of a scene through the narrow phase
#[derive(Debug, Parser)]
#[command(name = "contact_demo")]
struct Options {
    /// Detector configuration file (.toml or .ron)
    #[arg(long, value_name = "FILE")]
    config: Option<String>,

    /// RON scene file, defaults to the bundled stack scene
    #[arg(long, value_name = "FILE", conflicts_with = "random")]
    scene: Option<String>,

    /// Scatter this many random bodies instead of loading a scene
    #[arg(long, value_name = "COUNT")]
    random: Option<usize>,

    /// Seed for the random scene
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init(log::LevelFilter::Info);

    let options = Options::parse();
    log::info!("Starting contact demo with {:?}", options);

    let config = match &options.config {
        Some(path) => DetectorConfig::load_validated(path)?,
        None => DetectorConfig::default(),
    };
    let detector = CollisionDetector::with_config(config);

    let scene = match options.random {
        Some(count) => {
            let mut rng = StdRng::seed_from_u64(options.seed);
            Scene::random(&mut rng, count, RANDOM_EXTENT)
        }
        None => Scene::load(options.scene.as_deref().unwrap_or(DEFAULT_SCENE))?,
    };

    if scene.is_empty() {
        log::warn!("Scene has no bodies");
        return Ok(());
    }

    let contacts = scene.contacts(&detector);
    for contact in &contacts {
        log::info!(
            "{} <- {}: depth {:.4}, normal ({:.3}, {:.3}), at ({:.3}, {:.3})",
            scene.name(contact.body1),
            scene.name(contact.body2),
            contact.penetration,
            contact.normal.x,
            contact.normal.y,
            contact.position.x,
            contact.position.y,
        );
    }

    log::info!("{} bodies, {} contacts", scene.len(), contacts.len());
    Ok(())
}
