//! Scene descriptions for the contact demo
//!
//! Scenes are RON files listing named bodies, each with a position, an
//! optional rotation and a shape. Shapes are validated through the primitive
//! constructors when the scene is built.

use planar_collision::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;
use std::f32::consts::PI;

/// Errors raised while loading a scene
#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    /// Scene file could not be read
    #[error("failed to read scene: {0}")]
    Io(#[from] std::io::Error),

    /// Scene file is not valid RON
    #[error("failed to parse scene: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// A body's shape violates a primitive invariant
    #[error("body '{name}' is invalid: {source}")]
    InvalidBody {
        /// Name of the offending body
        name: String,
        /// Constructor error
        source: PrimitiveError,
    },
}

/// Shape of a body, in the body's local frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ShapeDesc {
    /// Circle centred on the body
    Circle { radius: f32 },
    /// Box centred on the body, rotated by the body's angle
    Box { half_width: f32, half_height: f32 },
    /// Ray starting at the body's position
    Ray {
        direction: (f32, f32),
        #[serde(default)]
        max_distance: f32,
    },
}

/// One body as written in a scene file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyDesc {
    /// Label used in reports
    pub name: String,
    /// World position
    pub position: (f32, f32),
    /// Rotation about z in radians
    #[serde(default)]
    pub angle: f32,
    /// Shape
    pub shape: ShapeDesc,
}

impl BodyDesc {
    fn to_primitive(&self) -> Result<Primitive, PrimitiveError> {
        let position = Vec3::new(self.position.0, self.position.1, 0.0);
        let primitive = match self.shape {
            ShapeDesc::Circle { radius } => CirclePrimitive::new(position, radius)?.into(),
            ShapeDesc::Box { half_width, half_height } => {
                BoxPrimitive::from_angle(position, self.angle, half_width, half_height)?.into()
            }
            ShapeDesc::Ray { direction, max_distance } => {
                let direction = Vec3::new(direction.0, direction.1, 0.0);
                RayPrimitive::new(position, direction, max_distance)?.into()
            }
        };
        Ok(primitive)
    }
}

/// A body ready for collision testing
#[derive(Debug, Clone)]
pub struct Body {
    /// Label used in reports
    pub name: String,
    /// World-space primitive
    pub shape: Primitive,
}

/// All bodies of a scene
#[derive(Debug, Default)]
pub struct Scene {
    bodies: SlotMap<BodyHandle, Body>,
}

impl Scene {
    /// Build a scene from body descriptions
    pub fn from_descs(descs: &[BodyDesc]) -> Result<Self, SceneError> {
        let mut scene = Self::default();
        for desc in descs {
            let shape = desc.to_primitive().map_err(|source| SceneError::InvalidBody {
                name: desc.name.clone(),
                source,
            })?;
            scene.insert(desc.name.clone(), shape);
        }
        Ok(scene)
    }

    /// Load a RON scene file
    pub fn load(path: &str) -> Result<Self, SceneError> {
        let text = std::fs::read_to_string(path)?;
        let descs: Vec<BodyDesc> = ron::from_str(&text)?;
        log::info!("Loaded {} bodies from {}", descs.len(), path);
        Self::from_descs(&descs)
    }

    /// Scatter `count` random circles and boxes over a square of side `extent`
    pub fn random<R: Rng>(rng: &mut R, count: usize, extent: f32) -> Self {
        let mut scene = Self::default();
        let half = extent * 0.5;

        for i in 0..count {
            let position = Vec3::new(rng.gen_range(-half..half), rng.gen_range(-half..half), 0.0);
            let shape = if rng.gen_bool(0.5) {
                CirclePrimitive::new(position, rng.gen_range(0.2..1.5)).map(Primitive::from)
            } else {
                BoxPrimitive::from_angle(
                    position,
                    rng.gen_range(-PI..PI),
                    rng.gen_range(0.2..1.5),
                    rng.gen_range(0.2..1.5),
                )
                .map(Primitive::from)
            };

            match shape {
                Ok(shape) => {
                    scene.insert(format!("body{i}"), shape);
                }
                Err(e) => log::warn!("Skipping random body {}: {}", i, e),
            }
        }

        scene
    }

    /// Add a body
    pub fn insert(&mut self, name: String, shape: Primitive) -> BodyHandle {
        self.bodies.insert(Body { name, shape })
    }

    /// Number of bodies
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Whether the scene has no bodies
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Label of a body, or `"?"` for a stale handle
    pub fn name(&self, handle: BodyHandle) -> &str {
        self.bodies.get(handle).map_or("?", |b| b.name.as_str())
    }

    /// Test every pair of bodies once, returning all contacts found
    pub fn contacts(&self, detector: &CollisionDetector) -> Vec<Collision> {
        let bodies: Vec<(BodyHandle, &Body)> = self.bodies.iter().collect();
        let mut buffer = ContactBuffer::new();
        let mut found = Vec::new();

        for (i, (handle1, body1)) in bodies.iter().enumerate() {
            for (handle2, body2) in &bodies[i + 1..] {
                if detector.collide(&mut buffer, *handle1, *handle2, &body1.shape, &body2.shape) > 0 {
                    found.extend_from_slice(&buffer);
                }
            }
        }

        found
    }
}
