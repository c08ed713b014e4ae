//! # Planar Collision
//!
//! Narrow-phase collision detection for 2D rigid-body physics.
//!
//! ## Features
//!
//! - **Primitive Tests**: Circle, oriented box and ray primitives
//! - **Contact Manifolds**: Position, normal and penetration depth per contact
//! - **Allocation Free**: Contacts are written into a caller-owned [`ContactBuffer`]
//! - **Configurable Tolerances**: Numeric thresholds loadable from TOML or RON
//!
//! ## Quick Start
//!
//! ```rust
//! use planar_collision::prelude::*;
//! use slotmap::SlotMap;
//!
//! let mut bodies: SlotMap<BodyHandle, &str> = SlotMap::with_key();
//! let ball = bodies.insert("ball");
//! let crate_body = bodies.insert("crate");
//!
//! let circle = CirclePrimitive::new(Vec3::new(1.4, 0.0, 0.0), 0.5).unwrap();
//! let block = BoxPrimitive::from_angle(Vec3::zeros(), 0.0, 1.0, 1.0).unwrap();
//!
//! let detector = CollisionDetector::new();
//! let mut contacts = ContactBuffer::new();
//! let count = detector.circle_box_collision(&mut contacts, ball, crate_body, &circle, &block);
//!
//! assert_eq!(count, 1);
//! assert!(contacts[0].penetration > 0.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core modules
pub mod core;

pub mod foundation;
pub mod config;
pub mod physics;

pub use physics::collision::{
    BoxPrimitive, CirclePrimitive, Collision, CollisionDetector, CollisionType, ContactBuffer,
    Primitive, PrimitiveError, PrimitiveKind, RayPrimitive, MAX_CONTACTS,
};
pub use physics::BodyHandle;

/// Common imports for detector users
pub mod prelude {
    pub use crate::{
        BodyHandle,
        BoxPrimitive, CirclePrimitive, RayPrimitive, Primitive, PrimitiveKind, PrimitiveError,
        Collision, CollisionType, ContactBuffer, CollisionDetector,
        foundation::math::{Vec2, Vec3, Quat},
        config::{Config, ConfigError, ConfigFormat},
        core::config::{DetectorConfig, Tolerances, TieBreakPolicy},
    };
}
