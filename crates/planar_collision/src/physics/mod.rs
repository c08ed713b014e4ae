//! Physics module for narrow-phase collision detection
//!
//! Provides exact overlap tests between pairs of planar primitives and the
//! contact data a constraint solver consumes. Pair culling, integration and
//! collision response live outside this crate.

pub mod body;
pub mod collision;

pub use body::BodyHandle;
pub use collision::{
    CollisionDetector,
    Collision,
    ContactBuffer,
    Primitive,
};
