//! Narrow-phase collision detection
//!
//! Exact overlap tests between pairs of planar primitives, producing contact
//! manifolds for a constraint solver.
//!
//! # Architecture
//!
//! - **Caller-Owned Data**: Primitives and bodies belong to the caller and are only read
//! - **Caller-Owned Output**: Contacts are written into a fixed-capacity [`ContactBuffer`]
//! - **Stateless Detector**: [`CollisionDetector`] holds configuration only, so calls
//!   are idempotent and can run on many threads at once
//!
//! # Module Organization
//!
//! - [`primitives`] - Circle, box and ray primitives
//! - [`contact`] - Contact records and the output buffer
//! - [`detector`] - The per-pair entry points
//! - [`shape`] - Kind-erased primitives and pair dispatch
//!
//! # Normal Convention
//!
//! Every contact normal points from `body2` toward `body1`: moving `body1`
//! along the normal by `penetration` separates the pair. Ray contacts reuse
//! `penetration` for the hit distance.

pub mod primitives;
pub mod contact;
pub mod detector;
pub mod shape;

mod circle;
mod box_box;
mod ray;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use primitives::{CirclePrimitive, BoxPrimitive, RayPrimitive, PrimitiveError};
pub use contact::{Collision, CollisionType, ContactBuffer, MAX_CONTACTS};
pub use detector::CollisionDetector;
pub use shape::{Primitive, PrimitiveKind};
