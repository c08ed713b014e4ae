//! Math utilities and types
//!
//! Provides the math types used by the detector. Geometry lives in 3D vectors
//! and quaternions, but every test is planar: z is carried through and masked
//! off wherever a direction or distance is measured.

use bitflags::bitflags;

pub use nalgebra::{
    Vector2, Vector3,
    Matrix2,
    Quaternion,
    Unit,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 2x2 matrix type
pub type Mat2 = Matrix2<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

bitflags! {
    /// Components kept by [`mask`]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AxisMask: u8 {
        /// Keep x
        const X = 1 << 0;
        /// Keep y
        const Y = 1 << 1;
        /// Keep z
        const Z = 1 << 2;
        /// The collision plane
        const PLANE = Self::X.bits() | Self::Y.bits();
    }
}

/// Zero every component of `v` not selected by `keep`
pub fn mask(v: Vec3, keep: AxisMask) -> Vec3 {
    Vec3::new(
        if keep.contains(AxisMask::X) { v.x } else { 0.0 },
        if keep.contains(AxisMask::Y) { v.y } else { 0.0 },
        if keep.contains(AxisMask::Z) { v.z } else { 0.0 },
    )
}

/// Project onto the collision plane (z = 0)
pub fn planar(v: Vec3) -> Vec3 {
    mask(v, AxisMask::PLANE)
}

/// Rotation about the z axis by `angle` radians
pub fn z_rotation(angle: f32) -> Quat {
    Quat::from_axis_angle(&Vec3::z_axis(), angle)
}

/// Express a world-space offset in the frame described by `orientation`
pub fn to_local(orientation: &Quat, offset: Vec3) -> Vec3 {
    orientation.inverse_transform_vector(&offset)
}

/// Rotate a local-frame vector back into world space
pub fn to_world(orientation: &Quat, local: Vec3) -> Vec3 {
    orientation.transform_vector(&local)
}

/// Math utility functions
pub mod utils {
    /// Clamp a value between min and max (never panics on inverted bounds)
    pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
        if value < min { min } else if value > max { max } else { value }
    }
}
