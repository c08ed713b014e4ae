//! Primitive collision shapes
//!
//! Circles, oriented boxes and rays in world space. Fields are public so the
//! integration layer can move primitives between steps; the constructors
//! check the invariants the pair tests rely on.

use serde::{Serialize, Deserialize};
use crate::foundation::math::{self, Vec2, Vec3, Quat};

/// Errors raised when a primitive would violate its invariants
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PrimitiveError {
    /// Circle radius must be strictly positive
    #[error("circle radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    /// Box half extents must be non-negative
    #[error("box half extents must be non-negative and finite, got ({0}, {1})")]
    InvalidExtents(f32, f32),

    /// Ray direction must have non-zero length
    #[error("ray direction must be finite and non-zero, got {0:?}")]
    InvalidDirection(Vec3),

    /// A position or distance was NaN or infinite
    #[error("{0} must be finite")]
    NonFinite(&'static str),

    /// Box orientation tilts out of the collision plane
    #[error("box orientation must be a rotation about z, got {0:?}")]
    NonPlanarOrientation(Quat),
}

/// Largest x or y quaternion component accepted as a rotation about z
const PLANAR_AXIS_TOLERANCE: f32 = 1e-5;

fn check_position(position: &Vec3) -> Result<(), PrimitiveError> {
    if position.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(PrimitiveError::NonFinite("position"))
    }
}

/// A circle in the collision plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CirclePrimitive {
    /// Centre in world space (z is carried, never tested)
    pub position: Vec3,
    /// Radius, greater than zero
    pub radius: f32,
}

impl CirclePrimitive {
    /// Creates a circle, rejecting non-positive radii
    pub fn new(position: Vec3, radius: f32) -> Result<Self, PrimitiveError> {
        check_position(&position)?;
        if !(radius.is_finite() && radius > 0.0) {
            return Err(PrimitiveError::InvalidRadius(radius));
        }
        Ok(Self { position, radius })
    }
}

/// An oriented box in the collision plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxPrimitive {
    /// Centre in world space
    pub position: Vec3,
    /// Rotation about z; constructors reject any other axis
    pub orientation: Quat,
    /// Half size along the local x axis
    pub half_width: f32,
    /// Half size along the local y axis
    pub half_height: f32,
}

impl BoxPrimitive {
    /// Creates a box from a centre, a rotation about z and its half extents
    pub fn new(
        position: Vec3,
        orientation: Quat,
        half_width: f32,
        half_height: f32,
    ) -> Result<Self, PrimitiveError> {
        check_position(&position)?;
        let valid = |e: f32| e.is_finite() && e >= 0.0;
        if !(valid(half_width) && valid(half_height)) {
            return Err(PrimitiveError::InvalidExtents(half_width, half_height));
        }
        let q = orientation.quaternion();
        if q.i.abs() > PLANAR_AXIS_TOLERANCE || q.j.abs() > PLANAR_AXIS_TOLERANCE {
            return Err(PrimitiveError::NonPlanarOrientation(orientation));
        }
        Ok(Self { position, orientation, half_width, half_height })
    }

    /// Creates a box rotated by `angle` radians about z
    pub fn from_angle(
        position: Vec3,
        angle: f32,
        half_width: f32,
        half_height: f32,
    ) -> Result<Self, PrimitiveError> {
        if !angle.is_finite() {
            return Err(PrimitiveError::NonFinite("angle"));
        }
        Self::new(position, math::z_rotation(angle), half_width, half_height)
    }

    /// Half extents as `[half_width, half_height]`
    pub fn extents(&self) -> [f32; 2] {
        [self.half_width, self.half_height]
    }

    /// Half extents as a vector
    pub fn extents_vector(&self) -> Vec2 {
        Vec2::new(self.half_width, self.half_height)
    }

    /// World-space corners, counter-clockwise from the local (+x, +y) corner
    pub fn corners(&self) -> [Vec3; 4] {
        let (hw, hh) = (self.half_width, self.half_height);
        [(hw, hh), (-hw, hh), (-hw, -hh), (hw, -hh)]
            .map(|(x, y)| self.position + math::to_world(&self.orientation, Vec3::new(x, y, 0.0)))
    }
}

/// A ray used for intersection queries
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayPrimitive {
    /// Origin in world space
    pub position: Vec3,
    /// Direction; not required to be unit length
    pub direction: Vec3,
    /// Largest accepted hit parameter; zero or negative means unbounded
    pub max_distance: f32,
}

impl RayPrimitive {
    /// Creates a ray, rejecting zero-length directions
    pub fn new(position: Vec3, direction: Vec3, max_distance: f32) -> Result<Self, PrimitiveError> {
        check_position(&position)?;
        let finite = direction.iter().all(|c| c.is_finite());
        if !finite || math::planar(direction).norm_squared() == 0.0 {
            return Err(PrimitiveError::InvalidDirection(direction));
        }
        if max_distance.is_nan() {
            return Err(PrimitiveError::NonFinite("max_distance"));
        }
        Ok(Self { position, direction, max_distance })
    }

    /// Creates a ray with no distance limit
    pub fn unbounded(position: Vec3, direction: Vec3) -> Result<Self, PrimitiveError> {
        Self::new(position, direction, 0.0)
    }

    /// Whether hits are limited to `max_distance`
    pub fn is_bounded(&self) -> bool {
        self.max_distance > 0.0
    }

    /// Point at parameter `t` along the ray
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.position + self.direction * t
    }
}
