//! Kind-erased primitives
//!
//! Lets callers hold heterogeneous primitives in one collection and test any
//! pair through [`CollisionDetector::collide`].

use serde::{Serialize, Deserialize};
use crate::foundation::math::Vec3;
use crate::physics::body::BodyHandle;
use super::contact::ContactBuffer;
use super::detector::CollisionDetector;
use super::primitives::{BoxPrimitive, CirclePrimitive, RayPrimitive};

/// Discriminant of a [`Primitive`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveKind {
    /// Circle
    Circle,
    /// Oriented box
    Box,
    /// Ray
    Ray,
}

/// Any primitive the detector understands
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    /// A circle
    Circle(CirclePrimitive),
    /// An oriented box
    Box(BoxPrimitive),
    /// A ray
    Ray(RayPrimitive),
}

impl Primitive {
    /// Which kind of primitive this is
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Self::Circle(_) => PrimitiveKind::Circle,
            Self::Box(_) => PrimitiveKind::Box,
            Self::Ray(_) => PrimitiveKind::Ray,
        }
    }

    /// Centre, or origin for rays
    pub fn position(&self) -> Vec3 {
        match self {
            Self::Circle(c) => c.position,
            Self::Box(b) => b.position,
            Self::Ray(r) => r.position,
        }
    }
}

impl From<CirclePrimitive> for Primitive {
    fn from(circle: CirclePrimitive) -> Self {
        Self::Circle(circle)
    }
}

impl From<BoxPrimitive> for Primitive {
    fn from(box_: BoxPrimitive) -> Self {
        Self::Box(box_)
    }
}

impl From<RayPrimitive> for Primitive {
    fn from(ray: RayPrimitive) -> Self {
        Self::Ray(ray)
    }
}

impl CollisionDetector {
    /// Test any pair of primitives
    ///
    /// Pairs are routed to the matching typed test. Mixed pairs the typed
    /// tests only accept in one order (box-circle, circle-ray, box-ray) are
    /// swapped, so the written contacts carry `body2` as their `body1`; as
    /// always the normal points from a contact's `body2` toward its `body1`.
    /// Ray-ray pairs never produce contacts.
    pub fn collide(
        &self,
        contacts: &mut ContactBuffer,
        body1: BodyHandle,
        body2: BodyHandle,
        shape1: &Primitive,
        shape2: &Primitive,
    ) -> usize {
        use self::Primitive as P;

        match (shape1, shape2) {
            (P::Circle(a), P::Circle(b)) => self.circle_circle_collision(contacts, body1, body2, a, b),
            (P::Circle(c), P::Box(b)) => self.circle_box_collision(contacts, body1, body2, c, b),
            (P::Box(b), P::Circle(c)) => self.circle_box_collision(contacts, body2, body1, c, b),
            (P::Box(a), P::Box(b)) => self.box_box_collision(contacts, body1, body2, a, b),
            (P::Ray(r), P::Circle(c)) => self.ray_circle_collision(contacts, body1, body2, r, c),
            (P::Circle(c), P::Ray(r)) => self.ray_circle_collision(contacts, body2, body1, r, c),
            (P::Ray(r), P::Box(b)) => self.ray_box_collision(contacts, body1, body2, r, b),
            (P::Box(b), P::Ray(r)) => self.ray_box_collision(contacts, body2, body1, r, b),
            (P::Ray(_), P::Ray(_)) => {
                log::trace!("Skipping ray-ray pair {:?}/{:?}", body1, body2);
                contacts.clear();
                0
            }
        }
    }
}
