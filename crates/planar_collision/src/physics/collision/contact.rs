//! Contact records and the caller-owned output buffer

use std::ops::Deref;

use serde::{Serialize, Deserialize};
use crate::foundation::math::Vec3;
use crate::physics::body::BodyHandle;

/// Largest number of contacts any single pair test writes (box-box)
pub const MAX_CONTACTS: usize = 2;

/// Kind of contact produced by a pair test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CollisionType {
    /// Plain contact between two primitives
    #[default]
    Generic,
}

/// One entry of a contact manifold
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Collision {
    /// First body of the pair
    pub body1: BodyHandle,
    /// Second body of the pair
    pub body2: BodyHandle,
    /// Unit normal in the collision plane, pointing from `body2` toward `body1`
    pub normal: Vec3,
    /// Overlap depth (positive when overlapping); hit distance for ray tests
    pub penetration: f32,
    /// Contact point in world space
    pub position: Vec3,
    /// Contact kind
    pub collision_type: CollisionType,
}

impl Collision {
    /// Same contact seen from the other body: labels swapped, normal negated
    pub fn flipped(&self) -> Self {
        Self {
            body1: self.body2,
            body2: self.body1,
            normal: -self.normal,
            ..*self
        }
    }

    /// Whether `body` takes part in this contact
    pub fn involves(&self, body: BodyHandle) -> bool {
        self.body1 == body || self.body2 == body
    }
}

/// Fixed-capacity contact storage owned by the caller
///
/// Every pair test resets the buffer and writes from slot 0, so one buffer
/// can be reused across calls without clearing. Derefs to the slice of
/// contacts written by the most recent call.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContactBuffer {
    contacts: [Collision; MAX_CONTACTS],
    len: usize,
}

impl ContactBuffer {
    /// Creates an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of valid contacts
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the last call produced no contact
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total slots available
    pub const fn capacity(&self) -> usize {
        MAX_CONTACTS
    }

    /// Valid contacts
    pub fn as_slice(&self) -> &[Collision] {
        &self.contacts[..self.len]
    }

    /// Forget all contacts
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Append a contact, returning `false` when the buffer is full
    pub(crate) fn push(&mut self, contact: Collision) -> bool {
        match self.contacts.get_mut(self.len) {
            Some(slot) => {
                *slot = contact;
                self.len += 1;
                true
            }
            None => {
                log::warn!("Contact buffer full, dropping contact {:?}", contact);
                false
            }
        }
    }
}

impl Deref for ContactBuffer {
    type Target = [Collision];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<'a> IntoIterator for &'a ContactBuffer {
    type Item = &'a Collision;
    type IntoIter = std::slice::Iter<'a, Collision>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}
