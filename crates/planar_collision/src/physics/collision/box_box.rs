//! Box-box tests
//!
//! Detection runs in two phases. A separating-axis test over the four face
//! axes rejects most disjoint pairs. Surviving pairs run a vertex test twice,
//! once with each box as the *reference* whose faces are tested and the other
//! as the *incident* box whose corners are tested. The shallower of the two
//! results becomes the manifold.

use crate::core::config::{TieBreakPolicy, Tolerances};
use crate::foundation::math::{self, Mat2, Vec2, Vec3};
use crate::physics::body::BodyHandle;
use super::contact::{Collision, CollisionType, ContactBuffer};
use super::primitives::BoxPrimitive;

/// Separating-axis test on the face axes of both boxes
///
/// Every entry of the absolute relative rotation is padded by
/// `box_axis_epsilon`, so near-parallel edges err toward "overlapping".
pub(super) fn boxes_overlap(tolerances: &Tolerances, a: &BoxPrimitive, b: &BoxPrimitive) -> bool {
    // Columns are b's axes expressed in a's frame
    let b_in_a = a.orientation.inverse() * b.orientation;
    let b_x = b_in_a * Vec3::x();
    let b_y = b_in_a * Vec3::y();

    let r = Mat2::new(b_x.x, b_y.x, b_x.y, b_y.y);
    let abs_r = r.abs().add_scalar(tolerances.box_axis_epsilon);

    let t = math::to_local(&a.orientation, b.position - a.position).xy();
    let a_extents = a.extents_vector();
    let b_extents = b.extents_vector();

    // a's axes
    let b_radii = abs_r * b_extents;
    for i in 0..2 {
        if t[i].abs() > a_extents[i] + b_radii[i] {
            return false;
        }
    }

    // b's axes
    let t_b = r.transpose() * t;
    let a_radii = abs_r.transpose() * a_extents;
    for j in 0..2 {
        if t_b[j].abs() > a_radii[j] + b_extents[j] {
            return false;
        }
    }

    true
}

/// Indices of `values` in ascending order, via a fixed five-comparator network
fn sort4(values: &[f32; 4]) -> [usize; 4] {
    let mut order = [0, 1, 2, 3];
    for (i, j) in [(0, 1), (2, 3), (0, 2), (1, 3), (1, 2)] {
        if values[order[i]] > values[order[j]] {
            order.swap(i, j);
        }
    }
    order
}

fn reversed(mut order: [usize; 4]) -> [usize; 4] {
    order.reverse();
    order
}

/// A face of the reference box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Face {
    Top,
    Bottom,
    Left,
    Right,
}

impl Face {
    const ALL: [Self; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];

    /// Outward normal in the reference frame
    fn normal(self) -> Vec3 {
        match self {
            Self::Top => Vec3::y(),
            Self::Bottom => -Vec3::y(),
            Self::Left => -Vec3::x(),
            Self::Right => Vec3::x(),
        }
    }

    /// How far a point inside the box lies behind this face
    fn depth(self, point: Vec2, half_width: f32, half_height: f32) -> f32 {
        match self {
            Self::Top => half_height - point.y,
            Self::Bottom => point.y + half_height,
            Self::Left => point.x + half_width,
            Self::Right => half_width - point.x,
        }
    }
}

/// Deepest incident corner found behind a reference face
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct VertexContact {
    /// Corner position in world space
    pub position: Vec3,
    /// Outward normal of the reference face in world space
    pub face_normal: Vec3,
    /// Depth of the corner behind the face
    pub penetration: f32,
}

impl VertexContact {
    /// Contact with the reference box as `body1`
    pub fn into_collision(self, reference: BodyHandle, incident: BodyHandle) -> Collision {
        Collision {
            body1: reference,
            body2: incident,
            normal: -self.face_normal,
            penetration: self.penetration,
            position: self.position,
            collision_type: CollisionType::Generic,
        }
    }
}

/// Test the incident box's corners against the reference box's faces
///
/// For each face the corners are walked from deepest to shallowest and the
/// first one inside the reference box (boundary included) is the candidate.
/// The face with the smallest candidate depth wins.
pub(super) fn box_vertex_penetration(
    reference: &BoxPrimitive,
    incident: &BoxPrimitive,
) -> Option<VertexContact> {
    let incident_in_reference = reference.orientation.inverse() * incident.orientation;
    let offset = math::to_local(&reference.orientation, incident.position - reference.position);

    let (hw, hh) = (incident.half_width, incident.half_height);
    let corners = [(hw, hh), (-hw, hh), (hw, -hh), (-hw, -hh)]
        .map(|(x, y)| (incident_in_reference * Vec3::new(x, y, 0.0) + offset).xy());

    let proj_x = corners.map(|c| c.x);
    let proj_y = corners.map(|c| c.y);
    let order_x = sort4(&proj_x);
    let order_y = sort4(&proj_y);

    let (rw, rh) = (reference.half_width, reference.half_height);
    let inside = |i: usize| proj_x[i].abs() <= rw && proj_y[i].abs() <= rh;

    let mut best: Option<(usize, Face, f32)> = None;
    for face in Face::ALL {
        let walk = match face {
            Face::Top => order_y,
            Face::Bottom => reversed(order_y),
            Face::Left => reversed(order_x),
            Face::Right => order_x,
        };

        let Some(vertex) = walk.into_iter().find(|&i| inside(i)) else {
            continue;
        };

        let penetration = face.depth(corners[vertex], rw, rh);
        if best.map_or(true, |(_, _, smallest)| penetration < smallest) {
            best = Some((vertex, face, penetration));
        }
    }

    let (vertex, face, penetration) = best?;
    let local = Vec3::new(proj_x[vertex], proj_y[vertex], 0.0);

    Some(VertexContact {
        position: reference.position + math::to_world(&reference.orientation, local),
        face_normal: math::to_world(&reference.orientation, face.normal()),
        penetration,
    })
}

pub(super) fn box_box_collision(
    tolerances: &Tolerances,
    tie_break: TieBreakPolicy,
    contacts: &mut ContactBuffer,
    body1: BodyHandle,
    body2: BodyHandle,
    box1: &BoxPrimitive,
    box2: &BoxPrimitive,
) -> usize {
    contacts.clear();

    if !boxes_overlap(tolerances, box1, box2) {
        return 0;
    }

    let first = box_vertex_penetration(box1, box2).map(|v| v.into_collision(body1, body2));
    let second = box_vertex_penetration(box2, box1).map(|v| v.into_collision(body2, body1));

    match (first, second) {
        (Some(first), Some(second)) => {
            if first.penetration < second.penetration {
                contacts.push(first);
            } else if second.penetration < first.penetration {
                contacts.push(second);
            } else {
                log::trace!(
                    "Box-box tie at depth {} for {:?}/{:?}, policy {:?}",
                    first.penetration, body1, body2, tie_break
                );
                contacts.push(first);
                if tie_break == TieBreakPolicy::KeepBoth {
                    contacts.push(second);
                }
            }
        }
        (Some(only), None) | (None, Some(only)) => {
            contacts.push(only);
        }
        (None, None) => {
            // Overlapping with no corner inside the other box (edge crossing)
            log::trace!("Box-box overlap without a penetrating corner for {:?}/{:?}", body1, body2);
        }
    }

    contacts.len()
}
