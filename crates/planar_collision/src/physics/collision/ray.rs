//! Ray-circle and ray-box intersection queries
//!
//! Rays are plain intersection queries, not swept tests. The contact's
//! `penetration` holds the hit parameter `t` (distance along the ray in
//! units of the direction's length) and `position` the hit point.

use crate::core::config::Tolerances;
use crate::foundation::math::{self, Vec3};
use crate::physics::body::BodyHandle;
use super::contact::{Collision, CollisionType, ContactBuffer};
use super::primitives::{BoxPrimitive, CirclePrimitive, RayPrimitive};

/// Planar direction of `ray`, or `None` when it is too short to trace
fn usable_direction(tolerances: &Tolerances, ray: &RayPrimitive) -> Option<Vec3> {
    let direction = math::planar(ray.direction);
    if direction.norm_squared() <= tolerances.zero_threshold {
        log::warn!("Ignoring ray query with degenerate direction {:?}", ray.direction);
        return None;
    }
    Some(direction)
}

/// A bounded ray misses only when both ends of the hit interval lie past its reach
fn beyond_reach(ray: &RayPrimitive, t_a: f32, t_b: f32) -> bool {
    ray.is_bounded() && t_a > ray.max_distance && t_b > ray.max_distance
}

pub(super) fn ray_circle_collision(
    tolerances: &Tolerances,
    contacts: &mut ContactBuffer,
    body1: BodyHandle,
    body2: BodyHandle,
    ray: &RayPrimitive,
    circle: &CirclePrimitive,
) -> usize {
    contacts.clear();

    let Some(d) = usable_direction(tolerances, ray) else {
        return 0;
    };
    let dp = math::planar(ray.position - circle.position);

    // |dp + t d|² = r²  ->  |d|² t² + 2 (d·dp) t + |dp|² - r² = 0
    let d_dot_dp = d.dot(&dp);
    let d_mag = d.norm_squared();
    let dp_mag = dp.norm_squared();

    let delta = d_dot_dp * d_dot_dp - d_mag * (dp_mag - circle.radius * circle.radius);
    if delta < 0.0 {
        return 0;
    }

    let root = delta.sqrt();
    let t1 = (-d_dot_dp + root) / d_mag;
    let t2 = (-d_dot_dp - root) / d_mag;
    if beyond_reach(ray, t1, t2) {
        return 0;
    }

    let closest = match (t1 < 0.0, t2 < 0.0) {
        (true, true) => return 0,
        (true, false) => t2,
        (false, true) => t1,
        (false, false) => t1.min(t2),
    };

    let hit = ray.position + d * closest;
    let normal = math::planar(hit - circle.position)
        .try_normalize(f32::EPSILON)
        .unwrap_or_else(|| -d.normalize());

    contacts.push(Collision {
        body1,
        body2,
        normal,
        penetration: closest,
        position: hit,
        collision_type: CollisionType::Generic,
    });

    contacts.len()
}

pub(super) fn ray_box_collision(
    tolerances: &Tolerances,
    contacts: &mut ContactBuffer,
    body1: BodyHandle,
    body2: BodyHandle,
    ray: &RayPrimitive,
    box_: &BoxPrimitive,
) -> usize {
    contacts.clear();

    let Some(d) = usable_direction(tolerances, ray) else {
        return 0;
    };

    let origin = math::to_local(&box_.orientation, ray.position - box_.position);
    let direction = math::to_local(&box_.orientation, d);
    let extents = box_.extents();

    // Slab intervals, remembering which axis bounds each end
    let mut enter = (f32::NEG_INFINITY, None);
    let mut exit = (f32::INFINITY, None);

    for axis in 0..2 {
        let (o, dir, e) = (origin[axis], direction[axis], extents[axis]);

        if dir.abs() <= tolerances.zero_threshold {
            if o.abs() > e {
                return 0;
            }
            continue;
        }

        let t_a = (-e - o) / dir;
        let t_b = (e - o) / dir;
        let (near, far) = if t_a <= t_b { (t_a, t_b) } else { (t_b, t_a) };

        if near > enter.0 {
            enter = (near, Some(axis));
        }
        if far < exit.0 {
            exit = (far, Some(axis));
        }
    }

    if exit.0 < enter.0 || exit.0 < 0.0 || beyond_reach(ray, enter.0, exit.0) {
        return 0;
    }

    // Entering face faces the ray; from inside the box the exit face is hit
    let (closest, axis, outward_sign) = if enter.0 >= 0.0 {
        (enter.0, enter.1, -1.0)
    } else {
        (exit.0, exit.1, 1.0)
    };
    let Some(axis) = axis else {
        return 0;
    };

    let mut local_normal = Vec3::zeros();
    local_normal[axis] = outward_sign * direction[axis].signum();

    contacts.push(Collision {
        body1,
        body2,
        normal: math::to_world(&box_.orientation, local_normal),
        penetration: closest,
        position: ray.position + d * closest,
        collision_type: CollisionType::Generic,
    });

    contacts.len()
}
