//! Circle-circle and circle-box tests

use crate::core::config::Tolerances;
use crate::foundation::math::{self, utils::clamp, Vec3};
use crate::physics::body::BodyHandle;
use super::contact::{Collision, CollisionType, ContactBuffer};
use super::primitives::{BoxPrimitive, CirclePrimitive};

/// Boundary-inclusive overlap test, no manifold
pub(super) fn circle_circle_intersect(circle1: &CirclePrimitive, circle2: &CirclePrimitive) -> bool {
    let dist_sq = math::planar(circle1.position - circle2.position).norm_squared();
    let combined_radius = circle1.radius + circle2.radius;

    dist_sq <= combined_radius * combined_radius
}

pub(super) fn circle_circle_collision(
    tolerances: &Tolerances,
    contacts: &mut ContactBuffer,
    body1: BodyHandle,
    body2: BodyHandle,
    circle1: &CirclePrimitive,
    circle2: &CirclePrimitive,
) -> usize {
    contacts.clear();

    let delta = math::planar(circle2.position - circle1.position);
    let mut distance = delta.norm();

    let direction = if distance > 0.0 {
        delta / distance
    } else {
        // Concentric: any axis separates, the depth is approximate
        log::trace!("Concentric circles for {:?}/{:?}, using fallback axis", body1, body2);
        distance = tolerances.concentric_distance;
        Vec3::x()
    };

    let combined_radius = circle1.radius + circle2.radius;
    if distance * distance >= combined_radius * combined_radius {
        return 0;
    }

    contacts.push(Collision {
        body1,
        body2,
        normal: -direction,
        penetration: combined_radius - distance,
        position: circle1.position + direction * circle1.radius,
        collision_type: CollisionType::Generic,
    });

    contacts.len()
}

pub(super) fn circle_box_collision(
    tolerances: &Tolerances,
    contacts: &mut ContactBuffer,
    body1: BodyHandle,
    body2: BodyHandle,
    circle: &CirclePrimitive,
    box_: &BoxPrimitive,
) -> usize {
    contacts.clear();

    let epsilon = tolerances.proximity_epsilon;

    // Closest point of the box to the circle centre, found in box space
    let local = math::to_local(&box_.orientation, circle.position - box_.position);
    let closest_local = Vec3::new(
        clamp(local.x, -box_.half_width, box_.half_width),
        clamp(local.y, -box_.half_height, box_.half_height),
        local.z,
    );
    let closest = box_.position + math::to_world(&box_.orientation, closest_local);

    let to_centre = math::planar(circle.position - box_.position);
    let to_closest = math::planar(circle.position - closest);

    let d0 = to_centre.norm_squared();
    let d2 = to_closest.norm_squared();
    if d2 > circle.radius * circle.radius {
        return 0;
    }

    let separation = if d0 <= epsilon {
        log::trace!("Circle centre on box centre for {:?}/{:?}, using fallback axis", body1, body2);
        Vec3::x() * tolerances.circle_box_fallback_scale
    } else if d2 <= epsilon {
        // Centre inside the box: push out along the centre offset
        to_centre
    } else {
        to_closest
    };

    let magnitude = separation.norm();

    contacts.push(Collision {
        body1,
        body2,
        normal: separation / magnitude,
        penetration: circle.radius - magnitude,
        position: closest,
        collision_type: CollisionType::Generic,
    });

    contacts.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use slotmap::SlotMap;
    use std::f32::consts::FRAC_PI_4;

    const EPSILON: f32 = 1e-5;

    fn bodies() -> (BodyHandle, BodyHandle) {
        let mut map: SlotMap<BodyHandle, ()> = SlotMap::with_key();
        (map.insert(()), map.insert(()))
    }

    fn circle(x: f32, y: f32, radius: f32) -> CirclePrimitive {
        CirclePrimitive::new(Vec3::new(x, y, 0.0), radius).unwrap()
    }

    #[test]
    fn test_intersect_is_boundary_inclusive() {
        assert!(circle_circle_intersect(&circle(0.0, 0.0, 1.0), &circle(2.0, 0.0, 1.0)));
        assert!(!circle_circle_intersect(&circle(0.0, 0.0, 1.0), &circle(2.1, 0.0, 1.0)));
    }

    #[test]
    fn test_intersect_ignores_z() {
        let a = CirclePrimitive::new(Vec3::new(0.0, 0.0, 0.0), 1.0).unwrap();
        let b = CirclePrimitive::new(Vec3::new(1.5, 0.0, 10.0), 1.0).unwrap();
        assert!(circle_circle_intersect(&a, &b));
    }

    #[test]
    fn test_circle_circle_overlap() {
        let (a, b) = bodies();
        let mut contacts = ContactBuffer::new();
        let n = circle_circle_collision(
            &Tolerances::default(), &mut contacts, a, b,
            &circle(0.0, 0.0, 1.0), &circle(1.5, 0.0, 1.0),
        );

        assert_eq!(n, 1);
        let c = contacts[0];
        assert_eq!((c.body1, c.body2), (a, b));
        assert_relative_eq!(c.penetration, 0.5, epsilon = EPSILON);
        // Points from circle2 toward circle1
        assert_relative_eq!(c.normal, Vec3::new(-1.0, 0.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(c.position, Vec3::new(1.0, 0.0, 0.0), epsilon = EPSILON);
        assert_eq!(c.collision_type, CollisionType::Generic);
    }

    #[test]
    fn test_circle_circle_touching_is_not_a_collision() {
        let (a, b) = bodies();
        let mut contacts = ContactBuffer::new();
        let n = circle_circle_collision(
            &Tolerances::default(), &mut contacts, a, b,
            &circle(0.0, 0.0, 1.0), &circle(2.0, 0.0, 1.0),
        );
        assert_eq!(n, 0);
        assert!(contacts.is_empty());
    }

    #[test]
    fn test_circle_circle_concentric_fallback() {
        let (a, b) = bodies();
        let mut contacts = ContactBuffer::new();
        let n = circle_circle_collision(
            &Tolerances::default(), &mut contacts, a, b,
            &circle(3.0, 3.0, 1.0), &circle(3.0, 3.0, 0.5),
        );

        assert_eq!(n, 1);
        let c = contacts[0];
        assert_eq!(c.normal, -Vec3::x());
        assert_relative_eq!(c.penetration, 1.5 - 0.01, epsilon = EPSILON);
        assert!(c.normal.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_circle_box_outside() {
        let (a, b) = bodies();
        let mut contacts = ContactBuffer::new();
        let block = BoxPrimitive::from_angle(Vec3::zeros(), 0.0, 1.0, 1.0).unwrap();

        let n = circle_box_collision(
            &Tolerances::default(), &mut contacts, a, b, &circle(2.6, 0.0, 0.5), &block,
        );
        assert_eq!(n, 0);
    }

    #[test]
    fn test_circle_box_face_contact() {
        let (a, b) = bodies();
        let mut contacts = ContactBuffer::new();
        let block = BoxPrimitive::from_angle(Vec3::zeros(), 0.0, 1.0, 1.0).unwrap();

        let n = circle_box_collision(
            &Tolerances::default(), &mut contacts, a, b, &circle(0.2, 1.3, 0.5), &block,
        );

        assert_eq!(n, 1);
        let c = contacts[0];
        assert_relative_eq!(c.normal, Vec3::y(), epsilon = EPSILON);
        assert_relative_eq!(c.normal.norm(), 1.0, epsilon = EPSILON);
        assert_relative_eq!(c.penetration, 0.2, epsilon = EPSILON);
        assert_relative_eq!(c.position, Vec3::new(0.2, 1.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_circle_box_rotated_corner() {
        let (a, b) = bodies();
        let mut contacts = ContactBuffer::new();
        // Diamond: corner of a unit box on the +x axis at sqrt(2)
        let diamond = BoxPrimitive::from_angle(Vec3::zeros(), FRAC_PI_4, 1.0, 1.0).unwrap();
        let corner = std::f32::consts::SQRT_2;

        let n = circle_box_collision(
            &Tolerances::default(), &mut contacts, a, b, &circle(corner + 0.3, 0.0, 0.5), &diamond,
        );

        assert_eq!(n, 1);
        let c = contacts[0];
        assert_relative_eq!(c.normal, Vec3::x(), epsilon = 1e-4);
        assert_relative_eq!(c.penetration, 0.2, epsilon = 1e-4);
        assert_relative_eq!(c.position, Vec3::new(corner, 0.0, 0.0), epsilon = 1e-4);
    }

    #[test]
    fn test_circle_box_centre_inside() {
        let (a, b) = bodies();
        let mut contacts = ContactBuffer::new();
        let block = BoxPrimitive::from_angle(Vec3::zeros(), 0.0, 2.0, 2.0).unwrap();

        let n = circle_box_collision(
            &Tolerances::default(), &mut contacts, a, b, &circle(0.0, 0.5, 1.0), &block,
        );

        assert_eq!(n, 1);
        let c = contacts[0];
        // Pushed away from the box centre, depth measured from the centre offset
        assert_relative_eq!(c.normal, Vec3::y(), epsilon = EPSILON);
        assert_relative_eq!(c.penetration, 0.5, epsilon = EPSILON);
    }

    #[test]
    fn test_circle_box_coincident_centres() {
        let (a, b) = bodies();
        let mut contacts = ContactBuffer::new();
        let block = BoxPrimitive::from_angle(Vec3::new(1.0, 1.0, 0.0), 0.3, 1.0, 1.0).unwrap();

        let n = circle_box_collision(
            &Tolerances::default(), &mut contacts, a, b, &circle(1.0, 1.0, 0.5), &block,
        );

        assert_eq!(n, 1);
        let c = contacts[0];
        assert_eq!(c.normal, Vec3::x());
        assert_relative_eq!(c.penetration, 0.5 - 0.001, epsilon = EPSILON);
    }
}
