//! Per-pair entry points
//!
//! [`CollisionDetector`] owns a [`DetectorConfig`] and nothing else. Each
//! method resets the output buffer, writes contacts from slot 0 and returns
//! how many it wrote.

use crate::core::config::{DetectorConfig, Tolerances};
use crate::physics::body::BodyHandle;
use super::contact::ContactBuffer;
use super::primitives::{BoxPrimitive, CirclePrimitive, RayPrimitive};
use super::{box_box, circle, ray};

/// Narrow-phase detector for planar primitives
///
/// Holds configuration only, so a shared reference can be used from many
/// threads, each with its own [`ContactBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CollisionDetector {
    config: DetectorConfig,
}

impl CollisionDetector {
    /// Creates a detector with default tolerances
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a detector using `config`
    pub fn with_config(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Active tolerances
    pub fn tolerances(&self) -> &Tolerances {
        &self.config.tolerances
    }

    /// Whether two circles overlap or touch
    pub fn circle_circle_intersect(&self, circle1: &CirclePrimitive, circle2: &CirclePrimitive) -> bool {
        circle::circle_circle_intersect(circle1, circle2)
    }

    /// Circle-circle contact
    ///
    /// Touching circles do not collide. Concentric circles report a contact
    /// along +x with an approximate depth.
    pub fn circle_circle_collision(
        &self,
        contacts: &mut ContactBuffer,
        body1: BodyHandle,
        body2: BodyHandle,
        circle1: &CirclePrimitive,
        circle2: &CirclePrimitive,
    ) -> usize {
        circle::circle_circle_collision(self.tolerances(), contacts, body1, body2, circle1, circle2)
    }

    /// Circle-box contact, the circle being `body1`
    ///
    /// The contact position is the point of the box closest to the circle
    /// centre.
    pub fn circle_box_collision(
        &self,
        contacts: &mut ContactBuffer,
        body1: BodyHandle,
        body2: BodyHandle,
        circle: &CirclePrimitive,
        box_: &BoxPrimitive,
    ) -> usize {
        circle::circle_box_collision(self.tolerances(), contacts, body1, body2, circle, box_)
    }

    /// Separating-axis overlap test between two oriented boxes
    ///
    /// Conservative: boxes that touch, or are within the axis padding of
    /// touching, count as overlapping.
    pub fn boxes_overlap(&self, box1: &BoxPrimitive, box2: &BoxPrimitive) -> bool {
        box_box::boxes_overlap(self.tolerances(), box1, box2)
    }

    /// Deepest corner of `incident` behind a face of `reference`
    ///
    /// Writes at most one contact with `reference_body` as `body1`. The normal
    /// is the reference face's outward normal negated, so it points from the
    /// incident box toward the reference box.
    pub fn box_vertex_penetration(
        &self,
        contacts: &mut ContactBuffer,
        reference_body: BodyHandle,
        incident_body: BodyHandle,
        reference: &BoxPrimitive,
        incident: &BoxPrimitive,
    ) -> usize {
        contacts.clear();
        if let Some(vertex) = box_box::box_vertex_penetration(reference, incident) {
            contacts.push(vertex.into_collision(reference_body, incident_body));
        }
        contacts.len()
    }

    /// Box-box contact
    ///
    /// Rejects separated boxes with the separating-axis test, then runs the
    /// vertex test with each box as the reference and keeps the shallower
    /// result. Equal depths are resolved by the configured
    /// [`TieBreakPolicy`](crate::core::config::TieBreakPolicy). The winning
    /// contact's `body1` is the box whose face was penetrated.
    ///
    /// Only corners are tested, so overlapping boxes with no corner inside the
    /// other box report no contact. A plus-shaped crossing of two bars and two
    /// concentric squares, one turned by 45 degrees, are the typical cases;
    /// [`boxes_overlap`](Self::boxes_overlap) still reports them as
    /// overlapping.
    pub fn box_box_collision(
        &self,
        contacts: &mut ContactBuffer,
        body1: BodyHandle,
        body2: BodyHandle,
        box1: &BoxPrimitive,
        box2: &BoxPrimitive,
    ) -> usize {
        box_box::box_box_collision(
            self.tolerances(),
            self.config.box_tie_break,
            contacts,
            body1,
            body2,
            box1,
            box2,
        )
    }

    /// Nearest hit of a ray on a circle
    ///
    /// `penetration` holds the hit parameter and `position` the hit point;
    /// the normal is the circle's outward normal there.
    pub fn ray_circle_collision(
        &self,
        contacts: &mut ContactBuffer,
        body1: BodyHandle,
        body2: BodyHandle,
        ray: &RayPrimitive,
        circle: &CirclePrimitive,
    ) -> usize {
        ray::ray_circle_collision(self.tolerances(), contacts, body1, body2, ray, circle)
    }

    /// Nearest hit of a ray on an oriented box
    pub fn ray_box_collision(
        &self,
        contacts: &mut ContactBuffer,
        body1: BodyHandle,
        body2: BodyHandle,
        ray: &RayPrimitive,
        box_: &BoxPrimitive,
    ) -> usize {
        ray::ray_box_collision(self.tolerances(), contacts, body1, body2, ray, box_)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::TieBreakPolicy;
    use crate::foundation::math::Vec3;
    use approx::assert_relative_eq;
    use slotmap::SlotMap;

    fn bodies() -> (BodyHandle, BodyHandle) {
        let mut map: SlotMap<BodyHandle, ()> = SlotMap::with_key();
        (map.insert(()), map.insert(()))
    }

    fn square(x: f32, y: f32, angle: f32, half: f32) -> BoxPrimitive {
        BoxPrimitive::from_angle(Vec3::new(x, y, 0.0), angle, half, half).unwrap()
    }

    #[test]
    fn test_with_config_is_used() {
        let config = DetectorConfig::default().with_box_tie_break(TieBreakPolicy::KeepBoth);
        let detector = CollisionDetector::with_config(config);

        assert_eq!(detector.config().box_tie_break, TieBreakPolicy::KeepBoth);
        assert_eq!(*detector.tolerances(), Tolerances::default());

        let (a, b) = bodies();
        let mut contacts = ContactBuffer::new();
        let n = detector.box_box_collision(&mut contacts, a, b, &square(0.0, 0.0, 0.0, 1.0), &square(1.5, 0.0, 0.0, 1.0));
        assert_eq!(n, 2);
    }

    #[test]
    fn test_buffer_reused_across_calls() {
        let detector = CollisionDetector::new();
        let (a, b) = bodies();
        let mut contacts = ContactBuffer::new();

        let c1 = CirclePrimitive::new(Vec3::zeros(), 1.0).unwrap();
        let c2 = CirclePrimitive::new(Vec3::new(1.0, 0.0, 0.0), 1.0).unwrap();
        assert_eq!(detector.circle_circle_collision(&mut contacts, a, b, &c1, &c2), 1);

        let far = CirclePrimitive::new(Vec3::new(10.0, 0.0, 0.0), 1.0).unwrap();
        assert_eq!(detector.circle_circle_collision(&mut contacts, a, b, &c1, &far), 0);
        assert!(contacts.is_empty());
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let detector = CollisionDetector::new();
        let (a, b) = bodies();
        let box1 = square(0.0, 0.0, 0.2, 1.0);
        let box2 = square(1.6, 0.4, -0.5, 0.8);

        let mut first = ContactBuffer::new();
        let mut second = ContactBuffer::new();
        let n1 = detector.box_box_collision(&mut first, a, b, &box1, &box2);
        let n2 = detector.box_box_collision(&mut second, a, b, &box1, &box2);

        assert_eq!(n1, n2);
        assert_eq!(first.as_slice(), second.as_slice());
    }

    #[test]
    fn test_box_vertex_penetration_writes_single_contact() {
        let detector = CollisionDetector::new();
        let (floor, crate_body) = bodies();
        let mut contacts = ContactBuffer::new();

        let reference = BoxPrimitive::from_angle(Vec3::zeros(), 0.0, 4.0, 1.0).unwrap();
        let incident = square(0.0, 1.8, 0.0, 1.0);

        let n = detector.box_vertex_penetration(&mut contacts, floor, crate_body, &reference, &incident);
        assert_eq!(n, 1);
        let c = contacts[0];
        assert_eq!((c.body1, c.body2), (floor, crate_body));
        assert_relative_eq!(c.penetration, 0.2, epsilon = 1e-5);
        assert_relative_eq!(c.normal, -Vec3::y(), epsilon = 1e-5);
        assert_relative_eq!(c.position.y, 0.8, epsilon = 1e-5);

        let n = detector.box_vertex_penetration(&mut contacts, floor, crate_body, &reference, &square(0.0, 5.0, 0.0, 1.0));
        assert_eq!(n, 0);
        assert!(contacts.is_empty());
    }

    #[test]
    fn test_edge_crossings_overlap_without_contact() {
        let detector = CollisionDetector::new();
        let (a, b) = bodies();
        let mut contacts = ContactBuffer::new();

        let horizontal = BoxPrimitive::from_angle(Vec3::zeros(), 0.0, 3.0, 0.5).unwrap();
        let vertical = BoxPrimitive::from_angle(Vec3::zeros(), 0.0, 0.5, 3.0).unwrap();
        assert!(detector.boxes_overlap(&horizontal, &vertical));
        assert_eq!(detector.box_box_collision(&mut contacts, a, b, &horizontal, &vertical), 0);

        let upright = square(0.0, 0.0, 0.0, 1.0);
        let turned = square(0.0, 0.0, std::f32::consts::FRAC_PI_4, 1.0);
        assert!(detector.boxes_overlap(&upright, &turned));
        assert_eq!(detector.box_box_collision(&mut contacts, a, b, &upright, &turned), 0);
        assert!(contacts.is_empty());
    }

    #[test]
    fn test_ray_entry_points() {
        let detector = CollisionDetector::new();
        let (caster, target) = bodies();
        let mut contacts = ContactBuffer::new();
        let ray = RayPrimitive::unbounded(Vec3::zeros(), Vec3::y()).unwrap();

        let ball = CirclePrimitive::new(Vec3::new(0.0, 3.0, 0.0), 0.5).unwrap();
        assert_eq!(detector.ray_circle_collision(&mut contacts, caster, target, &ray, &ball), 1);
        assert_relative_eq!(contacts[0].penetration, 2.5, epsilon = 1e-5);

        let block = square(0.0, 3.0, 0.0, 0.5);
        assert_eq!(detector.ray_box_collision(&mut contacts, caster, target, &ray, &block), 1);
        assert_relative_eq!(contacts[0].normal, -Vec3::y(), epsilon = 1e-5);
    }
}
