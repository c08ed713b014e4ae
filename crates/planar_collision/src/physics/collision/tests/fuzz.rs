//! Randomized box-box consistency checks with a fixed seed

use crate::core::config::Tolerances;
use crate::foundation::math::Vec3;
use crate::physics::body::BodyHandle;
use crate::physics::collision::box_box;
use crate::physics::collision::{BoxPrimitive, CollisionDetector, ContactBuffer};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use slotmap::SlotMap;
use std::f32::consts::PI;

const CASES: usize = 2000;

fn random_box(rng: &mut StdRng) -> BoxPrimitive {
    BoxPrimitive::from_angle(
        Vec3::new(rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0), 0.0),
        rng.gen_range(-PI..PI),
        rng.gen_range(0.1..3.0),
        rng.gen_range(0.1..3.0),
    )
    .unwrap()
}

#[test]
fn test_separated_boxes_have_no_penetrating_corner() {
    crate::foundation::logging::init_for_tests();
    let mut rng = StdRng::seed_from_u64(0x5eed_b0c5);
    let tolerances = Tolerances::default();
    let mut separated = 0;

    for case in 0..CASES {
        let a = random_box(&mut rng);
        let b = random_box(&mut rng);

        if box_box::boxes_overlap(&tolerances, &a, &b) {
            continue;
        }
        separated += 1;

        assert!(box_box::box_vertex_penetration(&a, &b).is_none(), "case {case}: {a:?} {b:?}");
        assert!(box_box::box_vertex_penetration(&b, &a).is_none(), "case {case}: {a:?} {b:?}");
    }

    assert!(separated > 0);
}

#[test]
fn test_random_contacts_are_well_formed() {
    crate::foundation::logging::init_for_tests();
    let mut rng = StdRng::seed_from_u64(7);
    let detector = CollisionDetector::new();
    let mut bodies: SlotMap<BodyHandle, ()> = SlotMap::with_key();
    let (first, second) = (bodies.insert(()), bodies.insert(()));
    let mut contacts = ContactBuffer::new();

    for _ in 0..CASES {
        let a = random_box(&mut rng);
        let b = random_box(&mut rng);

        let n = detector.box_box_collision(&mut contacts, first, second, &a, &b);
        assert!(n <= 1);
        assert_eq!(n, contacts.len());

        for contact in &contacts {
            assert!(contact.penetration >= 0.0);
            assert!((contact.normal.norm() - 1.0).abs() < 1e-4);
            assert_eq!(contact.normal.z, 0.0);
            assert!(contact.involves(first) && contact.involves(second));
        }

        if !detector.boxes_overlap(&a, &b) {
            assert_eq!(n, 0);
        }
    }
}
