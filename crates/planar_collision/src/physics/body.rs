//! Rigid body identity

slotmap::new_key_type! {
    /// Opaque identifier of the rigid body a primitive belongs to.
    ///
    /// The detector never looks behind a handle: it only copies it into the
    /// contacts it writes. Callers typically store their bodies in a
    /// `SlotMap<BodyHandle, _>` and get handles from `insert`.
    pub struct BodyHandle;
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::{Key, SlotMap};

    #[test]
    fn test_handles_are_distinct_identities() {
        let mut bodies: SlotMap<BodyHandle, &str> = SlotMap::with_key();
        let a = bodies.insert("a");
        let b = bodies.insert("b");

        assert_ne!(a, b);
        assert_eq!(bodies[a], "a");
        assert!(BodyHandle::default().is_null());
    }
}
