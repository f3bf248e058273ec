use oeuf_shapes::{OccupancyClass, OccupancyMatcher, ShapeKey};
use proptest::prelude::*;

fn class() -> impl Strategy<Value = OccupancyClass> {
    prop::sample::select(OccupancyClass::ALL.to_vec())
}

proptest! {
    #[test]
    fn fits_is_reflexive_and_antisymmetric(a in class(), b in class()) {
        let m = OccupancyMatcher::new();
        prop_assert!(m.fits(a, a));
        if a != b && m.fits(a, b) {
            prop_assert!(!m.fits(b, a));
        }
    }

    #[test]
    fn fits_is_transitive(a in class(), b in class(), c in class()) {
        let m = OccupancyMatcher::new();
        if m.fits(a, b) && m.fits(b, c) {
            prop_assert!(m.fits(a, c));
        }
    }

    #[test]
    fn only_empty_fits_an_empty_container(a in class()) {
        let m = OccupancyMatcher::new();
        prop_assert_eq!(m.fits(a, OccupancyClass::Empty), a == OccupancyClass::Empty);
    }

    #[test]
    fn key_packing_is_injective(
        s0 in 0i32..16, r0 in 0i32..4, f0 in any::<bool>(),
        s1 in 0i32..16, r1 in 0i32..4, f1 in any::<bool>(),
    ) {
        let a = ShapeKey::pack(s0, r0, f0).unwrap();
        let b = ShapeKey::pack(s1, r1, f1).unwrap();
        prop_assert_eq!(a == b, (s0, r0, f0) == (s1, r1, f1));
    }
}
