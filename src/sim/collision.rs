//! Circle-circle collision detection
//!
//! Every pairwise check in the simulation (ship/asteroid, ship/missile,
//! asteroid/missile, asteroid/asteroid, ufo/ship, ufo/missile) goes through
//! the one predicate below.

use glam::Vec2;

/// True iff the two circles overlap (strictly: touching circles do not).
///
/// Non-finite or negative inputs are a programming error; they assert in
/// debug builds and are treated as a miss in release.
#[inline]
pub fn circles_overlap(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    let valid = a.is_finite()
        && b.is_finite()
        && radius_a.is_finite()
        && radius_b.is_finite()
        && radius_a >= 0.0
        && radius_b >= 0.0;
    if !valid {
        debug_assert!(false, "collision check with invalid circle");
        return false;
    }
    let sum = radius_a + radius_b;
    a.distance_squared(b) < sum * sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlapping_circles() {
        assert!(circles_overlap(
            Vec2::new(0.0, 0.0),
            10.0,
            Vec2::new(15.0, 0.0),
            10.0
        ));
    }

    #[test]
    fn test_distant_circles_miss() {
        assert!(!circles_overlap(
            Vec2::new(0.0, 0.0),
            10.0,
            Vec2::new(100.0, 100.0),
            10.0
        ));
    }

    #[test]
    fn test_tangent_circles_do_not_collide() {
        // Distance exactly equal to the radius sum is a miss
        assert!(!circles_overlap(
            Vec2::new(0.0, 0.0),
            10.0,
            Vec2::new(20.0, 0.0),
            10.0
        ));
    }

    #[test]
    fn test_coincident_centers_collide() {
        assert!(circles_overlap(
            Vec2::new(5.0, 5.0),
            1.0,
            Vec2::new(5.0, 5.0),
            1.0
        ));
    }

    #[cfg(not(debug_assertions))]
    #[test]
    fn test_invalid_input_is_a_miss_in_release() {
        assert!(!circles_overlap(
            Vec2::new(f32::NAN, 0.0),
            10.0,
            Vec2::ZERO,
            10.0
        ));
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(
            ax in -1000.0f32..1000.0,
            ay in -1000.0f32..1000.0,
            bx in -1000.0f32..1000.0,
            by in -1000.0f32..1000.0,
            ra in 0.0f32..100.0,
            rb in 0.0f32..100.0,
        ) {
            let a = Vec2::new(ax, ay);
            let b = Vec2::new(bx, by);
            prop_assert_eq!(
                circles_overlap(a, ra, b, rb),
                circles_overlap(b, rb, a, ra)
            );
        }

        #[test]
        fn prop_growing_a_circle_preserves_overlap(
            ax in -1000.0f32..1000.0,
            ay in -1000.0f32..1000.0,
            bx in -1000.0f32..1000.0,
            by in -1000.0f32..1000.0,
            ra in 0.0f32..100.0,
            rb in 0.0f32..100.0,
            grow in 0.0f32..100.0,
        ) {
            let a = Vec2::new(ax, ay);
            let b = Vec2::new(bx, by);
            if circles_overlap(a, ra, b, rb) {
                prop_assert!(circles_overlap(a, ra + grow, b, rb));
            }
        }
    }
}
