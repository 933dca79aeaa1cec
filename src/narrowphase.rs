use glam::Vec2;

use crate::api::NarrowphaseApi;

/// Narrowphase primitive tests for axis-aligned rectangles.
pub struct Narrowphase;

impl NarrowphaseApi for Narrowphase {
    fn intersect_rect_rect(min0: Vec2, max0: Vec2, min1: Vec2, max1: Vec2) -> Option<(Vec2, Vec2)> {
        let x_left = min0.x.max(min1.x);
        let x_right = max0.x.min(max1.x);
        let y_top = min0.y.max(min1.y);
        let y_bottom = max0.y.min(max1.y);

        // Strict: rectangles sharing only an edge or a corner do not intersect.
        if x_right > x_left && y_bottom > y_top {
            Some((Vec2::new(x_left, y_top), Vec2::new(x_right, y_bottom)))
        } else {
            None
        }
    }

    fn overlap_area_rect_rect(min0: Vec2, max0: Vec2, min1: Vec2, max1: Vec2) -> f32 {
        match Self::intersect_rect_rect(min0, max0, min1, max1) {
            Some((min, max)) => {
                let size = max - min;
                size.x * size.y
            }
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> (Vec2, Vec2) {
        (Vec2::new(x, y), Vec2::new(x + w, y + h))
    }

    fn area(a: (Vec2, Vec2), b: (Vec2, Vec2)) -> f32 {
        Narrowphase::overlap_area_rect_rect(a.0, a.1, b.0, b.1)
    }

    #[test]
    fn test_overlap_area_partial() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(5.0, 5.0, 10.0, 10.0);
        assert_eq!(area(a, b), 25.0);
    }

    #[test]
    fn test_overlap_area_contained() {
        let outer = rect(0.0, 0.0, 10.0, 10.0);
        let inner = rect(2.0, 3.0, 2.0, 4.0);
        assert_eq!(area(outer, inner), 8.0);
        assert_eq!(area(inner, outer), 8.0);
    }

    #[test]
    fn test_overlap_area_separated() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(20.0, 20.0, 10.0, 10.0);
        assert_eq!(area(a, b), 0.0);
        // Apart on one axis only
        let c = rect(0.0, 11.0, 10.0, 10.0);
        assert_eq!(area(a, c), 0.0);
    }

    #[test]
    fn test_edge_and_corner_touch_is_not_overlap() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let right = rect(10.0, 0.0, 10.0, 10.0);
        let below = rect(0.0, 10.0, 10.0, 10.0);
        let corner = rect(10.0, 10.0, 10.0, 10.0);
        assert_eq!(area(a, right), 0.0);
        assert_eq!(area(a, below), 0.0);
        assert_eq!(area(a, corner), 0.0);
        assert!(Narrowphase::intersect_rect_rect(a.0, a.1, right.0, right.1).is_none());
    }

    #[test]
    fn test_intersection_rect() {
        let a = rect(0.0, 0.0, 4.0, 4.0);
        let b = rect(1.0, 2.0, 4.0, 4.0);
        let (min, max) = Narrowphase::intersect_rect_rect(a.0, a.1, b.0, b.1).unwrap();
        assert_eq!(min, Vec2::new(1.0, 2.0));
        assert_eq!(max, Vec2::new(4.0, 4.0));
    }

    fn any_rect() -> impl Strategy<Value = (Vec2, Vec2)> {
        (-100i32..100, -100i32..100, 0i32..50, 0i32..50)
            .prop_map(|(x, y, w, h)| rect(x as f32, y as f32, w as f32, h as f32))
    }

    proptest! {
        #[test]
        fn prop_overlap_area_is_symmetric(a in any_rect(), b in any_rect()) {
            prop_assert_eq!(area(a, b), area(b, a));
        }

        #[test]
        fn prop_overlap_area_is_never_negative(a in any_rect(), b in any_rect()) {
            prop_assert!(area(a, b) >= 0.0);
        }

        #[test]
        fn prop_identical_bounds_overlap_fully(a in any_rect()) {
            let size = a.1 - a.0;
            prop_assert_eq!(area(a, a), size.x * size.y);
        }

        #[test]
        fn prop_touching_rects_do_not_overlap(a in any_rect(), h in 0i32..50, dy in -60i32..60) {
            // Second rect starts exactly on the right edge of the first.
            let b = rect(a.1.x, a.0.y + dy as f32, 7.0, h as f32);
            prop_assert_eq!(area(a, b), 0.0);
        }
    }
}
