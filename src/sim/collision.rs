//! Circle vs axis-aligned rectangle collision
//!
//! Two queries share the same broad test: the ball overlaps a rectangle when the
//! closest point of the rectangle lies within one radius of the ball's center.
//! The edge classifier then decides which face was struck so the caller knows
//! which velocity axis to invert.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;

/// Face of a rectangle struck by the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionEdge {
    /// No overlap
    None,
    Top,
    Bottom,
    Left,
    Right,
}

impl CollisionEdge {
    /// Top or bottom face (the vertical velocity component flips)
    pub fn is_horizontal_face(&self) -> bool {
        matches!(self, CollisionEdge::Top | CollisionEdge::Bottom)
    }

    /// Left or right face (the horizontal velocity component flips)
    pub fn is_vertical_face(&self) -> bool {
        matches!(self, CollisionEdge::Left | CollisionEdge::Right)
    }
}

/// Check whether a circle overlaps a rectangle (touching counts)
#[inline]
pub fn circle_intersects_rect(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let closest = rect.closest_point(center);
    center.distance_squared(closest) <= radius * radius
}

/// Classify which face of `rect` the circle struck
///
/// Uses the delta from the rectangle's center to the circle's center, scaled by
/// the half-extents of the rectangle grown by the radius (a Minkowski-sum
/// diagonal test). Hits exactly on a grown diagonal fall to whichever branch
/// the comparisons pick, so near-corner hits may be misclassified. That is
/// accepted: the result only picks an axis to reflect.
pub fn classify_collision_edge(center: Vec2, radius: f32, rect: &Rect) -> CollisionEdge {
    if !circle_intersects_rect(center, radius, rect) {
        return CollisionEdge::None;
    }

    let delta = center - rect.center();
    let half = rect.half_extents();

    let vertical = (half.x + radius) * delta.y;
    let horizontal = (half.y + radius) * delta.x;

    if vertical > horizontal {
        if vertical > -horizontal {
            CollisionEdge::Bottom
        } else {
            CollisionEdge::Left
        }
    } else if vertical > -horizontal {
        CollisionEdge::Right
    } else {
        CollisionEdge::Top
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn brick() -> Rect {
        // Center at (120, 107.5)
        Rect::new(100.0, 100.0, 40, 15)
    }

    #[test]
    fn test_intersects_touching_counts() {
        let rect = brick();
        // Exactly one radius above the top face
        assert!(circle_intersects_rect(Vec2::new(120.0, 92.0), 8.0, &rect));
        assert!(!circle_intersects_rect(Vec2::new(120.0, 91.9), 8.0, &rect));
    }

    #[test]
    fn test_intersects_corner_uses_euclidean_distance() {
        let rect = brick();
        // 6 px left and 6 px above the top-left corner: ~8.49 px away
        assert!(!circle_intersects_rect(Vec2::new(94.0, 94.0), 8.0, &rect));
        // 5 px and 5 px: ~7.07 px away
        assert!(circle_intersects_rect(Vec2::new(95.0, 95.0), 8.0, &rect));
    }

    #[test]
    fn test_intersects_center_inside() {
        assert!(circle_intersects_rect(Vec2::new(110.0, 105.0), 1.0, &brick()));
    }

    #[test]
    fn test_classify_miss() {
        assert_eq!(
            classify_collision_edge(Vec2::new(120.0, 80.0), 8.0, &brick()),
            CollisionEdge::None
        );
    }

    #[test]
    fn test_classify_each_face() {
        let rect = brick();
        let r = 8.0;
        assert_eq!(classify_collision_edge(Vec2::new(120.0, 95.0), r, &rect), CollisionEdge::Top);
        assert_eq!(
            classify_collision_edge(Vec2::new(120.0, 120.0), r, &rect),
            CollisionEdge::Bottom
        );
        assert_eq!(classify_collision_edge(Vec2::new(95.0, 107.5), r, &rect), CollisionEdge::Left);
        assert_eq!(
            classify_collision_edge(Vec2::new(145.0, 107.5), r, &rect),
            CollisionEdge::Right
        );
    }

    #[test]
    fn test_classify_off_center_face_hits() {
        let rect = brick();
        // Under the brick, well toward its right end
        assert_eq!(
            classify_collision_edge(Vec2::new(135.0, 121.0), 8.0, &rect),
            CollisionEdge::Bottom
        );
        // Left of the brick, slightly above its middle
        assert_eq!(
            classify_collision_edge(Vec2::new(94.0, 104.0), 8.0, &rect),
            CollisionEdge::Left
        );
    }

    #[test]
    fn test_classify_near_corner_picks_dominant_axis() {
        // Near the top-left corner but mostly to the left
        let edge = classify_collision_edge(Vec2::new(95.0, 96.0), 8.0, &brick());
        assert_eq!(edge, CollisionEdge::Left);
    }

    #[test]
    fn test_classify_center_inside_is_not_none() {
        let edge = classify_collision_edge(Vec2::new(105.0, 107.5), 8.0, &brick());
        assert_eq!(edge, CollisionEdge::Left);
    }

    #[test]
    fn test_edge_axis_helpers() {
        assert!(CollisionEdge::Top.is_horizontal_face());
        assert!(CollisionEdge::Bottom.is_horizontal_face());
        assert!(CollisionEdge::Left.is_vertical_face());
        assert!(!CollisionEdge::None.is_vertical_face());
        assert!(!CollisionEdge::None.is_horizontal_face());
    }

    /// Minimum squared distance from `center` to any integer point of `rect`
    fn brute_force_distance_sq(center: Vec2, rect: &Rect) -> f32 {
        let mut best = f32::MAX;
        for y in 0..=rect.size.height {
            for x in 0..=rect.size.width {
                let p = rect.position + Vec2::new(x as f32, y as f32);
                best = best.min(center.distance_squared(p));
            }
        }
        best
    }

    proptest! {
        #[test]
        fn prop_intersects_matches_brute_force(
            cx in -100i32..100, cy in -100i32..100, r in 1i32..30,
            x in -60i32..60, y in -60i32..60, w in 1u32..30, h in 1u32..30,
        ) {
            let center = Vec2::new(cx as f32, cy as f32);
            let radius = r as f32;
            let rect = Rect::new(x as f32, y as f32, w, h);
            let brute = brute_force_distance_sq(center, &rect) <= radius * radius;
            prop_assert_eq!(circle_intersects_rect(center, radius, &rect), brute);
        }

        #[test]
        fn prop_intersects_invariant_under_translation(
            cx in -500i32..500, cy in -500i32..500, r in 1i32..50,
            x in -500i32..500, y in -500i32..500, w in 1u32..200, h in 1u32..200,
            ox in -1000i32..1000, oy in -1000i32..1000,
        ) {
            let center = Vec2::new(cx as f32, cy as f32);
            let radius = r as f32;
            let rect = Rect::new(x as f32, y as f32, w, h);
            let offset = Vec2::new(ox as f32, oy as f32);
            prop_assert_eq!(
                circle_intersects_rect(center, radius, &rect),
                circle_intersects_rect(center + offset, radius, &rect.translated(offset))
            );
        }

        #[test]
        fn prop_classify_none_iff_no_overlap(
            cx in -100i32..100, cy in -100i32..100, r in 1i32..30,
            x in -60i32..60, y in -60i32..60, w in 1u32..60, h in 1u32..60,
        ) {
            let center = Vec2::new(cx as f32, cy as f32);
            let radius = r as f32;
            let rect = Rect::new(x as f32, y as f32, w, h);
            let edge = classify_collision_edge(center, radius, &rect);
            prop_assert_eq!(
                edge == CollisionEdge::None,
                !circle_intersects_rect(center, radius, &rect)
            );
        }
    }
}
