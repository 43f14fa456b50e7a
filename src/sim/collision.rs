//! Collision detection for circles and axis-aligned rectangles
//!
//! The ball is a circle, coins are circles, obstacles are rectangles given by
//! their top-left corner and size. All positions are in arena pixels with y down.

use glam::Vec2;

/// Result of a ball/rectangle check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Closest point on the rectangle to the circle centre (if hit)
    pub point: Vec2,
    /// Penetration depth
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Keep a circle fully inside `[0, bounds]` on both axes
#[inline]
pub fn clamp_circle(center: Vec2, radius: f32, bounds: Vec2) -> Vec2 {
    Vec2::new(
        radius.max((bounds.x - radius).min(center.x)),
        radius.max((bounds.y - radius).min(center.y)),
    )
}

/// Strict overlap test between two circles
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    a.distance(b) < a_radius + b_radius
}

/// Check a circle against a rectangle.
///
/// Broad phase rejects on centre distance per axis; narrow phase measures the
/// distance from the circle centre to the closest point on the rectangle.
pub fn circle_rect_collision(
    center: Vec2,
    radius: f32,
    rect_pos: Vec2,
    rect_size: Vec2,
) -> CollisionResult {
    let half = rect_size * 0.5;
    let offset = (center - (rect_pos + half)).abs();
    if offset.x > half.x + radius || offset.y > half.y + radius {
        return CollisionResult::miss();
    }

    let closest = center.clamp(rect_pos, rect_pos + rect_size);
    let dist = center.distance(closest);
    if dist < radius {
        CollisionResult {
            hit: true,
            point: closest,
            penetration: radius - dist,
        }
    } else {
        CollisionResult::miss()
    }
}

/// Bounce a rectangle off the edges of `[0, bounds]`.
///
/// When the rectangle sticks out on an axis, that axis' velocity flips and the
/// position is pulled back inside.
pub fn bounce_in_bounds(pos: &mut Vec2, vel: &mut Vec2, size: Vec2, bounds: Vec2) {
    if pos.x < 0.0 || pos.x + size.x > bounds.x {
        vel.x = -vel.x;
        pos.x = pos.x.min(bounds.x - size.x).max(0.0);
    }
    if pos.y < 0.0 || pos.y + size.y > bounds.y {
        vel.y = -vel.y;
        pos.y = pos.y.min(bounds.y - size.y).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BOUNDS: Vec2 = Vec2::new(900.0, 600.0);

    #[test]
    fn test_clamp_circle() {
        assert_eq!(clamp_circle(Vec2::new(-10.0, 700.0), 25.0, BOUNDS), Vec2::new(25.0, 575.0));
        assert_eq!(clamp_circle(Vec2::new(450.0, 300.0), 25.0, BOUNDS), Vec2::new(450.0, 300.0));
        assert_eq!(clamp_circle(Vec2::new(899.0, 1.0), 33.0, BOUNDS), Vec2::new(867.0, 33.0));
    }

    #[test]
    fn test_circles_overlap_is_strict() {
        let a = Vec2::new(0.0, 0.0);
        assert!(circles_overlap(a, 25.0, Vec2::new(39.0, 0.0), 15.0));
        // Touching exactly is not a pickup
        assert!(!circles_overlap(a, 25.0, Vec2::new(40.0, 0.0), 15.0));
    }

    #[test]
    fn test_circle_rect_broad_phase_reject() {
        let result = circle_rect_collision(
            Vec2::new(0.0, 0.0),
            25.0,
            Vec2::new(100.0, 100.0),
            Vec2::new(50.0, 40.0),
        );
        assert!(!result.hit);
    }

    #[test]
    fn test_circle_rect_corner_miss() {
        // Inside the broad-phase box near the corner but outside the true circle
        let rect_pos = Vec2::new(100.0, 100.0);
        let center = Vec2::new(100.0 - 20.0, 100.0 - 20.0);
        let result = circle_rect_collision(center, 25.0, rect_pos, Vec2::new(50.0, 40.0));
        assert!(!result.hit);
    }

    #[test]
    fn test_circle_rect_edge_hit() {
        let rect_pos = Vec2::new(100.0, 100.0);
        let center = Vec2::new(90.0, 120.0);
        let result = circle_rect_collision(center, 25.0, rect_pos, Vec2::new(50.0, 40.0));
        assert!(result.hit);
        assert_eq!(result.point, Vec2::new(100.0, 120.0));
        assert!((result.penetration - 15.0).abs() < 1e-4);
    }

    #[test]
    fn test_circle_inside_rect_hits() {
        let result = circle_rect_collision(
            Vec2::new(120.0, 120.0),
            5.0,
            Vec2::new(100.0, 100.0),
            Vec2::new(50.0, 40.0),
        );
        assert!(result.hit);
    }

    #[test]
    fn test_bounce_left_edge() {
        let mut pos = Vec2::new(0.0, 100.0);
        let mut vel = Vec2::new(-3.0, 2.0);
        pos += vel;
        bounce_in_bounds(&mut pos, &mut vel, Vec2::new(40.0, 40.0), BOUNDS);
        assert_eq!(vel, Vec2::new(3.0, 2.0));
        assert_eq!(pos.x, 0.0);
    }

    #[test]
    fn test_bounce_bottom_right() {
        let mut pos = Vec2::new(870.0, 570.0);
        let mut vel = Vec2::new(4.0, 4.0);
        pos += vel;
        bounce_in_bounds(&mut pos, &mut vel, Vec2::new(40.0, 40.0), BOUNDS);
        assert_eq!(vel, Vec2::new(-4.0, -4.0));
        assert_eq!(pos, Vec2::new(860.0, 560.0));
    }

    proptest! {
        #[test]
        fn prop_clamp_keeps_ball_inside(
            x in -2000.0f32..2000.0,
            y in -2000.0f32..2000.0,
            r in 1.0f32..60.0,
        ) {
            let c = clamp_circle(Vec2::new(x, y), r, BOUNDS);
            prop_assert!(c.x - r >= -1e-3 && c.x + r <= BOUNDS.x + 1e-3);
            prop_assert!(c.y - r >= -1e-3 && c.y + r <= BOUNDS.y + 1e-3);
        }

        #[test]
        fn prop_bounce_never_escapes(
            x in 0.0f32..830.0,
            y in 0.0f32..550.0,
            vx in -4.0f32..4.0,
            vy in -4.0f32..4.0,
            ticks in 1usize..500,
        ) {
            let size = Vec2::new(70.0, 50.0);
            let mut pos = Vec2::new(x, y);
            let mut vel = Vec2::new(vx, vy);
            for _ in 0..ticks {
                pos += vel;
                bounce_in_bounds(&mut pos, &mut vel, size, BOUNDS);
                prop_assert!(pos.x >= 0.0 && pos.x + size.x <= BOUNDS.x);
                prop_assert!(pos.y >= 0.0 && pos.y + size.y <= BOUNDS.y);
            }
        }
    }
}
