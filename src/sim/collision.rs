//! Collision detection for the avatar
//!
//! The avatar is a circle; obstacle bodies are axis-aligned rectangles.
//! Ground and ceiling tests are inclusive (touching counts), obstacle bodies
//! use a strict squared-distance test so a grazing pass survives.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::obstacles::Obstacle;

/// What the avatar ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hit {
    Ground,
    Ceiling,
    /// Index into the obstacle slice
    Obstacle(usize),
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Point inside or on the rectangle nearest to `p`
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max)
    }
}

/// Circle vs rectangle overlap via closest point on the rectangle
#[inline]
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let closest = rect.closest_point(center);
    center.distance_squared(closest) < radius * radius
}

/// Upper and lower solid bodies of an obstacle, spanning to the world bounds
pub fn obstacle_bodies(obstacle: &Obstacle, ground_y: f32, ceiling_y: f32) -> [Rect; 2] {
    let left = obstacle.x();
    let right = obstacle.right();
    [
        Rect::new(
            Vec2::new(left, ceiling_y),
            Vec2::new(right, obstacle.gap_start()),
        ),
        Rect::new(
            Vec2::new(left, obstacle.gap_end()),
            Vec2::new(right, ground_y),
        ),
    ]
}

/// First collision found for the avatar, checking ground, ceiling, then obstacles
pub fn hit_kind(
    center: Vec2,
    radius: f32,
    obstacles: &[Obstacle],
    ground_y: f32,
    ceiling_y: f32,
) -> Option<Hit> {
    if center.y + radius >= ground_y {
        return Some(Hit::Ground);
    }
    if center.y - radius <= ceiling_y {
        return Some(Hit::Ceiling);
    }
    obstacles
        .iter()
        .position(|o| {
            obstacle_bodies(o, ground_y, ceiling_y)
                .iter()
                .any(|body| circle_rect_overlap(center, radius, body))
        })
        .map(Hit::Obstacle)
}

/// Whether the avatar overlaps the world bounds or any obstacle body
#[inline]
pub fn collides(
    center: Vec2,
    radius: f32,
    obstacles: &[Obstacle],
    ground_y: f32,
    ceiling_y: f32,
) -> bool {
    hit_kind(center, radius, obstacles, ground_y, ceiling_y).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    const GROUND: f32 = 520.0;
    const CEILING: f32 = 0.0;

    fn obstacle_at(x: f32, gap_start: f32) -> Obstacle {
        Obstacle::new(x, 64.0, gap_start, 150.0)
    }

    #[test]
    fn test_ground_boundary_inclusive() {
        // bottom = 514 < 520
        assert!(!collides(Vec2::new(90.0, 500.0), 14.0, &[], GROUND, CEILING));
        // bottom = 520, touching counts
        assert!(collides(Vec2::new(90.0, 506.0), 14.0, &[], GROUND, CEILING));
        assert_eq!(
            hit_kind(Vec2::new(90.0, 506.0), 14.0, &[], GROUND, CEILING),
            Some(Hit::Ground)
        );
    }

    #[test]
    fn test_ceiling_boundary_inclusive() {
        assert!(!collides(Vec2::new(90.0, 14.5), 14.0, &[], GROUND, CEILING));
        assert_eq!(
            hit_kind(Vec2::new(90.0, 14.0), 14.0, &[], GROUND, CEILING),
            Some(Hit::Ceiling)
        );
    }

    #[test]
    fn test_ground_checked_before_obstacles() {
        let obstacles = [obstacle_at(80.0, 100.0)];
        assert_eq!(
            hit_kind(Vec2::new(90.0, 510.0), 14.0, &obstacles, GROUND, CEILING),
            Some(Hit::Ground)
        );
    }

    #[test]
    fn test_inside_gap_is_clear() {
        // Gap spans 200..350
        let obstacles = [obstacle_at(70.0, 200.0)];
        assert!(!collides(Vec2::new(90.0, 275.0), 14.0, &obstacles, GROUND, CEILING));
    }

    #[test]
    fn test_hits_top_body() {
        let obstacles = [obstacle_at(70.0, 200.0)];
        assert_eq!(
            hit_kind(Vec2::new(90.0, 205.0), 14.0, &obstacles, GROUND, CEILING),
            Some(Hit::Obstacle(0))
        );
    }

    #[test]
    fn test_hits_bottom_body() {
        let obstacles = [obstacle_at(70.0, 200.0)];
        assert!(collides(Vec2::new(90.0, 340.0), 14.0, &obstacles, GROUND, CEILING));
    }

    #[test]
    fn test_grazing_edge_is_clear() {
        // Top body ends at y=200; circle bottom-to-top distance exactly equals radius
        let obstacles = [obstacle_at(70.0, 200.0)];
        assert!(!collides(Vec2::new(90.0, 214.0), 14.0, &obstacles, GROUND, CEILING));
        assert!(collides(Vec2::new(90.0, 213.9), 14.0, &obstacles, GROUND, CEILING));
    }

    #[test]
    fn test_corner_uses_distance_not_box() {
        // Circle diagonally off the bottom-left corner of the top body (70, 200)
        let obstacles = [obstacle_at(70.0, 200.0)];
        // dx = dy = 10 → dist ≈ 14.14 > 14
        assert!(!collides(Vec2::new(60.0, 210.0), 14.0, &obstacles, GROUND, CEILING));
        // dx = dy = 9 → dist ≈ 12.7 < 14
        assert!(collides(Vec2::new(61.0, 209.0), 14.0, &obstacles, GROUND, CEILING));
    }

    #[test]
    fn test_reports_first_hit_obstacle() {
        let obstacles = [obstacle_at(300.0, 200.0), obstacle_at(70.0, 300.0)];
        assert_eq!(
            hit_kind(Vec2::new(90.0, 250.0), 14.0, &obstacles, GROUND, CEILING),
            Some(Hit::Obstacle(1))
        );
    }

    #[test]
    fn test_circle_rect_overlap() {
        let rect = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(circle_rect_overlap(Vec2::new(5.0, 5.0), 1.0, &rect));
        assert!(circle_rect_overlap(Vec2::new(12.0, 5.0), 3.0, &rect));
        assert!(!circle_rect_overlap(Vec2::new(13.0, 5.0), 3.0, &rect));
    }
}
