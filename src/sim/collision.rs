//! Collision detection for rectangles and the ball
//!
//! Two tests drive the whole game: an inclusive AABB-AABB overlap check for
//! paddle/powerup pickup, and a circle-AABB check for the ball against bricks
//! and the paddle. The circle test also classifies which compass direction
//! the hit came from so the resolver knows which velocity axis to reverse.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Ball, Entity};

/// Compass direction of a ball-AABB hit.
///
/// Declaration order is the tie-break order for [`vector_direction`]:
/// the first direction with the highest dot product wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

/// Result of a ball-AABB check
#[derive(Debug, Clone, Copy)]
pub struct Collision {
    pub hit: bool,
    pub dir: Direction,
    /// Closest point on the box minus the circle center. Its per-axis
    /// magnitude feeds the penetration-based repositioning.
    pub diff: Vec2,
}

impl Collision {
    pub fn miss() -> Self {
        Self {
            hit: false,
            dir: Direction::Up,
            diff: Vec2::ZERO,
        }
    }
}

/// AABB-AABB overlap, edges touching included
pub fn check_collision(a: &Entity, b: &Entity) -> bool {
    let x_overlap =
        a.position.x + a.size.x >= b.position.x && b.position.x + b.size.x >= a.position.x;
    let y_overlap =
        a.position.y + a.size.y >= b.position.y && b.position.y + b.size.y >= a.position.y;
    x_overlap && y_overlap
}

/// Circle-AABB test for the ball.
///
/// Clamps the box-center-to-ball vector component-wise to the box half
/// extents to find the closest point on the box, then compares the distance
/// from that point to the circle center against the radius. A ball resting
/// exactly tangent (distance == radius) does not count as a hit.
pub fn check_ball_collision(ball: &Ball, aabb: &Entity) -> Collision {
    let center = ball.center();
    let half_extents = aabb.size / 2.0;
    let aabb_center = aabb.position + half_extents;

    let difference = center - aabb_center;
    let clamped = difference.clamp(-half_extents, half_extents);
    let closest = aabb_center + clamped;
    let diff = closest - center;

    if diff.length() < ball.radius {
        Collision {
            hit: true,
            dir: vector_direction(diff),
            diff,
        }
    } else {
        Collision::miss()
    }
}

/// Classify a vector as the compass direction it most points toward.
///
/// Ties go to the first direction in [`Direction`] declaration order.
pub fn vector_direction(target: Vec2) -> Direction {
    const COMPASS: [(Direction, Vec2); 4] = [
        (Direction::Up, Vec2::new(0.0, 1.0)),
        (Direction::Right, Vec2::new(1.0, 0.0)),
        (Direction::Down, Vec2::new(0.0, -1.0)),
        (Direction::Left, Vec2::new(-1.0, 0.0)),
    ];

    let normalized = target.normalize_or_zero();
    let mut best = Direction::Up;
    let mut max = 0.0_f32;
    for (dir, axis) in COMPASS {
        let dot = normalized.dot(axis);
        if dot > max {
            max = dot;
            best = dir;
        }
    }
    best
}
