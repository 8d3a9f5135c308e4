//! Game entities: positioned rectangles and the ball specialization
//!
//! Everything on screen - paddle, bricks, falling powerup icons - is an
//! [`Entity`]. The [`Ball`] wraps one and adds circle collision plus the
//! physics-exception flags the powerups toggle.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Texture keys the resource collaborator resolves to drawable handles.
///
/// The simulation never touches texture data; it only tags entities with
/// the name a renderer should ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpriteKey {
    Face,
    Paddle,
    Block,
    BlockSolid,
    Background,
    PowerupSpeed,
    PowerupSticky,
    PowerupPassthrough,
    PowerupIncrease,
    PowerupConfuse,
    PowerupChaos,
}

impl SpriteKey {
    /// String key used in resource requests
    pub fn as_str(&self) -> &'static str {
        match self {
            SpriteKey::Face => "face",
            SpriteKey::Paddle => "paddle",
            SpriteKey::Block => "block",
            SpriteKey::BlockSolid => "block_solid",
            SpriteKey::Background => "background",
            SpriteKey::PowerupSpeed => "powerup_speed",
            SpriteKey::PowerupSticky => "powerup_sticky",
            SpriteKey::PowerupPassthrough => "powerup_passthrough",
            SpriteKey::PowerupIncrease => "powerup_increase",
            SpriteKey::PowerupConfuse => "powerup_confuse",
            SpriteKey::PowerupChaos => "powerup_chaos",
        }
    }
}

/// A positioned, sized, colored, velocity-bearing rectangle.
///
/// Solid bricks set `is_solid` and are permanently immutable: they are never
/// destroyed and never spawn powerups, only trigger the shake effect when
/// hit. Destroyed entities are excluded from collision and gameplay-visible
/// state but may remain in storage until the frame ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub position: Vec2,
    pub size: Vec2,
    pub velocity: Vec2,
    pub color: Vec3,
    pub rotation: f32,
    pub is_solid: bool,
    pub destroyed: bool,
    pub sprite: SpriteKey,
}

impl Entity {
    pub fn new(position: Vec2, size: Vec2, sprite: SpriteKey) -> Self {
        Self {
            position,
            size,
            velocity: Vec2::ZERO,
            color: Vec3::ONE,
            rotation: 0.0,
            is_solid: false,
            destroyed: false,
            sprite,
        }
    }

    /// Builder-style color override
    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }

    /// Builder-style velocity override
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Geometric center of the rectangle
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.position + self.size / 2.0
    }
}

/// The ball: an [`Entity`] plus a radius and three physics-exception flags.
///
/// Created once at game init and repositioned, never recreated, on life loss
/// or level change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub entity: Entity,
    pub radius: f32,
    /// Riding the paddle: moves only by paddle-follow, skips physics
    pub stuck: bool,
    /// Sticky powerup active: re-stick on the next paddle contact
    pub sticky: bool,
    /// Passthrough powerup active: suppresses collision response against
    /// non-solid bricks while still triggering their destruction
    pub passthrough: bool,
}

impl Ball {
    pub fn new(position: Vec2, radius: f32, velocity: Vec2) -> Self {
        Self {
            entity: Entity::new(position, Vec2::splat(radius * 2.0), SpriteKey::Face)
                .with_velocity(velocity),
            radius,
            stuck: true,
            sticky: false,
            passthrough: false,
        }
    }

    /// Circle center used by the circle-AABB test
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.entity.position + Vec2::splat(self.radius)
    }

    /// Integrate position and bounce off the left/right/top field edges.
    ///
    /// There is deliberately no bounce at the bottom edge: crossing the field
    /// height is the ball-lost condition and belongs to the orchestrator.
    pub fn update_position(&mut self, dt: f32, field_width: u32) -> Vec2 {
        if !self.stuck {
            self.entity.position += self.entity.velocity * dt;

            let right_edge = field_width as f32 - self.entity.size.x;
            if self.entity.position.x <= 0.0 {
                self.entity.velocity.x = -self.entity.velocity.x;
                self.entity.position.x = 0.0;
            } else if self.entity.position.x >= right_edge {
                self.entity.velocity.x = -self.entity.velocity.x;
                self.entity.position.x = right_edge;
            }
            if self.entity.position.y <= 0.0 {
                self.entity.velocity.y = -self.entity.velocity.y;
                self.entity.position.y = 0.0;
            }
        }
        self.entity.position
    }

    /// Reposition onto the paddle after a life loss or level change
    pub fn reset(&mut self, position: Vec2, velocity: Vec2) {
        self.entity.position = position;
        self.entity.velocity = velocity;
        self.stuck = true;
    }
}

/// Default ball resting on the paddle, centered
pub fn default_ball(paddle: &Entity) -> Ball {
    let pos = paddle.position
        + Vec2::new(
            paddle.size.x / 2.0 - BALL_RADIUS,
            -BALL_RADIUS * 2.0,
        );
    Ball::new(pos, BALL_RADIUS, INITIAL_BALL_VELOCITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stuck_ball_ignores_physics() {
        let mut ball = Ball::new(Vec2::new(100.0, 100.0), 12.5, Vec2::new(100.0, -350.0));
        assert!(ball.stuck);
        let pos = ball.update_position(1.0, 800);
        assert_eq!(pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_ball_bounces_off_left_wall() {
        let mut ball = Ball::new(Vec2::new(5.0, 100.0), 12.5, Vec2::new(-100.0, 0.0));
        ball.stuck = false;
        ball.update_position(0.1, 800);
        assert_eq!(ball.entity.position.x, 0.0);
        assert!(ball.entity.velocity.x > 0.0);
    }

    #[test]
    fn test_ball_bounces_off_right_wall() {
        let mut ball = Ball::new(Vec2::new(770.0, 100.0), 12.5, Vec2::new(200.0, 0.0));
        ball.stuck = false;
        ball.update_position(0.1, 800);
        assert_eq!(ball.entity.position.x, 800.0 - ball.entity.size.x);
        assert!(ball.entity.velocity.x < 0.0);
    }

    #[test]
    fn test_no_bottom_bounce() {
        let mut ball = Ball::new(Vec2::new(400.0, 590.0), 12.5, Vec2::new(0.0, 300.0));
        ball.stuck = false;
        ball.update_position(0.5, 800);
        // Ball keeps falling; loss handling is not the mover's job
        assert!(ball.entity.position.y > 600.0);
        assert!(ball.entity.velocity.y > 0.0);
    }

    #[test]
    fn test_reset_resticks() {
        let mut ball = Ball::new(Vec2::ZERO, 12.5, Vec2::ZERO);
        ball.stuck = false;
        ball.reset(Vec2::new(50.0, 50.0), Vec2::new(100.0, -350.0));
        assert!(ball.stuck);
        assert_eq!(ball.entity.position, Vec2::new(50.0, 50.0));
    }
}
