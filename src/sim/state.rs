//! Authoritative game state
//!
//! One explicit struct owns everything the simulation mutates: no globals,
//! no singletons. Rendering and audio consume this state and the per-frame
//! [`GameEvent`] list; they never own any of it.

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Ball, Entity, SpriteKey, default_ball};
use super::level::{BUILTIN_LEVELS, Level, LevelError};
use super::powerup::{Powerup, PowerupKind, ScreenEffect};
use crate::consts::*;

/// Key codes the simulation reads (GLFW numbering)
pub mod keys {
    pub const SPACE: usize = 32;
    pub const A: usize = 65;
    pub const D: usize = 68;
    pub const RIGHT: usize = 262;
    pub const LEFT: usize = 263;
}

/// Coarse game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Active,
    Menu,
    Win,
}

/// Side effects produced during an update, drained once per frame by the
/// platform layer (audio triggers, HUD, post-processing).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    BrickDestroyed,
    SolidBrickHit,
    PowerupCollected(PowerupKind),
    PaddleBounce,
    BallLost,
    LevelComplete,
}

/// Visual-effect state the simulation drives
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Effects {
    /// Seconds of screen shake remaining
    pub shake_time: f32,
    /// Shake currently requested from the post-processor
    pub shake: bool,
    /// Confuse/chaos slot, at most one at a time
    pub screen: ScreenEffect,
}

fn empty_keys() -> [bool; NUM_KEYS] {
    [false; NUM_KEYS]
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed the RNG was created from, kept for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub width: u32,
    pub height: u32,
    pub levels: Vec<Level>,
    pub current_level: usize,
    pub player: Entity,
    pub ball: Ball,
    pub powerups: Vec<Powerup>,
    pub effects: Effects,
    /// Pressed-key set, indexed by key code, written by the input callback
    #[serde(skip, default = "empty_keys")]
    pub keys: [bool; NUM_KEYS],
    /// Powerup-spawn RNG; seeded so runs replay identically
    pub rng: Pcg32,
    /// Events produced this frame, drained by the platform layer
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Build a fresh game: four built-in levels, paddle centered at the
    /// bottom, ball stuck to it. Level parse failure aborts startup.
    pub fn new(seed: u64) -> Result<Self, LevelError> {
        let width = FIELD_WIDTH;
        let height = FIELD_HEIGHT;

        let mut levels = Vec::with_capacity(BUILTIN_LEVELS.len());
        for text in BUILTIN_LEVELS {
            levels.push(Level::parse(text, width, height / 2)?);
        }

        let player_pos = Vec2::new(
            width as f32 / 2.0 - PLAYER_SIZE.x / 2.0,
            height as f32 - PLAYER_SIZE.y,
        );
        let player = Entity::new(player_pos, PLAYER_SIZE, SpriteKey::Paddle);
        let ball = default_ball(&player);

        Ok(Self {
            seed,
            phase: GamePhase::Active,
            width,
            height,
            levels,
            current_level: 0,
            player,
            ball,
            powerups: Vec::new(),
            effects: Effects::default(),
            keys: empty_keys(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        })
    }

    pub fn level(&self) -> &Level {
        &self.levels[self.current_level]
    }

    pub fn level_mut(&mut self) -> &mut Level {
        &mut self.levels[self.current_level]
    }

    /// Input-callback entry: record a key press or release
    pub fn set_key(&mut self, code: usize, pressed: bool) {
        if code < NUM_KEYS {
            self.keys[code] = pressed;
        }
    }

    /// Reload the current level's bricks from its embedded source
    pub fn reset_level(&mut self) {
        if let Some(text) = BUILTIN_LEVELS.get(self.current_level) {
            // Built-ins are known-good; a parse failure here cannot happen
            // outside of a broken build, so keep the old bricks if it does.
            match Level::parse(text, self.width, self.height / 2) {
                Ok(level) => self.levels[self.current_level] = level,
                Err(err) => log::error!("reset of level {} failed: {err}", self.current_level),
            }
        }
    }

    /// Restore paddle and ball to their starting state and clear every
    /// powerup effect, timed or permanent.
    pub fn reset_player(&mut self) {
        self.player.size = PLAYER_SIZE;
        self.player.position = Vec2::new(
            self.width as f32 / 2.0 - PLAYER_SIZE.x / 2.0,
            self.height as f32 - PLAYER_SIZE.y,
        );
        self.player.color = Vec3::ONE;

        let ball_pos = self.player.position
            + Vec2::new(PLAYER_SIZE.x / 2.0 - BALL_RADIUS, -BALL_RADIUS * 2.0);
        self.ball.reset(ball_pos, INITIAL_BALL_VELOCITY);
        self.ball.sticky = false;
        self.ball.passthrough = false;
        self.ball.entity.color = Vec3::ONE;

        self.effects.screen = ScreenEffect::None;
        self.powerups.clear();
    }

    /// Advance to the next level, or enter the Win phase after the last one
    pub fn advance_level(&mut self) {
        if self.current_level + 1 < self.levels.len() {
            self.current_level += 1;
            self.reset_level();
            self.reset_player();
        } else {
            self.phase = GamePhase::Win;
        }
    }

    /// One Bernoulli trial with probability 1-in-`chance`
    pub fn roll_spawn(&mut self, chance: u32) -> bool {
        use rand::Rng;
        self.rng.random_range(0..chance) == 0
    }

    /// Hand this frame's events to the platform layer
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
