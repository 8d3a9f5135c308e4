//! Powerup kinds, falling icons, and the screen-effect slot
//!
//! A powerup is spawned when a destructible brick dies and a per-kind
//! Bernoulli trial succeeds. Its icon falls as a plain [`Entity`]; collecting
//! it with the paddle activates the kind-specific effect. Timed kinds count
//! their duration down and lapse only once no other powerup of the same kind
//! is still active.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::entity::{Entity, SpriteKey};
use crate::consts::*;

/// The closed set of powerup kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupKind {
    /// Permanent 1.2x ball speed multiplier
    Speed,
    /// Ball re-sticks to the paddle on contact
    Sticky,
    /// Ball destroys non-solid bricks without deflecting
    PassThrough,
    /// Permanent paddle widening
    PadSizeIncrease,
    /// Confuse screen effect (mutually exclusive with chaos)
    Confuse,
    /// Chaos screen effect (mutually exclusive with confuse)
    Chaos,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 6] = [
        PowerupKind::Speed,
        PowerupKind::Sticky,
        PowerupKind::PassThrough,
        PowerupKind::PadSizeIncrease,
        PowerupKind::Confuse,
        PowerupKind::Chaos,
    ];

    /// Effect duration in seconds; 0 for instantaneous/permanent kinds
    pub fn duration(&self) -> f32 {
        match self {
            PowerupKind::Speed => 0.0,
            PowerupKind::Sticky => 20.0,
            PowerupKind::PassThrough => 10.0,
            PowerupKind::PadSizeIncrease => 0.0,
            PowerupKind::Confuse => 15.0,
            PowerupKind::Chaos => 15.0,
        }
    }

    /// Spawn probability is one in this many trials per destroyed brick
    pub fn spawn_one_in(&self) -> u32 {
        match self {
            PowerupKind::Confuse | PowerupKind::Chaos => 15,
            _ => 75,
        }
    }

    /// Icon tint
    pub fn color(&self) -> Vec3 {
        match self {
            PowerupKind::Speed => Vec3::new(0.5, 0.5, 1.0),
            PowerupKind::Sticky => Vec3::new(1.0, 0.5, 1.0),
            PowerupKind::PassThrough => Vec3::new(0.5, 1.0, 0.5),
            PowerupKind::PadSizeIncrease => Vec3::new(1.0, 0.6, 0.4),
            PowerupKind::Confuse => Vec3::new(1.0, 0.3, 0.3),
            PowerupKind::Chaos => Vec3::new(0.9, 0.25, 0.25),
        }
    }

    pub fn sprite(&self) -> SpriteKey {
        match self {
            PowerupKind::Speed => SpriteKey::PowerupSpeed,
            PowerupKind::Sticky => SpriteKey::PowerupSticky,
            PowerupKind::PassThrough => SpriteKey::PowerupPassthrough,
            PowerupKind::PadSizeIncrease => SpriteKey::PowerupIncrease,
            PowerupKind::Confuse => SpriteKey::PowerupConfuse,
            PowerupKind::Chaos => SpriteKey::PowerupChaos,
        }
    }
}

/// A spawned powerup: its kind, remaining effect time, and falling icon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Powerup {
    pub kind: PowerupKind,
    /// Seconds of effect remaining once activated
    pub duration: f32,
    /// Effect currently in force
    pub activated: bool,
    /// The falling icon; `destroyed` means no longer visible
    pub entity: Entity,
}

impl Powerup {
    /// Spawn at a destroyed brick's position, falling at the fixed rate
    pub fn new(kind: PowerupKind, position: Vec2) -> Self {
        Self {
            kind,
            duration: kind.duration(),
            activated: false,
            entity: Entity::new(position, POWERUP_SIZE, kind.sprite())
                .with_color(kind.color())
                .with_velocity(POWERUP_VELOCITY),
        }
    }

    /// Eligible for removal: fell off-screen uncollected, or collected and
    /// its timed effect has fully expired
    pub fn reapable(&self) -> bool {
        self.entity.destroyed && !self.activated
    }
}

/// The single screen-effect slot.
///
/// Confuse and chaos are mutually exclusive by construction: the slot can
/// hold at most one of them, so the exclusion needs no boolean bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScreenEffect {
    #[default]
    None,
    Confuse,
    Chaos,
}

impl ScreenEffect {
    /// Try to occupy the slot with the effect a powerup kind carries.
    /// Non-screen kinds and an already-occupied slot leave it unchanged.
    pub fn activate(&mut self, kind: PowerupKind) {
        match (kind, *self) {
            (PowerupKind::Confuse, ScreenEffect::None) => *self = ScreenEffect::Confuse,
            (PowerupKind::Chaos, ScreenEffect::None) => *self = ScreenEffect::Chaos,
            _ => {}
        }
    }

    /// Release the slot if it holds the effect for this kind
    pub fn deactivate(&mut self, kind: PowerupKind) {
        match (kind, *self) {
            (PowerupKind::Confuse, ScreenEffect::Confuse)
            | (PowerupKind::Chaos, ScreenEffect::Chaos) => *self = ScreenEffect::None,
            _ => {}
        }
    }
}
