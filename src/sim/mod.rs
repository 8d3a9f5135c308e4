//! Deterministic gameplay simulation
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Fixed per-frame update, driven by a caller-supplied delta time
//! - Seeded RNG only
//! - No rendering, audio, or platform dependencies; side effects surface
//!   as [`GameEvent`] values the platform layer drains each frame

pub mod collision;
pub mod entity;
pub mod level;
pub mod powerup;
pub mod state;
pub mod tick;

pub use collision::{Collision, Direction, check_ball_collision, check_collision, vector_direction};
pub use entity::{Ball, Entity, SpriteKey};
pub use level::{Level, LevelError};
pub use powerup::{Powerup, PowerupKind, ScreenEffect};
pub use state::{Effects, GameEvent, GamePhase, GameState, keys};
pub use tick::{do_collisions, process_input, update};
