//! Breakout - the classic brick-breaking arcade game
//!
//! Core modules:
//! - `sim`: Deterministic gameplay simulation (collision, powerups, levels)
//! - `audio`: Fire-and-forget sound request mapping
//! - `settings`: Data-driven preferences
//!
//! Rendering, texture loading, and audio playback are external collaborators:
//! the simulation emits events and sprite/sound keys, nothing more.

pub mod audio;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Play-field dimensions (pixels)
    pub const FIELD_WIDTH: u32 = 800;
    pub const FIELD_HEIGHT: u32 = 600;

    /// Paddle defaults
    pub const PLAYER_SIZE: Vec2 = Vec2::new(100.0, 20.0);
    pub const PLAYER_VELOCITY: f32 = 500.0;
    /// Permanent width gain from a pad-size-increase powerup
    pub const PAD_SIZE_INCREASE: f32 = 50.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 12.5;
    pub const INITIAL_BALL_VELOCITY: Vec2 = Vec2::new(100.0, -350.0);
    /// Multiplier applied by the speed powerup (permanent)
    pub const BALL_SPEED_BOOST: f32 = 1.2;

    /// Paddle bounce tuning: horizontal deflection scale and the
    /// minimum upward speed after a bounce
    pub const BOUNCE_STRENGTH: f32 = 2.0;
    pub const BOUNCE_MIN_UP_SPEED: f32 = 250.0;

    /// Powerup icon defaults
    pub const POWERUP_SIZE: Vec2 = Vec2::new(60.0, 20.0);
    pub const POWERUP_VELOCITY: Vec2 = Vec2::new(0.0, 150.0);

    /// Screen shake duration after a solid-brick hit (seconds)
    pub const SHAKE_TIME: f32 = 0.05;

    /// Number of distinct key codes tracked by the input array
    pub const NUM_KEYS: usize = 1024;
}
