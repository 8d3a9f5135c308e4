//! Fire-and-forget audio requests
//!
//! The simulation never plays sound itself; it emits [`GameEvent`]s, and this
//! module turns them into play-once/play-looping requests keyed by file path.
//! Whatever backend consumes the queue owes us no acknowledgement.

use crate::sim::GameEvent;

/// Sound effect triggers the game fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Destructible brick destroyed
    BrickDestroyed,
    /// Solid brick hit (shake, no destruction)
    SolidHit,
    /// Powerup collected by the paddle
    PowerupCollected,
    /// Ball bounced off the paddle
    PaddleBounce,
    /// Background music, looped from game start
    BackgroundLoop,
}

impl SoundEffect {
    /// File-path key the playback collaborator understands
    pub fn path(&self) -> &'static str {
        match self {
            SoundEffect::BrickDestroyed => "sounds/bleep-block.qoa",
            SoundEffect::SolidHit => "sounds/solid.qoa",
            SoundEffect::PowerupCollected => "sounds/powerup.qoa",
            SoundEffect::PaddleBounce => "sounds/bleep-paddle.qoa",
            SoundEffect::BackgroundLoop => "sounds/breakout.qoa",
        }
    }

    /// Map a frame event to its sound, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::BrickDestroyed => Some(SoundEffect::BrickDestroyed),
            GameEvent::SolidBrickHit => Some(SoundEffect::SolidHit),
            GameEvent::PowerupCollected(_) => Some(SoundEffect::PowerupCollected),
            GameEvent::PaddleBounce => Some(SoundEffect::PaddleBounce),
            GameEvent::BallLost | GameEvent::LevelComplete => None,
        }
    }
}

/// A single playback request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioRequest {
    pub effect: SoundEffect,
    pub looping: bool,
}

/// Collects playback requests for the platform layer to flush each frame
#[derive(Debug, Default)]
pub struct AudioQueue {
    requests: Vec<AudioRequest>,
}

impl AudioQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the looping background track; called once at game start
    pub fn play_background(&mut self) {
        self.requests.push(AudioRequest {
            effect: SoundEffect::BackgroundLoop,
            looping: true,
        });
    }

    /// Queue the one-shot sounds for a frame's worth of events
    pub fn push_events(&mut self, events: &[GameEvent]) {
        for event in events {
            if let Some(effect) = SoundEffect::for_event(event) {
                self.requests.push(AudioRequest {
                    effect,
                    looping: false,
                });
            }
        }
    }

    /// Take everything queued since the last flush
    pub fn flush(&mut self) -> Vec<AudioRequest> {
        std::mem::take(&mut self.requests)
    }
}
