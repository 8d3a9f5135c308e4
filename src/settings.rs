//! Game settings and preferences
//!
//! Persisted as JSON next to the executable; missing or corrupt files fall
//! back to defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// User-tunable preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // === Visual Effects ===
    /// Screen shake on solid-brick hits
    pub screen_shake: bool,
    /// Confuse/chaos post-processing effects
    pub screen_effects: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,

    // === Accessibility ===
    /// Reduced motion (suppress shake and screen effects)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_shake: true,
            screen_effects: true,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective screen effects (respects reduced_motion)
    pub fn effective_screen_effects(&self) -> bool {
        self.screen_effects && !self.reduced_motion
    }

    /// Load settings from a JSON file, defaulting on any failure
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("ignoring corrupt settings file: {err}");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("using default settings");
                Self::default()
            }
        }
    }

    /// Save settings as JSON
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, json)
    }
}
