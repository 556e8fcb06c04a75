//! Game settings and preferences
//!
//! Persisted as JSON under the platform config directory. Loading and
//! saving never fail the game: a missing or malformed file means defaults.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute all audio
    pub muted: bool,

    // === HUD ===
    /// Show the frame counter in the HUD
    pub show_frames: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            show_frames: false,
        }
    }
}

impl Settings {
    /// Effective per-sink volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Settings file under the platform config dir, if one exists
    fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("paper-glider").join("settings.json"))
    }

    /// Load settings, falling back to defaults on any problem
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            log::warn!("no config directory; using default settings");
            return Self::default();
        };
        match fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("malformed settings file ({err}); using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("no settings file; using defaults");
                Self::default()
            }
        }
    }

    /// Save settings; failures are logged and otherwise ignored
    pub fn save(&self) {
        let Some(path) = Self::path() else { return };
        if let Some(parent) = path.parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                log::warn!("could not create config dir: {err}");
                return;
            }
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(err) = fs::write(&path, json) {
                    log::warn!("could not write settings: {err}");
                } else {
                    log::info!("settings saved");
                }
            }
            Err(err) => log::warn!("could not serialize settings: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_volume_in_range() {
        let s = Settings::default();
        assert!((0.0..=1.0).contains(&s.effective_volume()));
    }

    #[test]
    fn test_muted_is_silent() {
        let mut s = Settings::default();
        s.muted = true;
        assert_eq!(s.effective_volume(), 0.0);
    }

    #[test]
    fn test_settings_round_trip() {
        let mut s = Settings::default();
        s.master_volume = 0.5;
        s.show_frames = true;
        let json = serde_json::to_string(&s).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.master_volume, 0.5);
        assert!(back.show_frames);
    }
}
