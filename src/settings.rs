//! Player settings and preferences
//!
//! Persisted separately from the high score. LocalStorage on the web, a
//! JSON file on native builds.

use serde::{Deserialize, Serialize};

use crate::error::PersistError;
use crate::sim::GameEvent;
use crate::sim::snapshot::DebugOverlay;

/// Player preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Sound effects (fire, hits, explosions, thrust)
    pub sound_on: bool,
    /// Background beat
    pub music_on: bool,

    // === Debug ===
    /// Draw collision circles
    pub show_bounding: bool,
    /// Draw a dot at the ship's centre
    pub show_center_dot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_on: true,
            music_on: true,
            show_bounding: false,
            show_center_dot: false,
        }
    }
}

impl Settings {
    /// Everything silent, debug drawing off
    pub fn muted() -> Self {
        Self {
            sound_on: false,
            music_on: false,
            ..Self::default()
        }
    }

    /// Events the audio collaborator should actually play
    pub fn audible(&self, events: &[GameEvent]) -> Vec<GameEvent> {
        events
            .iter()
            .filter(|e| (e.is_sound() && self.sound_on) || (e.is_music() && self.music_on))
            .copied()
            .collect()
    }

    /// Debug drawing flags for the renderer
    pub fn overlay(&self) -> DebugOverlay {
        DebugOverlay {
            bounding: self.show_bounding,
            center_dot: self.show_center_dot,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, PersistError> {
        serde_json::from_str(json).map_err(|e| PersistError::Parse {
            what: "settings",
            detail: e.to_string(),
        })
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "rock_belt_settings";

    /// Load settings from LocalStorage, defaults if missing or unreadable
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {e}"),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) -> Result<(), PersistError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(PersistError::Unavailable)?;
        let json = serde_json::to_string(self).map_err(|e| PersistError::Parse {
            what: "settings",
            detail: e.to_string(),
        })?;
        storage
            .set_item(Self::STORAGE_KEY, &json)
            .map_err(|e| PersistError::Rejected(format!("{e:?}")))?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Load settings from a JSON file. A missing file gives the defaults.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Result<Self, PersistError> {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                let settings = Self::from_json(&json)?;
                log::info!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), PersistError> {
        let json = serde_json::to_string_pretty(self).map_err(|e| PersistError::Parse {
            what: "settings",
            detail: e.to_string(),
        })?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::AsteroidTier;

    fn mixed_events() -> Vec<GameEvent> {
        vec![
            GameEvent::LaserFired,
            GameEvent::MusicBeat { high: true },
            GameEvent::AsteroidHit {
                tier: AsteroidTier::Small,
            },
            GameEvent::LevelStarted { level: 2 },
        ]
    }

    #[test]
    fn test_default_plays_everything_audible() {
        let audible = Settings::default().audible(&mixed_events());
        assert_eq!(audible.len(), 3);
        assert!(!audible.contains(&GameEvent::LevelStarted { level: 2 }));
    }

    #[test]
    fn test_music_off_keeps_sounds() {
        let settings = Settings {
            music_on: false,
            ..Settings::default()
        };
        let audible = settings.audible(&mixed_events());
        assert!(audible.iter().all(|e| e.is_sound()));
        assert_eq!(audible.len(), 2);
    }

    #[test]
    fn test_muted_is_silent() {
        assert!(Settings::muted().audible(&mixed_events()).is_empty());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{"show_bounding": true}"#).unwrap();
        assert!(settings.show_bounding);
        assert!(settings.sound_on);
        assert!(settings.overlay().bounding);
        assert!(!settings.overlay().center_dot);
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let err = Settings::from_json("[1, 2").unwrap_err();
        assert!(matches!(err, PersistError::Parse { what: "settings", .. }));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join(format!("rock-belt-settings-{}.json", std::process::id()));
        let settings = Settings {
            music_on: false,
            show_center_dot: true,
            ..Settings::default()
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap(), settings);
        let _ = std::fs::remove_file(&path);
    }
}
