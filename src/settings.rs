//! Startup configuration
//!
//! Read once from a JSON file; missing fields take defaults and a broken file
//! falls back to defaults entirely.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable naming the settings file
pub const CONFIG_ENV: &str = "TILT_COINS_CONFIG";
/// Settings file picked up from the working directory when nothing else is given
pub const DEFAULT_CONFIG_FILE: &str = "tilt-coins.json";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("couldn't read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Motion sensor link parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialSettings {
    /// Set false to play with the keyboard only
    pub enabled: bool,
    pub port: String,
    pub baud_rate: u32,
    /// Per-read timeout
    pub timeout_ms: u64,
    /// Delay after opening while the board resets
    pub settle_ms: u64,
}

impl Default for SerialSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            port: "/dev/ttyACM0".into(),
            baud_rate: 9600,
            timeout_ms: 100,
            settle_ms: 1500,
        }
    }
}

/// Volumes and sound asset locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
    pub coin: PathBuf,
    pub power: PathBuf,
    pub hit: PathBuf,
    pub music: PathBuf,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.5,
            muted: false,
            coin: "coin.wav".into(),
            power: "power.wav".into(),
            hit: "hit.wav".into(),
            music: "background.mp3".into(),
        }
    }
}

/// Game settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub serial: SerialSettings,
    pub audio: AudioSettings,
    /// Fixed RNG seed for reproducible rounds (random when absent)
    pub seed: Option<u64>,
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Pick the settings file: explicit argument, then `TILT_COINS_CONFIG`, then
    /// `tilt-coins.json` if present.
    pub fn locate(arg: Option<String>) -> Option<PathBuf> {
        arg.map(PathBuf::from)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
            .or_else(|| {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                default.exists().then_some(default)
            })
    }

    /// Load settings, falling back to defaults on any error
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::from_path(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }
}
