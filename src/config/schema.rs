use std::path::PathBuf;

use serde::Deserialize;

/// File name of the bundled ambience looked up in the data directory when no
/// `meditation.sound_path` is configured.
pub const DEFAULT_SOUND_FILE: &str = "calm-waves-soft-rain-ambient-sound.mp3";

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/quittr/config.toml` or `~/.config/quittr/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `QUITTR__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub meditation: MeditationSettings,
    pub audio: AudioSettings,
    pub storage: StorageSettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MeditationSettings {
    /// Length of a meditation session in seconds.
    pub duration_secs: u32,
    /// Playback volume of the ambience, `0.0..=1.0`.
    pub volume: f32,
    /// Sound looped during a session. Defaults to
    /// `<data_dir>/calm-waves-soft-rain-ambient-sound.mp3`.
    pub sound_path: Option<PathBuf>,
    /// Countdown tick interval in milliseconds.
    pub tick_ms: u64,
}

impl Default for MeditationSettings {
    fn default() -> Self {
        Self {
            duration_secs: 5 * 60,
            volume: 0.4,
            sound_path: None,
            tick_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Fade-out when a session ends (milliseconds). 0 stops immediately.
    pub fade_out_ms: u64,
    /// Fade-out when quitting (milliseconds). 0 stops immediately.
    pub quit_fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            fade_out_ms: 600,
            quit_fade_out_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding persisted state. Defaults to
    /// `$XDG_DATA_HOME/quittr` or `~/.local/share/quittr`.
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Width of one tracker card in columns.
    pub card_width: u16,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: "What are you trying to quit or track?".to_string(),
            card_width: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log file. Defaults to `<data_dir>/quittr.log`.
    pub file: Option<PathBuf>,
    /// Filter directive used when `RUST_LOG` is not set.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file: None,
            level: "info".to_string(),
        }
    }
}
