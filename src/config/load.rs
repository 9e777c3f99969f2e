use std::{env, path::PathBuf};

use super::schema::{DEFAULT_SOUND_FILE, Settings};

/// Configuration loading helpers.
///
/// `Settings::load` reads an optional config file, lets environment variables
/// (prefix `QUITTR__`) override it and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("QUITTR")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.meditation.duration_secs == 0 {
            return Err("meditation.duration_secs must be >= 1".to_string());
        }
        if self.meditation.tick_ms == 0 {
            return Err("meditation.tick_ms must be >= 1".to_string());
        }
        if !(0.0..=1.0).contains(&self.meditation.volume) {
            return Err("meditation.volume must be between 0.0 and 1.0".to_string());
        }
        if self.ui.card_width < 16 {
            return Err("ui.card_width must be >= 16".to_string());
        }
        Ok(())
    }

    /// Directory for persisted trackers (and, by default, the sound and log).
    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .data_dir
            .clone()
            .or_else(default_data_dir)
            .unwrap_or_else(|| PathBuf::from(".quittr"))
    }

    /// Sound file looped during meditation.
    pub fn sound_path(&self) -> PathBuf {
        self.meditation
            .sound_path
            .clone()
            .unwrap_or_else(|| self.data_dir().join(DEFAULT_SOUND_FILE))
    }

    /// Destination of the log file.
    pub fn log_file(&self) -> PathBuf {
        self.logging
            .file
            .clone()
            .unwrap_or_else(|| self.data_dir().join("quittr.log"))
    }
}

/// Resolve the config path from `QUITTR_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("QUITTR_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/quittr/config.toml`
/// or `~/.config/quittr/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config").map(|d| d.join("quittr").join("config.toml"))
}

/// Compute the default data directory `$XDG_DATA_HOME/quittr` or
/// `~/.local/share/quittr`.
pub fn default_data_dir() -> Option<PathBuf> {
    xdg_dir("XDG_DATA_HOME", ".local/share").map(|d| d.join("quittr"))
}

fn xdg_dir(var: &str, home_fallback: &str) -> Option<PathBuf> {
    if let Some(xdg) = env::var_os(var).filter(|v| !v.is_empty()) {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(home_fallback))
    }
}
