/// Host configuration, read from an optional TOML file.
///
/// Only host-side knobs live here; grid steps, lane positions and enemy
/// speeds are fixed game rules in `compute`.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "BUG_CROSSING_CONFIG";

const HOME_CONFIG_NAME: &str = ".bug_crossing.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Target frame time in milliseconds.
    pub frame_millis: u64,
    /// Where log output goes while the terminal is in raw mode.
    pub log_file: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            frame_millis: 33, // ≈30 FPS
            log_file: std::env::temp_dir().join("bug_crossing.log"),
        }
    }
}

impl GameConfig {
    pub fn from_toml(path: &Path, text: &str) -> Result<GameConfig, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load_from_file(path: &Path) -> Result<GameConfig, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        GameConfig::from_toml(path, &text)
    }

    /// Resolve the config the host should run with, and where it came from.
    ///
    /// An explicit `BUG_CROSSING_CONFIG` file must load.  The per-user file
    /// in `$HOME` is optional: if it is missing, defaults are used.
    pub fn discover() -> Result<(GameConfig, Option<PathBuf>), ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            let path = PathBuf::from(path);
            return GameConfig::load_from_file(&path).map(|c| (c, Some(path)));
        }

        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        let path = PathBuf::from(home).join(HOME_CONFIG_NAME);
        if path.is_file() {
            return GameConfig::load_from_file(&path).map(|c| (c, Some(path)));
        }
        Ok((GameConfig::default(), None))
    }
}
