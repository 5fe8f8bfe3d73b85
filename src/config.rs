/// Configuration system: TOML-based with sensible defaults.
/// Config file: `~/.config/wide/config.toml`

use serde::Deserialize;
use std::path::PathBuf;

use crate::core::{ByteOrder, ErrorPolicy, Kind};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub convert: ConvertConfig,
    pub width: WidthConfig,
    pub io: IoConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    pub from: Kind,
    pub to: Kind,
    pub policy: ErrorPolicy,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WidthConfig {
    pub from: Kind,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IoConfig {
    pub byte_order: ByteOrder,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            from: Kind::Utf8,
            to: Kind::Utf16,
            policy: ErrorPolicy::UseReplacementCharacter,
        }
    }
}

impl Default for WidthConfig {
    fn default() -> Self {
        Self { from: Kind::Utf8 }
    }
}

impl Config {
    /// Config file path: `~/.config/wide/config.toml`
    pub fn path() -> PathBuf {
        dirs_path().join("config.toml")
    }

    /// Load config from file, falling back to defaults.
    pub fn load() -> Self {
        let path = Self::path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                log::debug!("loading config from {}", path.display());
                Self::from_str(&contents)
            }
            Err(_) => Self::default(),
        }
    }

    /// Parse config from TOML string.
    pub fn from_str(s: &str) -> Self {
        toml::from_str(s).unwrap_or_else(|e| {
            log::warn!("invalid config, using defaults: {}", e);
            Self::default()
        })
    }
}

fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
    PathBuf::from(home).join(".config").join("wide")
}
