//! Daemon configuration.
//!
//! Stored as JSON:
//! - Linux: `~/.config/kopro/pushd.json`
//! - Windows: `%APPDATA%/kopro/pushd.json`
//! - macOS: `~/Library/Application Support/kopro/pushd.json`
//!
//! `KOPRO_PUSHD_CONFIG` overrides the path.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Push daemon configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushdConfig {
    /// Intake port on loopback (0 = OS-assigned).
    #[serde(default = "default_port")]
    pub port: u16,

    /// Application origin windows are matched against.
    #[serde(default = "default_origin")]
    pub origin: String,

    /// Command used to open a URL when no window is available.
    #[serde(default = "default_opener")]
    pub opener: String,
}

fn default_port() -> u16 {
    17872
}

fn default_origin() -> String {
    "https://app.kopro.fr".into()
}

fn default_opener() -> String {
    #[cfg(target_os = "macos")]
    {
        "open".into()
    }
    #[cfg(target_os = "windows")]
    {
        "explorer".into()
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        "xdg-open".into()
    }
}

impl Default for PushdConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            origin: default_origin(),
            opener: default_opener(),
        }
    }
}

impl PushdConfig {
    /// Loads configuration from disk, or creates a default if not found.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: PushdConfig = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            let config = PushdConfig::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Saves the current configuration to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_path();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        tracing::debug!(path = %path.display(), "configuration saved");
        Ok(())
    }
}

/// Returns the configuration file path.
fn config_path() -> PathBuf {
    if let Ok(custom) = std::env::var("KOPRO_PUSHD_CONFIG") {
        return PathBuf::from(custom);
    }

    #[cfg(target_os = "windows")]
    {
        let base = std::env::var("APPDATA").unwrap_or_else(|_| ".".into());
        PathBuf::from(base).join("kopro").join("pushd.json")
    }
    #[cfg(target_os = "macos")]
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        PathBuf::from(home)
            .join("Library/Application Support/kopro")
            .join("pushd.json")
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        PathBuf::from(home).join(".config/kopro").join("pushd.json")
    }
}
