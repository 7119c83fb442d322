//! Demo settings with persistence
//!
//! Settings are saved to `~/.config/parkour/settings.toml`

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use parkour_core::TimeConfig;
use parkour_movement::{CameraConfig, TraversalConfig};
use parkour_physics::{CharacterControllerConfig, PhysicsConfig};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// All demo settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub time: TimeConfig,
    pub physics: PhysicsConfig,
    pub character: CharacterControllerConfig,
    pub camera: CameraConfig,
    pub traversal: TraversalConfig,
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("parkour"))
    }

    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from the user config directory, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };

        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("{:#}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Load and validate settings from a specific file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {:?}", path))?;
        let settings: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings {:?}", path))?;
        settings
            .traversal
            .validate()
            .with_context(|| format!("Invalid traversal tuning in {:?}", path))?;
        info!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let Some(dir) = Self::config_dir() else {
            anyhow::bail!("Could not determine config directory");
        };

        let path = dir.join("settings.toml");

        // Create config directory if it doesn't exist
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(path)
    }
}
