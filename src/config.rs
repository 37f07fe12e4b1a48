// src/config.rs
//! Client configuration with file-based storage

use crate::error::{Result, HexError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Largest grid radius for which hex ids stay within A..Z columns.
pub const MAX_ID_RADIUS: i32 = 12;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    pub server_url: String,
    pub campaign: String,
    pub grid_radius: i32,
    pub hex_size: f64,
    pub cache_dir: Option<PathBuf>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8000".to_string(),
            campaign: "default".to_string(),
            grid_radius: 5,
            hex_size: 28.0,
            cache_dir: None,
        }
    }
}

impl MapConfig {
    /// Load configuration from the config file, falling back to defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)
            .map_err(|e| HexError::Other(format!("Failed to read config file: {}", e)))?;

        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| HexError::Other(format!("Failed to parse config file: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to the config file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| HexError::Other(format!("Failed to create config directory: {}", e)))?;
        }

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| HexError::Other(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&config_path, contents)
            .map_err(|e| HexError::Other(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Get config file path
    fn get_config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .map_err(|_| HexError::Other("HOME environment variable not set".to_string()))?;

        Ok(PathBuf::from(home).join(".config").join("hexmap").join("config.json"))
    }

    /// Cache directory, defaulting to `$HOME/.cache/hexmap`
    pub fn cache_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.cache_dir {
            return Ok(dir.clone());
        }

        let home = std::env::var("HOME")
            .map_err(|_| HexError::Other("HOME environment variable not set".to_string()))?;

        Ok(PathBuf::from(home).join(".cache").join("hexmap"))
    }

    /// Grid radius clamped to the range where hex ids stay bijective
    pub fn effective_radius(&self) -> i32 {
        self.grid_radius.clamp(0, MAX_ID_RADIUS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MapConfig::default();
        assert_eq!(config.server_url, "http://localhost:8000");
        assert_eq!(config.campaign, "default");
        assert_eq!(config.grid_radius, 5);
        assert_eq!(config.hex_size, 28.0);
    }

    #[test]
    fn test_effective_radius_clamps() {
        let mut config = MapConfig::default();
        config.grid_radius = 40;
        assert_eq!(config.effective_radius(), MAX_ID_RADIUS);

        config.grid_radius = -3;
        assert_eq!(config.effective_radius(), 0);
    }

    #[test]
    fn test_config_roundtrip_json() {
        let config = MapConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: MapConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.campaign, config.campaign);
        assert_eq!(back.grid_radius, config.grid_radius);
    }
}
