//! Proxy configuration
//!
//! Stored as RON. Every section falls back to its defaults when missing.

use std::path::Path;

use scene_core::{AxisStyle, FrameStyle};
use serde::{Deserialize, Serialize};

use crate::endpoint::CLASSICAL_URL;

/// Configuration error types
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("Deserialization error: {0}")]
    Deserialize(String),
}

/// Scene proxy configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProxyConfig {
    /// Configuration format version
    pub version: u32,
    /// Scene server used when no url is given
    pub url: String,
    /// Namespace robot geometry is loaded under
    pub robot_namespace: String,
    /// Show collision geometry after loading a robot
    pub show_collisions: bool,
    /// Frame triad defaults
    pub frame: FrameStyle,
    /// Axis line defaults
    pub axis: AxisStyle,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            url: CLASSICAL_URL.to_string(),
            robot_namespace: "pinocchio".to_string(),
            show_collisions: false,
            frame: FrameStyle::default(),
            axis: AxisStyle::default(),
        }
    }
}

impl ProxyConfig {
    /// Current configuration version
    pub const CURRENT_VERSION: u32 = 1;

    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from RON text
    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        ron::from_str(content).map_err(|e| ConfigError::Deserialize(e.to_string()))
    }

    /// Load configuration from a RON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        let config = Self::from_ron_str(&content)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Load configuration, using defaults if the file is missing or invalid
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            tracing::info!("No usable config at {:?} ({}), using defaults", path, e);
            Self::default()
        })
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Save configuration to a RON file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Io(e.to_string()))?;
        }

        let content = self.to_ron_string()?;
        std::fs::write(path, content).map_err(|e| ConfigError::Io(e.to_string()))?;

        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
