//! Proxy error type

use crate::config::ConfigError;
use crate::connection::ConnectionError;
use crate::robot::RobotLoadError;

/// Errors surfaced by [`crate::SceneProxy`]
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error("Failed to load robot: {0}")]
    Robot(#[from] RobotLoadError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
