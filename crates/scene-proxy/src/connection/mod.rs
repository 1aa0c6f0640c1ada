//! Transports carrying scene commands to the server

mod memory;
mod websocket;

pub use memory::{MemoryConnection, MemoryScene, NodeState};
pub use websocket::WebSocketConnection;

use scene_core::{EncodeError, SceneCommand};

/// Transport errors, propagated unchanged to the caller
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("Failed to connect to scene server <{url}>: {source}")]
    Connect {
        url: String,
        #[source]
        source: Box<tungstenite::Error>,
    },

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] Box<tungstenite::Error>),

    #[error("Failed to encode command: {0}")]
    Encode(#[from] EncodeError),

    #[error("Connection closed")]
    Closed,
}

impl From<tungstenite::Error> for ConnectionError {
    fn from(err: tungstenite::Error) -> Self {
        ConnectionError::WebSocket(Box::new(err))
    }
}

/// One-way channel to a scene server
///
/// Sends are fire-and-forget: nothing is read back from the server.
pub trait SceneConnection {
    /// Address of the server this connection talks to
    fn url(&self) -> &str;

    /// Deliver a single command
    fn send(&mut self, command: &SceneCommand) -> Result<(), ConnectionError>;
}
