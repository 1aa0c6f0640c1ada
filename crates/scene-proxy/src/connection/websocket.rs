//! Blocking WebSocket transport

use std::net::TcpStream;

use scene_core::SceneCommand;
use tungstenite::stream::MaybeTlsStream;
use tungstenite::{Message, WebSocket};

use super::{ConnectionError, SceneConnection};

/// Scene server connection over a WebSocket, one binary frame per command
pub struct WebSocketConnection {
    url: String,
    socket: Option<WebSocket<MaybeTlsStream<TcpStream>>>,
}

impl WebSocketConnection {
    /// Connect immediately; no retry
    pub fn connect(url: &str) -> Result<Self, ConnectionError> {
        tracing::info!("Connecting to scene server <{}>", url);

        let (socket, response) =
            tungstenite::connect(url).map_err(|e| ConnectionError::Connect {
                url: url.to_string(),
                source: Box::new(e),
            })?;

        tracing::debug!("Scene server handshake: HTTP {}", response.status());

        Ok(Self {
            url: url.to_string(),
            socket: Some(socket),
        })
    }

    /// Close the socket; later sends fail with [`ConnectionError::Closed`]
    pub fn close(&mut self) {
        if let Some(mut socket) = self.socket.take() {
            if let Err(e) = socket.close(None) {
                tracing::debug!("Error closing scene server socket: {}", e);
            }
            if let Err(e) = socket.flush() {
                tracing::debug!("Error flushing scene server socket: {}", e);
            }
            tracing::info!("Disconnected from scene server <{}>", self.url);
        }
    }

    pub fn is_open(&self) -> bool {
        self.socket.is_some()
    }
}

impl SceneConnection for WebSocketConnection {
    fn url(&self) -> &str {
        &self.url
    }

    fn send(&mut self, command: &SceneCommand) -> Result<(), ConnectionError> {
        let socket = self.socket.as_mut().ok_or(ConnectionError::Closed)?;
        let payload = command.encode()?;

        tracing::debug!(
            "Sending {} to {} ({} bytes)",
            command.type_name(),
            command.path(),
            payload.len()
        );

        socket.send(Message::Binary(payload))?;
        Ok(())
    }
}

impl Drop for WebSocketConnection {
    fn drop(&mut self) {
        self.close();
    }
}
