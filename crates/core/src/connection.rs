// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! WebSocket connection types.
use anyhow::{Result, anyhow};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::{
    self as websocket, MaybeTlsStream, WebSocketStream,
    tungstenite::{Message as WsMessage, protocol::WebSocketConfig},
};

use crate::message::Message;

/// Maximum message length.
const MAX_MSG_LEN: usize = 1 << 20;

/// A WebSocket connection that sends and receives [Message]s as binary frames.
pub struct Connection {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl Connection {
    /// Sends a [Message].
    pub async fn send(&mut self, msg: &Message) -> Result<()> {
        self.stream.send(WsMessage::binary(msg.serialize())).await?;
        Ok(())
    }

    /// Waits for a [Message], returns `None` when the peer closed the stream.
    pub async fn recv(&mut self) -> Option<Result<Message>> {
        loop {
            match self.stream.next().await {
                Some(Ok(WsMessage::Binary(payload))) => break Some(Message::deserialize(&payload)),
                Some(Ok(WsMessage::Close(_))) => break None,
                Some(Ok(_)) => continue,
                Some(Err(e)) => break Some(Err(anyhow!("Connection error: {e}"))),
                None => break None,
            }
        }
    }

    /// Closes this connection.
    pub async fn close(&mut self) {
        let _ = self.stream.close(None).await;
    }
}

/// Creates a [Connection] from a server stream.
pub async fn accept_async(stream: TcpStream) -> Result<Connection> {
    let config = WebSocketConfig::default().max_message_size(Some(MAX_MSG_LEN));
    let stream =
        websocket::accept_async_with_config(MaybeTlsStream::Plain(stream), Some(config)).await?;
    Ok(Connection { stream })
}

/// Connects to a server at `addr` (host:port) and returns a [Connection].
pub async fn connect_async(addr: &str) -> Result<Connection> {
    let config = WebSocketConfig::default().max_message_size(Some(MAX_MSG_LEN));
    let url = format!("ws://{}", addr);
    let (stream, _) = websocket::connect_async_with_config(&url, Some(config), false).await?;
    Ok(Connection { stream })
}
