//! WebSocket transport for live sessions.
//!
//! Each browser connection gets its own [`Session`]. Events are read from the
//! socket one at a time, dispatched, and answered with patches before the
//! next event is read.
//!
//! ```ignore
//! use axum::{Router, routing::get};
//! use axum_live::ws::{WebSocketUpgrade, run_session};
//!
//! async fn live(ws: WebSocketUpgrade) -> axum::response::Response {
//!     ws.on_upgrade(|socket| run_session(socket, MyRoot::default()))
//! }
//!
//! let app = Router::new().route("/live", get(live));
//! ```

pub use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};

use axum::extract::ws::Message as WsMessage;
use futures_util::{SinkExt, Stream, StreamExt};
use serde::{Serialize, de::DeserializeOwned};
use std::pin::Pin;
use std::task::{Context, Poll};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::component::Component;
use crate::protocol::{ClientEvent, ServerMessage};
use crate::session::Session;

/// Failures reading from or writing to a [`JsonWebSocket`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SocketError {
    #[error("websocket closed")]
    Closed,

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("websocket error: {0}")]
    Transport(String),
}

/// A JSON-based WebSocket stream for sending typed messages.
///
/// Wraps an axum WebSocket; a background task owns the socket and moves
/// serialized messages through channels.
pub struct JsonWebSocket<T, R> {
    rx: ReceiverStream<Result<R, SocketError>>,
    tx: mpsc::Sender<T>,
}

impl<T, R> JsonWebSocket<T, R>
where
    T: Serialize + Send + 'static,
    R: DeserializeOwned + Send + 'static,
{
    /// Create a new JSON WebSocket from an axum WebSocket.
    pub fn new(socket: WebSocket) -> Self {
        let (mut ws_tx, mut ws_rx) = socket.split();
        let (incoming_tx, incoming_rx) = mpsc::channel::<Result<R, SocketError>>(256);
        let (outgoing_tx, mut outgoing_rx) = mpsc::channel::<T>(256);

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    outgoing = outgoing_rx.recv() => {
                        let Some(msg) = outgoing else { break };
                        match serde_json::to_string(&msg) {
                            Ok(json) => {
                                if ws_tx.send(WsMessage::Text(json.into())).await.is_err() {
                                    break;
                                }
                            }
                            Err(e) => {
                                let _ = incoming_tx
                                    .send(Err(SocketError::Serialization(e.to_string())))
                                    .await;
                            }
                        }
                    }
                    incoming = ws_rx.next() => {
                        let parsed = match incoming {
                            Some(Ok(WsMessage::Text(text))) => serde_json::from_str::<R>(&text),
                            Some(Ok(WsMessage::Binary(bytes))) => serde_json::from_slice::<R>(&bytes),
                            Some(Ok(WsMessage::Ping(bytes))) => {
                                if ws_tx.send(WsMessage::Pong(bytes)).await.is_err() {
                                    break;
                                }
                                continue;
                            }
                            Some(Ok(WsMessage::Pong(_))) => continue,
                            Some(Ok(WsMessage::Close(_))) | None => break,
                            Some(Err(e)) => {
                                let _ = incoming_tx.send(Err(SocketError::Transport(e.to_string()))).await;
                                break;
                            }
                        };
                        let item = parsed.map_err(|e| SocketError::Parse(e.to_string()));
                        if incoming_tx.send(item).await.is_err() {
                            break;
                        }
                    }
                }
            }

            let _ = ws_tx.send(WsMessage::Close(None)).await;
        });

        Self {
            rx: ReceiverStream::new(incoming_rx),
            tx: outgoing_tx,
        }
    }

    /// Queue a message for the client, waiting for room in the queue.
    pub async fn send(&self, msg: T) -> Result<(), SocketError> {
        self.tx.send(msg).await.map_err(|_| SocketError::Closed)
    }
}

impl<T, R> Stream for JsonWebSocket<T, R> {
    type Item = Result<R, SocketError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.rx).poll_next(cx)
    }
}

/// Drive one session until the client disconnects.
pub async fn run_session<C: Component>(socket: WebSocket, root: C) {
    let mut socket = JsonWebSocket::<ServerMessage, ClientEvent>::new(socket);
    let mut session = Session::new(root);

    tracing::info!("live session started");
    let render = ServerMessage::Render {
        version: session.version(),
        html: session.html(),
    };
    if socket.send(render).await.is_err() {
        return;
    }

    while let Some(incoming) = socket.next().await {
        let event = match incoming {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!("dropping client message: {e}");
                continue;
            }
        };

        tracing::debug!(path = ?event.path, kind = ?event.kind, "dispatching event");
        match session.dispatch(&event) {
            Ok(patches) if patches.is_empty() => {}
            Ok(patches) => {
                let version = session.version();
                if socket.send(ServerMessage::Patch { version, patches }).await.is_err() {
                    break;
                }
            }
            Err(e) => tracing::warn!("ignoring stale event: {e}"),
        }
    }

    tracing::info!("live session ended");
}
