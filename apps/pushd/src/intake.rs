//! WebSocket intake for the local delivery channel.
//!
//! The web-to-native wrapper connects over loopback and forwards push
//! payloads and notification clicks as [`Envelope`]s. Each envelope is
//! dispatched onto the router queue; the wrapper's pings are answered
//! in-line.

use std::net::SocketAddr;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::protocol::Message as WsMessage;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use kopro_push_wire::constants::WS_MAX_MESSAGE_SIZE;
use kopro_push_wire::{Envelope, MessageType};
use kopro_router::{ClickEvent, RouterEvent};

/// Errors produced while serving one wrapper connection.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("router queue closed")]
    QueueClosed,
}

/// Accepts wrapper connections until cancellation.
pub async fn run_intake(
    listener: TcpListener,
    events: mpsc::Sender<RouterEvent>,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                info!("intake shutting down");
                break;
            }

            result = listener.accept() => {
                match result {
                    Ok((stream, peer_addr)) => {
                        let events = events.clone();
                        let cancel = cancel.clone();
                        tokio::spawn(async move {
                            if let Err(e) = handle_connection(stream, peer_addr, events, cancel).await {
                                warn!(%peer_addr, "connection error: {e}");
                            }
                        });
                    }
                    Err(e) => {
                        warn!("accept error: {e}");
                    }
                }
            }
        }
    }
}

/// Serves one wrapper connection: upgrades to WS and dispatches envelopes.
async fn handle_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    events: mpsc::Sender<RouterEvent>,
    cancel: CancellationToken,
) -> Result<(), IntakeError> {
    let mut ws_config = tokio_tungstenite::tungstenite::protocol::WebSocketConfig::default();
    ws_config.max_message_size = Some(WS_MAX_MESSAGE_SIZE);
    ws_config.max_frame_size = Some(WS_MAX_MESSAGE_SIZE);
    let mut ws = tokio_tungstenite::accept_async_with_config(stream, Some(ws_config)).await?;
    info!(%peer_addr, "wrapper connected");

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,

            frame = ws.next() => {
                match frame {
                    Some(Ok(WsMessage::Text(text))) => {
                        let envelope: Envelope = match serde_json::from_str(&text) {
                            Ok(env) => env,
                            Err(e) => {
                                warn!("invalid envelope JSON: {e}");
                                continue;
                            }
                        };
                        if let Some(reply) = dispatch(envelope, &events).await? {
                            let json = serde_json::to_string(&reply)
                                .unwrap_or_else(|_| String::from("{}"));
                            ws.send(WsMessage::Text(json.into())).await?;
                        }
                    }
                    Some(Ok(WsMessage::Ping(data))) => {
                        ws.send(WsMessage::Pong(data)).await?;
                    }
                    Some(Ok(WsMessage::Close(_))) => {
                        debug!(%peer_addr, "wrapper closed connection");
                        break;
                    }
                    Some(Ok(_)) => {} // Binary and raw frames ignored.
                    Some(Err(e)) => {
                        warn!("read error: {e}");
                        break;
                    }
                    None => break,
                }
            }
        }
    }

    Ok(())
}

/// Routes one envelope; returns the reply to send back, if any.
async fn dispatch(
    envelope: Envelope,
    events: &mpsc::Sender<RouterEvent>,
) -> Result<Option<Envelope>, IntakeError> {
    match envelope.msg_type {
        MessageType::Push => {
            // The payload stays opaque here; the router decodes leniently.
            let payload = envelope
                .payload_bytes()
                .map(<[u8]>::to_vec)
                .unwrap_or_default();
            events
                .send(RouterEvent::Push(payload))
                .await
                .map_err(|_| IntakeError::QueueClosed)?;
            Ok(None)
        }
        MessageType::NotificationClick => match envelope.parse_payload::<ClickEvent>() {
            Ok(Some(click)) => {
                events
                    .send(RouterEvent::Click(click))
                    .await
                    .map_err(|_| IntakeError::QueueClosed)?;
                Ok(None)
            }
            Ok(None) | Err(_) => {
                warn!("notification_click without a valid payload");
                Ok(Some(envelope.reply_error(400, "invalid click payload")))
            }
        },
        MessageType::Ping => Ok(Some(
            envelope
                .reply::<()>(MessageType::Pong, None)
                .unwrap_or_else(|_| Envelope::error(&envelope.id, 500, "reply failed")),
        )),
        _ => {
            debug!(msg_type = ?envelope.msg_type, "unsupported envelope type");
            Ok(Some(envelope.reply_error(501, "unsupported message type")))
        }
    }
}
