//! WebSocket endpoint delivering interstitial targets.
//!
//! Protocol: the client sends one text frame holding a key. The server
//! resolves it, waits the notifier delay, sends the target as one text frame
//! and closes the socket. Unknown keys are closed with `1008` and no text
//! frame. Frames after the first are ignored.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use axum::{
    extract::{
        State,
        ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade, close_code},
    },
    response::Response,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::domain::services::{ChannelClosed, ClientChannel};
use crate::error::AppError;
use crate::state::AppState;

static NEXT_SESSION: AtomicU64 = AtomicU64::new(1);

/// Close frame payloads are capped at 125 bytes, two of which hold the code.
const MAX_CLOSE_REASON: usize = 123;

enum Outbound {
    Text(String),
    Close,
}

/// [`ClientChannel`] backed by a WebSocket session task.
///
/// Writes go through an mpsc queue to the task that owns the socket, so the
/// notifier never touches the socket directly.
struct WsChannel {
    id: String,
    sender: mpsc::Sender<Outbound>,
    open: Arc<AtomicBool>,
}

#[async_trait]
impl ClientChannel for WsChannel {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire) && !self.sender.is_closed()
    }

    async fn send(&self, text: String) -> Result<(), ChannelClosed> {
        if !self.is_open() {
            return Err(ChannelClosed);
        }
        self.sender
            .send(Outbound::Text(text))
            .await
            .map_err(|_| ChannelClosed)
    }

    async fn close(&self) {
        self.open.store(false, Ordering::Release);
        let _ = self.sender.send(Outbound::Close).await;
    }
}

/// Upgrades to the interstitial WebSocket protocol.
///
/// # Endpoint
///
/// `GET /ws`
pub async fn interstitial_ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> Response {
    ws.on_upgrade(move |socket| session(socket, state))
}

async fn session(mut socket: WebSocket, state: AppState) {
    let id = format!("ws-{}", NEXT_SESSION.fetch_add(1, Ordering::Relaxed));
    let (sender, mut outbound) = mpsc::channel(4);
    let open = Arc::new(AtomicBool::new(true));
    let channel = Arc::new(WsChannel {
        id: id.clone(),
        sender,
        open: open.clone(),
    });

    debug!(session = %id, "interstitial session opened");
    let mut registered = false;

    loop {
        tokio::select! {
            inbound = socket.recv() => match inbound {
                Some(Ok(Message::Text(text))) => {
                    if registered {
                        debug!(session = %id, "ignoring extra frame");
                        continue;
                    }
                    registered = true;

                    let key = text.as_str().trim().to_string();
                    info!(session = %id, key = %key, "interstitial key received");

                    if let Err(frame) = register(&state, channel.clone(), &key).await {
                        let _ = socket.send(Message::Close(Some(frame))).await;
                        break;
                    }
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Err(e)) => {
                    debug!(session = %id, "socket error: {}", e);
                    break;
                }
                Some(Ok(_)) => {}
            },
            message = outbound.recv() => match message {
                Some(Outbound::Text(text)) => {
                    if socket.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                Some(Outbound::Close) | None => {
                    let _ = socket
                        .send(Message::Close(Some(CloseFrame {
                            code: close_code::NORMAL,
                            reason: "".into(),
                        })))
                        .await;
                    break;
                }
            },
        }
    }

    open.store(false, Ordering::Release);
    debug!(session = %id, "interstitial session closed");
}

/// Resolves `key` and hands the channel to the notifier. On failure returns
/// the close frame to send.
async fn register(
    state: &AppState,
    channel: Arc<WsChannel>,
    key: &str,
) -> Result<(), CloseFrame> {
    let resolution = state
        .resolution_service
        .resolve(key)
        .await
        .map_err(|e| close_frame_for(&e))?;

    state
        .notifier
        .register(channel, resolution.target)
        .map(|_| ())
        .map_err(|e| {
            warn!(key = %key, "cannot schedule interstitial delivery: {}", e);
            close_frame_for(&e)
        })
}

fn close_frame_for(error: &AppError) -> CloseFrame {
    let code = match error {
        AppError::NotFound { .. } | AppError::RedirectionNotReachable { .. } => close_code::POLICY,
        AppError::Unavailable { .. } => close_code::AGAIN,
        _ => close_code::ERROR,
    };

    let mut reason = error.to_string();
    if reason.len() > MAX_CLOSE_REASON {
        let mut end = MAX_CLOSE_REASON;
        while !reason.is_char_boundary(end) {
            end -= 1;
        }
        reason.truncate(end);
    }

    CloseFrame {
        code,
        reason: reason.into(),
    }
}
