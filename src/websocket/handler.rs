use super::coordinator::{Command, CoordinatorHandle, SessionId};
use super::types::GameMessage;
use axum::{
    extract::ws::{Message, WebSocket},
    extract::{State, WebSocketUpgrade},
    response::IntoResponse,
};
use futures_util::SinkExt;
use futures_util::StreamExt;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Frames buffered per session before a lagging client is disconnected
const OUTBOUND_CAPACITY: usize = 100;

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(coordinator): State<CoordinatorHandle>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, coordinator))
}

pub async fn handle_socket(socket: WebSocket, coordinator: CoordinatorHandle) {
    let session: SessionId = Uuid::new_v4();
    let (mut sender, mut receiver) = socket.split();

    // Create a channel for sending messages to this client
    let (tx, mut rx) = mpsc::channel::<Message>(OUTBOUND_CAPACITY);

    // Task to forward messages from the channel to the WebSocket.
    // The queue closes when the coordinator unsubscribes this session.
    let mut forward_task = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            if let Err(e) = sender.send(message).await {
                debug!(%session, error = %e, "failed to send frame");
                return;
            }
        }
        let _ = sender.send(Message::Close(None)).await;
    });

    info!(%session, "websocket connected");
    if !coordinator
        .send(Command::Connect {
            session,
            sender: tx,
        })
        .await
    {
        warn!(%session, "coordinator unavailable, closing session");
        forward_task.abort();
        return;
    }

    // Process incoming messages until the client leaves or the session is dropped
    loop {
        let msg = tokio::select! {
            frame = receiver.next() => match frame {
                Some(Ok(msg)) => msg,
                _ => break,
            },
            _ = &mut forward_task => {
                info!(%session, "session unsubscribed, closing websocket");
                break;
            }
        };

        match msg {
            Message::Text(text) => match GameMessage::parse_action(&text) {
                Ok(action) => {
                    if !coordinator.send(Command::Apply { session, action }).await {
                        break;
                    }
                }
                Err(e) => warn!(%session, error = %e, "dropping client frame"),
            },
            Message::Close(_) => break,
            Message::Binary(_) => warn!(%session, "dropping binary frame"),
            // ping/pong are answered by the transport
            _ => {}
        }
    }

    // WebSocket closed, clean up
    info!(%session, "websocket closed");
    coordinator.send(Command::Disconnect { session }).await;

    // Abort the forward task
    forward_task.abort();
}
