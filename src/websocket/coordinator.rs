//! Single-writer owner of the scoreboard.
//!
//! Every session talks to the coordinator through one command queue, so actions
//! are applied strictly in arrival order. After each action the coordinator
//! hands the new snapshot to the persistence writer and fans it out to every
//! subscribed session. Storage never sits between a mutation and its broadcast.

use crate::game::ScoringRules;
use crate::persistence::PersistenceHandle;
use crate::state::{Action, SharedState, SnapshotKind};
use crate::websocket::timestamp::TimestampManager;
use crate::websocket::types::GameMessage;
use axum::extract::ws::Message;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub type SessionId = Uuid;
pub type MessageSender = mpsc::Sender<Message>;

/// Outbound queues of all subscribed sessions.
pub type SessionRegistry = DashMap<SessionId, MessageSender>;

#[derive(Debug)]
pub enum Command {
    /// Send the current snapshot to a new session, then subscribe it.
    Connect {
        session: SessionId,
        sender: MessageSender,
    },
    Apply {
        session: SessionId,
        action: Action,
    },
    Disconnect {
        session: SessionId,
    },
    /// Read the current state; used by tests and diagnostics.
    Snapshot {
        reply: oneshot::Sender<SharedState>,
    },
    /// Stop the coordinator. Its persistence handle is released so the
    /// writer can flush the last snapshot and exit.
    Shutdown,
}

/// Cloneable front door to the coordinator task.
#[derive(Clone)]
pub struct CoordinatorHandle {
    commands: mpsc::Sender<Command>,
    sessions: Arc<SessionRegistry>,
}

impl CoordinatorHandle {
    /// Queue a command. Returns false once the coordinator has stopped.
    pub async fn send(&self, command: Command) -> bool {
        self.commands.send(command).await.is_ok()
    }

    pub fn subscribed_sessions(&self) -> usize {
        self.sessions.len()
    }

    pub async fn shutdown(&self) {
        self.send(Command::Shutdown).await;
    }

    pub async fn snapshot(&self) -> Option<SharedState> {
        let (reply, rx) = oneshot::channel();
        if !self.send(Command::Snapshot { reply }).await {
            return None;
        }
        rx.await.ok()
    }
}

pub struct Coordinator {
    state: SharedState,
    rules: ScoringRules,
    sessions: Arc<SessionRegistry>,
    persistence: Option<PersistenceHandle>,
    commands: mpsc::Receiver<Command>,
}

impl Coordinator {
    /// Spawn the coordinator task over an initial state.
    pub fn spawn(
        state: SharedState,
        rules: ScoringRules,
        persistence: Option<PersistenceHandle>,
        queue_capacity: usize,
    ) -> (CoordinatorHandle, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(queue_capacity.max(1));
        let sessions = Arc::new(SessionRegistry::new());

        let coordinator = Coordinator {
            state,
            rules,
            sessions: Arc::clone(&sessions),
            persistence,
            commands: rx,
        };
        let task = tokio::spawn(coordinator.run());

        (
            CoordinatorHandle {
                commands: tx,
                sessions,
            },
            task,
        )
    }

    async fn run(mut self) {
        while let Some(command) = self.commands.recv().await {
            if let Command::Shutdown = command {
                break;
            }
            self.handle(command);
        }
        // ends every forward task
        self.sessions.clear();
        debug!("coordinator stopped");
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::Connect { session, sender } => self.connect(session, sender),
            Command::Apply { session, action } => self.apply(session, action),
            Command::Disconnect { session } => {
                if self.sessions.remove(&session).is_some() {
                    info!(%session, remaining = self.sessions.len(), "session unsubscribed");
                }
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(self.state.clone());
            }
            Command::Shutdown => {}
        }
    }

    fn connect(&mut self, session: SessionId, sender: MessageSender) {
        let Some(frame) = self.encode(SnapshotKind::Init) else {
            return;
        };

        match sender.try_send(Message::Text(frame)) {
            Ok(()) => {
                self.sessions.insert(session, sender);
                info!(%session, subscribed = self.sessions.len(), "session subscribed");
            }
            Err(e) => warn!(%session, error = %e, "could not deliver initial snapshot"),
        }
    }

    fn apply(&mut self, session: SessionId, action: Action) {
        if !self.sessions.contains_key(&session) {
            debug!(%session, action = action.name(), "ignoring action from unsubscribed session");
            return;
        }

        let action_name = action.name();
        let kind = self
            .state
            .apply(action, &self.rules, TimestampManager::now());
        debug!(%session, action = action_name, "action applied");

        let Some(frame) = self.encode(kind) else {
            return;
        };

        if let Some(persistence) = &self.persistence {
            match serde_json::to_string(&self.state) {
                Ok(blob) => persistence.publish(Arc::from(blob)),
                Err(e) => warn!(error = %e, "failed to encode scoreboard for persistence"),
            }
        }

        self.broadcast(frame);
    }

    /// Send a frame to every subscribed session.
    ///
    /// A session that cannot take the frame is unsubscribed. Dropping its sender
    /// ends its forward task, which closes the socket; the client reconnects and
    /// gets a fresh `init`.
    fn broadcast(&self, frame: String) {
        let mut evicted = Vec::new();

        for entry in self.sessions.iter() {
            match entry.value().try_send(Message::Text(frame.clone())) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    warn!(session = %entry.key(), "outbound queue full, closing session");
                    evicted.push(*entry.key());
                }
                Err(mpsc::error::TrySendError::Closed(_)) => evicted.push(*entry.key()),
            }
        }

        for session in evicted {
            self.sessions.remove(&session);
            debug!(%session, "session unsubscribed by broadcast");
        }
    }

    fn encode(&self, kind: SnapshotKind) -> Option<String> {
        let encoded = GameMessage::snapshot(kind, &self.state)
            .and_then(|msg| serde_json::to_string(&msg));
        match encoded {
            Ok(frame) => Some(frame),
            Err(e) => {
                warn!(error = %e, "failed to encode snapshot");
                None
            }
        }
    }
}
