// ABOUTME: Async actor for processing directory commands and publishing events via tokio channels.
// ABOUTME: Provides AgentDirectoryHandle for sending commands, subscribing to events, and reading state.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tokio::sync::{RwLock, broadcast, mpsc, oneshot};
use ulid::Ulid;

use crate::agent::AgentDescriptor;
use crate::command::Command;
use crate::event::{Event, EventPayload};
use crate::preference::{PreferenceError, PreferenceSet, PreferenceSource};
use crate::state::DirectoryState;

/// Errors that can occur when processing commands in the directory actor.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("agent already registered: {0}")]
    DuplicateAgent(String),

    #[error("agent not found: {0}")]
    AgentNotFound(String),

    #[error("directory channel closed")]
    ChannelClosed,
}

/// What travels over the command channel: the command plus the oneshot
/// the actor replies on.
type CommandMessage = (Command, oneshot::Sender<Result<Vec<Event>, DirectoryError>>);

/// Public handle for interacting with a directory actor. Supports sending
/// commands, subscribing to events, and reading the current state.
pub struct AgentDirectoryHandle {
    cmd_tx: mpsc::Sender<CommandMessage>,
    event_tx: broadcast::Sender<Event>,
    state: Arc<RwLock<DirectoryState>>,
    pub directory_id: Ulid,
}

impl AgentDirectoryHandle {
    /// Send a command to the actor and await the resulting events.
    pub async fn send_command(&self, cmd: Command) -> Result<Vec<Event>, DirectoryError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send((cmd, tx))
            .await
            .map_err(|_| DirectoryError::ChannelClosed)?;
        rx.await.map_err(|_| DirectoryError::ChannelClosed)?
    }

    /// Subscribe to the event broadcast stream.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Get a read-only reference to the shared state.
    pub async fn read_state(&self) -> tokio::sync::RwLockReadGuard<'_, DirectoryState> {
        self.state.read().await
    }
}

/// The directory itself is a preference lookup source: agents declare their
/// tool preferences at registration, and names the directory does not know
/// resolve to an empty set.
#[async_trait]
impl PreferenceSource for AgentDirectoryHandle {
    async fn preferences_for(&self, name: &str) -> Result<PreferenceSet, PreferenceError> {
        let state = self.state.read().await;
        Ok(state
            .agents
            .get(name)
            .map(|a| a.preferences.clone())
            .unwrap_or_default())
    }
}

/// Spawn a new directory actor task and return the handle for interacting
/// with it. The actor processes commands sequentially, converts them to
/// events, applies them to state, and broadcasts them to subscribers.
pub fn spawn(directory_id: Ulid, initial_state: DirectoryState) -> AgentDirectoryHandle {
    let (cmd_tx, cmd_rx) = mpsc::channel::<CommandMessage>(64);
    let (event_tx, _) = broadcast::channel::<Event>(256);
    let last_event_id = initial_state.last_event_id;
    let state = Arc::new(RwLock::new(initial_state));

    let handle = AgentDirectoryHandle {
        cmd_tx,
        event_tx: event_tx.clone(),
        state: Arc::clone(&state),
        directory_id,
    };

    let actor = DirectoryActor {
        state,
        cmd_rx,
        event_tx,
        next_event_id: last_event_id + 1,
        directory_id,
    };

    tokio::spawn(actor.run());

    handle
}

/// The internal actor that processes commands in a loop.
struct DirectoryActor {
    state: Arc<RwLock<DirectoryState>>,
    cmd_rx: mpsc::Receiver<CommandMessage>,
    event_tx: broadcast::Sender<Event>,
    next_event_id: u64,
    directory_id: Ulid,
}

impl DirectoryActor {
    async fn run(mut self) {
        while let Some((cmd, reply_tx)) = self.cmd_rx.recv().await {
            let result = self.process_command(cmd).await;
            // A failed reply just means the caller stopped waiting.
            let _ = reply_tx.send(result);
        }
    }

    async fn process_command(&mut self, cmd: Command) -> Result<Vec<Event>, DirectoryError> {
        let events = self.command_to_events(cmd).await?;

        // Fold the new events into shared state, then release the lock
        // before broadcasting.
        {
            let mut state = self.state.write().await;
            for event in &events {
                state.apply(event);
            }
        }

        for event in &events {
            // send() errors when there are no subscribers; that is fine.
            let _ = self.event_tx.send(event.clone());
        }

        Ok(events)
    }

    /// Convert a command into one or more events, performing validation
    /// against the current state.
    async fn command_to_events(&mut self, cmd: Command) -> Result<Vec<Event>, DirectoryError> {
        let state = self.state.read().await;

        let payloads = match cmd {
            Command::RegisterAgent {
                name,
                description,
                preferences,
            } => {
                if state.agents.contains_key(&name) {
                    return Err(DirectoryError::DuplicateAgent(name));
                }
                let descriptor = AgentDescriptor::new(name, description, preferences);
                tracing::debug!(agent = %descriptor.name, "registering agent");
                vec![EventPayload::AgentRegistered { descriptor }]
            }

            Command::DeregisterAgent { name } => {
                if !state.agents.contains_key(&name) {
                    return Err(DirectoryError::AgentNotFound(name));
                }
                vec![EventPayload::AgentDeregistered { name }]
            }

            // Activation never fails: unknown names are upserted by apply().
            Command::MarkActivated { name } => {
                vec![EventPayload::AgentActivated { name }]
            }
        };

        // Validation is done with the state; release it before stamping ids.
        drop(state);

        let now = Utc::now();
        let events = payloads
            .into_iter()
            .map(|payload| {
                let event_id = self.next_event_id;
                self.next_event_id += 1;
                Event {
                    event_id,
                    directory_id: self.directory_id,
                    timestamp: now,
                    payload,
                }
            })
            .collect();

        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefs(tools: &[&str]) -> PreferenceSet {
        tools.iter().map(|t| t.to_string()).collect()
    }

    #[tokio::test]
    async fn actor_processes_register() {
        let directory_id = Ulid::new();
        let handle = spawn(directory_id, DirectoryState::new());

        let events = handle
            .send_command(Command::RegisterAgent {
                name: "backend".to_string(),
                description: None,
                preferences: prefs(&["filesystem", "database"]),
            })
            .await
            .unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_id, 1);
        assert_eq!(events[0].directory_id, directory_id);

        let state = handle.read_state().await;
        assert!(state.agents.contains_key("backend"));
        assert!(!state.agents["backend"].active);
    }

    #[tokio::test]
    async fn actor_rejects_duplicate_registration() {
        let handle = spawn(Ulid::new(), DirectoryState::new());

        handle
            .send_command(Command::RegisterAgent {
                name: "qa".to_string(),
                description: None,
                preferences: PreferenceSet::new(),
            })
            .await
            .unwrap();

        let result = handle
            .send_command(Command::RegisterAgent {
                name: "qa".to_string(),
                description: None,
                preferences: PreferenceSet::new(),
            })
            .await;

        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(
            matches!(err, DirectoryError::DuplicateAgent(ref n) if n == "qa"),
            "expected DuplicateAgent, got: {}",
            err
        );
    }

    #[tokio::test]
    async fn actor_rejects_deregister_of_unknown_agent() {
        let handle = spawn(Ulid::new(), DirectoryState::new());

        let result = handle
            .send_command(Command::DeregisterAgent {
                name: "ghost".to_string(),
            })
            .await;

        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            DirectoryError::AgentNotFound(ref n) if n == "ghost"
        ));
    }

    #[tokio::test]
    async fn actor_broadcasts_events() {
        let handle = spawn(Ulid::new(), DirectoryState::new());
        let mut rx = handle.subscribe();

        handle
            .send_command(Command::MarkActivated {
                name: "frontend".to_string(),
            })
            .await
            .unwrap();

        let event = rx.recv().await.expect("should receive broadcast event");
        assert_eq!(event.event_id, 1);
        match &event.payload {
            EventPayload::AgentActivated { name } => assert_eq!(name, "frontend"),
            other => panic!("expected AgentActivated, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn mark_activated_upserts_unknown_agent() {
        let handle = spawn(Ulid::new(), DirectoryState::new());

        handle
            .send_command(Command::MarkActivated {
                name: "security".to_string(),
            })
            .await
            .unwrap();

        let state = handle.read_state().await;
        let agent = &state.agents["security"];
        assert!(agent.active);
        assert!(agent.preferences.is_empty());
    }

    #[tokio::test]
    async fn handle_is_a_preference_source() {
        let handle = spawn(Ulid::new(), DirectoryState::new());

        handle
            .send_command(Command::RegisterAgent {
                name: "backend".to_string(),
                description: None,
                preferences: prefs(&["filesystem", "database"]),
            })
            .await
            .unwrap();

        let known = handle.preferences_for("backend").await.unwrap();
        assert_eq!(known, prefs(&["filesystem", "database"]));

        let unknown = handle.preferences_for("nobody").await.unwrap();
        assert!(unknown.is_empty(), "unknown names resolve to empty set");
    }

    #[tokio::test]
    async fn actor_event_id_continues_from_recovered_state() {
        let mut recovered = DirectoryState::new();
        recovered.last_event_id = 50;

        let handle = spawn(Ulid::new(), recovered);

        let events = handle
            .send_command(Command::MarkActivated {
                name: "backend".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0].event_id, 51,
            "event_id should continue from last_event_id (50) + 1"
        );
    }
}
