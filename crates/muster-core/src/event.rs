// ABOUTME: Defines the event envelope and payload variants for the agent directory.
// ABOUTME: Events are immutable facts about what happened to the directory over time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::agent::AgentDescriptor;

/// An event envelope wrapping a timestamped, sequenced payload for a
/// given directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub event_id: u64,
    pub directory_id: Ulid,
    pub timestamp: DateTime<Utc>,
    pub payload: EventPayload,
}

/// The set of things that can happen to the directory. Each variant
/// captures the minimum data needed to replay state changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EventPayload {
    AgentRegistered { descriptor: AgentDescriptor },
    AgentDeregistered { name: String },
    AgentActivated { name: String },
}
