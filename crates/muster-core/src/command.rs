// ABOUTME: Defines the Command enum representing all write operations on the agent directory.
// ABOUTME: Commands are intent-based inputs that get validated and converted into events.

use serde::{Deserialize, Serialize};

use crate::preference::PreferenceSet;

/// A command representing a desired mutation to the agent directory.
/// Commands are validated and translated into events by the actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    RegisterAgent {
        name: String,
        description: Option<String>,
        preferences: PreferenceSet,
    },
    DeregisterAgent {
        name: String,
    },
    /// Mark an agent as activated. Names without a prior registration are
    /// upserted with an empty preference set; activation itself never fails.
    MarkActivated {
        name: String,
    },
}
