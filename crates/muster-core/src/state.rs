// ABOUTME: Defines DirectoryState, the materialized view of the agent directory.
// ABOUTME: The apply() method pattern-matches on EventPayload to fold events into current state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::agent::AgentDescriptor;
use crate::event::{Event, EventPayload};
use crate::preference::PreferenceSet;

/// The full materialized state of the directory, built by replaying events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectoryState {
    pub agents: BTreeMap<String, AgentDescriptor>,
    pub last_event_id: u64,
}

impl DirectoryState {
    /// Create an empty directory state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of agents currently marked active.
    pub fn active_count(&self) -> usize {
        self.agents.values().filter(|a| a.active).count()
    }

    /// Apply a single event to mutate this state.
    pub fn apply(&mut self, event: &Event) {
        self.last_event_id = event.event_id;

        match &event.payload {
            EventPayload::AgentRegistered { descriptor } => {
                self.agents
                    .insert(descriptor.name.clone(), descriptor.clone());
            }

            EventPayload::AgentDeregistered { name } => {
                self.agents.remove(name);
            }

            EventPayload::AgentActivated { name } => {
                let descriptor = self.agents.entry(name.clone()).or_insert_with(|| {
                    // Activation of a name the directory has never seen
                    // upserts an empty descriptor rather than failing.
                    AgentDescriptor::new(name.clone(), None, PreferenceSet::new())
                });
                descriptor.active = true;
                descriptor.updated_at = event.timestamp;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use ulid::Ulid;

    fn event(event_id: u64, payload: EventPayload) -> Event {
        Event {
            event_id,
            directory_id: Ulid::new(),
            timestamp: Utc::now(),
            payload,
        }
    }

    #[test]
    fn apply_registered_adds_agent() {
        let mut state = DirectoryState::new();
        let descriptor = AgentDescriptor::new(
            "backend".to_string(),
            None,
            ["filesystem".to_string()].into_iter().collect(),
        );

        state.apply(&event(1, EventPayload::AgentRegistered { descriptor }));

        assert_eq!(state.agents.len(), 1);
        assert_eq!(state.last_event_id, 1);
        assert!(!state.agents["backend"].active);
    }

    #[test]
    fn apply_deregistered_removes_agent() {
        let mut state = DirectoryState::new();
        let descriptor =
            AgentDescriptor::new("qa".to_string(), None, PreferenceSet::new());
        state.apply(&event(1, EventPayload::AgentRegistered { descriptor }));

        state.apply(&event(
            2,
            EventPayload::AgentDeregistered {
                name: "qa".to_string(),
            },
        ));

        assert!(state.agents.is_empty());
        assert_eq!(state.last_event_id, 2);
    }

    #[test]
    fn apply_activated_marks_registered_agent_active() {
        let mut state = DirectoryState::new();
        let descriptor = AgentDescriptor::new(
            "backend".to_string(),
            None,
            ["database".to_string()].into_iter().collect(),
        );
        state.apply(&event(1, EventPayload::AgentRegistered { descriptor }));

        state.apply(&event(
            2,
            EventPayload::AgentActivated {
                name: "backend".to_string(),
            },
        ));

        let agent = &state.agents["backend"];
        assert!(agent.active);
        // Preferences survive activation.
        assert!(agent.preferences.contains("database"));
        assert_eq!(state.active_count(), 1);
    }

    #[test]
    fn apply_activated_upserts_unknown_agent() {
        let mut state = DirectoryState::new();

        state.apply(&event(
            1,
            EventPayload::AgentActivated {
                name: "security".to_string(),
            },
        ));

        let agent = &state.agents["security"];
        assert!(agent.active);
        assert!(agent.preferences.is_empty());
    }
}
