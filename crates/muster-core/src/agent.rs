// ABOUTME: Domain types for agents: directory descriptors and activation records.
// ABOUTME: Agents are identified by opaque string names; activation outcomes are immutable records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::preference::PreferenceSet;

/// An agent known to the directory: its name, declared tool preferences,
/// and whether it has been activated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentDescriptor {
    pub name: String,
    pub description: Option<String>,
    pub preferences: PreferenceSet,
    pub active: bool,
    pub registered_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AgentDescriptor {
    /// Create an inactive descriptor with the given name and preferences.
    pub fn new(name: String, description: Option<String>, preferences: PreferenceSet) -> Self {
        let now = Utc::now();
        Self {
            name,
            description,
            preferences,
            active: false,
            registered_at: now,
            updated_at: now,
        }
    }
}

/// Outcome of activating a single agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivationStatus {
    Active,
    Failed,
}

/// One entry of a batch activation result. Created by `activate_batch`,
/// consumed by the caller; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivationRecord {
    pub name: String,
    pub status: ActivationStatus,
}

impl ActivationRecord {
    pub fn active(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: ActivationStatus::Active,
        }
    }

    pub fn failed(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: ActivationStatus::Failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activation_status_serializes_lowercase() {
        let json = serde_json::to_string(&ActivationStatus::Active).unwrap();
        assert_eq!(json, "\"active\"");
        let json = serde_json::to_string(&ActivationStatus::Failed).unwrap();
        assert_eq!(json, "\"failed\"");
    }

    #[test]
    fn activation_record_round_trips() {
        let record = ActivationRecord::active("backend");
        let json = serde_json::to_string(&record).unwrap();
        let deser: ActivationRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, deser);
        assert_eq!(deser.status, ActivationStatus::Active);
    }

    #[test]
    fn new_descriptor_starts_inactive() {
        let desc = AgentDescriptor::new("qa".to_string(), None, PreferenceSet::new());
        assert!(!desc.active);
        assert_eq!(desc.registered_at, desc.updated_at);
    }
}
