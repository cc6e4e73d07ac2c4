// ABOUTME: The PreferenceSource trait and a table-backed implementation for resolving agent tool preferences.
// ABOUTME: Unknown agent names resolve to an empty set, never an error; aggregation across agents is set union.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use thiserror::Error;

/// An unordered set of tool-capability names declared by an agent,
/// e.g. "filesystem" or "database".
pub type PreferenceSet = BTreeSet<String>;

/// Errors from a preference lookup source. Unknown agent names are NOT an
/// error; this covers failures of the source itself (a registry service
/// that is down, a config file that cannot be read).
#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("preference source unavailable: {0}")]
    SourceUnavailable(String),
}

/// Injectable lookup capability from agent name to preference set.
///
/// Production code can back this with configuration files, a registry
/// service, or network calls without changing the aggregator's contract.
#[async_trait]
pub trait PreferenceSource: Send + Sync {
    /// Resolve the declared tool preferences for a single agent.
    /// Names the source does not know resolve to an empty set.
    async fn preferences_for(&self, name: &str) -> Result<PreferenceSet, PreferenceError>;
}

/// A `PreferenceSource` backed by a fixed in-memory table.
#[derive(Debug, Clone, Default)]
pub struct StaticPreferences {
    table: HashMap<String, PreferenceSet>,
}

impl StaticPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from (agent, tools) pairs.
    pub fn from_entries<N, T>(entries: impl IntoIterator<Item = (N, Vec<T>)>) -> Self
    where
        N: Into<String>,
        T: Into<String>,
    {
        let table = entries
            .into_iter()
            .map(|(name, tools)| {
                (
                    name.into(),
                    tools.into_iter().map(Into::into).collect::<PreferenceSet>(),
                )
            })
            .collect();
        Self { table }
    }

    /// Insert or replace the preference set for one agent.
    pub fn insert(&mut self, name: impl Into<String>, preferences: PreferenceSet) {
        self.table.insert(name.into(), preferences);
    }
}

#[async_trait]
impl PreferenceSource for StaticPreferences {
    async fn preferences_for(&self, name: &str) -> Result<PreferenceSet, PreferenceError> {
        Ok(self.table.get(name).cloned().unwrap_or_default())
    }
}
