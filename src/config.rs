// ABOUTME: Configuration loading for the muster binary.
// ABOUTME: Parses MUSTER_AGENTS seed entries from the environment with validation.

use muster_core::preference::PreferenceSet;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("MUSTER_AGENTS entry has an empty agent name: {0:?}")]
    EmptyAgentName(String),
}

/// One seed agent parsed from MUSTER_AGENTS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedAgent {
    pub name: String,
    pub preferences: PreferenceSet,
}

/// Binary configuration loaded from environment variables.
#[derive(Debug, Clone, Default)]
pub struct MusterConfig {
    pub seed_agents: Vec<SeedAgent>,
}

impl MusterConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - MUSTER_AGENTS: comma-separated seed agents, each `name` or
    ///   `name=tool+tool` (default: empty)
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = std::env::var("MUSTER_AGENTS").unwrap_or_default();
        Ok(Self {
            seed_agents: parse_seed_agents(&raw)?,
        })
    }
}

/// Parse a MUSTER_AGENTS value, e.g. `backend=filesystem+database,qa`.
fn parse_seed_agents(raw: &str) -> Result<Vec<SeedAgent>, ConfigError> {
    let mut agents = Vec::new();
    for entry in raw.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let (name, tools) = match entry.split_once('=') {
            Some((name, tools)) => (name.trim(), tools),
            None => (entry, ""),
        };
        if name.is_empty() {
            return Err(ConfigError::EmptyAgentName(entry.to_string()));
        }
        let preferences: PreferenceSet = tools
            .split('+')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        agents.push(SeedAgent {
            name: name.to_string(),
            preferences,
        });
    }
    Ok(agents)
}
