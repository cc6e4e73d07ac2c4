// ABOUTME: The Activator seam and the directory-backed implementation.
// ABOUTME: Activation brings one named agent into the active state; the batch layer lives in orchestrator.rs.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use muster_core::actor::{AgentDirectoryHandle, DirectoryError};
use muster_core::command::Command;

/// Errors from activating a single agent.
#[derive(Debug, Error)]
pub enum ActivationError {
    #[error("activation failed for agent {name}: {reason}")]
    Failed { name: String, reason: String },

    #[error("directory unavailable: {0}")]
    Directory(#[from] DirectoryError),
}

/// Brings a single named agent into the active state.
///
/// A batch activation runs one call per name concurrently; implementations
/// must not share mutable state between calls.
#[async_trait]
pub trait Activator: Send + Sync {
    async fn activate(&self, name: &str) -> Result<(), ActivationError>;
}

/// Activator backed by the in-memory agent directory. Marks the agent as
/// active, upserting names the directory has not seen before.
pub struct DirectoryActivator {
    directory: Arc<AgentDirectoryHandle>,
}

impl DirectoryActivator {
    pub fn new(directory: Arc<AgentDirectoryHandle>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl Activator for DirectoryActivator {
    async fn activate(&self, name: &str) -> Result<(), ActivationError> {
        self.directory
            .send_command(Command::MarkActivated {
                name: name.to_string(),
            })
            .await?;
        tracing::debug!(agent = %name, "agent activated");
        Ok(())
    }
}
