// ABOUTME: Core library for muster, containing domain types, commands, events, and the directory actor.
// ABOUTME: This crate defines the shared data model used across all muster components.

pub mod actor;
pub mod agent;
pub mod command;
pub mod event;
pub mod preference;
pub mod state;
pub mod step;

pub use actor::{AgentDirectoryHandle, DirectoryError};
pub use agent::{ActivationRecord, ActivationStatus, AgentDescriptor};
pub use preference::{PreferenceError, PreferenceSet, PreferenceSource, StaticPreferences};
pub use step::{StepResult, StepStatus};
