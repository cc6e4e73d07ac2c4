// ABOUTME: Test utilities for muster-orchestrator: stub activators and step runners.
// ABOUTME: Used in tests to simulate latency and scripted failures without real agent infrastructure.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;

use muster_core::preference::{PreferenceError, PreferenceSet, PreferenceSource};

use crate::activation::{ActivationError, Activator};
use crate::steps::{StepError, StepRunner};

/// A stub activator that always succeeds, optionally after a simulated
/// delay.
///
/// Useful for exercising the batch layer's join/barrier semantics without
/// a directory or real agent infrastructure.
#[derive(Debug, Clone)]
pub struct StubActivator {
    delay: Duration,
}

impl StubActivator {
    /// Succeed immediately.
    pub fn instant() -> Self {
        Self {
            delay: Duration::ZERO,
        }
    }

    /// Succeed after sleeping for `delay`, simulating activation latency.
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl Activator for StubActivator {
    async fn activate(&self, _name: &str) -> Result<(), ActivationError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(())
    }
}

/// An activator that fails for a configured set of names and succeeds for
/// everything else.
#[derive(Debug, Clone)]
pub struct FailingActivator {
    fail_names: HashSet<String>,
}

impl FailingActivator {
    pub fn failing_for(names: &[&str]) -> Self {
        Self {
            fail_names: names.iter().map(|n| n.to_string()).collect(),
        }
    }
}

#[async_trait]
impl Activator for FailingActivator {
    async fn activate(&self, name: &str) -> Result<(), ActivationError> {
        if self.fail_names.contains(name) {
            return Err(ActivationError::Failed {
                name: name.to_string(),
                reason: "scripted failure".to_string(),
            });
        }
        Ok(())
    }
}

/// A stub step runner that always succeeds, optionally after a simulated
/// delay.
#[derive(Debug, Clone)]
pub struct StubStepRunner {
    delay: Duration,
}

impl StubStepRunner {
    /// Succeed immediately.
    pub fn instant() -> Self {
        Self {
            delay: Duration::ZERO,
        }
    }

    /// Succeed after sleeping for `delay`, simulating step latency.
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl StepRunner for StubStepRunner {
    async fn run(&self, _step: &str) -> Result<(), StepError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(())
    }
}

/// A step runner that fails for a configured set of steps and succeeds for
/// everything else.
#[derive(Debug, Clone)]
pub struct FailingStepRunner {
    fail_steps: HashSet<String>,
}

impl FailingStepRunner {
    pub fn failing_for(steps: &[&str]) -> Self {
        Self {
            fail_steps: steps.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[async_trait]
impl StepRunner for FailingStepRunner {
    async fn run(&self, step: &str) -> Result<(), StepError> {
        if self.fail_steps.contains(step) {
            return Err(StepError::Failed {
                step: step.to_string(),
                reason: "scripted failure".to_string(),
            });
        }
        Ok(())
    }
}

/// A preference source that fails for a configured set of names,
/// simulating an unavailable registry, and resolves everything else to an
/// empty set.
///
/// Note the distinction: an unknown name is an empty set, not an error;
/// this stub models the source itself breaking.
#[derive(Debug, Clone)]
pub struct FailingPreferenceSource {
    fail_names: HashSet<String>,
}

impl FailingPreferenceSource {
    pub fn failing_for(names: &[&str]) -> Self {
        Self {
            fail_names: names.iter().map(|n| n.to_string()).collect(),
        }
    }
}

#[async_trait]
impl PreferenceSource for FailingPreferenceSource {
    async fn preferences_for(&self, name: &str) -> Result<PreferenceSet, PreferenceError> {
        if self.fail_names.contains(name) {
            return Err(PreferenceError::SourceUnavailable(format!(
                "scripted failure for {name}"
            )));
        }
        Ok(PreferenceSet::new())
    }
}
