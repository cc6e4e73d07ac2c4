// ABOUTME: The StepRunner seam for executing independent workflow steps.
// ABOUTME: Steps have no declared dependencies; a graph-aware runner can slot in behind the same trait.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from running a single workflow step.
#[derive(Debug, Error)]
pub enum StepError {
    #[error("step {step} failed: {reason}")]
    Failed { step: String, reason: String },
}

/// Executes one named workflow step.
///
/// `run_steps` invokes one call per step concurrently; calls must not
/// observe each other's state.
#[async_trait]
pub trait StepRunner: Send + Sync {
    async fn run(&self, step: &str) -> Result<(), StepError>;
}

/// Default runner: logs the step and reports success.
#[derive(Debug, Clone, Default)]
pub struct LoggingStepRunner;

#[async_trait]
impl StepRunner for LoggingStepRunner {
    async fn run(&self, step: &str) -> Result<(), StepError> {
        tracing::info!(step = %step, "step executed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn logging_runner_always_succeeds() {
        let runner = LoggingStepRunner;
        runner.run("database_migration").await.unwrap();
        runner.run("backend_api").await.unwrap();
    }
}
