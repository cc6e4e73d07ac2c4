// ABOUTME: Result types for workflow step execution.
// ABOUTME: Steps are independent named units of work with no ordering constraints between them.

use serde::{Deserialize, Serialize};

/// Outcome of running a single workflow step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Success,
    Failed,
}

/// One entry of a `run_steps` result, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StepResult {
    pub step: String,
    pub status: StepStatus,
}

impl StepResult {
    pub fn success(step: impl Into<String>) -> Self {
        Self {
            step: step.into(),
            status: StepStatus::Success,
        }
    }

    pub fn failed(step: impl Into<String>) -> Self {
        Self {
            step: step.into(),
            status: StepStatus::Failed,
        }
    }
}
