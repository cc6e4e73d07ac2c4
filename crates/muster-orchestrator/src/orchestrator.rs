// ABOUTME: The Orchestrator: batch activation, preference aggregation, and step execution.
// ABOUTME: Each batch runs its units concurrently and returns only after every unit has completed.

use std::sync::Arc;

use futures::future::join_all;
use ulid::Ulid;

use muster_core::agent::ActivationRecord;
use muster_core::preference::{PreferenceError, PreferenceSet, PreferenceSource};
use muster_core::step::StepResult;

use crate::activation::Activator;
use crate::steps::StepRunner;

/// Coordinates batches of named agents: activation, preference
/// aggregation, and workflow step execution.
///
/// All three collaborators are injected seams, so the orchestrator itself
/// carries no policy about where agents come from or what a step does.
pub struct Orchestrator {
    activator: Arc<dyn Activator>,
    preferences: Arc<dyn PreferenceSource>,
    steps: Arc<dyn StepRunner>,
}

impl Orchestrator {
    pub fn new(
        activator: Arc<dyn Activator>,
        preferences: Arc<dyn PreferenceSource>,
        steps: Arc<dyn StepRunner>,
    ) -> Self {
        Self {
            activator,
            preferences,
            steps,
        }
    }

    /// Activate every named agent concurrently and wait for all of them.
    ///
    /// Returns one record per input name, duplicates included. A failing
    /// activator yields a `failed` record for that name; the batch itself
    /// never aborts, so the result always covers the full input.
    pub async fn activate_batch(&self, names: &[String]) -> Vec<ActivationRecord> {
        let batch_id = Ulid::new();
        tracing::info!(batch_id = %batch_id, count = names.len(), "activating agent batch");

        let units = names.iter().map(|name| {
            let activator = Arc::clone(&self.activator);
            let name = name.clone();
            async move {
                match activator.activate(&name).await {
                    Ok(()) => ActivationRecord::active(name),
                    Err(e) => {
                        tracing::warn!(batch_id = %batch_id, agent = %name, error = %e, "activation failed");
                        ActivationRecord::failed(name)
                    }
                }
            }
        });

        let records = join_all(units).await;
        tracing::info!(batch_id = %batch_id, count = records.len(), "agent batch complete");
        records
    }

    /// Resolve every agent's preference set concurrently and union them.
    ///
    /// Unknown names contribute an empty set. A failure of the lookup
    /// source itself fails the whole call.
    pub async fn aggregate_preferences(
        &self,
        names: &[String],
    ) -> Result<PreferenceSet, PreferenceError> {
        let units = names.iter().map(|name| {
            let source = Arc::clone(&self.preferences);
            let name = name.clone();
            async move { source.preferences_for(&name).await }
        });

        let mut union = PreferenceSet::new();
        for result in join_all(units).await {
            union.extend(result?);
        }
        Ok(union)
    }

    /// Run every named step concurrently and wait for all of them.
    ///
    /// Steps are independent; no ordering is imposed between them. Returns
    /// one result per input step, in input order.
    pub async fn run_steps(&self, step_names: &[String]) -> Vec<StepResult> {
        let batch_id = Ulid::new();
        tracing::info!(batch_id = %batch_id, count = step_names.len(), "running workflow steps");

        let units = step_names.iter().map(|step| {
            let runner = Arc::clone(&self.steps);
            let step = step.clone();
            async move {
                match runner.run(&step).await {
                    Ok(()) => StepResult::success(step),
                    Err(e) => {
                        tracing::warn!(batch_id = %batch_id, step = %step, error = %e, "step failed");
                        StepResult::failed(step)
                    }
                }
            }
        });

        join_all(units).await
    }
}
