// ABOUTME: Batch orchestration for muster: concurrent agent activation, preference aggregation, and step execution.
// ABOUTME: All batch operations run their units as independent concurrent tasks with wait-for-all semantics.

pub mod activation;
pub mod orchestrator;
pub mod steps;
pub mod testing;

pub use activation::{ActivationError, Activator, DirectoryActivator};
pub use orchestrator::Orchestrator;
pub use steps::{LoggingStepRunner, StepError, StepRunner};
