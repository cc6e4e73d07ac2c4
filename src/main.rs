// ABOUTME: Entry point for the muster binary.
// ABOUTME: Initializes tracing, seeds the agent directory from env config, and runs one activation pass.

mod config;

use std::sync::Arc;

use ulid::Ulid;

use muster_core::actor;
use muster_core::agent::ActivationStatus;
use muster_core::command::Command;
use muster_core::preference::PreferenceSource;
use muster_core::state::DirectoryState;
use muster_orchestrator::{DirectoryActivator, LoggingStepRunner, Orchestrator};

use crate::config::MusterConfig;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "muster=debug".parse().unwrap()),
        )
        .init();

    let config = match MusterConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(2);
        }
    };

    let directory = Arc::new(actor::spawn(Ulid::new(), DirectoryState::new()));
    tracing::info!(directory_id = %directory.directory_id, "muster starting up");

    for seed in &config.seed_agents {
        let result = directory
            .send_command(Command::RegisterAgent {
                name: seed.name.clone(),
                description: None,
                preferences: seed.preferences.clone(),
            })
            .await;
        if let Err(e) = result {
            tracing::warn!(agent = %seed.name, error = %e, "failed to register seed agent");
        }
    }

    let names: Vec<String> = config.seed_agents.iter().map(|s| s.name.clone()).collect();
    if names.is_empty() {
        tracing::info!("no seed agents configured; nothing to activate");
        return;
    }

    let orchestrator = Orchestrator::new(
        Arc::new(DirectoryActivator::new(Arc::clone(&directory))),
        Arc::clone(&directory) as Arc<dyn PreferenceSource>,
        Arc::new(LoggingStepRunner),
    );

    let records = orchestrator.activate_batch(&names).await;
    let active = records
        .iter()
        .filter(|r| r.status == ActivationStatus::Active)
        .count();

    match orchestrator.aggregate_preferences(&names).await {
        Ok(union) => {
            tracing::info!(
                agents = names.len(),
                active,
                preferences = ?union,
                "activation pass complete"
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "preference aggregation failed");
            std::process::exit(1);
        }
    }
}
