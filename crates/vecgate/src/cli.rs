//! Command line interface
//!
//! `vecgate providers` lists what this binary can select; `vecgate check`
//! loads the configuration, resolves the backend once and runs its health
//! check.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use vecgate_application::ports::registry::BackendRegistry;
use vecgate_domain::error::Result;
use vecgate_domain::ports::providers::VectorStoreAdmin;
use vecgate_domain::value_objects::BackendKind;
use vecgate_infrastructure::config::{AppConfig, ConfigLoader};
use vecgate_infrastructure::logging::{init_logging, log_health_check};
use vecgate_infrastructure::VectorDbContext;

/// Command line interface for vecgate
#[derive(Parser, Debug)]
#[command(name = "vecgate")]
#[command(about = "vecgate - Lazily selected vector database backends")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// List the vector store providers linked into this binary
    Providers,
    /// Resolve the configured backend and run its health check
    Check {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Result of a successful `check`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The backend was constructed and answered its health check
    Healthy(BackendKind),
    /// Configuration turns the vector database off
    Disabled,
}

/// Selectable backends as `(identifier, description)`, `disabled` last
pub fn provider_listing(registry: &BackendRegistry) -> Vec<(String, String)> {
    let mut rows: Vec<(String, String)> = registry
        .list()
        .into_iter()
        .map(|(kind, description)| (kind.to_string(), description))
        .collect();
    rows.push((
        BackendKind::Disabled.to_string(),
        "No vector database; every operation fails".to_string(),
    ));
    rows
}

/// Load configuration from `path`, or from the default locations
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let loader = match path {
        Some(path) => ConfigLoader::new().with_config_path(path),
        None => ConfigLoader::new(),
    };
    loader.load()
}

/// Select the configured backend and health-check it
///
/// A disabled backend is reported as [`CheckOutcome::Disabled`], not as an
/// error.
pub async fn check(context: &VectorDbContext) -> Result<CheckOutcome> {
    let backend = context.backend().await?;
    if backend.is_disabled() {
        return Ok(CheckOutcome::Disabled);
    }

    let component = backend.kind().as_str();
    match context.client().health_check().await {
        Ok(()) => {
            log_health_check(component, true, None);
            Ok(CheckOutcome::Healthy(backend.kind()))
        }
        Err(e) => {
            log_health_check(component, false, Some(&e.to_string()));
            Err(e)
        }
    }
}

/// Run a parsed command line
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Providers => {
            for (name, description) in provider_listing(&BackendRegistry::linked()) {
                println!("{name:<12} {description}");
            }
        }
        Command::Check { config } => {
            let app_config =
                load_config(config.as_deref()).context("Failed to load configuration")?;
            init_logging(&app_config.logging).context("Failed to initialize logging")?;

            let context = VectorDbContext::from_config(&app_config);
            match check(&context)
                .await
                .with_context(|| format!("Backend '{}' failed", app_config.vector_db.backend))?
            {
                CheckOutcome::Healthy(kind) => println!("{kind}: healthy"),
                CheckOutcome::Disabled => println!("vector database disabled"),
            }
        }
    }
    Ok(())
}
