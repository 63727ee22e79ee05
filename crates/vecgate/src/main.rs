//! vecgate - Entry Point
//!
//! Binary entry point. Lives in the `vecgate` facade crate so every linked
//! provider is registered before the registry is read.

// Force-link vecgate-providers to ensure linkme registrations are included
extern crate vecgate_providers;

use clap::Parser;
use vecgate::cli::{Cli, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run(Cli::parse()).await
}
