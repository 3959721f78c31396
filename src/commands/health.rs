//! `fleetmon health` — backend health, readiness and liveness probes.

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;

use crate::client::FleetClient;
use crate::config;
use crate::render;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum Probe {
    #[default]
    Health,
    Ready,
    Live,
}

pub fn run(probe: Probe, format: &str) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_async(probe, format))
}

async fn run_async(probe: Probe, format: &str) -> Result<()> {
    let cfg = config::load()?;
    let client = FleetClient::from_config(&cfg)?;
    let health = match probe {
        Probe::Health => client.health().await?,
        Probe::Ready => client.ready().await?,
        Probe::Live => client.live().await?,
    };

    if format == "json" {
        return render::print_json(&health);
    }

    println!(
        "{} backend {} (version {}, at {})",
        "ok".green().bold(),
        health.status,
        render::or_na(&health.version),
        render::or_na(&health.timestamp)
    );
    Ok(())
}
