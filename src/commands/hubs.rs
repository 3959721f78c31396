//! `fleetmon hubs` — fleet overview across every hub.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use crate::client::FleetClient;
use crate::config;
use crate::domain::stats::{self, FleetStats};
use crate::domain::types::Hub;
use crate::render;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FleetOverview {
    stats: FleetStats,
    hubs: Vec<Hub>,
}

pub fn run(format: &str) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_async(format))
}

async fn run_async(format: &str) -> Result<()> {
    let cfg = config::load()?;
    let client = FleetClient::from_config(&cfg)?;
    let hubs = client.hubs().await?;
    let stats = FleetStats::compute(&hubs);

    if format == "json" {
        return render::print_json(&FleetOverview { stats, hubs });
    }

    render::print_fleet_stats(&stats);

    let (managed, unmanaged): (Vec<&Hub>, Vec<&Hub>) =
        hubs.iter().partition(|h| stats::hub_is_managed(h));

    if !managed.is_empty() {
        render::section("Managed Hubs");
        for hub in &managed {
            print_hub_summary(hub);
        }
    }

    render::section("Unmanaged Hubs");
    if unmanaged.is_empty() {
        println!(
            "  {} No unmanaged hubs. Register one with `fleetmon add-hub`.",
            "::".blue().bold()
        );
    } else {
        for hub in &unmanaged {
            print_hub_summary(hub);
        }
    }

    Ok(())
}

fn print_hub_summary(hub: &Hub) {
    println!("  {} {}", hub.name.bold(), render::paint_status(&hub.status));
    render::kv("OpenShift", render::or_na(&hub.cluster_info.openshift_version));
    render::kv("Kubernetes", render::or_na(&hub.version));
    if !hub.cluster_info.region.is_empty() {
        render::kv("Configuration", &hub.cluster_info.region);
    }
    render::kv("Nodes", &stats::hub_node_count(hub).to_string());
    render::kv("Policies", &hub.policies_info.len().to_string());
    render::kv("Spokes", &hub.managed_clusters.len().to_string());
    println!();
}
