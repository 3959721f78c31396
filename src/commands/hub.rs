//! `fleetmon hub <name>` — single-hub detail, tab by tab.

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;

use crate::client::FleetClient;
use crate::config;
use crate::domain::classify::{classify_compliance, ComplianceClass};
use crate::domain::merge;
use crate::domain::policy;
use crate::domain::stats;
use crate::domain::types::Hub;
use crate::render;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum Tab {
    #[default]
    Overview,
    Nodes,
    Policies,
    Spokes,
}

pub fn run(name: Option<String>, tab: Tab, format: &str) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_async(name, tab, format))
}

async fn run_async(name: Option<String>, tab: Tab, format: &str) -> Result<()> {
    let cfg = config::load()?;
    let name = cfg.resolve_hub(name.as_deref())?;
    let client = FleetClient::from_config(&cfg)?;
    let hub = client.hub(&name).await?;

    if format == "json" {
        return render::print_json(&hub);
    }

    println!(
        "{} {}   {} nodes, {} policies, {} spokes\n",
        hub.name.bold(),
        render::paint_status(&hub.status),
        stats::hub_node_count(&hub),
        hub.policies_info.len(),
        hub.managed_clusters.len()
    );

    match tab {
        Tab::Overview => print_overview(&hub),
        Tab::Nodes => print_nodes(&hub),
        Tab::Policies => print_policies(&hub),
        Tab::Spokes => print_spokes(&hub),
    }

    Ok(())
}

fn print_overview(hub: &Hub) {
    render::section("Cluster Information");
    render::kv("Name", &hub.name);
    render::kv("Kubernetes", render::or_na(&hub.version));
    render::kv("OpenShift", render::or_na(&hub.cluster_info.openshift_version));
    render::kv("Platform", render::or_na(&hub.cluster_info.platform));
    if !hub.cluster_info.region.is_empty() {
        render::kv("Configuration", &hub.cluster_info.region);
    }
    render::kv("Cluster ID", render::or_na(&hub.cluster_info.cluster_id));
    if !hub.cluster_info.console_url.is_empty() {
        render::kv("Console", &hub.cluster_info.console_url);
    }
    if !hub.cluster_info.gitops_url.is_empty() {
        render::kv("GitOps", &hub.cluster_info.gitops_url);
    }
    if let Some(created) = hub.created_at {
        render::kv("Created", &created.to_rfc3339());
    }
}

fn print_nodes(hub: &Hub) {
    let merged = merge::merge_nodes(&hub.nodes_info);
    if merged.is_empty() {
        println!("No node information available");
        return;
    }
    render::section(&format!("Nodes ({})", merged.len()));
    for node in &merged {
        render::print_merged_node(node);
    }
}

fn print_policies(hub: &Hub) {
    if hub.policies_info.is_empty() {
        println!("No policies found");
        return;
    }
    let sorted = policy::sort_by_wave(&hub.policies_info);
    let compliant = sorted
        .iter()
        .filter(|p| classify_compliance(&p.compliance_state) == ComplianceClass::Compliant)
        .count();
    render::section(&format!("Policies ({}/{} compliant)", compliant, sorted.len()));
    for policy in &sorted {
        render::print_policy_line(policy);
    }
}

fn print_spokes(hub: &Hub) {
    if hub.managed_clusters.is_empty() {
        println!("No spoke clusters found for this hub");
        return;
    }
    render::section(&format!("Spoke Clusters ({})", hub.managed_clusters.len()));
    for spoke in &hub.managed_clusters {
        let (compliant, total) = stats::spoke_policy_compliance(spoke);
        println!(
            "  {:<24} {:<12} {:<10} {:<14} nodes {:<3} policies {}/{}",
            spoke.name.bold(),
            render::paint_status(&spoke.status),
            render::or_na(&spoke.cluster_info.openshift_version),
            render::or_na(&spoke.cluster_info.region),
            stats::spoke_node_count(spoke),
            compliant,
            total
        );
    }
}
