//! `fleetmon policy yaml` / `fleetmon policy enforce`
//!
//! The write path: download a policy manifest, or create a remediation
//! resource (CGU) to enforce a non-compliant policy. Enforcement asks
//! for confirmation and reports the server's verdict once — no retry.

use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;

use super::confirm;
use crate::client::{CguRequest, FleetClient};
use crate::config;

pub fn yaml(namespace: &str, name: &str, hub: Option<&str>, output: Option<PathBuf>) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(yaml_async(namespace, name, hub, output))
}

async fn yaml_async(
    namespace: &str,
    name: &str,
    hub: Option<&str>,
    output: Option<PathBuf>,
) -> Result<()> {
    let cfg = config::load()?;
    let client = FleetClient::from_config(&cfg)?;
    let manifest = client.policy_yaml(namespace, name, hub).await?;

    let path = output.unwrap_or_else(|| PathBuf::from(&manifest.filename));
    std::fs::write(&path, &manifest.content)?;
    println!("{} Saved {}", "ok".green().bold(), path.display());
    Ok(())
}

pub fn enforce(hub: &str, cluster: &str, policy_name: &str, yes: bool) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(enforce_async(hub, cluster, policy_name, yes))
}

async fn enforce_async(hub: &str, cluster: &str, policy_name: &str, yes: bool) -> Result<()> {
    if !yes {
        println!("Create a remediation (CGU) to enforce this policy?");
        println!("  Hub:     {}", hub.bold());
        println!("  Cluster: {}", cluster.bold());
        println!("  Policy:  {}", policy_name.bold());
        if !confirm("Proceed? [y/N] ")? {
            println!("Aborted.");
            return Ok(());
        }
    }

    let cfg = config::load()?;
    let client = FleetClient::from_config(&cfg)?;
    // The policy namespace is the cluster namespace for spoke policies.
    let req = CguRequest {
        cluster_name: cluster.to_string(),
        policy_name: policy_name.to_string(),
        namespace: cluster.to_string(),
        hub_name: hub.to_string(),
    };

    match client.create_cgu(&req).await {
        Ok(resp) => {
            println!("{} Remediation created", "ok".green().bold());
            println!("  CGU:       {}", resp.cgu_name);
            println!("  Namespace: {}", resp.namespace);
            println!("  Cluster:   {}", resp.cluster);
            println!("  Policy:    {}", resp.policy);
            Ok(())
        }
        Err(e) => {
            eprintln!("{} Failed to create remediation: {}", "!!".red().bold(), e);
            std::process::exit(1);
        }
    }
}
