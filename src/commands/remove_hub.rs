//! `fleetmon remove-hub` — deregister an external hub.
//!
//! Deletes the hub's stored kubeconfig secret on the backend. The hub
//! cluster itself is untouched; it simply stops being monitored.

use anyhow::{bail, Result};
use colored::Colorize;

use super::confirm;
use crate::client::{is_valid_hub_name, FleetClient};
use crate::config;

pub fn run(name: &str, yes: bool) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_async(name, yes))
}

async fn run_async(name: &str, yes: bool) -> Result<()> {
    if !is_valid_hub_name(name) {
        bail!(
            "invalid hub name '{}': must be lowercase alphanumeric with hyphens",
            name
        );
    }

    if !yes {
        println!("Remove hub {} and its stored credentials?", name.bold());
        if !confirm("Proceed? [y/N] ")? {
            println!("Aborted.");
            return Ok(());
        }
    }

    let cfg = config::load()?;
    let client = FleetClient::from_config(&cfg)?;
    match client.remove_hub(name).await {
        Ok(message) => {
            if message.is_empty() {
                println!("{} Hub {} removed", "ok".green().bold(), name);
            } else {
                println!("{} {}", "ok".green().bold(), message);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("{} Failed to remove hub: {}", "!!".red().bold(), e);
            std::process::exit(1);
        }
    }
}
