//! `fleetmon spokes` — filtered spoke cluster table for one hub.
//!
//! The filter flags feed the same predicate engine the interactive
//! dashboard used: conjunctive case-insensitive substring matches, with
//! a "Showing N of M" footer, and an expanded detail panel that is
//! force-hidden whenever its parent row is filtered out.

use anyhow::Result;
use colored::Colorize;

use crate::client::{ClientError, FleetClient};
use crate::config;
use crate::domain::filter::{apply_spoke_filter, SpokeFilter, SpokeRow};
use crate::domain::hardware::HardwareFacts;
use crate::domain::policy;
use crate::domain::stats;
use crate::domain::types::Spoke;
use crate::render;

pub struct SpokesArgs {
    pub hub: Option<String>,
    pub name: Option<String>,
    pub version: Option<String>,
    pub configuration: Option<String>,
    pub expand: Option<String>,
    pub format: String,
}

pub fn run(args: SpokesArgs) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_async(args))
}

async fn run_async(args: SpokesArgs) -> Result<()> {
    let cfg = config::load()?;
    let hub = cfg.resolve_hub(args.hub.as_deref())?;
    let client = FleetClient::from_config(&cfg)?;
    let spokes = client.hub_clusters(&hub).await?;

    if let Some(expand) = &args.expand {
        if !spokes.iter().any(|s| &s.name == expand) {
            return Err(ClientError::not_found("cluster", expand).into());
        }
    }

    let filter = SpokeFilter {
        name: args.name.unwrap_or_default(),
        version: args.version.unwrap_or_default(),
        configuration: args.configuration.unwrap_or_default(),
    };
    let rows: Vec<SpokeRow> = spokes
        .iter()
        .map(|s| SpokeRow::new(s, args.expand.as_deref() == Some(s.name.as_str())))
        .collect();
    let outcome = apply_spoke_filter(&filter, &rows);

    if args.format == "json" {
        let visible: Vec<&Spoke> = spokes
            .iter()
            .zip(&outcome.visible)
            .filter_map(|(s, v)| v.then_some(s))
            .collect();
        return render::print_json(&visible);
    }

    for (idx, spoke) in spokes.iter().enumerate() {
        if !outcome.visible[idx] {
            continue;
        }
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
        if outcome.detail_visible(idx, rows[idx].expanded) {
            print_spoke_detail(spoke);
        }
    }

    println!();
    println!(
        "{}",
        outcome.summary("spoke cluster", "spoke clusters").dimmed()
    );
    Ok(())
}

fn print_spoke_detail(spoke: &Spoke) {
    render::kv("Kubernetes", render::or_na(&spoke.version));
    render::kv("Platform", render::or_na(&spoke.cluster_info.platform));
    render::kv("Hub", render::or_na(&spoke.hub_name));

    if !spoke.nodes_info.is_empty() {
        println!("    {}", "Hardware Inventory".dimmed());
        for node in &spoke.nodes_info {
            let facts = HardwareFacts::from_node(node);
            println!(
                "      cpu {}  ram {}  storage {}  ip {}",
                render::or_na(&node.capacity.cpu),
                render::or_na(&node.capacity.memory),
                render::or_na(&node.capacity.storage),
                render::or_na(&node.internal_ip)
            );
            if let Some(bmc) = facts.bmc_address {
                println!("      bmc {}", bmc);
            }
            if let Some(serial) = facts.serial_number {
                println!("      serial {}", serial);
            }
        }
    }

    if !spoke.policies_info.is_empty() {
        let (compliant, total) = stats::spoke_policy_compliance(spoke);
        println!(
            "    {}",
            format!("Policies ({} total, {} compliant)", total, compliant).dimmed()
        );
        for policy in policy::sort_by_wave(&spoke.policies_info) {
            render::print_policy_line(&policy);
        }
    }
}
