//! `fleetmon policies` — wave-sorted, filtered policy table for a hub
//! or one of its spokes.

use anyhow::Result;

use colored::Colorize;

use crate::client::{ClientError, FleetClient};
use crate::config;
use crate::domain::classify::{classify_compliance, ComplianceClass};
use crate::domain::filter::{
    apply_policy_filter, policy_rows, ComplianceSelection, PolicyFilter,
};
use crate::domain::policy;
use crate::domain::types::PolicyRecord;
use crate::render;

pub struct PoliciesArgs {
    pub hub: Option<String>,
    pub spoke: Option<String>,
    pub name: Option<String>,
    pub compliance: ComplianceSelection,
    pub details: bool,
    pub format: String,
}

pub fn run(args: PoliciesArgs) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_async(args))
}

async fn run_async(args: PoliciesArgs) -> Result<()> {
    let cfg = config::load()?;
    let hub = cfg.resolve_hub(args.hub.as_deref())?;
    let client = FleetClient::from_config(&cfg)?;

    // Spoke-scoped policies come from the hub's cluster list; a name
    // absent from the fetched set is the distinct "not found" error.
    let policies: Vec<PolicyRecord> = match &args.spoke {
        Some(spoke_name) => {
            let spokes = client.hub_clusters(&hub).await?;
            spokes
                .into_iter()
                .find(|s| &s.name == spoke_name)
                .ok_or_else(|| ClientError::not_found("cluster", spoke_name))?
                .policies_info
        }
        None => client.hub(&hub).await?.policies_info,
    };

    let sorted = policy::sort_by_wave(&policies);
    let filter = PolicyFilter {
        name: args.name.unwrap_or_default(),
        compliance: args.compliance,
    };
    let rows = policy_rows(&policies);
    let outcome = apply_policy_filter(&filter, &rows);

    if args.format == "json" {
        let visible: Vec<&PolicyRecord> = sorted
            .iter()
            .zip(&outcome.visible)
            .filter_map(|(p, v)| v.then_some(p))
            .collect();
        return render::print_json(&visible);
    }

    let compliant = sorted
        .iter()
        .filter(|p| classify_compliance(&p.compliance_state) == ComplianceClass::Compliant)
        .count();
    render::section(&format!(
        "Policy Compliance: {}/{}",
        compliant,
        sorted.len()
    ));

    for (idx, policy) in sorted.iter().enumerate() {
        if !outcome.visible[idx] {
            continue;
        }
        render::print_policy_line(policy);
        if args.details {
            render::print_policy_detail(policy);
            println!();
        }
    }

    println!();
    println!("{}", outcome.summary("policy", "policies").dimmed());
    Ok(())
}
