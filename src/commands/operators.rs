//! `fleetmon operators` — operators installed on one spoke cluster.
//!
//! Operator inventory is fetched lazily through the spoke's hub; an
//! unreachable spoke kubeconfig yields an empty list, not an error.

use anyhow::Result;
use colored::{ColoredString, Colorize};

use crate::client::FleetClient;
use crate::config;
use crate::domain::filter::{apply_operator_filter, OperatorFilter, OperatorRow};
use crate::domain::types::OperatorRecord;
use crate::render;

pub struct OperatorsArgs {
    pub hub: Option<String>,
    pub spoke: String,
    pub name: Option<String>,
    pub format: String,
}

pub fn run(args: OperatorsArgs) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_async(args))
}

async fn run_async(args: OperatorsArgs) -> Result<()> {
    let cfg = config::load()?;
    let hub = cfg.resolve_hub(args.hub.as_deref())?;
    let client = FleetClient::from_config(&cfg)?;
    let operators = client.spoke_operators(&hub, &args.spoke).await?;

    let filter = OperatorFilter {
        name: args.name.unwrap_or_default(),
    };
    let rows: Vec<OperatorRow> = operators.iter().map(OperatorRow::new).collect();
    let outcome = apply_operator_filter(&filter, &rows);

    if args.format == "json" {
        let visible: Vec<&OperatorRecord> = operators
            .iter()
            .zip(&outcome.visible)
            .filter_map(|(o, v)| v.then_some(o))
            .collect();
        return render::print_json(&visible);
    }

    if operators.is_empty() {
        println!("No operators found");
        return Ok(());
    }

    render::section(&format!("Operators on {}", args.spoke));
    for (idx, operator) in operators.iter().enumerate() {
        if !outcome.visible[idx] {
            continue;
        }
        print_operator_line(operator);
    }

    println!();
    println!("{}", outcome.summary("operator", "operators").dimmed());
    Ok(())
}

fn print_operator_line(operator: &OperatorRecord) {
    let shown = if operator.display_name.is_empty() {
        &operator.name
    } else {
        &operator.display_name
    };
    println!(
        "  {:<36} {:<14} {:<24} {:<12} {}",
        shown.bold(),
        render::or_na(&operator.version),
        render::or_na(&operator.namespace),
        paint_phase(&operator.phase),
        render::or_na(&operator.provider)
    );
    if !operator.display_name.is_empty() && operator.name != operator.display_name {
        println!("    {}", operator.name.dimmed());
    }
}

/// A CSV is healthy only in the Succeeded phase.
fn paint_phase(phase: &str) -> ColoredString {
    if phase.eq_ignore_ascii_case("succeeded") {
        phase.green().bold()
    } else if phase.is_empty() {
        "Unknown".red().bold()
    } else {
        phase.red().bold()
    }
}
