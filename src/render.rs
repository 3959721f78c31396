//! Terminal rendering helpers shared by the commands.

use colored::{ColoredString, Colorize};

use crate::domain::classify::{
    classify_compliance, classify_severity, classify_status, ComplianceClass, SeverityClass,
    StatusClass,
};
use crate::domain::hardware::HardwareFacts;
use crate::domain::merge::MergedNode;
use crate::domain::policy;
use crate::domain::stats::FleetStats;
use crate::domain::types::PolicyRecord;

pub fn paint_status(status: &str) -> ColoredString {
    let text = if status.is_empty() { "Unknown" } else { status };
    match classify_status(text) {
        StatusClass::Healthy => text.green().bold(),
        StatusClass::Unhealthy => text.red().bold(),
        StatusClass::Pending => text.yellow().bold(),
        StatusClass::Unknown => text.blue().bold(),
    }
}

pub fn paint_compliance(state: &str) -> ColoredString {
    let text = if state.is_empty() { "Unknown" } else { state };
    match classify_compliance(text) {
        ComplianceClass::Compliant => text.green().bold(),
        ComplianceClass::NonCompliant => text.red().bold(),
        ComplianceClass::Unknown => text.yellow().bold(),
    }
}

pub fn paint_severity(severity: &str) -> ColoredString {
    let text = if severity.is_empty() { "N/A" } else { severity };
    match classify_severity(text) {
        SeverityClass::High => text.red().bold(),
        SeverityClass::Medium => text.yellow().bold(),
        SeverityClass::Low => text.blue().bold(),
        SeverityClass::Default => text.normal(),
    }
}

/// 100% green, ≥95% yellow, below red — same thresholds the dashboard
/// used for the compliance tile.
pub fn paint_percent(percent: u32) -> ColoredString {
    let text = format!("{}%", percent);
    if percent == 100 {
        text.green().bold()
    } else if percent >= 95 {
        text.yellow().bold()
    } else {
        text.red().bold()
    }
}

pub fn or_na(value: &str) -> &str {
    if value.is_empty() {
        "N/A"
    } else {
        value
    }
}

pub fn section(title: &str) {
    println!("{}", format!("── {} ──", title).yellow());
}

pub fn kv(label: &str, value: &str) {
    println!("  {:<18} {}", format!("{}:", label).dimmed(), value);
}

pub fn print_fleet_stats(stats: &FleetStats) {
    println!("{}", "═══ Fleet Overview ═══".cyan().bold());
    println!(
        "  Hubs:        {}  ({} ready / {} not ready, {} healthy)",
        stats.total_hubs.to_string().bold(),
        stats.healthy_hubs,
        stats.total_hubs - stats.healthy_hubs,
        paint_percent(stats.health_rate)
    );
    println!("  Spokes:      {}", stats.total_spokes.to_string().bold());
    println!(
        "  Policies:    {}  ({} compliant / {} non-compliant)",
        stats.total_policies.to_string().bold(),
        stats.compliant_policies,
        stats.total_policies - stats.compliant_policies
    );
    println!(
        "  Compliance:  {}  ({}/{} policies)",
        paint_percent(stats.compliance_percent),
        stats.compliant_policies,
        stats.total_policies
    );
    println!();
}

/// One merged node card: status badge from the preferred slot, the
/// orchestration section when present, hardware from the inventory slot.
pub fn print_merged_node(node: &MergedNode) {
    let status = node
        .status_record()
        .map(|r| r.status.as_str())
        .unwrap_or_default();
    println!("  {} {}", node.hostname.bold(), paint_status(status));

    if let Some(k8s) = &node.orchestration {
        kv("Role", or_na(&k8s.role));
        kv("Kubelet", or_na(&k8s.kubelet_version));
        kv("OS", or_na(&k8s.os_image));
        kv("Kernel", or_na(&k8s.kernel_version));
        kv("Runtime", or_na(&k8s.container_runtime));
        kv("IP", or_na(&k8s.internal_ip));
    }

    if let Some(bmh) = node.hardware_record() {
        kv("CPU", or_na(&bmh.capacity.cpu));
        kv("RAM", or_na(&bmh.capacity.memory));
        kv("Storage", or_na(&bmh.capacity.storage));
        let facts = HardwareFacts::from_node(bmh);
        if !facts.is_empty() {
            if let Some(model) = facts.cpu_model {
                kv("CPU Model", model);
            }
            if let Some(bmc) = facts.bmc_address {
                kv("BMC", bmc);
            }
            if let Some(vendor) = facts.manufacturer {
                kv("Manufacturer", vendor);
            }
            if let Some(product) = facts.product_name {
                kv("Product", product);
            }
            if let Some(serial) = facts.serial_number {
                kv("Serial", serial);
            }
            if let Some(nics) = facts.nic_count {
                kv("NICs", nics);
            }
            for (i, disk) in &facts.disks {
                kv(&format!("Disk {}", i), disk);
            }
        }
    }
    println!();
}

/// One policy table line: short name, compliance, remediation, wave.
pub fn print_policy_line(policy: &PolicyRecord) {
    println!(
        "  {:<40} {:<14} {:<10} wave {}",
        policy::display_name(policy).bold(),
        paint_compliance(&policy.compliance_state),
        or_na(&policy.remediation_action),
        policy::wave_label(policy).unwrap_or("N/A")
    );
}

pub fn print_policy_detail(policy: &PolicyRecord) {
    kv("Full Name", &policy.name);
    kv("Namespace", or_na(&policy.namespace));
    println!("  {:<18} {}", "Severity:".dimmed(), paint_severity(&policy.severity));
    kv("Violations", &policy.violations.to_string());
    kv("Disabled", if policy.disabled { "Yes" } else { "No" });
    if let Some(message) = policy::latest_status_message(policy) {
        if let Some(ts) = policy::latest_status_timestamp(policy) {
            kv("Last Status At", ts);
        }
        println!("  {}", "Latest Status:".dimmed());
        for line in message.lines() {
            println!("    {}", line);
        }
    }
}

pub fn print_json<T: serde::Serialize>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}
