//! Fleet-wide aggregate statistics.
//!
//! Everything here is recomputed from scratch on every call from the
//! full hub tree; there is no incremental state to get stale.

use serde::Serialize;

use super::classify::{classify_compliance, classify_status, ComplianceClass, StatusClass};
use super::merge::merged_node_count;
use super::types::{Hub, Spoke};

/// Fleet summary numbers for the hubs overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetStats {
    pub total_hubs: usize,
    pub healthy_hubs: usize,
    pub total_spokes: usize,
    pub total_policies: usize,
    pub compliant_policies: usize,
    /// Rounded percentage; 0 when there are no policies at all.
    pub compliance_percent: u32,
    /// Rounded percentage of healthy hubs; 0 when there are no hubs.
    pub health_rate: u32,
}

impl FleetStats {
    pub fn compute(hubs: &[Hub]) -> Self {
        let total_hubs = hubs.len();
        let healthy_hubs = hubs
            .iter()
            .filter(|h| classify_status(&h.status) == StatusClass::Healthy)
            .count();
        let total_spokes: usize = hubs.iter().map(|h| h.managed_clusters.len()).sum();

        // Policies count per occurrence across hubs and their spokes;
        // the same policy on two clusters counts twice.
        let mut total_policies = 0;
        let mut compliant_policies = 0;
        for hub in hubs {
            let hub_policies = hub.policies_info.iter().chain(
                hub.managed_clusters
                    .iter()
                    .flat_map(|s| s.policies_info.iter()),
            );
            for policy in hub_policies {
                total_policies += 1;
                if classify_compliance(&policy.compliance_state) == ComplianceClass::Compliant {
                    compliant_policies += 1;
                }
            }
        }

        Self {
            total_hubs,
            healthy_hubs,
            total_spokes,
            total_policies,
            compliant_policies,
            compliance_percent: percent(compliant_policies, total_policies),
            health_rate: percent(healthy_hubs, total_hubs),
        }
    }
}

fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u32
}

/// Node count shown for a hub: merged (distinct hostnames), not raw.
pub fn hub_node_count(hub: &Hub) -> usize {
    merged_node_count(&hub.nodes_info)
}

pub fn spoke_node_count(spoke: &Spoke) -> usize {
    merged_node_count(&spoke.nodes_info)
}

/// Hubs added by hand carry a `source: manual` annotation and are listed
/// separately from the automatically discovered ones.
pub fn hub_is_managed(hub: &Hub) -> bool {
    hub.annotations.get("source").map(String::as_str) != Some("manual")
}

/// (compliant, total) policy pair for one spoke's badge.
pub fn spoke_policy_compliance(spoke: &Spoke) -> (usize, usize) {
    let compliant = spoke
        .policies_info
        .iter()
        .filter(|p| classify_compliance(&p.compliance_state) == ComplianceClass::Compliant)
        .count();
    (compliant, spoke.policies_info.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::PolicyRecord;

    fn policy(state: &str) -> PolicyRecord {
        serde_json::from_value(serde_json::json!({
            "name": "ztp.group.policy",
            "namespace": "ns",
            "complianceState": state,
        }))
        .unwrap()
    }

    fn hub(status: &str) -> Hub {
        serde_json::from_value(serde_json::json!({
            "name": "hub1",
            "status": status,
        }))
        .unwrap()
    }

    fn spoke_with_policies(states: &[&str]) -> Spoke {
        let mut spoke: Spoke = serde_json::from_value(serde_json::json!({
            "name": "spoke1",
            "status": "Ready",
        }))
        .unwrap();
        spoke.policies_info = states.iter().map(|s| policy(s)).collect();
        spoke
    }

    #[test]
    fn spoke_policies_count_toward_fleet_totals() {
        let mut h = hub("Ready");
        h.managed_clusters = vec![spoke_with_policies(&["Compliant"])];
        let stats = FleetStats::compute(&[h]);
        assert_eq!(stats.total_hubs, 1);
        assert_eq!(stats.healthy_hubs, 1);
        assert_eq!(stats.total_spokes, 1);
        assert_eq!(stats.total_policies, 1);
        assert_eq!(stats.compliant_policies, 1);
        assert_eq!(stats.compliance_percent, 100);
        assert_eq!(stats.health_rate, 100);
    }

    #[test]
    fn empty_fleet_divides_to_zero() {
        let stats = FleetStats::compute(&[]);
        assert_eq!(stats.compliance_percent, 0);
        assert_eq!(stats.health_rate, 0);
        assert_eq!(stats.total_policies, 0);
    }

    #[test]
    fn policies_are_not_deduplicated_across_clusters() {
        let mut h = hub("Ready");
        h.policies_info = vec![policy("Compliant")];
        h.managed_clusters = vec![
            spoke_with_policies(&["Compliant", "NonCompliant"]),
            spoke_with_policies(&["Compliant"]),
        ];
        let stats = FleetStats::compute(&[h]);
        assert_eq!(stats.total_policies, 4);
        assert_eq!(stats.compliant_policies, 3);
        assert_eq!(stats.compliance_percent, 75);
    }

    #[test]
    fn notready_hub_is_not_healthy() {
        let stats = FleetStats::compute(&[hub("Ready"), hub("NotReady")]);
        assert_eq!(stats.healthy_hubs, 1);
        assert_eq!(stats.health_rate, 50);
    }

    #[test]
    fn hub_node_count_uses_merged_hostnames() {
        let mut h = hub("Ready");
        h.nodes_info = vec![
            serde_json::from_value(serde_json::json!({
                "name": "node1.example.com",
                "annotations": {"data-source": "Node"}
            }))
            .unwrap(),
            serde_json::from_value(serde_json::json!({
                "name": "node1",
                "annotations": {"data-source": "BMH"}
            }))
            .unwrap(),
        ];
        assert_eq!(hub_node_count(&h), 1);
    }

    #[test]
    fn manual_source_annotation_marks_a_hub_unmanaged() {
        let mut manual = hub("Ready");
        manual
            .annotations
            .insert("source".to_string(), "manual".to_string());
        assert!(!hub_is_managed(&manual));
        assert!(hub_is_managed(&hub("Ready")));
    }

    #[test]
    fn spoke_compliance_pair() {
        let spoke = spoke_with_policies(&["Compliant", "NonCompliant", "Compliant"]);
        assert_eq!(spoke_policy_compliance(&spoke), (2, 3));
    }
}
