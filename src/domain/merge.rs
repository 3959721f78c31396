//! Node merge engine.
//!
//! A physical machine usually shows up twice in a snapshot: once as the
//! orchestration-layer node object and once as the hardware-inventory
//! (bare-metal host) object. Both carry the same hostname prefix, so we
//! group records by the name truncated at the first `.` and collapse
//! each group into one [`MergedNode`] with a slot per origin.

use std::collections::HashMap;

use serde::Serialize;
use tracing::warn;

use super::types::NodeRecord;

/// Which underlying object a node record came from. Decided once at
/// ingestion from the `data-source` annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NodeOrigin {
    /// The orchestration-layer node object (`data-source: Node`).
    Orchestration,
    /// The hardware-inventory object (any other value, or none).
    Inventory,
}

pub fn origin_of(record: &NodeRecord) -> NodeOrigin {
    match record.annotations.get("data-source").map(String::as_str) {
        Some("Node") => NodeOrigin::Orchestration,
        _ => NodeOrigin::Inventory,
    }
}

/// Grouping key: the record name truncated at the first `.`.
pub fn hostname(name: &str) -> &str {
    name.split('.').next().unwrap_or(name)
}

/// One logical node, assembled from up to two source records.
#[derive(Debug, Clone, Serialize)]
pub struct MergedNode {
    pub hostname: String,
    pub full_name: String,
    pub orchestration: Option<NodeRecord>,
    pub inventory: Option<NodeRecord>,
}

impl MergedNode {
    fn new(hostname: &str, full_name: &str) -> Self {
        Self {
            hostname: hostname.to_string(),
            full_name: full_name.to_string(),
            orchestration: None,
            inventory: None,
        }
    }

    /// The record whose status the node badge shows: whichever slot is
    /// non-empty, preferring orchestration.
    pub fn status_record(&self) -> Option<&NodeRecord> {
        self.orchestration.as_ref().or(self.inventory.as_ref())
    }

    /// Hardware facts always read from the inventory slot when present,
    /// regardless of which slot supplied the status.
    pub fn hardware_record(&self) -> Option<&NodeRecord> {
        self.inventory.as_ref()
    }
}

/// Collapse raw node records into one [`MergedNode`] per distinct
/// hostname prefix, in first-seen key order. A node with a single
/// source record still yields a valid merge with one empty slot.
///
/// Two records of the same origin for one hostname signal an upstream
/// data problem; the collision is logged and the later record wins.
pub fn merge_nodes(records: &[NodeRecord]) -> Vec<MergedNode> {
    let mut merged: Vec<MergedNode> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let key = hostname(&record.name);
        let slot_idx = match index.get(key) {
            Some(&i) => i,
            None => {
                index.insert(key.to_string(), merged.len());
                merged.push(MergedNode::new(key, &record.name));
                merged.len() - 1
            }
        };

        let node = &mut merged[slot_idx];
        match origin_of(record) {
            NodeOrigin::Orchestration => {
                if node.orchestration.is_some() {
                    warn!(
                        hostname = %node.hostname,
                        "duplicate orchestration record for node, keeping the later one"
                    );
                }
                node.orchestration = Some(record.clone());
            }
            NodeOrigin::Inventory => {
                if node.inventory.is_some() {
                    warn!(
                        hostname = %node.hostname,
                        "duplicate inventory record for node, keeping the later one"
                    );
                }
                node.inventory = Some(record.clone());
            }
        }
    }

    merged
}

/// Count of distinct hostname prefixes — the node count shown per hub,
/// not the raw record count.
pub fn merged_node_count(records: &[NodeRecord]) -> usize {
    let mut seen: Vec<&str> = records.iter().map(|r| hostname(&r.name)).collect();
    seen.sort_unstable();
    seen.dedup();
    seen.len()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn record(name: &str, source: Option<&str>) -> NodeRecord {
        let mut annotations = HashMap::new();
        if let Some(s) = source {
            annotations.insert("data-source".to_string(), s.to_string());
        }
        NodeRecord {
            name: name.to_string(),
            status: "Ready".to_string(),
            role: String::new(),
            internal_ip: String::new(),
            external_ip: String::new(),
            kernel_version: String::new(),
            os_image: String::new(),
            container_runtime: String::new(),
            kubelet_version: String::new(),
            conditions: Vec::new(),
            capacity: Default::default(),
            allocatable: Default::default(),
            labels: HashMap::new(),
            annotations,
            created_at: None,
        }
    }

    #[test]
    fn k8s_and_bmh_records_merge_into_one_node() {
        let records = vec![
            record("node1.example.com", Some("Node")),
            record("node1", Some("BMH")),
        ];
        let merged = merge_nodes(&records);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].hostname, "node1");
        assert!(merged[0].orchestration.is_some());
        assert!(merged[0].inventory.is_some());
    }

    #[test]
    fn missing_data_source_lands_in_inventory_slot() {
        let records = vec![record("node2", None)];
        let merged = merge_nodes(&records);
        assert_eq!(merged.len(), 1);
        assert!(merged[0].orchestration.is_none());
        assert!(merged[0].inventory.is_some());
    }

    #[test]
    fn first_seen_order_is_preserved() {
        let records = vec![
            record("charlie.example.com", Some("Node")),
            record("alpha.example.com", Some("Node")),
            record("charlie", Some("BMH")),
            record("bravo", Some("BMH")),
        ];
        let merged = merge_nodes(&records);
        let order: Vec<&str> = merged.iter().map(|m| m.hostname.as_str()).collect();
        assert_eq!(order, ["charlie", "alpha", "bravo"]);
    }

    #[test]
    fn same_slot_collision_keeps_the_later_record() {
        let mut a = record("node1.example.com", Some("Node"));
        a.role = "master".to_string();
        let mut b = record("node1.example.com", Some("Node"));
        b.role = "worker".to_string();
        let merged = merge_nodes(&[a, b]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].orchestration.as_ref().unwrap().role, "worker");
    }

    #[test]
    fn status_prefers_orchestration_slot() {
        let mut k8s = record("node1.example.com", Some("Node"));
        k8s.status = "Ready".to_string();
        let mut bmh = record("node1", Some("BMH"));
        bmh.status = "Provisioned".to_string();
        let merged = merge_nodes(&[bmh, k8s]);
        assert_eq!(merged[0].status_record().unwrap().status, "Ready");
    }

    #[test]
    fn merged_count_is_distinct_hostnames() {
        let records = vec![
            record("node1.example.com", Some("Node")),
            record("node1", Some("BMH")),
            record("node2.example.com", Some("Node")),
        ];
        assert_eq!(merged_node_count(&records), 2);
        assert_eq!(merged_node_count(&[]), 0);
    }
}
