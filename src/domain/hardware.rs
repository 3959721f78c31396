//! Typed view over the hardware facts carried in node annotations.
//!
//! The inventory source stuffs hardware details into a flat annotation
//! bag (`bmc-address`, `serial-number`, `disk-1` …). Reading them
//! through one struct keeps the lookup keys in a single place.

use super::types::NodeRecord;

const MAX_DISKS: usize = 10;

#[derive(Debug, Clone, Default)]
pub struct HardwareFacts<'a> {
    pub bmc_address: Option<&'a str>,
    pub manufacturer: Option<&'a str>,
    pub product_name: Option<&'a str>,
    pub serial_number: Option<&'a str>,
    pub cpu_model: Option<&'a str>,
    pub nic_count: Option<&'a str>,
    /// `(index, description)` pairs for `disk-1` through `disk-10`,
    /// in index order, gaps skipped.
    pub disks: Vec<(usize, &'a str)>,
}

impl<'a> HardwareFacts<'a> {
    pub fn from_node(node: &'a NodeRecord) -> Self {
        let get = |key: &str| node.annotations.get(key).map(String::as_str);
        let disks = (1..=MAX_DISKS)
            .filter_map(|i| get(&format!("disk-{}", i)).map(|d| (i, d)))
            .collect();
        Self {
            bmc_address: get("bmc-address"),
            manufacturer: get("manufacturer"),
            product_name: get("product-name"),
            serial_number: get("serial-number"),
            cpu_model: get("cpu-model"),
            nic_count: get("nic-count"),
            disks,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bmc_address.is_none()
            && self.manufacturer.is_none()
            && self.product_name.is_none()
            && self.serial_number.is_none()
            && self.cpu_model.is_none()
            && self.nic_count.is_none()
            && self.disks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(annotations: serde_json::Value) -> NodeRecord {
        serde_json::from_value(serde_json::json!({
            "name": "node1",
            "annotations": annotations,
        }))
        .unwrap()
    }

    #[test]
    fn facts_read_from_the_annotation_bag() {
        let node = node(serde_json::json!({
            "bmc-address": "redfish://10.0.0.9/redfish/v1",
            "manufacturer": "Dell Inc.",
            "serial-number": "ABC123",
            "disk-1": "nvme0n1 1.6TB",
            "disk-3": "sda 480GB",
        }));
        let facts = HardwareFacts::from_node(&node);
        assert_eq!(facts.bmc_address, Some("redfish://10.0.0.9/redfish/v1"));
        assert_eq!(facts.manufacturer, Some("Dell Inc."));
        assert_eq!(facts.serial_number, Some("ABC123"));
        assert_eq!(facts.disks, vec![(1, "nvme0n1 1.6TB"), (3, "sda 480GB")]);
        assert!(facts.product_name.is_none());
        assert!(!facts.is_empty());
    }

    #[test]
    fn empty_bag_is_empty_facts() {
        let bare = node(serde_json::json!({}));
        let facts = HardwareFacts::from_node(&bare);
        assert!(facts.is_empty());
    }
}
