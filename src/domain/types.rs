//! Wire types for the monitoring backend API.
//!
//! These mirror the backend's JSON shapes one-for-one. Every nested
//! collection defaults to empty so a sparse snapshot never fails to
//! deserialize.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A top-level hub cluster and everything monitored through it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hub {
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub cluster_info: ClusterInfo,
    #[serde(default)]
    pub nodes_info: Vec<NodeRecord>,
    #[serde(default)]
    pub policies_info: Vec<PolicyRecord>,
    #[serde(default)]
    pub managed_clusters: Vec<Spoke>,
    #[serde(default)]
    pub labels: HashMap<String, String>,
    #[serde(default)]
    pub annotations: HashMap<String, String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A spoke cluster registered under a hub. Same shape as [`Hub`] minus
/// nested spokes; the owning hub is referenced by name only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spoke {
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub cluster_info: ClusterInfo,
    #[serde(default)]
    pub nodes_info: Vec<NodeRecord>,
    #[serde(default)]
    pub policies_info: Vec<PolicyRecord>,
    #[serde(default)]
    pub labels: HashMap<String, String>,
    #[serde(default)]
    pub annotations: HashMap<String, String>,
    #[serde(default)]
    pub hub_name: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterInfo {
    #[serde(default, rename = "clusterID")]
    pub cluster_id: String,
    #[serde(default)]
    pub kubernetes_version: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub openshift_version: String,
    #[serde(default, rename = "consoleURL")]
    pub console_url: String,
    #[serde(default, rename = "gitopsURL")]
    pub gitops_url: String,
    #[serde(default, rename = "apiURL")]
    pub api_url: String,
    #[serde(default)]
    pub network_type: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// One raw node record. A physical machine typically appears twice: once
/// from the orchestration layer and once from the hardware inventory,
/// distinguished by the `data-source` annotation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub role: String,
    #[serde(default, rename = "internalIP")]
    pub internal_ip: String,
    #[serde(default, rename = "externalIP")]
    pub external_ip: String,
    #[serde(default)]
    pub kernel_version: String,
    #[serde(default)]
    pub os_image: String,
    #[serde(default)]
    pub container_runtime: String,
    #[serde(default)]
    pub kubelet_version: String,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub capacity: ResourceList,
    #[serde(default)]
    pub allocatable: ResourceList,
    #[serde(default)]
    pub labels: HashMap<String, String>,
    #[serde(default)]
    pub annotations: HashMap<String, String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A policy instance with its observed compliance state. The name is
/// fully qualified (dot-separated); the last segment is the display name
/// but the full name remains the identity for YAML download and
/// enforcement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyRecord {
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub remediation_action: String,
    #[serde(default)]
    pub compliance_state: String,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub standards: Vec<String>,
    #[serde(default)]
    pub controls: Vec<String>,
    #[serde(default)]
    pub violations: i64,
    #[serde(default)]
    pub placement_rules: Vec<String>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub labels: HashMap<String, String>,
    #[serde(default)]
    pub annotations: HashMap<String, String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// One installed operator on a spoke cluster, lazy-loaded through the
/// hub. The display name is preferred for presentation; the plain name
/// stays the identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorRecord {
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub phase: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(default, rename = "type")]
    pub condition_type: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub last_transition_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceList {
    #[serde(default)]
    pub cpu: String,
    #[serde(default)]
    pub memory: String,
    #[serde(default)]
    pub storage: String,
    #[serde(default)]
    pub ephemeral_storage: String,
    #[serde(default)]
    pub pods: String,
}

/// Generic `{success, data, error}` envelope wrapping every data
/// endpoint. The `Option` fields deserialize to `None` when absent
/// without a `Default` bound on the payload type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
    pub error: Option<String>,
}

/// `/health`, `/ready` and `/live` response (no envelope).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub timestamp: String,
}
