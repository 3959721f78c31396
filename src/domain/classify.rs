//! Free-text status and compliance classification.
//!
//! The backend reports cluster, node and policy states as free text.
//! These classifiers map that text into the small enums the renderers
//! color by. Unmapped input always falls through to `Unknown`.

use serde::Serialize;

/// Coarse health bucket for a status string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatusClass {
    Healthy,
    Unhealthy,
    Pending,
    Unknown,
}

/// Coarse bucket for a policy compliance string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ComplianceClass {
    Compliant,
    NonCompliant,
    Unknown,
}

/// Severity bucket used for policy coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SeverityClass {
    High,
    Medium,
    Low,
    Default,
}

const UNHEALTHY_TERMS: &[&str] = &["notready", "unavailable", "failed"];
const HEALTHY_TERMS: &[&str] = &["ready", "available", "healthy", "connected"];
const PENDING_TERMS: &[&str] = &["pending", "progressing"];

/// Case-insensitive substring classification of a status string.
///
/// Unhealthy terms are checked first: "NotReady" contains "ready" and
/// must not land in the healthy bucket.
pub fn classify_status(status: &str) -> StatusClass {
    let lower = status.to_lowercase();
    if UNHEALTHY_TERMS.iter().any(|t| lower.contains(t)) {
        StatusClass::Unhealthy
    } else if HEALTHY_TERMS.iter().any(|t| lower.contains(t)) {
        StatusClass::Healthy
    } else if PENDING_TERMS.iter().any(|t| lower.contains(t)) {
        StatusClass::Pending
    } else {
        StatusClass::Unknown
    }
}

/// Exact case-insensitive classification of a compliance string.
pub fn classify_compliance(state: &str) -> ComplianceClass {
    match state.to_lowercase().as_str() {
        "compliant" => ComplianceClass::Compliant,
        "noncompliant" => ComplianceClass::NonCompliant,
        _ => ComplianceClass::Unknown,
    }
}

pub fn classify_severity(severity: &str) -> SeverityClass {
    match severity.to_lowercase().as_str() {
        "critical" | "high" => SeverityClass::High,
        "medium" => SeverityClass::Medium,
        "low" => SeverityClass::Low,
        _ => SeverityClass::Default,
    }
}
