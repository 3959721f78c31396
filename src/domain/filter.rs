//! Live filter engine.
//!
//! Filtering works on precomputed row attributes, never on the source
//! snapshot: each filterable table builds its rows once (lowercased
//! match fields), then predicate evaluation is a pure function of
//! (filter state, rows). Applying a filter only toggles visibility — it
//! never reorders or drops rows, so applying the same state twice gives
//! the same visible set.

use serde::Serialize;

use super::classify::{classify_compliance, ComplianceClass};
use super::policy;
use super::types::{OperatorRecord, PolicyRecord, Spoke};

/// Compliance radio selection for policy tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ComplianceSelection {
    #[default]
    All,
    Compliant,
    #[value(alias = "noncompliant")]
    NonCompliant,
}

impl ComplianceSelection {
    fn matches(self, row_compliance: &str) -> bool {
        match self {
            Self::All => true,
            Self::Compliant => classify_compliance(row_compliance) == ComplianceClass::Compliant,
            Self::NonCompliant => {
                classify_compliance(row_compliance) == ComplianceClass::NonCompliant
            }
        }
    }
}

/// Text predicates over the spoke table. Empty string means match-all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpokeFilter {
    pub name: String,
    pub version: String,
    pub configuration: String,
}

impl SpokeFilter {
    /// Reset every field to match-everything.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn matches(&self, row: &SpokeRow) -> bool {
        contains(&row.name, &self.name)
            && contains(&row.version, &self.version)
            && contains(&row.configuration, &self.configuration)
    }
}

/// Name substring plus compliance selection over a policy table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyFilter {
    pub name: String,
    pub compliance: ComplianceSelection,
}

impl PolicyFilter {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn matches(&self, row: &PolicyRow) -> bool {
        contains(&row.name, &self.name) && self.compliance.matches(&row.compliance)
    }
}

/// One spoke table row with its lowercase match attributes and whether
/// its detail panel is currently expanded.
#[derive(Debug, Clone)]
pub struct SpokeRow {
    name: String,
    version: String,
    configuration: String,
    pub expanded: bool,
}

impl SpokeRow {
    pub fn new(spoke: &Spoke, expanded: bool) -> Self {
        Self {
            name: spoke.name.to_lowercase(),
            version: spoke.cluster_info.openshift_version.to_lowercase(),
            configuration: spoke.cluster_info.region.to_lowercase(),
            expanded,
        }
    }
}

/// Name predicate over the operator table. Empty string matches all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperatorFilter {
    pub name: String,
}

impl OperatorFilter {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn matches(&self, row: &OperatorRow) -> bool {
        contains(&row.name, &self.name)
    }
}

/// One operator table row. Matching runs against the display name,
/// falling back to the plain name when no display name is set.
#[derive(Debug, Clone)]
pub struct OperatorRow {
    name: String,
}

impl OperatorRow {
    pub fn new(operator: &OperatorRecord) -> Self {
        let name = if operator.display_name.is_empty() {
            &operator.name
        } else {
            &operator.display_name
        };
        Self {
            name: name.to_lowercase(),
        }
    }
}

/// One policy table row (used for both hub-level and spoke-level
/// policy tables).
#[derive(Debug, Clone)]
pub struct PolicyRow {
    name: String,
    compliance: String,
}

impl PolicyRow {
    pub fn new(policy: &PolicyRecord) -> Self {
        Self {
            name: policy.name.to_lowercase(),
            compliance: policy.compliance_state.to_lowercase(),
        }
    }
}

/// Result of one filter application: a visibility flag per row plus the
/// visible/total pair for the "Showing N of M" line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOutcome {
    pub visible: Vec<bool>,
    pub visible_count: usize,
    pub total: usize,
}

impl FilterOutcome {
    fn from_flags(visible: Vec<bool>) -> Self {
        let visible_count = visible.iter().filter(|v| **v).count();
        let total = visible.len();
        Self {
            visible,
            visible_count,
            total,
        }
    }

    /// Visibility is hierarchical: a detail row shows only when it is
    /// expanded AND its parent row passed the filter. A hidden parent
    /// force-hides the detail regardless of the detail's own match.
    pub fn detail_visible(&self, idx: usize, expanded: bool) -> bool {
        expanded && self.visible.get(idx).copied().unwrap_or(false)
    }

    /// "Showing N of M things" when filtered, "Showing M things" when not.
    pub fn summary(&self, singular: &str, plural: &str) -> String {
        let noun = if self.total == 1 { singular } else { plural };
        if self.visible_count == self.total {
            format!("Showing {} {}", self.total, noun)
        } else {
            format!("Showing {} of {} {}", self.visible_count, self.total, noun)
        }
    }
}

pub fn apply_spoke_filter(filter: &SpokeFilter, rows: &[SpokeRow]) -> FilterOutcome {
    FilterOutcome::from_flags(rows.iter().map(|r| filter.matches(r)).collect())
}

pub fn apply_policy_filter(filter: &PolicyFilter, rows: &[PolicyRow]) -> FilterOutcome {
    FilterOutcome::from_flags(rows.iter().map(|r| filter.matches(r)).collect())
}

pub fn apply_operator_filter(filter: &OperatorFilter, rows: &[OperatorRow]) -> FilterOutcome {
    FilterOutcome::from_flags(rows.iter().map(|r| filter.matches(r)).collect())
}

/// Build policy rows in display order (wave-sorted, matching the table).
pub fn policy_rows(policies: &[PolicyRecord]) -> Vec<PolicyRow> {
    policy::sort_by_wave(policies).iter().map(PolicyRow::new).collect()
}

/// Case-insensitive substring containment; an empty needle matches all.
fn contains(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spoke(name: &str, version: &str, configuration: &str) -> Spoke {
        serde_json::from_value(serde_json::json!({
            "name": name,
            "status": "Ready",
            "clusterInfo": {
                "openshiftVersion": version,
                "region": configuration,
            },
        }))
        .unwrap()
    }

    fn rows() -> Vec<SpokeRow> {
        vec![
            SpokeRow::new(&spoke("sno146", "4.18.13", "vdu2-4.18"), false),
            SpokeRow::new(&spoke("sno147", "4.16.2", "vdu1-4.16"), true),
            SpokeRow::new(&spoke("edge-01", "4.18.13", "vdu2-4.18"), true),
        ]
    }

    #[test]
    fn empty_filter_matches_everything() {
        let outcome = apply_spoke_filter(&SpokeFilter::default(), &rows());
        assert_eq!(outcome.visible_count, 3);
        assert_eq!(outcome.visible, vec![true, true, true]);
    }

    #[test]
    fn predicates_are_conjunctive() {
        let filter = SpokeFilter {
            name: "sno".to_string(),
            version: "4.18".to_string(),
            configuration: String::new(),
        };
        let outcome = apply_spoke_filter(&filter, &rows());
        // sno147 matches "sno" but not "4.18"; edge-01 matches "4.18" but not "sno".
        assert_eq!(outcome.visible, vec![true, false, false]);
    }

    #[test]
    fn text_match_is_case_insensitive_substring() {
        let filter = SpokeFilter {
            name: "SNO14".to_string(),
            ..Default::default()
        };
        let outcome = apply_spoke_filter(&filter, &rows());
        assert_eq!(outcome.visible, vec![true, true, false]);
    }

    #[test]
    fn hidden_parent_forces_detail_hidden() {
        let rows = rows();
        let filter = SpokeFilter {
            name: "sno146".to_string(),
            ..Default::default()
        };
        let outcome = apply_spoke_filter(&filter, &rows);
        // sno147 and edge-01 are expanded, but their parents are hidden.
        assert!(!outcome.visible[1]);
        assert!(!outcome.detail_visible(1, rows[1].expanded));
        assert!(!outcome.detail_visible(2, rows[2].expanded));
        // A visible parent that is not expanded still shows no detail.
        assert!(!outcome.detail_visible(0, rows[0].expanded));
    }

    #[test]
    fn visible_expanded_parent_shows_detail() {
        let rows = rows();
        let outcome = apply_spoke_filter(&SpokeFilter::default(), &rows);
        assert!(outcome.detail_visible(1, rows[1].expanded));
    }

    #[test]
    fn clear_restores_full_visibility() {
        let rows = rows();
        let mut filter = SpokeFilter {
            name: "nomatch".to_string(),
            version: "9.9".to_string(),
            configuration: "zzz".to_string(),
        };
        let filtered = apply_spoke_filter(&filter, &rows);
        assert_eq!(filtered.visible_count, 0);

        filter.clear();
        let cleared = apply_spoke_filter(&filter, &rows);
        assert_eq!(cleared.visible_count, cleared.total);
        assert_eq!(cleared.total, 3);
    }

    #[test]
    fn filtering_is_idempotent() {
        let rows = rows();
        let filter = SpokeFilter {
            version: "4.18".to_string(),
            ..Default::default()
        };
        let first = apply_spoke_filter(&filter, &rows);
        let second = apply_spoke_filter(&filter, &rows);
        assert_eq!(first, second);
    }

    #[test]
    fn compliance_selection_matches_exactly() {
        let policies: Vec<PolicyRecord> = ["Compliant", "NonCompliant", "Pending"]
            .iter()
            .map(|s| {
                serde_json::from_value(serde_json::json!({
                    "name": format!("ztp.group.{}", s.to_lowercase()),
                    "complianceState": s,
                }))
                .unwrap()
            })
            .collect();
        let rows: Vec<PolicyRow> = policies.iter().map(PolicyRow::new).collect();

        let compliant = PolicyFilter {
            compliance: ComplianceSelection::Compliant,
            ..Default::default()
        };
        assert_eq!(apply_policy_filter(&compliant, &rows).visible, vec![true, false, false]);

        let noncompliant = PolicyFilter {
            compliance: ComplianceSelection::NonCompliant,
            ..Default::default()
        };
        // "NonCompliant" must not be swallowed by a substring match on
        // "compliant"; only the exact class matches.
        assert_eq!(
            apply_policy_filter(&noncompliant, &rows).visible,
            vec![false, true, false]
        );
    }

    #[test]
    fn operator_match_falls_back_to_the_plain_name() {
        let operators: Vec<OperatorRecord> = [
            ("local-storage-operator", "Local Storage"),
            ("ptp-operator", ""),
        ]
        .iter()
        .map(|(name, display)| {
            serde_json::from_value(serde_json::json!({
                "name": name,
                "displayName": display,
            }))
            .unwrap()
        })
        .collect();
        let rows: Vec<OperatorRow> = operators.iter().map(OperatorRow::new).collect();

        let by_display = OperatorFilter {
            name: "storage".to_string(),
        };
        assert_eq!(apply_operator_filter(&by_display, &rows).visible, vec![true, false]);

        // ptp-operator has no display name; the plain name matches.
        let by_plain = OperatorFilter {
            name: "PTP".to_string(),
        };
        assert_eq!(apply_operator_filter(&by_plain, &rows).visible, vec![false, true]);

        let all = apply_operator_filter(&OperatorFilter::default(), &rows);
        assert_eq!(all.summary("operator", "operators"), "Showing 2 operators");
    }

    #[test]
    fn summary_line_formats() {
        let all = FilterOutcome::from_flags(vec![true, true]);
        assert_eq!(all.summary("spoke cluster", "spoke clusters"), "Showing 2 spoke clusters");

        let some = FilterOutcome::from_flags(vec![true, false, false]);
        assert_eq!(some.summary("policy", "policies"), "Showing 1 of 3 policies");

        let one = FilterOutcome::from_flags(vec![true]);
        assert_eq!(one.summary("policy", "policies"), "Showing 1 policy");
    }
}
