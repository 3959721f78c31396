//! Policy identity and deployment-wave ordering.

use super::types::PolicyRecord;

/// Annotation carrying the staged-rollout wave hint.
pub const DEPLOY_WAVE_ANNOTATION: &str = "ran.openshift.io/ztp-deploy-wave";

/// Missing or unparseable waves sort after every real wave.
pub const DEFAULT_WAVE: u32 = 999;

const LATEST_STATUS_MESSAGE_ANNOTATION: &str = "latest-status-message";
const LATEST_STATUS_TIMESTAMP_ANNOTATION: &str = "latest-status-timestamp";

/// Short display name: the segment after the last `.` in the fully
/// qualified name. The full name stays the identity for YAML download
/// and enforcement.
pub fn display_name(policy: &PolicyRecord) -> &str {
    policy.name.rsplit('.').next().unwrap_or(&policy.name)
}

/// Parsed wave number, falling back to [`DEFAULT_WAVE`].
pub fn deploy_wave(policy: &PolicyRecord) -> u32 {
    policy
        .annotations
        .get(DEPLOY_WAVE_ANNOTATION)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(DEFAULT_WAVE)
}

/// Raw wave annotation for display ("N/A" handling is the renderer's).
pub fn wave_label(policy: &PolicyRecord) -> Option<&str> {
    policy
        .annotations
        .get(DEPLOY_WAVE_ANNOTATION)
        .map(String::as_str)
}

/// Stable ascending sort by wave; ties keep input order, input untouched.
pub fn sort_by_wave(policies: &[PolicyRecord]) -> Vec<PolicyRecord> {
    let mut sorted = policies.to_vec();
    sorted.sort_by_key(deploy_wave);
    sorted
}

pub fn latest_status_message(policy: &PolicyRecord) -> Option<&str> {
    policy
        .annotations
        .get(LATEST_STATUS_MESSAGE_ANNOTATION)
        .map(String::as_str)
}

pub fn latest_status_timestamp(policy: &PolicyRecord) -> Option<&str> {
    policy
        .annotations
        .get(LATEST_STATUS_TIMESTAMP_ANNOTATION)
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(name: &str, wave: Option<&str>) -> PolicyRecord {
        let mut value = serde_json::json!({"name": name});
        if let Some(w) = wave {
            value["annotations"] = serde_json::json!({DEPLOY_WAVE_ANNOTATION: w});
        }
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn display_name_is_last_dot_segment() {
        assert_eq!(display_name(&policy("ztp.group.du-validator", None)), "du-validator");
        assert_eq!(display_name(&policy("plain-name", None)), "plain-name");
    }

    #[test]
    fn missing_and_garbage_waves_hit_the_sentinel() {
        assert_eq!(deploy_wave(&policy("p", None)), DEFAULT_WAVE);
        assert_eq!(deploy_wave(&policy("p", Some("not-a-number"))), DEFAULT_WAVE);
        assert_eq!(deploy_wave(&policy("p", Some(""))), DEFAULT_WAVE);
        assert_eq!(deploy_wave(&policy("p", Some("5"))), 5);
        assert_eq!(deploy_wave(&policy("p", Some(" 10 "))), 10);
    }

    #[test]
    fn wave_sort_is_ascending_with_missing_last() {
        let input = vec![
            policy("ztp.group.no-wave", None),
            policy("ztp.group.wave-three", Some("3")),
            policy("ztp.group.wave-one", Some("1")),
        ];
        let sorted = sort_by_wave(&input);
        let names: Vec<&str> = sorted.iter().map(display_name).collect();
        assert_eq!(names, ["wave-one", "wave-three", "no-wave"]);
        // Input order is untouched.
        assert_eq!(display_name(&input[0]), "no-wave");
    }

    #[test]
    fn wave_ties_keep_relative_input_order() {
        let input = vec![
            policy("ztp.group.b", Some("2")),
            policy("ztp.group.a", Some("2")),
            policy("ztp.group.c", Some("1")),
        ];
        let sorted = sort_by_wave(&input);
        let names: Vec<&str> = sorted.iter().map(display_name).collect();
        assert_eq!(names, ["c", "b", "a"]);
    }
}
