//! Typed HTTP client for the monitoring backend REST API.
//!
//! Data endpoints wrap their payload in a `{success, data, error}`
//! envelope; `/health` and the policy YAML download do not. Errors fall
//! into three classes: transport failures, API-reported failures
//! (`success: false`), and entities missing from a fetched set.

use reqwest::header::CONTENT_DISPOSITION;
use reqwest::{Client, Method, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::Config;
use crate::domain::types::{ApiEnvelope, HealthResponse, Hub, OperatorRecord, Spoke};

// The backend registers the probes inside its `/api` group, same as
// the data endpoints.
const HEALTH_PATH: &str = "/api/health";
const READY_PATH: &str = "/api/ready";
const LIVE_PATH: &str = "/api/live";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("API error: {0}")]
    Api(String),
    #[error("unauthorized — check the token in the fleetmon config")]
    Unauthorized,
    #[error("{kind} '{name}' not found")]
    NotFound { kind: String, name: String },
}

impl ClientError {
    pub fn not_found(kind: &str, name: &str) -> Self {
        Self::NotFound {
            kind: kind.to_string(),
            name: name.to_string(),
        }
    }
}

/// Body for `POST /api/hubs/add`. Either a base64 kubeconfig or an API
/// endpoint with token or username/password credentials.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddHubRequest {
    pub hub_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kubeconfig: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddHubResponse {
    pub hub_name: String,
    pub namespace: String,
    pub secret_name: String,
}

/// Body for `POST /api/cgu/create` — remediation trigger for a
/// non-compliant policy.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CguRequest {
    pub cluster_name: String,
    pub policy_name: String,
    pub namespace: String,
    pub hub_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CguResponse {
    pub cgu_name: String,
    pub namespace: String,
    pub cluster: String,
    pub policy: String,
}

/// A downloaded policy manifest with the filename the server suggested
/// (or the client-side fallback).
#[derive(Debug, Clone)]
pub struct PolicyYaml {
    pub filename: String,
    pub content: String,
}

pub struct FleetClient {
    base_url: String,
    token: Option<String>,
    http: Client,
}

impl FleetClient {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            http,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        Self::new(config.api_url(), config.token.clone())
    }

    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        self.probe(HEALTH_PATH).await
    }

    pub async fn ready(&self) -> Result<HealthResponse, ClientError> {
        self.probe(READY_PATH).await
    }

    pub async fn live(&self) -> Result<HealthResponse, ClientError> {
        self.probe(LIVE_PATH).await
    }

    async fn probe(&self, path: &str) -> Result<HealthResponse, ClientError> {
        let resp = self.request(Method::GET, path).send().await?;
        let resp = self.check_status(resp)?;
        Ok(resp.json().await?)
    }

    pub async fn hubs(&self) -> Result<Vec<Hub>, ClientError> {
        self.get_enveloped("/api/hubs").await
    }

    pub async fn hub(&self, name: &str) -> Result<Hub, ClientError> {
        self.get_enveloped(&format!("/api/hubs/{}", name)).await
    }

    pub async fn hub_clusters(&self, name: &str) -> Result<Vec<Spoke>, ClientError> {
        self.get_enveloped(&format!("/api/hubs/{}/clusters", name))
            .await
    }

    /// Operators installed on a spoke cluster, fetched lazily through
    /// its hub.
    pub async fn spoke_operators(
        &self,
        hub: &str,
        spoke: &str,
    ) -> Result<Vec<OperatorRecord>, ClientError> {
        self.get_enveloped(&format!("/api/hubs/{}/spokes/{}/operators", hub, spoke))
            .await
    }

    pub async fn add_hub(&self, req: &AddHubRequest) -> Result<AddHubResponse, ClientError> {
        self.post_enveloped("/api/hubs/add", req).await
    }

    /// Deregister a hub. The backend deletes the stored kubeconfig
    /// secret and answers with a message instead of data.
    pub async fn remove_hub(&self, name: &str) -> Result<String, ClientError> {
        let resp = self
            .request(Method::DELETE, &format!("/api/hubs/{}/remove", name))
            .send()
            .await?;
        let resp = self.check_status(resp)?;
        let envelope: ApiEnvelope<serde_json::Value> = resp.json().await?;
        if !envelope.success {
            return Err(ClientError::Api(
                envelope
                    .error
                    .or(envelope.message)
                    .unwrap_or_else(|| "unknown error".to_string()),
            ));
        }
        Ok(envelope.message.unwrap_or_default())
    }

    pub async fn create_cgu(&self, req: &CguRequest) -> Result<CguResponse, ClientError> {
        self.post_enveloped("/api/cgu/create", req).await
    }

    /// Fetch a policy manifest as raw YAML. The filename comes from the
    /// `Content-Disposition` header, falling back to
    /// `{namespace}_{name}.yaml`.
    pub async fn policy_yaml(
        &self,
        namespace: &str,
        name: &str,
        hub: Option<&str>,
    ) -> Result<PolicyYaml, ClientError> {
        let mut path = format!("/api/policies/{}/{}/yaml", namespace, name);
        if let Some(hub) = hub {
            path.push_str(&format!("?hub={}", hub));
        }
        let resp = self.request(Method::GET, &path).send().await?;
        let resp = self.check_status(resp)?;

        let filename = resp
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_disposition)
            .unwrap_or_else(|| format!("{}_{}.yaml", namespace, name));
        let content = resp.text().await?;
        Ok(PolicyYaml { filename, content })
    }

    // ── Internal helpers ───────────────────────────────────

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self.http.request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    fn check_status(&self, resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        match resp.status() {
            StatusCode::UNAUTHORIZED => {
                warn!(url = %resp.url(), "backend rejected the request with 401");
                Err(ClientError::Unauthorized)
            }
            status if !status.is_success() => {
                Err(ClientError::Api(format!("{} returned {}", resp.url(), status)))
            }
            _ => Ok(resp),
        }
    }

    fn unwrap_envelope<T>(&self, envelope: ApiEnvelope<T>) -> Result<T, ClientError> {
        if !envelope.success {
            return Err(ClientError::Api(
                envelope
                    .error
                    .or(envelope.message)
                    .unwrap_or_else(|| "unknown error".to_string()),
            ));
        }
        envelope
            .data
            .ok_or_else(|| ClientError::Api("response carried no data".to_string()))
    }

    async fn get_enveloped<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, ClientError> {
        let resp = self.request(Method::GET, path).send().await?;
        let resp = self.check_status(resp)?;
        self.unwrap_envelope(resp.json().await?)
    }

    async fn post_enveloped<T, B>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        T: serde::de::DeserializeOwned,
        B: Serialize,
    {
        let resp = self.request(Method::POST, path).json(body).send().await?;
        let resp = self.check_status(resp)?;
        self.unwrap_envelope(resp.json().await?)
    }
}

/// Hub names become namespaces, so they must be valid DNS labels:
/// `^[a-z0-9]([-a-z0-9]*[a-z0-9])?$`, checked client-side before the
/// request goes out.
pub fn is_valid_hub_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    if bytes.is_empty() {
        return false;
    }
    let edge_ok = |b: u8| b.is_ascii_lowercase() || b.is_ascii_digit();
    if !edge_ok(bytes[0]) || !edge_ok(bytes[bytes.len() - 1]) {
        return false;
    }
    bytes.iter().all(|&b| edge_ok(b) || b == b'-')
}

/// Extract the filename from a `Content-Disposition` header value.
fn parse_content_disposition(value: &str) -> Option<String> {
    let rest = &value[value.find("filename=")? + "filename=".len()..];
    let rest = rest.split(';').next().unwrap_or(rest).trim();
    let name = rest.trim_matches('"');
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hub_name_validation() {
        assert!(is_valid_hub_name("acm3"));
        assert!(is_valid_hub_name("regional-hub-1"));
        assert!(is_valid_hub_name("a"));
        assert!(is_valid_hub_name("0hub"));
        assert!(!is_valid_hub_name(""));
        assert!(!is_valid_hub_name("Acm3"));
        assert!(!is_valid_hub_name("-hub"));
        assert!(!is_valid_hub_name("hub-"));
        assert!(!is_valid_hub_name("hub_1"));
        assert!(!is_valid_hub_name("hub.one"));
    }

    #[test]
    fn content_disposition_parsing() {
        assert_eq!(
            parse_content_disposition(r#"attachment; filename="ns_policy.yaml""#),
            Some("ns_policy.yaml".to_string())
        );
        assert_eq!(
            parse_content_disposition("attachment; filename=plain.yaml"),
            Some("plain.yaml".to_string())
        );
        assert_eq!(
            parse_content_disposition(r#"attachment; filename="first.yaml"; size=42"#),
            Some("first.yaml".to_string())
        );
        assert_eq!(parse_content_disposition("attachment"), None);
        assert_eq!(parse_content_disposition(r#"attachment; filename="""#), None);
    }

    #[test]
    fn probes_live_under_the_api_prefix() {
        let client = FleetClient::new("http://127.0.0.1:8080", None).unwrap();
        for path in [HEALTH_PATH, READY_PATH, LIVE_PATH] {
            let req = client.request(Method::GET, path).build().unwrap();
            assert!(
                req.url().path().starts_with("/api/"),
                "{} must be under /api",
                req.url().path()
            );
        }
        let health = client.request(Method::GET, HEALTH_PATH).build().unwrap();
        assert_eq!(health.url().path(), "/api/health");
    }

    #[test]
    fn add_hub_request_skips_absent_credentials() {
        let req = AddHubRequest {
            hub_name: "acm3".to_string(),
            kubeconfig: Some("YmFzZTY0".to_string()),
            api_endpoint: None,
            token: None,
            username: None,
            password: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["hubName"], "acm3");
        assert_eq!(json["kubeconfig"], "YmFzZTY0");
        assert!(json.get("apiEndpoint").is_none());
        assert!(json.get("username").is_none());
    }
}
