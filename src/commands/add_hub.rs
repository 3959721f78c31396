//! `fleetmon add-hub` — register an external hub with the backend.
//!
//! Two paths, matching the backend contract: a kubeconfig file
//! (base64-encoded in the request body to avoid escaping issues) or an
//! API endpoint with a token or username/password pair.

use std::path::PathBuf;

use anyhow::{bail, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use colored::Colorize;

use crate::client::{is_valid_hub_name, AddHubRequest, FleetClient};
use crate::config;

pub struct AddHubArgs {
    pub name: String,
    pub kubeconfig: Option<PathBuf>,
    pub api_endpoint: Option<String>,
    pub token: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

pub fn run(args: AddHubArgs) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_async(args))
}

async fn run_async(args: AddHubArgs) -> Result<()> {
    // The backend uses the hub name as a namespace, so it must be a
    // valid DNS label. Reject locally before anything goes out.
    if !is_valid_hub_name(&args.name) {
        bail!(
            "invalid hub name '{}': must be lowercase alphanumeric with hyphens",
            args.name
        );
    }

    let req = build_request(&args)?;

    let cfg = config::load()?;
    let client = FleetClient::from_config(&cfg)?;
    match client.add_hub(&req).await {
        Ok(resp) => {
            println!("{} Hub added", "ok".green().bold());
            println!("  Name:      {}", resp.hub_name);
            println!("  Namespace: {}", resp.namespace);
            println!("  Secret:    {}", resp.secret_name);
            Ok(())
        }
        Err(e) => {
            eprintln!("{} Failed to add hub: {}", "!!".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn build_request(args: &AddHubArgs) -> Result<AddHubRequest> {
    let mut req = AddHubRequest {
        hub_name: args.name.clone(),
        kubeconfig: None,
        api_endpoint: None,
        token: None,
        username: None,
        password: None,
    };

    if let Some(path) = &args.kubeconfig {
        let raw = std::fs::read_to_string(path)?;
        if raw.trim().is_empty() {
            bail!("kubeconfig file {} is empty", path.display());
        }
        req.kubeconfig = Some(BASE64.encode(raw));
        return Ok(req);
    }

    let Some(endpoint) = &args.api_endpoint else {
        bail!("provide either --kubeconfig or --api-endpoint");
    };
    req.api_endpoint = Some(endpoint.clone());

    match (&args.token, &args.username, &args.password) {
        (Some(token), _, _) => {
            req.token = Some(token.clone());
        }
        (None, Some(user), Some(pass)) => {
            req.username = Some(user.clone());
            req.password = Some(pass.clone());
        }
        _ => bail!("provide either --token or both --username and --password"),
    }
    Ok(req)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> AddHubArgs {
        AddHubArgs {
            name: "acm3".to_string(),
            kubeconfig: None,
            api_endpoint: None,
            token: None,
            username: None,
            password: None,
        }
    }

    #[test]
    fn kubeconfig_is_base64_encoded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kubeconfig");
        std::fs::write(&path, "apiVersion: v1\nkind: Config\n").unwrap();

        let mut a = args();
        a.kubeconfig = Some(path);
        let req = build_request(&a).unwrap();
        let decoded = BASE64.decode(req.kubeconfig.unwrap()).unwrap();
        assert_eq!(decoded, b"apiVersion: v1\nkind: Config\n");
        assert!(req.api_endpoint.is_none());
    }

    #[test]
    fn endpoint_requires_credentials() {
        let mut a = args();
        a.api_endpoint = Some("https://api.example.com:6443".to_string());
        assert!(build_request(&a).is_err());

        a.token = Some("sha256~tok".to_string());
        let req = build_request(&a).unwrap();
        assert_eq!(req.token.as_deref(), Some("sha256~tok"));
    }

    #[test]
    fn username_and_password_must_come_together() {
        let mut a = args();
        a.api_endpoint = Some("https://api.example.com:6443".to_string());
        a.username = Some("admin".to_string());
        assert!(build_request(&a).is_err());

        a.password = Some("hunter2".to_string());
        let req = build_request(&a).unwrap();
        assert_eq!(req.username.as_deref(), Some("admin"));
        assert_eq!(req.password.as_deref(), Some("hunter2"));
    }

    #[test]
    fn neither_method_is_an_error() {
        assert!(build_request(&args()).is_err());
    }
}
