use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_API_URL: &str = "http://127.0.0.1:8080";

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the monitoring backend (the `/api` prefix is added
    /// per request).
    pub api_url: Option<String>,
    /// Bearer token attached to every request when present.
    pub token: Option<String>,
    /// Hub used when a command omits `--hub`.
    pub default_hub: Option<String>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("could not determine config directory")?;
        Ok(config_dir.join("fleetmon").join("config.toml"))
    }

    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    /// Hub a command operates on: an explicit flag wins, then
    /// `default_hub` from the config, otherwise an error.
    pub fn resolve_hub(&self, flag: Option<&str>) -> Result<String> {
        flag.map(str::to_string)
            .or_else(|| self.default_hub.clone())
            .context("no hub selected: pass --hub or set default_hub in the config")
    }
}

pub fn load() -> Result<Config> {
    load_from(&Config::path()?)
}

pub fn load_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config: Config =
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

pub fn save_token(value: Option<String>) -> Result<()> {
    let path = Config::path()?;
    let mut config = load_from(&path).unwrap_or_default();
    config.token = value;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    let content = toml::to_string_pretty(&config).context("serializing config")?;
    std::fs::write(&path, content).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
