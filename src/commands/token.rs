//! `fleetmon token set` / `fleetmon token clear`
//!
//! Stores the bearer token the client attaches to every request.

use anyhow::Result;
use colored::Colorize;

use crate::config;

pub fn set(token: &str) -> Result<()> {
    config::save_token(Some(token.to_string()))?;
    println!("{} Token saved to {}", "ok".green().bold(), config::Config::path()?.display());
    Ok(())
}

pub fn clear() -> Result<()> {
    config::save_token(None)?;
    println!("{} Token cleared", "ok".green().bold());
    Ok(())
}
