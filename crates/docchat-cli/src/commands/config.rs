use anyhow::{Context, Result};
use colored::Colorize;
use docchat_core::config::ClientConfig;
use docchat_infrastructure::ConfigService;

/// Prints the effective configuration and where it was read from.
pub fn show(service: &ConfigService, effective: &ClientConfig) -> Result<()> {
    println!("{}", format!("# {}", service.path().display()).bright_black());
    let rendered = toml::to_string_pretty(effective).context("Failed to render configuration")?;
    print!("{}", rendered);
    println!("{}", format!("# API root: {}", effective.api_root()).bright_black());
    Ok(())
}

pub fn set_base_url(service: &ConfigService, url: &str) -> Result<()> {
    let updated = service.set_base_url(url)?;
    println!("{} {}", "base_url set to".bright_green(), updated.base_url);
    Ok(())
}
