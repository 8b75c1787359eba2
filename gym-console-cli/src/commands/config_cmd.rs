use anyhow::{Context, Result};
use std::path::Path;

use super::output;
use crate::config::Config;

pub fn show_config(path: Option<&Path>) -> Result<()> {
    let config = Config::load(path)?;
    let config_str = toml::to_string_pretty(&config).context("Failed to serialize config")?;

    output::heading("Current Configuration");
    println!();
    println!("{}", config_str);

    Ok(())
}

pub fn init_config(path: Option<&Path>, force: bool) -> Result<()> {
    let config_file = Config::resolve_path(path)?;

    if config_file.exists() && !force {
        println!(
            "Configuration file already exists at: {}",
            config_file.display()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    let written = Config::default().save(Some(&config_file))?;
    output::success(&format!("Configuration initialized at: {}", written.display()));

    Ok(())
}

pub fn print_path(path: Option<&Path>) -> Result<()> {
    println!("{}", Config::resolve_path(path)?.display());
    Ok(())
}
