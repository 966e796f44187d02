//! `shuxiang config show|set`.

use std::path::Path;

use anyhow::Result;

use crate::config::{ClientConfig, API_URL_ENV};

pub fn show(config_path: &Path) -> Result<()> {
    let config = ClientConfig::load(config_path)?;
    println!("config:   {}", config_path.display());
    println!("api_url:  {}", config.api_url());
    if std::env::var(API_URL_ENV).is_ok() {
        println!("          (from ${})", API_URL_ENV);
    }
    println!("storage:  {}", config.storage_path().display());
    Ok(())
}

pub fn set(config_path: &Path, api_url: Option<String>, data_dir: Option<String>) -> Result<()> {
    if api_url.is_none() && data_dir.is_none() {
        anyhow::bail!("Nothing to set. Pass --api-url and/or --data-dir.");
    }
    let mut config = ClientConfig::load(config_path)?;
    if let Some(url) = api_url {
        config.api_url = url.trim_end_matches('/').to_string();
    }
    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }
    config.save(config_path)?;
    println!("Saved {}.", config_path.display());
    Ok(())
}
