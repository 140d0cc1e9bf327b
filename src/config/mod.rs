pub mod settings;

pub use settings::{Config, DebugLogRotation};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the configuration file path
pub fn config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Failed to get config directory")?
        .join("trendscope");

    Ok(config_dir.join("config.toml"))
}

/// Load the default config file, creating it with defaults if missing
pub fn load_or_create_config() -> Result<Config> {
    load_or_create_at(&config_path()?)
}

/// Load configuration from `path`, or write and return defaults if it does not exist
pub fn load_or_create_at(path: &Path) -> Result<Config> {
    if path.exists() {
        return load_from(path);
    }

    let config = Config::default();
    save_config_at(&config, path)?;
    tracing::info!(path = %path.display(), "created default config");
    Ok(config)
}

pub fn load_from(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    Ok(config)
}

/// Save configuration to `path`, creating parent directories
pub fn save_config_at(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }
    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
    fs::write(path, content).context("Failed to write config file")?;
    Ok(())
}
