//! Configuration loading for CLI commands

use anyhow::{Context, Result};
use ragassist_core::config::{load_env_file, AppConfig, CliConfigOverrides, LayeredConfig};
use std::path::{Path, PathBuf};

/// Everything a command needs to know about its configuration
#[derive(Debug, Clone)]
pub struct AppContext {
    pub app: AppConfig,
    pub settings: LayeredConfig,
    pub config_path: PathBuf,
    pub prompt_config_path: PathBuf,
}

/// Read the typed application config, or defaults when the file is absent
pub fn load_app_config(config_path: &Path) -> Result<AppConfig> {
    if !config_path.exists() {
        return Ok(AppConfig::default());
    }
    AppConfig::load(config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))
}

/// Layer defaults, config file, `.env`/environment and CLI flags
pub fn load_context(
    app: AppConfig,
    config_path: &Path,
    prompt_config_path: &Path,
    overrides: CliConfigOverrides,
) -> Result<AppContext> {
    if load_env_file(&app.paths.env_file) {
        tracing::debug!("Environment loaded from {}", app.paths.env_file.display());
    }

    let mut settings = LayeredConfig::with_defaults();
    if config_path.exists() {
        settings = settings
            .load_from_file(config_path)
            .context("Failed to load configuration file")?;
    } else {
        tracing::warn!("{} not found, using built-in defaults", config_path.display());
    }

    let mut settings = settings.load_from_env();
    settings.update_from_cli(overrides);
    settings.validate().context("Invalid configuration")?;

    Ok(AppContext {
        app,
        settings,
        config_path: config_path.to_path_buf(),
        prompt_config_path: prompt_config_path.to_path_buf(),
    })
}

impl AppContext {
    pub fn threshold(&self) -> f32 {
        self.settings.threshold.value
    }

    pub fn top_k(&self) -> usize {
        self.settings.top_k.value
    }

    pub fn collection(&self) -> &str {
        &self.settings.collection.value
    }

    pub fn provider(&self) -> &str {
        &self.settings.provider.value
    }

    pub fn embedder(&self) -> &str {
        &self.settings.embedder.value
    }
}
