use anyhow::Result;
use config::{Config, ConfigBuilder, Environment, File};
use config::builder::DefaultState;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::encoder::QuotePolicy;

/// Prefix for environment overrides, e.g. `EMAIL_ARCHIVE__VIEW__PAGE_SIZE=25`
pub const ENV_PREFIX: &str = "EMAIL_ARCHIVE";

/// Application configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub export: ExportConfig,
    pub view: ViewConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: Option<String>,
    pub format: String, // "json" or "text"
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    pub file_name: String,
    pub mime_type: String,
    pub quote_style: QuotePolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewConfig {
    pub page_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: None,
                format: "text".to_string(),
            },
            export: ExportConfig {
                file_name: "emails_actualizados.csv".to_string(),
                mime_type: "text/csv;charset=utf-8;".to_string(),
                quote_style: QuotePolicy::Necessary,
            },
            view: ViewConfig { page_size: 50 },
        }
    }
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// defaults, `config/default.*`, `config/local.*`, then environment.
    pub fn load() -> Result<Self> {
        let builder = Self::defaults_builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            );

        Self::finish(builder)
    }

    /// Load defaults overlaid with one specific file (format from its extension)
    pub fn load_from(path: &Path) -> Result<Self> {
        let builder = Self::defaults_builder()?.add_source(File::from(path).required(true));
        Self::finish(builder)
    }

    fn defaults_builder() -> Result<ConfigBuilder<DefaultState>> {
        let defaults = Self::default();
        let builder = Config::builder()
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.format", defaults.logging.format)?
            .set_default("export.file_name", defaults.export.file_name)?
            .set_default("export.mime_type", defaults.export.mime_type)?
            .set_default("export.quote_style", "necessary")?
            .set_default("view.page_size", defaults.view.page_size as u64)?;
        Ok(builder)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let config = builder
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

        let app_config: Self = config
            .try_deserialize()
            .map_err(|e| anyhow::anyhow!("Failed to deserialize configuration: {}", e))?;

        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log level: {}. Must be one of: {:?}",
                self.logging.level,
                valid_levels
            ));
        }

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log format: {}. Must be one of: {:?}",
                self.logging.format,
                valid_formats
            ));
        }

        if self.export.file_name.trim().is_empty() {
            return Err(anyhow::anyhow!("export file_name cannot be empty"));
        }
        if self.export.file_name.contains(['/', '\\']) {
            return Err(anyhow::anyhow!(
                "export file_name must be a bare file name: {}",
                self.export.file_name
            ));
        }

        if self.view.page_size == 0 {
            return Err(anyhow::anyhow!("page_size must be greater than 0"));
        }

        Ok(())
    }
}
