//! Configuration loader with layered sources.

use crate::AppConfig;
use caresphere_core::CareError;
use config::{Config, ConfigError, Environment, File};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use url::Url;

/// Configuration loader with runtime refresh support.
#[derive(Clone)]
pub struct ConfigLoader {
    config: Arc<RwLock<AppConfig>>,
    config_dir: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Local overrides (not committed)
    /// 4. Environment variables with `CARESPHERE_` prefix
    pub fn new(config_dir: impl Into<String>) -> Result<Self, CareError> {
        let config_dir = config_dir.into();
        let config = Self::load_config(&config_dir)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_dir,
        })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, CareError> {
        Self::new("./config")
    }

    /// Returns the current configuration.
    pub async fn get(&self) -> AppConfig {
        self.config.read().await.clone()
    }

    /// Reloads the configuration from disk.
    pub async fn reload(&self) -> Result<(), CareError> {
        let new_config = Self::load_config(&self.config_dir)?;
        let mut config = self.config.write().await;
        *config = new_config;
        info!("Configuration reloaded successfully");
        Ok(())
    }

    /// Loads configuration from the specified directory.
    fn load_config(config_dir: &str) -> Result<AppConfig, CareError> {
        // Load .env file if present
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var("CARESPHERE_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        // 1. Load default configuration
        let default_path = format!("{}/default.toml", config_dir);
        if Path::new(&default_path).exists() {
            debug!("Loading default config from: {}", default_path);
            builder = builder.add_source(File::with_name(&default_path).required(false));
        }

        // 2. Load environment-specific configuration
        let env_path = format!("{}/{}.toml", config_dir, environment);
        if Path::new(&env_path).exists() {
            debug!("Loading environment config from: {}", env_path);
            builder = builder.add_source(File::with_name(&env_path).required(false));
        }

        // 3. Load local overrides (not committed to version control)
        let local_path = format!("{}/local.toml", config_dir);
        if Path::new(&local_path).exists() {
            debug!("Loading local config from: {}", local_path);
            builder = builder.add_source(File::with_name(&local_path).required(false));
        }

        // 4. Override with environment variables (CARESPHERE_ prefix)
        builder = builder.add_source(
            Environment::with_prefix("CARESPHERE")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_error_to_care_error)?;

        let app_config: AppConfig = config
            .try_deserialize()
            .map_err(config_error_to_care_error)?;

        // Validate critical configuration
        Self::validate_config(&app_config)?;

        Ok(app_config)
    }

    /// Validates the configuration.
    fn validate_config(config: &AppConfig) -> Result<(), CareError> {
        if config.database.url.is_empty() {
            return Err(CareError::Configuration(
                "Database URL is required".to_string(),
            ));
        }

        if config.database.min_connections > config.database.max_connections {
            return Err(CareError::Configuration(format!(
                "Database min_connections ({}) cannot exceed max_connections ({})",
                config.database.min_connections, config.database.max_connections
            )));
        }

        Url::parse(&config.bible.base_url).map_err(|e| {
            CareError::Configuration(format!("Invalid Bible provider base URL: {}", e))
        })?;
        Url::parse(&config.messaging.base_url).map_err(|e| {
            CareError::Configuration(format!("Invalid messaging provider base URL: {}", e))
        })?;

        for (name, secs) in [
            ("bible.verse_ttl_secs", config.bible.verse_ttl_secs),
            ("bible.catalog_ttl_secs", config.bible.catalog_ttl_secs),
            ("bible.search_ttl_secs", config.bible.search_ttl_secs),
            ("bible.votd_ttl_secs", config.bible.votd_ttl_secs),
            ("messaging.timeout_secs", config.messaging.timeout_secs),
        ] {
            if secs == 0 {
                return Err(CareError::Configuration(format!(
                    "{} must be positive",
                    name
                )));
            }
        }

        if config.senders.from_email.trim().is_empty() {
            return Err(CareError::Configuration(
                "senders.from_email must not be blank".to_string(),
            ));
        }

        // Missing provider keys are not fatal at startup; the affected
        // operations fail fast at call time instead.
        if config.bible.api_key.trim().is_empty() {
            warn!("Bible provider API key is not configured; content operations will fail");
        }
        if config.messaging.api_key.trim().is_empty() {
            warn!("Messaging provider API key is not configured; sends will fail");
        }

        Ok(())
    }
}

fn config_error_to_care_error(err: ConfigError) -> CareError {
    CareError::Configuration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.bible.verse_ttl_secs, 604_800);
        assert_eq!(config.bible.catalog_ttl_secs, 2_592_000);
        assert_eq!(config.bible.search_ttl_secs, 86_400);
        assert_eq!(config.bible.votd_ttl_secs, 86_400);
        assert_eq!(config.messaging.timeout_secs, 30);
    }

    #[test]
    fn test_validate_rejects_empty_database_url() {
        let mut config = AppConfig::default();
        config.database.url = String::new();
        assert!(ConfigLoader::validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_rejects_zero_ttl() {
        let mut config = AppConfig::default();
        config.bible.votd_ttl_secs = 0;
        let err = ConfigLoader::validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("votd_ttl_secs"));
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let mut config = AppConfig::default();
        config.bible.base_url = "not a url".to_string();
        assert!(ConfigLoader::validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_pool_bounds() {
        let mut config = AppConfig::default();
        config.database.min_connections = 50;
        config.database.max_connections = 10;
        assert!(ConfigLoader::validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_accepts_defaults() {
        let config = AppConfig::default();
        assert!(ConfigLoader::validate_config(&config).is_ok());
    }

    #[tokio::test]
    async fn test_loads_layered_files() {
        let dir = tempfile::tempdir().unwrap();
        let default_path = dir.path().join("default.toml");
        let mut file = std::fs::File::create(&default_path).unwrap();
        writeln!(
            file,
            "[bible]\nverse_ttl_secs = 120\n\n[senders]\nfrom_name = \"Grace Chapel\""
        )
        .unwrap();

        let loader = ConfigLoader::new(dir.path().to_string_lossy().to_string()).unwrap();
        let config = loader.get().await;
        assert_eq!(config.bible.verse_ttl_secs, 120);
        assert_eq!(config.senders.from_name, "Grace Chapel");
        // Untouched sections keep their defaults.
        assert_eq!(config.messaging.timeout_secs, 30);
    }
}
