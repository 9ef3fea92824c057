use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Recipe API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Search behaviour
    #[serde(default)]
    pub search: SearchConfig,
    /// Local favorites and shopping list storage
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Configuration for the recipe API client
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL of the TheMealDB-compatible API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// What an ingredient search does when some of its lookups fail
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Any failed lookup fails the whole search
    #[default]
    FailFast,
    /// Failed lookups are dropped; the search fails only if all of them fail
    Partial,
}

/// Configuration for ingredient search
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SearchConfig {
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

/// Configuration for local storage
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding favorites.json and shopping_list.json
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "https://www.themealdb.com/api/json/v1/1".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".cooksmart")
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with COOKSMART__ prefix
    /// 2. cooksmart.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: COOKSMART__API__BASE_URL
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`AppConfig::load`] for the source priority.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("cooksmart").required(false))
        // Use double underscore for nested: COOKSMART__SEARCH__FAILURE_POLICY
        .add_source(
            Environment::with_prefix("COOKSMART")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = AppConfig::default();
        assert_eq!(
            config.api.base_url,
            "https://www.themealdb.com/api/json/v1/1"
        );
        assert_eq!(config.api.timeout(), Duration::from_secs(30));
        assert_eq!(config.search.failure_policy, FailurePolicy::FailFast);
        assert_eq!(config.storage.data_dir, PathBuf::from(".cooksmart"));
    }

    #[test]
    fn test_failure_policy_from_toml() {
        let config: AppConfig = Config::builder()
            .add_source(File::from_str(
                "[search]\nfailure_policy = \"partial\"\n\n[api]\ntimeout = 5\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.search.failure_policy, FailurePolicy::Partial);
        assert_eq!(config.api.timeout, 5);
        // Unset fields keep their defaults
        assert_eq!(
            config.api.base_url,
            "https://www.themealdb.com/api/json/v1/1"
        );
    }

    #[test]
    fn test_empty_source_uses_defaults() {
        let config: AppConfig = Config::builder()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config.search.failure_policy, FailurePolicy::FailFast);
    }
}
