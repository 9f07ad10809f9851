use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub groups: GroupSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub images: ImageSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self { path: default_catalog_path() }
    }
}

fn default_catalog_path() -> String { "data/destinations.json".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct GroupSettings {
    #[serde(default = "default_group_ttl")]
    pub ttl_secs: u64,
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
    #[serde(default = "default_max_members")]
    pub max_members: usize,
    #[serde(default = "default_code_length")]
    pub code_length: usize,
}

impl Default for GroupSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_group_ttl(),
            sweep_interval_secs: default_sweep_interval(),
            max_members: default_max_members(),
            code_length: default_code_length(),
        }
    }
}

fn default_group_ttl() -> u64 { 86_400 }
fn default_sweep_interval() -> u64 { 300 }
fn default_max_members() -> usize { 20 }
fn default_code_length() -> usize { 6 }

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
    #[serde(default)]
    pub min_score: f64,
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            weights: WeightsConfig::default(),
            min_score: 0.0,
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

fn default_limit() -> usize { 10 }
fn default_max_limit() -> usize { 50 }

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_interests_weight")]
    pub interests: f64,
    #[serde(default = "default_budget_weight")]
    pub budget: f64,
    #[serde(default = "default_traveler_type_weight")]
    pub traveler_type: f64,
    #[serde(default = "default_season_weight")]
    pub season: f64,
    #[serde(default = "default_duration_weight")]
    pub duration: f64,
    #[serde(default = "default_climate_weight")]
    pub climate: f64,
    #[serde(default = "default_popularity_weight")]
    pub popularity: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            interests: default_interests_weight(),
            budget: default_budget_weight(),
            traveler_type: default_traveler_type_weight(),
            season: default_season_weight(),
            duration: default_duration_weight(),
            climate: default_climate_weight(),
            popularity: default_popularity_weight(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(w: &WeightsConfig) -> Self {
        Self {
            interests: w.interests,
            budget: w.budget,
            traveler_type: w.traveler_type,
            season: w.season,
            duration: w.duration,
            climate: w.climate,
            popularity: w.popularity,
        }
    }
}

fn default_interests_weight() -> f64 { 0.40 }
fn default_budget_weight() -> f64 { 0.20 }
fn default_traveler_type_weight() -> f64 { 0.15 }
fn default_season_weight() -> f64 { 0.10 }
fn default_duration_weight() -> f64 { 0.05 }
fn default_climate_weight() -> f64 { 0.05 }
fn default_popularity_weight() -> f64 { 0.05 }

#[derive(Debug, Clone, Deserialize)]
pub struct ImageSettings {
    #[serde(default = "default_l1_cache_size")]
    pub l1_cache_size: u64,
    #[serde(default = "default_image_ttl")]
    pub ttl_secs: u64,
    pub redis_url: Option<String>,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            l1_cache_size: default_l1_cache_size(),
            ttl_secs: default_image_ttl(),
            redis_url: None,
        }
    }
}

fn default_l1_cache_size() -> u64 { 10_000 }
fn default_image_ttl() -> u64 { 604_800 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with TRIPSYNC_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., TRIPSYNC__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("TRIPSYNC")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Clamp a client-requested limit into the configured range
    pub fn result_limit(&self, requested: Option<u16>) -> usize {
        requested
            .map(usize::from)
            .unwrap_or(self.scoring.default_limit)
            .clamp(1, self.scoring.max_limit.max(1))
    }
}

/// Apply well-known environment shortcuts on top of the layered config
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let redis_url = env::var("REDIS_URL").ok();
    let catalog_path = env::var("TRIPSYNC_CATALOG").ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(url) = redis_url {
        builder = builder.set_override("images.redis_url", url)?;
    }
    if let Some(path) = catalog_path {
        builder = builder.set_override("catalog.path", path)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = WeightsConfig::default();
        assert_eq!(weights.interests, 0.40);
        assert_eq!(weights.budget, 0.20);
        assert_eq!(weights.traveler_type, 0.15);
        assert_eq!(weights.season, 0.10);
        assert_eq!(ScoringWeights::from(&weights), ScoringWeights::default());
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "json");
    }

    #[test]
    fn test_shipped_config_parses() {
        let settings: Settings = toml::from_str(include_str!("../config/default.toml")).unwrap();
        assert_eq!(settings.groups.max_members, 20);
        assert_eq!(settings.catalog.path, "data/destinations.json");
        assert!(settings.images.redis_url.is_none());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let settings: Settings = toml::from_str("[server]\nport = 9000\n").unwrap();
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.groups.code_length, 6);
        assert_eq!(settings.scoring.default_limit, 10);
    }

    #[test]
    fn test_result_limit() {
        let settings = Settings::default();
        assert_eq!(settings.result_limit(None), 10);
        assert_eq!(settings.result_limit(Some(0)), 1);
        assert_eq!(settings.result_limit(Some(500)), 50);
    }
}
