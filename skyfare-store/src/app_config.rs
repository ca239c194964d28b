use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub bundle_rules: BundleRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// JSON array of flight records
    pub seed_path: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    #[default]
    Memory,
    Redis,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    #[serde(default)]
    pub backend: SessionBackend,
    pub redis_url: Option<String>,
    #[serde(default = "default_session_ttl")]
    pub ttl_seconds: u64,
}

fn default_session_ttl() -> u64 { 1800 }

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            backend: SessionBackend::Memory,
            redis_url: None,
            ttl_seconds: default_session_ttl(),
        }
    }
}

/// International bundle pricing
#[derive(Debug, Deserialize, Clone)]
pub struct BundleRules {
    #[serde(default = "default_saver_multiplier")]
    pub saver_multiplier: f64,
    #[serde(default = "default_flex_multiplier")]
    pub flex_multiplier: f64,
    #[serde(default)]
    pub commission_inr: i64,
}

fn default_saver_multiplier() -> f64 { 0.95 }
fn default_flex_multiplier() -> f64 { 1.02 }

impl Default for BundleRules {
    fn default() -> Self {
        Self {
            saver_multiplier: default_saver_multiplier(),
            flex_multiplier: default_flex_multiplier(),
            commission_inr: 0,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Optional per-environment overrides
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. `SKYFARE_SESSION__BACKEND=redis`
            .add_source(config::Environment::with_prefix("SKYFARE").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    /// Parse a TOML document, without files or environment overrides
    pub fn from_toml(toml: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
