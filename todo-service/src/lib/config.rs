use std::env;

use auth::TokenSettings;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub password: PasswordConfig,
    #[serde(default)]
    pub cookie: CookieConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_access_token_ttl_seconds")]
    pub access_token_ttl_seconds: i64,
    #[serde(default = "default_refresh_token_ttl_seconds")]
    pub refresh_token_ttl_seconds: i64,
    #[serde(default = "default_enforce_token_type")]
    pub enforce_token_type: bool,
}

impl JwtConfig {
    pub fn token_settings(&self) -> TokenSettings {
        TokenSettings {
            access_token_ttl: chrono::Duration::seconds(self.access_token_ttl_seconds),
            refresh_token_ttl: chrono::Duration::seconds(self.refresh_token_ttl_seconds),
            enforce_token_type: self.enforce_token_type,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    pub hash_cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            hash_cost: auth::PasswordHasher::DEFAULT_COST,
        }
    }
}

/// Attributes of the refresh token cookie.
#[derive(Debug, Deserialize, Clone)]
pub struct CookieConfig {
    pub secure: bool,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self { secure: true }
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_access_token_ttl_seconds() -> i64 {
    60
}

fn default_refresh_token_ttl_seconds() -> i64 {
    7 * 24 * 60 * 60
}

fn default_enforce_token_type() -> bool {
    true
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        configuration.try_deserialize()
    }
}
