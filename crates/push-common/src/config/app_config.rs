//! Application configuration structs
//!
//! Loads configuration from environment variables and `.env` files.

use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub store: StoreConfig,
    pub redis: Option<RedisConfig>,
    pub fcm: FcmConfig,
    pub messaging: MessagingConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Which session store implementation to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Redis,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "redis" => Ok(Self::Redis),
            "memory" => Ok(Self::Memory),
            other => Err(ConfigError::InvalidValue("STORE_BACKEND", other.to_string())),
        }
    }
}

/// Session store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    /// Namespace for session keys
    #[serde(default = "default_table_name")]
    pub table_name: String,
}

/// Redis configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    #[serde(default = "default_redis_max_connections")]
    pub max_connections: u32,
}

/// Firebase Cloud Messaging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FcmConfig {
    /// Legacy server key, sent as `Authorization: key=<server_key>`
    #[serde(default)]
    pub server_key: String,
    #[serde(default = "default_fcm_send_url")]
    pub send_url: String,
    #[serde(default = "default_fcm_iid_url")]
    pub iid_url: String,
    #[serde(default = "default_fcm_timeout")]
    pub timeout_secs: u64,
}

/// Messaging behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MessagingConfig {
    /// Topic every registered device is subscribed to for profile updates
    #[serde(default = "default_profile_topic")]
    pub profile_topic: String,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

// Default value functions
fn default_app_name() -> String {
    "push-relay".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_table_name() -> String {
    "push-sessions".to_string()
}

fn default_redis_max_connections() -> u32 {
    10
}

fn default_fcm_send_url() -> String {
    "https://fcm.googleapis.com/fcm/send".to_string()
}

fn default_fcm_iid_url() -> String {
    "https://iid.googleapis.com/iid/v1".to_string()
}

fn default_fcm_timeout() -> u64 {
    10
}

fn default_profile_topic() -> String {
    "profile-update".to_string()
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            profile_topic: default_profile_topic(),
        }
    }
}

impl Default for FcmConfig {
    fn default() -> Self {
        Self {
            server_key: String::new(),
            send_url: default_fcm_send_url(),
            iid_url: default_fcm_iid_url(),
            timeout_secs: default_fcm_timeout(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_second: default_requests_per_second(),
            burst: default_burst(),
        }
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|s| s.parse().ok())
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// # Errors
    /// Returns an error if required variables are missing or malformed
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store = StoreConfig {
            backend: lookup("STORE_BACKEND")
                .map(|s| s.parse())
                .transpose()?
                .unwrap_or_default(),
            table_name: lookup("SESSION_TABLE_NAME").unwrap_or_else(default_table_name),
        };

        let redis = match lookup("REDIS_URL") {
            Some(url) => Some(RedisConfig {
                url,
                max_connections: parse_var(&lookup, "REDIS_MAX_CONNECTIONS")
                    .unwrap_or_else(default_redis_max_connections),
            }),
            None if store.backend == StoreBackend::Redis => {
                return Err(ConfigError::MissingVar("REDIS_URL"));
            }
            None => None,
        };

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: lookup("APP_ENV")
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
                log_level: lookup("LOG_LEVEL").unwrap_or_else(default_log_level),
            },
            api: ServerConfig {
                host: lookup("API_HOST").unwrap_or_else(default_host),
                port: parse_var(&lookup, "API_PORT").ok_or(ConfigError::MissingVar("API_PORT"))?,
            },
            store,
            redis,
            fcm: FcmConfig {
                server_key: lookup("FCM_SERVER_KEY").unwrap_or_default(),
                send_url: lookup("FCM_SEND_URL").unwrap_or_else(default_fcm_send_url),
                iid_url: lookup("FCM_IID_URL").unwrap_or_else(default_fcm_iid_url),
                timeout_secs: parse_var(&lookup, "FCM_TIMEOUT_SECS").unwrap_or_else(default_fcm_timeout),
            },
            messaging: MessagingConfig {
                profile_topic: lookup("PROFILE_TOPIC").unwrap_or_else(default_profile_topic),
            },
            rate_limit: RateLimitConfig {
                requests_per_second: parse_var(&lookup, "RATE_LIMIT_REQUESTS_PER_SECOND")
                    .unwrap_or_else(default_requests_per_second),
                burst: parse_var(&lookup, "RATE_LIMIT_BURST").unwrap_or_else(default_burst),
            },
            cors: CorsConfig {
                allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|s| !s.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
