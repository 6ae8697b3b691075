//! Configuration types for the NexChat directory.
//!
//! `AppConfig` represents `nexchat.toml`. Every field has a default, so an
//! empty or missing file is a valid configuration. Environment overrides are
//! applied by the loader in `nexchat-infra`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Deployment mode.
///
/// Production enables the URL reachability check on create, probes the
/// health path during sweeps, and hides the admin console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Ok(Environment::Production),
            "development" | "dev" | "test" => Ok(Environment::Development),
            other => Err(format!("invalid environment: '{other}'")),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub cron: CronConfig,
    #[serde(default)]
    pub probe: ProbeConfig,
    #[serde(default)]
    pub sweep: SweepConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Record store location. `None` means "derive from the data directory".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: Option<String>,
}

/// Shared secret expected in `Authorization: Bearer <secret>` on `/cron`.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CronConfig {
    #[serde(default)]
    pub secret: Option<String>,
}

impl fmt::Debug for CronConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CronConfig")
            .field("secret", &self.secret.as_ref().map(|_| "****"))
            .finish()
    }
}

/// Liveness probe settings shared by create and sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Path appended to a chat URL to reach its health endpoint.
    #[serde(default = "default_health_path")]
    pub health_path: String,
    /// Timeout of the reachability check performed on create.
    #[serde(default = "default_timeout_secs")]
    pub create_timeout_secs: u64,
}

fn default_health_path() -> String {
    "/health".to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            health_path: default_health_path(),
            create_timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Per-probe timeout during a sweep.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Number of probes in flight at once. 1 means strictly sequential.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Optional in-process schedule ("every 30 minutes", or a cron expression).
    #[serde(default)]
    pub schedule: Option<String>,
}

fn default_concurrency() -> usize {
    1
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            concurrency: default_concurrency(),
            schedule: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: i64,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: i64,
}

fn default_page_size() -> i64 {
    10
}

fn default_max_page_size() -> i64 {
    100
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}
