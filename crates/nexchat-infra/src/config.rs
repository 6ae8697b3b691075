//! Configuration loader for NexChat.
//!
//! Reads `nexchat.toml` and deserializes it into [`AppConfig`], then applies
//! environment overrides. Falls back to defaults when the file is missing or
//! malformed.

use std::path::{Path, PathBuf};

use nexchat_types::config::{AppConfig, Environment};

use crate::sqlite::pool::default_database_url;

/// File name used when neither `--config` nor `NEXCHAT_CONFIG` is given.
pub const DEFAULT_CONFIG_FILE: &str = "nexchat.toml";

/// Resolve the configuration file path: explicit flag, then `NEXCHAT_CONFIG`,
/// then `./nexchat.toml`.
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    std::env::var("NEXCHAT_CONFIG")
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Load configuration from `path` and apply process environment overrides.
pub async fn load_config(path: &Path) -> AppConfig {
    let mut config = load_config_file(path).await;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    sanitize_config(&mut config);
    config
}

/// Load configuration from `path` only.
///
/// - If the file does not exist, returns [`AppConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and returns the default.
pub async fn load_config_file(path: &Path) -> AppConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            AppConfig::default()
        }
    }
}

/// Apply environment overrides using `lookup` to read variables.
///
/// Empty values are ignored. Unparseable values are logged and ignored.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(value) = get("NEXCHAT_ENV").or_else(|| get("NODE_ENV")) {
        match value.parse::<Environment>() {
            Ok(env) => config.environment = env,
            Err(err) => tracing::warn!("Ignoring environment override: {err}"),
        }
    }

    if let Some(secret) = get("CRON_SECRET") {
        config.cron.secret = Some(secret);
    }

    if let Some(url) = get("DATABASE_URL") {
        config.database.url = Some(url);
    }

    if let Some(host) = get("NEXCHAT_HOST") {
        config.server.host = host;
    }

    if let Some(port) = get("NEXCHAT_PORT") {
        match port.trim().parse::<u16>() {
            Ok(port) => config.server.port = port,
            Err(err) => tracing::warn!("Ignoring NEXCHAT_PORT={port}: {err}"),
        }
    }
}

/// Reset out-of-range values to their defaults, logging each one.
///
/// Zero timeouts would fail every probe, so they are rejected. Page sizes must
/// be positive with the default no larger than the cap.
pub fn sanitize_config(config: &mut AppConfig) {
    let defaults = AppConfig::default();

    if config.probe.create_timeout_secs == 0 {
        tracing::warn!(
            "probe.create_timeout_secs must be at least 1, using {}",
            defaults.probe.create_timeout_secs
        );
        config.probe.create_timeout_secs = defaults.probe.create_timeout_secs;
    }

    if config.sweep.timeout_secs == 0 {
        tracing::warn!(
            "sweep.timeout_secs must be at least 1, using {}",
            defaults.sweep.timeout_secs
        );
        config.sweep.timeout_secs = defaults.sweep.timeout_secs;
    }

    if config.api.max_page_size < 1 {
        tracing::warn!(
            "api.max_page_size = {} is not positive, using {}",
            config.api.max_page_size,
            defaults.api.max_page_size
        );
        config.api.max_page_size = defaults.api.max_page_size;
    }

    if !(1..=config.api.max_page_size).contains(&config.api.default_page_size) {
        let fallback = defaults.api.default_page_size.min(config.api.max_page_size);
        tracing::warn!(
            "api.default_page_size = {} is outside 1..={}, using {fallback}",
            config.api.default_page_size,
            config.api.max_page_size
        );
        config.api.default_page_size = fallback;
    }
}

/// The database URL to open: the configured one, or the data-directory default.
pub fn resolve_database_url(config: &AppConfig) -> String {
    config
        .database
        .url
        .clone()
        .unwrap_or_else(default_database_url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[tokio::test]
    async fn load_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config_file(&tmp.path().join("nexchat.toml")).await;
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.server.port, 3000);
        assert!(config.cron.secret.is_none());
    }

    #[tokio::test]
    async fn load_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nexchat.toml");
        tokio::fs::write(
            &path,
            r#"
environment = "production"

[server]
port = 8080

[sweep]
concurrency = 4
schedule = "every 30 minutes"
"#,
        )
        .await
        .unwrap();

        let config = load_config_file(&path).await;
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.sweep.concurrency, 4);
        assert_eq!(config.sweep.schedule.as_deref(), Some("every 30 minutes"));
        assert_eq!(config.probe.health_path, "/health");
    }

    #[tokio::test]
    async fn load_config_malformed_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nexchat.toml");
        tokio::fs::write(&path, "this is not [valid toml")
            .await
            .unwrap();

        let config = load_config_file(&path).await;
        assert_eq!(config.api.max_page_size, 100);
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = AppConfig::default();
        apply_env_overrides(
            &mut config,
            env(&[
                ("NEXCHAT_ENV", "production"),
                ("CRON_SECRET", "s3cret"),
                ("DATABASE_URL", "sqlite::memory:"),
                ("NEXCHAT_HOST", "0.0.0.0"),
                ("NEXCHAT_PORT", "9000"),
            ]),
        );

        assert!(config.environment.is_production());
        assert_eq!(config.cron.secret.as_deref(), Some("s3cret"));
        assert_eq!(config.database.url.as_deref(), Some("sqlite::memory:"));
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn node_env_is_fallback_for_environment() {
        let mut config = AppConfig::default();
        apply_env_overrides(&mut config, env(&[("NODE_ENV", "production")]));
        assert!(config.environment.is_production());

        let mut config = AppConfig::default();
        apply_env_overrides(
            &mut config,
            env(&[("NEXCHAT_ENV", "development"), ("NODE_ENV", "production")]),
        );
        assert!(!config.environment.is_production());
    }

    #[test]
    fn invalid_and_empty_overrides_are_ignored() {
        let mut config = AppConfig::default();
        apply_env_overrides(
            &mut config,
            env(&[
                ("NEXCHAT_ENV", "staging"),
                ("NEXCHAT_PORT", "not-a-port"),
                ("CRON_SECRET", ""),
            ]),
        );
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.server.port, 3000);
        assert!(config.cron.secret.is_none());
    }

    #[test]
    fn zero_timeouts_fall_back_to_defaults() {
        let mut config = AppConfig::default();
        config.sweep.timeout_secs = 0;
        config.probe.create_timeout_secs = 0;
        sanitize_config(&mut config);
        assert_eq!(config.sweep.timeout_secs, 5);
        assert_eq!(config.probe.create_timeout_secs, 5);
    }

    #[test]
    fn inverted_page_sizes_fall_back() {
        let mut config = AppConfig::default();
        config.api.default_page_size = 50;
        config.api.max_page_size = 20;
        sanitize_config(&mut config);
        assert_eq!(config.api.max_page_size, 20);
        assert_eq!(config.api.default_page_size, 10);

        let mut config = AppConfig::default();
        config.api.default_page_size = 10;
        config.api.max_page_size = 5;
        sanitize_config(&mut config);
        assert_eq!(config.api.default_page_size, 5);

        let mut config = AppConfig::default();
        config.api.default_page_size = 0;
        config.api.max_page_size = 0;
        sanitize_config(&mut config);
        assert_eq!(config.api.max_page_size, 100);
        assert_eq!(config.api.default_page_size, 10);
    }

    #[test]
    fn valid_values_survive_sanitizing() {
        let mut config = AppConfig::default();
        config.sweep.timeout_secs = 30;
        config.api.default_page_size = 25;
        config.api.max_page_size = 25;
        sanitize_config(&mut config);
        assert_eq!(config.sweep.timeout_secs, 30);
        assert_eq!(config.api.default_page_size, 25);
    }

    #[tokio::test]
    async fn load_config_sanitizes_file_values() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nexchat.toml");
        tokio::fs::write(
            &path,
            r#"
[sweep]
timeout_secs = 0

[api]
default_page_size = 500
"#,
        )
        .await
        .unwrap();

        let config = load_config(&path).await;
        assert_eq!(config.sweep.timeout_secs, 5);
        assert_eq!(config.api.default_page_size, 10);
    }

    #[test]
    fn explicit_config_path_wins() {
        let path = resolve_config_path(Some(Path::new("/etc/nexchat/custom.toml")));
        assert_eq!(path, PathBuf::from("/etc/nexchat/custom.toml"));
    }

    #[test]
    fn configured_database_url_wins() {
        let mut config = AppConfig::default();
        assert!(resolve_database_url(&config).contains("nexchat.db"));
        config.database.url = Some("sqlite:///tmp/x.db".to_string());
        assert_eq!(resolve_database_url(&config), "sqlite:///tmp/x.db");
    }
}
