//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and REST API.
//! Services are generic over repository/probe/key traits, but AppState pins
//! them to the concrete infra implementations.

use std::sync::Arc;

use nexchat_core::service::cron_auth::CronAuthorizer;
use nexchat_core::service::directory::{DirectoryService, DirectorySettings};
use nexchat_core::service::sweep::{LivenessSweeper, SweepSettings};
use nexchat_infra::config::resolve_database_url;
use nexchat_infra::crypto::hash::Sha256SecretKeyHasher;
use nexchat_infra::crypto::keygen::OsRngKeyGenerator;
use nexchat_infra::probe::http::HttpLivenessProbe;
use nexchat_infra::sqlite::chat::SqliteChatRepository;
use nexchat_infra::sqlite::pool::{DatabasePool, default_data_dir};
use nexchat_types::config::AppConfig;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteDirectoryService = DirectoryService<
    SqliteChatRepository,
    HttpLivenessProbe,
    OsRngKeyGenerator,
    Sha256SecretKeyHasher,
>;

pub type ConcreteSweeper = LivenessSweeper<SqliteChatRepository, HttpLivenessProbe>;

/// Shared application state holding all services.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<ConcreteDirectoryService>,
    pub sweeper: Arc<ConcreteSweeper>,
    pub config: Arc<AppConfig>,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: connect to DB, wire services.
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        // The default database lives in the data directory, which may not exist yet.
        if config.database.url.is_none() {
            tokio::fs::create_dir_all(default_data_dir()).await?;
        }

        let db_url = resolve_database_url(&config);
        let db_pool = DatabasePool::new(&db_url).await?;
        tracing::debug!(environment = %config.environment, "database opened");

        Ok(Self::from_pool(config, db_pool))
    }

    /// Wire services over an already opened pool.
    pub fn from_pool(config: AppConfig, db_pool: DatabasePool) -> Self {
        let directory = DirectoryService::new(
            SqliteChatRepository::new(db_pool.clone()),
            HttpLivenessProbe::new(),
            OsRngKeyGenerator::new(),
            Sha256SecretKeyHasher::new(),
            DirectorySettings::from_config(&config),
        );

        let authorizer = CronAuthorizer::new(config.cron.secret.clone());
        if !authorizer.is_configured() {
            tracing::warn!("CRON_SECRET is not set; every /cron request will be rejected");
        }

        let sweeper = LivenessSweeper::new(
            SqliteChatRepository::new(db_pool.clone()),
            HttpLivenessProbe::new(),
            authorizer,
            SweepSettings::from_config(&config),
        );

        Self {
            directory: Arc::new(directory),
            sweeper: Arc::new(sweeper),
            config: Arc::new(config),
            db_pool,
        }
    }
}
