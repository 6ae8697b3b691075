//! Chat directory service.
//!
//! Lists, registers, renames and deletes chat records. Rename and delete are
//! authorized by the secret key issued at creation: the key is digested and
//! the store performs a single filtered mutation whose affected-row count
//! decides between success and `NotFound`.

use std::time::Duration;

use nexchat_types::chat::{
    ChatId, ChatPage, CreateChatRequest, CreatedChat, NewChatRecord, Pagination,
    RenameChatRequest,
};
use nexchat_types::config::AppConfig;
use nexchat_types::error::{ChatError, RepositoryError};

use crate::probe::{LivenessProbe, ProbeMethod, health_target};
use crate::repository::chat::ChatRepository;
use crate::service::hash::SecretKeyHasher;
use crate::service::keygen::KeyGenerator;

/// Knobs of the directory service derived from [`AppConfig`].
#[derive(Debug, Clone)]
pub struct DirectorySettings {
    /// Probe `{url}{health_path}` before accepting a new record.
    pub precheck_urls: bool,
    pub health_path: String,
    pub precheck_timeout: Duration,
    /// Page size used when a listing names none. Always within `1..=max_page_size`.
    pub default_page_size: i64,
    pub max_page_size: i64,
}

impl DirectorySettings {
    /// Timeouts are at least one second and page sizes at least one; a default
    /// page size above the cap is lowered to the cap.
    pub fn from_config(config: &AppConfig) -> Self {
        let max_page_size = config.api.max_page_size.max(1);
        Self {
            precheck_urls: config.environment.is_production(),
            health_path: config.probe.health_path.clone(),
            precheck_timeout: Duration::from_secs(config.probe.create_timeout_secs.max(1)),
            default_page_size: config.api.default_page_size.clamp(1, max_page_size),
            max_page_size,
        }
    }
}

impl Default for DirectorySettings {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

/// Service orchestrating the chat record lifecycle.
///
/// Generic over repository and infrastructure traits to maintain clean
/// architecture -- nexchat-core never depends on nexchat-infra.
pub struct DirectoryService<R: ChatRepository, P: LivenessProbe, K: KeyGenerator, H: SecretKeyHasher>
{
    repo: R,
    probe: P,
    keys: K,
    hasher: H,
    settings: DirectorySettings,
}

impl<R: ChatRepository, P: LivenessProbe, K: KeyGenerator, H: SecretKeyHasher>
    DirectoryService<R, P, K, H>
{
    pub fn new(repo: R, probe: P, keys: K, hasher: H, settings: DirectorySettings) -> Self {
        Self {
            repo,
            probe,
            keys,
            hasher,
            settings,
        }
    }

    pub fn settings(&self) -> &DirectorySettings {
        &self.settings
    }

    /// List one page of records, newest first.
    ///
    /// Issues one count and one bounded read. Pages past the end return an
    /// empty `data` array with accurate pagination metadata.
    pub async fn list(&self, page: i64, page_size: i64) -> Result<ChatPage, ChatError> {
        if page < 1 {
            return Err(ChatError::InvalidArgument(
                "page must be an integer >= 1".to_string(),
            ));
        }
        if page_size < 1 {
            return Err(ChatError::InvalidArgument(
                "pageSize must be an integer >= 1".to_string(),
            ));
        }
        if page_size > self.settings.max_page_size {
            return Err(ChatError::InvalidArgument(format!(
                "pageSize must not exceed {}",
                self.settings.max_page_size
            )));
        }

        let total = self.repo.count().await.map_err(storage("count chats"))?;
        let data = match Pagination::offset(page, page_size) {
            Some(offset) => self
                .repo
                .find_page(offset, page_size)
                .await
                .map_err(storage("list chats"))?,
            None => Vec::new(),
        };

        Ok(ChatPage {
            data,
            pagination: Pagination::new(page, page_size, total),
        })
    }

    /// Register a new chat server and issue its secret key.
    ///
    /// When URL prechecks are enabled, the server's health endpoint must
    /// answer `200` to a HEAD request before anything is written.
    pub async fn create(&self, request: CreateChatRequest) -> Result<CreatedChat, ChatError> {
        let name = required(request.name, "name")?;
        let url = required(request.url, "url")?;
        validate_url(&url)?;

        if self.settings.precheck_urls {
            let target = health_target(&url, &self.settings.health_path);
            if let Err(failure) = self
                .probe
                .probe(&target, ProbeMethod::Head, self.settings.precheck_timeout)
                .await
            {
                tracing::info!(%target, %failure, "rejecting chat with unreachable URL");
                return Err(ChatError::Unreachable);
            }
        }

        let secret_key = self.keys.generate();
        let record = NewChatRecord {
            id: ChatId::new(),
            name,
            url,
            secret_key_hash: self.hasher.digest(secret_key.expose()),
            created_at: chrono::Utc::now(),
        };

        let created = self
            .repo
            .create(&record)
            .await
            .map_err(storage("create chat"))?;

        tracing::info!(id = %created.id, name = %created.name, url = %created.url, "chat created");

        Ok(CreatedChat {
            id: created.id,
            name: created.name,
            url: created.url,
            secret_key,
            created_at: created.created_at,
        })
    }

    /// Rename the record owning `secret_key`.
    pub async fn rename(&self, request: RenameChatRequest) -> Result<(), ChatError> {
        let secret_key = required(request.secret_key, "secret_key")?;
        let name = required(request.name, "name")?;

        let affected = self
            .repo
            .rename_by_secret(&self.hasher.digest(&secret_key), &name)
            .await
            .map_err(storage("rename chat"))?;

        if affected == 0 {
            return Err(ChatError::NotFound);
        }

        tracing::info!(%name, "chat renamed");
        Ok(())
    }

    /// Delete the record owning `secret_key`. Deletion is final.
    pub async fn delete(&self, secret_key: Option<String>) -> Result<(), ChatError> {
        let secret_key = required(secret_key, "secret_key")?;

        let affected = self
            .repo
            .delete_by_secret(&self.hasher.digest(&secret_key))
            .await
            .map_err(storage("delete chat"))?;

        if affected == 0 {
            return Err(ChatError::NotFound);
        }

        tracing::info!("chat deleted");
        Ok(())
    }
}

/// Trimmed, non-empty value of a required field.
fn required(value: Option<String>, field: &str) -> Result<String, ChatError> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ChatError::InvalidArgument(format!("{field} is required"))),
    }
}

/// Registered URLs must be absolute http(s) addresses with a host.
fn validate_url(raw: &str) -> Result<(), ChatError> {
    let parsed = url::Url::parse(raw)
        .map_err(|e| ChatError::InvalidArgument(format!("url is invalid: {e}")))?;

    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(ChatError::InvalidArgument(
            "url must be an http or https address".to_string(),
        ));
    }
    Ok(())
}

fn storage(action: &'static str) -> impl Fn(RepositoryError) -> ChatError {
    move |e| {
        tracing::error!(error = %e, "failed to {action}");
        ChatError::StorageError(e.to_string())
    }
}
