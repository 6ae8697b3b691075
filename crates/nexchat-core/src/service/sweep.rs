//! Liveness sweep over the chat directory.
//!
//! Reads every record, probes each one, and deletes the records whose probe
//! fails. There is no retry and no grace period: one failed probe removes the
//! record. Probes run through an ordered pipeline of `concurrency` slots, so
//! with the default of one slot the sweep is strictly sequential, and
//! `deleted_chats` always follows listing order.

use std::time::Duration;

use futures_util::StreamExt;
use futures_util::stream;
use nexchat_types::chat::ChatRecord;
use nexchat_types::config::AppConfig;
use nexchat_types::error::SweepError;
use nexchat_types::sweep::SweepSummary;

use crate::probe::{LivenessProbe, ProbeMethod, health_target};
use crate::repository::chat::ChatRepository;
use crate::service::cron_auth::CronAuthorizer;

#[derive(Debug, Clone)]
pub struct SweepSettings {
    /// Probe `{url}{health_path}` instead of the bare URL.
    pub probe_health_path: bool,
    pub health_path: String,
    pub timeout: Duration,
    pub concurrency: usize,
}

impl SweepSettings {
    /// A zero timeout would fail every probe, so the floor is one second.
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            probe_health_path: config.environment.is_production(),
            health_path: config.probe.health_path.clone(),
            timeout: Duration::from_secs(config.sweep.timeout_secs.max(1)),
            concurrency: config.sweep.concurrency.max(1),
        }
    }

    /// URL probed for a record.
    pub fn target_for(&self, chat: &ChatRecord) -> String {
        if self.probe_health_path {
            health_target(&chat.url, &self.health_path)
        } else {
            chat.url.clone()
        }
    }
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

/// Result of checking one record.
#[derive(Debug)]
enum Outcome {
    Alive,
    Deleted(String),
    /// The probe failed but the record was already gone.
    Vanished,
    /// The probe failed but the record could not be removed.
    DeleteFailed,
}

pub struct LivenessSweeper<R: ChatRepository, P: LivenessProbe> {
    repo: R,
    probe: P,
    authorizer: CronAuthorizer,
    settings: SweepSettings,
}

impl<R: ChatRepository, P: LivenessProbe> LivenessSweeper<R, P> {
    pub fn new(repo: R, probe: P, authorizer: CronAuthorizer, settings: SweepSettings) -> Self {
        Self {
            repo,
            probe,
            authorizer,
            settings,
        }
    }

    pub fn settings(&self) -> &SweepSettings {
        &self.settings
    }

    /// Entry point for external triggers: check the bearer credential, then
    /// sweep. A rejected credential touches nothing.
    pub async fn trigger(&self, authorization: Option<&str>) -> Result<SweepSummary, SweepError> {
        if let Err(e) = self.authorizer.authorize(authorization) {
            tracing::warn!("rejected sweep trigger with invalid credential");
            return Err(e);
        }
        self.sweep().await
    }

    /// Run one full sweep. Per-record failures never abort the sweep; only a
    /// failure to read the record set does.
    pub async fn sweep(&self) -> Result<SweepSummary, SweepError> {
        let chats = self.repo.list_all().await.map_err(|e| {
            tracing::error!(error = %e, "failed to read chats for sweep");
            SweepError::StorageError(e.to_string())
        })?;

        let total = chats.len();
        tracing::info!(total, concurrency = self.settings.concurrency, "liveness sweep started");

        let mut outcomes = stream::iter(chats.into_iter().map(|chat| self.check(chat)))
            .buffered(self.settings.concurrency.max(1));

        let mut summary = SweepSummary {
            ok: true,
            total,
            ..SweepSummary::default()
        };

        while let Some(outcome) = outcomes.next().await {
            summary.checked += 1;
            if let Outcome::Deleted(name) = outcome {
                summary.deleted += 1;
                summary.deleted_chats.push(name);
            }
        }

        tracing::info!(
            total = summary.total,
            checked = summary.checked,
            deleted = summary.deleted,
            "liveness sweep finished"
        );
        Ok(summary)
    }

    async fn check(&self, chat: ChatRecord) -> Outcome {
        let target = self.settings.target_for(&chat);

        let failure = match self
            .probe
            .probe(&target, ProbeMethod::Get, self.settings.timeout)
            .await
        {
            Ok(()) => {
                tracing::debug!(id = %chat.id, %target, "chat alive");
                return Outcome::Alive;
            }
            Err(failure) => failure,
        };

        tracing::warn!(id = %chat.id, name = %chat.name, %target, %failure, "chat failed liveness probe");

        match self.repo.delete(&chat.id).await {
            Ok(0) => {
                tracing::debug!(id = %chat.id, "unresponsive chat was already removed");
                Outcome::Vanished
            }
            Ok(_) => Outcome::Deleted(chat.name),
            Err(e) => {
                tracing::warn!(id = %chat.id, error = %e, "failed to delete unresponsive chat");
                Outcome::DeleteFailed
            }
        }
    }
}
