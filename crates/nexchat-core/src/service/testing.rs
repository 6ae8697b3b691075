//! In-memory doubles for service tests.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use nexchat_types::chat::{ChatId, ChatRecord, NewChatRecord, SecretKey};
use nexchat_types::error::RepositoryError;

use crate::probe::{LivenessProbe, ProbeFailure, ProbeMethod};
use crate::repository::chat::ChatRepository;
use crate::service::hash::SecretKeyHasher;
use crate::service::keygen::KeyGenerator;

#[derive(Default)]
struct Inner {
    rows: Vec<NewChatRecord>,
    fail_all: bool,
    fail_delete: HashSet<String>,
    removed_after_list: HashSet<String>,
}

/// Vec-backed repository that counts store accesses.
#[derive(Clone, Default)]
pub struct MemoryChatRepository {
    inner: Arc<Mutex<Inner>>,
    reads: Arc<AtomicUsize>,
    writes: Arc<AtomicUsize>,
}

impl MemoryChatRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_all(&self) {
        self.inner.lock().unwrap().fail_all = true;
    }

    /// Make `delete(id)` fail for the record with this name.
    pub fn fail_delete_of(&self, name: &str) {
        self.inner.lock().unwrap().fail_delete.insert(name.to_string());
    }

    /// Remove the record with this name right after `list_all` returns it,
    /// as a concurrent owner delete would.
    pub fn remove_after_list(&self, name: &str) {
        self.inner
            .lock()
            .unwrap()
            .removed_after_list
            .insert(name.to_string());
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().rows.len()
    }

    pub fn names(&self) -> Vec<String> {
        self.inner
            .lock()
            .unwrap()
            .rows
            .iter()
            .map(|r| r.name.clone())
            .collect()
    }

    pub fn stored_hashes(&self) -> Vec<String> {
        self.inner
            .lock()
            .unwrap()
            .rows
            .iter()
            .map(|r| r.secret_key_hash.clone())
            .collect()
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Insert a record directly, bypassing the service.
    pub fn seed(&self, name: &str, url: &str) -> ChatId {
        let id = ChatId::new();
        self.inner.lock().unwrap().rows.push(NewChatRecord {
            id: id.clone(),
            name: name.to_string(),
            url: url.to_string(),
            secret_key_hash: format!("seed:{name}"),
            created_at: chrono::Utc::now(),
        });
        id
    }

    fn check(&self) -> Result<(), RepositoryError> {
        if self.inner.lock().unwrap().fail_all {
            Err(RepositoryError::Connection)
        } else {
            Ok(())
        }
    }
}

fn public(row: &NewChatRecord) -> ChatRecord {
    ChatRecord {
        id: row.id.clone(),
        name: row.name.clone(),
        url: row.url.clone(),
        created_at: row.created_at,
    }
}

impl ChatRepository for MemoryChatRepository {
    async fn create(&self, chat: &NewChatRecord) -> Result<ChatRecord, RepositoryError> {
        self.check()?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.lock().unwrap().rows.push(chat.clone());
        Ok(public(chat))
    }

    async fn find_page(&self, offset: i64, limit: i64) -> Result<Vec<ChatRecord>, RepositoryError> {
        self.check()?;
        self.reads.fetch_add(1, Ordering::SeqCst);
        let mut rows: Vec<ChatRecord> = self.inner.lock().unwrap().rows.iter().map(public).collect();
        rows.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.0.cmp(&a.id.0))
        });
        Ok(rows
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        self.check()?;
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.inner.lock().unwrap().rows.len() as i64)
    }

    async fn list_all(&self) -> Result<Vec<ChatRecord>, RepositoryError> {
        self.check()?;
        self.reads.fetch_add(1, Ordering::SeqCst);
        let mut inner = self.inner.lock().unwrap();
        let listed: Vec<ChatRecord> = inner.rows.iter().map(public).collect();
        let removed = std::mem::take(&mut inner.removed_after_list);
        inner.rows.retain(|r| !removed.contains(&r.name));
        Ok(listed)
    }

    async fn rename_by_secret(&self, secret_key_hash: &str, name: &str) -> Result<u64, RepositoryError> {
        self.check()?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut inner = self.inner.lock().unwrap();
        let mut affected = 0;
        for row in inner.rows.iter_mut().filter(|r| r.secret_key_hash == secret_key_hash) {
            row.name = name.to_string();
            affected += 1;
        }
        Ok(affected)
    }

    async fn delete_by_secret(&self, secret_key_hash: &str) -> Result<u64, RepositoryError> {
        self.check()?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut inner = self.inner.lock().unwrap();
        let before = inner.rows.len();
        inner.rows.retain(|r| r.secret_key_hash != secret_key_hash);
        Ok((before - inner.rows.len()) as u64)
    }

    async fn delete(&self, id: &ChatId) -> Result<u64, RepositoryError> {
        self.check()?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut inner = self.inner.lock().unwrap();
        if inner
            .rows
            .iter()
            .any(|r| &r.id == id && inner.fail_delete.contains(&r.name))
        {
            return Err(RepositoryError::Query("delete failed".to_string()));
        }
        let before = inner.rows.len();
        inner.rows.retain(|r| &r.id != id);
        Ok((before - inner.rows.len()) as u64)
    }
}

#[derive(Default)]
struct ProbeState {
    failing: HashSet<String>,
    calls: Vec<(String, ProbeMethod)>,
}

/// Probe that fails for a fixed set of targets and records every call.
#[derive(Clone, Default)]
pub struct ScriptedProbe {
    state: Arc<Mutex<ProbeState>>,
    delay: Option<Duration>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl ScriptedProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(self, target: &str) -> Self {
        self.state.lock().unwrap().failing.insert(target.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<(String, ProbeMethod)> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Highest number of probes observed running at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl LivenessProbe for ScriptedProbe {
    async fn probe(
        &self,
        target: &str,
        method: ProbeMethod,
        timeout: Duration,
    ) -> Result<(), ProbeFailure> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let mut state = self.state.lock().unwrap();
        state.calls.push((target.to_string(), method));
        if state.failing.contains(target) {
            Err(ProbeFailure::Timeout(timeout))
        } else {
            Ok(())
        }
    }
}

/// Deterministic, unique 64-hex-char keys.
#[derive(Default)]
pub struct CountingKeys {
    next: AtomicU64,
}

impl KeyGenerator for CountingKeys {
    fn generate(&self) -> SecretKey {
        let n = self.next.fetch_add(1, Ordering::SeqCst);
        SecretKey::new(format!("{n:064x}"))
    }
}

/// Reversible "digest" so tests can see what the store received.
pub struct PlainHasher;

impl SecretKeyHasher for PlainHasher {
    fn digest(&self, secret_key: &str) -> String {
        format!("digest:{secret_key}")
    }
}
