//! SQLite chat record repository implementation.
//!
//! Implements `ChatRepository` from `nexchat-core` using sqlx with split read/write pools.

use chrono::{DateTime, SecondsFormat, Utc};
use nexchat_core::repository::chat::ChatRepository;
use nexchat_types::chat::{ChatId, ChatRecord, NewChatRecord};
use nexchat_types::error::RepositoryError;
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ChatRepository`.
pub struct SqliteChatRepository {
    pool: DatabasePool,
}

impl SqliteChatRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Columns selected for the public view. `secret_key_hash` is never read back.
const PUBLIC_COLUMNS: &str = "id, name, url, created_at";

/// Internal row type for mapping SQLite rows to domain ChatRecord.
struct ChatRow {
    id: String,
    name: String,
    url: String,
    created_at: String,
}

impl ChatRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            url: row.try_get("url")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_record(self) -> Result<ChatRecord, RepositoryError> {
        let id = self
            .id
            .parse::<ChatId>()
            .map_err(|e| RepositoryError::Query(format!("invalid chat id: {e}")))?;

        Ok(ChatRecord {
            id,
            name: self.name,
            url: self.url,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

/// Fixed-width RFC 3339 so that text ordering matches time ordering.
fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn map_rows(rows: &[sqlx::sqlite::SqliteRow]) -> Result<Vec<ChatRecord>, RepositoryError> {
    let mut chats = Vec::with_capacity(rows.len());
    for row in rows {
        let chat_row =
            ChatRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
        chats.push(chat_row.into_record()?);
    }
    Ok(chats)
}

impl ChatRepository for SqliteChatRepository {
    async fn create(&self, chat: &NewChatRecord) -> Result<ChatRecord, RepositoryError> {
        let created_at = format_datetime(&chat.created_at);

        let result = sqlx::query(
            "INSERT INTO chats (id, name, url, secret_key_hash, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(chat.id.to_string())
        .bind(&chat.name)
        .bind(&chat.url)
        .bind(&chat.secret_key_hash)
        .bind(&created_at)
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(_) => Ok(ChatRecord {
                id: chat.id.clone(),
                name: chat.name.clone(),
                url: chat.url.clone(),
                created_at: parse_datetime(&created_at)?,
            }),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => Err(
                RepositoryError::Conflict(format!("chat '{}' already exists", chat.id)),
            ),
            Err(e) => Err(RepositoryError::Query(e.to_string())),
        }
    }

    async fn find_page(&self, offset: i64, limit: i64) -> Result<Vec<ChatRecord>, RepositoryError> {
        let sql = format!(
            "SELECT {PUBLIC_COLUMNS} FROM chats ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?"
        );
        let rows = sqlx::query(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        map_rows(&rows)
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        let row = sqlx::query("SELECT COUNT(*) AS cnt FROM chats")
            .fetch_one(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.try_get("cnt")
            .map_err(|e| RepositoryError::Query(e.to_string()))
    }

    async fn list_all(&self) -> Result<Vec<ChatRecord>, RepositoryError> {
        let sql = format!("SELECT {PUBLIC_COLUMNS} FROM chats ORDER BY created_at ASC, id ASC");
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        map_rows(&rows)
    }

    async fn rename_by_secret(&self, secret_key_hash: &str, name: &str) -> Result<u64, RepositoryError> {
        let result = sqlx::query("UPDATE chats SET name = ? WHERE secret_key_hash = ?")
            .bind(name)
            .bind(secret_key_hash)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.rows_affected())
    }

    async fn delete_by_secret(&self, secret_key_hash: &str) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM chats WHERE secret_key_hash = ?")
            .bind(secret_key_hash)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: &ChatId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM chats WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
