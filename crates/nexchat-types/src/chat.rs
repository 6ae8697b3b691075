use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Unique identifier for a chat record, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatId(pub Uuid);

impl ChatId {
    /// Create a new ChatId using UUID v7.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for ChatId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChatId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Bearer token issued once when a chat is registered.
///
/// Holds the plaintext key. The `Debug` impl is redacted so the value never
/// ends up in logs; use [`SecretKey::expose`] where the plaintext is needed.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretKey(String);

impl SecretKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the plaintext key.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(****)")
    }
}

/// A directory entry pointing at an externally hosted chat server.
///
/// This is the public shape of a record: it never carries the secret key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRecord {
    pub id: ChatId,
    /// Human-readable label. The only mutable field.
    pub name: String,
    /// Base address of the chat server. Immutable after creation.
    pub url: String,
    pub created_at: DateTime<Utc>,
}

/// A freshly created chat record, including its secret key.
///
/// Returned exactly once, from the create operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedChat {
    pub id: ChatId,
    pub name: String,
    pub url: String,
    #[serde(rename = "secret_key")]
    pub secret_key: SecretKey,
    pub created_at: DateTime<Utc>,
}

impl CreatedChat {
    /// The public view of this record (without the secret key).
    pub fn record(&self) -> ChatRecord {
        ChatRecord {
            id: self.id.clone(),
            name: self.name.clone(),
            url: self.url.clone(),
            created_at: self.created_at,
        }
    }
}

/// Row handed to the record store on insert.
///
/// Carries the digest of the secret key, never the key itself.
#[derive(Debug, Clone)]
pub struct NewChatRecord {
    pub id: ChatId,
    pub name: String,
    pub url: String,
    pub secret_key_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /chats`. Fields are optional so that a missing field is
/// reported as an invalid argument rather than a decoding failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateChatRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Body of `PUT /chats`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenameChatRequest {
    #[serde(default)]
    pub secret_key: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Pagination metadata returned alongside a page of records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl Pagination {
    /// Compute pagination metadata. `page` and `page_size` must be >= 1.
    ///
    /// ```
    /// use nexchat_types::chat::Pagination;
    ///
    /// let p = Pagination::new(3, 10, 25);
    /// assert_eq!(p.total_pages, 3);
    /// assert!(!p.has_next_page);
    /// assert!(p.has_prev_page);
    /// ```
    pub fn new(page: i64, page_size: i64, total: i64) -> Self {
        let total_pages = (total + page_size - 1) / page_size;
        Self {
            page,
            page_size,
            total,
            total_pages,
            has_next_page: page < total_pages,
            has_prev_page: page > 1,
        }
    }

    /// Number of records to skip for `page`, or `None` when the offset does
    /// not fit in an `i64`. Such a page lies past any stored record.
    pub fn offset(page: i64, page_size: i64) -> Option<i64> {
        page.checked_sub(1)?.checked_mul(page_size)
    }
}

/// One page of the directory listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatPage {
    pub data: Vec<ChatRecord>,
    pub pagination: Pagination,
}
