//! Chat record repository trait definition.

use nexchat_types::chat::{ChatId, ChatRecord, NewChatRecord};
use nexchat_types::error::RepositoryError;

/// Repository trait for chat record persistence.
///
/// Mutations keyed by secret key are single filtered statements that report
/// the number of affected rows; callers treat zero as "no such key".
///
/// Implementations live in nexchat-infra (e.g., `SqliteChatRepository`).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait ChatRepository: Send + Sync {
    /// Insert a new record. Returns its public view.
    fn create(
        &self,
        chat: &NewChatRecord,
    ) -> impl std::future::Future<Output = Result<ChatRecord, RepositoryError>> + Send;

    /// One page of records ordered by `created_at` descending.
    fn find_page(
        &self,
        offset: i64,
        limit: i64,
    ) -> impl std::future::Future<Output = Result<Vec<ChatRecord>, RepositoryError>> + Send;

    /// Total number of records.
    fn count(&self) -> impl std::future::Future<Output = Result<i64, RepositoryError>> + Send;

    /// Every record, in insertion order.
    fn list_all(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<ChatRecord>, RepositoryError>> + Send;

    /// Set `name` on the record whose key digest matches. Returns rows affected.
    fn rename_by_secret(
        &self,
        secret_key_hash: &str,
        name: &str,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;

    /// Delete the record whose key digest matches. Returns rows affected.
    fn delete_by_secret(
        &self,
        secret_key_hash: &str,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;

    /// Delete a record by id. Returns rows affected.
    fn delete(
        &self,
        id: &ChatId,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
