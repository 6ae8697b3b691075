//! Chat directory handlers: list, create, rename, delete.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde_json::{Value, json};

use nexchat_types::chat::{ChatPage, CreateChatRequest, CreatedChat, RenameChatRequest};

use crate::http::error::AppError;
use crate::http::extractors::query::{ChatListQuery, DeleteChatQuery};
use crate::state::AppState;

/// GET /chats - One page of records, newest first.
pub async fn list_chats(
    State(state): State<AppState>,
    query: Result<Query<ChatListQuery>, QueryRejection>,
) -> Result<Json<ChatPage>, AppError> {
    let Query(query) = query.map_err(|e| AppError::Validation(e.body_text()))?;
    let (page, page_size) = query.resolve(state.directory.settings().default_page_size)?;

    let page = state.directory.list(page, page_size).await?;
    Ok(Json(page))
}

/// POST /chats - Register a chat server. The response is the only place the
/// secret key is ever returned.
pub async fn create_chat(
    State(state): State<AppState>,
    body: Result<Json<CreateChatRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedChat>), AppError> {
    let Json(body) = body.map_err(|e| AppError::Validation(e.body_text()))?;

    let created = state.directory.create(body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /chats - Rename the record owning `secret_key`.
pub async fn rename_chat(
    State(state): State<AppState>,
    body: Result<Json<RenameChatRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(body) = body.map_err(|e| AppError::Validation(e.body_text()))?;

    state.directory.rename(body).await?;
    Ok(Json(json!({ "message": "chat renamed" })))
}

/// DELETE /chats?secret_key=... - Delete the record owning `secret_key`.
pub async fn delete_chat(
    State(state): State<AppState>,
    query: Result<Query<DeleteChatQuery>, QueryRejection>,
) -> Result<Json<Value>, AppError> {
    let Query(query) = query.map_err(|e| AppError::Validation(e.body_text()))?;

    state.directory.delete(query.secret_key).await?;
    Ok(Json(json!({ "message": "chat deleted" })))
}
