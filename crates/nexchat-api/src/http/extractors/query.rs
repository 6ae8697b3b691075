//! Query parameter extractors for the chat endpoints.
//!
//! Numeric parameters are captured as strings and parsed here so a
//! non-numeric value becomes a `{ "error" }` 400 instead of an extractor
//! rejection.

use serde::Deserialize;

use crate::http::error::AppError;

/// Query parameters for `GET /chats`.
#[derive(Debug, Deserialize, Default)]
pub struct ChatListQuery {
    pub page: Option<String>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<String>,
}

impl ChatListQuery {
    /// Resolve `(page, pageSize)`, defaulting to page 1 and `default_page_size`.
    ///
    /// Range checks are left to the directory service.
    pub fn resolve(&self, default_page_size: i64) -> Result<(i64, i64), AppError> {
        let page = parse_int(self.page.as_deref(), "page")?.unwrap_or(1);
        let page_size = parse_int(self.page_size.as_deref(), "pageSize")?.unwrap_or(default_page_size);
        Ok((page, page_size))
    }
}

/// Query parameters for `DELETE /chats`.
#[derive(Debug, Deserialize, Default)]
pub struct DeleteChatQuery {
    pub secret_key: Option<String>,
}

fn parse_int(value: Option<&str>, field: &str) -> Result<Option<i64>, AppError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse::<i64>()
            .map(Some)
            .map_err(|_| AppError::Validation(format!("{field} must be an integer >= 1"))),
    }
}
