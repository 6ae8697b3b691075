//! Request extractors: the cron bearer header and list/delete query strings.

pub mod auth;
pub mod query;
