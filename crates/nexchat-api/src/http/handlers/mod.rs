//! HTTP request handlers for the REST API.

pub mod chat;
pub mod console;
pub mod cron;
