//! Result types for the liveness sweep.

use serde::{Deserialize, Serialize};

/// Summary of one sweep over the directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepSummary {
    pub ok: bool,
    /// Records read from the store at the start of the sweep.
    pub total: usize,
    /// Records that went through a probe.
    pub checked: usize,
    /// Records removed because their probe failed.
    pub deleted: usize,
    /// Names of the removed records, in listing order.
    pub deleted_chats: Vec<String>,
}
