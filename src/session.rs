//! In-memory history of announce attempts.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::tracker::AnnounceResult;

/// One announce attempt. Never changed once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEntry {
    pub timestamp: DateTime<Utc>,
    /// Lowercase hex of the normalised hash, or the input as given if it was rejected.
    pub info_hash: String,
    pub tracker_url: String,
    pub result: AnnounceResult,
}

impl SessionEntry {
    pub fn new(
        info_hash: impl Into<String>,
        tracker_url: impl Into<String>,
        result: AnnounceResult,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            info_hash: info_hash.into(),
            tracker_url: tracker_url.into(),
            result,
        }
    }
}

/// Flattened view of a [`SessionEntry`] for tabular export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRow {
    pub timestamp: String,
    pub info_hash: String,
    pub tracker_url: String,
    pub peer_count: usize,
    pub seeders: u64,
    pub leechers: u64,
    /// `ip:port` pairs joined by `"; "`.
    pub peers_list: String,
}

impl From<&SessionEntry> for ExportRow {
    fn from(entry: &SessionEntry) -> Self {
        let peers = entry.result.peers();
        Self {
            timestamp: entry.timestamp.to_rfc3339(),
            info_hash: entry.info_hash.clone(),
            tracker_url: entry.tracker_url.clone(),
            peer_count: peers.len(),
            seeders: entry.result.seeders(),
            leechers: entry.result.leechers(),
            peers_list: peers
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; "),
        }
    }
}

/// Append-only log shared by every announce in the process.
#[derive(Debug, Default)]
pub struct SessionLog {
    entries: RwLock<Vec<SessionEntry>>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, entry: SessionEntry) {
        self.entries.write().push(entry);
    }

    /// Every entry, oldest first.
    pub fn all(&self) -> Vec<SessionEntry> {
        self.entries.read().clone()
    }

    pub fn export_rows(&self) -> Vec<ExportRow> {
        self.entries.read().iter().map(ExportRow::from).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
