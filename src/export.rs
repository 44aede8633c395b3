//! CSV and JSON renderings of the session log.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::session::{ExportRow, SessionEntry};

const CSV_HEADER: [&str; 7] = [
    "timestamp",
    "info_hash",
    "tracker_url",
    "peer_count",
    "seeders",
    "leechers",
    "peers_list",
];

/// Quotes a field when it contains a separator, quote or line break (RFC 4180).
fn csv_field(value: &str) -> String {
    if value.contains(&[',', '"', '\n', '\r'][..]) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

pub fn to_csv(rows: &[ExportRow]) -> String {
    let mut out = CSV_HEADER.join(",");
    out.push_str("\r\n");
    for row in rows {
        let fields = [
            csv_field(&row.timestamp),
            csv_field(&row.info_hash),
            csv_field(&row.tracker_url),
            row.peer_count.to_string(),
            row.seeders.to_string(),
            row.leechers.to_string(),
            csv_field(&row.peers_list),
        ];
        out.push_str(&fields.join(","));
        out.push_str("\r\n");
    }
    out
}

pub fn to_json(entries: &[SessionEntry]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(entries)
}

pub fn write_csv(path: impl AsRef<Path>, rows: &[ExportRow]) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, to_csv(rows)).with_context(|| format!("write {}", path.display()))
}

pub fn write_json(path: impl AsRef<Path>, entries: &[SessionEntry]) -> Result<()> {
    let path = path.as_ref();
    let json = to_json(entries).context("serialize session log")?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))
}
