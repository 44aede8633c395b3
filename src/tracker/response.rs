//! Decoding of HTTP tracker announce responses.
//!
//! A response is a bencoded dictionary. Peers come either packed into a single byte
//! string (6 bytes per IPv4 peer) or as a list of `{ip, port}` dictionaries. The
//! counters are optional and fall back to defaults when missing or mistyped.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Peer;
use crate::bencode::{BValue, Bencode, BencodeError};

/// Re-announce interval assumed when the tracker does not send one.
pub const DEFAULT_INTERVAL: u64 = 1800;

const COMPACT_PEER_LEN: usize = 6;

/// The useful part of a successful announce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerResponse {
    pub peers: Vec<Peer>,
    /// Seconds the tracker wants between announces.
    pub interval: u64,
    /// Seeders.
    pub complete: u64,
    /// Leechers.
    pub incomplete: u64,
    pub downloaded: u64,
}

impl TrackerResponse {
    pub fn from_bytes(body: &[u8]) -> Result<Self, BencodeError> {
        let value = Bencode::decode_bytes(body)?;
        Self::from_bvalue(&value)
    }

    pub fn from_bvalue(value: &BValue) -> Result<Self, BencodeError> {
        if value.as_dict().is_none() {
            return Err(BencodeError {
                position: 0,
                message: "top-level value is not a dictionary".to_string(),
            });
        }

        Ok(Self {
            peers: parse_peers(value.get(b"peers")),
            interval: value.get_uint_or(b"interval", DEFAULT_INTERVAL),
            complete: value.get_uint_or(b"complete", 0),
            incomplete: value.get_uint_or(b"incomplete", 0),
            downloaded: value.get_uint_or(b"downloaded", 0),
        })
    }
}

/// Extracts peers from the `peers` value in either compact or dictionary form.
/// Anything unusable is skipped rather than reported.
pub fn parse_peers(value: Option<&BValue>) -> Vec<Peer> {
    match value {
        Some(BValue::String(bytes)) => parse_compact_peers(bytes),
        Some(BValue::List(list)) => parse_dict_peers(list),
        Some(other) => {
            debug!("ignoring peers value of unexpected type: {}", other);
            Vec::new()
        }
        None => Vec::new(),
    }
}

fn parse_compact_peers(bytes: &[u8]) -> Vec<Peer> {
    let records = bytes.chunks_exact(COMPACT_PEER_LEN);
    if !records.remainder().is_empty() {
        debug!(
            "dropping {} trailing bytes of compact peer list",
            records.remainder().len()
        );
    }
    records
        .filter_map(|chunk| <&[u8; COMPACT_PEER_LEN]>::try_from(chunk).ok())
        .map(Peer::from_compact)
        .collect()
}

fn parse_dict_peers(list: &[BValue]) -> Vec<Peer> {
    list.iter()
        .filter_map(|entry| {
            let peer = parse_dict_peer(entry);
            if peer.is_none() {
                debug!("skipping malformed peer entry: {}", entry);
            }
            peer
        })
        .collect()
}

fn parse_dict_peer(entry: &BValue) -> Option<Peer> {
    let ip = entry.get(b"ip")?.as_str()?;
    let port = entry
        .get(b"port")?
        .as_integer()
        .and_then(|n| u16::try_from(n).ok())?;
    Some(Peer::new(ip, port))
}
