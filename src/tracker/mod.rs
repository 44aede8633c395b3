mod client;
mod info_hash;
mod peer;
mod request;
pub mod response;


use serde::{Deserialize, Serialize};

pub use client::TrackerClient;
pub use info_hash::InfoHash;
pub use peer::{Peer, PeerId};
pub use request::{AnnounceEvent, AnnounceRequest};
pub use response::TrackerResponse;

use crate::error::AnnounceError;

/// Outcome of one announce as handed back to callers and kept in the session log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AnnounceResult {
    Success(TrackerResponse),
    Failure { reason: String },
}

impl AnnounceResult {
    pub fn is_success(&self) -> bool {
        matches!(self, AnnounceResult::Success(_))
    }

    /// Peers returned by the tracker; empty for a failure.
    pub fn peers(&self) -> &[Peer] {
        match self {
            AnnounceResult::Success(response) => &response.peers,
            AnnounceResult::Failure { .. } => &[],
        }
    }

    pub fn seeders(&self) -> u64 {
        match self {
            AnnounceResult::Success(response) => response.complete,
            AnnounceResult::Failure { .. } => 0,
        }
    }

    pub fn leechers(&self) -> u64 {
        match self {
            AnnounceResult::Success(response) => response.incomplete,
            AnnounceResult::Failure { .. } => 0,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            AnnounceResult::Success(_) => None,
            AnnounceResult::Failure { reason } => Some(reason),
        }
    }
}

impl From<Result<TrackerResponse, AnnounceError>> for AnnounceResult {
    fn from(outcome: Result<TrackerResponse, AnnounceError>) -> Self {
        match outcome {
            Ok(response) => AnnounceResult::Success(response),
            Err(err) => AnnounceResult::Failure {
                reason: err.to_string(),
            },
        }
    }
}
