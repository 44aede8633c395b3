//! HTTP BitTorrent tracker announce client.
//!
//! [`TrackerClient::announce`] sends a `started` announce for an info hash, decodes the
//! bencoded reply into peers and swarm counters, and records the attempt in a shared
//! [`SessionLog`]. Failures never escape as errors; they come back as
//! [`AnnounceResult::Failure`] with a readable reason.

pub mod bencode;
pub mod config;
pub mod error;
pub mod export;
pub mod session;
pub mod tracker;
pub mod utils;

pub use config::{ClientConfig, DEFAULT_PORT};
pub use error::AnnounceError;
pub use session::{ExportRow, SessionEntry, SessionLog};
pub use tracker::{AnnounceResult, InfoHash, Peer, TrackerClient};
