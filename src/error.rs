use thiserror::Error;

use crate::bencode::BencodeError;

/// Everything that can go wrong during a single announce.
///
/// The `Display` output of each variant is the human-readable reason stored in
/// [`AnnounceResult::Failure`](crate::tracker::AnnounceResult::Failure).
#[derive(Debug, Error)]
pub enum AnnounceError {
    /// The info hash could not be normalised to 20 bytes. Never sent over the wire.
    #[error("Invalid info hash: {0}")]
    InvalidInfoHash(String),

    /// Timeout, DNS failure, refused connection, unreadable body or unusable tracker URL.
    #[error("Request failed: {0}")]
    Transport(String),

    /// The tracker answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The response body was not a usable bencoded dictionary.
    #[error("Failed to parse response: {0}")]
    MalformedBencode(#[from] BencodeError),
}

impl From<reqwest::Error> for AnnounceError {
    fn from(err: reqwest::Error) -> Self {
        AnnounceError::Transport(err.to_string())
    }
}
