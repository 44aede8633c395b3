use std::fmt;
use std::str::FromStr;

use crate::error::AnnounceError;

/// The 20-byte SHA-1 identifier of a torrent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InfoHash([u8; 20]);

impl InfoHash {
    pub fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Normalises user input into an info hash.
    ///
    /// A 40-character hex string (either case) is decoded. Any other input is taken as
    /// the raw hash bytes and must be exactly 20 bytes long.
    pub fn normalize(input: &str) -> Result<Self, AnnounceError> {
        if input.len() == 40 && input.bytes().all(|b| b.is_ascii_hexdigit()) {
            let mut bytes = [0u8; 20];
            hex::decode_to_slice(input, &mut bytes)
                .map_err(|err| AnnounceError::InvalidInfoHash(err.to_string()))?;
            return Ok(Self(bytes));
        }
        Self::from_bytes(input.as_bytes())
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AnnounceError> {
        <[u8; 20]>::try_from(bytes).map(Self).map_err(|_| {
            AnnounceError::InvalidInfoHash(format!(
                "expected 40 hex characters or 20 raw bytes, got {} bytes",
                bytes.len()
            ))
        })
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl FromStr for InfoHash {
    type Err = AnnounceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::normalize(s)
    }
}

impl fmt::Display for InfoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
