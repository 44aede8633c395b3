use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;

/// The 20-byte identifier a client presents to the tracker.
pub type PeerId = [u8; 20];

/// A peer address as reported by a tracker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Peer {
    pub ip: String,
    pub port: u16,
}

impl Peer {
    pub fn new(ip: impl Into<String>, port: u16) -> Self {
        Self {
            ip: ip.into(),
            port,
        }
    }

    /// Decodes one compact record: 4 bytes IPv4 address, 2 bytes port, both big-endian.
    pub fn from_compact(record: &[u8; 6]) -> Self {
        let ip = Ipv4Addr::new(record[0], record[1], record[2], record[3]);
        let port = u16::from_be_bytes([record[4], record[5]]);
        Self {
            ip: ip.to_string(),
            port,
        }
    }
}

impl fmt::Display for Peer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.ip, self.port)
    }
}
