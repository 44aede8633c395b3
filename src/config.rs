use std::time::Duration;

use crate::utils::PEER_ID_PREFIX;

/// Port announced when the caller does not pick one.
pub const DEFAULT_PORT: u16 = 6881;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Upper bound on the whole HTTP exchange with the tracker.
    pub timeout: Duration,
    pub peer_id_prefix: [u8; 8],
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            peer_id_prefix: PEER_ID_PREFIX,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"))
                .to_string(),
        }
    }
}
