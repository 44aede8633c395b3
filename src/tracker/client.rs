use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, info, warn};

use super::{AnnounceRequest, AnnounceResult, InfoHash, TrackerResponse};
use crate::config::ClientConfig;
use crate::error::AnnounceError;
use crate::session::{SessionEntry, SessionLog};
use crate::utils::generate_peer_id_with;

/// Announces to HTTP trackers and records every attempt in a shared [`SessionLog`].
///
/// Build one per process and hand it (or an `Arc` of it) to whatever serves requests.
pub struct TrackerClient {
    http: reqwest::blocking::Client,
    config: ClientConfig,
    log: Arc<SessionLog>,
}

impl TrackerClient {
    pub fn new(config: ClientConfig, log: Arc<SessionLog>) -> Result<Self, reqwest::Error> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { http, config, log })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn log(&self) -> &Arc<SessionLog> {
        &self.log
    }

    /// Sends a `started` announce for `info_hash` to `tracker_url`.
    ///
    /// Never fails: problems come back as [`AnnounceResult::Failure`]. The attempt is
    /// appended to the session log whatever the outcome.
    pub fn announce(&self, info_hash: &str, tracker_url: &str, port: u16) -> AnnounceResult {
        let (info_hash_hex, outcome) = match InfoHash::normalize(info_hash) {
            Ok(hash) => (hash.to_hex(), self.announce_started(hash, tracker_url, port)),
            Err(err) => (info_hash.to_string(), Err(err)),
        };

        match &outcome {
            Ok(response) => info!(
                "{} returned {} peers for {} ({} seeders, {} leechers)",
                tracker_url,
                response.peers.len(),
                info_hash_hex,
                response.complete,
                response.incomplete
            ),
            Err(err) => warn!("announce of {} to {} failed: {}", info_hash_hex, tracker_url, err),
        }

        let result = AnnounceResult::from(outcome);
        self.log.record(SessionEntry::new(info_hash_hex, tracker_url, result.clone()));
        result
    }

    fn announce_started(
        &self,
        info_hash: InfoHash,
        tracker_url: &str,
        port: u16,
    ) -> Result<TrackerResponse, AnnounceError> {
        let peer_id = generate_peer_id_with(&self.config.peer_id_prefix);
        let request = AnnounceRequest::started(info_hash, peer_id, port);
        self.send(tracker_url, &request)
    }

    /// Performs a single announce exchange without touching the session log.
    pub fn send(
        &self,
        tracker_url: &str,
        request: &AnnounceRequest,
    ) -> Result<TrackerResponse, AnnounceError> {
        let url = request.url(tracker_url)?;
        debug!("GET {}", url);

        let response = self.http.get(url).send()?;
        let status = response.status();

        if !status.is_success() {
            // a body that fails to arrive is reported as empty
            let body = response
                .bytes()
                .map(|b| String::from_utf8_lossy(&b).into_owned())
                .unwrap_or_default();
            debug!("tracker replied {} with {} bytes", status, body.len());
            return Err(AnnounceError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body: Bytes = response.bytes()?;
        debug!("tracker replied {} with {} bytes", status, body.len());
        Ok(TrackerResponse::from_bytes(&body)?)
    }
}
