use percent_encoding::{percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Url;
use serde::Serialize;

use super::{InfoHash, PeerId};
use crate::error::AnnounceError;

/// Bytes left untouched when percent-encoding binary query values (RFC 3986 unreserved).
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// The `event` parameter of an announce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnnounceEvent {
    #[default]
    Started,
    Stopped,
    Completed,
    /// A regular periodic announce; the parameter is left out.
    Empty,
}

impl AnnounceEvent {
    pub fn as_str(self) -> Option<&'static str> {
        match self {
            AnnounceEvent::Started => Some("started"),
            AnnounceEvent::Stopped => Some("stopped"),
            AnnounceEvent::Completed => Some("completed"),
            AnnounceEvent::Empty => None,
        }
    }
}

/// Everything sent to the tracker in one announce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnounceRequest {
    pub info_hash: InfoHash,
    pub peer_id: PeerId,
    pub port: u16,
    pub uploaded: u64,
    pub downloaded: u64,
    pub left: u64,
    pub compact: bool,
    pub event: AnnounceEvent,
}

/// The textual parameters, encoded by serde_urlencoded.
#[derive(Debug, Serialize)]
struct TextParams {
    port: u16,
    uploaded: u64,
    downloaded: u64,
    left: u64,
    compact: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    event: Option<&'static str>,
}

impl AnnounceRequest {
    /// A first announce for a torrent: nothing transferred, compact peers, `event=started`.
    pub fn started(info_hash: InfoHash, peer_id: PeerId, port: u16) -> Self {
        Self {
            info_hash,
            peer_id,
            port,
            uploaded: 0,
            downloaded: 0,
            left: 0,
            compact: true,
            event: AnnounceEvent::Started,
        }
    }

    /// Encodes the request as a query string. `info_hash` and `peer_id` are
    /// percent-encoded byte for byte.
    pub fn query_string(&self) -> Result<String, serde_urlencoded::ser::Error> {
        let text = serde_urlencoded::to_string(TextParams {
            port: self.port,
            uploaded: self.uploaded,
            downloaded: self.downloaded,
            left: self.left,
            compact: u8::from(self.compact),
            event: self.event.as_str(),
        })?;

        Ok(format!(
            "info_hash={}&peer_id={}&{}",
            percent_encode(self.info_hash.as_bytes(), QUERY_VALUE),
            percent_encode(&self.peer_id, QUERY_VALUE),
            text
        ))
    }

    /// Builds the full announce URL, keeping any query the tracker URL already carries.
    pub fn url(&self, tracker_url: &str) -> Result<Url, AnnounceError> {
        let mut url = Url::parse(tracker_url).map_err(|err| {
            AnnounceError::Transport(format!("invalid tracker URL '{}': {}", tracker_url, err))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AnnounceError::Transport(format!(
                "unsupported tracker URL scheme '{}'",
                url.scheme()
            )));
        }

        let params = self
            .query_string()
            .map_err(|err| AnnounceError::Transport(err.to_string()))?;
        let query = match url.query() {
            Some(existing) if !existing.is_empty() => format!("{}&{}", existing, params),
            _ => params,
        };
        url.set_query(Some(&query));
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> AnnounceRequest {
        let mut info_hash = [0u8; 20];
        info_hash[0] = 0x12;
        info_hash[1] = 0xab;
        info_hash[2] = b'A';
        info_hash[3] = b'-';
        AnnounceRequest::started(InfoHash::new(info_hash), *b"-TP0001-abcdefghijkl", 6881)
    }

    #[test]
    fn test_query_string() {
        let query = request().query_string().unwrap();
        assert_eq!(
            query,
            "info_hash=%12%ABA-%00%00%00%00%00%00%00%00%00%00%00%00%00%00%00%00\
             &peer_id=-TP0001-abcdefghijkl\
             &port=6881&uploaded=0&downloaded=0&left=0&compact=1&event=started"
        );
    }

    #[test]
    fn test_empty_event_is_omitted() {
        let mut request = request();
        request.event = AnnounceEvent::Empty;
        request.compact = false;
        let query = request.query_string().unwrap();
        assert!(query.ends_with("&left=0&compact=0"));
        assert!(!query.contains("event"));
    }

    #[test]
    fn test_url_appends_to_existing_query() {
        let url = request()
            .url("http://tracker.example.com:8080/announce?passkey=secret")
            .unwrap();
        assert_eq!(url.host_str(), Some("tracker.example.com"));
        assert_eq!(url.path(), "/announce");
        let query = url.query().unwrap();
        assert!(query.starts_with("passkey=secret&info_hash=%12%ABA-"));
        assert!(query.ends_with("&event=started"));
    }

    #[test]
    fn test_url_rejects_bad_tracker() {
        assert!(matches!(
            request().url("not a url"),
            Err(AnnounceError::Transport(_))
        ));
        assert!(matches!(
            request().url("udp://tracker.example.com:1337/announce"),
            Err(AnnounceError::Transport(msg)) if msg.contains("udp")
        ));
    }
}
