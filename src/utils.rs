use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::tracker::PeerId;

/// Client tag placed at the front of every generated peer id.
pub const PEER_ID_PREFIX: [u8; 8] = *b"-TP0001-";

pub fn generate_peer_id() -> PeerId {
    generate_peer_id_with(&PEER_ID_PREFIX)
}

/// Builds a peer id from `prefix` followed by 12 random alphanumeric bytes.
pub fn generate_peer_id_with(prefix: &[u8; 8]) -> PeerId {
    let mut rng = rand::thread_rng();
    let mut id = [0u8; 20];
    id[..8].copy_from_slice(prefix);
    for byte in &mut id[8..] {
        *byte = rng.sample(Alphanumeric);
    }
    id
}
