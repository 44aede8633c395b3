mod bvalue;
mod decoder;
#[cfg(test)]
mod encoder;

pub use bvalue::BValue;

/// Failure to decode a bencoded buffer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed bencode at byte {position}: {message}")]
pub struct BencodeError {
    /// Byte offset where decoding stopped.
    pub position: usize,
    pub message: String,
}

/// Bencode codec
#[derive(Debug, Clone, Copy)]
pub struct Bencode;

impl Bencode {
    /// Decode the first bencoded value in `input`; trailing bytes are ignored.
    pub fn decode_bytes(input: &[u8]) -> Result<BValue, BencodeError> {
        BValue::from_bytes(input)
    }

    /// Encode a value into canonical bencode. Only tests build fixtures this way.
    #[cfg(test)]
    pub fn encode(value: &BValue) -> Vec<u8> {
        value.to_bytes()
    }
}
