//! Bencode encoder implementation following the BitTorrent protocol specification.
//!
//! The encoding rules are:
//! - Strings are length-prefixed base10 followed by a colon and the raw bytes
//! - Integers are 'i' followed by the number in base10 followed by 'e'
//! - Lists are 'l' followed by their elements followed by 'e'
//! - Dictionaries are 'd' followed by alternating keys and values followed by 'e',
//!   keys sorted by their raw bytes

use std::collections::BTreeMap;

use super::bvalue::BValue;

/// An encoder for converting [`BValue`]s into Bencode bytes.
pub struct Encoder {
    output: Vec<u8>,
}

impl Encoder {
    /// Creates a new encoder with an empty output buffer.
    pub fn new() -> Self {
        Self { output: Vec::new() }
    }

    /// Encodes `value` and returns the encoded bytes.
    pub fn encode(&mut self, value: &BValue) -> Vec<u8> {
        self.output.clear();
        self.encode_value(value);
        std::mem::take(&mut self.output)
    }

    fn encode_value(&mut self, value: &BValue) {
        match value {
            BValue::Integer(n) => self.encode_integer(&n.to_string()),
            BValue::BigInteger(digits) => self.encode_integer(digits),
            BValue::String(s) => self.encode_string(s),
            BValue::List(list) => self.encode_list(list),
            BValue::Dict(dict) => self.encode_dict(dict),
        }
    }

    /// Encodes an integer in the format: i<number>e
    fn encode_integer(&mut self, digits: &str) {
        self.output.push(b'i');
        self.output.extend_from_slice(digits.as_bytes());
        self.output.push(b'e');
    }

    /// Encodes a string in the format: <length>:<bytes>
    fn encode_string(&mut self, s: &[u8]) {
        self.output.extend_from_slice(s.len().to_string().as_bytes());
        self.output.push(b':');
        self.output.extend_from_slice(s);
    }

    fn encode_list(&mut self, list: &[BValue]) {
        self.output.push(b'l');
        for item in list {
            self.encode_value(item);
        }
        self.output.push(b'e');
    }

    fn encode_dict(&mut self, dict: &BTreeMap<Vec<u8>, BValue>) {
        self.output.push(b'd');
        for (key, value) in dict {
            self.encode_string(key);
            self.encode_value(value);
        }
        self.output.push(b'e');
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_integer() {
        let mut encoder = Encoder::new();
        assert_eq!(encoder.encode(&BValue::Integer(42)), b"i42e");
        assert_eq!(encoder.encode(&BValue::Integer(-42)), b"i-42e");
        assert_eq!(encoder.encode(&BValue::Integer(0)), b"i0e");
        assert_eq!(
            encoder.encode(&BValue::BigInteger("18446744073709551616".to_string())),
            b"i18446744073709551616e"
        );
    }

    #[test]
    fn test_encode_string() {
        let mut encoder = Encoder::new();
        assert_eq!(encoder.encode(&BValue::String(b"spam".to_vec())), b"4:spam");
        assert_eq!(encoder.encode(&BValue::String(vec![])), b"0:");
        assert_eq!(
            encoder.encode(&BValue::String(vec![0x1a, 0xe1])),
            b"2:\x1a\xe1"
        );
    }

    #[test]
    fn test_encode_dict_sorted() {
        let mut encoder = Encoder::new();
        let dict = BValue::Dict(BTreeMap::from([
            (b"foo".to_vec(), BValue::Integer(42)),
            (b"bar".to_vec(), BValue::String(b"spam".to_vec())),
        ]));
        assert_eq!(encoder.encode(&dict), b"d3:bar4:spam3:fooi42ee");
        assert_eq!(encoder.encode(&BValue::Dict(BTreeMap::new())), b"de");
    }

    #[test]
    fn test_encode_nested() {
        let value = BValue::Dict(BTreeMap::from([
            (
                b"peers".to_vec(),
                BValue::List(vec![BValue::Dict(BTreeMap::from([
                    (b"ip".to_vec(), BValue::String(b"1.2.3.4".to_vec())),
                    (b"port".to_vec(), BValue::Integer(6881)),
                ]))]),
            ),
            (b"interval".to_vec(), BValue::Integer(60)),
        ]));

        let encoded = value.to_bytes();
        assert_eq!(
            encoded,
            b"d8:intervali60e5:peersld2:ip7:1.2.3.44:porti6881eeee".to_vec()
        );
        assert_eq!(BValue::from_bytes(&encoded).unwrap(), value);
    }
}
