use std::collections::BTreeMap;
use std::fmt::Display;

use super::BencodeError;

/// Represents a Bencode value as defined in the BitTorrent specification.
///
/// Bencode (pronounced like B-encode) supports four different types of values:
/// - Byte strings (raw bytes, not necessarily UTF-8)
/// - Integers
/// - Lists
/// - Dictionaries keyed by byte strings
///
/// Integers outside the `i64` range are kept as their decimal text in
/// [`BValue::BigInteger`] so that one oversized field does not fail a whole document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BValue {
    /// An integer value, can be positive or negative
    /// Example: `i42e` represents 42
    Integer(i64),

    /// A well-formed integer that does not fit in an `i64`, as its decimal digits
    /// Example: `i99999999999999999999e`
    BigInteger(String),

    /// A byte string, prefixed with its length
    /// Example: `4:spam` represents "spam"
    String(Vec<u8>),

    /// A list of BValue elements
    /// Example: `l4:spami42ee` represents ["spam", 42]
    List(Vec<BValue>),

    /// A dictionary mapping byte strings to BValues, ordered by raw key bytes
    /// Example: `d3:bar4:spam3:fooi42ee` represents {"bar": "spam", "foo": 42}
    Dict(BTreeMap<Vec<u8>, BValue>),
}

impl BValue {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BencodeError> {
        let mut decoder = super::decoder::Decoder::new(bytes);
        decoder.parse()
    }

    #[cfg(test)]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut encoder = super::encoder::Encoder::new();
        encoder.encode(self)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::from(self)
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            BValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            BValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// The byte string as UTF-8 text, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes()
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
    }

    pub fn as_list(&self) -> Option<&[BValue]> {
        match self {
            BValue::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&BTreeMap<Vec<u8>, BValue>> {
        match self {
            BValue::Dict(dict) => Some(dict),
            _ => None,
        }
    }

    /// Looks up `key` by exact byte equality. `None` if this is not a dictionary.
    pub fn get(&self, key: &[u8]) -> Option<&BValue> {
        self.as_dict().and_then(|dict| dict.get(key))
    }

    /// Reads a non-negative integer field, falling back to `default` when the key is
    /// missing, holds another type, or is out of the `u64` range.
    pub fn get_uint_or(&self, key: &[u8], default: u64) -> u64 {
        self.get(key)
            .and_then(BValue::as_integer)
            .and_then(|n| u64::try_from(n).ok())
            .unwrap_or(default)
    }
}

fn is_printable(bytes: &[u8]) -> bool {
    bytes.iter().all(|&b| (32..=126).contains(&b))
}

impl From<&BValue> for serde_json::Value {
    fn from(value: &BValue) -> Self {
        match value {
            BValue::Integer(n) => serde_json::Value::Number((*n).into()),
            BValue::BigInteger(digits) => serde_json::Value::String(digits.clone()),
            BValue::String(s) => {
                if is_printable(s) {
                    serde_json::Value::String(String::from_utf8_lossy(s).into_owned())
                } else {
                    serde_json::Value::String(hex::encode(s))
                }
            }
            BValue::List(arr) => serde_json::Value::Array(arr.iter().map(|v| v.into()).collect()),
            BValue::Dict(map) => {
                let obj = map
                    .iter()
                    .map(|(k, v)| (String::from_utf8_lossy(k).into_owned(), v.into()))
                    .collect();
                serde_json::Value::Object(obj)
            }
        }
    }
}

impl Display for BValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BValue::Integer(n) => write!(f, "{}", n),
            BValue::BigInteger(digits) => write!(f, "{}", digits),
            BValue::String(s) => {
                if is_printable(s) {
                    write!(f, "\"{}\"", String::from_utf8_lossy(s))
                } else {
                    write!(f, "\"{}\"", hex::encode(s))
                }
            }
            BValue::List(list) => {
                write!(f, "[")?;
                for (i, item) in list.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            BValue::Dict(dict) => {
                write!(f, "{{")?;
                for (i, (key, value)) in dict.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "\"{}\":{}", String::from_utf8_lossy(key), value)?;
                }
                write!(f, "}}")
            }
        }
    }
}
