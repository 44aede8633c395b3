use std::collections::BTreeMap;

use tracing::debug;

use super::bvalue::BValue;
use super::BencodeError;

/// Containers nested deeper than this are rejected.
const MAX_DEPTH: usize = 64;

pub struct Decoder<'a> {
    input: &'a [u8],
    position: usize,
    depth: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            position: 0,
            depth: 0,
        }
    }

    /// Decodes the value at the start of the input. Anything after it is ignored.
    pub fn parse(&mut self) -> Result<BValue, BencodeError> {
        let value = self.parse_value()?;
        if self.position < self.input.len() {
            debug!(
                "ignoring {} trailing bytes after bencoded value",
                self.input.len() - self.position
            );
        }
        Ok(value)
    }

    fn error(&self, message: impl Into<String>) -> BencodeError {
        BencodeError {
            position: self.position,
            message: message.into(),
        }
    }

    fn peek_byte(&self) -> Option<u8> {
        self.input.get(self.position).copied()
    }

    fn consume_byte(&mut self) -> Option<u8> {
        let b = self.peek_byte()?;
        self.position += 1;
        Some(b)
    }

    fn consume_until(&mut self, delimiter: u8) -> Result<&'a [u8], BencodeError> {
        let start = self.position;
        let input = self.input;
        match input[start..].iter().position(|&b| b == delimiter) {
            Some(offset) => {
                self.position = start + offset + 1; // skip the delimiter
                Ok(&input[start..start + offset])
            }
            None => Err(self.error(format!(
                "unexpected end of input, expected '{}'",
                delimiter as char
            ))),
        }
    }

    fn parse_value(&mut self) -> Result<BValue, BencodeError> {
        match self.peek_byte() {
            Some(b'i') => self.parse_integer(),
            Some(b'l') => self.parse_list(),
            Some(b'd') => self.parse_dict(),
            Some(c) if c.is_ascii_digit() => Ok(BValue::String(self.parse_string()?)),
            Some(c) => Err(self.error(format!("unexpected byte 0x{:02x}", c))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    /// Parses `i<digits>e`. Leading zeros and `-0` are rejected; well-formed values
    /// beyond the `i64` range come back as [`BValue::BigInteger`].
    fn parse_integer(&mut self) -> Result<BValue, BencodeError> {
        self.consume_byte(); // consume 'i'
        let start = self.position;
        let digits = self.consume_until(b'e')?;
        let invalid = || BencodeError {
            position: start,
            message: format!("invalid integer '{}'", String::from_utf8_lossy(digits)),
        };

        let magnitude = digits.strip_prefix(b"-").unwrap_or(digits);
        if magnitude.is_empty() || !magnitude.iter().all(u8::is_ascii_digit) {
            return Err(invalid());
        }
        if magnitude.len() > 1 && magnitude[0] == b'0' {
            return Err(invalid());
        }
        if digits == b"-0" {
            return Err(invalid());
        }

        // only ASCII digits and an optional '-' remain
        let text = String::from_utf8_lossy(digits);
        match text.parse::<i64>() {
            Ok(n) => Ok(BValue::Integer(n)),
            Err(_) => {
                debug!("integer {} does not fit in i64", text);
                Ok(BValue::BigInteger(text.into_owned()))
            }
        }
    }

    fn parse_string(&mut self) -> Result<Vec<u8>, BencodeError> {
        let start = self.position;
        let len_digits = self.consume_until(b':')?;
        let len = std::str::from_utf8(len_digits)
            .ok()
            .filter(|s| s.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|s| s.parse::<usize>().ok())
            .ok_or_else(|| BencodeError {
                position: start,
                message: format!(
                    "invalid string length '{}'",
                    String::from_utf8_lossy(len_digits)
                ),
            })?;

        let remaining = self.input.len() - self.position;
        if len > remaining {
            return Err(self.error(format!(
                "string length {} exceeds remaining {} bytes",
                len, remaining
            )));
        }
        let bytes = self.input[self.position..self.position + len].to_vec();
        self.position += len;
        Ok(bytes)
    }

    fn enter(&mut self) -> Result<(), BencodeError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error(format!("nesting deeper than {} levels", MAX_DEPTH)));
        }
        self.depth += 1;
        self.consume_byte(); // consume 'l' or 'd'
        Ok(())
    }

    fn parse_list(&mut self) -> Result<BValue, BencodeError> {
        self.enter()?;
        let mut values = Vec::new();

        while let Some(c) = self.peek_byte() {
            if c == b'e' {
                self.consume_byte();
                self.depth -= 1;
                return Ok(BValue::List(values));
            }
            values.push(self.parse_value()?);
        }
        Err(self.error("unterminated list"))
    }

    fn parse_dict(&mut self) -> Result<BValue, BencodeError> {
        self.enter()?;
        let mut map = BTreeMap::new();

        while let Some(c) = self.peek_byte() {
            if c == b'e' {
                self.consume_byte();
                self.depth -= 1;
                return Ok(BValue::Dict(map));
            }
            if !c.is_ascii_digit() {
                return Err(self.error("dictionary key must be a byte string"));
            }
            let key = self.parse_string()?;
            let value = self.parse_value()?;
            map.insert(key, value);
        }
        Err(self.error("unterminated dictionary"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(input: &[u8]) -> Result<BValue, BencodeError> {
        Decoder::new(input).parse()
    }

    #[test]
    fn test_decode_integer() {
        assert_eq!(decode(b"i42e").unwrap(), BValue::Integer(42));
        assert_eq!(decode(b"i-42e").unwrap(), BValue::Integer(-42));
        assert_eq!(decode(b"i0e").unwrap(), BValue::Integer(0));
    }

    #[test]
    fn test_decode_integer_rejects_malformed() {
        let inputs: [&[u8]; 7] = [
            b"i03e",
            b"i-0e",
            b"ie",
            b"i-e",
            b"i4x2e",
            b"i42",
            b"i-099999999999999999999e",
        ];
        for input in inputs {
            assert!(decode(input).is_err(), "{:?}", String::from_utf8_lossy(input));
        }
    }

    #[test]
    fn test_decode_integer_beyond_i64() {
        assert_eq!(
            decode(b"i99999999999999999999e").unwrap(),
            BValue::BigInteger("99999999999999999999".to_string())
        );
        assert_eq!(
            decode(b"i-9223372036854775809e").unwrap(),
            BValue::BigInteger("-9223372036854775809".to_string())
        );
        assert_eq!(
            decode(b"i9223372036854775807e").unwrap(),
            BValue::Integer(i64::MAX)
        );
    }

    #[test]
    fn test_decode_string() {
        assert_eq!(decode(b"4:spam").unwrap(), BValue::String(b"spam".to_vec()));
        assert_eq!(decode(b"0:").unwrap(), BValue::String(vec![]));
        assert_eq!(
            decode(b"3:\x00\xff\x10").unwrap(),
            BValue::String(vec![0x00, 0xff, 0x10])
        );
    }

    #[test]
    fn test_decode_string_too_long() {
        let err = decode(b"10:short").unwrap_err();
        assert_eq!(err.position, 3);
        assert!(err.message.contains("exceeds"));
    }

    #[test]
    fn test_decode_list_and_dict() {
        assert_eq!(
            decode(b"l4:spami42ee").unwrap(),
            BValue::List(vec![BValue::String(b"spam".to_vec()), BValue::Integer(42)])
        );
        assert_eq!(
            decode(b"d3:bar4:spam3:fooi42ee").unwrap(),
            BValue::Dict(BTreeMap::from([
                (b"bar".to_vec(), BValue::String(b"spam".to_vec())),
                (b"foo".to_vec(), BValue::Integer(42)),
            ]))
        );
        assert_eq!(decode(b"le").unwrap(), BValue::List(vec![]));
        assert_eq!(decode(b"de").unwrap(), BValue::Dict(BTreeMap::new()));
    }

    #[test]
    fn test_decode_structural_errors() {
        assert!(decode(b"l4:spam").unwrap_err().message.contains("unterminated list"));
        assert!(decode(b"d3:foo").is_err());
        assert!(decode(b"d3:fooi1e")
            .unwrap_err()
            .message
            .contains("unterminated dictionary"));
        assert!(decode(b"di1ei2ee").unwrap_err().message.contains("key"));
        assert!(decode(b"").is_err());
        assert!(decode(b"x").is_err());
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        assert_eq!(decode(b"i1egarbage").unwrap(), BValue::Integer(1));
    }

    #[test]
    fn test_nesting_limit() {
        let mut deep = vec![b'l'; MAX_DEPTH + 1];
        deep.extend(vec![b'e'; MAX_DEPTH + 1]);
        assert!(decode(&deep).unwrap_err().message.contains("nesting"));

        let mut ok = vec![b'l'; MAX_DEPTH];
        ok.extend(vec![b'e'; MAX_DEPTH]);
        assert!(decode(&ok).is_ok());
    }
}
