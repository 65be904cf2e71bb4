//! Binary encoding of the account map.
//!
//! The encoded map is the plaintext that the whole-vault envelope
//! protects.  It is a plain concatenation of entries, in any order:
//!
//! ```text
//! [key_len: u64 LE][key bytes (UTF-8)][value_len: u64 LE][value bytes] ...
//! ```
//!
//! There is no entry count, header or terminator: decoding reads entries
//! until the buffer is exhausted.

use std::collections::HashMap;

use crate::errors::{PwVaultError, Result};

/// Account name -> per-secret envelope.
pub type AccountMap = HashMap<String, Vec<u8>>;

/// Width of each length field.
const LEN_FIELD: usize = 8;

/// Encode `map` into the length-prefixed entry format.
pub fn encode_map(map: &AccountMap) -> Vec<u8> {
    let total: usize = map
        .iter()
        .map(|(k, v)| 2 * LEN_FIELD + k.len() + v.len())
        .sum();
    let mut buf = Vec::with_capacity(total);

    for (key, value) in map {
        buf.extend_from_slice(&(key.len() as u64).to_le_bytes());
        buf.extend_from_slice(key.as_bytes());
        buf.extend_from_slice(&(value.len() as u64).to_le_bytes());
        buf.extend_from_slice(value);
    }

    buf
}

/// Decode bytes produced by `encode_map`.
///
/// Fails with `TruncatedData` if any length field or announced payload
/// runs past the end of the buffer, and with `DecodeError` if a key is
/// not valid UTF-8.  A repeated key keeps its last value.
pub fn decode_map(bytes: &[u8]) -> Result<AccountMap> {
    let mut reader = Reader::new(bytes);
    let mut map = AccountMap::new();

    while !reader.is_empty() {
        let key = reader.read_chunk()?;
        let key = std::str::from_utf8(key)
            .map_err(|e| PwVaultError::DecodeError(format!("account name is not UTF-8: {e}")))?;
        let value = reader.read_chunk()?;
        map.insert(key.to_string(), value.to_vec());
    }

    Ok(map)
}

/// Bounds-checked cursor over the encoded buffer.
struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn is_empty(&self) -> bool {
        self.pos >= self.buf.len()
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Read one `u64` length field followed by that many bytes.
    fn read_chunk(&mut self) -> Result<&'a [u8]> {
        let len = self.read_len()?;
        self.take(len)
    }

    fn read_len(&mut self) -> Result<usize> {
        let field = self.take(LEN_FIELD)?;
        let len = u64::from_le_bytes(field.try_into().map_err(|_| PwVaultError::TruncatedData)?);
        // A length that doesn't fit in memory can't fit in the buffer either.
        usize::try_from(len).map_err(|_| PwVaultError::TruncatedData)
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(PwVaultError::TruncatedData);
        }
        let chunk = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(chunk)
    }
}
