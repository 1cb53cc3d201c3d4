//! Canonical RLP encoding for consensus structures.
//!
//! A minimal recursive-length-prefix codec covering exactly what the header
//! and transaction encodings need: byte strings, unsigned integers (minimal
//! big-endian), and lists. Decoding is strict — any non-canonical form
//! (padded integers, over-long length prefixes, single bytes wrapped in a
//! string header) is rejected, because the encodings feed [`digest`] and
//! two nodes must never disagree on a hash.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use primitive_types::U256;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RlpError {
    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("expected a string item")]
    ExpectedString,

    #[error("expected a list item")]
    ExpectedList,

    #[error("non-canonical encoding: {0}")]
    NonCanonical(&'static str),

    #[error("integer larger than {0} bytes")]
    IntegerTooLarge(usize),

    #[error("fixed-width field has length {got}, expected {expected}")]
    WrongFieldLength { expected: usize, got: usize },

    #[error("trailing bytes after item")]
    TrailingBytes,
}

/// Blake2b-256 over a canonical encoding.
///
/// Every consensus identifier — transaction hash, header hash, the roots
/// committed in headers — is the digest of bytes produced by this module,
/// so agreeing on a hash means agreeing on the encoding.
pub fn digest(encoded: &[u8]) -> [u8; 32] {
    let mut hasher = Blake2b::<U32>::new();
    hasher.update(encoded);
    hasher.finalize().into()
}

/// Append the RLP encoding of a byte string to `out`.
pub fn encode_bytes(out: &mut Vec<u8>, payload: &[u8]) {
    if payload.len() == 1 && payload[0] < 0x80 {
        out.push(payload[0]);
    } else if payload.len() < 56 {
        out.push(0x80 + payload.len() as u8);
        out.extend_from_slice(payload);
    } else {
        let len_bytes = minimal_be(payload.len() as u64);
        out.push(0xb7 + len_bytes.len() as u8);
        out.extend_from_slice(&len_bytes);
        out.extend_from_slice(payload);
    }
}

/// Append the RLP encoding of an unsigned integer (minimal big-endian; zero
/// encodes as the empty string).
pub fn encode_uint(out: &mut Vec<u8>, value: U256) {
    let mut be = [0u8; 32];
    value.to_big_endian(&mut be);
    let first = be.iter().position(|&b| b != 0).unwrap_or(32);
    encode_bytes(out, &be[first..]);
}

/// Append the RLP encoding of a `u64`.
pub fn encode_u64(out: &mut Vec<u8>, value: u64) {
    encode_uint(out, U256::from(value));
}

/// Wrap already-encoded items into a list.
pub fn encode_list(payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + 9);
    if payload.len() < 56 {
        out.push(0xc0 + payload.len() as u8);
    } else {
        let len_bytes = minimal_be(payload.len() as u64);
        out.push(0xf7 + len_bytes.len() as u8);
        out.extend_from_slice(&len_bytes);
    }
    out.extend_from_slice(payload);
    out
}

fn minimal_be(value: u64) -> Vec<u8> {
    let be = value.to_be_bytes();
    let first = be.iter().position(|&b| b != 0).unwrap_or(7);
    be[first..].to_vec()
}

/// Cursor over a sequence of RLP items.
pub struct Decoder<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.pos == self.data.len()
    }

    /// Assert that every byte has been consumed.
    pub fn finish(self) -> Result<(), RlpError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(RlpError::TrailingBytes)
        }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], RlpError> {
        if self.data.len() - self.pos < n {
            return Err(RlpError::UnexpectedEof);
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn read_length(&mut self, base: u8, prefix: u8) -> Result<usize, RlpError> {
        let len_of_len = (prefix - base) as usize;
        let len_bytes = self.take(len_of_len)?;
        if len_bytes.is_empty() || len_bytes[0] == 0 {
            return Err(RlpError::NonCanonical("length prefix has leading zero"));
        }
        let mut len: usize = 0;
        for &b in len_bytes {
            len = len
                .checked_mul(256)
                .and_then(|l| l.checked_add(b as usize))
                .ok_or(RlpError::NonCanonical("length overflow"))?;
        }
        if len < 56 {
            return Err(RlpError::NonCanonical("long form used for short payload"));
        }
        Ok(len)
    }

    /// Read the next item as a byte string.
    pub fn next_bytes(&mut self) -> Result<&'a [u8], RlpError> {
        let prefix = *self.take(1)?.first().ok_or(RlpError::UnexpectedEof)?;
        match prefix {
            0x00..=0x7f => {
                // The byte is its own encoding.
                Ok(&self.data[self.pos - 1..self.pos])
            }
            0x80..=0xb7 => {
                let len = (prefix - 0x80) as usize;
                let payload = self.take(len)?;
                if len == 1 && payload[0] < 0x80 {
                    return Err(RlpError::NonCanonical("single byte below 0x80 was wrapped"));
                }
                Ok(payload)
            }
            0xb8..=0xbf => {
                let len = self.read_length(0xb7, prefix)?;
                self.take(len)
            }
            _ => Err(RlpError::ExpectedString),
        }
    }

    /// Read the next item as a list, returning a decoder over its payload.
    pub fn next_list(&mut self) -> Result<Decoder<'a>, RlpError> {
        let prefix = *self.take(1)?.first().ok_or(RlpError::UnexpectedEof)?;
        let len = match prefix {
            0xc0..=0xf7 => (prefix - 0xc0) as usize,
            0xf8..=0xff => self.read_length(0xf7, prefix)?,
            _ => return Err(RlpError::ExpectedList),
        };
        Ok(Decoder::new(self.take(len)?))
    }

    /// Read the next item as an unsigned integer (≤ 32 bytes, minimal form).
    pub fn next_uint(&mut self) -> Result<U256, RlpError> {
        let bytes = self.next_bytes()?;
        if bytes.len() > 32 {
            return Err(RlpError::IntegerTooLarge(32));
        }
        if !bytes.is_empty() && bytes[0] == 0 {
            return Err(RlpError::NonCanonical("integer has leading zero"));
        }
        Ok(U256::from_big_endian(bytes))
    }

    /// Read the next item as a `u64`.
    pub fn next_u64(&mut self) -> Result<u64, RlpError> {
        let bytes = self.next_bytes()?;
        if bytes.len() > 8 {
            return Err(RlpError::IntegerTooLarge(8));
        }
        if !bytes.is_empty() && bytes[0] == 0 {
            return Err(RlpError::NonCanonical("integer has leading zero"));
        }
        let mut value: u64 = 0;
        for &b in bytes {
            value = value << 8 | b as u64;
        }
        Ok(value)
    }

    /// Read the next item as a fixed-width byte string.
    pub fn next_fixed<const N: usize>(&mut self) -> Result<[u8; N], RlpError> {
        let bytes = self.next_bytes()?;
        if bytes.len() != N {
            return Err(RlpError::WrongFieldLength {
                expected: N,
                got: bytes.len(),
            });
        }
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_one(payload: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        encode_bytes(&mut out, payload);
        out
    }

    #[test]
    fn single_low_byte_encodes_as_itself() {
        assert_eq!(encode_one(&[0x7f]), vec![0x7f]);
        assert_eq!(encode_one(&[0x00]), vec![0x00]);
    }

    #[test]
    fn empty_string_is_0x80() {
        assert_eq!(encode_one(&[]), vec![0x80]);
    }

    #[test]
    fn short_string_gets_length_prefix() {
        assert_eq!(encode_one(&[0x80]), vec![0x81, 0x80]);
        assert_eq!(encode_one(b"cat"), vec![0x83, b'c', b'a', b't']);
    }

    #[test]
    fn long_string_uses_long_form() {
        let payload = vec![0xaa; 60];
        let encoded = encode_one(&payload);
        assert_eq!(encoded[0], 0xb8);
        assert_eq!(encoded[1], 60);
        assert_eq!(&encoded[2..], &payload[..]);
    }

    #[test]
    fn zero_uint_is_empty_string() {
        let mut out = Vec::new();
        encode_uint(&mut out, U256::zero());
        assert_eq!(out, vec![0x80]);
    }

    #[test]
    fn uint_is_minimal_big_endian() {
        let mut out = Vec::new();
        encode_uint(&mut out, U256::from(0x0400u64));
        assert_eq!(out, vec![0x82, 0x04, 0x00]);
    }

    #[test]
    fn bytes_roundtrip() {
        for payload in [&[][..], &[0x01], &[0x80], &[0xab; 3], &[0xcd; 100]] {
            let encoded = encode_one(payload);
            let mut dec = Decoder::new(&encoded);
            assert_eq!(dec.next_bytes().unwrap(), payload);
            dec.finish().unwrap();
        }
    }

    #[test]
    fn uint_roundtrip() {
        for v in [0u64, 1, 0x7f, 0x80, 0xffff, u64::MAX] {
            let mut out = Vec::new();
            encode_u64(&mut out, v);
            let mut dec = Decoder::new(&out);
            assert_eq!(dec.next_u64().unwrap(), v);
        }
    }

    #[test]
    fn list_roundtrip() {
        let mut items = Vec::new();
        encode_bytes(&mut items, b"cat");
        encode_bytes(&mut items, b"dog");
        let encoded = encode_list(&items);
        assert_eq!(encoded[0], 0xc8);

        let mut dec = Decoder::new(&encoded);
        let mut inner = dec.next_list().unwrap();
        assert_eq!(inner.next_bytes().unwrap(), b"cat");
        assert_eq!(inner.next_bytes().unwrap(), b"dog");
        inner.finish().unwrap();
        dec.finish().unwrap();
    }

    #[test]
    fn rejects_wrapped_single_byte() {
        // 0x7f must be encoded as itself, not as 0x81 0x7f.
        let mut dec = Decoder::new(&[0x81, 0x7f]);
        assert_eq!(
            dec.next_bytes().unwrap_err(),
            RlpError::NonCanonical("single byte below 0x80 was wrapped")
        );
    }

    #[test]
    fn rejects_padded_integer() {
        // 0x0001 with a leading zero byte.
        let mut dec = Decoder::new(&[0x82, 0x00, 0x01]);
        assert!(matches!(
            dec.next_uint().unwrap_err(),
            RlpError::NonCanonical(_)
        ));
    }

    #[test]
    fn rejects_long_form_for_short_payload() {
        let mut data = vec![0xb8, 0x03];
        data.extend_from_slice(b"cat");
        let mut dec = Decoder::new(&data);
        assert!(matches!(
            dec.next_bytes().unwrap_err(),
            RlpError::NonCanonical(_)
        ));
    }

    #[test]
    fn rejects_trailing_bytes() {
        let dec = Decoder::new(&[0x01]);
        assert_eq!(dec.finish().unwrap_err(), RlpError::TrailingBytes);
    }

    #[test]
    fn rejects_truncated_input() {
        let mut dec = Decoder::new(&[0x83, b'c', b'a']);
        assert_eq!(dec.next_bytes().unwrap_err(), RlpError::UnexpectedEof);
    }

    #[test]
    fn rejects_oversized_u64() {
        let mut out = Vec::new();
        encode_uint(&mut out, U256::from(u128::MAX));
        let mut dec = Decoder::new(&out);
        assert_eq!(dec.next_u64().unwrap_err(), RlpError::IntegerTooLarge(8));
    }

    #[test]
    fn digest_tracks_the_encoding() {
        let mut cat = Vec::new();
        encode_bytes(&mut cat, b"cat");
        let mut dog = Vec::new();
        encode_bytes(&mut dog, b"dog");

        assert_eq!(digest(&cat), digest(&cat));
        assert_ne!(digest(&cat), digest(&dog));
        // Even the empty encoding hashes to something non-trivial.
        assert_ne!(digest(&[]), [0u8; 32]);
    }

    #[test]
    fn digest_distinguishes_string_from_list_framing() {
        let mut item = Vec::new();
        encode_bytes(&mut item, b"cat");
        let as_list = encode_list(&item);
        assert_ne!(digest(&item), digest(&as_list));
    }
}
