//! Compact-u16 length encoding and a byte cursor for the legacy wire format.
//!
//! Sequence lengths on the wire are little-endian base-128 varints capped at
//! `u16::MAX`, so a length always fits in one to three bytes.

use super::error::{SolanaError, SolanaResult};

/// Appends `len` to `out` as a compact-u16.
pub(crate) fn encode_len(out: &mut Vec<u8>, len: usize) {
    let mut rem = len;
    loop {
        let mut byte = (rem & 0x7f) as u8;
        rem >>= 7;
        if rem == 0 {
            out.push(byte);
            return;
        }
        byte |= 0x80;
        out.push(byte);
    }
}

/// Forward-only reader over a transaction payload.
pub(crate) struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    pub(crate) fn read_u8(&mut self) -> SolanaResult<u8> {
        let byte = *self
            .bytes
            .get(self.pos)
            .ok_or(SolanaError::MalformedTransaction("unexpected end of input"))?;
        self.pos += 1;
        Ok(byte)
    }

    pub(crate) fn read_bytes(&mut self, len: usize) -> SolanaResult<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.bytes.len())
            .ok_or(SolanaError::MalformedTransaction("unexpected end of input"))?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    pub(crate) fn read_array<const N: usize>(&mut self) -> SolanaResult<[u8; N]> {
        self.read_bytes(N)?
            .try_into()
            .map_err(|_| SolanaError::MalformedTransaction("unexpected end of input"))
    }

    /// Reads a compact-u16, rejecting encodings longer than three bytes or
    /// values above `u16::MAX`.
    pub(crate) fn read_compact_u16(&mut self) -> SolanaResult<usize> {
        let mut value: usize = 0;
        for shift in 0..3u32 {
            let byte = self.read_u8()?;
            value |= ((byte & 0x7f) as usize) << (7 * shift);
            if byte & 0x80 == 0 {
                if value > u16::MAX as usize {
                    return Err(SolanaError::MalformedTransaction("length exceeds u16"));
                }
                return Ok(value);
            }
        }
        Err(SolanaError::MalformedTransaction("unterminated length"))
    }
}
