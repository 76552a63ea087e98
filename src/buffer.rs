//! Sequential field iteration over a serialized message.
//!
//! A [`Buffer`] borrows a byte slice and decodes one field per call, moving a
//! forward-only cursor. Descending into a sub-message means constructing a new
//! `Buffer` over just the sub-message bytes; iteration is not restartable.

use crate::field::Field;
use crate::wire::{self, WireError, WireType};

/// Iterates through a serialized message field by field.
pub struct Buffer<'a> {
    data: &'a [u8],
    read: usize,
}

impl<'a> Buffer<'a> {
    pub fn new(data: &'a [u8]) -> Buffer<'a> {
        Buffer { data, read: 0 }
    }

    /// Byte offset of the cursor into the underlying slice.
    pub fn position(&self) -> usize {
        self.read
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.read..]
    }

    /// Read the next field and the total bytes it occupied (tag + any length
    /// prefix + payload).
    ///
    /// Returns `Ok(None)` when the cursor sits exactly at the end of the
    /// buffer. Any position where a tag cannot be fully decoded, or where a
    /// declared payload length would run past the end, is
    /// [`WireError::Truncated`] rather than a short read.
    pub fn read_field(&mut self) -> Result<Option<(Field<'a>, usize)>, WireError> {
        if self.read == self.data.len() {
            return Ok(None);
        }

        let (number, wire_type, tag_len) = wire::parse_tag(&self.data[self.read..])?;

        // Header is the tag plus, for length-delimited fields, the length
        // prefix. Keeping it separate from the payload length lets nested
        // sub-message iteration reuse this routine unchanged.
        let mut header = tag_len;
        let rest = &self.data[self.read + header..];
        let length = match wire_type {
            WireType::Varint => {
                wire::varint_len(rest).map_err(|e| truncation_if_short(e, rest.len()))?
            }
            WireType::Fixed64 => 8,
            WireType::Fixed32 => 4,
            WireType::LengthDelimited => {
                let (size, len_bytes) =
                    wire::decode_varint(rest).map_err(|e| truncation_if_short(e, rest.len()))?;
                header += len_bytes;
                usize::try_from(size).map_err(|_| WireError::Truncated)?
            }
        };

        // A varint value needs at least its one terminating byte; fixed
        // widths need all of theirs. A zero-length delimited payload is the
        // one legitimately empty case. Checked add: a hostile declared
        // length must not wrap the bounds check.
        let start = self.read + header;
        let end = match start.checked_add(length) {
            Some(end) if end <= self.data.len() => end,
            _ => return Err(WireError::Truncated),
        };

        let payload = &self.data[start..end];
        self.read = end;
        Ok(Some((Field::new(number, wire_type, payload), header + length)))
    }
}

/// An unterminated varint in a short slice is framing truncation; with a
/// full 10 bytes available it is a genuinely malformed varint.
fn truncation_if_short(e: WireError, remaining: usize) -> WireError {
    match e {
        WireError::MalformedVarint if remaining < wire::MAX_VARINT_LEN => WireError::Truncated,
        other => other,
    }
}
