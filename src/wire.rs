//! Low-level wire-format primitives: varints, tags, wire types.
//!
//! Everything here operates on plain byte slices with no schema knowledge.
//! Varints are base-128 little-endian with the high bit of each byte as the
//! continuation flag; a tag is a varint carrying `(field_number << 3) | wire_type`.

/// Maximum encoded length of a 64-bit varint. Anything longer is rejected
/// rather than silently wrapping.
pub const MAX_VARINT_LEN: usize = 10;

/// The 3-bit framing discriminant carried in every field tag.
///
/// Wire types 3 and 4 (legacy start/end group) are deliberately absent:
/// inputs using them are rejected with [`WireError::InvalidWireType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireType {
    /// Base-128 varint value (wire type 0).
    Varint,
    /// Exactly 8 raw bytes (wire type 1).
    Fixed64,
    /// Varint length prefix followed by that many bytes (wire type 2).
    LengthDelimited,
    /// Exactly 4 raw bytes (wire type 5).
    Fixed32,
}

impl WireType {
    /// Map a raw 3-bit tag suffix to a wire type.
    pub fn from_raw(raw: u8) -> Result<WireType, WireError> {
        match raw {
            0 => Ok(WireType::Varint),
            1 => Ok(WireType::Fixed64),
            2 => Ok(WireType::LengthDelimited),
            5 => Ok(WireType::Fixed32),
            other => Err(WireError::InvalidWireType(other)),
        }
    }

    /// The raw 3-bit value as it appears in a tag.
    pub fn as_raw(self) -> u8 {
        match self {
            WireType::Varint => 0,
            WireType::Fixed64 => 1,
            WireType::LengthDelimited => 2,
            WireType::Fixed32 => 5,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WireError {
    /// A tag, length prefix, or declared-length payload extends past the end
    /// of the available bytes.
    #[error("truncated input")]
    Truncated,
    /// A varint never terminates within the remaining bytes, or exceeds the
    /// 10-byte 64-bit bound.
    #[error("malformed varint")]
    MalformedVarint,
    /// A decoded wire type outside {0, 1, 2, 5}. Covers the legacy group
    /// markers 3 and 4 as well as 6 and 7.
    #[error("invalid wire type: {0}")]
    InvalidWireType(u8),
}

/// Decode a varint from the start of `data`, returning the value and the
/// number of bytes consumed.
pub fn decode_varint(data: &[u8]) -> Result<(u64, usize), WireError> {
    let mut value: u64 = 0;
    for (i, &b) in data.iter().enumerate() {
        if i >= MAX_VARINT_LEN {
            return Err(WireError::MalformedVarint);
        }
        value |= u64::from(b & 0x7f) << (i * 7);
        if b & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }
    Err(WireError::MalformedVarint)
}

/// Length in bytes of the varint at the start of `data`, without decoding it.
pub fn varint_len(data: &[u8]) -> Result<usize, WireError> {
    for (i, &b) in data.iter().enumerate() {
        if i >= MAX_VARINT_LEN {
            return Err(WireError::MalformedVarint);
        }
        if b & 0x80 == 0 {
            return Ok(i + 1);
        }
    }
    Err(WireError::MalformedVarint)
}

/// Encode `value` as a minimal-length varint.
pub fn encode_varint(value: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(MAX_VARINT_LEN);
    encode_varint_into(&mut out, value);
    out
}

/// Append the minimal-length varint encoding of `value` to `out`.
pub fn encode_varint_into(out: &mut Vec<u8>, value: u64) {
    let mut v = value;
    loop {
        let b = (v & 0x7f) as u8;
        v >>= 7;
        if v == 0 {
            out.push(b);
            return;
        }
        out.push(b | 0x80);
    }
}

/// Parse the tag at the start of `data`: field number, wire type, and bytes
/// consumed. Tags are varints, so field numbers above 15 span multiple bytes.
pub fn parse_tag(data: &[u8]) -> Result<(u64, WireType, usize), WireError> {
    let (tag, read) = decode_varint(data).map_err(|e| match e {
        // A tag varint that runs off the end of the buffer is framing
        // truncation, not a varint-shape problem.
        WireError::MalformedVarint if data.len() < MAX_VARINT_LEN => WireError::Truncated,
        other => other,
    })?;
    let wire_type = WireType::from_raw((tag & 0x7) as u8)?;
    Ok((tag >> 3, wire_type, read))
}

/// Encode a field number and wire type into a varint tag.
pub fn encode_tag(field_number: u64, wire_type: WireType) -> Vec<u8> {
    encode_varint((field_number << 3) | u64::from(wire_type.as_raw()))
}

/// Append the varint tag for `field_number` / `wire_type` to `out`.
pub fn encode_tag_into(out: &mut Vec<u8>, field_number: u64, wire_type: WireType) {
    encode_varint_into(out, (field_number << 3) | u64::from(wire_type.as_raw()));
}
