//! A single decoded wire-format field and its serialization.
//!
//! Decoded fields borrow their payload from the source buffer (zero-copy);
//! fields synthesized by a mutator own their bytes. `Cow` carries both cases.

use crate::wire::{self, WireType};
use byteorder::{ByteOrder, LittleEndian};
use std::borrow::Cow;

/// One field of a serialized message.
///
/// Given the proto structure
///
/// ```text
/// message MyMessage {
///   string name = 4;
/// }
/// ```
///
/// serialized with `name = "John"`, the decoded field is
///
/// ```
/// # use pbdoctor::{Field, WireType};
/// let f = Field::new(4, WireType::LengthDelimited, b"John".as_slice());
/// assert_eq!(f.payload(), b"John");
/// ```
///
/// `payload` holds the raw value bytes exactly as they appear on the wire:
/// for [`WireType::Varint`] the encoded varint bytes (not the decoded
/// integer), for [`WireType::LengthDelimited`] the bytes after the length
/// prefix (the prefix itself is recomputed on serialization).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field<'a> {
    number: u64,
    wire_type: WireType,
    payload: Cow<'a, [u8]>,
}

impl<'a> Field<'a> {
    pub fn new(number: u64, wire_type: WireType, payload: impl Into<Cow<'a, [u8]>>) -> Field<'a> {
        Field {
            number,
            wire_type,
            payload: payload.into(),
        }
    }

    /// Field number as declared in the (unknown) .proto file.
    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn wire_type(&self) -> WireType {
        self.wire_type
    }

    /// Raw value bytes, exactly as found on the wire.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Build an owned varint field from a decoded integer value.
    pub fn varint(number: u64, value: u64) -> Field<'static> {
        Field::new(number, WireType::Varint, wire::encode_varint(value))
    }

    /// Build an owned length-delimited field. The payload may itself be
    /// pre-serialized nested fields, letting callers synthesize new nested
    /// structure by hand via [`Field::serialize`].
    pub fn bytes(number: u64, data: impl Into<Vec<u8>>) -> Field<'static> {
        Field::new(number, WireType::LengthDelimited, data.into())
    }

    pub fn fixed32(number: u64, value: u32) -> Field<'static> {
        let mut buf = [0u8; 4];
        LittleEndian::write_u32(&mut buf, value);
        Field::new(number, WireType::Fixed32, buf.to_vec())
    }

    pub fn fixed64(number: u64, value: u64) -> Field<'static> {
        let mut buf = [0u8; 8];
        LittleEndian::write_u64(&mut buf, value);
        Field::new(number, WireType::Fixed64, buf.to_vec())
    }

    /// Decoded integer value for a varint field; `None` for other wire types
    /// or a payload that is not a well-formed varint.
    pub fn varint_value(&self) -> Option<u64> {
        if self.wire_type != WireType::Varint {
            return None;
        }
        wire::decode_varint(&self.payload).ok().map(|(v, _)| v)
    }

    /// Little-endian u32 value for a fixed32 field.
    pub fn fixed32_value(&self) -> Option<u32> {
        if self.wire_type != WireType::Fixed32 || self.payload.len() != 4 {
            return None;
        }
        Some(LittleEndian::read_u32(&self.payload))
    }

    /// Little-endian u64 value for a fixed64 field.
    pub fn fixed64_value(&self) -> Option<u64> {
        if self.wire_type != WireType::Fixed64 || self.payload.len() != 8 {
            return None;
        }
        Some(LittleEndian::read_u64(&self.payload))
    }

    /// Detach the payload from the source buffer.
    pub fn into_owned(self) -> Field<'static> {
        Field {
            number: self.number,
            wire_type: self.wire_type,
            payload: Cow::Owned(self.payload.into_owned()),
        }
    }

    /// Serialize the field back into wire format: tag, then for
    /// length-delimited fields a recomputed length prefix, then the payload.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.payload.len() + wire::MAX_VARINT_LEN * 2);
        self.serialize_into(&mut out);
        out
    }

    /// Append the wire encoding of the field to `out`.
    pub fn serialize_into(&self, out: &mut Vec<u8>) {
        wire::encode_tag_into(out, self.number, self.wire_type);
        if self.wire_type == WireType::LengthDelimited {
            wire::encode_varint_into(out, self.payload.len() as u64);
        }
        out.extend_from_slice(&self.payload);
    }
}
