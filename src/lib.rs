//! # pbdoctor — Schema-less protobuf wire-format walker and mutator
//!
//! Parses a serialized protocol-buffer message into its constituent fields
//! using only the generic wire format (field number, wire type, raw bytes) —
//! no `.proto` definitions consulted or required — applies a caller-supplied
//! policy field by field, and re-serializes the result into a byte-for-byte
//! valid message.
//!
//! ## Pieces
//!
//! - **[`wire`]**: varint and tag codecs, [`WireType`], [`WireError`]
//! - **[`Field`]**: one decoded field (number, wire type, raw payload)
//! - **[`Buffer`]**: sequential field iterator over a byte slice
//! - **[`Doctor`] / [`doctor`]**: the recursive mutation engine
//! - **[`Mutator`]**: the per-field policy trait
//! - **[`TreeMutator`]**: declarative policy mapping field numbers to
//!   children and rewrites
//! - **[`dump`]**: schema-less textual rendering of a message
//!
//! ## Example
//!
//! Rewrite field 2 inside the sub-message at field 1, leaving everything else
//! untouched:
//!
//! ```
//! use pbdoctor::{doctor, Field, TreeMutator};
//!
//! // Outer field 1 wraps a message holding inner field 2 = varint 42.
//! let inner = Field::varint(2, 42).serialize();
//! let data = Field::bytes(1, inner).serialize();
//!
//! let policy = TreeMutator::new().child(
//!     1,
//!     TreeMutator::new().rewrite([2], |f| Ok(Some(Field::varint(f.number(), 43)))),
//! );
//! let out = doctor(&data, &policy)?;
//!
//! let expected_inner = Field::varint(2, 43).serialize();
//! assert_eq!(out, Field::bytes(1, expected_inner).serialize());
//! # Ok::<(), pbdoctor::DoctorError>(())
//! ```
//!
//! Failure anywhere (truncated input, invalid wire type, policy error) aborts
//! the whole call with no partial output. Wire types 3 and 4 (legacy groups)
//! are rejected, not interpreted.

pub mod buffer;
pub mod doctor;
pub mod dump;
pub mod field;
pub mod mutator;
pub mod tree;
pub mod wire;

pub use buffer::Buffer;
pub use doctor::{doctor, Doctor, DoctorError, DEFAULT_MAX_DEPTH};
pub use dump::dump;
pub use field::Field;
pub use mutator::{FnMutator, Identity, Mutator};
pub use tree::TreeMutator;
pub use wire::{
    decode_varint, encode_tag, encode_varint, parse_tag, varint_len, WireError, WireType,
    MAX_VARINT_LEN,
};
