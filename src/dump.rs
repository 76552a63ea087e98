//! Format a serialized message for display without a schema.
//!
//! Renders one line per field (number, wire type, value preview),
//! heuristically descending into length-delimited payloads that re-parse
//! cleanly as messages. Useful for eyeballing unknown protos before writing a
//! mutator against them.

use crate::buffer::Buffer;
use crate::doctor::DEFAULT_MAX_DEPTH;
use crate::field::Field;
use crate::wire::{WireError, WireType};
use std::fmt::Write;

/// Render every field in `data` as indented text.
///
/// Fails only if the top-level message is malformed; a length-delimited
/// payload that does not re-parse is shown as bytes, not an error. Descent
/// stops at [`DEFAULT_MAX_DEPTH`] so pathological nesting renders as raw
/// bytes instead of exhausting the stack.
pub fn dump(data: &[u8]) -> Result<String, WireError> {
    let mut out = String::new();
    dump_level(data, 0, &mut out)?;
    Ok(out)
}

fn dump_level(data: &[u8], indent: usize, out: &mut String) -> Result<(), WireError> {
    let mut buffer = Buffer::new(data);
    while let Some((field, _)) = buffer.read_field()? {
        dump_field(&field, indent, out);
    }
    Ok(())
}

fn dump_field(field: &Field, indent: usize, out: &mut String) {
    let pad = "  ".repeat(indent);
    match field.wire_type() {
        WireType::Varint => {
            let _ = writeln!(
                out,
                "{}{}: varint {}",
                pad,
                field.number(),
                field.varint_value().unwrap_or(0)
            );
        }
        WireType::Fixed64 => {
            let _ = writeln!(
                out,
                "{}{}: fixed64 {}",
                pad,
                field.number(),
                field.fixed64_value().unwrap_or(0)
            );
        }
        WireType::Fixed32 => {
            let _ = writeln!(
                out,
                "{}{}: fixed32 {}",
                pad,
                field.number(),
                field.fixed32_value().unwrap_or(0)
            );
        }
        WireType::LengthDelimited => {
            let payload = field.payload();
            // Indent doubles as nesting depth; stop descending at the same
            // cap the engine enforces.
            if !payload.is_empty() && indent < DEFAULT_MAX_DEPTH && parses_as_message(payload) {
                let _ = writeln!(
                    out,
                    "{}{}: message ({} bytes) {{",
                    pad,
                    field.number(),
                    payload.len()
                );
                // Checked above to parse cleanly, so this cannot fail.
                let _ = dump_level(payload, indent + 1, out);
                let _ = writeln!(out, "{}}}", pad);
            } else if !payload.is_empty() && payload.iter().all(|&b| (0x20..0x7f).contains(&b)) {
                let _ = writeln!(
                    out,
                    "{}{}: bytes ({}) {:?}",
                    pad,
                    field.number(),
                    payload.len(),
                    String::from_utf8_lossy(payload)
                );
            } else {
                let _ = writeln!(
                    out,
                    "{}{}: bytes ({}) hex({})",
                    pad,
                    field.number(),
                    payload.len(),
                    hex_string(payload)
                );
            }
        }
    }
}

/// Whether the payload decodes end to end as a sequence of fields.
fn parses_as_message(payload: &[u8]) -> bool {
    let mut buffer = Buffer::new(payload);
    loop {
        match buffer.read_field() {
            Ok(Some(_)) => {}
            Ok(None) => return true,
            Err(_) => return false,
        }
    }
}

fn hex_string(b: &[u8]) -> String {
    b.iter().map(|x| format!("{:02x}", x)).collect::<Vec<_>>().join(" ")
}
