//! The mutation engine: walk a message, apply a policy, reassemble bytes.
//!
//! The engine drives a [`Buffer`](crate::buffer::Buffer) over the input,
//! consults the [`Mutator`] per field, recurses into length-delimited fields
//! when the policy supplies a child mutator, and concatenates the serialized
//! results in original field order. Any decode or policy failure aborts the
//! whole call; there is no partial output.

use crate::buffer::Buffer;
use crate::field::Field;
use crate::mutator::Mutator;
use crate::wire::{WireError, WireType};

/// Default cap on sub-message nesting. Deep enough for real messages, small
/// enough that adversarial nesting fails with an error instead of a stack
/// overflow.
pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Debug, thiserror::Error)]
pub enum DoctorError {
    /// Structural decode failure in the input bytes.
    #[error("wire: {0}")]
    Wire(#[from] WireError),
    /// Failure surfaced by the caller-supplied policy, propagated unchanged.
    #[error("mutator: {0}")]
    Mutator(#[source] anyhow::Error),
    /// Sub-message nesting exceeded the configured maximum.
    #[error("nesting depth exceeded maximum of {max}")]
    DepthExceeded { max: usize },
}

/// The mutation engine. Holds only configuration; each [`Doctor::run`] call
/// is an independent traversal.
#[derive(Debug, Clone, Copy)]
pub struct Doctor {
    max_depth: usize,
}

impl Default for Doctor {
    fn default() -> Self {
        Doctor::new()
    }
}

impl Doctor {
    pub fn new() -> Doctor {
        Doctor {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Engine with a custom nesting cap. Recursion depth equals the nesting
    /// depth of length-delimited fields the policy chooses to descend into.
    pub fn with_max_depth(max_depth: usize) -> Doctor {
        Doctor { max_depth }
    }

    /// Walk `data` applying `mutator`, returning the reassembled message.
    pub fn run(&self, data: &[u8], mutator: &dyn Mutator) -> Result<Vec<u8>, DoctorError> {
        self.run_at(data, mutator, 0)
    }

    fn run_at(
        &self,
        data: &[u8],
        mutator: &dyn Mutator,
        depth: usize,
    ) -> Result<Vec<u8>, DoctorError> {
        if depth > self.max_depth {
            return Err(DoctorError::DepthExceeded {
                max: self.max_depth,
            });
        }

        let mut buffer = Buffer::new(data);
        let mut out = Vec::with_capacity(data.len());
        while let Some((field, _)) = buffer.read_field()? {
            // Recursion takes precedence: a field rebuilt from a child
            // mutator is finalized and not additionally passed to mutate.
            if field.wire_type() == WireType::LengthDelimited {
                if let Some(child) = mutator.message_mutator(field.number()) {
                    let rebuilt = self.run_at(field.payload(), child, depth + 1)?;
                    Field::new(field.number(), WireType::LengthDelimited, rebuilt)
                        .serialize_into(&mut out);
                    continue;
                }
            }
            match mutator.mutate(&field).map_err(DoctorError::Mutator)? {
                Some(replacement) => replacement.serialize_into(&mut out),
                None => field.serialize_into(&mut out),
            }
        }
        Ok(out)
    }
}

/// Walk `data` with the default engine configuration.
pub fn doctor(data: &[u8], mutator: &dyn Mutator) -> Result<Vec<u8>, DoctorError> {
    Doctor::new().run(data, mutator)
}
