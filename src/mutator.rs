//! The mutation policy contract and the simplest implementations.

use crate::field::Field;

/// A caller-supplied policy consulted once per decoded field.
///
/// One instance is scoped to exactly one message (or sub-message) traversal;
/// the engine never shares an instance across sibling recursions, so
/// implementations need no synchronization.
pub trait Mutator {
    /// Called for every length-delimited field before [`Mutator::mutate`].
    /// Returning a child policy means "treat this field's payload as a nested
    /// message and recurse with it"; the field is then rebuilt from the
    /// recursion result and `mutate` is *not* additionally consulted for it.
    /// Returning `None` means "treat the payload as opaque bytes".
    fn message_mutator(&self, field_number: u64) -> Option<&dyn Mutator>;

    /// Called once per field not handled by recursion.
    ///
    /// Return `Ok(None)` to keep the original bytes untouched, or a
    /// replacement field to substitute wholesale (the replacement may carry a
    /// different number or wire type, and its payload may be hand-serialized
    /// nested fields). Any error aborts the entire walk with no partial
    /// output.
    fn mutate(&self, field: &Field) -> anyhow::Result<Option<Field<'static>>>;
}

/// Never recurses, never replaces. Doctoring with this policy reproduces the
/// input byte for byte.
#[derive(Debug, Default, Clone, Copy)]
pub struct Identity;

impl Mutator for Identity {
    fn message_mutator(&self, _field_number: u64) -> Option<&dyn Mutator> {
        None
    }

    fn mutate(&self, _field: &Field) -> anyhow::Result<Option<Field<'static>>> {
        Ok(None)
    }
}

/// Flat closure-based policy: applies one function to every field, never
/// recurses. For sparse per-number rewriting with recursion see
/// [`TreeMutator`](crate::tree::TreeMutator).
pub struct FnMutator<F>(pub F)
where
    F: Fn(&Field) -> anyhow::Result<Option<Field<'static>>>;

impl<F> Mutator for FnMutator<F>
where
    F: Fn(&Field) -> anyhow::Result<Option<Field<'static>>>,
{
    fn message_mutator(&self, _field_number: u64) -> Option<&dyn Mutator> {
        None
    }

    fn mutate(&self, field: &Field) -> anyhow::Result<Option<Field<'static>>> {
        (self.0)(field)
    }
}
