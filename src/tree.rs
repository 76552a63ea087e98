//! Declarative mutator built from a field-number path tree.
//!
//! Instead of hand-writing a recursive [`Mutator`] type per nesting level, a
//! [`TreeMutator`] declares a sparse tree of interest: which field numbers to
//! descend into, and which to hand to a rewrite callback.

use crate::field::Field;
use crate::mutator::Mutator;
use std::collections::{HashMap, HashSet};

type RewriteFn = Box<dyn Fn(&Field) -> anyhow::Result<Option<Field<'static>>>>;

/// A [`Mutator`] assembled from child policies keyed by field number plus a
/// rewrite callback applied to a declared set of field numbers.
///
/// ```
/// # use pbdoctor::{Field, TreeMutator};
/// // Recurse into field 1, then field 2 inside it, rewriting field 3 there.
/// let m = TreeMutator::new().child(
///     1,
///     TreeMutator::new().child(
///         2,
///         TreeMutator::new().rewrite([3], |f| Ok(Some(Field::varint(f.number(), 99)))),
///     ),
/// );
/// ```
///
/// A field number present both as a child and in the rewrite set is handled
/// by recursion only: the engine finalizes recursed fields without consulting
/// `mutate` (see [`Mutator::message_mutator`]).
#[derive(Default)]
pub struct TreeMutator {
    children: HashMap<u64, TreeMutator>,
    fields: HashSet<u64>,
    rewrite: Option<RewriteFn>,
}

impl TreeMutator {
    pub fn new() -> TreeMutator {
        TreeMutator::default()
    }

    /// Descend into length-delimited field `number` with `child`.
    pub fn child(mut self, number: u64, child: TreeMutator) -> TreeMutator {
        self.children.insert(number, child);
        self
    }

    /// Apply `f` to every field whose number is in `numbers`. Later calls
    /// replace the callback and extend the set.
    pub fn rewrite<I>(
        mut self,
        numbers: I,
        f: impl Fn(&Field) -> anyhow::Result<Option<Field<'static>>> + 'static,
    ) -> TreeMutator
    where
        I: IntoIterator<Item = u64>,
    {
        self.fields.extend(numbers);
        self.rewrite = Some(Box::new(f));
        self
    }
}

impl Mutator for TreeMutator {
    fn message_mutator(&self, field_number: u64) -> Option<&dyn Mutator> {
        self.children.get(&field_number).map(|c| c as &dyn Mutator)
    }

    fn mutate(&self, field: &Field) -> anyhow::Result<Option<Field<'static>>> {
        if !self.fields.contains(&field.number()) {
            return Ok(None);
        }
        match &self.rewrite {
            Some(f) => f(field),
            None => Ok(None),
        }
    }
}
