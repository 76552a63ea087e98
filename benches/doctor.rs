//! Benchmark: identity round-trip vs full recursive descent vs a targeted
//! tree rewrite over a synthesized nested message. Identity measures pure
//! iterate+reserialize cost; descend adds one recursion level per nesting
//! layer; tree rewrite adds policy lookup plus one field replacement.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pbdoctor::{doctor, Field, Identity, Mutator, TreeMutator};

/// A message with a handful of scalar fields and one nested sub-message,
/// nested `depth` layers deep under field 1.
fn nested_message(depth: usize) -> Vec<u8> {
    let mut leaf = Vec::new();
    Field::varint(2, 150).serialize_into(&mut leaf);
    Field::fixed64(3, 0x0102_0304_0506_0708).serialize_into(&mut leaf);
    Field::bytes(4, b"payload bytes for the benchmark".to_vec()).serialize_into(&mut leaf);
    Field::fixed32(5, 7).serialize_into(&mut leaf);

    let mut data = leaf;
    for _ in 0..depth {
        let mut level = Vec::new();
        Field::varint(2, 1).serialize_into(&mut level);
        Field::bytes(1, data).serialize_into(&mut level);
        Field::varint(6, 2).serialize_into(&mut level);
        data = level;
    }
    data
}

/// Recurses through every nesting layer (field 1), leaving leaves alone.
struct DescendNested;

impl Mutator for DescendNested {
    fn message_mutator(&self, field_number: u64) -> Option<&dyn Mutator> {
        if field_number == 1 {
            Some(self)
        } else {
            None
        }
    }

    fn mutate(&self, _field: &Field) -> anyhow::Result<Option<Field<'static>>> {
        Ok(None)
    }
}

/// Tree policy descending `depth` levels of field 1, rewriting field 2 at
/// the leaf.
fn rewrite_tree(depth: usize) -> TreeMutator {
    let mut m = TreeMutator::new().rewrite([2], |f| Ok(Some(Field::varint(f.number(), 151))));
    for _ in 0..depth {
        m = TreeMutator::new().child(1, m);
    }
    m
}

fn bench_doctor(c: &mut Criterion) {
    let data = nested_message(16);

    c.bench_function("doctor_identity", |b| {
        b.iter(|| doctor(black_box(&data), &Identity).expect("doctor"))
    });

    c.bench_function("doctor_descend_nested", |b| {
        b.iter(|| doctor(black_box(&data), &DescendNested).expect("doctor"))
    });

    let tree = rewrite_tree(16);
    c.bench_function("doctor_tree_rewrite", |b| {
        b.iter(|| doctor(black_box(&data), &tree).expect("doctor"))
    });
}

criterion_group!(benches, bench_doctor);
criterion_main!(benches);
