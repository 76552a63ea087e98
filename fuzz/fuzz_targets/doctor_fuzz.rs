//! Doctor fuzz target: feed arbitrary bytes through the engine.
//! The engine must not panic; on any input it returns Ok(bytes) or Err.
//! Output is normalized (minimal tag/length varints), so the sound property
//! is idempotence: doctoring a doctored message reproduces it exactly.
//! Build with: cargo fuzz run doctor_fuzz (requires nightly and cargo fuzz).

#![cfg_attr(fuzzing, no_main)]

#[cfg(fuzzing)]
use libfuzzer_sys::fuzz_target;

#[cfg(fuzzing)]
fuzz_target!(|data: &[u8]| {
    use pbdoctor::{doctor, Field, Identity, Mutator};

    if let Ok(out) = doctor(data, &Identity) {
        let again = doctor(&out, &Identity).expect("doctored output must re-parse");
        assert_eq!(again, out);
    }

    // Descending everywhere may legitimately fail on opaque byte payloads,
    // but success must still be idempotent.
    struct DescendAll;
    impl Mutator for DescendAll {
        fn message_mutator(&self, _n: u64) -> Option<&dyn Mutator> {
            Some(self)
        }
        fn mutate(&self, _f: &Field) -> anyhow::Result<Option<Field<'static>>> {
            Ok(None)
        }
    }
    if let Ok(out) = doctor(data, &DescendAll) {
        let again = doctor(&out, &DescendAll).expect("doctored output must re-parse");
        assert_eq!(again, out);
    }
});

#[cfg(not(fuzzing))]
fn main() {
    eprintln!("Build with: cargo fuzz run doctor_fuzz");
}
