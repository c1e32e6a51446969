//! Building canonical sets from many threads at once.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use dex_diagnostic::{DiagnosticCollector, SharedSink};
use dex_ir::{
    immutable_sorted_set_with, AnnotationElement, CanonicalSet, EncodedValue, EncodedValueRef,
    ImmutableAnnotation, ImmutableAnnotationElement, ImmutableEncodedValue,
    ImmutableMethodReference,
};
use rayon::prelude::*;

struct Flag(bool);

impl EncodedValue for Flag {
    fn value(&self) -> EncodedValueRef<'_> {
        EncodedValueRef::Boolean(self.0)
    }
}

struct Setting {
    name: String,
    value: Flag,
}

impl AnnotationElement for Setting {
    fn name(&self) -> &str {
        &self.name
    }

    fn value(&self) -> &dyn EncodedValue {
        &self.value
    }
}

fn settings(batch: usize) -> Vec<Setting> {
    // Every batch repeats "enabled" once.
    vec![
        Setting {
            name: "enabled".to_owned(),
            value: Flag(true),
        },
        Setting {
            name: format!("batch{batch}"),
            value: Flag(batch % 2 == 0),
        },
        Setting {
            name: "enabled".to_owned(),
            value: Flag(false),
        },
    ]
}

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_canonical_types_are_thread_safe() {
    assert_send_sync::<ImmutableMethodReference>();
    assert_send_sync::<ImmutableEncodedValue>();
    assert_send_sync::<ImmutableAnnotationElement>();
    assert_send_sync::<ImmutableAnnotation>();
    assert_send_sync::<CanonicalSet<ImmutableAnnotationElement>>();
}

#[test]
fn test_parallel_builds_share_one_sink() {
    dex_diagnostic::init_tracing();
    let shared = SharedSink::new(DiagnosticCollector::new());

    let sets: Vec<CanonicalSet<ImmutableAnnotationElement>> = (0..64)
        .into_par_iter()
        .map(|batch| {
            let mut sink = shared.clone();
            immutable_sorted_set_with(Some(&settings(batch)), &mut sink)
        })
        .collect();

    assert_eq!(sets.len(), 64);
    for set in &sets {
        assert_eq!(set.len(), 2);
        assert_eq!(
            set.get(1).map(|e| e.canonical_value().clone()),
            Some(ImmutableEncodedValue::Boolean(true))
        );
    }

    let collector = shared.lock();
    assert_eq!(collector.len(), 64);
    assert!(collector
        .messages()
        .iter()
        .all(|m| *m == "Ignoring duplicate annotation value for name: enabled"));
}

#[test]
fn test_canonical_set_read_from_many_threads() {
    let set = immutable_sorted_set_with(Some(&settings(7)), &mut DiagnosticCollector::new());

    let names: Vec<String> = (0..32)
        .into_par_iter()
        .map(|i| {
            let element = &set.as_slice()[i % set.len()];
            element.name().to_owned()
        })
        .collect();

    assert_eq!(names.len(), 32);
    assert!(names.iter().all(|n| n == "batch7" || n == "enabled"));
}
