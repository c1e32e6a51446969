use super::*;
use crate::reference::{ImmutableMethodReference, MethodReference};
use dex_diagnostic::{DiagnosticCollector, NullSink};
use pretty_assertions::assert_eq;

struct MutableMethod {
    class: String,
    name: String,
    params: Vec<String>,
    ret: String,
}

impl MethodReference for MutableMethod {
    fn containing_class(&self) -> &str {
        &self.class
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn parameter_count(&self) -> usize {
        self.params.len()
    }

    fn parameter_type(&self, index: usize) -> &str {
        &self.params[index]
    }

    fn return_type(&self) -> &str {
        &self.ret
    }
}

fn mutable_method() -> MutableMethod {
    MutableMethod {
        class: "Lcom/example/Foo;".to_owned(),
        name: "bar".to_owned(),
        params: vec!["I".to_owned(), "Ljava/lang/String;".to_owned()],
        ret: "V".to_owned(),
    }
}

#[test]
fn test_form_tags() {
    let foreign = mutable_method();
    assert!(!MethodReference::form(&foreign).is_canonical());

    let canonical = ImmutableMethodReference::of(&foreign);
    assert!(MethodReference::form(&canonical).is_canonical());
}

#[test]
fn test_of_short_circuits_canonical() {
    let canonical = ImmutableMethodReference::of(&mutable_method());
    let again: ImmutableMethodReference = of(&canonical);
    assert!(ImmutableMethodReference::ptr_eq(&canonical, &again));
}

#[test]
fn test_of_through_trait_object_still_short_circuits() {
    let canonical = ImmutableMethodReference::of(&mutable_method());
    let boxed: Box<dyn MethodReference> = Box::new(canonical.clone());

    let again: ImmutableMethodReference = of_with(&*boxed, &mut NullSink);
    assert!(ImmutableMethodReference::ptr_eq(&canonical, &again));
}

#[test]
fn test_foreign_is_copied() {
    let foreign = mutable_method();
    let first: ImmutableMethodReference = of_with(&foreign, &mut NullSink);
    let second: ImmutableMethodReference = of_with(&foreign, &mut NullSink);

    // Equal values, distinct allocations.
    assert_eq!(first, second);
    assert!(!ImmutableMethodReference::ptr_eq(&first, &second));
}

#[test]
fn test_to_canonical_emits_nothing_for_references() {
    let mut sink = DiagnosticCollector::new();
    let canonical: ImmutableMethodReference = mutable_method().to_canonical(&mut sink);
    assert_eq!(canonical.name(), "bar");
    assert!(sink.is_empty());
}
