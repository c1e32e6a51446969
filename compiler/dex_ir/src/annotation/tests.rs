use super::*;
use crate::value::EncodedValueRef;
use dex_diagnostic::{DiagnosticCollector, NullSink};
use pretty_assertions::assert_eq;

struct Text(&'static str);

impl EncodedValue for Text {
    fn value(&self) -> EncodedValueRef<'_> {
        EncodedValueRef::String(self.0)
    }
}

struct Pair {
    name: &'static str,
    value: Text,
}

impl AnnotationElement for Pair {
    fn name(&self) -> &str {
        self.name
    }

    fn value(&self) -> &dyn EncodedValue {
        &self.value
    }
}

fn pair(name: &'static str, value: &'static str) -> Pair {
    Pair {
        name,
        value: Text(value),
    }
}

fn string(value: &str) -> ImmutableEncodedValue {
    ImmutableEncodedValue::String(Arc::from(value))
}

// Elements

#[test]
fn test_element_of_copies_foreign() {
    let element = ImmutableAnnotationElement::of_with(&pair("value", "hello"), &mut NullSink);
    assert_eq!(element.name(), "value");
    assert_eq!(element.canonical_value(), &string("hello"));
    assert_eq!(element.value().value_type(), crate::ValueType::String);
}

#[test]
fn test_element_of_canonical_is_identity() {
    let element = ImmutableAnnotationElement::of(&pair("value", "hello"));
    let again = ImmutableAnnotationElement::of(&element);
    assert!(ImmutableAnnotationElement::ptr_eq(&element, &again));
}

#[test]
fn test_new_and_from_canonical_agree() {
    let built = ImmutableAnnotationElement::new("value", &Text("hello"));
    let direct = ImmutableAnnotationElement::from_canonical(Arc::from("value"), string("hello"));
    assert_eq!(built, direct);
}

#[test]
fn test_element_order_is_name_then_value() {
    let a = ImmutableAnnotationElement::from_canonical(Arc::from("a"), string("z"));
    let b1 = ImmutableAnnotationElement::from_canonical(Arc::from("b"), string("a"));
    let b2 = ImmutableAnnotationElement::from_canonical(Arc::from("b"), string("b"));
    assert!(a < b1);
    assert!(b1 < b2);
    assert_eq!(ByName.compare(&b1, &b2), Ordering::Equal);
}

// Sorted sets

#[test]
fn test_sorted_set_drops_repeated_name() {
    let input = vec![pair("x", "1"), pair("y", "2"), pair("x", "3")];
    let mut sink = DiagnosticCollector::new();

    let set = immutable_sorted_set_with(Some(&input), &mut sink);

    let entries: Vec<(&str, &ImmutableEncodedValue)> = set
        .iter()
        .map(|e| (e.name(), e.canonical_value()))
        .collect();
    assert_eq!(entries, [("x", &string("1")), ("y", &string("2"))]);
    assert_eq!(
        sink.messages(),
        ["Ignoring duplicate annotation value for name: x"]
    );
}

#[test]
fn test_sorted_set_of_absent_is_empty() {
    let set = immutable_sorted_set_of(None::<Vec<&Pair>>);
    assert!(set.is_empty());
}

#[test]
fn test_sorted_set_accepts_mixed_forms() {
    let canonical = ImmutableAnnotationElement::of(&pair("b", "kept"));
    let foreign = pair("a", "copied");
    let input: [&dyn AnnotationElement; 2] = [&canonical, &foreign];

    let set = immutable_sorted_set_with(Some(input), &mut NullSink);

    assert_eq!(set.len(), 2);
    assert_eq!(set.as_slice()[0].name(), "a");
    assert!(ImmutableAnnotationElement::ptr_eq(&set.as_slice()[1], &canonical));
}

// Annotations

#[test]
fn test_annotation_lookup() {
    let annotation = ImmutableAnnotation::new_with(
        "Lcom/example/Named;",
        Some(&[pair("value", "main"), pair("alias", "entry")]),
        &mut NullSink,
    );

    assert_eq!(annotation.annotation_type(), "Lcom/example/Named;");
    let names: Vec<&str> = annotation.elements().iter().map(|e| e.name()).collect();
    assert_eq!(names, ["alias", "value"]);
    assert_eq!(
        annotation.element("value").map(ImmutableAnnotationElement::canonical_value),
        Some(&string("main"))
    );
    assert!(annotation.element("missing").is_none());
}

#[test]
fn test_annotation_reports_duplicates() {
    let mut sink = DiagnosticCollector::new();
    let annotation = ImmutableAnnotation::new_with(
        "LMarker;",
        Some(&[pair("k", "1"), pair("k", "2"), pair("k", "3")]),
        &mut sink,
    );

    assert_eq!(annotation.elements().len(), 1);
    assert_eq!(sink.len(), 2);
}

#[test]
fn test_annotation_from_canonical_shares_elements() {
    let elements = immutable_sorted_set_with(Some(&[pair("a", "1")]), &mut NullSink);
    let annotation = ImmutableAnnotation::from_canonical(Arc::from("LMarker;"), elements.clone());
    assert!(CanonicalSet::ptr_eq(annotation.elements(), &elements));
}

#[test]
fn test_annotation_order_is_type_then_elements() {
    let make = |ty: &str, value: &'static str| {
        ImmutableAnnotation::new_with(ty, Some(&[pair("v", value)]), &mut NullSink)
    };
    assert!(make("LA;", "z") < make("LB;", "a"));
    assert!(make("LA;", "a") < make("LA;", "b"));
    assert_eq!(make("LA;", "a"), make("LA;", "a"));
}

// Name order

#[test]
fn test_names_sort_by_utf16_code_unit() {
    let input = vec![pair("\u{E000}", "private use"), pair("\u{10000}", "supplementary")];
    let mut sink = DiagnosticCollector::new();

    let set = immutable_sorted_set_with(Some(&input), &mut sink);

    let names: Vec<&str> = set.iter().map(|e| e.name()).collect();
    assert_eq!(names, ["\u{10000}", "\u{E000}"]);
    assert!(sink.is_empty());
}

#[test]
fn test_lookup_follows_utf16_order() {
    let annotation = ImmutableAnnotation::new_with(
        "LMarker;",
        Some(&[pair("\u{E000}", "p"), pair("\u{10000}", "s"), pair("a", "ascii")]),
        &mut NullSink,
    );

    for (name, value) in [("a", "ascii"), ("\u{10000}", "s"), ("\u{E000}", "p")] {
        assert_eq!(
            annotation.element(name).map(ImmutableAnnotationElement::canonical_value),
            Some(&string(value)),
            "{name:?}"
        );
    }
}

#[test]
fn test_element_list_view() {
    let input = vec![pair("a", "1"), pair("b", "2")];
    let list: &dyn ElementList = &input;

    assert_eq!(list.len(), 2);
    assert!(!list.is_empty());
    let names: Vec<&str> = list.iter().map(|e| e.name()).collect();
    assert_eq!(names, ["a", "b"]);
}
