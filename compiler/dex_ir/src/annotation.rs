//! Annotation elements and annotations.
//!
//! An annotation is a type descriptor plus a set of name/value elements.
//! Element sets are [`CanonicalSet`]s ordered [`ByName`]: a name appears at
//! most once, and a repeated name is dropped with the diagnostic
//!
//! ```text
//! Ignoring duplicate annotation value for name: <name>
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use dex_diagnostic::{DiagnosticSink, TerminalEmitter};

use crate::canonical::set::{build_canonical_set, compare_utf16, CanonicalSet, SetOrder};
use crate::canonical::{self, Canonicalize, Form};
use crate::value::{EncodedValue, ImmutableEncodedValue};

/// Capability of a single name/value pair inside an annotation.
pub trait AnnotationElement {
    fn name(&self) -> &str;

    fn value(&self) -> &dyn EncodedValue;

    fn form(&self) -> Form<'_, ImmutableAnnotationElement> {
        Form::Foreign
    }
}

/// Borrowed, indexable run of annotation elements.
///
/// Lets [`EncodedValueRef::Annotation`](crate::EncodedValueRef::Annotation)
/// hand out a container's elements without collecting them.
pub trait ElementList {
    fn len(&self) -> usize;

    /// Element `index`; panics when out of range.
    fn element_at(&self, index: usize) -> &dyn AnnotationElement;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl dyn ElementList + '_ {
    pub fn iter(&self) -> Elements<'_> {
        Elements {
            list: self,
            index: 0,
        }
    }
}

/// Iterator over an [`ElementList`].
pub struct Elements<'a> {
    list: &'a dyn ElementList,
    index: usize,
}

impl<'a> Iterator for Elements<'a> {
    type Item = &'a dyn AnnotationElement;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index == self.list.len() {
            return None;
        }
        let element = self.list.element_at(self.index);
        self.index += 1;
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.list.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Elements<'_> {}

impl<A: AnnotationElement> ElementList for Vec<A> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn element_at(&self, index: usize) -> &dyn AnnotationElement {
        &self[index]
    }
}

impl<A: AnnotationElement> ElementList for CanonicalSet<A> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn element_at(&self, index: usize) -> &dyn AnnotationElement {
        &self.as_slice()[index]
    }
}

impl<T: AnnotationElement + ?Sized> Canonicalize<ImmutableAnnotationElement> for T {
    fn canonical_form(&self) -> Form<'_, ImmutableAnnotationElement> {
        AnnotationElement::form(self)
    }

    fn copy_canonical(&self, sink: &mut dyn DiagnosticSink) -> ImmutableAnnotationElement {
        ImmutableAnnotationElement::new_with(self.name(), self.value(), sink)
    }
}

#[derive(PartialEq, Eq, Hash)]
struct ElementData {
    name: Arc<str>,
    value: ImmutableEncodedValue,
}

/// The canonical, immutable annotation element.
#[derive(Clone)]
pub struct ImmutableAnnotationElement(Arc<ElementData>);

impl ImmutableAnnotationElement {
    /// Build from any encoded value, canonicalizing it.
    ///
    /// Duplicates inside a nested annotation value are reported to stderr.
    pub fn new<V: EncodedValue + ?Sized>(name: &str, value: &V) -> Self {
        Self::new_with(name, value, &mut TerminalEmitter::default())
    }

    /// Build from any encoded value, reporting nested duplicates to `sink`.
    pub fn new_with<V: EncodedValue + ?Sized>(
        name: &str,
        value: &V,
        sink: &mut dyn DiagnosticSink,
    ) -> Self {
        Self::from_canonical(Arc::from(name), ImmutableEncodedValue::of_with(value, sink))
    }

    /// Build from an already canonical value; nothing is copied.
    pub fn from_canonical(name: Arc<str>, value: ImmutableEncodedValue) -> Self {
        ImmutableAnnotationElement(Arc::new(ElementData { name, value }))
    }

    /// Canonicalize any annotation element.
    pub fn of<A: AnnotationElement + ?Sized>(element: &A) -> Self {
        canonical::of(element)
    }

    /// Canonicalize any annotation element, reporting nested duplicates to `sink`.
    pub fn of_with<A: AnnotationElement + ?Sized>(
        element: &A,
        sink: &mut dyn DiagnosticSink,
    ) -> Self {
        canonical::of_with(element, sink)
    }

    /// The canonical value, without going through the capability.
    pub fn canonical_value(&self) -> &ImmutableEncodedValue {
        &self.0.value
    }

    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl AnnotationElement for ImmutableAnnotationElement {
    fn name(&self) -> &str {
        &self.0.name
    }

    fn value(&self) -> &dyn EncodedValue {
        &self.0.value
    }

    fn form(&self) -> Form<'_, ImmutableAnnotationElement> {
        Form::Canonical(self)
    }
}

impl PartialEq for ImmutableAnnotationElement {
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other) || self.0 == other.0
    }
}

impl Eq for ImmutableAnnotationElement {}

impl Hash for ImmutableAnnotationElement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl Ord for ImmutableAnnotationElement {
    /// Name in UTF-16 order, then value.
    fn cmp(&self, other: &Self) -> Ordering {
        compare_utf16(&self.0.name, &other.0.name)
            .then_with(|| self.0.value.cmp(&other.0.value))
    }
}

impl PartialOrd for ImmutableAnnotationElement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for ImmutableAnnotationElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {:?}", self.0.name, self.0.value)
    }
}

/// Orders annotation elements by name alone, in UTF-16 code unit order.
#[derive(Copy, Clone, Debug, Default)]
pub struct ByName;

impl SetOrder<ImmutableAnnotationElement> for ByName {
    fn compare(&self, a: &ImmutableAnnotationElement, b: &ImmutableAnnotationElement) -> Ordering {
        compare_utf16(a.name(), b.name())
    }

    fn key(&self, element: &ImmutableAnnotationElement) -> String {
        element.name().to_owned()
    }

    fn subject(&self) -> &'static str {
        "annotation value"
    }
}

/// Canonical element set ordered by name, reporting duplicates to stderr.
///
/// `None` is an absent element list and yields an empty set.
pub fn immutable_sorted_set_of<'a, A, I>(
    elements: Option<I>,
) -> CanonicalSet<ImmutableAnnotationElement>
where
    A: AnnotationElement + ?Sized + 'a,
    I: IntoIterator<Item = &'a A>,
{
    immutable_sorted_set_with(elements, &mut TerminalEmitter::default())
}

/// Canonical element set ordered by name, reporting duplicates to `sink`.
pub fn immutable_sorted_set_with<'a, A, I>(
    elements: Option<I>,
    sink: &mut dyn DiagnosticSink,
) -> CanonicalSet<ImmutableAnnotationElement>
where
    A: AnnotationElement + ?Sized + 'a,
    I: IntoIterator<Item = &'a A>,
{
    build_canonical_set(elements, &ByName, sink)
}

#[derive(PartialEq, Eq, Hash)]
struct AnnotationData {
    annotation_type: Arc<str>,
    elements: CanonicalSet<ImmutableAnnotationElement>,
}

/// The canonical, immutable annotation: a type plus a name-ordered element set.
///
/// Ordered by type (UTF-16 order), then elements.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ImmutableAnnotation(Arc<AnnotationData>);

impl ImmutableAnnotation {
    /// Build from any elements, reporting duplicates to stderr.
    pub fn new<'a, A, I>(annotation_type: &str, elements: Option<I>) -> Self
    where
        A: AnnotationElement + ?Sized + 'a,
        I: IntoIterator<Item = &'a A>,
    {
        Self::new_with(annotation_type, elements, &mut TerminalEmitter::default())
    }

    /// Build from any elements, reporting duplicates to `sink`.
    pub fn new_with<'a, A, I>(
        annotation_type: &str,
        elements: Option<I>,
        sink: &mut dyn DiagnosticSink,
    ) -> Self
    where
        A: AnnotationElement + ?Sized + 'a,
        I: IntoIterator<Item = &'a A>,
    {
        Self::from_canonical(
            Arc::from(annotation_type),
            immutable_sorted_set_with(elements, sink),
        )
    }

    /// Build from an already canonical element set; nothing is copied.
    pub fn from_canonical(
        annotation_type: Arc<str>,
        elements: CanonicalSet<ImmutableAnnotationElement>,
    ) -> Self {
        ImmutableAnnotation(Arc::new(AnnotationData {
            annotation_type,
            elements,
        }))
    }

    pub fn annotation_type(&self) -> &str {
        &self.0.annotation_type
    }

    pub fn elements(&self) -> &CanonicalSet<ImmutableAnnotationElement> {
        &self.0.elements
    }

    /// Element named `name`, if present.
    pub fn element(&self, name: &str) -> Option<&ImmutableAnnotationElement> {
        self.0
            .elements
            .search_by(|element| compare_utf16(element.name(), name))
    }
}

impl Ord for ImmutableAnnotation {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_utf16(self.annotation_type(), other.annotation_type())
            .then_with(|| self.elements().cmp(other.elements()))
    }
}

impl PartialOrd for ImmutableAnnotation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for ImmutableAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Annotation")
            .field("type", &self.annotation_type())
            .field("elements", self.elements())
            .finish()
    }
}

#[cfg(test)]
mod tests;
