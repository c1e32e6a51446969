//! Encoded values: the constants stored in annotations and static initializers.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use dex_diagnostic::{DiagnosticSink, TerminalEmitter};

use crate::annotation::{ElementList, ImmutableAnnotation};
use crate::canonical::set::compare_utf16;
use crate::canonical::{self, Canonicalize, Form};
use crate::reference::{
    FieldReference, ImmutableFieldReference, ImmutableMethodReference, MethodReference,
};

/// Encoded value type code, as written in the container's value headers.
///
/// Variants are declared in code order, so the derived `Ord` is code order.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ValueType {
    Byte = 0x00,
    Short = 0x02,
    Char = 0x03,
    Int = 0x04,
    Long = 0x06,
    Float = 0x10,
    Double = 0x11,
    String = 0x17,
    Type = 0x18,
    Field = 0x19,
    Method = 0x1a,
    Enum = 0x1b,
    Array = 0x1c,
    Annotation = 0x1d,
    Null = 0x1e,
    Boolean = 0x1f,
}

impl ValueType {
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0x00 => ValueType::Byte,
            0x02 => ValueType::Short,
            0x03 => ValueType::Char,
            0x04 => ValueType::Int,
            0x06 => ValueType::Long,
            0x10 => ValueType::Float,
            0x11 => ValueType::Double,
            0x17 => ValueType::String,
            0x18 => ValueType::Type,
            0x19 => ValueType::Field,
            0x1a => ValueType::Method,
            0x1b => ValueType::Enum,
            0x1c => ValueType::Array,
            0x1d => ValueType::Annotation,
            0x1e => ValueType::Null,
            0x1f => ValueType::Boolean,
            _ => return None,
        })
    }
}

/// Borrowed view of an encoded value, produced by [`EncodedValue::value`].
///
/// Nested entities are handed out as capability objects so that a foreign
/// implementation can keep whatever representation it likes. Arrays and
/// annotation elements are borrowed lists, so taking a view never allocates.
pub enum EncodedValueRef<'a> {
    Byte(i8),
    Short(i16),
    Char(u16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(&'a str),
    Type(&'a str),
    Field(&'a dyn FieldReference),
    Method(&'a dyn MethodReference),
    Enum(&'a dyn FieldReference),
    Array(&'a dyn ValueList),
    Annotation {
        annotation_type: &'a str,
        elements: &'a dyn ElementList,
    },
    Null,
    Boolean(bool),
}

impl EncodedValueRef<'_> {
    pub fn value_type(&self) -> ValueType {
        match self {
            EncodedValueRef::Byte(_) => ValueType::Byte,
            EncodedValueRef::Short(_) => ValueType::Short,
            EncodedValueRef::Char(_) => ValueType::Char,
            EncodedValueRef::Int(_) => ValueType::Int,
            EncodedValueRef::Long(_) => ValueType::Long,
            EncodedValueRef::Float(_) => ValueType::Float,
            EncodedValueRef::Double(_) => ValueType::Double,
            EncodedValueRef::String(_) => ValueType::String,
            EncodedValueRef::Type(_) => ValueType::Type,
            EncodedValueRef::Field(_) => ValueType::Field,
            EncodedValueRef::Method(_) => ValueType::Method,
            EncodedValueRef::Enum(_) => ValueType::Enum,
            EncodedValueRef::Array(_) => ValueType::Array,
            EncodedValueRef::Annotation { .. } => ValueType::Annotation,
            EncodedValueRef::Null => ValueType::Null,
            EncodedValueRef::Boolean(_) => ValueType::Boolean,
        }
    }
}

/// Borrowed, indexable run of encoded values.
pub trait ValueList {
    fn len(&self) -> usize;

    /// Value `index`; panics when out of range.
    fn value_at(&self, index: usize) -> &dyn EncodedValue;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl dyn ValueList + '_ {
    pub fn iter(&self) -> Values<'_> {
        Values {
            list: self,
            index: 0,
        }
    }
}

/// Iterator over a [`ValueList`].
pub struct Values<'a> {
    list: &'a dyn ValueList,
    index: usize,
}

impl<'a> Iterator for Values<'a> {
    type Item = &'a dyn EncodedValue;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index == self.list.len() {
            return None;
        }
        let value = self.list.value_at(self.index);
        self.index += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.list.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Values<'_> {}

impl<V: EncodedValue> ValueList for Vec<V> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn value_at(&self, index: usize) -> &dyn EncodedValue {
        &self[index]
    }
}

impl<V: EncodedValue> ValueList for Arc<[V]> {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn value_at(&self, index: usize) -> &dyn EncodedValue {
        &(**self)[index]
    }
}

/// Capability of anything that holds an encoded value.
pub trait EncodedValue {
    fn value(&self) -> EncodedValueRef<'_>;

    fn value_type(&self) -> ValueType {
        self.value().value_type()
    }

    fn form(&self) -> Form<'_, ImmutableEncodedValue> {
        Form::Foreign
    }
}

impl<T: EncodedValue + ?Sized> Canonicalize<ImmutableEncodedValue> for T {
    fn canonical_form(&self) -> Form<'_, ImmutableEncodedValue> {
        EncodedValue::form(self)
    }

    fn copy_canonical(&self, sink: &mut dyn DiagnosticSink) -> ImmutableEncodedValue {
        use ImmutableEncodedValue as V;

        match self.value() {
            EncodedValueRef::Byte(v) => V::Byte(v),
            EncodedValueRef::Short(v) => V::Short(v),
            EncodedValueRef::Char(v) => V::Char(v),
            EncodedValueRef::Int(v) => V::Int(v),
            EncodedValueRef::Long(v) => V::Long(v),
            EncodedValueRef::Float(v) => V::Float(v),
            EncodedValueRef::Double(v) => V::Double(v),
            EncodedValueRef::String(s) => V::String(Arc::from(s)),
            EncodedValueRef::Type(t) => V::Type(Arc::from(t)),
            EncodedValueRef::Field(field) => V::Field(canonical::of_with(field, sink)),
            EncodedValueRef::Method(method) => V::Method(canonical::of_with(method, sink)),
            EncodedValueRef::Enum(field) => V::Enum(canonical::of_with(field, sink)),
            EncodedValueRef::Array(values) => V::Array(
                values
                    .iter()
                    .map(|value| ImmutableEncodedValue::of_with(value, &mut *sink))
                    .collect(),
            ),
            EncodedValueRef::Annotation {
                annotation_type,
                elements,
            } => V::Annotation(ImmutableAnnotation::new_with(
                annotation_type,
                Some(elements.iter()),
                sink,
            )),
            EncodedValueRef::Null => V::Null,
            EncodedValueRef::Boolean(v) => V::Boolean(v),
        }
    }
}

/// The canonical, immutable encoded value.
///
/// Scalars are stored inline; strings, references, arrays and annotations are
/// shared handles, so cloning never deep-copies.
///
/// Equality and hashing treat floats by bit pattern; ordering is by
/// [`ValueType`] code first, then payload, with floats in IEEE total order.
#[derive(Clone, Debug)]
pub enum ImmutableEncodedValue {
    Byte(i8),
    Short(i16),
    Char(u16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(Arc<str>),
    Type(Arc<str>),
    Field(ImmutableFieldReference),
    Method(ImmutableMethodReference),
    Enum(ImmutableFieldReference),
    Array(Arc<[ImmutableEncodedValue]>),
    Annotation(ImmutableAnnotation),
    Null,
    Boolean(bool),
}

impl ImmutableEncodedValue {
    /// Canonicalize any encoded value, reporting nested duplicates to stderr.
    pub fn of<E: EncodedValue + ?Sized>(value: &E) -> Self {
        Self::of_with(value, &mut TerminalEmitter::default())
    }

    /// Canonicalize any encoded value, reporting nested duplicates to `sink`.
    pub fn of_with<E: EncodedValue + ?Sized>(value: &E, sink: &mut dyn DiagnosticSink) -> Self {
        canonical::of_with(value, sink)
    }

    pub fn value_type(&self) -> ValueType {
        use ImmutableEncodedValue as V;

        match self {
            V::Byte(_) => ValueType::Byte,
            V::Short(_) => ValueType::Short,
            V::Char(_) => ValueType::Char,
            V::Int(_) => ValueType::Int,
            V::Long(_) => ValueType::Long,
            V::Float(_) => ValueType::Float,
            V::Double(_) => ValueType::Double,
            V::String(_) => ValueType::String,
            V::Type(_) => ValueType::Type,
            V::Field(_) => ValueType::Field,
            V::Method(_) => ValueType::Method,
            V::Enum(_) => ValueType::Enum,
            V::Array(_) => ValueType::Array,
            V::Annotation(_) => ValueType::Annotation,
            V::Null => ValueType::Null,
            V::Boolean(_) => ValueType::Boolean,
        }
    }
}

impl EncodedValue for ImmutableEncodedValue {
    fn value(&self) -> EncodedValueRef<'_> {
        use ImmutableEncodedValue as V;

        match self {
            V::Byte(v) => EncodedValueRef::Byte(*v),
            V::Short(v) => EncodedValueRef::Short(*v),
            V::Char(v) => EncodedValueRef::Char(*v),
            V::Int(v) => EncodedValueRef::Int(*v),
            V::Long(v) => EncodedValueRef::Long(*v),
            V::Float(v) => EncodedValueRef::Float(*v),
            V::Double(v) => EncodedValueRef::Double(*v),
            V::String(s) => EncodedValueRef::String(s),
            V::Type(t) => EncodedValueRef::Type(t),
            V::Field(field) => EncodedValueRef::Field(field),
            V::Method(method) => EncodedValueRef::Method(method),
            V::Enum(field) => EncodedValueRef::Enum(field),
            V::Array(values) => EncodedValueRef::Array(values),
            V::Annotation(annotation) => EncodedValueRef::Annotation {
                annotation_type: annotation.annotation_type(),
                elements: annotation.elements(),
            },
            V::Null => EncodedValueRef::Null,
            V::Boolean(v) => EncodedValueRef::Boolean(*v),
        }
    }

    fn value_type(&self) -> ValueType {
        ImmutableEncodedValue::value_type(self)
    }

    fn form(&self) -> Form<'_, ImmutableEncodedValue> {
        Form::Canonical(self)
    }
}

impl Ord for ImmutableEncodedValue {
    fn cmp(&self, other: &Self) -> Ordering {
        use ImmutableEncodedValue as V;

        match (self, other) {
            (V::Byte(a), V::Byte(b)) => a.cmp(b),
            (V::Short(a), V::Short(b)) => a.cmp(b),
            (V::Char(a), V::Char(b)) => a.cmp(b),
            (V::Int(a), V::Int(b)) => a.cmp(b),
            (V::Long(a), V::Long(b)) => a.cmp(b),
            (V::Float(a), V::Float(b)) => a.total_cmp(b),
            (V::Double(a), V::Double(b)) => a.total_cmp(b),
            (V::String(a), V::String(b)) | (V::Type(a), V::Type(b)) => compare_utf16(a, b),
            (V::Field(a), V::Field(b)) | (V::Enum(a), V::Enum(b)) => a.cmp(b),
            (V::Method(a), V::Method(b)) => a.cmp(b),
            (V::Array(a), V::Array(b)) => a.cmp(b),
            (V::Annotation(a), V::Annotation(b)) => a.cmp(b),
            (V::Boolean(a), V::Boolean(b)) => a.cmp(b),
            _ => self.value_type().cmp(&other.value_type()),
        }
    }
}

impl PartialOrd for ImmutableEncodedValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ImmutableEncodedValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ImmutableEncodedValue {}

impl Hash for ImmutableEncodedValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        use ImmutableEncodedValue as V;

        self.value_type().hash(state);
        match self {
            V::Byte(v) => v.hash(state),
            V::Short(v) => v.hash(state),
            V::Char(v) => v.hash(state),
            V::Int(v) => v.hash(state),
            V::Long(v) => v.hash(state),
            V::Float(v) => v.to_bits().hash(state),
            V::Double(v) => v.to_bits().hash(state),
            V::String(s) | V::Type(s) => s.hash(state),
            V::Field(f) | V::Enum(f) => f.hash(state),
            V::Method(m) => m.hash(state),
            V::Array(values) => values.hash(state),
            V::Annotation(annotation) => annotation.hash(state),
            V::Null => {}
            V::Boolean(v) => v.hash(state),
        }
    }
}
