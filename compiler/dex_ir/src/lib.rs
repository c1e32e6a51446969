//! Dex IR - Canonical Immutable Entities
//!
//! This crate turns already-parsed IR entities into the form the serializer
//! consumes:
//! - Capability traits for references, encoded values and annotation elements
//! - One canonical immutable implementation per capability
//! - Canonical sorted sets with duplicate reporting
//!
//! # Design Philosophy
//!
//! - **Canonicalize once**: `of()` on a canonical handle returns the same
//!   allocation; anything else is copied accessor by accessor.
//! - **Deterministic order**: sets are sorted by a caller-supplied total order
//!   and never hold two equivalent members, so the same logical input always
//!   serializes to the same bytes.
//! - **Advisory diagnostics**: a dropped duplicate is reported through a
//!   [`DiagnosticSink`](dex_diagnostic::DiagnosticSink), never returned as an
//!   error.
//!
//! Canonical handles are `Send + Sync` and cheap to clone; building sets on
//! several threads at once needs no coordination beyond the sink.

pub mod annotation;
pub mod canonical;
pub mod reference;
pub mod value;

pub use annotation::{
    immutable_sorted_set_of, immutable_sorted_set_with, AnnotationElement, ByName, ElementList,
    Elements, ImmutableAnnotation, ImmutableAnnotationElement,
};
pub use canonical::set::{
    build_canonical_set, build_canonical_set_with, compare_utf16, CanonicalSet, FnOrder, Natural,
    SetConfig, SetOrder, Survivor,
};
pub use canonical::{Canonicalize, Form};
pub use reference::{
    DescriptorError, FieldReference, ImmutableFieldReference, ImmutableMethodReference,
    MethodReference, ParameterTypes,
};
pub use value::{
    EncodedValue, EncodedValueRef, ImmutableEncodedValue, ValueList, ValueType, Values,
};
