//! Field references.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use dex_diagnostic::DiagnosticSink;

use crate::canonical::set::compare_utf16;
use crate::canonical::{self, Canonicalize, Form};

use super::descriptor::{self, DescriptorError};

/// Capability of anything that names a field.
pub trait FieldReference {
    fn containing_class(&self) -> &str;

    fn name(&self) -> &str;

    /// Descriptor of the field's type.
    fn field_type(&self) -> &str;

    fn form(&self) -> Form<'_, ImmutableFieldReference> {
        Form::Foreign
    }
}

impl<T: FieldReference + ?Sized> Canonicalize<ImmutableFieldReference> for T {
    fn canonical_form(&self) -> Form<'_, ImmutableFieldReference> {
        FieldReference::form(self)
    }

    fn copy_canonical(&self, _sink: &mut dyn DiagnosticSink) -> ImmutableFieldReference {
        ImmutableFieldReference::new(self.containing_class(), self.name(), self.field_type())
    }
}

#[derive(PartialEq, Eq, Hash)]
struct FieldData {
    containing_class: Arc<str>,
    name: Arc<str>,
    field_type: Arc<str>,
}

/// The canonical, immutable field reference.
///
/// Ordered by class, then name, then type, in UTF-16 order.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ImmutableFieldReference(Arc<FieldData>);

impl ImmutableFieldReference {
    pub fn new(containing_class: &str, name: &str, field_type: &str) -> Self {
        ImmutableFieldReference(Arc::new(FieldData {
            containing_class: Arc::from(containing_class),
            name: Arc::from(name),
            field_type: Arc::from(field_type),
        }))
    }

    /// Canonicalize any field reference.
    pub fn of<F: FieldReference + ?Sized>(field: &F) -> Self {
        canonical::of(field)
    }

    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl FieldReference for ImmutableFieldReference {
    fn containing_class(&self) -> &str {
        &self.0.containing_class
    }

    fn name(&self) -> &str {
        &self.0.name
    }

    fn field_type(&self) -> &str {
        &self.0.field_type
    }

    fn form(&self) -> Form<'_, ImmutableFieldReference> {
        Form::Canonical(self)
    }
}

impl Ord for ImmutableFieldReference {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = (&self.0, &other.0);
        compare_utf16(&a.containing_class, &b.containing_class)
            .then_with(|| compare_utf16(&a.name, &b.name))
            .then_with(|| compare_utf16(&a.field_type, &b.field_type))
    }
}

impl PartialOrd for ImmutableFieldReference {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ImmutableFieldReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}->{}:{}",
            self.0.containing_class, self.0.name, self.0.field_type
        )
    }
}

impl fmt::Debug for ImmutableFieldReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldRef({self})")
    }
}

impl FromStr for ImmutableFieldReference {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (class, member) = descriptor::split_member(s)?;
        let (name, field_type) = member
            .split_once(':')
            .ok_or_else(|| DescriptorError::MissingFieldType(s.to_owned()))?;
        if name.is_empty() {
            return Err(DescriptorError::EmptyName(s.to_owned()));
        }
        let field_type = descriptor::single_type(field_type, false)?;
        Ok(Self::new(class, name, field_type))
    }
}
