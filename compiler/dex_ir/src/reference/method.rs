//! Method references.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

use dex_diagnostic::DiagnosticSink;

use crate::canonical::set::compare_utf16;
use crate::canonical::{self, Canonicalize, Form};

use super::descriptor::{self, DescriptorError};

/// Parameter type descriptors of a method, in declaration order.
pub type ParameterTypes<'a> = Box<dyn ExactSizeIterator<Item = &'a str> + 'a>;

/// Capability of anything that names a method.
pub trait MethodReference {
    /// Descriptor of the class declaring the method, e.g. `Ljava/lang/Object;`.
    fn containing_class(&self) -> &str;

    fn name(&self) -> &str;

    fn parameter_count(&self) -> usize;

    /// Descriptor of parameter `index`; panics when out of range.
    fn parameter_type(&self, index: usize) -> &str;

    /// Descriptor of the return type, `V` for void.
    fn return_type(&self) -> &str;

    fn parameter_types(&self) -> ParameterTypes<'_> {
        Box::new((0..self.parameter_count()).map(move |index| self.parameter_type(index)))
    }

    fn form(&self) -> Form<'_, ImmutableMethodReference> {
        Form::Foreign
    }
}

impl<T: MethodReference + ?Sized> Canonicalize<ImmutableMethodReference> for T {
    fn canonical_form(&self) -> Form<'_, ImmutableMethodReference> {
        MethodReference::form(self)
    }

    fn copy_canonical(&self, _sink: &mut dyn DiagnosticSink) -> ImmutableMethodReference {
        ImmutableMethodReference::new(
            self.containing_class(),
            self.name(),
            self.parameter_types(),
            self.return_type(),
        )
    }
}

#[derive(PartialEq, Eq, Hash)]
struct MethodData {
    containing_class: Arc<str>,
    name: Arc<str>,
    parameters: Arc<[Arc<str>]>,
    return_type: Arc<str>,
}

/// The canonical, immutable method reference.
///
/// A cheap-clone handle: clones share one allocation, and canonicalizing a
/// handle returns a clone of it.
#[derive(Clone)]
pub struct ImmutableMethodReference(Arc<MethodData>);

impl ImmutableMethodReference {
    /// Build from loosely typed parts. The parameter list is always copied;
    /// `None` (or any empty iterable) is an empty list.
    pub fn new<P>(containing_class: &str, name: &str, parameters: P, return_type: &str) -> Self
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        let parameters: Arc<[Arc<str>]> = parameters
            .into_iter()
            .map(|param| Arc::<str>::from(param.as_ref()))
            .collect();
        Self::from_parts(
            Arc::from(containing_class),
            Arc::from(name),
            parameters,
            Arc::from(return_type),
        )
    }

    /// Build from parts that are already immutable; nothing is copied.
    pub fn from_parts(
        containing_class: Arc<str>,
        name: Arc<str>,
        parameters: Arc<[Arc<str>]>,
        return_type: Arc<str>,
    ) -> Self {
        ImmutableMethodReference(Arc::new(MethodData {
            containing_class,
            name,
            parameters,
            return_type,
        }))
    }

    /// Canonicalize any method reference.
    pub fn of<M: MethodReference + ?Sized>(method: &M) -> Self {
        canonical::of(method)
    }

    pub fn parameters(&self) -> &[Arc<str>] {
        &self.0.parameters
    }

    /// The parameter list, shareable with another reference via `from_parts`.
    pub fn shared_parameters(&self) -> Arc<[Arc<str>]> {
        Arc::clone(&self.0.parameters)
    }

    /// Whether both handles share the same allocation.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl MethodReference for ImmutableMethodReference {
    fn containing_class(&self) -> &str {
        &self.0.containing_class
    }

    fn name(&self) -> &str {
        &self.0.name
    }

    fn parameter_count(&self) -> usize {
        self.0.parameters.len()
    }

    fn parameter_type(&self, index: usize) -> &str {
        &self.0.parameters[index]
    }

    fn return_type(&self) -> &str {
        &self.0.return_type
    }

    fn form(&self) -> Form<'_, ImmutableMethodReference> {
        Form::Canonical(self)
    }
}

impl PartialEq for ImmutableMethodReference {
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other) || self.0 == other.0
    }
}

impl Eq for ImmutableMethodReference {}

impl Hash for ImmutableMethodReference {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl Ord for ImmutableMethodReference {
    /// Class, then name, then return type, then parameters element-wise, all
    /// in UTF-16 order.
    fn cmp(&self, other: &Self) -> Ordering {
        if Self::ptr_eq(self, other) {
            return Ordering::Equal;
        }
        let (a, b) = (&self.0, &other.0);
        compare_utf16(&a.containing_class, &b.containing_class)
            .then_with(|| compare_utf16(&a.name, &b.name))
            .then_with(|| compare_utf16(&a.return_type, &b.return_type))
            .then_with(|| compare_type_lists(&a.parameters, &b.parameters))
    }
}

/// Element-wise, then shorter first.
fn compare_type_lists(a: &[Arc<str>], b: &[Arc<str>]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(x, y)| compare_utf16(x, y))
        .find(|ordering| ordering.is_ne())
        .unwrap_or_else(|| a.len().cmp(&b.len()))
}

impl PartialOrd for ImmutableMethodReference {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ImmutableMethodReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}(", self.0.containing_class, self.0.name)?;
        for param in self.0.parameters.iter() {
            f.write_str(param)?;
        }
        write!(f, "){}", self.0.return_type)
    }
}

impl fmt::Debug for ImmutableMethodReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MethodRef({self})")
    }
}

impl FromStr for ImmutableMethodReference {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (class, member) = descriptor::split_member(s)?;
        let (name, signature) = member
            .split_once('(')
            .ok_or_else(|| DescriptorError::MissingParameters(s.to_owned()))?;
        if name.is_empty() {
            return Err(DescriptorError::EmptyName(s.to_owned()));
        }
        let (params, return_type) = signature
            .split_once(')')
            .ok_or_else(|| DescriptorError::MissingParameters(s.to_owned()))?;
        let params = descriptor::split_types(params)?;
        let return_type = descriptor::single_type(return_type, true)?;
        Ok(Self::new(class, name, params, return_type))
    }
}
