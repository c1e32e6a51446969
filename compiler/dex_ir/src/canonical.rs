//! Canonicalization: any implementation of a capability in, the canonical
//! immutable implementation out.
//!
//! Every capability trait in this crate ([`MethodReference`], [`FieldReference`],
//! [`EncodedValue`], [`AnnotationElement`]) exposes a `form()` tag. Only the
//! canonical type overrides it to return [`Form::Canonical`]; everything else
//! reports [`Form::Foreign`] and is copied accessor by accessor.
//!
//! ```text
//! foreign entity ──form()=Foreign──→ copy_canonical ──→ new handle
//! canonical handle ──form()=Canonical──→ clone (same allocation)
//! ```
//!
//! Canonical types are handles over `Arc` storage, so the short circuit never
//! allocates and the result is pointer-identical to the input.
//!
//! [`MethodReference`]: crate::MethodReference
//! [`FieldReference`]: crate::FieldReference
//! [`EncodedValue`]: crate::EncodedValue
//! [`AnnotationElement`]: crate::AnnotationElement

pub mod set;

use dex_diagnostic::{DiagnosticSink, TerminalEmitter};

/// Whether an entity already is the canonical implementation `C`.
#[derive(Debug)]
pub enum Form<'a, C> {
    /// The entity is a canonical handle.
    Canonical(&'a C),
    /// Any other implementation of the capability.
    Foreign,
}

impl<C> Form<'_, C> {
    pub fn is_canonical(&self) -> bool {
        matches!(self, Form::Canonical(_))
    }
}

/// Conversion of a capability implementation into its canonical type `C`.
///
/// Implemented once per capability by a blanket impl over the capability
/// trait, so implementors of the capability never implement it by hand.
pub trait Canonicalize<C: Clone> {
    /// Tag used for the identity short circuit.
    fn canonical_form(&self) -> Form<'_, C>;

    /// Build a fresh canonical instance from the accessors.
    ///
    /// Nested collections that are themselves canonical sets report dropped
    /// duplicates to `sink`.
    fn copy_canonical(&self, sink: &mut dyn DiagnosticSink) -> C;

    /// The canonical instance for `self`, sharing storage when possible.
    fn to_canonical(&self, sink: &mut dyn DiagnosticSink) -> C {
        match self.canonical_form() {
            Form::Canonical(canonical) => canonical.clone(),
            Form::Foreign => self.copy_canonical(sink),
        }
    }
}

/// Canonicalize `entity`, reporting nested duplicates to standard error.
pub fn of<C, E>(entity: &E) -> C
where
    C: Clone,
    E: Canonicalize<C> + ?Sized,
{
    of_with(entity, &mut TerminalEmitter::default())
}

/// Canonicalize `entity`, reporting nested duplicates to `sink`.
pub fn of_with<C, E>(entity: &E, sink: &mut dyn DiagnosticSink) -> C
where
    C: Clone,
    E: Canonicalize<C> + ?Sized,
{
    entity.to_canonical(sink)
}

#[cfg(test)]
mod tests;
