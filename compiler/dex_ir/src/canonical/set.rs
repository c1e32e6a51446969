//! Canonical sorted sets.
//!
//! [`build_canonical_set`] canonicalizes every candidate, sorts by a caller
//! supplied [`SetOrder`] and keeps one element per comparator-equivalence
//! class. Every element that loses to an equivalent one produces one
//! diagnostic; construction itself never fails.
//!
//! The sort is stable, so "first" and "last" in [`Survivor`] refer to input
//! order.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use dex_diagnostic::{Diagnostic, DiagnosticSink};

use super::Canonicalize;

/// Order of two names as the container format sorts them: by UTF-16 code
/// unit, not by UTF-8 byte.
///
/// The two disagree once a supplementary-plane character meets one in
/// `U+E000..=U+FFFF`:
///
/// ```text
/// "\u{10000}" = D800 DC00  <  "\u{E000}" = E000
/// ```
pub fn compare_utf16(a: &str, b: &str) -> Ordering {
    if a.is_ascii() && b.is_ascii() {
        return a.cmp(b);
    }
    a.encode_utf16().cmp(b.encode_utf16())
}

/// Total order used to sort and deduplicate a [`CanonicalSet`].
///
/// Two elements are the same member when `compare` returns `Equal`, whatever
/// their other attributes are.
pub trait SetOrder<C> {
    fn compare(&self, a: &C, b: &C) -> Ordering;

    /// Identifying key of `element`, as printed in duplicate diagnostics.
    fn key(&self, element: &C) -> String;

    /// What kind of element is being dropped, e.g. `"annotation value"`.
    fn subject(&self) -> &'static str {
        "element"
    }
}

/// The element type's own `Ord`, keyed by its `Display` form.
#[derive(Copy, Clone, Debug, Default)]
pub struct Natural;

impl<C: Ord + fmt::Display> SetOrder<C> for Natural {
    fn compare(&self, a: &C, b: &C) -> Ordering {
        a.cmp(b)
    }

    fn key(&self, element: &C) -> String {
        element.to_string()
    }
}

/// An order assembled from closures.
pub struct FnOrder<F, K> {
    subject: &'static str,
    compare: F,
    key: K,
}

impl<F, K> FnOrder<F, K> {
    pub fn new<C>(subject: &'static str, compare: F, key: K) -> Self
    where
        F: Fn(&C, &C) -> Ordering,
        K: Fn(&C) -> String,
    {
        FnOrder {
            subject,
            compare,
            key,
        }
    }
}

impl<C, F, K> SetOrder<C> for FnOrder<F, K>
where
    F: Fn(&C, &C) -> Ordering,
    K: Fn(&C) -> String,
{
    fn compare(&self, a: &C, b: &C) -> Ordering {
        (self.compare)(a, b)
    }

    fn key(&self, element: &C) -> String {
        (self.key)(element)
    }

    fn subject(&self) -> &'static str {
        self.subject
    }
}

/// Which of several equivalent candidates stays in the set.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Survivor {
    /// The earliest in input order.
    #[default]
    First,
    /// The latest in input order.
    Last,
}

/// Configuration for [`build_canonical_set_with`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SetConfig {
    pub survivor: Survivor,
    /// Emit one diagnostic per dropped element.
    pub report_duplicates: bool,
}

impl Default for SetConfig {
    fn default() -> Self {
        SetConfig {
            survivor: Survivor::First,
            report_duplicates: true,
        }
    }
}

impl SetConfig {
    /// Same config with a different survivor policy.
    #[must_use]
    pub fn with_survivor(mut self, survivor: Survivor) -> Self {
        self.survivor = survivor;
        self
    }

    /// Same config, but duplicates are dropped without diagnostics.
    #[must_use]
    pub fn quiet(mut self) -> Self {
        self.report_duplicates = false;
        self
    }
}

/// Sorted, duplicate-free, immutable collection of canonical elements.
///
/// Cloning shares the backing slice. The order is the one the set was built
/// with; the set does not remember its comparator, so lookups take it again.
#[derive(PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalSet<C>(Arc<[C]>);

impl<C> CanonicalSet<C> {
    pub fn empty() -> Self {
        CanonicalSet(Arc::from(Vec::new()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, C> {
        self.0.iter()
    }

    pub fn get(&self, index: usize) -> Option<&C> {
        self.0.get(index)
    }

    pub fn as_slice(&self) -> &[C] {
        &self.0
    }

    /// Binary search for the member equivalent to `target` under `order`.
    ///
    /// `order` must be the order the set was built with.
    pub fn find<O>(&self, target: &C, order: &O) -> Option<&C>
    where
        O: SetOrder<C> + ?Sized,
    {
        self.search_by(|member| order.compare(member, target))
    }

    /// Binary search with `locate` ordering a member against the target.
    ///
    /// `locate` must be consistent with the order the set was built with.
    pub fn search_by<F>(&self, locate: F) -> Option<&C>
    where
        F: FnMut(&C) -> Ordering,
    {
        self.0
            .binary_search_by(locate)
            .ok()
            .map(|index| &self.0[index])
    }

    /// Whether both sets share the same backing storage.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl<C> Clone for CanonicalSet<C> {
    fn clone(&self) -> Self {
        CanonicalSet(Arc::clone(&self.0))
    }
}

impl<C> Default for CanonicalSet<C> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<C: fmt::Debug> fmt::Debug for CanonicalSet<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.0.iter()).finish()
    }
}

impl<'a, C> IntoIterator for &'a CanonicalSet<C> {
    type Item = &'a C;
    type IntoIter = std::slice::Iter<'a, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Build a canonical set with the default [`SetConfig`] (first survivor wins,
/// duplicates reported).
///
/// `None` stands for an absent collection and yields an empty set.
pub fn build_canonical_set<'a, C, E, I, O>(
    elements: Option<I>,
    order: &O,
    sink: &mut dyn DiagnosticSink,
) -> CanonicalSet<C>
where
    C: Clone,
    E: Canonicalize<C> + ?Sized + 'a,
    I: IntoIterator<Item = &'a E>,
    O: SetOrder<C> + ?Sized,
{
    build_canonical_set_with(elements, order, SetConfig::default(), sink)
}

/// Build a canonical set.
#[tracing::instrument(level = "debug", skip_all, fields(subject = order.subject()))]
pub fn build_canonical_set_with<'a, C, E, I, O>(
    elements: Option<I>,
    order: &O,
    config: SetConfig,
    sink: &mut dyn DiagnosticSink,
) -> CanonicalSet<C>
where
    C: Clone,
    E: Canonicalize<C> + ?Sized + 'a,
    I: IntoIterator<Item = &'a E>,
    O: SetOrder<C> + ?Sized,
{
    let mut candidates: Vec<C> = match elements {
        Some(elements) => elements
            .into_iter()
            .map(|element| <E as Canonicalize<C>>::to_canonical(element, &mut *sink))
            .collect(),
        None => Vec::new(),
    };
    let input_len = candidates.len();

    candidates.sort_by(|a, b| order.compare(a, b));

    let mut kept: Vec<C> = Vec::with_capacity(input_len);
    let mut discarded: Vec<C> = Vec::new();
    for candidate in candidates {
        match kept.last_mut() {
            Some(last) if order.compare(last, &candidate) == Ordering::Equal => {
                match config.survivor {
                    Survivor::First => discarded.push(candidate),
                    Survivor::Last => discarded.push(std::mem::replace(last, candidate)),
                }
            }
            _ => kept.push(candidate),
        }
    }

    tracing::debug!(
        input = input_len,
        kept = kept.len(),
        discarded = discarded.len(),
        "built canonical set"
    );

    if config.report_duplicates {
        for element in &discarded {
            sink.emit(&Diagnostic::duplicate_element(
                order.subject(),
                order.key(element),
            ));
        }
    }

    CanonicalSet(Arc::from(kept))
}
