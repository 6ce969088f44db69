//! Unordered element set with incrementally maintained statistics.

use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;

use crate::error::{Result, StatsError};
use crate::geometry::{HasRectangle, Rectangle, SetRectangle};
use crate::model::Element;
use crate::params::StatParams;
use crate::stats::{BoundingStats, ElementStats};

use super::StatCollection;

/// Unordered collection of distinct elements with the same stats contract as
/// `StatList`, minus `split`.
///
/// Inserting an element that is already present changes nothing.
#[derive(Debug, Clone)]
pub struct StatSet<E, S = BoundingStats<E>> {
    elements: IndexSet<E, FxBuildHasher>,
    stats: S,
}

impl<E: Element, S: ElementStats<E>> Default for StatSet<E, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Element, S: ElementStats<E>> StatSet<E, S> {
    pub fn new() -> Self {
        Self::with_params(StatParams::default())
    }

    pub fn with_params(params: StatParams) -> Self {
        Self {
            elements: IndexSet::with_hasher(FxBuildHasher),
            stats: S::with_params(params),
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn contains(&self, element: &E) -> bool {
        self.elements.contains(element)
    }

    pub fn iter(&self) -> indexmap::set::Iter<'_, E> {
        self.elements.iter()
    }

    pub fn stats(&self) -> &S {
        &self.stats
    }

    /// Adds an element. Returns false if it was already present.
    pub fn insert(&mut self, element: E) -> bool {
        if self.elements.contains(&element) {
            return false;
        }
        self.stats.register(&element);
        self.elements.insert(element)
    }

    /// Removes an element. Returns false if it was not present.
    pub fn remove(&mut self, element: &E) -> bool {
        match self.elements.swap_take(element) {
            Some(old) => {
                self.stats.unregister(&old);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.elements.clear();
        self.stats.clear();
    }

    /// Always fails: build a new set from the kept elements instead.
    pub fn retain_all(&mut self, _keep: impl FnMut(&E) -> bool) -> Result<()> {
        Err(StatsError::UnsupportedOperation(
            "retain_all; build a new collection from the kept elements",
        ))
    }
}

impl<E: Element, S: ElementStats<E>> StatCollection<E> for StatSet<E, S> {
    type Stats = S;

    fn stats(&self) -> &S {
        &self.stats
    }
}

impl<E: Element, S: ElementStats<E>> HasRectangle for StatSet<E, S> {
    fn rectangle(&self) -> Rectangle {
        self.bounding_box()
    }
}

impl<E, S> SetRectangle for StatSet<E, S> {
    fn set_rectangle(&mut self, _rect: Rectangle) -> Result<()> {
        Err(StatsError::UnsupportedMutation(
            "the rectangle of a set is derived from its elements",
        ))
    }
}

impl<E: Element, S: ElementStats<E>> Extend<E> for StatSet<E, S> {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        for element in iter {
            self.insert(element);
        }
    }
}

impl<E: Element, S: ElementStats<E>> FromIterator<E> for StatSet<E, S> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a, E: Element, S: ElementStats<E>> IntoIterator for &'a StatSet<E, S> {
    type Item = &'a E;
    type IntoIter = indexmap::set::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
