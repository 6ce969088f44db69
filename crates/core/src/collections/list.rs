//! Ordered element list with incrementally maintained statistics.

use std::ops::{Index, Range};

use crate::error::{Result, StatsError};
use crate::geometry::{HasRectangle, Rectangle, SetRectangle};
use crate::model::Element;
use crate::params::StatParams;
use crate::stats::{BoundingStats, ElementStats};

use super::view::{SplitCache, StatView, split_range};
use super::{ElementSequence, StatCollection};

/// Ordered, indexable sequence of elements whose stats always reflect exactly
/// the elements it holds.
///
/// `S` selects the tracked attributes: `BoundingStats` for geometry only,
/// `TextStats` to add font, color and font size counters.
///
/// The list is the only owner of element storage. `split` hands out views that
/// borrow it, so the list cannot change while views are alive. Any mutation
/// drops the cached split.
#[derive(Debug, Clone)]
pub struct StatList<E, S = BoundingStats<E>> {
    elements: Vec<E>,
    stats: S,
    split: Option<Box<SplitCache<S>>>,
}

impl<E: Element, S: ElementStats<E>> Default for StatList<E, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Element, S: ElementStats<E>> StatList<E, S> {
    pub fn new() -> Self {
        Self::with_params(StatParams::default())
    }

    pub fn with_params(params: StatParams) -> Self {
        Self::from_parts(Vec::new(), S::with_params(params))
    }

    /// Assembles a list from elements and stats already registered for
    /// exactly those elements.
    pub(crate) fn from_parts(elements: Vec<E>, stats: S) -> Self {
        Self {
            elements,
            stats,
            split: None,
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&E> {
        self.elements.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.elements.iter()
    }

    pub fn as_slice(&self) -> &[E] {
        &self.elements
    }

    pub fn stats(&self) -> &S {
        &self.stats
    }

    pub fn into_vec(self) -> Vec<E> {
        self.elements
    }

    fn check_index(&self, index: usize, len: usize) -> Result<()> {
        if index < len {
            Ok(())
        } else {
            Err(StatsError::IndexOutOfBounds {
                index,
                len: self.elements.len(),
            })
        }
    }

    pub fn push(&mut self, element: E) {
        self.stats.register(&element);
        self.elements.push(element);
        self.split = None;
    }

    pub fn insert(&mut self, index: usize, element: E) -> Result<()> {
        self.check_index(index, self.elements.len() + 1)?;
        self.stats.register(&element);
        self.elements.insert(index, element);
        self.split = None;
        Ok(())
    }

    /// Replaces the element at `index`, returning the old one.
    pub fn set(&mut self, index: usize, element: E) -> Result<E> {
        self.check_index(index, self.elements.len())?;
        self.stats.register(&element);
        let old = std::mem::replace(&mut self.elements[index], element);
        self.stats.unregister(&old);
        self.split = None;
        Ok(old)
    }

    pub fn remove(&mut self, index: usize) -> Result<E> {
        self.check_index(index, self.elements.len())?;
        let old = self.elements.remove(index);
        self.stats.unregister(&old);
        self.split = None;
        Ok(old)
    }

    /// Removes the first element equal to `element`. Returns false if there
    /// is none.
    pub fn remove_element(&mut self, element: &E) -> bool {
        match self.elements.iter().position(|e| e == element) {
            Some(index) => self.remove(index).is_ok(),
            None => false,
        }
    }

    pub fn remove_range(&mut self, range: Range<usize>) -> Result<Vec<E>> {
        let len = self.elements.len();
        if range.start > range.end || range.end > len {
            return Err(StatsError::RangeOutOfBounds {
                start: range.start,
                end: range.end,
                len,
            });
        }
        let removed: Vec<E> = self.elements.drain(range).collect();
        for element in &removed {
            self.stats.unregister(element);
        }
        self.split = None;
        Ok(removed)
    }

    pub fn clear(&mut self) {
        self.elements.clear();
        self.stats.clear();
        self.split = None;
    }

    /// Splits the list into `[0, index)` and `[index, len)`.
    ///
    /// The first split scans the list once. Later splits move only the
    /// elements between the previous and the new index, and a repeated index
    /// returns the cached halves untouched. Fails with
    /// `StatsError::IndexOutOfBounds` when `index > len`.
    pub fn split(&mut self, index: usize) -> Result<(StatView<'_, E, S>, StatView<'_, E, S>)> {
        let len = self.elements.len();
        split_range(
            &self.elements,
            0,
            len,
            &self.stats,
            &mut self.split,
            index,
        )
    }

    /// Index of the cached split, if any.
    pub fn split_index(&self) -> Option<usize> {
        self.split.as_ref().map(|cache| cache.index())
    }
}

impl<E: Element, S: ElementStats<E>> StatCollection<E> for StatList<E, S> {
    type Stats = S;

    fn stats(&self) -> &S {
        &self.stats
    }
}

impl<E: Element, S: ElementStats<E>> HasRectangle for StatList<E, S> {
    fn rectangle(&self) -> Rectangle {
        self.bounding_box()
    }
}

impl<E, S> SetRectangle for StatList<E, S> {
    fn set_rectangle(&mut self, _rect: Rectangle) -> Result<()> {
        Err(StatsError::UnsupportedMutation(
            "the rectangle of a list is derived from its elements",
        ))
    }
}

impl<E: Element, S: ElementStats<E>> ElementSequence<E> for StatList<E, S> {
    fn len(&self) -> usize {
        self.elements.len()
    }

    fn get(&self, index: usize) -> Option<&E> {
        self.elements.get(index)
    }

    fn push(&mut self, element: E) -> Result<()> {
        StatList::push(self, element);
        Ok(())
    }

    fn insert(&mut self, index: usize, element: E) -> Result<()> {
        StatList::insert(self, index, element)
    }

    fn set(&mut self, index: usize, element: E) -> Result<E> {
        StatList::set(self, index, element)
    }

    fn remove(&mut self, index: usize) -> Result<E> {
        StatList::remove(self, index)
    }

    fn remove_range(&mut self, range: Range<usize>) -> Result<Vec<E>> {
        StatList::remove_range(self, range)
    }

    fn clear(&mut self) -> Result<()> {
        StatList::clear(self);
        Ok(())
    }
}

impl<E: Element, S: ElementStats<E>> Index<usize> for StatList<E, S> {
    type Output = E;

    fn index(&self, index: usize) -> &E {
        &self.elements[index]
    }
}

impl<E, S> AsRef<[E]> for StatList<E, S> {
    fn as_ref(&self) -> &[E] {
        &self.elements
    }
}

impl<E: Element, S: ElementStats<E>> Extend<E> for StatList<E, S> {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.elements.reserve(iter.size_hint().0);
        for element in iter {
            self.stats.register(&element);
            self.elements.push(element);
        }
        self.split = None;
    }
}

impl<E: Element, S: ElementStats<E>> FromIterator<E> for StatList<E, S> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<'a, E: Element, S: ElementStats<E>> IntoIterator for &'a StatList<E, S> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl<E: Element, S: ElementStats<E>> IntoIterator for StatList<E, S> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}
