//! Split views and the cached split-delta algorithm shared by lists and views.
//!
//! A split remembers the index it was made at together with the stats of both
//! halves. Splitting again at a nearby index only moves the elements between
//! the old and new index from one side to the other, so a sequence of splits that
//! drifts by small steps costs the total drift instead of N per split.

use std::cmp::Ordering;
use std::ops::Range;

use crate::error::{Result, StatsError};
use crate::geometry::{HasRectangle, Rectangle, SetRectangle};
use crate::model::Element;
use crate::stats::ElementStats;

use super::list::StatList;
use super::{ElementSequence, StatCollection};

/// Cached result of the most recent split of a list or view.
#[derive(Debug, Clone)]
pub(crate) struct SplitCache<S> {
    index: usize,
    left: SplitNode<S>,
    right: SplitNode<S>,
}

/// Range of the root storage covered by one half of a split, with its stats
/// and its own split cache.
#[derive(Debug, Clone)]
pub(crate) struct SplitNode<S> {
    /// Position of the first element in the root storage
    offset: usize,
    len: usize,
    stats: S,
    split: Option<Box<SplitCache<S>>>,
}

impl<S> SplitNode<S> {
    const fn new(offset: usize, len: usize, stats: S) -> Self {
        Self {
            offset,
            len,
            stats,
            split: None,
        }
    }

    /// Moves the node to a new range. Its nested split no longer applies.
    fn reposition(&mut self, offset: usize, len: usize) {
        self.offset = offset;
        self.len = len;
        self.split = None;
    }
}

impl<S> SplitCache<S> {
    pub(crate) const fn index(&self) -> usize {
        self.index
    }

    /// Builds both halves from scratch with one scan of `range`.
    fn scan<E>(range: &[E], offset: usize, template: &S, index: usize) -> Self
    where
        E: Element,
        S: ElementStats<E>,
    {
        let mut left = template.empty_like();
        let mut right = template.empty_like();
        let (head, tail) = range.split_at(index);
        for element in head {
            left.register(element);
        }
        for element in tail {
            right.register(element);
        }
        tracing::trace!(len = range.len(), index, "split cache built");

        Self {
            index,
            left: SplitNode::new(offset, index, left),
            right: SplitNode::new(offset + index, range.len() - index, right),
        }
    }

    /// Moves the elements that changed sides between the cached index and
    /// `index`.
    fn shift<E>(&mut self, range: &[E], index: usize)
    where
        E: Element,
        S: ElementStats<E>,
    {
        match index.cmp(&self.index) {
            Ordering::Equal => {
                tracing::trace!(index, "split cache reused");
                return;
            }
            Ordering::Less => {
                for element in &range[index..self.index] {
                    self.left.stats.unregister(element);
                    self.right.stats.register(element);
                }
            }
            Ordering::Greater => {
                for element in &range[self.index..index] {
                    self.right.stats.unregister(element);
                    self.left.stats.register(element);
                }
            }
        }
        tracing::trace!(
            from = self.index,
            to = index,
            moved = index.abs_diff(self.index),
            "split cache shifted"
        );

        let offset = self.left.offset;
        self.index = index;
        self.left.reposition(offset, index);
        self.right.reposition(offset + index, range.len() - index);
    }
}

/// Splits `root[offset..offset + len]` at `index`, reusing `slot` when it
/// holds a previous split of the same range.
pub(crate) fn split_range<'a, E, S>(
    root: &'a [E],
    offset: usize,
    len: usize,
    template: &S,
    slot: &'a mut Option<Box<SplitCache<S>>>,
    index: usize,
) -> Result<(StatView<'a, E, S>, StatView<'a, E, S>)>
where
    E: Element,
    S: ElementStats<E>,
{
    if index > len {
        return Err(StatsError::IndexOutOfBounds { index, len });
    }
    let range = &root[offset..offset + len];

    let fresh = slot.is_none();
    let cache = slot.get_or_insert_with(|| Box::new(SplitCache::scan(range, offset, template, index)));
    if !fresh {
        cache.shift(range, index);
    }

    let SplitCache { left, right, .. } = &mut **cache;
    Ok((StatView::new(root, left), StatView::new(root, right)))
}

/// Read-only projection of a contiguous range of a `StatList`.
///
/// Views never copy elements: `get(i)` reads `root[offset + i]`. They carry
/// their own stats and can be split again with the same cached algorithm.
/// Structural mutation through `ElementSequence` fails with
/// `StatsError::UnsupportedMutation`.
#[derive(Debug)]
pub struct StatView<'a, E, S> {
    root: &'a [E],
    node: &'a mut SplitNode<S>,
}

impl<'a, E: Element, S: ElementStats<E>> StatView<'a, E, S> {
    pub(crate) fn new(root: &'a [E], node: &'a mut SplitNode<S>) -> Self {
        Self { root, node }
    }

    pub fn len(&self) -> usize {
        self.node.len
    }

    pub fn is_empty(&self) -> bool {
        self.node.len == 0
    }

    /// Position of the first element of this view in the root list.
    pub fn offset(&self) -> usize {
        self.node.offset
    }

    pub fn get(&self, index: usize) -> Option<&'a E> {
        if index < self.node.len {
            self.root.get(self.node.offset + index)
        } else {
            None
        }
    }

    pub fn as_slice(&self) -> &'a [E] {
        &self.root[self.node.offset..self.node.offset + self.node.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'a, E> {
        self.as_slice().iter()
    }

    pub fn stats(&self) -> &S {
        &self.node.stats
    }

    /// Splits this view into `[0, index)` and `[index, len)`.
    ///
    /// Uses this view's own split cache, independent of the parent's.
    pub fn split(&mut self, index: usize) -> Result<(StatView<'_, E, S>, StatView<'_, E, S>)> {
        let node = &mut *self.node;
        split_range(
            self.root,
            node.offset,
            node.len,
            &node.stats,
            &mut node.split,
            index,
        )
    }

    /// Index of the cached split of this view, if any.
    pub fn split_index(&self) -> Option<usize> {
        self.node.split.as_ref().map(|cache| cache.index())
    }

    /// Copies the viewed elements into a new, independent list. The list
    /// starts from this view's stats rather than rescanning.
    pub fn to_list(&self) -> StatList<E, S> {
        StatList::from_parts(self.as_slice().to_vec(), self.node.stats.clone())
    }
}

impl<E: Element, S: ElementStats<E>> StatCollection<E> for StatView<'_, E, S> {
    type Stats = S;

    fn stats(&self) -> &S {
        &self.node.stats
    }
}

impl<E: Element, S: ElementStats<E>> HasRectangle for StatView<'_, E, S> {
    fn rectangle(&self) -> Rectangle {
        self.bounding_box()
    }
}

impl<E, S> SetRectangle for StatView<'_, E, S> {
    fn set_rectangle(&mut self, _rect: Rectangle) -> Result<()> {
        Err(StatsError::UnsupportedMutation(
            "the rectangle of a view is derived from its elements",
        ))
    }
}

const READ_ONLY: &str = "views are read-only projections of their list";

impl<E: Element, S: ElementStats<E>> ElementSequence<E> for StatView<'_, E, S> {
    fn len(&self) -> usize {
        self.node.len
    }

    fn get(&self, index: usize) -> Option<&E> {
        StatView::get(self, index)
    }

    fn push(&mut self, _element: E) -> Result<()> {
        Err(StatsError::UnsupportedMutation(READ_ONLY))
    }

    fn insert(&mut self, _index: usize, _element: E) -> Result<()> {
        Err(StatsError::UnsupportedMutation(READ_ONLY))
    }

    fn set(&mut self, _index: usize, _element: E) -> Result<E> {
        Err(StatsError::UnsupportedMutation(READ_ONLY))
    }

    fn remove(&mut self, _index: usize) -> Result<E> {
        Err(StatsError::UnsupportedMutation(READ_ONLY))
    }

    fn remove_range(&mut self, _range: Range<usize>) -> Result<Vec<E>> {
        Err(StatsError::UnsupportedMutation(READ_ONLY))
    }

    fn clear(&mut self) -> Result<()> {
        Err(StatsError::UnsupportedMutation(READ_ONLY))
    }
}

impl<'a, E: Element, S: ElementStats<E>> IntoIterator for &StatView<'a, E, S> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
