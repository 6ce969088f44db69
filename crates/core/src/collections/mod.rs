//! Element collections that keep their statistics current.
//!
//! - `StatList`: ordered sequence with the incremental `split`
//! - `StatView`: read-only, non-copying sub-range produced by `split`
//! - `StatSet`: unordered collection, no split
//!
//! The query surface lives in `StatCollection` (geometry) and
//! `TextStatCollection` (font, color, font size) so lists, views and sets share
//! one implementation of it.

use std::ops::Range;

use crate::error::{Result, StatsError};
use crate::geometry::Rectangle;
use crate::model::{ColorId, Element, FontId, TextElement};
use crate::stats::{BoundingStats, ElementStats, TextStats};

mod list;
mod set;
mod view;

pub use list::StatList;
pub use set::StatSet;
pub use view::StatView;

/// List of characters tracking font, color and font size.
pub type CharacterList = StatList<crate::model::Character, TextStats<crate::model::Character>>;

/// Set of characters tracking font, color and font size.
pub type CharacterSet = StatSet<crate::model::Character, TextStats<crate::model::Character>>;

/// Ordered, indexable access shared by lists and views.
///
/// Views implement the mutating methods only to reject them with
/// `StatsError::UnsupportedMutation`.
pub trait ElementSequence<E> {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, index: usize) -> Option<&E>;

    fn try_get(&self, index: usize) -> Result<&E> {
        let len = self.len();
        self.get(index)
            .ok_or(StatsError::IndexOutOfBounds { index, len })
    }

    fn push(&mut self, element: E) -> Result<()>;

    fn insert(&mut self, index: usize, element: E) -> Result<()>;

    fn set(&mut self, index: usize, element: E) -> Result<E>;

    fn remove(&mut self, index: usize) -> Result<E>;

    fn remove_range(&mut self, range: Range<usize>) -> Result<Vec<E>>;

    fn clear(&mut self) -> Result<()>;

    /// Always fails: scattered removal is not supported, rebuild instead.
    fn retain_all(&mut self, _keep: &mut dyn FnMut(&E) -> bool) -> Result<()> {
        Err(StatsError::UnsupportedOperation(
            "retain_all; build a new collection from the kept elements",
        ))
    }
}

/// Geometry queries answered from a collection's counters.
///
/// Numeric queries return NaN and element lookups yield nothing when the
/// collection is empty.
pub trait StatCollection<E: Element> {
    type Stats: ElementStats<E>;

    fn stats(&self) -> &Self::Stats;

    fn bounds(&self) -> &BoundingStats<E> {
        self.stats().bounds()
    }

    fn bounding_box(&self) -> Rectangle {
        self.bounds().bounding_box()
    }

    fn most_common_height(&self) -> f64 {
        self.bounds().heights().most_common_value()
    }

    fn most_common_width(&self) -> f64 {
        self.bounds().widths().most_common_value()
    }

    fn average_height(&self) -> f64 {
        self.bounds().heights().average()
    }

    fn average_width(&self) -> f64 {
        self.bounds().widths().average()
    }

    fn elements_with_most_common_height<'a>(&'a self) -> impl Iterator<Item = &'a E>
    where
        E: 'a,
    {
        self.bounds().heights().elements_with_most_common()
    }

    fn elements_with_most_common_width<'a>(&'a self) -> impl Iterator<Item = &'a E>
    where
        E: 'a,
    {
        self.bounds().widths().elements_with_most_common()
    }

    fn smallest_min_x(&self) -> f64 {
        self.bounds().min_xs().smallest()
    }

    fn smallest_min_y(&self) -> f64 {
        self.bounds().min_ys().smallest()
    }

    fn largest_max_x(&self) -> f64 {
        self.bounds().max_xs().largest()
    }

    fn largest_max_y(&self) -> f64 {
        self.bounds().max_ys().largest()
    }

    fn elements_with_smallest_min_x<'a>(&'a self) -> impl Iterator<Item = &'a E>
    where
        E: 'a,
    {
        self.bounds().min_xs().elements_with_smallest()
    }

    fn elements_with_smallest_min_y<'a>(&'a self) -> impl Iterator<Item = &'a E>
    where
        E: 'a,
    {
        self.bounds().min_ys().elements_with_smallest()
    }

    fn elements_with_largest_max_x<'a>(&'a self) -> impl Iterator<Item = &'a E>
    where
        E: 'a,
    {
        self.bounds().max_xs().elements_with_largest()
    }

    fn elements_with_largest_max_y<'a>(&'a self) -> impl Iterator<Item = &'a E>
    where
        E: 'a,
    {
        self.bounds().max_ys().elements_with_largest()
    }
}

/// Text attribute queries for collections tracking `TextStats`.
pub trait TextStatCollection<E: TextElement>: StatCollection<E, Stats = TextStats<E>> {
    fn most_common_font(&self) -> Option<FontId> {
        self.stats().fonts().most_common()
    }

    fn elements_with_most_common_font<'a>(&'a self) -> impl Iterator<Item = &'a E>
    where
        E: 'a,
    {
        self.stats().fonts().elements_with_most_common()
    }

    fn most_common_color(&self) -> Option<ColorId> {
        self.stats().colors().most_common()
    }

    fn elements_with_most_common_color<'a>(&'a self) -> impl Iterator<Item = &'a E>
    where
        E: 'a,
    {
        self.stats().colors().elements_with_most_common()
    }

    fn most_common_font_size(&self) -> f64 {
        self.stats().font_sizes().most_common_value()
    }

    fn elements_with_most_common_font_size<'a>(&'a self) -> impl Iterator<Item = &'a E>
    where
        E: 'a,
    {
        self.stats().font_sizes().elements_with_most_common()
    }

    fn average_font_size(&self) -> f64 {
        self.stats().font_sizes().average()
    }
}

impl<E: TextElement, C: StatCollection<E, Stats = TextStats<E>>> TextStatCollection<E> for C {}
