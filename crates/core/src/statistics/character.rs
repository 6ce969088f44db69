//! Character statistics: height, width and styling distributions of a run of
//! characters.

use rayon::prelude::*;
use tracing::debug;

use crate::geometry::{HasRectangle, Rectangle};
use crate::model::{ColorId, FontId, TextElement};
use crate::params::StatParams;
use crate::stats::{FloatCounter, FrequencyCounter, float_key};

use super::HasCharacterStatistic;

/// Immutable snapshot of the character distributions below some element.
///
/// Built by `CharacterStatistician`, never updated in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CharacterStatistic {
    heights: FloatCounter,
    widths: FloatCounter,
    fonts: FrequencyCounter<FontId>,
    colors: FrequencyCounter<ColorId>,
    font_sizes: FloatCounter,
    bounds: Rectangle,
}

impl CharacterStatistic {
    /// Number of characters counted.
    pub const fn character_count(&self) -> usize {
        self.heights.total()
    }

    pub const fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    pub const fn heights(&self) -> &FloatCounter {
        &self.heights
    }

    pub const fn widths(&self) -> &FloatCounter {
        &self.widths
    }

    pub const fn fonts(&self) -> &FrequencyCounter<FontId> {
        &self.fonts
    }

    pub const fn colors(&self) -> &FrequencyCounter<ColorId> {
        &self.colors
    }

    pub const fn font_sizes(&self) -> &FloatCounter {
        &self.font_sizes
    }

    pub fn most_common_height(&self) -> f64 {
        self.heights.most_common_value()
    }

    pub fn average_height(&self) -> f64 {
        self.heights.average()
    }

    pub fn most_common_width(&self) -> f64 {
        self.widths.most_common_value()
    }

    pub fn average_width(&self) -> f64 {
        self.widths.average()
    }

    pub fn most_common_font(&self) -> Option<FontId> {
        self.fonts.most_common()
    }

    pub fn most_common_color(&self) -> Option<ColorId> {
        self.colors.most_common()
    }

    pub fn most_common_font_size(&self) -> f64 {
        self.font_sizes.most_common_value()
    }

    pub fn average_font_size(&self) -> f64 {
        self.font_sizes.average()
    }

    /// Smallest min x of any counted character, NaN when empty.
    pub fn smallest_min_x(&self) -> f64 {
        self.extreme(self.bounds.min_x)
    }

    pub fn smallest_min_y(&self) -> f64 {
        self.extreme(self.bounds.min_y)
    }

    pub fn largest_max_x(&self) -> f64 {
        self.extreme(self.bounds.max_x)
    }

    pub fn largest_max_y(&self) -> f64 {
        self.extreme(self.bounds.max_y)
    }

    fn extreme(&self, value: f64) -> f64 {
        if self.is_empty() { f64::NAN } else { value }
    }
}

impl HasRectangle for CharacterStatistic {
    fn rectangle(&self) -> Rectangle {
        self.bounds
    }
}

/// Computes `CharacterStatistic`s from characters, or rolls them up from the
/// statistics of child elements.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharacterStatistician {
    params: StatParams,
}

impl CharacterStatistician {
    pub const fn new(params: StatParams) -> Self {
        Self { params }
    }

    pub const fn params(&self) -> &StatParams {
        &self.params
    }

    /// Counts every character in one pass.
    ///
    /// Always starts from fresh counters, even when the characters come from
    /// a collection that already maintains stats.
    pub fn compute<'a, E, I>(&self, characters: I) -> CharacterStatistic
    where
        E: TextElement + 'a,
        I: IntoIterator<Item = &'a E>,
    {
        let q = |v: f64| float_key(self.params.quantize(v));
        let mut stat = CharacterStatistic::default();
        for character in characters {
            let rect = character.rectangle();
            stat.heights.add(q(rect.height()));
            stat.widths.add(q(rect.width()));
            stat.fonts.add(character.font());
            stat.colors.add(character.color());
            stat.font_sizes.add(q(character.font_size()));
            stat.bounds.expand(&rect);
        }
        debug!(characters = stat.character_count(), "computed character statistic");
        stat
    }

    /// Merges the statistics of `children` without touching their characters.
    pub fn combine<'a, C, I>(&self, children: I) -> CharacterStatistic
    where
        C: HasCharacterStatistic + 'a,
        I: IntoIterator<Item = &'a C>,
    {
        let mut stat = CharacterStatistic::default();
        let mut merged = 0usize;
        for child in children {
            let child = child.character_statistic();
            stat.heights.combine(&child.heights);
            stat.widths.combine(&child.widths);
            stat.fonts.combine(&child.fonts);
            stat.colors.combine(&child.colors);
            stat.font_sizes.combine(&child.font_sizes);
            stat.bounds.expand(&child.bounds);
            merged += 1;
        }
        debug!(
            children = merged,
            characters = stat.character_count(),
            "combined character statistics"
        );
        stat
    }

    /// Computes one statistic per collection, in parallel.
    pub fn compute_all<E, C>(&self, collections: &[C]) -> Vec<CharacterStatistic>
    where
        E: TextElement + Sync,
        C: AsRef<[E]> + Sync,
    {
        collections
            .par_iter()
            .map(|collection| self.compute(collection.as_ref()))
            .collect()
    }
}
