//! Text attribute statistics layered on top of bounding statistics.

use crate::model::{ColorId, FontId, TextElement};
use crate::params::StatParams;

use super::bounds::{BoundingStats, ElementStats};
use super::counter::{FloatCounter, FrequencyCounter, float_key};

/// Bounding statistics plus font, color and font size counters.
#[derive(Debug, Clone)]
pub struct TextStats<E> {
    bounds: BoundingStats<E>,
    fonts: FrequencyCounter<FontId, E>,
    colors: FrequencyCounter<ColorId, E>,
    font_sizes: FloatCounter<E>,
}

impl<E> Default for TextStats<E> {
    fn default() -> Self {
        Self::new(StatParams::default())
    }
}

impl<E> TextStats<E> {
    pub fn new(params: StatParams) -> Self {
        Self {
            bounds: BoundingStats::new(params),
            fonts: FrequencyCounter::default(),
            colors: FrequencyCounter::default(),
            font_sizes: FloatCounter::default(),
        }
    }

    pub const fn fonts(&self) -> &FrequencyCounter<FontId, E> {
        &self.fonts
    }

    pub const fn colors(&self) -> &FrequencyCounter<ColorId, E> {
        &self.colors
    }

    pub const fn font_sizes(&self) -> &FloatCounter<E> {
        &self.font_sizes
    }
}

impl<E: TextElement> ElementStats<E> for TextStats<E> {
    fn with_params(params: StatParams) -> Self {
        Self::new(params)
    }

    fn empty_like(&self) -> Self {
        Self::new(*self.bounds.params())
    }

    fn register(&mut self, element: &E) {
        self.bounds.register(element);
        let params = self.bounds.params();
        let size = float_key(params.quantize(element.font_size()));
        if params.track_contributors {
            self.fonts.add_from(element.font(), element);
            self.colors.add_from(element.color(), element);
            self.font_sizes.add_from(size, element);
        } else {
            self.fonts.add(element.font());
            self.colors.add(element.color());
            self.font_sizes.add(size);
        }
    }

    fn unregister(&mut self, element: &E) {
        self.bounds.unregister(element);
        let params = self.bounds.params();
        let size = float_key(params.quantize(element.font_size()));
        if params.track_contributors {
            self.fonts.remove(element.font(), element);
            self.colors.remove(element.color(), element);
            self.font_sizes.remove(size, element);
        } else {
            self.fonts.remove_key(element.font());
            self.colors.remove_key(element.color());
            self.font_sizes.remove_key(size);
        }
    }

    fn clear(&mut self) {
        self.bounds.clear();
        self.fonts.clear();
        self.colors.clear();
        self.font_sizes.clear();
    }

    fn bounds(&self) -> &BoundingStats<E> {
        &self.bounds
    }
}

impl<E: TextElement> PartialEq for TextStats<E> {
    fn eq(&self, other: &Self) -> bool {
        self.bounds == other.bounds
            && self.fonts == other.fonts
            && self.colors == other.colors
            && self.font_sizes == other.font_sizes
    }
}
