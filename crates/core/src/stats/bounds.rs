//! Bounding statistics: six float counters and the rectangle derived from them.

use std::fmt::Debug;

use once_cell::sync::OnceCell;

use crate::geometry::Rectangle;
use crate::model::Element;
use crate::params::StatParams;

use super::counter::{FloatCounter, FloatKey, float_key};

/// Incrementally maintained aggregates over a set of registered elements.
///
/// Collections own one value of this trait and call `register`/`unregister`
/// for every element that enters or leaves them. `BoundingStats` tracks
/// geometry only; `TextStats` adds font, color and font size counters.
pub trait ElementStats<E>: Clone + Debug {
    fn with_params(params: StatParams) -> Self;

    /// Fresh, empty stats configured like `self`.
    fn empty_like(&self) -> Self;

    fn register(&mut self, element: &E);

    fn unregister(&mut self, element: &E);

    fn clear(&mut self);

    fn bounds(&self) -> &BoundingStats<E>;
}

/// Six frequency counters (min x, min y, max x, max y, width, height) over the
/// registered elements.
///
/// Width and height keys go through `StatParams::quantize`; the four extreme
/// counters always hold raw coordinates, so the bounding box is exact under any
/// key resolution. It is derived lazily from the extreme keys and cached until
/// the next registration.
#[derive(Debug, Clone)]
pub struct BoundingStats<E> {
    params: StatParams,
    min_x: FloatCounter<E>,
    min_y: FloatCounter<E>,
    max_x: FloatCounter<E>,
    max_y: FloatCounter<E>,
    width: FloatCounter<E>,
    height: FloatCounter<E>,
    bounding_box: OnceCell<Rectangle>,
}

impl<E> Default for BoundingStats<E> {
    fn default() -> Self {
        Self::new(StatParams::default())
    }
}

impl<E> BoundingStats<E> {
    pub fn new(params: StatParams) -> Self {
        Self {
            params,
            min_x: FloatCounter::default(),
            min_y: FloatCounter::default(),
            max_x: FloatCounter::default(),
            max_y: FloatCounter::default(),
            width: FloatCounter::default(),
            height: FloatCounter::default(),
            bounding_box: OnceCell::new(),
        }
    }

    pub const fn params(&self) -> &StatParams {
        &self.params
    }

    /// Number of registered elements.
    pub const fn len(&self) -> usize {
        self.height.total()
    }

    pub const fn is_empty(&self) -> bool {
        self.height.is_empty()
    }

    /// Union of the registered rectangles, `Rectangle::EMPTY` when nothing is
    /// registered.
    pub fn bounding_box(&self) -> Rectangle {
        *self.bounding_box.get_or_init(|| {
            if self.is_empty() {
                return Rectangle::EMPTY;
            }
            Rectangle::new(
                self.min_x.smallest(),
                self.min_y.smallest(),
                self.max_x.largest(),
                self.max_y.largest(),
            )
        })
    }

    pub const fn min_xs(&self) -> &FloatCounter<E> {
        &self.min_x
    }

    pub const fn min_ys(&self) -> &FloatCounter<E> {
        &self.min_y
    }

    pub const fn max_xs(&self) -> &FloatCounter<E> {
        &self.max_x
    }

    pub const fn max_ys(&self) -> &FloatCounter<E> {
        &self.max_y
    }

    pub const fn widths(&self) -> &FloatCounter<E> {
        &self.width
    }

    pub const fn heights(&self) -> &FloatCounter<E> {
        &self.height
    }

    pub fn clear(&mut self) {
        self.min_x.clear();
        self.min_y.clear();
        self.max_x.clear();
        self.max_y.clear();
        self.width.clear();
        self.height.clear();
        self.bounding_box.take();
    }
}

impl<E: Element> BoundingStats<E> {
    fn keys(&self, element: &E) -> [FloatKey; 6] {
        let rect = element.rectangle();
        let q = |v: f64| float_key(self.params.quantize(v));
        [
            float_key(rect.min_x),
            float_key(rect.min_y),
            float_key(rect.max_x),
            float_key(rect.max_y),
            q(rect.width()),
            q(rect.height()),
        ]
    }

    pub fn register(&mut self, element: &E) {
        let keys = self.keys(element);
        if self.params.track_contributors {
            self.min_x.add_from(keys[0], element);
            self.min_y.add_from(keys[1], element);
            self.max_x.add_from(keys[2], element);
            self.max_y.add_from(keys[3], element);
            self.width.add_from(keys[4], element);
            self.height.add_from(keys[5], element);
        } else {
            self.min_x.add(keys[0]);
            self.min_y.add(keys[1]);
            self.max_x.add(keys[2]);
            self.max_y.add(keys[3]);
            self.width.add(keys[4]);
            self.height.add(keys[5]);
        }
        self.bounding_box.take();
    }

    pub fn unregister(&mut self, element: &E) {
        let keys = self.keys(element);
        if self.params.track_contributors {
            self.min_x.remove(keys[0], element);
            self.min_y.remove(keys[1], element);
            self.max_x.remove(keys[2], element);
            self.max_y.remove(keys[3], element);
            self.width.remove(keys[4], element);
            self.height.remove(keys[5], element);
        } else {
            self.min_x.remove_key(keys[0]);
            self.min_y.remove_key(keys[1]);
            self.max_x.remove_key(keys[2]);
            self.max_y.remove_key(keys[3]);
            self.width.remove_key(keys[4]);
            self.height.remove_key(keys[5]);
        }
        self.bounding_box.take();
    }
}

impl<E: Element> ElementStats<E> for BoundingStats<E> {
    fn with_params(params: StatParams) -> Self {
        Self::new(params)
    }

    fn empty_like(&self) -> Self {
        Self::new(self.params)
    }

    fn register(&mut self, element: &E) {
        BoundingStats::register(self, element);
    }

    fn unregister(&mut self, element: &E) {
        BoundingStats::unregister(self, element);
    }

    fn clear(&mut self) {
        BoundingStats::clear(self);
    }

    fn bounds(&self) -> &BoundingStats<E> {
        self
    }
}

impl<E: Element> PartialEq for BoundingStats<E> {
    fn eq(&self, other: &Self) -> bool {
        self.min_x == other.min_x
            && self.min_y == other.min_y
            && self.max_x == other.max_x
            && self.max_y == other.max_y
            && self.width == other.width
            && self.height == other.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::HasRectangle;
    use crate::model::{Character, ColorId, FontId};

    fn ch(rank: u32, rect: Rectangle) -> Character {
        Character::builder(rect, "x", FontId::new(0), ColorId::new(0))
            .rank(rank)
            .build()
    }

    #[test]
    fn empty_stats_have_empty_box() {
        let stats: BoundingStats<Character> = BoundingStats::default();
        assert!(stats.bounding_box().is_empty());
        assert!(stats.heights().average().is_nan());
    }

    #[test]
    fn bounding_box_tracks_registration() {
        let a = ch(0, Rectangle::new(0.0, 0.0, 5.0, 10.0));
        let b = ch(1, Rectangle::new(8.0, -2.0, 12.0, 7.0));
        let mut stats: BoundingStats<Character> = BoundingStats::default();
        stats.register(&a);
        assert_eq!(stats.bounding_box(), a.rectangle());
        stats.register(&b);
        assert_eq!(stats.bounding_box(), Rectangle::new(0.0, -2.0, 12.0, 10.0));
        stats.unregister(&a);
        assert_eq!(stats.bounding_box(), b.rectangle());
        assert_eq!(stats.len(), 1);
        assert_eq!(stats.min_xs().elements_with_smallest().collect::<Vec<_>>(), vec![&b]);
    }

    #[test]
    fn untracked_stats_skip_contributors() {
        let a = ch(0, Rectangle::new(0.0, 0.0, 5.0, 10.0));
        let mut stats = BoundingStats::new(StatParams::new(None, false));
        stats.register(&a);
        assert_eq!(stats.heights().most_common_value(), 10.0);
        assert_eq!(stats.heights().elements_with_most_common().count(), 0);
        stats.unregister(&a);
        assert!(stats.is_empty());
    }

    #[test]
    fn resolution_merges_nearby_heights() {
        let a = ch(0, Rectangle::new(0.0, 0.0, 5.0, 10.0));
        let b = ch(1, Rectangle::new(0.0, 0.0, 5.0, 10.0001));
        let mut raw: BoundingStats<Character> = BoundingStats::default();
        let mut bucketed = BoundingStats::new(StatParams::new(Some(0.01), true));
        for c in [&a, &b] {
            raw.register(c);
            bucketed.register(c);
        }
        assert_eq!(raw.heights().len(), 2);
        assert_eq!(bucketed.heights().len(), 1);
        assert_eq!(bucketed.heights().most_common_count(), 2);
    }

    #[test]
    fn resolution_keeps_extremes_exact() {
        let a = ch(0, Rectangle::new(0.3, 0.2, 1.2, 10.1));
        let b = ch(1, Rectangle::new(2.0, 0.0, 2.9, 10.0));
        let mut stats = BoundingStats::new(StatParams::new(Some(0.5), true));
        stats.register(&a);
        stats.register(&b);
        assert_eq!(stats.bounding_box(), Rectangle::new(0.3, 0.0, 2.9, 10.1));
        assert_eq!(stats.min_xs().smallest(), 0.3);
        assert_eq!(stats.heights().len(), 1);

        stats.unregister(&a);
        assert_eq!(stats.bounding_box(), b.rectangle());
        assert_eq!(stats.min_xs().len(), 1);
    }
}
