//! Geometric primitives shared by elements and collections.
//!
//! Provides:
//! - `Rectangle`, an axis-aligned box with an explicit empty value
//! - `HasRectangle`, implemented by everything that occupies space on a page
//! - `SetRectangle`, implemented by everything whose box may be reassigned

use std::hash::{Hash, Hasher};

use crate::error::Result;

/// Axis-aligned rectangle where (min_x, min_y) is bottom-left and
/// (max_x, max_y) is top-right.
///
/// The empty rectangle has `min = +inf` and `max = -inf` so it is the neutral
/// element for `union`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Rectangle {
    pub const EMPTY: Self = Self {
        min_x: f64::INFINITY,
        min_y: f64::INFINITY,
        max_x: f64::NEG_INFINITY,
        max_y: f64::NEG_INFINITY,
    };

    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Returns true for the neutral rectangle (or any inverted one).
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Smallest rectangle containing both.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Grows this rectangle in place to contain `other`.
    pub fn expand(&mut self, other: &Self) {
        *self = self.union(other);
    }

    /// Feeds the bit patterns of the four coordinates into a hasher.
    pub fn hash_bits<H: Hasher>(&self, state: &mut H) {
        self.min_x.to_bits().hash(state);
        self.min_y.to_bits().hash(state);
        self.max_x.to_bits().hash(state);
        self.max_y.to_bits().hash(state);
    }

    /// Bitwise equality, consistent with `hash_bits`.
    pub fn bits_eq(&self, other: &Self) -> bool {
        self.min_x.to_bits() == other.min_x.to_bits()
            && self.min_y.to_bits() == other.min_y.to_bits()
            && self.max_x.to_bits() == other.max_x.to_bits()
            && self.max_y.to_bits() == other.max_y.to_bits()
    }
}

impl Default for Rectangle {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl FromIterator<Rectangle> for Rectangle {
    fn from_iter<I: IntoIterator<Item = Rectangle>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::EMPTY, |acc, rect| acc.union(&rect))
    }
}

/// Trait for objects that occupy a rectangle.
pub trait HasRectangle {
    fn rectangle(&self) -> Rectangle;

    fn min_x(&self) -> f64 {
        self.rectangle().min_x
    }

    fn min_y(&self) -> f64 {
        self.rectangle().min_y
    }

    fn max_x(&self) -> f64 {
        self.rectangle().max_x
    }

    fn max_y(&self) -> f64 {
        self.rectangle().max_y
    }

    fn width(&self) -> f64 {
        self.rectangle().width()
    }

    fn height(&self) -> f64 {
        self.rectangle().height()
    }
}

/// Trait for objects whose rectangle can be reassigned.
///
/// Collections implement this only to refuse: their rectangle is derived from
/// membership and fails with `StatsError::UnsupportedMutation`.
pub trait SetRectangle {
    fn set_rectangle(&mut self, rect: Rectangle) -> Result<()>;
}
