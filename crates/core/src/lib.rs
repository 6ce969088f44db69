//! strata - incremental statistical element collections for reading-structure
//! reconstruction.
//!
//! Characters from a page description parser are held in collections that keep
//! height, width, font, color and position distributions current on every
//! insertion and removal, and split into views whose distributions are updated
//! by moving only the elements that changed sides.

pub mod collections;
pub mod error;
pub mod geometry;
pub mod model;
pub mod params;
pub mod statistics;
pub mod stats;

pub use collections::{
    CharacterList, CharacterSet, ElementSequence, StatCollection, StatList, StatSet, StatView,
    TextStatCollection,
};
pub use error::{Result, StatsError};
pub use geometry::{HasRectangle, Rectangle, SetRectangle};
pub use model::{Character, Element, TextElement};
pub use params::StatParams;
pub use statistics::{CharacterStatistic, CharacterStatistician, TextLineStatistic, TextLineStatistician};
pub use stats::{BoundingStats, ElementStats, FrequencyCounter, TextStats};
