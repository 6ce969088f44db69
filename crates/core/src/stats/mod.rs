//! Incrementally maintained statistics.
//!
//! - `FrequencyCounter`: key -> count with contributor lookup
//! - `BoundingStats`: geometry counters and the derived bounding box
//! - `TextStats`: bounding stats plus font, color and font size counters
//! - `ElementStats`: the trait collections use to stay generic over both

mod attributes;
mod bounds;
mod counter;

pub use attributes::TextStats;
pub use bounds::{BoundingStats, ElementStats};
pub use counter::{FloatCounter, FloatKey, FrequencyCounter, float_key};
