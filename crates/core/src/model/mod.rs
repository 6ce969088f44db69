//! Document model: characters, the text hierarchy built from them, and the
//! registry of fonts and colors they refer to.
//!
//! Contains:
//! - `Element` / `TextElement`: the traits collections are generic over
//! - `Character`: a positioned, styled character from the content parser
//! - `Word`, `TextLine`, `TextBlock`, `Page`, `Document`: the reading structure,
//!   each carrying statistics rolled up from its children
//! - `ResourceRegistry`: document-scoped font and color ids

use std::fmt::Debug;
use std::hash::Hash;

use crate::geometry::HasRectangle;

mod character;
mod registry;
mod text;

pub use character::{Character, CharacterBuilder};
pub use registry::{ColorId, FontId, ResourceRegistry};
pub use text::{Document, FontFace, Page, TextBlock, TextLine, Word};

/// Anything that can be held by a statistic collection.
///
/// Elements are registered as contributors in counters, so they must be cheap
/// to clone and hashable.
pub trait Element: HasRectangle + Clone + Eq + Hash + Debug {}

impl<T: HasRectangle + Clone + Eq + Hash + Debug> Element for T {}

/// Element carrying text styling attributes.
pub trait TextElement: Element {
    fn font(&self) -> FontId;
    fn color(&self) -> ColorId;
    fn font_size(&self) -> f64;
}
