//! Character type and its builder.
//!
//! Use `Character::builder()` to construct characters with optional fields.

use std::hash::{Hash, Hasher};

use smol_str::SmolStr;

use crate::error::Result;
use crate::geometry::{HasRectangle, Rectangle, SetRectangle};

use super::TextElement;
use super::registry::{ColorId, FontId};

/// Builder for Character with fluent API for optional fields.
///
/// # Example
/// ```ignore
/// let ch = Character::builder(Rectangle::new(0.0, 0.0, 10.0, 12.0), "A", font, color)
///     .font_size(12.0)
///     .rank(42)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct CharacterBuilder {
    rect: Rectangle,
    text: SmolStr,
    font: FontId,
    color: ColorId,
    font_size: f64,
    rank: u32,
}

impl CharacterBuilder {
    /// Creates a new builder with required fields.
    /// Optional fields default to: font_size = rectangle height, rank = 0.
    pub fn new(rect: Rectangle, text: &str, font: FontId, color: ColorId) -> Self {
        Self {
            rect,
            text: SmolStr::new(text),
            font,
            color,
            font_size: rect.height(),
            rank: 0,
        }
    }

    /// Sets the font size (default: rectangle height).
    pub const fn font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the extraction rank (default: 0).
    pub const fn rank(mut self, rank: u32) -> Self {
        self.rank = rank;
        self
    }

    /// Builds the Character instance.
    pub fn build(self) -> Character {
        Character {
            rect: self.rect,
            text: self.text,
            font: self.font,
            color: self.color,
            font_size: self.font_size,
            rank: self.rank,
        }
    }
}

/// A positioned, styled character as delivered by the content parser.
///
/// Equality and hashing are bitwise on the float fields so characters can
/// serve as counter contributors.
#[derive(Debug, Clone)]
pub struct Character {
    rect: Rectangle,
    text: SmolStr,
    font: FontId,
    color: ColorId,
    font_size: f64,
    /// Position in the extraction order of the page
    rank: u32,
}

impl Character {
    /// Creates a new builder for constructing Character instances.
    pub fn builder(rect: Rectangle, text: &str, font: FontId, color: ColorId) -> CharacterBuilder {
        CharacterBuilder::new(rect, text, font, color)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn font(&self) -> FontId {
        self.font
    }

    pub const fn color(&self) -> ColorId {
        self.color
    }

    pub const fn font_size(&self) -> f64 {
        self.font_size
    }

    pub const fn rank(&self) -> u32 {
        self.rank
    }
}

impl HasRectangle for Character {
    fn rectangle(&self) -> Rectangle {
        self.rect
    }
}

impl SetRectangle for Character {
    fn set_rectangle(&mut self, rect: Rectangle) -> Result<()> {
        self.rect = rect;
        Ok(())
    }
}

impl TextElement for Character {
    fn font(&self) -> FontId {
        self.font
    }

    fn color(&self) -> ColorId {
        self.color
    }

    fn font_size(&self) -> f64 {
        self.font_size
    }
}

impl PartialEq for Character {
    fn eq(&self, other: &Self) -> bool {
        self.rank == other.rank
            && self.text == other.text
            && self.font == other.font
            && self.color == other.color
            && self.font_size.to_bits() == other.font_size.to_bits()
            && self.rect.bits_eq(&other.rect)
    }
}

impl Eq for Character {}

impl Hash for Character {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank.hash(state);
        self.text.hash(state);
        self.font.hash(state);
        self.color.hash(state);
        self.font_size.to_bits().hash(state);
        self.rect.hash_bits(state);
    }
}
