//! Text hierarchy types: Word, TextLine, TextBlock, Page, Document.
//!
//! Each level owns its children and the statistics rolled up from them.
//! Character statistics are computed from raw characters once, at the line
//! level; every level above combines the statistics of its children.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use smol_str::SmolStr;
use tracing::debug;

use crate::collections::StatView;
use crate::geometry::{HasRectangle, Rectangle};
use crate::params::StatParams;
use crate::statistics::{
    CharacterStatistic, CharacterStatistician, HasCharacterStatistic, HasTextLineStatistic,
    TextLineStatistic, TextLineStatistician,
};
use crate::stats::{ElementStats, FloatCounter, FloatKey, float_key};

use super::character::Character;
use super::registry::{FontId, ResourceRegistry};

/// Font together with a font size.
///
/// Line pitches are only comparable between lines set in the same face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FontFace {
    pub font: FontId,
    pub size: FloatKey,
}

impl FontFace {
    pub const fn new(font: FontId, size: f64) -> Self {
        Self {
            font,
            size: float_key(size),
        }
    }
}

fn collect_text<'a>(parts: impl Iterator<Item = &'a str>, separator: &str) -> String {
    let mut out = String::new();
    for (i, part) in parts.enumerate() {
        if i > 0 {
            out.push_str(separator);
        }
        out.push_str(part);
    }
    out
}

/// Run of characters read as one word.
#[derive(Debug, Clone)]
pub struct Word {
    rect: Rectangle,
    text: SmolStr,
    characters: Arc<[Character]>,
}

impl Word {
    pub fn new(characters: Vec<Character>) -> Self {
        let rect = characters.iter().map(HasRectangle::rectangle).collect();
        let text = collect_text(characters.iter().map(Character::text), "");
        Self {
            rect,
            text: SmolStr::new(text),
            characters: characters.into(),
        }
    }

    /// Builds a word from the characters of a split view.
    pub fn from_view<S: ElementStats<Character>>(view: &StatView<'_, Character, S>) -> Self {
        Self::new(view.as_slice().to_vec())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}

impl HasRectangle for Word {
    fn rectangle(&self) -> Rectangle {
        self.rect
    }
}

impl PartialEq for Word {
    fn eq(&self, other: &Self) -> bool {
        self.rect.bits_eq(&other.rect)
            && self.text == other.text
            && self.characters == other.characters
    }
}

impl Eq for Word {}

impl Hash for Word {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rect.hash_bits(state);
        self.text.hash(state);
    }
}

/// Horizontal line of words.
#[derive(Debug, Clone)]
pub struct TextLine {
    rect: Rectangle,
    words: Arc<[Word]>,
    /// Most common character min y
    baseline: f64,
    character_statistic: Arc<CharacterStatistic>,
}

impl TextLine {
    pub fn new(words: Vec<Word>, params: &StatParams) -> Self {
        let characters = || words.iter().flat_map(Word::characters);
        let character_statistic = CharacterStatistician::new(*params).compute(characters());
        let baselines: FloatCounter = characters()
            .map(|c| float_key(params.quantize(c.min_y())))
            .collect();
        let rect = words.iter().map(HasRectangle::rectangle).collect();
        Self {
            rect,
            baseline: baselines.most_common_value(),
            words: words.into(),
            character_statistic: Arc::new(character_statistic),
        }
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn characters(&self) -> impl Iterator<Item = &Character> + '_ {
        self.words.iter().flat_map(Word::characters)
    }

    /// Most common bottom edge of the line's characters, NaN for an empty
    /// line.
    pub const fn baseline(&self) -> f64 {
        self.baseline
    }

    /// Most common font at the most common font size, None for an empty line.
    pub fn font_face(&self) -> Option<FontFace> {
        let stat = &self.character_statistic;
        stat.most_common_font()
            .map(|font| FontFace::new(font, stat.most_common_font_size()))
    }

    /// Words joined by single spaces.
    pub fn text(&self) -> String {
        collect_text(self.words.iter().map(Word::text), " ")
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl HasRectangle for TextLine {
    fn rectangle(&self) -> Rectangle {
        self.rect
    }
}

impl HasCharacterStatistic for TextLine {
    fn character_statistic(&self) -> &CharacterStatistic {
        &self.character_statistic
    }
}

impl PartialEq for TextLine {
    fn eq(&self, other: &Self) -> bool {
        self.rect.bits_eq(&other.rect)
            && self.baseline.to_bits() == other.baseline.to_bits()
            && self.words == other.words
    }
}

impl Eq for TextLine {}

impl Hash for TextLine {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rect.hash_bits(state);
        self.baseline.to_bits().hash(state);
        self.words.len().hash(state);
    }
}

/// Block of consecutive lines, such as a paragraph or a column fragment.
#[derive(Debug, Clone)]
pub struct TextBlock {
    rect: Rectangle,
    lines: Arc<[TextLine]>,
    character_statistic: Arc<CharacterStatistic>,
    text_line_statistic: Arc<TextLineStatistic>,
}

impl TextBlock {
    pub fn new(lines: Vec<TextLine>, params: &StatParams) -> Self {
        let character_statistic = CharacterStatistician::new(*params).combine(&lines);
        let text_line_statistic = TextLineStatistician::new(*params).compute(&lines);
        let rect = lines.iter().map(HasRectangle::rectangle).collect();
        Self {
            rect,
            lines: lines.into(),
            character_statistic: Arc::new(character_statistic),
            text_line_statistic: Arc::new(text_line_statistic),
        }
    }

    pub fn lines(&self) -> &[TextLine] {
        &self.lines
    }

    /// Lines joined by newlines.
    pub fn text(&self) -> String {
        let lines: Vec<String> = self.lines.iter().map(TextLine::text).collect();
        collect_text(lines.iter().map(String::as_str), "\n")
    }
}

impl HasRectangle for TextBlock {
    fn rectangle(&self) -> Rectangle {
        self.rect
    }
}

impl HasCharacterStatistic for TextBlock {
    fn character_statistic(&self) -> &CharacterStatistic {
        &self.character_statistic
    }
}

impl HasTextLineStatistic for TextBlock {
    fn text_line_statistic(&self) -> &TextLineStatistic {
        &self.text_line_statistic
    }
}

/// One page of blocks.
#[derive(Debug, Clone)]
pub struct Page {
    number: u32,
    rect: Rectangle,
    blocks: Vec<TextBlock>,
    character_statistic: CharacterStatistic,
    text_line_statistic: TextLineStatistic,
}

impl Page {
    pub fn new(number: u32, blocks: Vec<TextBlock>, params: &StatParams) -> Self {
        let character_statistic = CharacterStatistician::new(*params).combine(&blocks);
        let text_line_statistic = TextLineStatistician::new(*params).combine(&blocks);
        debug!(
            page = number,
            blocks = blocks.len(),
            characters = character_statistic.character_count(),
            "page statistics rolled up"
        );
        Self {
            number,
            rect: blocks.iter().map(HasRectangle::rectangle).collect(),
            blocks,
            character_statistic,
            text_line_statistic,
        }
    }

    pub const fn number(&self) -> u32 {
        self.number
    }

    pub fn blocks(&self) -> &[TextBlock] {
        &self.blocks
    }
}

impl HasRectangle for Page {
    fn rectangle(&self) -> Rectangle {
        self.rect
    }
}

impl HasCharacterStatistic for Page {
    fn character_statistic(&self) -> &CharacterStatistic {
        &self.character_statistic
    }
}

impl HasTextLineStatistic for Page {
    fn text_line_statistic(&self) -> &TextLineStatistic {
        &self.text_line_statistic
    }
}

/// Pages of one document together with the registry their ids refer to.
#[derive(Debug)]
pub struct Document {
    pages: Vec<Page>,
    registry: ResourceRegistry,
    character_statistic: CharacterStatistic,
    text_line_statistic: TextLineStatistic,
}

impl Document {
    pub fn new(pages: Vec<Page>, registry: ResourceRegistry, params: &StatParams) -> Self {
        let character_statistic = CharacterStatistician::new(*params).combine(&pages);
        let text_line_statistic = TextLineStatistician::new(*params).combine(&pages);
        debug!(
            pages = pages.len(),
            characters = character_statistic.character_count(),
            lines = text_line_statistic.line_count(),
            "document statistics rolled up"
        );
        Self {
            pages,
            registry,
            character_statistic,
            text_line_statistic,
        }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub const fn registry(&self) -> &ResourceRegistry {
        &self.registry
    }

    /// Name of the font used by most characters of the document.
    pub fn dominant_font_name(&self) -> Option<&str> {
        self.character_statistic
            .most_common_font()
            .and_then(|font| self.registry.font_name(font))
    }
}

impl HasRectangle for Document {
    fn rectangle(&self) -> Rectangle {
        self.pages.iter().map(HasRectangle::rectangle).collect()
    }
}

impl HasCharacterStatistic for Document {
    fn character_statistic(&self) -> &CharacterStatistic {
        &self.character_statistic
    }
}

impl HasTextLineStatistic for Document {
    fn text_line_statistic(&self) -> &TextLineStatistic {
        &self.text_line_statistic
    }
}
