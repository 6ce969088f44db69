//! Snapshot statistics attached to lines, blocks, pages and documents.
//!
//! A statistician computes a statistic once from raw elements, or combines the
//! statistics of already-computed children, so raw characters are scanned at
//! most once per document no matter how many levels roll them up.

mod character;
mod textline;

pub use character::{CharacterStatistic, CharacterStatistician};
pub use textline::{TextLineStatistic, TextLineStatistician};

/// Element owning a character statistic.
pub trait HasCharacterStatistic {
    fn character_statistic(&self) -> &CharacterStatistic;
}

/// Element owning a text line statistic.
pub trait HasTextLineStatistic {
    fn text_line_statistic(&self) -> &TextLineStatistic;
}

impl HasCharacterStatistic for CharacterStatistic {
    fn character_statistic(&self) -> &CharacterStatistic {
        self
    }
}

impl HasTextLineStatistic for TextLineStatistic {
    fn text_line_statistic(&self) -> &TextLineStatistic {
        self
    }
}
