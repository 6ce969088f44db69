#![allow(dead_code)]

use strata_core::Rectangle;
use strata_core::model::{Character, ColorId, FontId, TextLine, Word};
use strata_core::params::StatParams;
use tracing_subscriber::EnvFilter;

#[path = "../../benches/common/rng.rs"]
mod rng;

pub use rng::XorShift64;

/// Installs a test-writer subscriber once. Filter with `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub const SEED: u64 = 0xC0FFEE;

pub fn char_at(rank: u32, x: f64, y: f64, width: f64, height: f64) -> Character {
    Character::builder(
        Rectangle::new(x, y, x + width, y + height),
        "x",
        FontId::new(0),
        ColorId::new(0),
    )
    .rank(rank)
    .build()
}

/// Characters laid out left to right, one per height.
pub fn chars_with_heights(heights: &[f64]) -> Vec<Character> {
    heights
        .iter()
        .enumerate()
        .map(|(i, h)| char_at(i as u32, i as f64 * 6.0, 0.0, 5.0, *h))
        .collect()
}

/// Characters drawn from a small palette so keys collide often.
pub fn random_chars(rng: &mut XorShift64, n: usize) -> Vec<Character> {
    (0..n)
        .map(|i| {
            let height = 8.0 + rng.gen_range(4) as f64 * 2.0;
            let width = 4.0 + rng.gen_range(3) as f64;
            let x = rng.gen_range(50) as f64 * 3.0;
            let y = rng.gen_range(20) as f64 * 12.0;
            let font = rng.gen_range(3);
            Character::builder(
                Rectangle::new(x, y, x + width, y + height),
                "r",
                FontId::new(font),
                ColorId::new(rng.gen_range(2)),
            )
            .font_size(height)
            .rank(i as u32)
            .build()
        })
        .collect()
}

/// Word of `text` set at `x, y` with 5x10 glyphs.
pub fn word(x: f64, y: f64, text: &str, font: usize) -> Word {
    let chars = text
        .chars()
        .enumerate()
        .map(|(i, c)| {
            let x0 = x + i as f64 * 5.0;
            Character::builder(
                Rectangle::new(x0, y, x0 + 5.0, y + 10.0),
                c.encode_utf8(&mut [0; 4]),
                FontId::new(font),
                ColorId::new(0),
            )
            .build()
        })
        .collect();
    Word::new(chars)
}

/// Line of words separated by 4 units, starting at `x = 0`.
pub fn line(y: f64, words: &[&str], font: usize) -> TextLine {
    let mut x = 0.0;
    let mut out = Vec::with_capacity(words.len());
    for text in words {
        let w = word(x, y, text, font);
        x += text.chars().count() as f64 * 5.0 + 4.0;
        out.push(w);
    }
    TextLine::new(out, &StatParams::default())
}
