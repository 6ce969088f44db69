//! Document-scoped font and color registry.

use lasso::{Key, Rodeo, Spur};
use rustc_hash::FxHashMap;

/// Identifier of a font registered in a `ResourceRegistry`.
///
/// Ids are sequential in registration order, so ordering by id is ordering by
/// first appearance in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FontId(usize);

impl FontId {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

/// Identifier of a color registered in a `ResourceRegistry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColorId(usize);

impl ColorId {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ColorKey(Box<[u64]>);

impl ColorKey {
    fn from_slice(color: &[f64]) -> Self {
        let bits: Vec<u64> = color.iter().map(|c| c.to_bits()).collect();
        Self(bits.into_boxed_slice())
    }
}

/// Registry of the fonts and colors seen during one document conversion.
///
/// Hands out sequential ids and string labels (`font-0`, `color-2`, ...).
/// Pass one registry through the pipeline for the lifetime of a document and
/// `reset` it before reusing it for the next.
#[derive(Debug)]
pub struct ResourceRegistry {
    fonts: Rodeo,
    colors: Vec<Box<[f64]>>,
    color_index: FxHashMap<ColorKey, ColorId>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self {
            fonts: Rodeo::default(),
            colors: Vec::new(),
            color_index: FxHashMap::default(),
        }
    }

    /// Registers a font name, returning the existing id if already known.
    pub fn intern_font(&mut self, name: &str) -> FontId {
        let known = self.fonts.len();
        let id = FontId::new(self.fonts.get_or_intern(name).into_usize());
        if self.fonts.len() > known {
            tracing::trace!(font = name, id = id.index(), "registered font");
        }
        id
    }

    /// Looks up a font without registering it.
    pub fn font_id(&self, name: &str) -> Option<FontId> {
        self.fonts.get(name).map(|spur| FontId::new(spur.into_usize()))
    }

    pub fn font_name(&self, id: FontId) -> Option<&str> {
        Spur::try_from_usize(id.index()).and_then(|spur| self.fonts.try_resolve(&spur))
    }

    /// Registers a color by its components, deduplicating by bit pattern.
    pub fn intern_color(&mut self, color: &[f64]) -> ColorId {
        let key = ColorKey::from_slice(color);
        if let Some(existing) = self.color_index.get(&key) {
            return *existing;
        }
        let id = ColorId::new(self.colors.len());
        self.colors.push(color.to_vec().into_boxed_slice());
        self.color_index.insert(key, id);
        tracing::trace!(?color, id = id.index(), "registered color");
        id
    }

    pub fn color(&self, id: ColorId) -> Option<&[f64]> {
        self.colors.get(id.index()).map(|c| &c[..])
    }

    pub fn font_label(&self, id: FontId) -> String {
        format!("font-{}", id.index())
    }

    pub fn color_label(&self, id: ColorId) -> String {
        format!("color-{}", id.index())
    }

    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }

    pub fn color_count(&self) -> usize {
        self.colors.len()
    }

    pub fn reset(&mut self) {
        self.fonts = Rodeo::default();
        self.colors.clear();
        self.color_index.clear();
    }
}

impl Default for ResourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fonts_get_sequential_ids() {
        let mut registry = ResourceRegistry::new();
        let a = registry.intern_font("Helvetica");
        let b = registry.intern_font("Times-Bold");
        let c = registry.intern_font("Helvetica");
        assert_eq!(a, c);
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(registry.font_label(b), "font-1");
        assert_eq!(registry.font_name(b), Some("Times-Bold"));
        assert_eq!(registry.font_id("Courier"), None);
    }

    #[test]
    fn colors_dedup_by_components() {
        let mut registry = ResourceRegistry::new();
        let red = registry.intern_color(&[1.0, 0.0, 0.0]);
        let black = registry.intern_color(&[0.0]);
        assert_eq!(registry.intern_color(&[1.0, 0.0, 0.0]), red);
        assert_ne!(red, black);
        assert_eq!(registry.color(black), Some(&[0.0][..]));
        assert_eq!(registry.color_label(black), "color-1");
        assert_eq!(registry.color(ColorId::new(7)), None);
    }

    #[test]
    fn reset_restarts_numbering() {
        let mut registry = ResourceRegistry::new();
        registry.intern_font("A");
        registry.intern_font("B");
        registry.intern_color(&[0.5]);
        registry.reset();
        assert_eq!(registry.font_count(), 0);
        assert_eq!(registry.color_count(), 0);
        assert_eq!(registry.intern_font("B").index(), 0);
    }
}
