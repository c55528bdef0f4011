use serde::{Deserialize, Serialize};

/// Identifies one sticker of the catalog by its position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StickerId(pub usize);

/// A read-only emoji sticker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sticker {
    pub id: StickerId,
    /// Asset name, `emoji1` to `emoji6`
    pub name: &'static str,
    pub label: &'static str,
    pub glyph: &'static str,
}

const STICKERS: [Sticker; 6] = [
    Sticker { id: StickerId(0), name: "emoji1", label: "Grinning", glyph: "😀" },
    Sticker { id: StickerId(1), name: "emoji2", label: "Sunglasses", glyph: "😎" },
    Sticker { id: StickerId(2), name: "emoji3", label: "Party", glyph: "🎉" },
    Sticker { id: StickerId(3), name: "emoji4", label: "Heart", glyph: "❤" },
    Sticker { id: StickerId(4), name: "emoji5", label: "Star", glyph: "⭐" },
    Sticker { id: StickerId(5), name: "emoji6", label: "Fire", glyph: "🔥" },
];

/// The fixed, ordered set of stickers the user picks from
#[derive(Debug, Clone, Copy, Default)]
pub struct StickerCatalog;

impl StickerCatalog {
    pub fn new() -> Self {
        Self
    }

    /// All stickers, in display order
    pub fn stickers(&self) -> &'static [Sticker] {
        &STICKERS
    }

    pub fn len(&self) -> usize {
        STICKERS.len()
    }

    pub fn is_empty(&self) -> bool {
        STICKERS.is_empty()
    }

    pub fn get(&self, id: StickerId) -> Option<&'static Sticker> {
        STICKERS.iter().find(|sticker| sticker.id == id)
    }

    pub fn by_index(&self, index: usize) -> Option<&'static Sticker> {
        STICKERS.get(index)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&'static Sticker> {
        STICKERS.iter().find(|sticker| sticker.name == name)
    }

    pub fn contains(&self, id: StickerId) -> bool {
        self.get(id).is_some()
    }
}
