//! Tag color classification.
//!
//! Rare tags (two occurrences or fewer) are grey. Everything else gets a
//! palette color picked by hashing the tag name, so a tag keeps its color
//! across pages and builds.

use serde::Serialize;

/// Tags with at most this many occurrences are shown grey.
pub const LOW_FREQUENCY_MAX: usize = 2;

/// Display color of a tag chip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TagColor {
    Blue,
    Green,
    Purple,
    Pink,
    Yellow,
    Orange,
    Teal,
    Indigo,
    /// Low-frequency tags.
    Grey,
}

/// Colors available to frequent tags, in hash order.
pub const PALETTE: [TagColor; 8] = [
    TagColor::Blue,
    TagColor::Green,
    TagColor::Purple,
    TagColor::Pink,
    TagColor::Yellow,
    TagColor::Orange,
    TagColor::Teal,
    TagColor::Indigo,
];

impl TagColor {
    /// Lowercase color name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Purple => "purple",
            Self::Pink => "pink",
            Self::Yellow => "yellow",
            Self::Orange => "orange",
            Self::Teal => "teal",
            Self::Indigo => "indigo",
            Self::Grey => "grey",
        }
    }

    /// CSS class used by the page templates.
    pub fn class(self) -> &'static str {
        match self {
            Self::Blue => "tag tag-blue",
            Self::Green => "tag tag-green",
            Self::Purple => "tag tag-purple",
            Self::Pink => "tag tag-pink",
            Self::Yellow => "tag tag-yellow",
            Self::Orange => "tag tag-orange",
            Self::Teal => "tag tag-teal",
            Self::Indigo => "tag tag-indigo",
            Self::Grey => "tag tag-grey",
        }
    }
}

impl std::fmt::Display for TagColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Color for `tag`.
///
/// With `Some(count)` and `count <= LOW_FREQUENCY_MAX` the tag is grey.
/// Otherwise (including an unknown count) it gets its palette color.
pub fn tag_color(tag: &str, count: Option<usize>) -> TagColor {
    if count.is_some_and(|c| c <= LOW_FREQUENCY_MAX) {
        return TagColor::Grey;
    }
    let slot = name_hash(tag).unsigned_abs() % PALETTE.len() as u64;
    PALETTE[slot as usize]
}

/// `h = c + (h << 5) - h` over UTF-16 code units.
///
/// Only the shifted term is truncated to 32 bits; the accumulator stays
/// 64-bit.
fn name_hash(tag: &str) -> i64 {
    tag.encode_utf16().fold(0i64, |h, unit| {
        let shifted = i64::from((h as i32).wrapping_shl(5));
        i64::from(unit).wrapping_add(shifted).wrapping_sub(h)
    })
}
