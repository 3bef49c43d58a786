use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};


#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FontWeight {
    Thin = 100,
    ExtraLight = 200,
    Light = 300,
    Normal = 400,
    Medium = 500,
    SemiBold = 600,
    Bold = 700,
    ExtraBold = 800,
    Black = 900,
}

impl FontWeight {
    pub const ALL: [FontWeight; 9] = [
        FontWeight::Thin,
        FontWeight::ExtraLight,
        FontWeight::Light,
        FontWeight::Normal,
        FontWeight::Medium,
        FontWeight::SemiBold,
        FontWeight::Bold,
        FontWeight::ExtraBold,
        FontWeight::Black,
    ];
}

/// A CSS style numeric weight. Weights read from the system are always one of the nine
/// `FontWeight` buckets, or `OpenTypeFontWeight::UNKNOWN` when the font has no weight trait.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpenTypeFontWeight(pub u32);

impl OpenTypeFontWeight {
    pub const UNKNOWN: Self = Self(0);

    pub fn is_unknown(self) -> bool {
        self == Self::UNKNOWN
    }

    /// Whether this is one of the nine `FontWeight` buckets.
    pub fn is_bucket(self) -> bool {
        FontWeight::ALL.iter().any(|w| *w as u32 == self.0)
    }
}

impl From<FontWeight> for OpenTypeFontWeight {
    fn from(weight: FontWeight) -> Self {
        Self(weight as u32)
    }
}

impl fmt::Display for OpenTypeFontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Core Text's normalized weight trait runs from -1.0 to 1.0 with 0.0 being regular. The upper
// bounds are inclusive and are compared at f32 precision.
const WEIGHT_THRESHOLDS: [(f32, FontWeight); 8] = [
    (-0.8, FontWeight::Thin),
    (-0.6, FontWeight::ExtraLight),
    (-0.4, FontWeight::Light),
    (0.0, FontWeight::Normal),
    (0.25, FontWeight::Medium),
    (0.35, FontWeight::SemiBold),
    (0.4, FontWeight::Bold),
    (0.6, FontWeight::ExtraBold),
];

/// Maps a normalized platform weight trait to a CSS weight bucket.
///
/// Returns `OpenTypeFontWeight::UNKNOWN` if there is no weight or it is NaN.
pub fn classify_weight(weight: Option<f32>) -> OpenTypeFontWeight {
    let weight = match weight {
        Some(weight) if !weight.is_nan() => weight,
        _ => return OpenTypeFontWeight::UNKNOWN,
    };
    let bucket = WEIGHT_THRESHOLDS.iter()
        .find(|(upper, _)| weight <= *upper)
        .map(|(_, bucket)| *bucket)
        .unwrap_or(FontWeight::Black);
    bucket.into()
}

bitflags! {
    /// The stylistic flags of a font descriptor. The bit positions are the ones Core Text uses
    /// for `kCTFontTraitItalic` and friends.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct SymbolicTraits: u32 {
        const ITALIC = 1 << 0;
        const BOLD = 1 << 1;
        const EXPANDED = 1 << 5;
        const CONDENSED = 1 << 6;
        const MONO_SPACE = 1 << 10;
        const VERTICAL = 1 << 11;
        const UI_OPTIMIZED = 1 << 12;
        const COLOR_GLYPHS = 1 << 13;
        const COMPOSITE = 1 << 14;

        const _ = !0;
    }
}

impl SymbolicTraits {
    pub fn is_italic(self) -> bool {
        self.contains(Self::ITALIC)
    }

    pub fn is_bold(self) -> bool {
        self.contains(Self::BOLD)
    }

    pub fn is_monospaced(self) -> bool {
        self.contains(Self::MONO_SPACE)
    }
}
