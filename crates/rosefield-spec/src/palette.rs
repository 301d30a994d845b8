//! Color palette selector.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Named hue schemes used for per-shape coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaletteKind {
    /// Spread of +/-30 degrees around the base hue.
    #[default]
    Analogous,
    /// Base hue and its opposite, alternating.
    Complementary,
    /// Three hues 120 degrees apart.
    Triadic,
    /// Reds and oranges, independent of the base hue.
    Warm,
    /// Cyans and blues.
    Cool,
    /// Reds through yellows.
    Sunset,
    /// Cyans through violets.
    Ocean,
    /// Yellow-greens through teals.
    Forest,
    /// The base hue only.
    Monochrome,
}

impl PaletteKind {
    /// Every palette, in declaration order.
    pub const ALL: [PaletteKind; 9] = [
        PaletteKind::Analogous,
        PaletteKind::Complementary,
        PaletteKind::Triadic,
        PaletteKind::Warm,
        PaletteKind::Cool,
        PaletteKind::Sunset,
        PaletteKind::Ocean,
        PaletteKind::Forest,
        PaletteKind::Monochrome,
    ];

    /// Returns the serialized name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaletteKind::Analogous => "analogous",
            PaletteKind::Complementary => "complementary",
            PaletteKind::Triadic => "triadic",
            PaletteKind::Warm => "warm",
            PaletteKind::Cool => "cool",
            PaletteKind::Sunset => "sunset",
            PaletteKind::Ocean => "ocean",
            PaletteKind::Forest => "forest",
            PaletteKind::Monochrome => "monochrome",
        }
    }
}

impl fmt::Display for PaletteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaletteKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaletteKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownName {
                kind: "palette",
                name: s.to_string(),
            })
    }
}
