//! Periodic wave selector.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Named periodic functions used wherever an oscillation is needed.
///
/// The selector is pure data; evaluation lives in the canvas backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaveKind {
    /// `cos(x)`.
    #[default]
    Cosine,
    /// `sin(x)`.
    Sine,
    /// `|sin(x)|`.
    AbsSine,
    /// `|cos(x)|`.
    AbsCosine,
    /// `+1` on the non-negative half of the sine cycle, `-1` otherwise.
    Square,
    /// Rising ramp with a jump at each period boundary.
    Sawtooth,
    /// Continuous symmetric ramp.
    Triangle,
}

impl WaveKind {
    /// Every wave kind, in declaration order.
    pub const ALL: [WaveKind; 7] = [
        WaveKind::Cosine,
        WaveKind::Sine,
        WaveKind::AbsSine,
        WaveKind::AbsCosine,
        WaveKind::Square,
        WaveKind::Sawtooth,
        WaveKind::Triangle,
    ];

    /// Returns the serialized name (e.g., "abs_sine").
    pub fn as_str(&self) -> &'static str {
        match self {
            WaveKind::Cosine => "cosine",
            WaveKind::Sine => "sine",
            WaveKind::AbsSine => "abs_sine",
            WaveKind::AbsCosine => "abs_cosine",
            WaveKind::Square => "square",
            WaveKind::Sawtooth => "sawtooth",
            WaveKind::Triangle => "triangle",
        }
    }
}

impl fmt::Display for WaveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WaveKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WaveKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownName {
                kind: "wave",
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip_through_from_str() {
        for kind in WaveKind::ALL {
            assert_eq!(kind.as_str().parse::<WaveKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&WaveKind::AbsCosine).unwrap();
        assert_eq!(json, "\"abs_cosine\"");
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        let err = "zigzag".parse::<WaveKind>().unwrap_err();
        assert!(err.to_string().contains("zigzag"));
    }
}
