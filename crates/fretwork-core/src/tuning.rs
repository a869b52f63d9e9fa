//! Tuning presets and fretboard constants

use serde::{Deserialize, Serialize};

/// Highest fret on the board (frets run 0..=TOTAL_FRETS)
pub const TOTAL_FRETS: u8 = 22;

pub const MAX_STRINGS: usize = 8;

/// Frets carrying a single inlay dot
pub const SINGLE_DOT_FRETS: [u8; 8] = [3, 5, 7, 9, 15, 17, 19, 21];
/// Frets carrying a double inlay dot
pub const DOUBLE_DOT_FRETS: [u8; 1] = [12];

/// Number of inlay dots at a fret (0, 1 or 2)
pub fn marker_dots(fret: u8) -> u8 {
    if DOUBLE_DOT_FRETS.contains(&fret) {
        2
    } else if SINGLE_DOT_FRETS.contains(&fret) {
        1
    } else {
        0
    }
}

/// Factory tunings, low string first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TuningPreset {
    Guitar7,
    Guitar6,
    Bass5,
    Bass4,
}

impl TuningPreset {
    pub const ALL: [TuningPreset; 4] = [
        Self::Guitar7,
        Self::Guitar6,
        Self::Bass5,
        Self::Bass4,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Guitar7 => "7-String Guitar",
            Self::Guitar6 => "6-String Guitar",
            Self::Bass5 => "5-String Bass",
            Self::Bass4 => "4-String Bass",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Guitar7 => "guitar7",
            Self::Guitar6 => "guitar6",
            Self::Bass5 => "bass5",
            Self::Bass4 => "bass4",
        }
    }

    /// Open-string pitch classes, lowest string first
    pub fn tuning(&self) -> &'static [u8] {
        match self {
            Self::Guitar7 => &[11, 4, 9, 2, 7, 11, 4],
            Self::Guitar6 => &[4, 9, 2, 7, 11, 4],
            Self::Bass5 => &[11, 4, 9, 2, 7],
            Self::Bass4 => &[4, 9, 2, 7],
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.key() == key)
    }
}
