//! Position computation: carving the fretboard into fingering shapes
//!
//! A position is a small fret window per parent-scale degree, wide enough to
//! hold one complete traversal of the active mode across all strings. The
//! shape repeats every octave, so a position owns one window per 12-fret
//! step that still fits on the board.

use serde::{Deserialize, Serialize};

use crate::mode::ResolvedScale;
use crate::pitch::{interval_of, pitch_at};

/// One concrete fret range of a position, closed on both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub start: u8,
    pub end: u8,
}

impl Window {
    pub fn contains(&self, fret: u8) -> bool {
        self.start <= fret && fret <= self.end
    }

    pub fn width(&self) -> u8 {
        self.end - self.start + 1
    }
}

/// A playable shape for one degree of the parent scale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// 1-based degree within the parent collection. Numbering can have gaps:
    /// a degree with no fitting window is omitted entirely.
    pub degree: usize,
    /// Pitch class of the degree's root-position note, for labeling
    pub anchor_pitch: u8,
    /// Octave-duplicated windows, lowest first
    pub windows: Vec<Window>,
}

/// True iff the fret lies inside any of the position's windows
pub fn is_note_in_position(fret: u8, position: &Position) -> bool {
    position.windows.iter().any(|w| w.contains(fret))
}

/// Coverage predicate: does the window starting at `start` hold a complete,
/// connected traversal of the mode?
///
/// Checks the frets `start..=start + width` on every string. Two conditions:
///
/// * completeness: every interval of the mode occurs at least once;
/// * connectivity: walking strings from lowest to highest, each string must
///   touch at least one scale note, and its first touched degree must equal
///   the previous string's last touched degree or that degree's immediate
///   successor. The shape hands off between strings without skipping.
pub fn all_pitch_classes_covered(
    start: u8,
    width: u8,
    mode_intervals: &[u8],
    root: u8,
    tuning: &[u8],
) -> bool {
    if tuning.is_empty() || mode_intervals.is_empty() {
        return false;
    }
    let n = mode_intervals.len();

    let mut seen = [false; 12];
    for string in 0..tuning.len() {
        for fret in start..=start + width {
            let interval = interval_of(pitch_at(tuning, string, fret), root);
            seen[interval as usize] = true;
        }
    }
    if !mode_intervals.iter().all(|&i| seen[i as usize]) {
        return false;
    }

    let mut prev_last: Option<usize> = None;
    for string in 0..tuning.len() {
        let mut first = None;
        let mut last = None;
        for fret in start..=start + width {
            let interval = interval_of(pitch_at(tuning, string, fret), root);
            if let Some(idx) = mode_intervals.iter().position(|&i| i == interval) {
                if first.is_none() {
                    first = Some(idx);
                }
                last = Some(idx);
            }
        }
        let (Some(first), Some(last)) = (first, last) else {
            return false;
        };
        if let Some(prev) = prev_last {
            if first != prev && first != (prev + 1) % n {
                return false;
            }
        }
        prev_last = Some(last);
    }
    true
}

/// Compute the playable positions for a resolved scale on a tuning.
///
/// One candidate per parent degree: anchor the window where the degree's
/// pitch first occurs on the lowest string, try width 4, and fall back to
/// width 5 when the coverage predicate rejects width 4. Width 5 is used
/// unconditionally once width 4 fails; downstream consumers always get a
/// shape for a degree that fits the board.
pub fn compute_positions(scale: &ResolvedScale, tuning: &[u8], total_frets: u8) -> Vec<Position> {
    let Some(parent) = &scale.parent else {
        return Vec::new();
    };
    if tuning.is_empty() {
        return Vec::new();
    }

    let mut positions = Vec::new();
    for (d, &parent_interval) in parent.intervals.iter().enumerate() {
        let anchor_pitch = (parent.root + parent_interval) % 12;
        let anchor_fret = (anchor_pitch + 12 - tuning[0]) % 12;

        let width: u8 =
            if all_pitch_classes_covered(anchor_fret, 4, &scale.intervals, scale.root, tuning) {
                4
            } else {
                5
            };

        let mut windows = Vec::new();
        let mut start = anchor_fret;
        while start + width - 1 <= total_frets {
            windows.push(Window { start, end: start + width - 1 });
            start += 12;
        }
        if windows.is_empty() {
            continue;
        }

        positions.push(Position { degree: d + 1, anchor_pitch, windows });
    }
    positions
}
