//! Per-fret classification for front ends

use serde::{Deserialize, Serialize};

use crate::mode::ResolvedScale;
use crate::pitch::{interval_name, interval_of, note_name, pitch_at, Accidental};
use crate::position::{is_note_in_position, Position};

/// How a front end labels cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DisplayMode {
    #[default]
    Letters,
    Intervals,
}

/// Scale membership of one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellClass {
    Root,
    InScale,
    OutOfScale,
}

/// Classification of one (string, fret) cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FretCell {
    pub string: u8,
    pub fret: u8,
    pub pitch_class: u8,
    pub interval: u8,
    pub class: CellClass,
    /// None when no position is selected
    pub in_position: Option<bool>,
}

/// Classify every cell of the board, lowest string first.
///
/// Front ends render rows in whatever order they like; the selected
/// position only dims cells, it never changes scale membership.
pub fn classify_board(
    scale: &ResolvedScale,
    tuning: &[u8],
    selected: Option<&Position>,
    total_frets: u8,
) -> Vec<Vec<FretCell>> {
    (0..tuning.len())
        .map(|string| {
            (0..=total_frets)
                .map(|fret| {
                    let pitch_class = pitch_at(tuning, string, fret);
                    let interval = interval_of(pitch_class, scale.root);
                    let class = if interval == 0 {
                        CellClass::Root
                    } else if scale.intervals.contains(&interval) {
                        CellClass::InScale
                    } else {
                        CellClass::OutOfScale
                    };
                    FretCell {
                        string: string as u8,
                        fret,
                        pitch_class,
                        interval,
                        class,
                        in_position: selected.map(|p| is_note_in_position(fret, p)),
                    }
                })
                .collect()
        })
        .collect()
}

/// Label for a cell under the given display mode and accidental spelling
pub fn cell_label(cell: &FretCell, mode: DisplayMode, accidental: Accidental) -> &'static str {
    match mode {
        DisplayMode::Letters => note_name(cell.pitch_class, accidental),
        DisplayMode::Intervals => interval_name(cell.interval),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ScaleCatalog;
    use crate::mode::resolve_key;
    use crate::position::compute_positions;
    use crate::tuning::TOTAL_FRETS;

    const GUITAR: [u8; 6] = [4, 9, 2, 7, 11, 4];

    #[test]
    fn test_board_dimensions() {
        let catalog = ScaleCatalog::standard();
        let scale = resolve_key(&catalog, "ionian", 4).unwrap();
        let board = classify_board(&scale, &GUITAR, None, TOTAL_FRETS);
        assert_eq!(board.len(), 6);
        assert!(board.iter().all(|row| row.len() == 23));
    }

    #[test]
    fn test_roots_and_membership() {
        let catalog = ScaleCatalog::standard();
        let scale = resolve_key(&catalog, "ionian", 4).unwrap();
        let board = classify_board(&scale, &GUITAR, None, TOTAL_FRETS);

        // Open low E is the root; F natural a fret above is outside E major
        assert_eq!(board[0][0].class, CellClass::Root);
        assert_eq!(board[0][1].class, CellClass::OutOfScale);
        assert_eq!(board[0][2].class, CellClass::InScale);
        // Roots recur every 12 frets
        assert_eq!(board[0][12].class, CellClass::Root);

        // Without a selected position the flag stays unset
        assert!(board.iter().flatten().all(|c| c.in_position.is_none()));

        // Every cell in the chromatic scale is a member
        let chromatic = resolve_key(&catalog, "chromatic", 4).unwrap();
        let board = classify_board(&chromatic, &GUITAR, None, TOTAL_FRETS);
        assert!(board
            .iter()
            .flatten()
            .all(|c| c.class != CellClass::OutOfScale));
    }

    #[test]
    fn test_position_flag_follows_windows() {
        let catalog = ScaleCatalog::standard();
        let scale = resolve_key(&catalog, "ionian", 4).unwrap();
        let positions = compute_positions(&scale, &GUITAR, TOTAL_FRETS);
        let first = positions.iter().find(|p| p.degree == 1).unwrap();
        let board = classify_board(&scale, &GUITAR, Some(first), TOTAL_FRETS);

        for row in &board {
            for cell in row {
                let expected = is_note_in_position(cell.fret, first);
                assert_eq!(cell.in_position, Some(expected));
            }
        }
    }

    #[test]
    fn test_every_preset_classifies() {
        let catalog = ScaleCatalog::standard();
        let scale = resolve_key(&catalog, "dorian", 7).unwrap();
        for preset in crate::tuning::TuningPreset::ALL {
            let board = classify_board(&scale, preset.tuning(), None, TOTAL_FRETS);
            assert_eq!(board.len(), preset.tuning().len());
        }
    }

    #[test]
    fn test_cell_labels() {
        let catalog = ScaleCatalog::standard();
        let scale = resolve_key(&catalog, "ionian", 4).unwrap();
        let board = classify_board(&scale, &GUITAR, None, TOTAL_FRETS);

        let cell = &board[0][2]; // F♯ on the low E string
        assert_eq!(cell_label(cell, DisplayMode::Letters, Accidental::Sharp), "F♯");
        assert_eq!(cell_label(cell, DisplayMode::Letters, Accidental::Flat), "G♭");
        assert_eq!(cell_label(cell, DisplayMode::Intervals, Accidental::Sharp), "2");
    }
}
