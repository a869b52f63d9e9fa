//! fretwork-core: scale, position and permutation math for fretted strings

pub mod board;
pub mod catalog;
mod error;
pub mod mode;
pub mod pitch;
pub mod position;
pub mod rng;
pub mod sequence;
pub mod tuning;

pub use board::{cell_label, classify_board, CellClass, DisplayMode, FretCell};
pub use catalog::{Collection, ScaleCatalog, ScaleDef, ScaleGroup};
pub use error::{FretworkError, Result};
pub use mode::{
    enumerate_modes, find_parent, mode_intervals, resolve_degree, resolve_key, Mode, ParentScale,
    ResolvedScale,
};
pub use pitch::{
    interval_name, interval_of, note_from_name, note_name, pitch_at, Accidental, INTERVAL_NAMES,
    NOTE_NAMES_FLAT, NOTE_NAMES_SHARP,
};
pub use position::{
    all_pitch_classes_covered, compute_positions, is_note_in_position, Position, Window,
};
pub use rng::{Lcg, RandomSource};
pub use sequence::{
    generate_step_pattern, parse_pattern, permutation_sequence, position_note_range,
    validate_pattern, NoteEvent, PatternReport, RuleCheck, GENERATION_ATTEMPTS,
};
pub use tuning::{marker_dots, TuningPreset, MAX_STRINGS, TOTAL_FRETS};
