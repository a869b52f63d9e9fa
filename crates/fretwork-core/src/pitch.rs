//! Pitch-class arithmetic and note naming

use serde::{Deserialize, Serialize};

pub const NOTE_NAMES_SHARP: [&str; 12] = [
    "C", "C♯", "D", "D♯", "E", "F", "F♯", "G", "G♯", "A", "A♯", "B",
];
pub const NOTE_NAMES_FLAT: [&str; 12] = [
    "C", "D♭", "D", "E♭", "E", "F", "G♭", "G", "A♭", "A", "B♭", "B",
];
pub const INTERVAL_NAMES: [&str; 12] = [
    "1", "♭2", "2", "♭3", "3", "4", "♭5", "5", "♭6", "6", "♭7", "7",
];

/// Accidental spelling for note names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Accidental {
    #[default]
    Sharp,
    Flat,
}

/// Pitch class sounding at a fret of a string
pub fn pitch_at(tuning: &[u8], string: usize, fret: u8) -> u8 {
    (tuning[string] + fret) % 12
}

/// Pitch class expressed relative to a root, 0-11 semitones
pub fn interval_of(pitch: u8, root: u8) -> u8 {
    (pitch + 12 - root) % 12
}

pub fn note_name(pitch_class: u8, accidental: Accidental) -> &'static str {
    let names = match accidental {
        Accidental::Sharp => &NOTE_NAMES_SHARP,
        Accidental::Flat => &NOTE_NAMES_FLAT,
    };
    names[(pitch_class % 12) as usize]
}

pub fn interval_name(interval: u8) -> &'static str {
    INTERVAL_NAMES[(interval % 12) as usize]
}

/// Parse a note name like "C", "F#", "Bb" or "D♯" into a pitch class
pub fn note_from_name(name: &str) -> Option<u8> {
    let mut chars = name.chars();
    let base: i16 = match chars.next()?.to_ascii_uppercase() {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return None,
    };
    let mut pitch = base;
    for c in chars {
        match c {
            '#' | '♯' => pitch += 1,
            'b' | '♭' => pitch -= 1,
            _ => return None,
        }
    }
    Some(((pitch % 12 + 12) % 12) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_at_wraps() {
        // Standard guitar low E string
        let tuning = [4, 9, 2, 7, 11, 4];
        assert_eq!(pitch_at(&tuning, 0, 0), 4);
        assert_eq!(pitch_at(&tuning, 0, 12), 4);
        assert_eq!(pitch_at(&tuning, 2, 3), 5); // D string fret 3 = F
    }

    #[test]
    fn test_interval_of() {
        assert_eq!(interval_of(4, 4), 0);
        assert_eq!(interval_of(2, 4), 10); // D against E root
        assert_eq!(interval_of(11, 0), 11);
    }

    #[test]
    fn test_note_names() {
        assert_eq!(note_name(1, Accidental::Sharp), "C♯");
        assert_eq!(note_name(1, Accidental::Flat), "D♭");
        assert_eq!(interval_name(10), "♭7");
    }

    #[test]
    fn test_note_from_name() {
        assert_eq!(note_from_name("C"), Some(0));
        assert_eq!(note_from_name("c#"), Some(1));
        assert_eq!(note_from_name("Bb"), Some(10));
        assert_eq!(note_from_name("E♭"), Some(3));
        assert_eq!(note_from_name("Cb"), Some(11));
        assert_eq!(note_from_name("H"), None);
        assert_eq!(note_from_name("Cx"), None);
    }
}
