//! Melodic permutation sequences over a position's note range
//!
//! A step pattern is a short cyclic list of signed scale-degree moves.
//! Walking it over the pitch-sorted notes of one position window produces a
//! practice sequence that climbs (or descends) through the shape.

use serde::{Deserialize, Serialize};

use crate::error::{FretworkError, Result};
use crate::mode::ResolvedScale;
use crate::position::Position;
use crate::rng::RandomSource;

/// Random pattern search gives up after this many candidates
pub const GENERATION_ATTEMPTS: u32 = 100;

/// One sounding note inside a position window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteEvent {
    /// Monotonic pitch height across strings (not a MIDI note number)
    pub pitch: u8,
    pub pitch_class: u8,
    /// Semitones above the scale root
    pub interval: u8,
    /// 1-based scale degree within the mode
    pub degree: u8,
    /// String index, 0 = lowest
    pub string: u8,
}

// ============================================================================
// Note range extraction
// ============================================================================

/// Flatten a position's first window into a pitch-ordered, deduplicated
/// note list.
///
/// Chained per-string offsets linearize pitch height across strings of
/// possibly-irregular interval tunings; unisons that occur on two strings
/// keep only the lower string's note. Only the first (lowest) window is
/// used so the range never spans octave-duplicated shapes.
pub fn position_note_range(
    scale: &ResolvedScale,
    position: &Position,
    tuning: &[u8],
) -> Vec<NoteEvent> {
    let Some(window) = position.windows.first() else {
        return Vec::new();
    };
    if tuning.is_empty() {
        return Vec::new();
    }
    let n = scale.intervals.len();

    let mut offsets = vec![0u8; tuning.len()];
    offsets[0] = tuning[0];
    for s in 1..tuning.len() {
        offsets[s] = offsets[s - 1] + (tuning[s] + 12 - tuning[s - 1]) % 12;
    }

    let mut notes = Vec::new();
    for (string, &open) in tuning.iter().enumerate() {
        for fret in window.start..=window.end {
            let pitch_class = (open + fret) % 12;
            let interval = (pitch_class + 12 - scale.root) % 12;
            let Some(idx) = scale.intervals.iter().position(|&i| i == interval) else {
                continue;
            };
            notes.push(NoteEvent {
                pitch: offsets[string] + fret,
                pitch_class,
                interval,
                degree: (idx % n) as u8 + 1,
                string: string as u8,
            });
        }
    }
    notes.sort_by_key(|e| e.pitch);
    notes.dedup_by_key(|e| e.pitch);
    notes
}

// ============================================================================
// Pattern rules
// ============================================================================

/// One validation rule outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleCheck {
    pub rule: String,
    pub passed: bool,
    pub detail: String,
}

impl RuleCheck {
    fn new(rule: &str, passed: bool, detail: String) -> Self {
        Self { rule: rule.to_string(), passed, detail }
    }
}

/// Full pass/fail checklist for a candidate pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternReport {
    pub steps: Vec<i32>,
    pub checks: Vec<RuleCheck>,
}

impl PatternReport {
    pub fn is_valid(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &RuleCheck> {
        self.checks.iter().filter(|c| !c.passed)
    }
}

/// Check a step pattern against the six pattern rules for a mode of the
/// given cardinality. Random generation accepts exactly the same rules.
pub fn validate_pattern(steps: &[i32], cardinality: usize) -> PatternReport {
    let max_step = 5.min(cardinality.saturating_sub(1)) as i32;
    let max_len = 4.min(cardinality);
    let net: i32 = steps.iter().sum();
    let len = steps.len();

    let mut checks = Vec::with_capacity(6);

    let bad_step = steps.iter().find(|&&s| s == 0 || s.abs() > max_step);
    checks.push(RuleCheck::new(
        "step range",
        bad_step.is_none(),
        match bad_step {
            Some(s) => format!("step {s} must be non-zero with magnitude at most {max_step}"),
            None => format!("all steps non-zero with magnitude at most {max_step}"),
        },
    ));

    checks.push(RuleCheck::new(
        "length",
        (1..=max_len).contains(&len),
        format!("pattern length {len} must be between 1 and {max_len}"),
    ));

    checks.push(RuleCheck::new(
        "single step",
        len != 1 || steps[0].abs() == 1,
        if len == 1 {
            format!("a one-step pattern must be +1 or -1, got {}", steps[0])
        } else {
            "only applies to one-step patterns".to_string()
        },
    ));

    checks.push(RuleCheck::new(
        "net motion",
        net != 0 && net.abs() <= 2,
        format!("net motion {net} must satisfy 0 < |net| <= 2"),
    ));

    let inverse_at = (0..len).find(|&i| steps[i] == -steps[(i + 1) % len]);
    checks.push(RuleCheck::new(
        "no immediate inverses",
        len == 0 || inverse_at.is_none(),
        match inverse_at {
            Some(i) => format!(
                "steps {} and {} cancel out",
                steps[i],
                steps[(i + 1) % len]
            ),
            None => "no step undoes its predecessor".to_string(),
        },
    ));

    checks.push(RuleCheck::new(
        "not constant",
        len < 2 || steps.windows(2).any(|w| w[0] != w[1]),
        "a multi-step pattern must vary its steps".to_string(),
    ));

    PatternReport { steps: steps.to_vec(), checks }
}

// ============================================================================
// Pattern text parsing
// ============================================================================

/// Parse pattern text like `[+1, -2, 1]` or `1,-2,1` into steps.
///
/// Empty input and non-integer tokens are reported as errors naming the
/// offending token; no partial result is produced.
pub fn parse_pattern(text: &str) -> Result<Vec<i32>> {
    let inner = text.trim();
    let inner = inner.strip_prefix('[').unwrap_or(inner);
    let inner = inner.strip_suffix(']').unwrap_or(inner);
    if inner.trim().is_empty() {
        return Err(FretworkError::EmptyPattern);
    }
    inner
        .split(',')
        .map(|token| {
            let token = token.trim();
            token
                .parse::<i32>()
                .map_err(|_| FretworkError::BadStepToken(token.to_string()))
        })
        .collect()
}

// ============================================================================
// Random generation
// ============================================================================

/// Draw random candidates until one passes [`validate_pattern`], giving up
/// after [`GENERATION_ATTEMPTS`] and falling back to the trivial ascending
/// pattern `[+1]`. The fallback is silent: a pattern always comes back.
pub fn generate_step_pattern(rng: &mut dyn RandomSource, cardinality: usize) -> Vec<i32> {
    let max_step = 5.min(cardinality.saturating_sub(1)) as u32;
    let max_len = 4.min(cardinality) as u32;
    if max_step == 0 || max_len == 0 {
        return vec![1];
    }

    for _ in 0..GENERATION_ATTEMPTS {
        let len = rng.next_below(max_len) + 1;
        let steps: Vec<i32> = (0..len)
            .map(|_| {
                let magnitude = rng.next_below(max_step) as i32 + 1;
                if rng.next_below(2) == 0 { magnitude } else { -magnitude }
            })
            .collect();
        if validate_pattern(&steps, cardinality).is_valid() {
            return steps;
        }
    }
    vec![1]
}

// ============================================================================
// Sequence walk
// ============================================================================

/// Walk a cyclic step pattern over a pitch-sorted note range.
///
/// The starting index is chosen from the pattern's prefix-sum excursion
/// bounds so the walk reaches the far edge without reading outside the
/// range first: ascending patterns start near the bottom, descending ones
/// near the top. The walk appends the starting note, then applies steps
/// cyclically until the target edge is reached or the next index would
/// leave the range (an early stop, not an error).
pub fn permutation_sequence(notes: &[NoteEvent], steps: &[i32]) -> Vec<NoteEvent> {
    if notes.len() < 2 || steps.is_empty() {
        return Vec::new();
    }
    let len = notes.len() as i32;
    let net: i32 = steps.iter().sum();
    if net == 0 {
        return Vec::new();
    }

    let mut sum = 0;
    let mut max_excursion = 0;
    let mut min_excursion = 0;
    for &s in steps {
        sum += s;
        max_excursion = max_excursion.max(sum);
        min_excursion = min_excursion.min(sum);
    }

    let ascending = net > 0;
    let start = if ascending {
        0.max(-min_excursion).min(len - 1)
    } else {
        (len - 1).min(len - 1 - max_excursion).max(0)
    };
    let target = if ascending { len - 1 } else { 0 };

    let mut sequence = vec![notes[start as usize]];
    if start == target {
        return sequence;
    }

    let mut current = start;
    let mut i = 0usize;
    loop {
        current += steps[i % steps.len()];
        i += 1;
        if current < 0 || current >= len {
            break;
        }
        sequence.push(notes[current as usize]);
        if current == target {
            break;
        }
    }
    sequence
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ScaleCatalog;
    use crate::mode::resolve_key;
    use crate::position::compute_positions;
    use crate::rng::Lcg;
    use crate::tuning::TOTAL_FRETS;

    const GUITAR: [u8; 6] = [4, 9, 2, 7, 11, 4];

    /// Replays a fixed cycle of words
    struct Scripted {
        words: Vec<u32>,
        index: usize,
    }

    impl Scripted {
        fn new(words: &[u32]) -> Self {
            Self { words: words.to_vec(), index: 0 }
        }
    }

    impl RandomSource for Scripted {
        fn next_u32(&mut self) -> u32 {
            let word = self.words[self.index % self.words.len()];
            self.index += 1;
            word
        }
    }

    fn e_ionian_range() -> Vec<NoteEvent> {
        let catalog = ScaleCatalog::standard();
        let scale = resolve_key(&catalog, "ionian", 4).unwrap();
        let positions = compute_positions(&scale, &GUITAR, TOTAL_FRETS);
        let first = positions.iter().find(|p| p.degree == 1).unwrap();
        position_note_range(&scale, first, &GUITAR)
    }

    #[test]
    fn test_note_range_is_sorted_and_deduplicated() {
        let notes = e_ionian_range();
        assert_eq!(notes.len(), 12);
        assert!(notes.windows(2).all(|w| w[0].pitch < w[1].pitch));

        let degrees: Vec<u8> = notes.iter().map(|e| e.degree).collect();
        assert_eq!(degrees, vec![1, 2, 4, 5, 7, 1, 3, 4, 5, 6, 1, 2]);

        let pitch_classes: Vec<u8> = notes.iter().map(|e| e.pitch_class).collect();
        assert_eq!(pitch_classes, vec![4, 6, 9, 11, 3, 4, 8, 9, 11, 1, 4, 6]);
    }

    #[test]
    fn test_note_range_keeps_lower_string_on_unison() {
        let catalog = ScaleCatalog::standard();
        let scale = resolve_key(&catalog, "ionian", 0).unwrap();
        let tuning = [0, 0];
        let positions = compute_positions(&scale, &tuning, TOTAL_FRETS);
        let notes = position_note_range(&scale, &positions[0], &tuning);
        // Both strings sound the same pitches; only string 0 survives
        assert!(!notes.is_empty());
        assert!(notes.iter().all(|e| e.string == 0));
    }

    #[test]
    fn test_ascending_unit_pattern_reproduces_range() {
        let notes = e_ionian_range();
        let sequence = permutation_sequence(&notes, &[1]);
        assert_eq!(sequence, notes);
    }

    #[test]
    fn test_descending_unit_pattern_reverses_range() {
        let notes = e_ionian_range();
        let sequence = permutation_sequence(&notes, &[-1]);
        let mut reversed = notes.clone();
        reversed.reverse();
        assert_eq!(sequence, reversed);
    }

    #[test]
    fn test_walk_starts_clear_of_the_bottom_edge() {
        let notes = e_ionian_range();
        // Dips one below the current index before climbing
        let sequence = permutation_sequence(&notes, &[-1, 2]);
        assert_eq!(sequence[0], notes[1]);
        assert_eq!(*sequence.last().unwrap(), notes[11]);
    }

    #[test]
    fn test_walk_can_stop_early() {
        let range = e_ionian_range();
        let notes = &range[..7];
        let sequence = permutation_sequence(notes, &[3, -1]);
        let indices: Vec<usize> = sequence
            .iter()
            .map(|e| notes.iter().position(|n| n == e).unwrap())
            .collect();
        // 4 + 3 leaves the range before index 6 is ever reached
        assert_eq!(indices, vec![0, 3, 2, 5, 4]);
    }

    #[test]
    fn test_degenerate_ranges_produce_nothing() {
        let notes = e_ionian_range();
        assert!(permutation_sequence(&notes[..1], &[1]).is_empty());
        assert!(permutation_sequence(&[], &[1]).is_empty());
        assert!(permutation_sequence(&notes, &[]).is_empty());
    }

    #[test]
    fn test_validate_rejects_immediate_inverses() {
        for n in [3, 5, 7, 12] {
            let report = validate_pattern(&[1, -1], n);
            assert!(!report.is_valid());
            assert!(report
                .failures()
                .any(|c| c.rule == "no immediate inverses"));
        }
    }

    #[test]
    fn test_validate_rejects_wraparound_inverses() {
        let report = validate_pattern(&[2, 1, -2], 7);
        assert!(report.failures().any(|c| c.rule == "no immediate inverses"));
    }

    #[test]
    fn test_validate_accepts_known_good_patterns() {
        for steps in [vec![1], vec![-1], vec![2, -1], vec![3, -2], vec![2, 2, -3]] {
            let report = validate_pattern(&steps, 7);
            assert!(report.is_valid(), "{steps:?}: {:?}", report.failures().collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_validate_rule_details() {
        let report = validate_pattern(&[7], 7);
        let failed: Vec<&str> = report.failures().map(|c| c.rule.as_str()).collect();
        // Magnitude capped at 5 and a one-step pattern must be a unit step
        assert!(failed.contains(&"step range"));
        assert!(failed.contains(&"single step"));

        let report = validate_pattern(&[2, 2], 7);
        assert!(report.failures().any(|c| c.rule == "not constant"));
        assert!(report.failures().any(|c| c.rule == "net motion"));

        let report = validate_pattern(&[1, 2, 1, 2, 1], 7);
        assert!(report.failures().any(|c| c.rule == "length"));
    }

    #[test]
    fn test_small_modes_tighten_the_rules() {
        // Augmented triad: magnitude cap min(5, 2) = 2, length cap 3
        assert!(!validate_pattern(&[3], 3).is_valid());
        assert!(validate_pattern(&[2, -1], 3).is_valid());
        assert!(!validate_pattern(&[1, 2, -1, 1], 3).is_valid());
    }

    #[test]
    fn test_parse_pattern_formats() {
        assert_eq!(parse_pattern("[+1, -2, 1]").unwrap(), vec![1, -2, 1]);
        assert_eq!(parse_pattern("1,-2,1").unwrap(), vec![1, -2, 1]);
        assert_eq!(parse_pattern("  [ 3 ]  ").unwrap(), vec![3]);
    }

    #[test]
    fn test_parse_pattern_empty_input() {
        assert!(matches!(parse_pattern(""), Err(FretworkError::EmptyPattern)));
        assert!(matches!(parse_pattern("  [] "), Err(FretworkError::EmptyPattern)));
    }

    #[test]
    fn test_parse_pattern_names_bad_token() {
        match parse_pattern("1, two, 3") {
            Err(FretworkError::BadStepToken(token)) => assert_eq!(token, "two"),
            other => panic!("expected token error, got {other:?}"),
        }
        assert!(matches!(
            parse_pattern("1,,3"),
            Err(FretworkError::BadStepToken(t)) if t.is_empty()
        ));
    }

    #[test]
    fn test_generated_patterns_always_validate() {
        let mut rng = Lcg::new(42);
        for n in [3, 5, 6, 7, 8, 12] {
            for _ in 0..20 {
                let steps = generate_step_pattern(&mut rng, n);
                assert!(validate_pattern(&steps, n).is_valid(), "n={n} {steps:?}");
            }
        }
    }

    #[test]
    fn test_generation_falls_back_after_exhausting_attempts() {
        // Every candidate becomes [1, 1], which the constant rule rejects
        let mut rng = Scripted::new(&[1, 0, 0, 0, 0]);
        assert_eq!(generate_step_pattern(&mut rng, 7), vec![1]);
    }

    #[test]
    fn test_generation_degenerate_cardinality() {
        let mut rng = Lcg::default();
        assert_eq!(generate_step_pattern(&mut rng, 1), vec![1]);
        assert_eq!(generate_step_pattern(&mut rng, 0), vec![1]);
    }
}
