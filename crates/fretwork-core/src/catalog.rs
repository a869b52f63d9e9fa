//! Scale and collection catalog
//!
//! The catalog is an immutable, injected value: construct one with
//! [`ScaleCatalog::standard`] (or build a custom one in tests) and pass it
//! to the resolver. Nothing here is process-global.

use serde::{Deserialize, Serialize};

/// A named scale: display label plus its interval set relative to its own root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleDef {
    pub key: String,
    pub name: String,
    pub intervals: Vec<u8>,
}

impl ScaleDef {
    pub fn new(key: &str, name: &str, intervals: &[u8]) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            intervals: intervals.to_vec(),
        }
    }
}

/// A parent collection: a root-position interval set whose rotations are modes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub key: String,
    pub name: String,
    pub intervals: Vec<u8>,
}

impl Collection {
    pub fn new(key: &str, name: &str, intervals: &[u8]) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            intervals: intervals.to_vec(),
        }
    }

    pub fn cardinality(&self) -> usize {
        self.intervals.len()
    }
}

/// Menu grouping for front ends: optional group label plus member scale keys
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaleGroup {
    pub label: Option<String>,
    pub keys: Vec<String>,
}

impl ScaleGroup {
    fn new(label: Option<&str>, keys: &[&str]) -> Self {
        Self {
            label: label.map(str::to_string),
            keys: keys.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// The full catalog: flat scale list, parent collections, menu grouping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaleCatalog {
    pub scales: Vec<ScaleDef>,
    pub collections: Vec<Collection>,
    pub groups: Vec<ScaleGroup>,
}

impl ScaleCatalog {
    pub fn scale(&self, key: &str) -> Option<&ScaleDef> {
        self.scales.iter().find(|s| s.key == key)
    }

    pub fn collection(&self, key: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.key == key)
    }

    /// The factory catalog: church modes, the three altered-seventh families,
    /// pentatonic/blues shapes and the symmetric scales.
    pub fn standard() -> Self {
        let scales = vec![
            ScaleDef::new("chromatic", "Chromatic", &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]),
            // Major modes
            ScaleDef::new("ionian", "Ionian (Major)", &[0, 2, 4, 5, 7, 9, 11]),
            ScaleDef::new("dorian", "Dorian", &[0, 2, 3, 5, 7, 9, 10]),
            ScaleDef::new("phrygian", "Phrygian", &[0, 1, 3, 5, 7, 8, 10]),
            ScaleDef::new("lydian", "Lydian", &[0, 2, 4, 6, 7, 9, 11]),
            ScaleDef::new("mixolydian", "Mixolydian", &[0, 2, 4, 5, 7, 9, 10]),
            ScaleDef::new("aeolian", "Aeolian (Natural Minor)", &[0, 2, 3, 5, 7, 8, 10]),
            ScaleDef::new("locrian", "Locrian", &[0, 1, 3, 5, 6, 8, 10]),
            // Harmonic minor family
            ScaleDef::new("harmonic_minor", "Harmonic Minor", &[0, 2, 3, 5, 7, 8, 11]),
            ScaleDef::new("locrian_nat6", "Locrian ♮6", &[0, 1, 3, 5, 6, 9, 10]),
            ScaleDef::new("ionian_aug", "Ionian ♯5", &[0, 2, 4, 5, 8, 9, 11]),
            ScaleDef::new("dorian_sharp4", "Dorian ♯4", &[0, 2, 3, 6, 7, 9, 10]),
            ScaleDef::new("phrygian_dom", "Phrygian Dominant", &[0, 1, 4, 5, 7, 8, 10]),
            ScaleDef::new("lydian_sharp2", "Lydian ♯9", &[0, 3, 4, 6, 7, 9, 11]),
            ScaleDef::new("ultralocrian", "Ultralocrian", &[0, 1, 3, 4, 6, 8, 9]),
            // Melodic minor family
            ScaleDef::new("melodic_minor", "Melodic Minor", &[0, 2, 3, 5, 7, 9, 11]),
            ScaleDef::new("dorian_b2", "Phrygian ♮6 / Dorian ♭2", &[0, 1, 3, 5, 7, 9, 10]),
            ScaleDef::new("lydian_aug", "Lydian Augmented", &[0, 2, 4, 6, 8, 9, 11]),
            ScaleDef::new("lydian_dom", "Lydian Dominant", &[0, 2, 4, 6, 7, 9, 10]),
            ScaleDef::new("mixolydian_b6", "Mixolydian ♭6/Aeolian-Major", &[0, 2, 4, 5, 7, 8, 10]),
            ScaleDef::new("locrian_nat2", "Locrian ♮2", &[0, 2, 3, 5, 6, 8, 10]),
            ScaleDef::new("altered", "Altered/Super-Locrian", &[0, 1, 3, 4, 6, 8, 10]),
            // Harmonic major family
            ScaleDef::new("harmonic_major", "Harmonic Major", &[0, 2, 4, 5, 7, 8, 11]),
            ScaleDef::new("dorian_b5", "Dorian ♭5", &[0, 2, 3, 5, 6, 9, 10]),
            ScaleDef::new("phrygian_b4", "Phrygian ♭4", &[0, 1, 3, 4, 7, 8, 10]),
            ScaleDef::new("lydian_b3", "Lydian ♭3", &[0, 2, 3, 6, 7, 9, 11]),
            ScaleDef::new("mixolydian_b2", "Mixolydian ♭2", &[0, 1, 4, 5, 7, 9, 10]),
            ScaleDef::new("lydian_aug_s2", "Lydian Augmented ♯2", &[0, 3, 4, 6, 8, 9, 11]),
            ScaleDef::new("locrian_bb7", "Locrian ♭♭7", &[0, 1, 3, 5, 6, 8, 9]),
            // Symmetric scales
            ScaleDef::new("whole_tone", "Whole Tone", &[0, 2, 4, 6, 8, 10]),
            ScaleDef::new("augmented", "Augmented Triad", &[0, 4, 8]),
            ScaleDef::new("diminished7", "Diminished Seventh", &[0, 3, 6, 9]),
            ScaleDef::new("octatonic_wh", "Whole-Half Octatonic", &[0, 2, 3, 5, 6, 8, 9, 11]),
            ScaleDef::new("octatonic_hw", "Half-Whole Octatonic", &[0, 1, 3, 4, 6, 7, 9, 10]),
            // Pentatonic and blues
            ScaleDef::new("pentatonic_major", "Major Pentatonic", &[0, 2, 4, 7, 9]),
            ScaleDef::new("pentatonic_minor", "Minor Pentatonic", &[0, 3, 5, 7, 10]),
            ScaleDef::new("blues_minor", "Minor Blues", &[0, 3, 5, 6, 7, 10]),
            ScaleDef::new("blues_major", "Major Blues", &[0, 2, 3, 4, 7, 9]),
        ];

        let collections = vec![
            Collection::new("major", "Major", &[0, 2, 4, 5, 7, 9, 11]),
            Collection::new("harmonic_minor", "Harmonic Minor", &[0, 2, 3, 5, 7, 8, 11]),
            Collection::new("melodic_minor", "Melodic Minor", &[0, 2, 3, 5, 7, 9, 11]),
            Collection::new("harmonic_major", "Harmonic Major", &[0, 2, 4, 5, 7, 8, 11]),
            Collection::new("pentatonic", "Pentatonic", &[0, 2, 4, 7, 9]),
            Collection::new("blues", "Blues", &[0, 2, 3, 4, 7, 9]),
            Collection::new("whole_tone", "Whole Tone", &[0, 2, 4, 6, 8, 10]),
            Collection::new("augmented", "Augmented Triad", &[0, 4, 8]),
            Collection::new("diminished7", "Diminished Seventh", &[0, 3, 6, 9]),
            Collection::new("octatonic", "Octatonic", &[0, 2, 3, 5, 6, 8, 9, 11]),
        ];

        let groups = vec![
            ScaleGroup::new(None, &["chromatic"]),
            ScaleGroup::new(
                Some("Major Modes"),
                &["ionian", "dorian", "phrygian", "lydian", "mixolydian", "aeolian", "locrian"],
            ),
            ScaleGroup::new(
                Some("Harmonic Minor"),
                &[
                    "harmonic_minor",
                    "locrian_nat6",
                    "ionian_aug",
                    "dorian_sharp4",
                    "phrygian_dom",
                    "lydian_sharp2",
                    "ultralocrian",
                ],
            ),
            ScaleGroup::new(
                Some("Melodic Minor"),
                &[
                    "melodic_minor",
                    "dorian_b2",
                    "lydian_aug",
                    "lydian_dom",
                    "mixolydian_b6",
                    "locrian_nat2",
                    "altered",
                ],
            ),
            ScaleGroup::new(
                Some("Harmonic Major"),
                &[
                    "harmonic_major",
                    "dorian_b5",
                    "phrygian_b4",
                    "lydian_b3",
                    "mixolydian_b2",
                    "lydian_aug_s2",
                    "locrian_bb7",
                ],
            ),
            ScaleGroup::new(
                Some("Symmetric"),
                &["whole_tone", "augmented", "diminished7", "octatonic_wh", "octatonic_hw"],
            ),
            ScaleGroup::new(
                Some("Other"),
                &["pentatonic_major", "pentatonic_minor", "blues_minor", "blues_major"],
            ),
        ];

        Self { scales, collections, groups }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_shape() {
        let catalog = ScaleCatalog::standard();
        assert_eq!(catalog.scales.len(), 38);
        assert_eq!(catalog.collections.len(), 10);
        assert!(catalog.scale("ionian").is_some());
        assert!(catalog.scale("mixology").is_none());
        assert!(catalog.collection("blues").is_some());
    }

    #[test]
    fn test_groups_reference_known_scales() {
        let catalog = ScaleCatalog::standard();
        for group in &catalog.groups {
            for key in &group.keys {
                assert!(catalog.scale(key).is_some(), "group references {key}");
            }
        }
        // Every scale is reachable from exactly one group
        let grouped: usize = catalog.groups.iter().map(|g| g.keys.len()).sum();
        assert_eq!(grouped, catalog.scales.len());
    }

    #[test]
    fn test_interval_sets_are_normalized() {
        let catalog = ScaleCatalog::standard();
        for scale in &catalog.scales {
            assert_eq!(scale.intervals[0], 0, "{} must start at the root", scale.key);
            assert!(scale.intervals.windows(2).all(|w| w[0] < w[1]));
            assert!(scale.intervals.iter().all(|&i| i < 12));
        }
        for collection in &catalog.collections {
            assert_eq!(collection.intervals[0], 0);
            assert!(collection.intervals.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
