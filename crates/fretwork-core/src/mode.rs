//! Mode rotation and scale resolution
//!
//! A mode is a rotation of a parent collection: re-base the interval set on
//! one of its own degrees. Resolution recovers the opposite direction: given
//! an already-rotated interval set, find which collection and degree produced
//! it, so positions can be numbered by parent-scale degree.

use serde::{Deserialize, Serialize};

use crate::catalog::{Collection, ScaleCatalog};
use crate::error::{FretworkError, Result};

/// Rotate a collection's intervals so `intervals[degree]` becomes the new root.
///
/// The result is re-sorted ascending, always contains 0, and has the same
/// cardinality as the input.
///
/// # Example
/// ```
/// use fretwork_core::mode_intervals;
/// // Major rotated to its sixth degree is the natural minor scale
/// let aeolian = mode_intervals(&[0, 2, 4, 5, 7, 9, 11], 5);
/// assert_eq!(aeolian, vec![0, 2, 3, 5, 7, 8, 10]);
/// ```
pub fn mode_intervals(intervals: &[u8], degree: usize) -> Vec<u8> {
    let base = intervals[degree % intervals.len()];
    let mut out: Vec<u8> = intervals.iter().map(|&i| (i + 12 - base) % 12).collect();
    out.sort_unstable();
    out
}

/// One distinct rotation of a collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mode {
    /// Degree index into the parent collection
    pub degree: usize,
    pub intervals: Vec<u8>,
}

/// Enumerate a collection's distinct modes in degree order.
///
/// Symmetric collections (augmented triad, diminished seventh, octatonic)
/// produce identical rotations at different degrees; only the lowest degree
/// of each distinct set is kept.
pub fn enumerate_modes(collection: &Collection) -> Vec<Mode> {
    let mut modes: Vec<Mode> = Vec::new();
    for degree in 0..collection.intervals.len() {
        let intervals = mode_intervals(&collection.intervals, degree);
        if modes.iter().any(|m| m.intervals == intervals) {
            continue;
        }
        modes.push(Mode { degree, intervals });
    }
    modes
}

/// The unrotated scale a mode came from, anchored at the root that makes the
/// rotation land on the current root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentScale {
    pub collection_key: String,
    /// Root pitch class of the parent in root position
    pub root: u8,
    /// Unrotated parent interval list
    pub intervals: Vec<u8>,
    /// Degree of the parent that the current mode is built on
    pub degree: usize,
}

/// A scale selection resolved against a catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedScale {
    pub key: String,
    pub name: String,
    /// Current root pitch class
    pub root: u8,
    /// Mode intervals relative to the current root
    pub intervals: Vec<u8>,
    /// None when no collection produces this set (chromatic)
    pub parent: Option<ParentScale>,
}

impl ResolvedScale {
    pub fn cardinality(&self) -> usize {
        self.intervals.len()
    }
}

/// Find which collection and degree produce the given interval set.
///
/// Straightforward enumeration: rotate every collection at every degree and
/// compare as sets. First match wins.
pub fn find_parent(catalog: &ScaleCatalog, intervals: &[u8], root: u8) -> Option<ParentScale> {
    let mut target = intervals.to_vec();
    target.sort_unstable();
    target.dedup();

    for collection in &catalog.collections {
        for degree in 0..collection.intervals.len() {
            if mode_intervals(&collection.intervals, degree) == target {
                return Some(ParentScale {
                    collection_key: collection.key.clone(),
                    root: (root + 12 - collection.intervals[degree]) % 12,
                    intervals: collection.intervals.clone(),
                    degree,
                });
            }
        }
    }
    None
}

/// Resolve a flat scale key (e.g. "dorian") at the given root
pub fn resolve_key(catalog: &ScaleCatalog, key: &str, root: u8) -> Result<ResolvedScale> {
    let scale = catalog
        .scale(key)
        .ok_or_else(|| FretworkError::UnknownScale(key.to_string()))?;
    Ok(ResolvedScale {
        key: scale.key.clone(),
        name: scale.name.clone(),
        root: root % 12,
        intervals: scale.intervals.clone(),
        parent: find_parent(catalog, &scale.intervals, root % 12),
    })
}

/// Resolve a (collection, degree) selection at the given root
pub fn resolve_degree(
    catalog: &ScaleCatalog,
    collection_key: &str,
    degree: usize,
    root: u8,
) -> Result<ResolvedScale> {
    let collection = catalog
        .collection(collection_key)
        .ok_or_else(|| FretworkError::UnknownCollection(collection_key.to_string()))?;
    let root = root % 12;
    let degree = degree % collection.intervals.len();
    let intervals = mode_intervals(&collection.intervals, degree);

    // Reuse the flat entry's display name when one matches this rotation
    let (key, name) = match catalog.scales.iter().find(|s| s.intervals == intervals) {
        Some(s) => (s.key.clone(), s.name.clone()),
        None => (
            format!("{}_mode{}", collection.key, degree + 1),
            format!("{} (mode {})", collection.name, degree + 1),
        ),
    };

    Ok(ResolvedScale {
        key,
        name,
        root,
        intervals,
        parent: Some(ParentScale {
            collection_key: collection.key.clone(),
            root: (root + 12 - collection.intervals[degree]) % 12,
            intervals: collection.intervals.clone(),
            degree,
        }),
    })
}
