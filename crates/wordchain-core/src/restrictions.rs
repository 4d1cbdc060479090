//! Per-position constraints on the chain string, derived from a path.

use crate::grid::{Coordinate, GridModel};
use crate::path::Path;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Constraint on one position of the chain string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restriction {
    /// Position in the chain string
    pub index: usize,
    /// Other positions that land on the same cell and must hold the same character
    pub same_as: Vec<usize>,
    /// Letter fixed by the grid at this position
    pub fixed: Option<char>,
}

impl Restriction {
    pub fn free(index: usize) -> Self {
        Self {
            index,
            same_as: Vec::new(),
            fixed: None,
        }
    }

    pub fn is_free(&self) -> bool {
        self.same_as.is_empty() && self.fixed.is_none()
    }
}

/// Why a chain prefix was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// `found` sits where the grid fixes `expected`
    FixedLetter {
        index: usize,
        expected: char,
        found: char,
    },
    /// Two positions on the same cell disagree
    Mismatch { index: usize, other: usize },
}

/// One restriction per path position.
///
/// Always normalized: `index` matches the position in the list and every
/// `same_as` pair is listed from both ends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Restriction>")]
pub struct RestrictionList(Vec<Restriction>);

impl RestrictionList {
    /// `len` positions with no constraints at all
    pub fn unconstrained(len: usize) -> Self {
        Self((0..len).map(Restriction::free).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Restriction> {
        self.0.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Restriction> {
        self.0.iter()
    }

    /// Check positions `from..chain.len()` of a chain prefix.
    ///
    /// Pairs reaching past the end of the prefix are deferred. Positions
    /// before `from` are assumed to have been checked already; any pair with
    /// one end in the new range is found from that end.
    pub fn check_from(&self, chain: &[char], from: usize) -> Result<(), Violation> {
        let end = chain.len().min(self.0.len());
        for index in from..end {
            let restriction = &self.0[index];
            let ch = chain[index];
            if let Some(expected) = restriction.fixed {
                if expected != ch {
                    return Err(Violation::FixedLetter {
                        index,
                        expected,
                        found: ch,
                    });
                }
            }
            if let Some(&other) = restriction
                .same_as
                .iter()
                .find(|&&other| other < end && chain[other] != ch)
            {
                return Err(Violation::Mismatch { index, other });
            }
        }
        Ok(())
    }

    /// Check every position covered by `chain`
    pub fn check(&self, chain: &[char]) -> Result<(), Violation> {
        self.check_from(chain, 0)
    }

    /// Whether `chain` has exactly the right length and meets every restriction
    pub fn is_satisfied_by(&self, chain: &str) -> bool {
        let chars: Vec<char> = chain.chars().collect();
        chars.len() == self.len() && self.check(&chars).is_ok()
    }
}

impl From<Vec<Restriction>> for RestrictionList {
    /// Renumbers `index` to the list position, drops self and out-of-range
    /// partners, and mirrors every pair onto its other end.
    fn from(mut restrictions: Vec<Restriction>) -> Self {
        let len = restrictions.len();
        let mut partners: Vec<Vec<usize>> = vec![Vec::new(); len];
        for (index, restriction) in restrictions.iter_mut().enumerate() {
            if restriction.index != index {
                debug!(
                    "restriction at position {} claimed index {}",
                    index, restriction.index
                );
                restriction.index = index;
            }
            for &other in &restriction.same_as {
                if other < len && other != index {
                    partners[index].push(other);
                    partners[other].push(index);
                }
            }
        }
        for (restriction, mut same_as) in restrictions.iter_mut().zip(partners) {
            same_as.sort_unstable();
            same_as.dedup();
            restriction.same_as = same_as;
        }
        Self(restrictions)
    }
}

/// Build the restriction list for `path`: repeat-cell pairs plus any fixed
/// letter the grid holds at each visited cell.
pub fn extract_restrictions(path: &Path, grid: &GridModel) -> RestrictionList {
    let mut visits: HashMap<Coordinate, Vec<usize>> = HashMap::new();
    for (index, &coord) in path.iter().enumerate() {
        visits.entry(coord).or_default().push(index);
    }

    path.iter()
        .enumerate()
        .map(|(index, &coord)| Restriction {
            index,
            same_as: visits[&coord]
                .iter()
                .copied()
                .filter(|&other| other != index)
                .collect(),
            fixed: grid.letter(coord),
        })
        .collect::<Vec<_>>()
        .into()
}
