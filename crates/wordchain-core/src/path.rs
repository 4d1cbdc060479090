//! Path derivation: walks the marked cells from a start cell, going straight
//! wherever possible and turning only when the cell ahead is unmarked.

use crate::grid::{Coordinate, Direction, GridModel};
use log::debug;
use serde::{Deserialize, Serialize};
use std::ops::Index;
use thiserror::Error;

/// Errors raised while deriving a path
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("start cell {0} is not marked")]
    UnmarkedStart(Coordinate),
    #[error("start cell {at} must have exactly one marked neighbour, found {neighbours}")]
    InvalidStart { at: Coordinate, neighbours: usize },
    #[error("cannot continue the walk at {at}: {neighbours} marked neighbours")]
    AmbiguousTopology { at: Coordinate, neighbours: usize },
}

/// Ordered walk through marked cells. A cell may occur more than once when
/// the walk crosses itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path(Vec<Coordinate>);

impl Path {
    pub fn cells(&self) -> &[Coordinate] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a derived path, which holds at least the start cell
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn start(&self) -> Option<Coordinate> {
        self.0.first().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coordinate> {
        self.0.iter()
    }

    /// Every index at which `coord` is visited
    pub fn positions_of(&self, coord: Coordinate) -> Vec<usize> {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, &c)| c == coord)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn into_vec(self) -> Vec<Coordinate> {
        self.0
    }
}

impl From<Vec<Coordinate>> for Path {
    fn from(cells: Vec<Coordinate>) -> Self {
        Path(cells)
    }
}

impl Index<usize> for Path {
    type Output = Coordinate;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

/// Derive the walk starting at `start`.
///
/// The start cell needs exactly one marked neighbour, which fixes the initial
/// direction. The walker then keeps its direction while the cell ahead is
/// marked. When blocked it looks at the current cell's marked neighbours:
/// one neighbour (the cell it came from) ends the walk, two neighbours turn
/// it toward the one it did not come from, anything else is an error.
/// Cells are never marked visited, so self-crossing paths revisit cells.
pub fn derive_path(grid: &GridModel, start: Coordinate) -> Result<Path, PathError> {
    if !grid.is_marked(start) {
        return Err(PathError::UnmarkedStart(start));
    }

    let initial = grid.marked_directions(start);
    let mut direction = match initial.as_slice() {
        [only] => *only,
        _ => {
            return Err(PathError::InvalidStart {
                at: start,
                neighbours: initial.len(),
            })
        }
    };

    let mut current = start;
    let mut cells = vec![start];

    loop {
        let ahead = current.step(direction);
        if grid.is_marked(ahead) {
            cells.push(ahead);
            current = ahead;
            continue;
        }

        let neighbours = grid.marked_directions(current);
        match neighbours.len() {
            1 => break,
            2 => direction = turn(current, direction, &neighbours)?,
            n => {
                return Err(PathError::AmbiguousTopology {
                    at: current,
                    neighbours: n,
                })
            }
        }
    }

    debug!("derived path of {} cells from {}", cells.len(), start);
    Ok(Path(cells))
}

/// Pick the side exit at a corner. One of the two neighbours must be the cell
/// the walker arrived from.
fn turn(at: Coordinate, heading: Direction, neighbours: &[Direction]) -> Result<Direction, PathError> {
    let back = heading.opposite();
    if !neighbours.contains(&back) {
        return Err(PathError::AmbiguousTopology {
            at,
            neighbours: neighbours.len(),
        });
    }
    neighbours
        .iter()
        .copied()
        .find(|&d| d != back)
        .ok_or(PathError::AmbiguousTopology {
            at,
            neighbours: neighbours.len(),
        })
}
