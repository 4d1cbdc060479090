//! Full solve pipeline: words, path, connections, restrictions, chain.

use crate::connections::{build_connections, GraphError};
use crate::grid::{Coordinate, GridModel};
use crate::path::{derive_path, Path, PathError};
use crate::restrictions::{extract_restrictions, RestrictionList};
use crate::solver::{ChainSolution, ChainSolver, SearchStats, SolveError, SolverConfig};
use crate::words::{Alphabet, WordError, WordList};
use log::debug;
use std::collections::HashMap;
use thiserror::Error;

/// Any failure along the solve pipeline
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    #[error(transparent)]
    Words(#[from] WordError),
    #[error(transparent)]
    Path(#[from] PathError),
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error(transparent)]
    Solve(#[from] SolveError),
}

/// A grid, its word list and the chosen start cell
#[derive(Debug, Clone)]
pub struct Puzzle {
    pub grid: GridModel,
    /// Raw newline-delimited word list
    pub words: String,
    pub start: Coordinate,
}

/// Result of a successful solve
#[derive(Debug, Clone)]
pub struct PuzzleSolution {
    pub path: Path,
    pub restrictions: RestrictionList,
    pub solution: ChainSolution,
    pub stats: SearchStats,
}

impl PuzzleSolution {
    /// Letter the chain places on `coord`, if the path visits it
    pub fn letter_at(&self, coord: Coordinate) -> Option<char> {
        let index = self.path.iter().position(|&c| c == coord)?;
        self.solution.chain.chars().nth(index)
    }

    /// Letter for every visited cell
    pub fn letters(&self) -> HashMap<Coordinate, char> {
        self.path
            .iter()
            .copied()
            .zip(self.solution.chain.chars())
            .collect()
    }
}

impl Puzzle {
    pub fn new(grid: GridModel, words: impl Into<String>, start: Coordinate) -> Self {
        Self {
            grid,
            words: words.into(),
            start,
        }
    }

    pub fn derive_path(&self) -> Result<Path, PathError> {
        derive_path(&self.grid, self.start)
    }

    /// Run the whole pipeline
    pub fn solve(
        &self,
        config: &SolverConfig,
        alphabet: &Alphabet,
    ) -> Result<PuzzleSolution, PuzzleError> {
        let words = WordList::parse(&self.words, alphabet)?;
        let path = self.derive_path()?;
        let graph = build_connections(words.words())?;
        let restrictions = extract_restrictions(&path, &self.grid);

        let solver = ChainSolver::with_config(config.clone());
        let (result, stats) = solver.solve_with_stats(&graph, words.words(), &restrictions);
        debug!(
            "solve took {:?} over {} nodes, max depth {}",
            stats.elapsed, stats.nodes, stats.max_depth
        );

        Ok(PuzzleSolution {
            path,
            restrictions,
            solution: result?,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solve_snake() {
        // HELL along the top, then down and back along the bottom row with a fixed W.
        let grid = GridModel::from_text("####\n...#\n.##W\n").unwrap();
        let puzzle = Puzzle::new(grid, "lower\nhello", Coordinate::new(0, 0));
        let solved = puzzle
            .solve(&SolverConfig::default(), &Alphabet::latin())
            .unwrap();
        assert_eq!(solved.solution.words, vec!["HELLO", "LOWER"]);
        assert_eq!(solved.solution.chain, "HELLOWER");
        assert_eq!(solved.letter_at(Coordinate::new(3, 2)), Some('W'));
        assert_eq!(solved.letter_at(Coordinate::new(2, 2)), Some('E'));
        assert_eq!(solved.letter_at(Coordinate::new(0, 2)), None);
        assert_eq!(solved.letters().len(), 8);
    }

    #[test]
    fn test_pipeline_errors_are_wrapped() {
        let grid = GridModel::from_text("###\n").unwrap();
        let alphabet = Alphabet::latin();
        let config = SolverConfig::default();

        let puzzle = Puzzle::new(grid.clone(), "", Coordinate::new(0, 0));
        assert_eq!(
            puzzle.solve(&config, &alphabet).unwrap_err(),
            PuzzleError::Words(WordError::Empty)
        );

        let puzzle = Puzzle::new(grid.clone(), "ABC", Coordinate::new(1, 0));
        assert!(matches!(
            puzzle.solve(&config, &alphabet),
            Err(PuzzleError::Path(PathError::InvalidStart { .. }))
        ));

        let puzzle = Puzzle::new(grid.clone(), "ABC\nABC", Coordinate::new(0, 0));
        assert!(matches!(
            puzzle.solve(&config, &alphabet),
            Err(PuzzleError::Graph(GraphError::DuplicateWord(_)))
        ));

        let puzzle = Puzzle::new(grid, "ABC\nBCD", Coordinate::new(0, 0));
        assert!(matches!(
            puzzle.solve(&config, &alphabet),
            Err(PuzzleError::Solve(SolveError::LengthMismatch { .. }))
        ));
    }
}
