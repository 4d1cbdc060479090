//! Word-chain crossword engine.
//!
//! A puzzle is a set of marked grid cells threaded by a single path, plus a
//! word list. Words overlap by two characters at each junction; the resulting
//! chain string must fit the path, agree with every fixed letter, and put the
//! same letter wherever the path crosses itself.
//!
//! ```
//! use wordchain_core::{build_connections, solve_chain, RestrictionList};
//!
//! let words = vec!["ABC".to_string(), "BCD".to_string()];
//! let graph = build_connections(&words).unwrap();
//! let solution = solve_chain(&graph, &words, &RestrictionList::unconstrained(4)).unwrap();
//! assert_eq!(solution.chain, "ABCD");
//! ```

pub mod connections;
pub mod grid;
pub mod path;
pub mod persist;
pub mod puzzle;
pub mod restrictions;
pub mod solver;
pub mod words;


pub use connections::{build_connections, ConnectionGraph, GraphError};
pub use grid::{Coordinate, CoordinateParseError, Direction, GridModel, GridParseError};
pub use path::{derive_path, Path, PathError};
pub use persist::{KeyValueStore, MemoryStore, PersistError, PersistResult, SavedPuzzle};
pub use puzzle::{Puzzle, PuzzleError, PuzzleSolution};
pub use restrictions::{extract_restrictions, Restriction, RestrictionList, Violation};
pub use solver::{
    chain_string, solve_chain, BudgetLimit, ChainSolution, ChainSolver, LengthCheck,
    SearchStats, SolveError, SolverConfig,
};
pub use words::{full_chain_length, Alphabet, WordError, WordList, MIN_WORD_LEN, OVERLAP};
