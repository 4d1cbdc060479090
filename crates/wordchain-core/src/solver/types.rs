use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Default cap on candidate extensions explored by one solve
pub const DEFAULT_MAX_NODES: u64 = 5_000_000;

/// How the target chain length is checked against the word list before searching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LengthCheck {
    /// The chain must use every word: target == sum of lengths - 2 * (words - 1)
    #[default]
    Exact,
    /// Any target between the shortest word and the full chain is accepted,
    /// so solutions may use a subset of the words
    Bounds,
}

/// Configuration for the chain solver
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Maximum number of candidate extensions to try (None = unlimited)
    pub max_nodes: Option<u64>,
    /// Wall-clock limit for one solve (None = unlimited)
    pub time_limit: Option<Duration>,
    /// Length precondition applied before searching
    pub length_check: LengthCheck,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_nodes: Some(DEFAULT_MAX_NODES),
            time_limit: None,
            length_check: LengthCheck::Exact,
        }
    }
}

impl SolverConfig {
    /// No node or time limit
    pub fn unbounded() -> Self {
        Self {
            max_nodes: None,
            time_limit: None,
            ..Self::default()
        }
    }

    pub fn with_max_nodes(mut self, max_nodes: Option<u64>) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    pub fn with_time_limit(mut self, time_limit: Option<Duration>) -> Self {
        self.time_limit = time_limit;
        self
    }

    pub fn with_length_check(mut self, length_check: LengthCheck) -> Self {
        self.length_check = length_check;
        self
    }
}

/// Which search budget ran out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetLimit {
    Nodes(u64),
    Time(Duration),
}

impl fmt::Display for BudgetLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BudgetLimit::Nodes(n) => write!(f, "{} nodes", n),
            BudgetLimit::Time(d) => write!(f, "{} ms", d.as_millis()),
        }
    }
}

/// Errors from the chain solver
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// The path length cannot be produced from this word list
    #[error("a chain of {target} characters is not reachable (word list allows {min}..={max})")]
    LengthMismatch { target: usize, min: usize, max: usize },
    /// The search finished without finding a chain
    #[error("no chain of words satisfies the restrictions")]
    Unsatisfiable,
    /// The search was stopped before it could finish
    #[error("search budget of {limit} exceeded after {nodes} nodes")]
    SearchBudgetExceeded { limit: BudgetLimit, nodes: u64 },
    /// A starting word is missing from the connection graph
    #[error("word `{0}` is not in the connection graph")]
    UnknownWord(String),
}

/// An ordered word chain and the string it spells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainSolution {
    pub words: Vec<String>,
    pub chain: String,
}

impl ChainSolution {
    /// Length of the chain string in characters
    pub fn chain_len(&self) -> usize {
        self.chain.chars().count()
    }
}

/// Work done by one solve attempt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Candidate extensions tried
    pub nodes: u64,
    /// Deepest chain reached, in words
    pub max_depth: usize,
    pub elapsed: Duration,
}
