//! Backtracking search for a word chain matching a restriction list.

mod types;

pub use types::*;

use crate::connections::ConnectionGraph;
use crate::restrictions::RestrictionList;
use crate::words::{full_chain_length, OVERLAP};
use log::{debug, trace};
use std::time::Instant;

/// How many nodes pass between wall-clock checks
const TIME_CHECK_INTERVAL: u64 = 256;

/// Chain solver with a configurable search budget
#[derive(Debug, Clone, Default)]
pub struct ChainSolver {
    config: SolverConfig,
}

impl ChainSolver {
    /// Create a new solver with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a solver with custom configuration
    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Find the first chain, in search order, satisfying `restrictions`.
    ///
    /// First words are tried in `words` order; each following word is taken
    /// from the graph's successor list of the previous word, in list order.
    pub fn solve(
        &self,
        graph: &ConnectionGraph,
        words: &[String],
        restrictions: &RestrictionList,
    ) -> Result<ChainSolution, SolveError> {
        self.solve_with_stats(graph, words, restrictions).0
    }

    /// Like [`ChainSolver::solve`], also reporting how much work the search did
    pub fn solve_with_stats(
        &self,
        graph: &ConnectionGraph,
        words: &[String],
        restrictions: &RestrictionList,
    ) -> (Result<ChainSolution, SolveError>, SearchStats) {
        let started = Instant::now();
        let mut stats = SearchStats::default();

        let result = self.prepare(graph, words, restrictions).and_then(|starts| {
            let mut search = Search::new(&self.config, graph, restrictions, &starts, started);
            let found = search.run();
            stats.nodes = search.nodes;
            stats.max_depth = search.max_depth;
            match found {
                Ok(true) => Ok(ChainSolution {
                    words: search
                        .solution
                        .iter()
                        .map(|&idx| graph.word(idx).to_string())
                        .collect(),
                    chain: search.chain.iter().collect(),
                }),
                Ok(false) => Err(SolveError::Unsatisfiable),
                Err(e) => Err(e),
            }
        });

        stats.elapsed = started.elapsed();
        match &result {
            Ok(solution) => debug!(
                "solved with {} words after {} nodes: {}",
                solution.words.len(),
                stats.nodes,
                solution.chain
            ),
            Err(e) => debug!("solve failed after {} nodes: {}", stats.nodes, e),
        }
        (result, stats)
    }

    /// Validate inputs and resolve the starting words to graph indices
    fn prepare(
        &self,
        graph: &ConnectionGraph,
        words: &[String],
        restrictions: &RestrictionList,
    ) -> Result<Vec<usize>, SolveError> {
        let starts = words
            .iter()
            .map(|w| {
                graph
                    .index_of(w)
                    .ok_or_else(|| SolveError::UnknownWord(w.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let target = restrictions.len();
        let max = full_chain_length(words);
        let reachable = match self.config.length_check {
            LengthCheck::Exact => target == max,
            LengthCheck::Bounds => reachable_lengths(graph, &starts)
                .get(target)
                .copied()
                .unwrap_or(false),
        };
        if target == 0 || !reachable {
            let min = match self.config.length_check {
                LengthCheck::Exact => max,
                LengthCheck::Bounds => starts
                    .iter()
                    .map(|&idx| graph.letters(idx).len())
                    .min()
                    .unwrap_or(0),
            };
            return Err(SolveError::LengthMismatch { target, min, max });
        }
        debug!(
            "searching for a chain of {} characters from {} words",
            target,
            starts.len()
        );
        Ok(starts)
    }
}

/// Chain lengths some non-empty subset of `starts` could spell, indexed by length.
///
/// A chain of words `w1..wk` is `2 + Σ(len(wi) - 2)` characters long, so this
/// is a subset sum over the per-word contributions.
fn reachable_lengths(graph: &ConnectionGraph, starts: &[usize]) -> Vec<bool> {
    let mut seen = vec![false; graph.len()];
    let mut sums = vec![true];
    for &idx in starts {
        if std::mem::replace(&mut seen[idx], true) {
            continue;
        }
        let step = graph.letters(idx).len().saturating_sub(OVERLAP);
        let mut next = sums.clone();
        next.resize(sums.len() + step, false);
        for (sum, _) in sums.iter().enumerate().filter(|&(_, &hit)| hit) {
            next[sum + step] = true;
        }
        sums = next;
    }

    let mut lengths = vec![false; sums.len() + OVERLAP];
    for (sum, _) in sums.iter().enumerate().skip(1).filter(|&(_, &hit)| hit) {
        lengths[sum + OVERLAP] = true;
    }
    lengths
}

/// Find the first word chain matching `restrictions` with the default configuration
pub fn solve_chain(
    graph: &ConnectionGraph,
    words: &[String],
    restrictions: &RestrictionList,
) -> Result<ChainSolution, SolveError> {
    ChainSolver::new().solve(graph, words, restrictions)
}

/// Concatenate words, dropping the two overlapping characters at each junction
pub fn chain_string<S: AsRef<str>>(words: &[S]) -> String {
    let mut chain = String::new();
    for (i, word) in words.iter().enumerate() {
        let skip = if i == 0 { 0 } else { OVERLAP };
        chain.extend(word.as_ref().chars().skip(skip));
    }
    chain
}

/// Mutable state of one depth-first search
struct Search<'a> {
    graph: &'a ConnectionGraph,
    restrictions: &'a RestrictionList,
    starts: &'a [usize],
    target: usize,
    max_nodes: Option<u64>,
    deadline: Option<(Instant, std::time::Duration)>,
    used: Vec<bool>,
    chain: Vec<char>,
    solution: Vec<usize>,
    nodes: u64,
    max_depth: usize,
}

impl<'a> Search<'a> {
    fn new(
        config: &SolverConfig,
        graph: &'a ConnectionGraph,
        restrictions: &'a RestrictionList,
        starts: &'a [usize],
        started: Instant,
    ) -> Self {
        Self {
            graph,
            restrictions,
            starts,
            target: restrictions.len(),
            max_nodes: config.max_nodes,
            deadline: config.time_limit.map(|limit| (started, limit)),
            used: vec![false; graph.len()],
            chain: Vec::with_capacity(restrictions.len()),
            solution: Vec::new(),
            nodes: 0,
            max_depth: 0,
        }
    }

    fn run(&mut self) -> Result<bool, SolveError> {
        self.extend()
    }

    /// Try every candidate continuation of the current chain. Returns true as
    /// soon as one reaches the target length; on false the state is restored.
    fn extend(&mut self) -> Result<bool, SolveError> {
        if self.chain.len() == self.target {
            return Ok(true);
        }

        let graph = self.graph;
        let candidates: &'a [usize] = match self.solution.last() {
            None => self.starts,
            Some(&last) => graph.successor_indices(last),
        };

        for &candidate in candidates {
            if self.used[candidate] {
                continue;
            }
            self.charge()?;

            let letters = graph.letters(candidate);
            let added = if self.solution.is_empty() {
                letters
            } else {
                &letters[OVERLAP..]
            };
            let prefix_len = self.chain.len();
            if prefix_len + added.len() > self.target {
                trace!("skip {}: chain would overrun", graph.word(candidate));
                continue;
            }

            self.chain.extend_from_slice(added);
            match self.restrictions.check_from(&self.chain, prefix_len) {
                Ok(()) => {
                    trace!("accept {} at depth {}", graph.word(candidate), self.solution.len());
                    self.used[candidate] = true;
                    self.solution.push(candidate);
                    self.max_depth = self.max_depth.max(self.solution.len());

                    if self.extend()? {
                        return Ok(true);
                    }

                    self.solution.pop();
                    self.used[candidate] = false;
                }
                Err(violation) => {
                    trace!("reject {}: {:?}", graph.word(candidate), violation);
                }
            }
            self.chain.truncate(prefix_len);
        }

        Ok(false)
    }

    /// Count one node against the budget
    fn charge(&mut self) -> Result<(), SolveError> {
        self.nodes += 1;
        if let Some(max) = self.max_nodes {
            if self.nodes > max {
                return Err(SolveError::SearchBudgetExceeded {
                    limit: BudgetLimit::Nodes(max),
                    nodes: self.nodes - 1,
                });
            }
        }
        if let Some((started, limit)) = self.deadline {
            if self.nodes % TIME_CHECK_INTERVAL == 0 && started.elapsed() > limit {
                return Err(SolveError::SearchBudgetExceeded {
                    limit: BudgetLimit::Time(limit),
                    nodes: self.nodes,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connections::build_connections;
    use crate::restrictions::Restriction;
    use std::time::Duration;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    fn fixed(letters: &str) -> RestrictionList {
        letters
            .chars()
            .enumerate()
            .map(|(index, ch)| Restriction {
                index,
                same_as: vec![],
                fixed: if ch == '_' { None } else { Some(ch) },
            })
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn test_two_word_chain() {
        let list = words(&["ABC", "BCD"]);
        let graph = build_connections(&list).unwrap();
        let solution = solve_chain(&graph, &list, &RestrictionList::unconstrained(4)).unwrap();
        assert_eq!(solution.words, list);
        assert_eq!(solution.chain, "ABCD");
    }

    #[test]
    fn test_length_mismatch() {
        let list = words(&["CAT", "ATE"]);
        let graph = build_connections(&list).unwrap();
        assert_eq!(
            solve_chain(&graph, &list, &RestrictionList::unconstrained(3)),
            Err(SolveError::LengthMismatch {
                target: 3,
                min: 4,
                max: 4
            })
        );
    }

    #[test]
    fn test_empty_restrictions() {
        let list = words(&["CAT"]);
        let graph = build_connections(&list).unwrap();
        let solver = ChainSolver::with_config(
            SolverConfig::default().with_length_check(LengthCheck::Bounds),
        );
        assert!(matches!(
            solver.solve(&graph, &list, &RestrictionList::unconstrained(0)),
            Err(SolveError::LengthMismatch { target: 0, .. })
        ));
    }

    #[test]
    fn test_word_order_found_regardless_of_input_order() {
        let list = words(&["LOWER", "HELLO", "ERASE"]);
        let graph = build_connections(&list).unwrap();
        let solution =
            solve_chain(&graph, &list, &RestrictionList::unconstrained(11)).unwrap();
        assert_eq!(solution.words, words(&["HELLO", "LOWER", "ERASE"]));
        assert_eq!(solution.chain, "HELLOWERASE");
    }

    #[test]
    fn test_fixed_letters_steer_the_search() {
        // Both ABXY and ABZY follow XAB; the fixed Z picks the second.
        let list = words(&["XAB", "ABXY", "ABZY"]);
        let graph = build_connections(&list).unwrap();
        let solver = ChainSolver::with_config(
            SolverConfig::default().with_length_check(LengthCheck::Bounds),
        );
        let solution = solver.solve(&graph, &list, &fixed("___Z_")).unwrap();
        assert_eq!(solution.words, words(&["XAB", "ABZY"]));

        let solution = solver.solve(&graph, &list, &fixed("_____")).unwrap();
        assert_eq!(solution.words, words(&["XAB", "ABXY"]));
    }

    #[test]
    fn test_backtracks_out_of_dead_end() {
        // STAR -> ARK leads nowhere; STAR -> ARTS -> TSAR completes.
        let list = words(&["STAR", "ARK", "ARTS", "TSAR"]);
        let graph = build_connections(&list).unwrap();
        let solver = ChainSolver::with_config(
            SolverConfig::default().with_length_check(LengthCheck::Bounds),
        );
        let solution = solver
            .solve(&graph, &list, &RestrictionList::unconstrained(8))
            .unwrap();
        assert_eq!(solution.words, words(&["STAR", "ARTS", "TSAR"]));
        assert_eq!(solution.chain, "STARTSAR");
    }

    #[test]
    fn test_repeat_cell_constraint() {
        // Positions 0 and 3 share a cell, so the chain must start and end alike.
        let list = words(&["ABC", "BCA", "BCD"]);
        let graph = build_connections(&list).unwrap();
        let restrictions = RestrictionList::from(vec![
            Restriction {
                index: 0,
                same_as: vec![3],
                fixed: None,
            },
            Restriction::free(1),
            Restriction::free(2),
            Restriction {
                index: 3,
                same_as: vec![0],
                fixed: None,
            },
        ]);
        let solver = ChainSolver::with_config(
            SolverConfig::default().with_length_check(LengthCheck::Bounds),
        );
        let solution = solver.solve(&graph, &list, &restrictions).unwrap();
        assert_eq!(solution.words, words(&["ABC", "BCA"]));
        assert_eq!(solution.chain, "ABCA");
    }

    #[test]
    fn test_unsatisfiable() {
        let list = words(&["ABC", "XYZ"]);
        let graph = build_connections(&list).unwrap();
        assert_eq!(
            solve_chain(&graph, &list, &RestrictionList::unconstrained(4)),
            Err(SolveError::Unsatisfiable)
        );
    }

    #[test]
    fn test_unsatisfiable_fixed_letter() {
        let list = words(&["ABC", "BCD"]);
        let graph = build_connections(&list).unwrap();
        assert_eq!(
            solve_chain(&graph, &list, &fixed("ABCE")),
            Err(SolveError::Unsatisfiable)
        );
    }

    #[test]
    fn test_unknown_word() {
        let graph = build_connections(&words(&["ABC", "BCD"])).unwrap();
        assert_eq!(
            solve_chain(&graph, &words(&["ABC", "QQQ"]), &RestrictionList::unconstrained(4)),
            Err(SolveError::UnknownWord("QQQ".to_string()))
        );
    }

    #[test]
    fn test_node_budget_is_not_unsatisfiable() {
        let list = words(&["ABC", "XYZ"]);
        let graph = build_connections(&list).unwrap();
        let solver = ChainSolver::with_config(SolverConfig::default().with_max_nodes(Some(1)));
        assert_eq!(
            solver.solve(&graph, &list, &RestrictionList::unconstrained(4)),
            Err(SolveError::SearchBudgetExceeded {
                limit: BudgetLimit::Nodes(1),
                nodes: 1
            })
        );
    }

    #[test]
    fn test_zero_time_limit_aborts_large_search() {
        // Every word chains into every other through "AA", and the fixed
        // last letter can never be met, so the search must give up on time.
        let list: Vec<String> = (0..12)
            .map(|i| format!("AA{}AA", char::from(b'B' + i as u8)))
            .collect();
        let graph = build_connections(&list).unwrap();
        let target = full_chain_length(&list);
        let mut letters = "_".repeat(target - 1);
        letters.push('Z');
        let solver = ChainSolver::with_config(
            SolverConfig::unbounded().with_time_limit(Some(Duration::ZERO)),
        );
        let (result, stats) = solver.solve_with_stats(&graph, &list, &fixed(&letters));
        assert_eq!(
            result,
            Err(SolveError::SearchBudgetExceeded {
                limit: BudgetLimit::Time(Duration::ZERO),
                nodes: TIME_CHECK_INTERVAL
            })
        );
        assert_eq!(stats.nodes, TIME_CHECK_INTERVAL);
    }

    #[test]
    fn test_stats_report_work() {
        let list = words(&["STAR", "ARK", "ARTS", "TSAR"]);
        let graph = build_connections(&list).unwrap();
        let solver = ChainSolver::with_config(
            SolverConfig::default().with_length_check(LengthCheck::Bounds),
        );
        let (result, stats) =
            solver.solve_with_stats(&graph, &list, &RestrictionList::unconstrained(8));
        assert!(result.is_ok());
        assert_eq!(stats.nodes, 4);
        assert_eq!(stats.max_depth, 3);
    }

    #[test]
    fn test_bounds_rejects_unreachable_length() {
        // Lengths 4, 5 and 7 are possible; 6 is not.
        let list = words(&["ABCD", "WXYZV"]);
        let graph = build_connections(&list).unwrap();
        let solver = ChainSolver::with_config(
            SolverConfig::default().with_length_check(LengthCheck::Bounds),
        );
        assert_eq!(
            solver.solve(&graph, &list, &RestrictionList::unconstrained(6)),
            Err(SolveError::LengthMismatch {
                target: 6,
                min: 4,
                max: 7
            })
        );
        assert_eq!(
            solver.solve(&graph, &list, &RestrictionList::unconstrained(7)),
            Err(SolveError::Unsatisfiable)
        );
        let solution = solver
            .solve(&graph, &list, &RestrictionList::unconstrained(5))
            .unwrap();
        assert_eq!(solution.words, words(&["WXYZV"]));
    }

    #[test]
    fn test_reachable_lengths() {
        let list = words(&["ABCD", "WXYZV", "ABC"]);
        let graph = build_connections(&list).unwrap();
        let lengths = reachable_lengths(&graph, &[0, 1, 2, 0]);
        let hits: Vec<usize> = (0..lengths.len()).filter(|&n| lengths[n]).collect();
        assert_eq!(hits, vec![3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_one_sided_repeat_pair_is_enforced() {
        // Only position 0 names its partner; the chain must still honour it.
        let list = words(&["ABC", "BCD"]);
        let graph = build_connections(&list).unwrap();
        let restrictions = RestrictionList::from(vec![
            Restriction {
                index: 0,
                same_as: vec![3],
                fixed: None,
            },
            Restriction::free(1),
            Restriction::free(2),
            Restriction::free(3),
        ]);
        assert_eq!(
            solve_chain(&graph, &list, &restrictions),
            Err(SolveError::Unsatisfiable)
        );
    }

    #[test]
    fn test_chain_string() {
        assert_eq!(chain_string(&["HELLO", "LOWER"]), "HELLOWER");
        assert_eq!(chain_string(&["ABC"]), "ABC");
        assert_eq!(chain_string::<&str>(&[]), "");
    }
}
