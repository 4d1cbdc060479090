//! Command execution against a key/value store

use crate::cli::{Command, LimitArgs, SourceArgs};
use crate::render::{Overlay, Painter};
use anyhow::{bail, Context, Result};
use log::info;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use wordchain_core::{
    Alphabet, Coordinate, GridModel, KeyValueStore, Puzzle, PuzzleError, PuzzleSolution,
    SavedPuzzle, SolveError, WordList,
};

/// How a command finished, mapped onto the process exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// The search finished without finding a chain
    Unsatisfiable,
    /// The node or time budget ran out first
    BudgetExceeded,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Done => ExitCode::SUCCESS,
            Outcome::Unsatisfiable => ExitCode::from(2),
            Outcome::BudgetExceeded => ExitCode::from(3),
        }
    }
}

/// Machine-readable solve result
#[derive(Debug, Serialize)]
struct SolveReport<'a> {
    start: Coordinate,
    path: &'a [Coordinate],
    words: &'a [String],
    chain: &'a str,
    nodes: u64,
}

pub struct App<S: KeyValueStore> {
    store: S,
    alphabet: Alphabet,
    painter: Painter,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(store: S, alphabet: Alphabet, painter: Painter) -> Self {
        Self {
            store,
            alphabet,
            painter,
        }
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn run<W: Write>(&mut self, command: &Command, out: &mut W) -> Result<Outcome> {
        match command {
            Command::Save { grid, words } => self.save(grid, words, out),
            Command::Show => self.show(out),
            Command::Clear => self.clear(out),
            Command::Path { start, source } => self.path(*start, source, out),
            Command::Solve {
                start,
                source,
                limits,
                json,
            } => self.solve(*start, source, limits, *json, out),
        }
    }

    fn save<W: Write>(&mut self, grid: &Path, words: &Path, out: &mut W) -> Result<Outcome> {
        let grid = read_grid(grid)?;
        let words = read_words(words, &self.alphabet)?;

        SavedPuzzle::new(grid.clone(), words.to_text())
            .save(&mut self.store)
            .context("failed to write the store")?;
        info!("saved {} cells and {} words", grid.len(), words.len());

        self.painter.success(
            out,
            &format!(
                "Saved {} marked cells and {} words",
                grid.len(),
                words.len()
            ),
        )?;
        Ok(Outcome::Done)
    }

    fn show<W: Write>(&mut self, out: &mut W) -> Result<Outcome> {
        let saved = self.load_saved()?;
        let (width, height) = saved.grid.dimensions();
        self.painter
            .info(out, &format!("Grid {}x{}, {} marked cells:", width, height, saved.grid.len()))?;
        self.painter.grid(out, &saved.grid, Overlay::Plain)?;

        let words: Vec<&str> = saved.words.lines().filter(|w| !w.trim().is_empty()).collect();
        self.painter.info(out, &format!("Words ({}):", words.len()))?;
        for word in words {
            writeln!(out, "{}", word)?;
        }
        Ok(Outcome::Done)
    }

    fn clear<W: Write>(&mut self, out: &mut W) -> Result<Outcome> {
        SavedPuzzle::clear(&mut self.store).context("failed to clear the store")?;
        self.painter.success(out, "Cleared saved puzzle")?;
        Ok(Outcome::Done)
    }

    fn path<W: Write>(
        &mut self,
        start: Coordinate,
        source: &SourceArgs,
        out: &mut W,
    ) -> Result<Outcome> {
        let puzzle = self.puzzle(start, source)?;
        let path = puzzle.derive_path()?;
        self.painter.path(out, &path)?;
        self.painter.grid(out, &puzzle.grid, Overlay::Order(&path))?;
        Ok(Outcome::Done)
    }

    fn solve<W: Write>(
        &mut self,
        start: Coordinate,
        source: &SourceArgs,
        limits: &LimitArgs,
        json: bool,
        out: &mut W,
    ) -> Result<Outcome> {
        let puzzle = self.puzzle(start, source)?;
        let config = limits.to_config();
        info!("solving from {} with {:?}", start, config);

        let solved = match puzzle.solve(&config, &self.alphabet) {
            Ok(solved) => solved,
            Err(PuzzleError::Solve(SolveError::Unsatisfiable)) => {
                self.painter.error(out, "No chain of these words fits the path")?;
                return Ok(Outcome::Unsatisfiable);
            }
            Err(PuzzleError::Solve(e @ SolveError::SearchBudgetExceeded { .. })) => {
                self.painter.error(out, &e.to_string())?;
                return Ok(Outcome::BudgetExceeded);
            }
            Err(e) => return Err(e.into()),
        };

        if json {
            write_report(out, start, &solved)?;
        } else {
            self.painter.solution(out, &solved)?;
            self.painter.grid(out, &puzzle.grid, Overlay::Solution(&solved))?;
        }
        Ok(Outcome::Done)
    }

    fn load_saved(&self) -> Result<SavedPuzzle> {
        match SavedPuzzle::load(&self.store).context("failed to read the store")? {
            Some(saved) => Ok(saved),
            None => bail!("no saved puzzle; run `wordchain save` first"),
        }
    }

    /// Grid and words from the given files, falling back to the store for whatever is missing
    fn puzzle(&self, start: Coordinate, source: &SourceArgs) -> Result<Puzzle> {
        let grid = match &source.grid {
            Some(path) => read_grid(path)?,
            None => self.load_saved()?.grid,
        };
        let words = match &source.words {
            Some(path) => fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?,
            None => self.load_saved()?.words,
        };
        Ok(Puzzle::new(grid, words, start))
    }
}

fn read_grid(path: &Path) -> Result<GridModel> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    GridModel::from_text(&text).with_context(|| format!("invalid grid in {}", path.display()))
}

fn read_words(path: &Path, alphabet: &Alphabet) -> Result<WordList> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    WordList::parse(&text, alphabet).with_context(|| format!("invalid word list in {}", path.display()))
}

fn write_report<W: Write>(out: &mut W, start: Coordinate, solved: &PuzzleSolution) -> Result<()> {
    let report = SolveReport {
        start,
        path: solved.path.cells(),
        words: &solved.solution.words,
        chain: &solved.solution.chain,
        nodes: solved.stats.nodes,
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}
