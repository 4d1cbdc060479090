//! Grid and result printing with crossterm styling.
//!
//! Everything writes to a generic `Write` so output can be captured in tests.

use crate::theme::Theme;
use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use std::io::{self, Write};
use wordchain_core::{Coordinate, GridModel, Path, PuzzleSolution, SearchStats};

/// What to draw on top of the grid cells
#[derive(Debug, Clone, Copy)]
pub enum Overlay<'a> {
    /// Marked cells and fixed letters only
    Plain,
    /// Visit order of each path cell (first visit, base 36)
    Order(&'a Path),
    /// Letters placed by a solved chain
    Solution(&'a PuzzleSolution),
}

/// Styled writer for grids and messages
#[derive(Debug, Clone)]
pub struct Painter {
    theme: Theme,
    color: bool,
}

impl Painter {
    pub fn new(theme: Theme, color: bool) -> Self {
        Self { theme, color }
    }

    /// No escape sequences at all
    pub fn plain() -> Self {
        Self::new(Theme::default(), false)
    }

    fn paint<W: Write>(&self, out: &mut W, text: &str, color: Color) -> io::Result<()> {
        if self.color {
            queue!(out, SetForegroundColor(color), Print(text), ResetColor)
        } else {
            out.write_all(text.as_bytes())
        }
    }

    pub fn info<W: Write>(&self, out: &mut W, text: &str) -> io::Result<()> {
        self.paint(out, text, self.theme.info)?;
        writeln!(out)
    }

    pub fn success<W: Write>(&self, out: &mut W, text: &str) -> io::Result<()> {
        self.paint(out, text, self.theme.success)?;
        writeln!(out)
    }

    pub fn error<W: Write>(&self, out: &mut W, text: &str) -> io::Result<()> {
        self.paint(out, text, self.theme.error)?;
        writeln!(out)
    }

    /// Print the grid, one character per cell separated by spaces
    pub fn grid<W: Write>(&self, out: &mut W, grid: &GridModel, overlay: Overlay) -> io::Result<()> {
        let (width, height) = grid.dimensions();
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                if x > 0 {
                    out.write_all(b" ")?;
                }
                let (ch, color) = self.cell(grid, Coordinate::new(x, y), overlay);
                self.paint(out, ch.encode_utf8(&mut [0; 4]), color)?;
            }
            writeln!(out)?;
        }
        out.flush()
    }

    fn cell(&self, grid: &GridModel, coord: Coordinate, overlay: Overlay) -> (char, Color) {
        if !grid.is_marked(coord) {
            return ('.', self.theme.empty);
        }
        let fixed = grid.letter(coord);

        match overlay {
            Overlay::Plain => match fixed {
                Some(letter) => (letter, self.theme.fixed),
                None => ('#', self.theme.marked),
            },
            Overlay::Order(path) => match path.positions_of(coord).as_slice() {
                [] => (fixed.unwrap_or('#'), self.theme.marked),
                [first] => (order_digit(*first), self.theme.order),
                [first, ..] => (order_digit(*first), self.theme.crossing),
            },
            Overlay::Solution(solved) => {
                let visits = solved.path.positions_of(coord).len();
                match (solved.letter_at(coord), fixed) {
                    (None, Some(letter)) => (letter, self.theme.fixed),
                    (None, None) => ('#', self.theme.marked),
                    (Some(letter), Some(_)) => (letter, self.theme.fixed),
                    (Some(letter), None) if visits > 1 => (letter, self.theme.crossing),
                    (Some(letter), None) => (letter, self.theme.solved),
                }
            }
        }
    }

    /// `0,2 -> 1,2 -> ...`
    pub fn path<W: Write>(&self, out: &mut W, path: &Path) -> io::Result<()> {
        let cells: Vec<String> = path.iter().map(|c| c.to_string()).collect();
        self.info(out, &format!("Path ({} cells):", path.len()))?;
        writeln!(out, "{}", cells.join(" -> "))
    }

    /// Words, chain string and search statistics
    pub fn solution<W: Write>(&self, out: &mut W, solved: &PuzzleSolution) -> io::Result<()> {
        self.success(out, &format!("Chain: {}", solved.solution.chain))?;
        writeln!(out, "Words: {}", solved.solution.words.join(", "))?;
        self.stats(out, &solved.stats)
    }

    pub fn stats<W: Write>(&self, out: &mut W, stats: &SearchStats) -> io::Result<()> {
        self.info(
            out,
            &format!(
                "Searched {} nodes (depth {}) in {} ms",
                stats.nodes,
                stats.max_depth,
                stats.elapsed.as_millis()
            ),
        )
    }
}

/// 0-9 then a-z, wrapping after 36 cells
fn order_digit(index: usize) -> char {
    std::char::from_digit((index % 36) as u32, 36).unwrap_or('?')
}
