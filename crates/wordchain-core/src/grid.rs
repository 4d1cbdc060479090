//! Grid model: a sparse set of marked cells, each optionally holding a fixed letter.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A cell coordinate. `x` grows to the right, `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring coordinate one step in `direction`
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Whether `other` is exactly one axis-aligned step away
    pub fn is_adjacent(self, other: Coordinate) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }
}

// Row-major ordering so that grids iterate and persist top-to-bottom.
impl Ord for Coordinate {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Coordinate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Failure to parse a `"x,y"` coordinate key
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid coordinate `{0}`, expected `x,y`")]
pub struct CoordinateParseError(pub String);

impl FromStr for Coordinate {
    type Err = CoordinateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || CoordinateParseError(s.to_string());
        let (x, y) = s.split_once(',').ok_or_else(err)?;
        let x = x.trim().parse().map_err(|_| err())?;
        let y = y.trim().parse().map_err(|_| err())?;
        Ok(Self::new(x, y))
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// One of the four axis-aligned unit steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Down,
    Right,
    Up,
    Left,
}

impl Direction {
    /// Probe order used whenever neighbours are listed
    pub const ALL: [Direction; 4] = [
        Direction::Down,
        Direction::Right,
        Direction::Up,
        Direction::Left,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Down => (0, 1),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Left => (-1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Down => Direction::Up,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Left => Direction::Right,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Down => write!(f, "down"),
            Direction::Right => write!(f, "right"),
            Direction::Up => write!(f, "up"),
            Direction::Left => write!(f, "left"),
        }
    }
}

/// Failure to read a grid from its text form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridParseError {
    #[error("grid text contains no marked cells")]
    Empty,
    #[error("grid is too large to address (row {row}, column {col})")]
    TooLarge { row: usize, col: usize },
}

/// Marked cells of a puzzle grid.
///
/// Presence of a key means the cell is marked and traversable. The value is the
/// fixed letter for that cell, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridModel {
    cells: BTreeMap<Coordinate, Option<char>>,
    dimensions: Option<(usize, usize)>,
}

impl GridModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty grid with explicit display dimensions
    pub fn with_dimensions(width: usize, height: usize) -> Self {
        Self {
            cells: BTreeMap::new(),
            dimensions: Some((width, height)),
        }
    }

    /// Mark a cell, keeping any letter it already has
    pub fn mark(&mut self, coord: Coordinate) {
        self.cells.entry(coord).or_insert(None);
    }

    /// Mark a cell and fix its letter (stored upper-cased)
    pub fn set_letter(&mut self, coord: Coordinate, letter: char) {
        let letter = letter.to_uppercase().next().unwrap_or(letter);
        self.cells.insert(coord, Some(letter));
    }

    /// Remove the fixed letter but keep the cell marked
    pub fn clear_letter(&mut self, coord: Coordinate) {
        if let Some(slot) = self.cells.get_mut(&coord) {
            *slot = None;
        }
    }

    pub fn unmark(&mut self, coord: Coordinate) {
        self.cells.remove(&coord);
    }

    pub fn is_marked(&self, coord: Coordinate) -> bool {
        self.cells.contains_key(&coord)
    }

    /// Fixed letter of a marked cell
    pub fn letter(&self, coord: Coordinate) -> Option<char> {
        self.cells.get(&coord).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Marked cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, Option<char>)> + '_ {
        self.cells.iter().map(|(&c, &l)| (c, l))
    }

    /// Directions from `coord` that lead to a marked cell, in probe order
    pub fn marked_directions(&self, coord: Coordinate) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|&d| self.is_marked(coord.step(d)))
            .collect()
    }

    pub fn set_dimensions(&mut self, width: usize, height: usize) {
        self.dimensions = Some((width, height));
    }

    /// Explicit dimensions, or the smallest box from the origin holding every marked cell
    pub fn dimensions(&self) -> (usize, usize) {
        if let Some(dims) = self.dimensions {
            return dims;
        }
        let width = self.cells.keys().map(|c| c.x + 1).max().unwrap_or(0);
        let height = self.cells.keys().map(|c| c.y + 1).max().unwrap_or(0);
        (width.max(0) as usize, height.max(0) as usize)
    }

    /// Explicitly configured dimensions only
    pub fn explicit_dimensions(&self) -> Option<(usize, usize)> {
        self.dimensions
    }

    /// Parse the text form: `.` unmarked, `#` marked blank, anything else a fixed letter.
    /// Dimensions are taken from the longest line and the line count.
    pub fn from_text(text: &str) -> Result<Self, GridParseError> {
        let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
        let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let mut grid = Self::with_dimensions(width, lines.len());

        for (row, line) in lines.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let coord = match (i32::try_from(col), i32::try_from(row)) {
                    (Ok(x), Ok(y)) => Coordinate::new(x, y),
                    _ => return Err(GridParseError::TooLarge { row, col }),
                };
                match ch {
                    '.' | ' ' => {}
                    '#' => grid.mark(coord),
                    letter => grid.set_letter(coord, letter),
                }
            }
        }

        if grid.is_empty() {
            return Err(GridParseError::Empty);
        }
        Ok(grid)
    }

    /// Text form accepted by [`GridModel::from_text`]
    pub fn to_text(&self) -> String {
        let (width, height) = self.dimensions();
        let mut out = String::new();
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                let ch = match self.cells.get(&Coordinate::new(x, y)) {
                    None => '.',
                    Some(None) => '#',
                    Some(Some(letter)) => *letter,
                };
                out.push(ch);
            }
            out.push('\n');
        }
        out
    }
}

impl FromIterator<(Coordinate, Option<char>)> for GridModel {
    fn from_iter<I: IntoIterator<Item = (Coordinate, Option<char>)>>(iter: I) -> Self {
        let mut grid = GridModel::new();
        for (coord, letter) in iter {
            match letter {
                Some(letter) => grid.set_letter(coord, letter),
                None => grid.mark(coord),
            }
        }
        grid
    }
}

impl fmt::Display for GridModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_key_roundtrip() {
        let c: Coordinate = "3,-2".parse().unwrap();
        assert_eq!(c, Coordinate::new(3, -2));
        assert_eq!(c.to_string(), "3,-2");
        assert!("3".parse::<Coordinate>().is_err());
        assert!("a,b".parse::<Coordinate>().is_err());
    }

    #[test]
    fn test_direction_opposites() {
        for d in Direction::ALL {
            assert_eq!(d.opposite().opposite(), d);
            let (dx, dy) = d.delta();
            assert_eq!(d.opposite().delta(), (-dx, -dy));
        }
    }

    #[test]
    fn test_mark_and_letters() {
        let mut grid = GridModel::new();
        grid.mark(Coordinate::new(0, 0));
        grid.set_letter(Coordinate::new(1, 0), 'a');
        assert!(grid.is_marked(Coordinate::new(0, 0)));
        assert_eq!(grid.letter(Coordinate::new(0, 0)), None);
        assert_eq!(grid.letter(Coordinate::new(1, 0)), Some('A'));

        // Marking again keeps the letter
        grid.mark(Coordinate::new(1, 0));
        assert_eq!(grid.letter(Coordinate::new(1, 0)), Some('A'));

        grid.clear_letter(Coordinate::new(1, 0));
        assert!(grid.is_marked(Coordinate::new(1, 0)));
        assert_eq!(grid.letter(Coordinate::new(1, 0)), None);

        grid.unmark(Coordinate::new(0, 0));
        assert!(!grid.is_marked(Coordinate::new(0, 0)));
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_marked_directions_probe_order() {
        let grid: GridModel = [(1, 0), (0, 1), (2, 1), (1, 2), (1, 1)]
            .into_iter()
            .map(|p| (Coordinate::from(p), None))
            .collect();
        assert_eq!(
            grid.marked_directions(Coordinate::new(1, 1)),
            vec![Direction::Down, Direction::Right, Direction::Up, Direction::Left]
        );
        assert_eq!(
            grid.marked_directions(Coordinate::new(1, 0)),
            vec![Direction::Down]
        );
    }

    #[test]
    fn test_text_form() {
        let text = "#A.\n..#\n";
        let grid = GridModel::from_text(text).unwrap();
        assert_eq!(grid.len(), 3);
        assert_eq!(grid.letter(Coordinate::new(1, 0)), Some('A'));
        assert!(grid.is_marked(Coordinate::new(2, 1)));
        assert_eq!(grid.dimensions(), (3, 2));
        assert_eq!(grid.to_text(), text);
    }

    #[test]
    fn test_text_form_empty() {
        assert_eq!(GridModel::from_text("...\n..."), Err(GridParseError::Empty));
    }

    #[test]
    fn test_inferred_dimensions() {
        let mut grid = GridModel::new();
        grid.mark(Coordinate::new(4, 2));
        assert_eq!(grid.dimensions(), (5, 3));
        assert_eq!(grid.explicit_dimensions(), None);
    }
}
