//! Persisted puzzle state.
//!
//! A puzzle is stored as three string entries in a key/value store:
//! - `Dimensions`: `"width,height"`
//! - `markedCells`: JSON array of `["x,y", "C"]` / `["x,y", null]` pairs
//! - `wordList`: newline-delimited upper-case words

use crate::grid::{Coordinate, GridModel};
use std::collections::HashMap;
use thiserror::Error;

pub const DIMENSIONS_KEY: &str = "Dimensions";
pub const MARKED_CELLS_KEY: &str = "markedCells";
pub const WORD_LIST_KEY: &str = "wordList";

/// Errors reading or writing persisted state
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("invalid dimensions `{0}`, expected `width,height`")]
    BadDimensions(String),
    #[error("invalid cell key `{0}`, expected `x,y`")]
    BadCellKey(String),
    #[error("cell {key} holds `{value}`, expected a single character")]
    BadCellValue { key: String, value: String },
    #[error("marked cells are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage error: {0}")]
    Storage(String),
}

/// Result type for persistence operations
pub type PersistResult<T> = Result<T, PersistError>;

/// String key/value storage backend
pub trait KeyValueStore {
    fn get(&self, key: &str) -> PersistResult<Option<String>>;

    fn set(&mut self, key: &str, value: String) -> PersistResult<()>;

    fn remove(&mut self, key: &str) -> PersistResult<()>;
}

/// In-memory store, mainly for tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> PersistResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> PersistResult<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> PersistResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Everything the editor persists for one puzzle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavedPuzzle {
    pub grid: GridModel,
    /// Raw newline-delimited word list
    pub words: String,
}

impl SavedPuzzle {
    pub fn new(grid: GridModel, words: impl Into<String>) -> Self {
        Self {
            grid,
            words: words.into(),
        }
    }

    /// Write all three entries. The word list is upper-cased.
    pub fn save(&self, store: &mut dyn KeyValueStore) -> PersistResult<()> {
        let (width, height) = self.grid.dimensions();
        store.set(DIMENSIONS_KEY, encode_dimensions(width, height))?;
        store.set(MARKED_CELLS_KEY, encode_cells(&self.grid)?)?;
        store.set(WORD_LIST_KEY, self.words.to_uppercase())?;
        Ok(())
    }

    /// Read whatever entries are present. Returns `None` when the store holds none of them.
    pub fn load(store: &dyn KeyValueStore) -> PersistResult<Option<Self>> {
        let dimensions = store.get(DIMENSIONS_KEY)?;
        let cells = store.get(MARKED_CELLS_KEY)?;
        let words = store.get(WORD_LIST_KEY)?;
        if dimensions.is_none() && cells.is_none() && words.is_none() {
            return Ok(None);
        }

        let mut grid = match cells {
            Some(json) => decode_cells(&json)?,
            None => GridModel::new(),
        };
        if let Some(dims) = dimensions {
            let (width, height) = decode_dimensions(&dims)?;
            grid.set_dimensions(width, height);
        }

        Ok(Some(Self {
            grid,
            words: words.unwrap_or_default(),
        }))
    }

    /// Remove all persisted entries
    pub fn clear(store: &mut dyn KeyValueStore) -> PersistResult<()> {
        store.remove(WORD_LIST_KEY)?;
        store.remove(DIMENSIONS_KEY)?;
        store.remove(MARKED_CELLS_KEY)?;
        Ok(())
    }
}

pub fn encode_dimensions(width: usize, height: usize) -> String {
    format!("{},{}", width, height)
}

pub fn decode_dimensions(value: &str) -> PersistResult<(usize, usize)> {
    let bad = || PersistError::BadDimensions(value.to_string());
    let (width, height) = value.split_once(',').ok_or_else(bad)?;
    let width = width.trim().parse().map_err(|_| bad())?;
    let height = height.trim().parse().map_err(|_| bad())?;
    Ok((width, height))
}

/// JSON array of `[key, letter-or-null]` pairs in row-major order
pub fn encode_cells(grid: &GridModel) -> PersistResult<String> {
    let pairs: Vec<(String, Option<String>)> = grid
        .iter()
        .map(|(coord, letter)| (coord.to_string(), letter.map(String::from)))
        .collect();
    Ok(serde_json::to_string(&pairs)?)
}

pub fn decode_cells(json: &str) -> PersistResult<GridModel> {
    let pairs: Vec<(String, Option<String>)> = serde_json::from_str(json)?;
    let mut grid = GridModel::new();
    for (key, value) in pairs {
        let coord: Coordinate = key
            .parse()
            .map_err(|_| PersistError::BadCellKey(key.clone()))?;
        match value {
            None => grid.mark(coord),
            Some(value) => {
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(letter), None) => grid.set_letter(coord, letter),
                    _ => return Err(PersistError::BadCellValue { key, value }),
                }
            }
        }
    }
    Ok(grid)
}
