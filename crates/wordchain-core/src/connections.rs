//! Connection graph: which words may directly follow which.

use crate::words::OVERLAP;
use log::debug;
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised while building the connection graph
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("cannot build connections from an empty word list")]
    EmptyWordList,
    #[error("word `{0}` appears more than once")]
    DuplicateWord(String),
    #[error("word `{0}` is too short to chain")]
    TooShort(String),
}

/// Directed adjacency between words: `a -> b` when the last two characters of
/// `a` equal the first two characters of `b`.
///
/// Words are addressed by their index in the input list. Successor lists
/// keep input list order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionGraph {
    words: Vec<String>,
    letters: Vec<Vec<char>>,
    index: HashMap<String, usize>,
    successors: Vec<Vec<usize>>,
}

impl ConnectionGraph {
    /// Words in input order
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn index_of(&self, word: &str) -> Option<usize> {
        self.index.get(word).copied()
    }

    pub fn word(&self, idx: usize) -> &str {
        &self.words[idx]
    }

    /// Characters of the word at `idx`
    pub fn letters(&self, idx: usize) -> &[char] {
        &self.letters[idx]
    }

    /// Indices of the words that may follow the word at `idx`
    pub fn successor_indices(&self, idx: usize) -> &[usize] {
        &self.successors[idx]
    }

    /// Words that may follow `word`, or `None` if the word is not in the graph
    pub fn successors(&self, word: &str) -> Option<Vec<&str>> {
        let idx = self.index_of(word)?;
        Some(
            self.successors[idx]
                .iter()
                .map(|&next| self.words[next].as_str())
                .collect(),
        )
    }

    /// Total number of directed connections
    pub fn edge_count(&self) -> usize {
        self.successors.iter().map(Vec::len).sum()
    }

    /// Shortest word length in the graph
    pub fn min_word_len(&self) -> usize {
        self.letters.iter().map(Vec::len).min().unwrap_or(0)
    }
}

/// Build the connection graph for `words`.
///
/// Self-loops are never added, even when a word's tail matches its own head.
pub fn build_connections<S: AsRef<str>>(words: &[S]) -> Result<ConnectionGraph, GraphError> {
    if words.is_empty() {
        return Err(GraphError::EmptyWordList);
    }

    let mut index = HashMap::with_capacity(words.len());
    let mut letters = Vec::with_capacity(words.len());
    for (i, word) in words.iter().enumerate() {
        let word = word.as_ref();
        let chars: Vec<char> = word.chars().collect();
        if chars.len() < OVERLAP {
            return Err(GraphError::TooShort(word.to_string()));
        }
        if index.insert(word.to_string(), i).is_some() {
            return Err(GraphError::DuplicateWord(word.to_string()));
        }
        letters.push(chars);
    }

    let successors: Vec<Vec<usize>> = letters
        .iter()
        .enumerate()
        .map(|(from, head)| {
            let tail = &head[head.len() - OVERLAP..];
            letters
                .iter()
                .enumerate()
                .filter(|&(to, next)| to != from && next[..OVERLAP] == *tail)
                .map(|(to, _)| to)
                .collect()
        })
        .collect();

    let graph = ConnectionGraph {
        words: words.iter().map(|w| w.as_ref().to_string()).collect(),
        letters,
        index,
        successors,
    };
    debug!(
        "built connection graph: {} words, {} connections",
        graph.len(),
        graph.edge_count()
    );
    Ok(graph)
}
