//! Word list parsing and validation.

use std::collections::BTreeSet;
use thiserror::Error;

/// Shortest word that can take part in a chain (two letters overlap on each side)
pub const MIN_WORD_LEN: usize = 3;

/// Number of characters shared by consecutive words in a chain
pub const OVERLAP: usize = 2;

const LITHUANIAN: &str = "AĄBCČDEĘĖFGHIĮYJKLMNOPRSŠTUŲŪVZŽ";
const LATIN: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Errors raised while validating a word list
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordError {
    #[error("word list is empty")]
    Empty,
    #[error("word `{word}` is shorter than {} characters", MIN_WORD_LEN)]
    TooShort { word: String },
    #[error("word `{word}` contains illegal character `{ch}`")]
    IllegalCharacter { word: String, ch: char },
}

/// Set of characters words may be built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    letters: BTreeSet<char>,
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::lithuanian()
    }
}

impl Alphabet {
    /// Alphabet from an arbitrary set of characters (stored upper-cased)
    pub fn new(letters: &str) -> Self {
        Self {
            letters: letters.chars().flat_map(char::to_uppercase).collect(),
        }
    }

    /// Upper-case Lithuanian alphabet
    pub fn lithuanian() -> Self {
        Self::new(LITHUANIAN)
    }

    /// Upper-case A-Z
    pub fn latin() -> Self {
        Self::new(LATIN)
    }

    pub fn contains(&self, ch: char) -> bool {
        self.letters.contains(&ch)
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }
}

/// Validated, upper-cased words in input order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    /// Parse a newline-delimited list. Lines are trimmed and upper-cased;
    /// blank lines are skipped.
    pub fn parse(text: &str, alphabet: &Alphabet) -> Result<Self, WordError> {
        let words = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_uppercase);
        Self::from_words(words, alphabet)
    }

    /// Validate already-split words
    pub fn from_words<I, S>(words: I, alphabet: &Alphabet) -> Result<Self, WordError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        if words.is_empty() {
            return Err(WordError::Empty);
        }
        for word in &words {
            validate_word(word, alphabet)?;
        }
        Ok(Self { words })
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Length of the chain that uses every word once
    pub fn full_chain_length(&self) -> usize {
        full_chain_length(&self.words)
    }

    /// Newline-delimited form, as persisted
    pub fn to_text(&self) -> String {
        self.words.join("\n")
    }

    pub fn into_words(self) -> Vec<String> {
        self.words
    }
}

fn validate_word(word: &str, alphabet: &Alphabet) -> Result<(), WordError> {
    if word.chars().count() < MIN_WORD_LEN {
        return Err(WordError::TooShort {
            word: word.to_string(),
        });
    }
    if let Some(ch) = word.chars().find(|&c| !alphabet.contains(c)) {
        return Err(WordError::IllegalCharacter {
            word: word.to_string(),
            ch,
        });
    }
    Ok(())
}

/// Sum of word lengths minus the overlap at each junction. Zero for no words.
pub fn full_chain_length<S: AsRef<str>>(words: &[S]) -> usize {
    let total: usize = words.iter().map(|w| w.as_ref().chars().count()).sum();
    total.saturating_sub(OVERLAP * words.len().saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_uppercases() {
        let list = WordList::parse("  cat\n\nATE \n", &Alphabet::latin()).unwrap();
        assert_eq!(list.words(), &["CAT".to_string(), "ATE".to_string()]);
        assert_eq!(list.to_text(), "CAT\nATE");
    }

    #[test]
    fn test_parse_lithuanian() {
        let list = WordList::parse("žąsis\nšuo", &Alphabet::lithuanian()).unwrap();
        assert_eq!(list.words()[0], "ŽĄSIS");
        assert_eq!(list.words()[1], "ŠUO");
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(
            WordList::parse("\n  \n", &Alphabet::latin()),
            Err(WordError::Empty)
        );
    }

    #[test]
    fn test_too_short() {
        assert_eq!(
            WordList::parse("CAT\nAT", &Alphabet::latin()),
            Err(WordError::TooShort {
                word: "AT".to_string()
            })
        );
    }

    #[test]
    fn test_illegal_character() {
        // Q and W are not part of the Lithuanian alphabet
        assert_eq!(
            WordList::parse("QUIZ", &Alphabet::lithuanian()),
            Err(WordError::IllegalCharacter {
                word: "QUIZ".to_string(),
                ch: 'Q'
            })
        );
        assert!(WordList::parse("QUIZ", &Alphabet::latin()).is_ok());
    }

    #[test]
    fn test_full_chain_length() {
        assert_eq!(full_chain_length(&["CAT", "ATE"]), 4);
        assert_eq!(full_chain_length(&["ABC", "BCD"]), 4);
        assert_eq!(full_chain_length(&["HELLO"]), 5);
        assert_eq!(full_chain_length::<&str>(&[]), 0);
        // Characters, not bytes
        assert_eq!(full_chain_length(&["ŽĄS", "ĄSA"]), 4);
    }
}
