//! The tokenizer/dictionary boundary.
//!
//! The engine never tokenizes text itself; it hands a flat sentence string
//! and a character offset to an external collaborator (which may live in
//! another process) and gets back a token list, the index of the token
//! covering the offset, and dictionary entries for that token's base form.

use std::fmt;

/// One token of the segmented sentence. `start` is the token's character
/// offset inside the sentence string that was tokenized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub start: usize,
    pub reading: String,
    pub base: String,
    pub pos: String,
}

/// A dictionary match for a token's base form. Entries arrive already
/// ordered by relevance; the engine only cares whether any exist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DictionaryEntry {
    pub term: String,
    pub reading: String,
    pub glosses: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenizeResult {
    pub tokens: Vec<Token>,
    /// Index into `tokens` of the token covering the requested offset.
    pub token_idx: usize,
    pub entries: Vec<DictionaryEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenizeError {
    /// Precondition violation: `char_at` outside `[0, text chars)`.
    CharAtOutOfRange { char_at: usize, len: usize },
    /// Precondition violation: empty input text.
    EmptyText,
    /// The external backend itself failed (unavailable, crashed, ...).
    Backend(String),
}

impl fmt::Display for TokenizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenizeError::CharAtOutOfRange { char_at, len } => {
                write!(f, "char_at {char_at} out of range for {len}-char text")
            }
            TokenizeError::EmptyText => write!(f, "cannot tokenize empty text"),
            TokenizeError::Backend(msg) => write!(f, "tokenizer backend error: {msg}"),
        }
    }
}

impl std::error::Error for TokenizeError {}

/// Validate the boundary precondition. Callers must do this before issuing
/// a request; the tokenizer is entitled to reject anything else.
pub fn validate_tokenize_args(text: &str, char_at: usize) -> Result<(), TokenizeError> {
    if text.is_empty() {
        return Err(TokenizeError::EmptyText);
    }
    let len = text.chars().count();
    if char_at >= len {
        return Err(TokenizeError::CharAtOutOfRange { char_at, len });
    }
    Ok(())
}

/// In-process form of the collaborator, for hosts that do not cross a
/// process boundary (and for tests).
pub trait Tokenizer {
    fn tokenize(&mut self, text: &str, char_at: usize) -> Result<TokenizeResult, TokenizeError>;
}
