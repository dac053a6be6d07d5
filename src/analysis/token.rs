//! Token types and utilities for text analysis.
//!
//! This module defines the data structures that flow through the tokenization
//! pipeline, from whitespace-separated word candidates down to individual
//! WordPiece subwords.
//!
//! # Core Types
//!
//! - [`Token`] - A piece of text with its position, offsets and protection flag
//! - [`TokenType`] - What kind of piece a token is (word, punctuation, subword, ...)
//! - [`TokenStream`] - Type alias for boxed iterator of tokens
//!
//! # Examples
//!
//! ```
//! use wordpiece::analysis::token::{Token, TokenType};
//!
//! let token = Token::with_offsets("[MASK]", 1, 2, 8)
//!     .with_token_type(TokenType::Special)
//!     .protect();
//!
//! assert_eq!(token.text, "[MASK]");
//! assert_eq!(token.start_offset, 2);
//! assert!(token.is_protected());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A token represents a single piece of text inside the pipeline.
///
/// Offsets are byte offsets into the text handed to the pipeline. Stages that
/// split a token derive the offsets of the pieces from the offsets of the
/// token they split, so offsets always point back into the caller's text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// The position of the token in the token stream (0-based)
    pub position: usize,

    /// The byte offset where this token starts in the original text
    pub start_offset: usize,

    /// The byte offset where this token ends in the original text
    pub end_offset: usize,

    /// Whether this token is a special token that later stages must not split
    pub protected: bool,

    /// Token type classification
    pub token_type: Option<TokenType>,
}

/// Token type classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// An ordinary word or word-initial subword
    Word,
    /// A single CJK ideograph
    Cjk,
    /// A single punctuation codepoint
    Punctuation,
    /// A configured special token such as `[MASK]`
    Special,
    /// A continuation subword (carries the continuation prefix)
    Subword,
    /// The unknown-token marker substituted for an undecomposable word
    Unknown,
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset: 0,
            end_offset: 0,
            protected: false,
            token_type: None,
        }
    }

    /// Create a new token with text, position, and byte offsets.
    pub fn with_offsets<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            start_offset,
            end_offset,
            ..Token::new(text, position)
        }
    }

    /// Get the length of the token text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of codepoints in the token text.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Mark this token as a protected special token.
    pub fn protect(mut self) -> Self {
        self.protected = true;
        self
    }

    /// Check if this token is protected.
    pub fn is_protected(&self) -> bool {
        self.protected
    }

    /// Set the token type.
    pub fn with_token_type(mut self, token_type: TokenType) -> Self {
        self.token_type = Some(token_type);
        self
    }

    /// Clone this token with updated text.
    pub fn with_text<S: Into<String>>(&self, text: S) -> Self {
        let mut token = self.clone();
        token.text = text.into();
        token
    }

    /// Clone this token with updated position.
    pub fn with_position(&self, position: usize) -> Self {
        let mut token = self.clone();
        token.position = position;
        token
    }

    /// Build a piece of this token covering `range`, a byte range of
    /// `self.text`. The piece inherits the protection flag and gets offsets
    /// relative to the original text.
    pub fn slice(&self, range: std::ops::Range<usize>, position: usize) -> Self {
        Token {
            text: self.text[range.clone()].to_string(),
            position,
            start_offset: self.start_offset + range.start,
            end_offset: self.start_offset + range.end,
            protected: self.protected,
            token_type: self.token_type,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A token stream represents a sequence of tokens from the analysis pipeline.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;

/// Trait for types that can produce a token stream.
pub trait IntoTokenStream {
    /// Convert this type into a token stream.
    fn into_token_stream(self) -> TokenStream;
}

impl IntoTokenStream for Vec<Token> {
    fn into_token_stream(self) -> TokenStream {
        Box::new(self.into_iter())
    }
}
