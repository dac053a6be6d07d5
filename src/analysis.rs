//! Text analysis for WordPiece tokenization.
//!
//! This module holds the stages of the tokenization pipeline and the traits
//! that tie them together: char filters rewrite the raw text, a tokenizer cuts
//! it into word candidates, and token filters split those candidates down to
//! vocabulary subwords.

pub mod analyzer;
pub mod char_class;
pub mod char_filter;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
pub mod trie;

// Re-export commonly used types
pub use analyzer::*;
pub use token::*;
pub use token_filter::*;
pub use tokenizer::*;
