//! Token filters that split and rewrite token streams.
//!
//! Each filter receives the stream produced by the previous stage and returns
//! a new one. Together they take whitespace-separated word candidates down to
//! vocabulary subwords.
//!
//! # Available Filters
//!
//! - [`special_tokens::SpecialTokenFilter`] - Cuts special tokens out of words and protects them
//! - [`punctuation::PunctuationSplitFilter`] - Isolates every punctuation codepoint
//! - [`wordpiece::WordPieceFilter`] - Greedy longest-match-first subword decomposition
//!
//! # Filter Chaining
//!
//! ```text
//! Tokenizer → Special tokens → Punctuation → WordPiece → ids
//! ```
//!
//! # Examples
//!
//! ```
//! use wordpiece::analysis::token::Token;
//! use wordpiece::analysis::token_filter::Filter;
//! use wordpiece::analysis::token_filter::punctuation::PunctuationSplitFilter;
//!
//! let filter = PunctuationSplitFilter::new();
//! let tokens = vec![Token::with_offsets("don't", 0, 0, 5)];
//! let split: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .map(|t| t.text)
//!     .collect();
//!
//! assert_eq!(split, vec!["don", "'", "t"]);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
///
/// The trait requires `Send + Sync` so a pipeline can be shared across
/// threads.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod punctuation;
pub mod special_tokens;
pub mod wordpiece;

pub use punctuation::PunctuationSplitFilter;
pub use special_tokens::SpecialTokenFilter;
pub use wordpiece::WordPieceFilter;
