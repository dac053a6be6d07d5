//! Core analyzer trait definition.
//!
//! An analyzer is a complete text-to-tokens pipeline:
//!
//! ```text
//! Raw Text → Char Filters → Tokenizer → Filter 1 → ... → Filter N → Tokens
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
///
/// The trait requires `Send + Sync` so analyzers can be shared by threads
/// tokenizing independent texts.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens whose offsets
    /// point into `text`.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;
}
