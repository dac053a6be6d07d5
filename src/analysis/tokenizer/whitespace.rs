//! Whitespace tokenizer implementation.

use super::Tokenizer;

use crate::analysis::char_class::{is_cjk_ideograph, is_whitespace};
use crate::analysis::token::{Token, TokenStream, TokenType};
use crate::error::Result;

/// A tokenizer that splits text on runs of whitespace.
///
/// Separators are discarded; the non-empty spans between them become tokens
/// in left-to-right order, carrying their byte offsets.
#[derive(Clone, Debug, Default)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    /// Create a new whitespace tokenizer.
    pub fn new() -> Self {
        WhitespaceTokenizer
    }

    /// Split `text` into the byte ranges of its whitespace-separated words.
    pub fn split(text: &str) -> Vec<std::ops::Range<usize>> {
        let mut spans = Vec::new();
        let mut start = None;

        for (offset, c) in text.char_indices() {
            match (is_whitespace(c), start) {
                (true, Some(s)) => {
                    spans.push(s..offset);
                    start = None;
                }
                (false, None) => start = Some(offset),
                _ => {}
            }
        }
        if let Some(s) = start {
            spans.push(s..text.len());
        }

        spans
    }

    fn detect_token_type(word: &str) -> TokenType {
        let mut chars = word.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if is_cjk_ideograph(c) => TokenType::Cjk,
            _ => TokenType::Word,
        }
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let tokens: Vec<Token> = Self::split(text)
            .into_iter()
            .enumerate()
            .map(|(position, span)| {
                let word = &text[span.clone()];
                Token::with_offsets(word, position, span.start, span.end)
                    .with_token_type(Self::detect_token_type(word))
            })
            .collect();

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}
