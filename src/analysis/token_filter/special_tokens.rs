//! Special token filter.
//!
//! Cuts every configured special token out of the words it appears in and
//! marks it protected, so the punctuation stage leaves `[MASK]` alone instead
//! of producing `[`, `MASK`, `]`.

use std::sync::Arc;

use crate::analysis::token::{Token, TokenStream, TokenType};
use crate::analysis::token_filter::Filter;
use crate::analysis::trie::SpecialTokenTrie;
use crate::error::Result;

/// A filter that splits words on special tokens using a [`SpecialTokenTrie`].
#[derive(Clone, Debug)]
pub struct SpecialTokenFilter {
    trie: Arc<SpecialTokenTrie>,
    split_specials: bool,
}

impl SpecialTokenFilter {
    /// Create a filter over the given trie.
    pub fn new(trie: Arc<SpecialTokenTrie>) -> Self {
        SpecialTokenFilter {
            trie,
            split_specials: false,
        }
    }

    /// Build the trie from a list of special tokens.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(Arc::new(SpecialTokenTrie::new(tokens)))
    }

    /// Whether special tokens will later be split like ordinary text.
    ///
    /// When they will not, a word that is exactly a special token is
    /// protected without walking the trie.
    pub fn with_split_specials(mut self, split_specials: bool) -> Self {
        self.split_specials = split_specials;
        self
    }

    pub fn trie(&self) -> &SpecialTokenTrie {
        &self.trie
    }

    fn split_token(&self, token: Token, position: &mut usize, out: &mut Vec<Token>) {
        if !self.split_specials && self.trie.contains(&token.text) {
            out.push(Self::mark(token.with_position(*position)));
            *position += 1;
            return;
        }

        for span in self.trie.split(&token.text) {
            let piece = token.slice(span.range, *position);
            out.push(if span.protected {
                Self::mark(piece)
            } else {
                piece
            });
            *position += 1;
        }
    }

    fn mark(token: Token) -> Token {
        token.protect().with_token_type(TokenType::Special)
    }
}

impl Filter for SpecialTokenFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        if self.trie.is_empty() {
            return Ok(tokens);
        }

        let mut position = 0;
        let mut out = Vec::new();
        for token in tokens {
            self.split_token(token, &mut position, &mut out);
        }

        Ok(Box::new(out.into_iter()))
    }

    fn name(&self) -> &'static str {
        "special_tokens"
    }
}
