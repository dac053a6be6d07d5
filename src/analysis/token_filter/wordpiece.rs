//! WordPiece subword filter.
//!
//! Decomposes each token into vocabulary subwords with the greedy
//! longest-match-first algorithm: starting from the left, take the longest
//! prefix of the remaining text that is in the vocabulary (with the
//! continuation prefix on every piece but the first), then repeat on what is
//! left. There is no backtracking. If some position admits no match at all,
//! the pieces found so far are dropped and the whole word becomes a single
//! unknown token. Words longer than `max_input_chars_per_word` codepoints are
//! unknown without any lookup.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use wordpiece::analysis::token_filter::wordpiece::WordPieceFilter;
//! use wordpiece::vocab::Vocabulary;
//!
//! let vocab = Vocabulary::builder()
//!     .entries([("[CLS]", 0), ("[SEP]", 1), ("[UNK]", 2), ("un", 3), ("##aff", 4), ("##able", 5)])
//!     .build()
//!     .unwrap();
//! let filter = WordPieceFilter::new(Arc::new(vocab));
//!
//! assert_eq!(filter.decompose("unaffable"), vec!["un", "##aff", "##able"]);
//! assert_eq!(filter.decompose("unaffableX"), vec!["[UNK]"]);
//! ```

use std::ops::Range;
use std::sync::Arc;

use crate::analysis::token::{Token, TokenStream, TokenType};
use crate::analysis::token_filter::Filter;
use crate::error::Result;
use crate::vocab::Vocabulary;

/// A subword matched inside a word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subword {
    /// The vocabulary key, including the continuation prefix when present.
    pub text: String,
    /// Byte range of the matched text inside the word.
    pub range: Range<usize>,
}

/// A filter that replaces each token with its WordPiece subwords.
#[derive(Clone, Debug)]
pub struct WordPieceFilter {
    vocab: Arc<Vocabulary>,
}

impl WordPieceFilter {
    /// Create a filter that matches against `vocab`.
    pub fn new(vocab: Arc<Vocabulary>) -> Self {
        WordPieceFilter { vocab }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Decompose `word` into subword strings, or a single unknown marker.
    pub fn decompose(&self, word: &str) -> Vec<String> {
        match self.match_subwords(word) {
            Some(subwords) => subwords.into_iter().map(|s| s.text).collect(),
            None => vec![self.vocab.unk_token().to_string()],
        }
    }

    /// Match `word` against the vocabulary.
    ///
    /// Returns `None` when the word is too long or cannot be decomposed.
    pub fn match_subwords(&self, word: &str) -> Option<Vec<Subword>> {
        // byte offset of every char boundary, end of word included
        let bounds: Vec<usize> = word
            .char_indices()
            .map(|(b, _)| b)
            .chain(std::iter::once(word.len()))
            .collect();
        let char_count = bounds.len() - 1;

        if char_count > self.vocab.max_input_chars_per_word() {
            return None;
        }

        let prefix = self.vocab.continuing_subword_prefix();
        let mut candidate = String::with_capacity(prefix.len() + word.len());
        let mut subwords = Vec::new();
        let mut start = 0;

        while start < char_count {
            let mut end = char_count;
            let mut matched = None;

            while start < end {
                candidate.clear();
                if start > 0 {
                    candidate.push_str(prefix);
                }
                candidate.push_str(&word[bounds[start]..bounds[end]]);

                if self.vocab.contains(&candidate) {
                    matched = Some(Subword {
                        text: candidate.clone(),
                        range: bounds[start]..bounds[end],
                    });
                    break;
                }
                end -= 1;
            }

            subwords.push(matched?);
            start = end;
        }

        Some(subwords)
    }

    fn unknown(&self, token: &Token, position: usize) -> Token {
        Token {
            text: self.vocab.unk_token().to_string(),
            position,
            start_offset: token.start_offset,
            end_offset: token.end_offset,
            protected: false,
            token_type: Some(TokenType::Unknown),
        }
    }
}

impl Filter for WordPieceFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let mut position = 0;
        let mut out = Vec::new();

        for token in tokens {
            match self.match_subwords(&token.text) {
                Some(subwords) => {
                    for (index, subword) in subwords.into_iter().enumerate() {
                        let mut piece = token.slice(subword.range, position);
                        piece.text = subword.text;
                        if index > 0 {
                            piece.token_type = Some(TokenType::Subword);
                        }
                        out.push(piece);
                        position += 1;
                    }
                }
                None => {
                    out.push(self.unknown(&token, position));
                    position += 1;
                }
            }
        }

        Ok(Box::new(out.into_iter()))
    }

    fn name(&self) -> &'static str {
        "wordpiece"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter_with(entries: &[(&str, u32)], max_chars: usize) -> WordPieceFilter {
        let vocab = Vocabulary::builder()
            .entries([("[CLS]", 0), ("[SEP]", 1), ("[UNK]", 2)])
            .entries(entries.iter().copied())
            .max_input_chars_per_word(max_chars)
            .build()
            .unwrap();
        WordPieceFilter::new(Arc::new(vocab))
    }

    #[test]
    fn test_greedy_decomposition() {
        let filter = filter_with(&[("un", 3), ("##aff", 4), ("##able", 5)], 100);
        assert_eq!(filter.decompose("unaffable"), vec!["un", "##aff", "##able"]);
    }

    #[test]
    fn test_failure_replaces_whole_word() {
        let filter = filter_with(&[("un", 3), ("##aff", 4), ("##able", 5)], 100);
        assert_eq!(filter.decompose("unaffableX"), vec!["[UNK]"]);
        assert!(filter.match_subwords("unaffableX").is_none());
    }

    #[test]
    fn test_longest_prefix_first_without_backtracking() {
        // "ab" + "##cde" covers the word, but greedy commits to "abc" first
        // and then fails on "e".
        let filter = filter_with(&[("ab", 3), ("abc", 4), ("##d", 5), ("##cde", 6)], 100);
        assert_eq!(filter.decompose("abcde"), vec!["[UNK]"]);
        assert_eq!(filter.decompose("abcd"), vec!["abc", "##d"]);
    }

    #[test]
    fn test_continuation_prefix_only_after_first_piece() {
        let filter = filter_with(&[("##a", 3), ("b", 4)], 100);
        assert_eq!(filter.decompose("a"), vec!["[UNK]"]);
        assert_eq!(filter.decompose("b"), vec!["b"]);
    }

    #[test]
    fn test_custom_prefix() {
        let vocab = Vocabulary::builder()
            .entries([("[CLS]", 0), ("[SEP]", 1), ("[UNK]", 2), ("play", 3), ("@@ing", 4)])
            .continuing_subword_prefix("@@")
            .build()
            .unwrap();
        let filter = WordPieceFilter::new(Arc::new(vocab));
        assert_eq!(filter.decompose("playing"), vec!["play", "@@ing"]);
    }

    #[test]
    fn test_length_boundary() {
        let filter = filter_with(&[("a", 3), ("##a", 4)], 5);
        assert_eq!(filter.decompose("aaaaa"), vec!["a", "##a", "##a", "##a", "##a"]);
        assert_eq!(filter.decompose("aaaaaa"), vec!["[UNK]"]);
    }

    #[test]
    fn test_length_counts_codepoints() {
        let filter = filter_with(&[("é", 3), ("##é", 4)], 2);
        // two codepoints, four bytes
        assert_eq!(filter.decompose("éé"), vec!["é", "##é"]);
    }

    #[test]
    fn test_decompose_is_deterministic() {
        let filter = filter_with(&[("un", 3), ("##aff", 4), ("##able", 5)], 100);
        let first = filter.decompose("unaffable");
        for _ in 0..10 {
            assert_eq!(filter.decompose("unaffable"), first);
        }
    }

    #[test]
    fn test_filter_offsets_and_types() {
        let filter = filter_with(&[("un", 3), ("##aff", 4), ("##able", 5)], 100);
        let tokens = vec![
            Token::with_offsets("unaffable", 0, 2, 11).with_token_type(TokenType::Word),
            Token::with_offsets("zzz", 1, 12, 15).with_token_type(TokenType::Word),
        ];
        let result: Vec<Token> = filter
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .collect();

        let texts: Vec<_> = result.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["un", "##aff", "##able", "[UNK]"]);
        assert_eq!(result[0].token_type, Some(TokenType::Word));
        assert_eq!(result[1].token_type, Some(TokenType::Subword));
        assert_eq!(result[1].start_offset, 4);
        assert_eq!(result[1].end_offset, 7);
        assert_eq!(result[3].token_type, Some(TokenType::Unknown));
        assert_eq!(result[3].start_offset, 12);
        assert_eq!(result[3].end_offset, 15);
        assert_eq!(result[3].position, 3);
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(filter_with(&[], 100).name(), "wordpiece");
    }
}
