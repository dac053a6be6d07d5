//! Punctuation split filter.
//!
//! Every punctuation codepoint becomes a token of its own and the runs of
//! other codepoints between them become tokens too. The output is a fixed
//! point: running the filter again changes nothing.

use crate::analysis::char_class::is_punctuation;
use crate::analysis::token::{TokenStream, TokenType};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that isolates punctuation.
///
/// Protected tokens pass through untouched unless the filter is built with
/// [`with_split_specials`](Self::with_split_specials).
#[derive(Clone, Debug, Default)]
pub struct PunctuationSplitFilter {
    split_specials: bool,
}

impl PunctuationSplitFilter {
    /// Create a new punctuation filter that leaves protected tokens alone.
    pub fn new() -> Self {
        PunctuationSplitFilter {
            split_specials: false,
        }
    }

    /// Also split protected tokens.
    pub fn with_split_specials(mut self, split_specials: bool) -> Self {
        self.split_specials = split_specials;
        self
    }

    /// Byte ranges of the runs and punctuation codepoints of `text`.
    pub fn split(text: &str) -> Vec<(std::ops::Range<usize>, bool)> {
        let mut pieces = Vec::new();
        let mut run_start = None;

        for (offset, c) in text.char_indices() {
            if is_punctuation(c) {
                if let Some(start) = run_start.take() {
                    pieces.push((start..offset, false));
                }
                pieces.push((offset..offset + c.len_utf8(), true));
            } else if run_start.is_none() {
                run_start = Some(offset);
            }
        }
        if let Some(start) = run_start {
            pieces.push((start..text.len(), false));
        }

        pieces
    }
}

impl Filter for PunctuationSplitFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let mut position = 0;
        let mut out = Vec::new();

        for token in tokens {
            if token.is_protected() && !self.split_specials {
                out.push(token.with_position(position));
                position += 1;
                continue;
            }

            for (range, punctuation) in Self::split(&token.text) {
                let mut piece = token.slice(range, position);
                // a split special token is ordinary text from here on
                piece.protected = false;
                if punctuation {
                    piece.token_type = Some(TokenType::Punctuation);
                } else if piece.token_type == Some(TokenType::Special) {
                    piece.token_type = Some(TokenType::Word);
                }
                out.push(piece);
                position += 1;
            }
        }

        Ok(Box::new(out.into_iter()))
    }

    fn name(&self) -> &'static str {
        "punctuation"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    fn texts(filter: &PunctuationSplitFilter, tokens: Vec<Token>) -> Vec<String> {
        filter
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn test_splits_punctuation() {
        let filter = PunctuationSplitFilter::new();
        assert_eq!(
            texts(&filter, vec![Token::new("hello,world!!", 0)]),
            vec!["hello", ",", "world", "!", "!"]
        );
    }

    #[test]
    fn test_only_punctuation() {
        let filter = PunctuationSplitFilter::new();
        assert_eq!(texts(&filter, vec![Token::new("...", 0)]), vec![".", ".", "."]);
    }

    #[test]
    fn test_unicode_punctuation() {
        let filter = PunctuationSplitFilter::new();
        assert_eq!(
            texts(&filter, vec![Token::new("«ça»", 0)]),
            vec!["«", "ça", "»"]
        );
    }

    #[test]
    fn test_protected_tokens_pass_through() {
        let filter = PunctuationSplitFilter::new();
        let tokens = vec![Token::new("[MASK]", 0).protect()];
        assert_eq!(texts(&filter, tokens), vec!["[MASK]"]);
    }

    #[test]
    fn test_split_specials_splits_protected_tokens() {
        let filter = PunctuationSplitFilter::new().with_split_specials(true);
        let tokens = vec![Token::new("[MASK]", 0)
            .protect()
            .with_token_type(TokenType::Special)];

        let result: Vec<Token> = filter
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .collect();

        let texts: Vec<_> = result.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["[", "MASK", "]"]);
        assert!(result.iter().all(|t| !t.is_protected()));
        assert_eq!(result[1].token_type, Some(TokenType::Word));
    }

    #[test]
    fn test_offsets_and_positions() {
        let filter = PunctuationSplitFilter::new();
        let tokens = vec![Token::with_offsets("a.b", 0, 4, 7), Token::with_offsets("c", 1, 8, 9)];
        let result: Vec<Token> = filter
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .collect();

        assert_eq!(result.len(), 4);
        assert_eq!(result[1].text, ".");
        assert_eq!(result[1].start_offset, 5);
        assert_eq!(result[1].token_type, Some(TokenType::Punctuation));
        assert_eq!(result[3].position, 3);
        assert_eq!(result[3].start_offset, 8);
    }

    #[test]
    fn test_idempotent() {
        let filter = PunctuationSplitFilter::new();
        let once = texts(&filter, vec![Token::new("a,b;;c-d—e", 0)]);
        let again: Vec<String> = filter
            .filter(Box::new(
                once.iter()
                    .enumerate()
                    .map(|(i, t)| Token::new(t.clone(), i))
                    .collect::<Vec<_>>()
                    .into_iter(),
            ))
            .unwrap()
            .map(|t| t.text)
            .collect();

        assert_eq!(once, again);
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(PunctuationSplitFilter::new().name(), "punctuation");
    }
}
