//! Prefix trie over the special tokens.
//!
//! The trie splits a word so that every occurrence of a special token becomes
//! its own protected span. At each position it takes the longest special token
//! starting there; when none starts there it jumps ahead to the next codepoint
//! that could begin a special token and emits the skipped text as a single
//! unprotected span.
//!
//! Nodes live in a flat arena and refer to their children by index, so the
//! trie is cheap to build, share and drop.
//!
//! ```
//! use wordpiece::analysis::trie::SpecialTokenTrie;
//!
//! let trie = SpecialTokenTrie::new(["[MASK]", "[SEP]"]);
//! let spans = trie.split("a[MASK]b");
//!
//! assert_eq!(spans.len(), 3);
//! assert_eq!(spans[1].range, 1..7);
//! assert!(spans[1].protected);
//! ```

use std::ops::Range;

use ahash::AHashMap;

const ROOT: usize = 0;

#[derive(Clone, Debug, Default)]
struct TrieNode {
    children: AHashMap<char, usize>,
    /// Index into `SpecialTokenTrie::tokens` when a special token ends here.
    token: Option<usize>,
}

/// A byte range of a split word, and whether it is a special token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Span {
    pub range: Range<usize>,
    pub protected: bool,
}

impl Span {
    fn protected(range: Range<usize>) -> Self {
        Span {
            range,
            protected: true,
        }
    }

    fn plain(range: Range<usize>) -> Self {
        Span {
            range,
            protected: false,
        }
    }
}

/// The longest special token found at some position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Match<'a> {
    /// Length of the match in codepoints.
    pub len: usize,
    /// The matched special token.
    pub token: &'a str,
}

/// Arena-backed prefix trie over special-token strings.
#[derive(Clone, Debug)]
pub struct SpecialTokenTrie {
    nodes: Vec<TrieNode>,
    tokens: Vec<String>,
}

impl Default for SpecialTokenTrie {
    fn default() -> Self {
        SpecialTokenTrie {
            nodes: vec![TrieNode::default()],
            tokens: Vec::new(),
        }
    }
}

impl SpecialTokenTrie {
    /// Build a trie from the given special tokens.
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trie = SpecialTokenTrie::default();
        for token in tokens {
            trie.insert(token.as_ref());
        }
        trie
    }

    /// Insert a special token. Empty strings and duplicates are ignored.
    pub fn insert(&mut self, token: &str) {
        if token.is_empty() {
            return;
        }

        let mut node = ROOT;
        for c in token.chars() {
            node = match self.nodes[node].children.get(&c) {
                Some(&child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[node].children.insert(c, child);
                    child
                }
            };
        }

        if self.nodes[node].token.is_none() {
            self.nodes[node].token = Some(self.tokens.len());
            self.tokens.push(token.to_string());
        }
    }

    /// Number of distinct special tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the trie holds no special tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The special tokens in insertion order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Whether `word` is exactly one of the special tokens.
    pub fn contains(&self, word: &str) -> bool {
        let mut node = ROOT;
        for c in word.chars() {
            match self.nodes[node].children.get(&c) {
                Some(&child) => node = child,
                None => return false,
            }
        }
        self.nodes[node].token.is_some()
    }

    /// Whether some special token begins with `c`.
    pub fn is_entry_char(&self, c: char) -> bool {
        self.nodes[ROOT].children.contains_key(&c)
    }

    /// The longest special token that is a prefix of `chars`.
    pub fn longest_match<I>(&self, chars: I) -> Option<Match<'_>>
    where
        I: IntoIterator<Item = char>,
    {
        let mut node = ROOT;
        let mut best = None;

        for (consumed, c) in chars.into_iter().enumerate() {
            match self.nodes[node].children.get(&c) {
                Some(&child) => node = child,
                None => break,
            }
            if let Some(index) = self.nodes[node].token {
                best = Some(Match {
                    len: consumed + 1,
                    token: &self.tokens[index],
                });
            }
        }

        best
    }

    /// Split `word` into special-token spans and the text between them.
    ///
    /// The spans cover `word` exactly, in order, with no empty span.
    pub fn split(&self, word: &str) -> Vec<Span> {
        let chars: Vec<(usize, char)> = word.char_indices().collect();
        let byte_at = |index: usize| chars.get(index).map_or(word.len(), |&(b, _)| b);

        let mut spans = Vec::new();
        let mut start = 0;

        while start < chars.len() {
            let suffix = chars[start..].iter().map(|&(_, c)| c);
            match self.longest_match(suffix) {
                Some(m) => {
                    spans.push(Span::protected(byte_at(start)..byte_at(start + m.len)));
                    start += m.len;
                }
                None => {
                    let next = chars[start + 1..]
                        .iter()
                        .position(|&(_, c)| self.is_entry_char(c))
                        .map_or(chars.len(), |p| start + 1 + p);
                    spans.push(Span::plain(byte_at(start)..byte_at(next)));
                    start = next;
                }
            }
        }

        spans
    }
}
