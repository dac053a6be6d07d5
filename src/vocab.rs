//! The WordPiece vocabulary.
//!
//! A [`Vocabulary`] maps subword strings to ids and carries every setting the
//! pipeline needs: the word length bound, the unknown and sentinel tokens, the
//! continuation prefix and the added tokens. It is validated once when it is
//! built and never changes afterwards, so it can be shared freely behind an
//! `Arc`.
//!
//! # Examples
//!
//! ```
//! use wordpiece::vocab::Vocabulary;
//!
//! let vocab = Vocabulary::builder()
//!     .entries([("[CLS]", 0), ("[SEP]", 1), ("[UNK]", 2), ("un", 3), ("##aff", 4)])
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(vocab.token_to_id("##aff"), Some(4));
//! assert_eq!(vocab.token_to_id("aff"), None);
//! assert_eq!(vocab.unk_id(), 2);
//! ```

use ahash::AHashMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Result, WordPieceError};

/// Prefix marking a subword that attaches to the previous piece.
pub const DEFAULT_CONTINUATION_PREFIX: &str = "##";

/// Default begin-of-sequence sentinel.
pub const DEFAULT_BOS_TOKEN: &str = "[CLS]";

/// Default end-of-sequence sentinel.
pub const DEFAULT_EOS_TOKEN: &str = "[SEP]";

/// Default unknown-token marker.
pub const DEFAULT_UNK_TOKEN: &str = "[UNK]";

/// Default bound on the length of a word, in codepoints.
pub const DEFAULT_MAX_INPUT_CHARS_PER_WORD: usize = 100;

/// A token added on top of the model vocabulary.
///
/// Only tokens with `special` set are protected from splitting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddedToken {
    pub content: String,
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub special: bool,
}

impl AddedToken {
    /// A special token that must remain unsplit.
    pub fn special<S: Into<String>>(content: S) -> Self {
        AddedToken {
            content: content.into(),
            id: None,
            special: true,
        }
    }

    /// Set the id the token is registered under.
    pub fn with_id(mut self, id: u32) -> Self {
        self.id = Some(id);
        self
    }
}

/// Immutable subword vocabulary.
#[derive(Clone, Debug)]
pub struct Vocabulary {
    token_to_id: AHashMap<String, u32>,
    id_to_token: AHashMap<u32, String>,
    max_input_chars_per_word: usize,
    continuing_subword_prefix: String,
    unk_token: String,
    unk_id: u32,
    bos_token: String,
    bos_id: u32,
    eos_token: String,
    eos_id: u32,
    added_tokens: Vec<AddedToken>,
}

impl Vocabulary {
    /// Start building a vocabulary.
    pub fn builder() -> VocabularyBuilder {
        VocabularyBuilder::new()
    }

    /// Look up the id of a subword.
    pub fn token_to_id(&self, token: &str) -> Option<u32> {
        self.token_to_id.get(token).copied()
    }

    /// Look up the subword registered under `id`.
    pub fn id_to_token(&self, id: u32) -> Option<&str> {
        self.id_to_token.get(&id).map(|s| s.as_str())
    }

    /// Whether `token` is a key of the vocabulary.
    pub fn contains(&self, token: &str) -> bool {
        self.token_to_id.contains_key(token)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.token_to_id.len()
    }

    /// Whether the vocabulary has no entries. Always false for a built vocabulary.
    pub fn is_empty(&self) -> bool {
        self.token_to_id.is_empty()
    }

    pub fn max_input_chars_per_word(&self) -> usize {
        self.max_input_chars_per_word
    }

    pub fn continuing_subword_prefix(&self) -> &str {
        &self.continuing_subword_prefix
    }

    pub fn unk_token(&self) -> &str {
        &self.unk_token
    }

    pub fn unk_id(&self) -> u32 {
        self.unk_id
    }

    pub fn bos_token(&self) -> &str {
        &self.bos_token
    }

    pub fn bos_id(&self) -> u32 {
        self.bos_id
    }

    pub fn eos_token(&self) -> &str {
        &self.eos_token
    }

    pub fn eos_id(&self) -> u32 {
        self.eos_id
    }

    /// All added tokens, special or not.
    pub fn added_tokens(&self) -> &[AddedToken] {
        &self.added_tokens
    }

    /// The added tokens that must remain unsplit.
    pub fn special_tokens(&self) -> impl Iterator<Item = &str> {
        self.added_tokens
            .iter()
            .filter(|t| t.special)
            .map(|t| t.content.as_str())
    }
}

/// Builder for [`Vocabulary`].
#[derive(Clone, Debug)]
pub struct VocabularyBuilder {
    entries: AHashMap<String, u32>,
    max_input_chars_per_word: usize,
    continuing_subword_prefix: String,
    unk_token: String,
    bos_token: String,
    eos_token: String,
    added_tokens: Vec<AddedToken>,
}

impl Default for VocabularyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl VocabularyBuilder {
    pub fn new() -> Self {
        VocabularyBuilder {
            entries: AHashMap::new(),
            max_input_chars_per_word: DEFAULT_MAX_INPUT_CHARS_PER_WORD,
            continuing_subword_prefix: DEFAULT_CONTINUATION_PREFIX.to_string(),
            unk_token: DEFAULT_UNK_TOKEN.to_string(),
            bos_token: DEFAULT_BOS_TOKEN.to_string(),
            eos_token: DEFAULT_EOS_TOKEN.to_string(),
            added_tokens: Vec::new(),
        }
    }

    /// Add `(subword, id)` entries. Later entries replace earlier ones.
    pub fn entries<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        self.entries
            .extend(entries.into_iter().map(|(token, id)| (token.into(), id)));
        self
    }

    /// Add one entry.
    pub fn entry<S: Into<String>>(mut self, token: S, id: u32) -> Self {
        self.entries.insert(token.into(), id);
        self
    }

    pub fn max_input_chars_per_word(mut self, max: usize) -> Self {
        self.max_input_chars_per_word = max;
        self
    }

    pub fn continuing_subword_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.continuing_subword_prefix = prefix.into();
        self
    }

    pub fn unk_token<S: Into<String>>(mut self, token: S) -> Self {
        self.unk_token = token.into();
        self
    }

    pub fn bos_token<S: Into<String>>(mut self, token: S) -> Self {
        self.bos_token = token.into();
        self
    }

    pub fn eos_token<S: Into<String>>(mut self, token: S) -> Self {
        self.eos_token = token.into();
        self
    }

    pub fn added_token(mut self, token: AddedToken) -> Self {
        self.added_tokens.push(token);
        self
    }

    /// Shorthand for adding a special token that must remain unsplit.
    pub fn special_token<S: Into<String>>(self, content: S) -> Self {
        self.added_token(AddedToken::special(content))
    }

    /// Validate the settings and build the vocabulary.
    ///
    /// Added tokens that carry an id but are missing from the entries are
    /// registered under that id.
    pub fn build(self) -> Result<Vocabulary> {
        let VocabularyBuilder {
            mut entries,
            max_input_chars_per_word,
            continuing_subword_prefix,
            unk_token,
            bos_token,
            eos_token,
            added_tokens,
        } = self;

        if max_input_chars_per_word == 0 {
            return Err(WordPieceError::config(
                "max_input_chars_per_word must be a positive integer",
            ));
        }

        let mut id_to_token: AHashMap<u32, String> = AHashMap::with_capacity(entries.len());
        for (token, &id) in &entries {
            if let Some(previous) = id_to_token.insert(id, token.clone()) {
                warn!("Vocabulary id {id} is shared by {previous:?} and {token:?}");
            }
        }

        for added in &added_tokens {
            match (entries.get(&added.content), added.id) {
                (Some(&existing), Some(id)) if existing != id => {
                    warn!(
                        "Added token {:?} declares id {} but the vocabulary maps it to {}",
                        added.content, id, existing
                    );
                }
                (None, Some(id)) => {
                    if let Some(owner) = id_to_token.get(&id) {
                        return Err(WordPieceError::config(format!(
                            "added token {:?} uses id {} which already belongs to {:?}",
                            added.content, id, owner
                        )));
                    }
                    entries.insert(added.content.clone(), id);
                    id_to_token.insert(id, added.content.clone());
                }
                _ => {}
            }
        }

        if entries.is_empty() {
            return Err(WordPieceError::config("vocabulary is empty"));
        }

        let resolve = |role: &str, token: &str| -> Result<u32> {
            entries.get(token).copied().ok_or_else(|| {
                WordPieceError::config(format!("{role} token {token:?} is not in the vocabulary"))
            })
        };
        let unk_id = resolve("unknown", &unk_token)?;
        let bos_id = resolve("begin-of-sequence", &bos_token)?;
        let eos_id = resolve("end-of-sequence", &eos_token)?;

        debug!(
            "Vocabulary built: {} entries, {} added tokens, unk={unk_id} bos={bos_id} eos={eos_id}",
            entries.len(),
            added_tokens.len()
        );

        Ok(Vocabulary {
            token_to_id: entries,
            id_to_token,
            max_input_chars_per_word,
            continuing_subword_prefix,
            unk_token,
            unk_id,
            bos_token,
            bos_id,
            eos_token,
            eos_id,
            added_tokens,
        })
    }
}
