//! End-to-end WordPiece tokenization.
//!
//! A [`Pipeline`] wires the analysis stages together and maps the resulting
//! subwords to vocabulary ids:
//!
//! 1. CJK padding (char filter, optional)
//! 2. whitespace splitting (tokenizer)
//! 3. special-token splitting (filter, optional)
//! 4. punctuation splitting (filter)
//! 5. WordPiece decomposition (filter)
//!
//! The id sequence is wrapped in the begin and end sentinels.
//!
//! # Examples
//!
//! ```
//! use wordpiece::pipeline::Pipeline;
//! use wordpiece::vocab::Vocabulary;
//!
//! let vocab = Vocabulary::builder()
//!     .entries([("[CLS]", 0), ("[SEP]", 1), ("[UNK]", 2), ("un", 3), ("##aff", 4), ("##able", 5)])
//!     .build()
//!     .unwrap();
//! let pipeline = Pipeline::new(vocab);
//!
//! assert_eq!(pipeline.tokenize("unaffable", false).unwrap(), vec![0, 3, 4, 5, 1]);
//! assert_eq!(pipeline.tokenize("", false).unwrap(), vec![0, 1]);
//! ```

use std::path::Path;
use std::sync::Arc;

use log::{debug, warn};
use rayon::prelude::*;

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::char_filter::cjk_padding::CjkPaddingCharFilter;
use crate::analysis::token::Token;
use crate::analysis::token_filter::punctuation::PunctuationSplitFilter;
use crate::analysis::token_filter::special_tokens::SpecialTokenFilter;
use crate::analysis::token_filter::wordpiece::WordPieceFilter;
use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;
use crate::analysis::trie::SpecialTokenTrie;
use crate::config::{PipelineOptions, TokenizerConfig};
use crate::error::Result;
use crate::vocab::Vocabulary;

/// A ready-to-use WordPiece tokenizer.
///
/// Two analyzers are prepared up front, one that keeps special tokens whole
/// and one that splits them like ordinary text, so a call only picks one.
#[derive(Clone, Debug)]
pub struct Pipeline {
    vocab: Arc<Vocabulary>,
    options: PipelineOptions,
    protecting: PipelineAnalyzer,
    splitting: PipelineAnalyzer,
}

impl Pipeline {
    /// Create a pipeline with the default options.
    pub fn new(vocab: Vocabulary) -> Self {
        Self::with_options(vocab, PipelineOptions::default())
    }

    /// Create a pipeline with the given options.
    pub fn with_options(vocab: Vocabulary, options: PipelineOptions) -> Self {
        let vocab = Arc::new(vocab);
        let trie = Arc::new(SpecialTokenTrie::new(vocab.special_tokens()));

        debug!(
            "Building pipeline: {} vocabulary entries, {} special tokens, {options:?}",
            vocab.len(),
            trie.len()
        );

        let protecting = Self::build_analyzer(&vocab, &trie, options, false);
        let splitting = Self::build_analyzer(&vocab, &trie, options, true);
        debug!("Pipeline stages: {protecting:?}");

        Pipeline {
            vocab,
            options,
            protecting,
            splitting,
        }
    }

    /// Create a pipeline from a parsed configuration.
    pub fn from_config(config: &TokenizerConfig, options: PipelineOptions) -> Result<Self> {
        Ok(Self::with_options(config.to_vocabulary()?, options))
    }

    /// Load a configuration file and create a pipeline with the default options.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = TokenizerConfig::from_file(path)?;
        Self::from_config(&config, PipelineOptions::default())
    }

    fn build_analyzer(
        vocab: &Arc<Vocabulary>,
        trie: &Arc<SpecialTokenTrie>,
        options: PipelineOptions,
        split_specials: bool,
    ) -> PipelineAnalyzer {
        let mut analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
            .with_name(if split_specials { "wordpiece_split" } else { "wordpiece" });

        if options.pad_cjk_chars {
            analyzer = analyzer.add_char_filter(Arc::new(CjkPaddingCharFilter::new()));
        }
        if options.split_on_special_tokens && !trie.is_empty() {
            analyzer = analyzer.add_filter(Arc::new(
                SpecialTokenFilter::new(Arc::clone(trie)).with_split_specials(split_specials),
            ));
        }

        analyzer
            .add_filter(Arc::new(
                PunctuationSplitFilter::new().with_split_specials(split_specials),
            ))
            .add_filter(Arc::new(WordPieceFilter::new(Arc::clone(vocab))))
    }

    fn analyzer(&self, allow_splitting_special_tokens: bool) -> &PipelineAnalyzer {
        if allow_splitting_special_tokens {
            &self.splitting
        } else {
            &self.protecting
        }
    }

    /// Tokenize `text` into ids, wrapped in the begin and end sentinels.
    ///
    /// With `allow_splitting_special_tokens` set, special tokens get no
    /// protection and are split on punctuation like any other text.
    pub fn tokenize(&self, text: &str, allow_splitting_special_tokens: bool) -> Result<Vec<u32>> {
        let (_, ids) = self.encode(text, allow_splitting_special_tokens)?;
        Ok(ids)
    }

    /// Like [`tokenize`](Self::tokenize), but also returns the subword tokens.
    ///
    /// The tokens are not wrapped: `ids` has two more entries than `tokens`,
    /// and `ids[i + 1]` is the id of `tokens[i]`.
    pub fn encode(
        &self,
        text: &str,
        allow_splitting_special_tokens: bool,
    ) -> Result<(Vec<Token>, Vec<u32>)> {
        let tokens = self.analyze(text, allow_splitting_special_tokens)?;

        let mut ids = Vec::with_capacity(tokens.len() + 2);
        ids.push(self.vocab.bos_id());
        ids.extend(self.convert_tokens_to_ids(tokens.iter().map(|t| t.text.as_str())));
        ids.push(self.vocab.eos_id());

        Ok((tokens, ids))
    }

    /// The subword tokens of `text`, with offsets into `text`.
    pub fn analyze(&self, text: &str, allow_splitting_special_tokens: bool) -> Result<Vec<Token>> {
        Ok(self
            .analyzer(allow_splitting_special_tokens)
            .analyze(text)?
            .collect())
    }

    /// Map subword strings to ids. Strings missing from the vocabulary map to
    /// the unknown id.
    pub fn convert_tokens_to_ids<'a, I>(&self, tokens: I) -> Vec<u32>
    where
        I: IntoIterator<Item = &'a str>,
    {
        tokens
            .into_iter()
            .map(|token| {
                self.vocab.token_to_id(token).unwrap_or_else(|| {
                    warn!("Token {token:?} is not in the vocabulary, using the unknown id");
                    self.vocab.unk_id()
                })
            })
            .collect()
    }

    /// Tokenize independent texts in parallel. The result is in input order.
    pub fn tokenize_batch<S>(
        &self,
        texts: &[S],
        allow_splitting_special_tokens: bool,
    ) -> Result<Vec<Vec<u32>>>
    where
        S: AsRef<str> + Sync,
    {
        texts
            .par_iter()
            .map(|text| self.tokenize(text.as_ref(), allow_splitting_special_tokens))
            .collect()
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    pub fn options(&self) -> PipelineOptions {
        self.options
    }

    pub fn bos_id(&self) -> u32 {
        self.vocab.bos_id()
    }

    pub fn eos_id(&self) -> u32 {
        self.vocab.eos_id()
    }

    pub fn unk_id(&self) -> u32 {
        self.vocab.unk_id()
    }
}
