//! Tokenizer configuration.
//!
//! [`TokenizerConfig`] reads the `tokenizer.json` document written by
//! HuggingFace `tokenizers` for WordPiece models and turns it into a validated
//! [`Vocabulary`]. [`PipelineOptions`] selects which optional stages the
//! pipeline runs.
//!
//! # Example
//!
//! ```
//! use wordpiece::config::TokenizerConfig;
//!
//! let config = TokenizerConfig::from_json_str(r#"{
//!     "model": {
//!         "type": "WordPiece",
//!         "vocab": {"[CLS]": 0, "[SEP]": 1, "[UNK]": 2, "[MASK]": 3},
//!         "max_input_chars_per_word": 100,
//!         "unk_token": "[UNK]"
//!     },
//!     "added_tokens": [{"id": 3, "content": "[MASK]", "special": true}]
//! }"#).unwrap();
//!
//! let vocab = config.to_vocabulary().unwrap();
//! assert_eq!(vocab.special_tokens().collect::<Vec<_>>(), vec!["[MASK]"]);
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{Result, WordPieceError};
use crate::vocab::{
    AddedToken, DEFAULT_BOS_TOKEN, DEFAULT_CONTINUATION_PREFIX, DEFAULT_EOS_TOKEN, Vocabulary,
};

/// The subset of `tokenizer.json` the WordPiece pipeline uses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenizerConfig {
    pub model: ModelConfig,

    #[serde(default)]
    pub added_tokens: Vec<AddedToken>,

    #[serde(default)]
    pub post_processor: Option<PostProcessorConfig>,
}

/// The `model` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model type; must be `WordPiece` when present.
    #[serde(rename = "type", default)]
    pub model_type: Option<String>,

    pub vocab: HashMap<String, u32>,

    pub max_input_chars_per_word: usize,

    pub unk_token: String,

    #[serde(default = "default_continuing_subword_prefix")]
    pub continuing_subword_prefix: String,
}

fn default_continuing_subword_prefix() -> String {
    DEFAULT_CONTINUATION_PREFIX.to_string()
}

/// The `post_processor` section. Only the BERT-style processors name the
/// sentinels directly; anything else falls back to `[CLS]` / `[SEP]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PostProcessorConfig {
    BertProcessing { sep: (String, u32), cls: (String, u32) },
    RobertaProcessing { sep: (String, u32), cls: (String, u32) },
    #[serde(other)]
    Other,
}

impl PostProcessorConfig {
    /// The (begin, end) sentinel strings this processor wraps sequences with.
    pub fn sentinels(&self) -> Option<(&str, &str)> {
        match self {
            PostProcessorConfig::BertProcessing { sep, cls }
            | PostProcessorConfig::RobertaProcessing { sep, cls } => {
                Some((cls.0.as_str(), sep.0.as_str()))
            }
            PostProcessorConfig::Other => None,
        }
    }
}

impl TokenizerConfig {
    /// Load a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            WordPieceError::config(format!("cannot open {}: {e}", path.display()))
        })?;
        info!("Loading tokenizer configuration from {}", path.display());
        Self::from_reader(BufReader::new(file))
    }

    /// Parse a configuration from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let config: TokenizerConfig = serde_json::from_reader(reader)?;
        config.check_model_type()?;
        Ok(config)
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: TokenizerConfig = serde_json::from_str(json)?;
        config.check_model_type()?;
        Ok(config)
    }

    fn check_model_type(&self) -> Result<()> {
        match self.model.model_type.as_deref() {
            None | Some("WordPiece") => Ok(()),
            Some(other) => Err(WordPieceError::config(format!(
                "unsupported model type {other:?}, only WordPiece is supported"
            ))),
        }
    }

    /// The (begin, end) sentinel strings.
    pub fn sentinels(&self) -> (&str, &str) {
        self.post_processor
            .as_ref()
            .and_then(|p| p.sentinels())
            .unwrap_or((DEFAULT_BOS_TOKEN, DEFAULT_EOS_TOKEN))
    }

    /// Build and validate the vocabulary described by this configuration.
    pub fn to_vocabulary(&self) -> Result<Vocabulary> {
        let (bos, eos) = self.sentinels();
        debug!(
            "Model vocabulary has {} entries, {} added tokens, sentinels {bos:?}/{eos:?}",
            self.model.vocab.len(),
            self.added_tokens.len()
        );

        let builder = Vocabulary::builder()
            .entries(self.model.vocab.iter().map(|(k, &v)| (k.as_str(), v)))
            .max_input_chars_per_word(self.model.max_input_chars_per_word)
            .continuing_subword_prefix(self.model.continuing_subword_prefix.as_str())
            .unk_token(self.model.unk_token.as_str())
            .bos_token(bos)
            .eos_token(eos);

        self.added_tokens
            .iter()
            .cloned()
            .fold(builder, |b, token| b.added_token(token))
            .build()
    }
}

/// Which optional pipeline stages run.
///
/// The defaults enable everything. [`PipelineOptions::legacy`] disables CJK
/// padding and special-token splitting, leaving whitespace, punctuation and
/// WordPiece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    /// Surround CJK ideographs with spaces before whitespace splitting.
    pub pad_cjk_chars: bool,
    /// Cut special tokens out of words and protect them.
    pub split_on_special_tokens: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        PipelineOptions {
            pad_cjk_chars: true,
            split_on_special_tokens: true,
        }
    }
}

impl PipelineOptions {
    /// Options reproducing the plain whitespace/punctuation/WordPiece tokenizer.
    pub fn legacy() -> Self {
        PipelineOptions {
            pad_cjk_chars: false,
            split_on_special_tokens: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "model": {
            "vocab": {"[CLS]": 101, "[SEP]": 102, "[UNK]": 100, "hello": 7},
            "max_input_chars_per_word": 100,
            "unk_token": "[UNK]"
        }
    }"#;

    #[test]
    fn test_minimal_config() {
        let config = TokenizerConfig::from_json_str(MINIMAL).unwrap();
        assert!(config.added_tokens.is_empty());
        assert_eq!(config.model.continuing_subword_prefix, "##");
        assert_eq!(config.sentinels(), ("[CLS]", "[SEP]"));

        let vocab = config.to_vocabulary().unwrap();
        assert_eq!(vocab.bos_id(), 101);
        assert_eq!(vocab.eos_id(), 102);
        assert_eq!(vocab.unk_id(), 100);
    }

    #[test]
    fn test_only_special_added_tokens_are_special() {
        let json = r#"{
            "added_tokens": [
                {"id": 0, "content": "[PAD]", "single_word": false, "lstrip": false,
                 "rstrip": false, "normalized": false, "special": true},
                {"id": 5, "content": "foo", "special": false}
            ],
            "model": {
                "type": "WordPiece",
                "vocab": {"[PAD]": 0, "[CLS]": 1, "[SEP]": 2, "[UNK]": 3, "foo": 5},
                "max_input_chars_per_word": 100,
                "unk_token": "[UNK]"
            }
        }"#;
        let vocab = TokenizerConfig::from_json_str(json)
            .unwrap()
            .to_vocabulary()
            .unwrap();

        assert_eq!(vocab.special_tokens().collect::<Vec<_>>(), vec!["[PAD]"]);
    }

    #[test]
    fn test_bert_post_processor_names_sentinels() {
        let json = r#"{
            "model": {
                "vocab": {"<s>": 0, "</s>": 2, "[UNK]": 3},
                "max_input_chars_per_word": 100,
                "unk_token": "[UNK]"
            },
            "post_processor": {"type": "BertProcessing", "sep": ["</s>", 2], "cls": ["<s>", 0]}
        }"#;
        let config = TokenizerConfig::from_json_str(json).unwrap();
        assert_eq!(config.sentinels(), ("<s>", "</s>"));

        let vocab = config.to_vocabulary().unwrap();
        assert_eq!(vocab.bos_id(), 0);
        assert_eq!(vocab.eos_id(), 2);
    }

    #[test]
    fn test_template_post_processor_uses_defaults() {
        let json = r#"{
            "model": {
                "vocab": {"[CLS]": 0, "[SEP]": 1, "[UNK]": 2},
                "max_input_chars_per_word": 100,
                "unk_token": "[UNK]"
            },
            "post_processor": {"type": "TemplateProcessing", "single": [], "pair": [], "special_tokens": {}}
        }"#;
        let config = TokenizerConfig::from_json_str(json).unwrap();
        assert_eq!(config.sentinels(), ("[CLS]", "[SEP]"));
    }

    #[test]
    fn test_missing_field_is_an_error() {
        let json = r#"{"model": {"vocab": {"[UNK]": 0}, "unk_token": "[UNK]"}}"#;
        let err = TokenizerConfig::from_json_str(json).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_unknown_token_must_be_in_vocab() {
        let json = r#"{
            "model": {
                "vocab": {"[CLS]": 0, "[SEP]": 1},
                "max_input_chars_per_word": 100,
                "unk_token": "[UNK]"
            }
        }"#;
        let config = TokenizerConfig::from_json_str(json).unwrap();
        assert!(config.to_vocabulary().is_err());
    }

    #[test]
    fn test_other_model_types_are_rejected() {
        let json = r#"{
            "model": {
                "type": "BPE",
                "vocab": {"[CLS]": 0, "[SEP]": 1, "[UNK]": 2},
                "max_input_chars_per_word": 100,
                "unk_token": "[UNK]"
            }
        }"#;
        let err = TokenizerConfig::from_json_str(json).unwrap_err();
        assert!(err.to_string().contains("BPE"));
    }

    #[test]
    fn test_missing_file() {
        let err = TokenizerConfig::from_file("/nonexistent/tokenizer.json").unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_pipeline_options() {
        let options = PipelineOptions::default();
        assert!(options.pad_cjk_chars);
        assert!(options.split_on_special_tokens);

        let legacy = PipelineOptions::legacy();
        assert!(!legacy.pad_cjk_chars);
        assert!(!legacy.split_on_special_tokens);

        let parsed: PipelineOptions = serde_json::from_str(r#"{"pad_cjk_chars": false}"#).unwrap();
        assert!(!parsed.pad_cjk_chars);
        assert!(parsed.split_on_special_tokens);
    }
}
