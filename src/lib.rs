//! # wordpiece
//!
//! A BERT-style WordPiece tokenizer for Rust.
//!
//! ## Features
//!
//! - Greedy longest-match-first subword decomposition
//! - Special tokens kept whole through a prefix trie
//! - Unicode punctuation splitting and CJK ideograph isolation
//! - HuggingFace `tokenizer.json` configuration
//! - Composable analysis pipeline with offsets into the input text
//!
//! ## Example
//!
//! ```
//! use wordpiece::prelude::*;
//!
//! let vocab = Vocabulary::builder()
//!     .entries([("[CLS]", 0), ("[SEP]", 1), ("[UNK]", 2), ("你", 10), ("好", 11)])
//!     .build()
//!     .unwrap();
//! let pipeline = Pipeline::new(vocab);
//!
//! assert_eq!(pipeline.tokenize("你好", false).unwrap(), vec![0, 10, 11, 1]);
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod vocab;

pub mod prelude {
    pub use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
    pub use crate::analysis::token::{Token, TokenStream, TokenType};
    pub use crate::config::{PipelineOptions, TokenizerConfig};
    pub use crate::error::{Result, WordPieceError};
    pub use crate::pipeline::Pipeline;
    pub use crate::vocab::{AddedToken, Vocabulary};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
