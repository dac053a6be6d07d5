//! Command line argument parsing for the wordpiece CLI using clap.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::PipelineOptions;

/// wordpiece - BERT-style WordPiece tokenizer
///
/// Tokenizes each INPUT_FILE, or a single line read from standard input when
/// no file is given, and prints the vocabulary ids.
#[derive(Parser, Debug, Clone)]
#[command(name = "wordpiece")]
#[command(about = "Tokenize text into WordPiece vocabulary ids")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct WordPieceArgs {
    /// Files to tokenize. Without any, one line is read from stdin
    #[arg(value_name = "INPUT_FILE")]
    pub inputs: Vec<PathBuf>,

    /// Tokenizer configuration (HuggingFace tokenizer.json)
    #[arg(short, long, value_name = "PATH", default_value = "tokenizer.json")]
    pub config: PathBuf,

    /// Split special tokens on punctuation like ordinary text
    #[arg(long)]
    pub split_special_tokens: bool,

    /// Disable CJK padding and special-token splitting
    #[arg(long)]
    pub legacy: bool,

    /// Print the subword string next to each id
    #[arg(long)]
    pub show_tokens: bool,

    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl WordPieceArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }

    /// The pipeline options selected on the command line.
    pub fn pipeline_options(&self) -> PipelineOptions {
        if self.legacy {
            PipelineOptions::legacy()
        } else {
            PipelineOptions::default()
        }
    }
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The token block: echoed input, then one id per line
    Human,
    /// One JSON document per input
    Json,
}
