//! Output formatting for CLI commands.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, WordPieceArgs};
use crate::error::Result;

/// First line of the id block.
pub const TOKENS_START: &str = "===== TOKENS START=====";

/// Last line of the id block.
pub const TOKENS_END: &str = "===== TOKENS END ======";

/// Result structure for one tokenized input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizationResult {
    /// The input file, absent for stdin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// The decoded input, echoed before the id block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub ids: Vec<u32>,
    /// Subword strings parallel to `ids`, with `--show-tokens`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<Vec<String>>,
}

/// Output a result in the specified format.
pub fn output_result<W: Write>(
    out: &mut W,
    result: &TokenizationResult,
    args: &WordPieceArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(out, result),
        OutputFormat::Json => output_json(out, result, args),
    }
}

/// Output the echoed text followed by the id block.
fn output_human<W: Write>(out: &mut W, result: &TokenizationResult) -> Result<()> {
    if let Some(text) = &result.text {
        writeln!(out, "{text}")?;
    }

    writeln!(out, "{TOKENS_START}")?;
    match &result.tokens {
        Some(tokens) => {
            for (id, token) in result.ids.iter().zip(tokens) {
                writeln!(out, "{id}\t{token}")?;
            }
        }
        None => {
            for id in &result.ids {
                writeln!(out, "{id}")?;
            }
        }
    }
    writeln!(out, "{TOKENS_END}")?;

    Ok(())
}

/// Output in JSON format, one document per line unless pretty-printed.
fn output_json<W: Write>(
    out: &mut W,
    result: &TokenizationResult,
    args: &WordPieceArgs,
) -> Result<()> {
    if args.pretty {
        serde_json::to_writer_pretty(&mut *out, result)?;
    } else {
        serde_json::to_writer(&mut *out, result)?;
    }
    writeln!(out)?;
    Ok(())
}
