//! Command implementations for the wordpiece CLI.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use log::{debug, info};
use rayon::prelude::*;

use crate::cli::args::WordPieceArgs;
use crate::cli::output::{TokenizationResult, output_result};
use crate::config::TokenizerConfig;
use crate::error::Result;
use crate::pipeline::Pipeline;

/// Execute the CLI: load the configuration, tokenize the inputs, print them.
pub fn execute_command(args: WordPieceArgs) -> Result<()> {
    let config = TokenizerConfig::from_file(&args.config)?;
    let pipeline = Pipeline::from_config(&config, args.pipeline_options())?;

    let results = if args.inputs.is_empty() {
        debug!("No input file given, reading one line from stdin");
        let line = read_line(io::stdin().lock())?;
        vec![tokenize_text(&pipeline, &line, &args)?]
    } else {
        tokenize_files(&pipeline, &args.inputs, &args)?
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for result in &results {
        output_result(&mut out, result, &args)?;
    }
    out.flush()?;

    Ok(())
}

/// Tokenize the given files in parallel. Results are in argument order and the
/// first unreadable file aborts the run.
pub fn tokenize_files<P>(
    pipeline: &Pipeline,
    paths: &[P],
    args: &WordPieceArgs,
) -> Result<Vec<TokenizationResult>>
where
    P: AsRef<Path> + Sync,
{
    paths
        .par_iter()
        .map(|path| {
            let path = path.as_ref();
            let text = read_input(path)?;
            info!("Tokenizing {} ({} bytes)", path.display(), text.len());

            let mut result = tokenize_text(pipeline, &text, args)?;
            result.source = Some(path.display().to_string());
            result.text = Some(text);
            Ok(result)
        })
        .collect()
}

/// Tokenize one text. The result carries neither source nor echo.
pub fn tokenize_text(
    pipeline: &Pipeline,
    text: &str,
    args: &WordPieceArgs,
) -> Result<TokenizationResult> {
    let (tokens, ids) = pipeline.encode(text, args.split_special_tokens)?;
    let vocab = pipeline.vocabulary();

    let tokens = args.show_tokens.then(|| {
        std::iter::once(vocab.bos_token().to_string())
            .chain(tokens.into_iter().map(|t| t.text))
            .chain(std::iter::once(vocab.eos_token().to_string()))
            .collect()
    });

    Ok(TokenizationResult {
        source: None,
        text: None,
        ids,
        tokens,
    })
}

/// Read a whole file, replacing invalid UTF-8 with U+FFFD.
pub fn read_input(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| {
        io::Error::new(e.kind(), format!("cannot read {}: {e}", path.display()))
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Read one line, without its line terminator, replacing invalid UTF-8 with
/// U+FFFD. End of input gives an empty line.
pub fn read_line<R: BufRead>(mut reader: R) -> Result<String> {
    let mut buf = Vec::new();
    reader.read_until(b'\n', &mut buf)?;

    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }

    Ok(String::from_utf8_lossy(&buf).into_owned())
}
