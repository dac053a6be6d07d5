//! Analyzers that combine char filters, a tokenizer and token filters.

pub mod analyzer;
pub mod pipeline;

pub use analyzer::Analyzer;
pub use pipeline::PipelineAnalyzer;
