//! Errors raised while compiling a parser from options.

use thiserror::Error;

/// Parsing itself never fails; only building a [`super::SourceParser`] can.
#[derive(Debug, Error)]
pub enum ParserError {
    #[error("at least one citation keyword is required")]
    NoKeywords,
    #[error("citation keyword at position {0} is blank")]
    BlankKeyword(usize),
    #[error("citation pattern failed to compile: {0}")]
    Pattern(#[from] regex::Error),
}
