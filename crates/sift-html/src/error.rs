//! Errors surfaced by the parser.

use std::io;

use thiserror::Error;

/// The only hard failure while parsing: the input stream itself broke.
///
/// Malformed markup is never an error; see
/// [`ParseIssue`](crate::ParseIssue) for what gets recorded instead.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Reading the character stream failed, or it was not valid UTF-8.
    #[error("failed to read markup stream: {0}")]
    Stream(#[from] io::Error),
}
