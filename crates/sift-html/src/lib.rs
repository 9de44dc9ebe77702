//! Tolerant HTML/XML parser.
//!
//! # Scope
//!
//! This crate implements:
//! - **Tag interpreter**: one `<tag attr=...>` fragment to a name and an
//!   ordered attribute multimap, recovering from stray quotes and loose `=`.
//! - **Tokenizer**: a streaming state machine yielding start tags, end tags,
//!   text, and processing instructions, with literal scanning of script and
//!   style bodies and silent skipping of comments.
//! - **Tree builder**: grows a [`sift_dom::Document`] from the event stream,
//!   auto-closing mismatched elements and ignoring stray end tags.
//!
//! Malformed markup never fails a parse. The only error is a broken stream.
//!
//! # Not Implemented
//!
//! - HTML5 tree construction (insertion modes, foster parenting)
//! - XML namespaces and validation
//! - Character encoding detection

use std::io::BufRead;

use sift_dom::Document;

/// Tree construction from tokenizer events.
pub mod builder;
/// Character reference decoding.
pub mod entities;
/// Parse errors.
pub mod error;
/// Tag fragment interpretation.
pub mod interpreter;
/// Parser configuration.
pub mod options;
/// Position-tracking character reader.
pub mod reader;
/// Streaming markup tokenizer.
pub mod tokenizer;

pub use builder::{IssueKind, ParseIssue, TreeBuilder};
pub use entities::unescape;
pub use error::ParseError;
pub use interpreter::{TagFragment, interpret};
pub use options::ParseOptions;
pub use reader::{CountingReader, Position};
pub use tokenizer::{Event, Tokenizer, TokenizerState};

/// Parse a document from a buffered stream with the default options.
///
/// `base_url` is stored on the document root and not otherwise interpreted.
///
/// # Errors
///
/// Returns [`ParseError::Stream`] if the stream cannot be read or is not
/// valid UTF-8.
pub fn parse_document(base_url: &str, reader: impl BufRead) -> Result<Document, ParseError> {
    TreeBuilder::new(base_url, reader).run()
}

/// Parse an in-memory document with the default options.
///
/// # Errors
///
/// Never fails in practice: reading from a string cannot produce an I/O
/// error. The `Result` mirrors [`parse_document`].
pub fn parse_str(base_url: &str, markup: &str) -> Result<Document, ParseError> {
    parse_document(base_url, markup.as_bytes())
}
