use std::collections::VecDeque;
use std::io::{self, BufRead};

use strum_macros::Display;

use super::event::Event;
use crate::error::ParseError;
use crate::options::ParseOptions;
use crate::reader::{CountingReader, Position};

/// Opens a comment; the body is skipped up to `-->`.
pub(super) const COMMENT_OPEN: &str = "<!--";
/// Opens a CDATA section; the body is passed through up to `]]>`.
pub(super) const CDATA_OPEN: &str = "<![CDATA[";

/// The tokenizer state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenizerState {
    /// Accumulating character data.
    Default,
    /// Accumulating a tag fragment after `<`.
    InsideTag,
    /// Inside a `'`-quoted stretch of a tag; `>` does not end the tag.
    InsideTagSingleQuote,
    /// Inside a `"`-quoted stretch of a tag; `>` does not end the tag.
    InsideTagDoubleQuote,
}

/// Streaming tokenizer over a buffered reader.
///
/// Yields `Result<Event, ParseError>`; after the first error or the end of
/// input the iterator is exhausted.
pub struct Tokenizer<R> {
    pub(super) reader: CountingReader<R>,
    pub(super) options: ParseOptions,
    pub(super) state: TokenizerState,
    /// Character data since the last tag.
    pub(super) text: String,
    /// The tag fragment being read, starting with its `<`.
    pub(super) tag: String,
    pub(super) tag_start: Position,
    pub(super) pending: VecDeque<Event>,
    pub(super) finished: bool,
}

impl<R: BufRead> Tokenizer<R> {
    /// Tokenizer with the default options.
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, ParseOptions::default())
    }

    /// Tokenizer with explicit options.
    pub fn with_options(reader: R, options: ParseOptions) -> Self {
        Self {
            reader: CountingReader::new(reader),
            options,
            state: TokenizerState::Default,
            text: String::new(),
            tag: String::new(),
            tag_start: Position::START,
            pending: VecDeque::new(),
            finished: false,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> TokenizerState {
        self.state
    }

    /// Position of the next character to be read.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.reader.position()
    }

    /// Consume one character and act on it.
    fn step(&mut self) -> io::Result<()> {
        let Some(c) = self.reader.next_char()? else {
            self.finish();
            return Ok(());
        };

        match self.state {
            TokenizerState::Default => {
                if c == '<' {
                    self.flush_text();
                    self.tag.push(c);
                    self.tag_start = self.reader.last_position();
                    self.switch_to(TokenizerState::InsideTag);
                } else {
                    self.text.push(c);
                }
            }
            TokenizerState::InsideTag => {
                self.tag.push(c);
                match c {
                    '>' => self.end_of_tag()?,
                    '\'' => self.switch_to(TokenizerState::InsideTagSingleQuote),
                    '"' => self.switch_to(TokenizerState::InsideTagDoubleQuote),
                    _ if self.tag == COMMENT_OPEN => self.skip_comment()?,
                    _ if self.tag == CDATA_OPEN => self.scan_cdata()?,
                    _ => {}
                }
            }
            TokenizerState::InsideTagSingleQuote => {
                self.tag.push(c);
                if c == '\'' {
                    self.switch_to(TokenizerState::InsideTag);
                }
            }
            TokenizerState::InsideTagDoubleQuote => {
                self.tag.push(c);
                if c == '"' {
                    self.switch_to(TokenizerState::InsideTag);
                }
            }
        }
        Ok(())
    }
}

impl<R: BufRead> Iterator for Tokenizer<R> {
    type Item = Result<Event, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(Ok(event));
            }
            if self.finished {
                return None;
            }
            if let Err(err) = self.step() {
                self.finished = true;
                self.pending.clear();
                return Some(Err(err.into()));
            }
        }
    }
}
