//! Character reader that keeps track of where it is.

use std::fmt;
use std::io::{self, BufRead};

/// A location in the input stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Zero-based character offset.
    pub offset: u64,
    /// One-based line number.
    pub line: u32,
    /// One-based column, in characters.
    pub column: u32,
}

impl Position {
    /// The position of the first character of a stream.
    pub const START: Self = Self {
        offset: 0,
        line: 1,
        column: 1,
    };
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Reads characters one at a time from a [`BufRead`], counting offset, line
/// and column as it goes.
///
/// Lines end at `\n`, `\r`, or `\r\n`; the pair counts as one line break.
pub struct CountingReader<R> {
    inner: R,
    chunk: Vec<char>,
    cursor: usize,
    next: Position,
    last: Position,
    after_cr: bool,
    exhausted: bool,
}

impl<R: BufRead> CountingReader<R> {
    /// Wrap a buffered reader.
    pub const fn new(inner: R) -> Self {
        Self {
            inner,
            chunk: Vec::new(),
            cursor: 0,
            next: Position::START,
            last: Position::START,
            after_cr: false,
            exhausted: false,
        }
    }

    /// Consume the next character, or `None` at end of stream.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error, including `InvalidData` when the
    /// stream is not valid UTF-8.
    pub fn next_char(&mut self) -> io::Result<Option<char>> {
        if self.cursor >= self.chunk.len() && !self.fill()? {
            return Ok(None);
        }
        let Some(&c) = self.chunk.get(self.cursor) else {
            return Ok(None);
        };
        self.cursor += 1;
        self.advance(c);
        Ok(Some(c))
    }

    /// Position of the character most recently returned by
    /// [`CountingReader::next_char`].
    #[must_use]
    pub const fn last_position(&self) -> Position {
        self.last
    }

    /// Position of the next character to be read.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.next
    }

    fn fill(&mut self) -> io::Result<bool> {
        if self.exhausted {
            return Ok(false);
        }
        let mut line = String::new();
        if self.inner.read_line(&mut line)? == 0 {
            self.exhausted = true;
            return Ok(false);
        }
        self.chunk.clear();
        self.chunk.extend(line.chars());
        self.cursor = 0;
        Ok(true)
    }

    fn advance(&mut self, c: char) {
        self.last = self.next;
        self.next.offset += 1;
        match c {
            '\n' if self.after_cr => {}
            '\n' | '\r' => {
                self.next.line += 1;
                self.next.column = 1;
            }
            _ => self.next.column += 1,
        }
        self.after_cr = c == '\r';
    }
}
