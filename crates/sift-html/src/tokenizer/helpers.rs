//! Helper functions for the tokenizer.
//!
//! This module contains the pieces the main loop delegates to:
//! - State transitions
//! - Event emission and text flushing
//! - Tag fragment dispatch
//! - Sub-scans for raw text, comments, and CDATA

use std::io::{self, BufRead};
use std::mem;

use tracing::debug;

use super::event::Event;
use super::machine::{CDATA_OPEN, Tokenizer, TokenizerState};
use crate::entities::unescape;
use crate::interpreter::interpret;
use crate::reader::Position;

/// Result of scanning forward for a terminator.
pub(super) struct Scan {
    /// Everything read before the terminator.
    pub(super) content: String,
    /// Where the terminator started, if it was found before end of input.
    pub(super) terminator_at: Option<Position>,
}

// =============================================================================
// State Transition Helpers
// =============================================================================

impl<R: BufRead> Tokenizer<R> {
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }
}

// =============================================================================
// Emission Helpers
// =============================================================================

impl<R: BufRead> Tokenizer<R> {
    pub(super) fn emit(&mut self, event: Event) {
        self.pending.push_back(event);
    }

    /// Emit accumulated character data, unescaped.
    pub(super) fn flush_text(&mut self) {
        if self.text.is_empty() {
            return;
        }
        let text = mem::take(&mut self.text);
        let decoded = unescape(&text).into_owned();
        self.emit(Event::Text(decoded));
    }

    /// End of input. An unterminated tag is kept as literal text.
    pub(super) fn finish(&mut self) {
        match self.state {
            TokenizerState::Default => self.flush_text(),
            TokenizerState::InsideTag
            | TokenizerState::InsideTagSingleQuote
            | TokenizerState::InsideTagDoubleQuote => {
                let fragment = mem::take(&mut self.tag);
                debug!(at = %self.tag_start, "unterminated tag at end of input");
                self.emit(Event::Text(fragment));
            }
        }
        self.switch_to(TokenizerState::Default);
        self.finished = true;
    }
}

// =============================================================================
// Tag Dispatch
// =============================================================================

impl<R: BufRead> Tokenizer<R> {
    /// A complete fragment from `<` to `>` has been read.
    pub(super) fn end_of_tag(&mut self) -> io::Result<()> {
        let fragment = mem::take(&mut self.tag);
        let position = self.tag_start;
        self.switch_to(TokenizerState::Default);

        if let Some(instruction) = fragment.strip_prefix("<?") {
            self.emit_processing_instruction(instruction);
            return Ok(());
        }
        if fragment.starts_with("<!") {
            debug!(at = %position, "discarding declaration {fragment}");
            return Ok(());
        }

        let tag = interpret(&fragment);
        if tag.is_end_tag {
            if !tag.name.is_empty() {
                self.emit(Event::EndTag {
                    name: tag.name,
                    position,
                });
            }
            return Ok(());
        }
        if tag.name.is_empty() {
            // `a < b > c`: not a tag at all.
            self.emit(Event::Text(fragment));
            return Ok(());
        }

        let name = tag.name;
        self.emit(Event::StartTag {
            name: name.clone(),
            attributes: tag.attributes,
            position,
        });
        if tag.self_closing {
            self.emit(Event::EndTag { name, position });
        } else if self.options.is_raw_text(&name) {
            self.scan_raw_text(name)?;
        }
        Ok(())
    }

    fn emit_processing_instruction(&mut self, instruction: &str) {
        let body = instruction.strip_suffix('>').unwrap_or(instruction);
        let body = body.strip_suffix('?').unwrap_or(body).trim();
        let (target, data) = body
            .split_once(char::is_whitespace)
            .unwrap_or((body, ""));
        self.emit(Event::ProcessingInstruction {
            target: target.to_string(),
            data: data.trim().to_string(),
        });
    }
}

// =============================================================================
// Sub-scans
// =============================================================================

impl<R: BufRead> Tokenizer<R> {
    /// Read until `terminator` (optionally ASCII case-insensitive) or end of
    /// input. The terminator itself is consumed and not returned.
    pub(super) fn scan_until(&mut self, terminator: &str, ignore_case: bool) -> io::Result<Scan> {
        let first = terminator.chars().next();
        let mut content = String::new();
        let mut marker = None;
        while let Some(c) = self.reader.next_char()? {
            if Some(c) == first {
                marker = Some(self.reader.last_position());
            }
            content.push(c);
            if ends_with(&content, terminator, ignore_case) {
                content.truncate(content.len() - terminator.len());
                return Ok(Scan {
                    content,
                    terminator_at: marker,
                });
            }
        }
        Ok(Scan {
            content,
            terminator_at: None,
        })
    }

    /// Script and style bodies run verbatim up to `</name`, whatever they
    /// contain. The rest of the closing tag is skipped up to its `>`.
    pub(super) fn scan_raw_text(&mut self, name: String) -> io::Result<()> {
        let terminator = format!("</{name}");
        let scan = self.scan_until(&terminator, true)?;
        debug!(
            element = %name,
            chars = scan.content.chars().count(),
            closed = scan.terminator_at.is_some(),
            "scanned raw text"
        );
        if !scan.content.is_empty() {
            self.emit(Event::Text(scan.content));
        }
        if let Some(position) = scan.terminator_at {
            while let Some(c) = self.reader.next_char()? {
                if c == '>' {
                    break;
                }
            }
            self.emit(Event::EndTag { name, position });
        }
        Ok(())
    }

    /// Comments produce no events; an unterminated one swallows the rest of
    /// the input.
    pub(super) fn skip_comment(&mut self) -> io::Result<()> {
        self.tag.clear();
        self.switch_to(TokenizerState::Default);
        let _ = self.scan_until("-->", false)?;
        Ok(())
    }

    pub(super) fn scan_cdata(&mut self) -> io::Result<()> {
        debug_assert_eq!(self.tag, CDATA_OPEN);
        self.tag.clear();
        self.switch_to(TokenizerState::Default);
        let scan = self.scan_until("]]>", false)?;
        if !scan.content.is_empty() {
            self.emit(Event::Text(scan.content));
        }
        Ok(())
    }
}

fn ends_with(haystack: &str, suffix: &str, ignore_case: bool) -> bool {
    let (haystack, suffix) = (haystack.as_bytes(), suffix.as_bytes());
    if haystack.len() < suffix.len() {
        return false;
    }
    let tail = &haystack[haystack.len() - suffix.len()..];
    if ignore_case {
        tail.eq_ignore_ascii_case(suffix)
    } else {
        tail == suffix
    }
}

