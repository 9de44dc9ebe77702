//! Tag fragment interpreter.
//!
//! Turns one raw fragment such as `<img src='a.jpg' width=500/>` into a tag
//! name and an ordered attribute list. The interpreter never fails: whatever
//! it cannot make sense of is folded into the nearest plausible attribute.

use std::mem;

use sift_dom::Attributes;
use strum_macros::Display;

use crate::entities::unescape;

/// A tag fragment after interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFragment {
    /// Tag name as written. Empty when the fragment had no name, as in `< b>`.
    pub name: String,
    /// Attributes in source order, values entity-unescaped.
    pub attributes: Attributes,
    /// The fragment ended in `/>`.
    pub self_closing: bool,
    /// The fragment began with `</`.
    pub is_end_tag: bool,
}

/// Interpreter states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum InterpreterState {
    /// Reading the tag name.
    TagName,
    /// Whitespace between attributes.
    BetweenAttributes,
    /// Reading an attribute name.
    AttributeName,
    /// After `=`, skipping whitespace until the value starts.
    BeforeAttributeValue,
    /// Reading a value that ends at whitespace.
    AttributeValueUnquoted,
    /// Reading a value that ends at the next `'`.
    AttributeValueSingleQuoted,
    /// Reading a value that ends at the next `"`.
    AttributeValueDoubleQuoted,
}

/// Interpret one tag fragment, including its `<` and `>`.
#[must_use]
pub fn interpret(fragment: &str) -> TagFragment {
    let mut body = fragment.strip_prefix('<').unwrap_or(fragment);
    body = body.strip_suffix('>').unwrap_or(body);
    let (is_end_tag, mut body) = match body.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, body),
    };
    let self_closing = !is_end_tag && fragment.ends_with("/>");
    if self_closing {
        body = body.strip_suffix('/').unwrap_or(body);
    }

    let mut interpreter = Interpreter::new();
    for c in body.chars() {
        interpreter.consume(c);
    }
    interpreter.finish();

    TagFragment {
        name: interpreter.tag_name,
        attributes: interpreter.attributes,
        self_closing,
        is_end_tag,
    }
}

struct Interpreter {
    state: InterpreterState,
    buffer: String,
    tag_name: String,
    /// Name read before whitespace; becomes valued if `=` follows.
    pending_name: Option<String>,
    /// Name whose value is being read.
    value_name: String,
    attributes: Attributes,
}

impl Interpreter {
    const fn new() -> Self {
        Self {
            state: InterpreterState::TagName,
            buffer: String::new(),
            tag_name: String::new(),
            pending_name: None,
            value_name: String::new(),
            attributes: Attributes::new(),
        }
    }

    const fn switch_to(&mut self, state: InterpreterState) {
        self.state = state;
    }

    fn consume(&mut self, c: char) {
        match self.state {
            InterpreterState::TagName => {
                if c.is_whitespace() {
                    self.tag_name = mem::take(&mut self.buffer);
                    self.switch_to(InterpreterState::BetweenAttributes);
                } else {
                    self.buffer.push(c);
                }
            }
            InterpreterState::BetweenAttributes => match c {
                c if c.is_whitespace() => {}
                '=' => {
                    if let Some(name) = self.pending_name.take() {
                        self.value_name = name;
                        self.switch_to(InterpreterState::BeforeAttributeValue);
                    }
                }
                // A quote with no name to attach to carries nothing.
                '\'' | '"' => self.commit_pending(),
                _ => {
                    self.commit_pending();
                    self.buffer.push(c);
                    self.switch_to(InterpreterState::AttributeName);
                }
            },
            InterpreterState::AttributeName => match c {
                c if c.is_whitespace() => {
                    self.pending_name = Some(mem::take(&mut self.buffer));
                    self.switch_to(InterpreterState::BetweenAttributes);
                }
                '=' => {
                    self.value_name = mem::take(&mut self.buffer);
                    self.switch_to(InterpreterState::BeforeAttributeValue);
                }
                '\'' | '"' => {
                    let name = mem::take(&mut self.buffer);
                    self.commit_boolean(name);
                    self.switch_to(InterpreterState::BetweenAttributes);
                }
                _ => self.buffer.push(c),
            },
            InterpreterState::BeforeAttributeValue => match c {
                c if c.is_whitespace() => {}
                '\'' => self.switch_to(InterpreterState::AttributeValueSingleQuoted),
                '"' => self.switch_to(InterpreterState::AttributeValueDoubleQuoted),
                _ => {
                    self.buffer.push(c);
                    self.switch_to(InterpreterState::AttributeValueUnquoted);
                }
            },
            InterpreterState::AttributeValueUnquoted => {
                if c.is_whitespace() {
                    self.commit_value();
                } else {
                    self.buffer.push(c);
                }
            }
            InterpreterState::AttributeValueSingleQuoted => {
                if c == '\'' {
                    self.commit_value();
                } else {
                    self.buffer.push(c);
                }
            }
            InterpreterState::AttributeValueDoubleQuoted => {
                if c == '"' {
                    self.commit_value();
                } else {
                    self.buffer.push(c);
                }
            }
        }
    }

    /// End of fragment: whatever is half-read is committed as-is.
    fn finish(&mut self) {
        match self.state {
            InterpreterState::TagName => self.tag_name = mem::take(&mut self.buffer),
            InterpreterState::BetweenAttributes => self.commit_pending(),
            InterpreterState::AttributeName => {
                let name = mem::take(&mut self.buffer);
                self.commit_boolean(name);
            }
            InterpreterState::BeforeAttributeValue
            | InterpreterState::AttributeValueUnquoted
            | InterpreterState::AttributeValueSingleQuoted
            | InterpreterState::AttributeValueDoubleQuoted => self.commit_value(),
        }
    }

    fn commit_pending(&mut self) {
        if let Some(name) = self.pending_name.take() {
            self.commit_boolean(name);
        }
    }

    /// Attributes without a value take their own name as value.
    fn commit_boolean(&mut self, name: String) {
        if !name.is_empty() {
            self.attributes.push(name.clone(), name);
        }
    }

    fn commit_value(&mut self) {
        let name = mem::take(&mut self.value_name);
        let value = mem::take(&mut self.buffer);
        if !name.is_empty() {
            self.attributes.push(name, unescape(&value).into_owned());
        }
        self.switch_to(InterpreterState::BetweenAttributes);
    }
}
