//! Selector tokenization.
//!
//! Two passes: [`tokenize_stack`] splits a full selector into steps and `>`
//! markers, then [`tokenize_step`] splits one step into its tag, class, id
//! and attribute parts. Both treat `[...]` as opaque, and quotes inside
//! brackets as opaque too, so `[title="a > b.c"]` survives intact.

use std::mem;

use tracing::debug;

use crate::error::SelectorError;

/// One token of a selector stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackToken {
    /// A step such as `a.class[href]`.
    Step(String),
    /// The `>` combinator.
    Child,
}

/// One token of a single step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepToken {
    /// Leading tag name, possibly `*`.
    Tag(String),
    /// `.name`, without the dot.
    Class(String),
    /// `#name`, without the hash.
    Id(String),
    /// `[...]`, without the brackets.
    Attribute(String),
}

/// Tracks whether we are inside `[...]`, and inside a quote there.
#[derive(Debug, Default)]
struct Brackets {
    open: bool,
    quote: Option<char>,
}

impl Brackets {
    const fn is_open(&self) -> bool {
        self.open
    }

    fn feed(&mut self, c: char) {
        match (self.open, self.quote) {
            (false, _) => self.open = c == '[',
            (true, Some(quote)) => {
                if c == quote {
                    self.quote = None;
                }
            }
            (true, None) => match c {
                ']' => self.open = false,
                '"' | '\'' => self.quote = Some(c),
                _ => {}
            },
        }
    }
}

/// Split a selector into steps and `>` markers.
///
/// Whitespace and `>` separate steps except inside brackets.
///
/// # Errors
///
/// [`SelectorError::UnterminatedBracket`] if a `[` is never closed.
pub fn tokenize_stack(input: &str) -> Result<Vec<StackToken>, SelectorError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut brackets = Brackets::default();

    for c in input.chars() {
        if brackets.is_open() {
            brackets.feed(c);
            current.push(c);
            continue;
        }
        match c {
            '[' => {
                brackets.feed(c);
                current.push(c);
            }
            '>' => {
                flush_step(&mut current, &mut tokens);
                tokens.push(StackToken::Child);
            }
            c if c.is_whitespace() => flush_step(&mut current, &mut tokens),
            _ => current.push(c),
        }
    }

    if brackets.is_open() {
        return Err(SelectorError::UnterminatedBracket {
            selector: input.to_string(),
        });
    }
    flush_step(&mut current, &mut tokens);
    Ok(tokens)
}

fn flush_step(current: &mut String, tokens: &mut Vec<StackToken>) {
    if !current.is_empty() {
        tokens.push(StackToken::Step(mem::take(current)));
    }
}

#[derive(Debug, Clone, Copy)]
enum Part {
    Tag,
    Class,
    Id,
    Attribute,
    /// Text after a `]` that starts no new part.
    Trailing,
}

/// Split one step into its parts.
///
/// Empty parts, as in `div.` or `[]`, are dropped.
///
/// # Errors
///
/// [`SelectorError::UnterminatedBracket`] if a `[` is never closed.
pub fn tokenize_step(step: &str) -> Result<Vec<StepToken>, SelectorError> {
    let mut tokens = Vec::new();
    let mut part = Part::Tag;
    let mut current = String::new();
    let mut brackets = Brackets::default();

    for c in step.chars() {
        if brackets.is_open() {
            brackets.feed(c);
            if brackets.is_open() {
                current.push(c);
            } else {
                push_part(Part::Attribute, mem::take(&mut current), &mut tokens);
                part = Part::Trailing;
            }
            continue;
        }
        match c {
            '.' | '#' | '[' => {
                push_part(part, mem::take(&mut current), &mut tokens);
                part = match c {
                    '.' => Part::Class,
                    '#' => Part::Id,
                    _ => {
                        brackets.feed(c);
                        Part::Attribute
                    }
                };
            }
            _ => current.push(c),
        }
    }

    if brackets.is_open() {
        return Err(SelectorError::UnterminatedBracket {
            selector: step.to_string(),
        });
    }
    push_part(part, current, &mut tokens);
    Ok(tokens)
}

fn push_part(part: Part, text: String, tokens: &mut Vec<StepToken>) {
    if text.is_empty() {
        return;
    }
    let token = match part {
        Part::Tag => StepToken::Tag(text),
        Part::Class => StepToken::Class(text),
        Part::Id => StepToken::Id(text),
        Part::Attribute => StepToken::Attribute(text),
        Part::Trailing => {
            debug!(ignored = %text, "text after attribute bracket");
            return;
        }
    };
    tokens.push(token);
}
