//! Compiled selector chains.

use std::fmt;
use std::str::FromStr;

use crate::error::SelectorError;
use crate::lexer::{StackToken, tokenize_stack};
use crate::selector::{MatchMode, Selector};

/// A whole selector such as `div.article > p a[href]`, compiled into steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorChain {
    steps: Vec<Selector>,
    mode: MatchMode,
}

impl SelectorChain {
    /// Compile a selector with the default [`MatchMode`].
    ///
    /// A `>` marks the following step as a direct child of the previous
    /// one. A leading `>` restricts the first step to children of the node
    /// the search starts from; a trailing `>` is ignored.
    ///
    /// # Errors
    ///
    /// Returns a [`SelectorError`] if a bracket is unterminated, a step has
    /// two ids, or there are no steps at all.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let mut steps = Vec::new();
        let mut direct_child = false;
        for token in tokenize_stack(input)? {
            match token {
                StackToken::Child => direct_child = true,
                StackToken::Step(step) => {
                    steps.push(Selector::parse_step(&step, direct_child)?);
                    direct_child = false;
                }
            }
        }
        if steps.is_empty() {
            return Err(SelectorError::Empty);
        }
        Ok(Self {
            steps,
            mode: MatchMode::default(),
        })
    }

    /// The same chain, matching with `mode`.
    #[must_use]
    pub const fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// The compiled steps, outermost first. Never empty.
    #[must_use]
    pub fn steps(&self) -> &[Selector] {
        &self.steps
    }

    /// How each step combines its predicates.
    #[must_use]
    pub const fn match_mode(&self) -> MatchMode {
        self.mode
    }
}

impl FromStr for SelectorChain {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SelectorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            match (i, step.direct_child) {
                (0, true) => f.write_str("> ")?,
                (0, false) => {}
                (_, true) => f.write_str(" > ")?,
                (_, false) => f.write_str(" ")?,
            }
            write!(f, "{step}")?;
        }
        Ok(())
    }
}
