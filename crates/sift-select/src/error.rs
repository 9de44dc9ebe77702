//! Selector syntax errors.

use thiserror::Error;

/// A selector string that cannot be compiled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// A `[` without its `]`, or a quote inside brackets that never closes.
    #[error("unterminated attribute bracket in selector {selector:?}")]
    UnterminatedBracket {
        /// The offending selector or step.
        selector: String,
    },
    /// A step naming two ids, as in `#a#b`.
    #[error("selector step {step:?} has more than one id")]
    DuplicateId {
        /// The offending step.
        step: String,
    },
    /// Nothing to match: the selector is empty or only combinators.
    #[error("empty selector")]
    Empty,
}
