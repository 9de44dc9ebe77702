//! CSS-subset selector engine over [`sift_dom`] documents.
//!
//! # Scope
//!
//! A selector is a chain of steps separated by whitespace (descendant) or
//! `>` (direct child). Each step may combine:
//! - a tag name or `*`
//! - any number of `.class` parts
//! - at most one `#id`
//! - `[attr]` presence tests and `[attr=value]` value tests, where the value
//!   may be quoted and is compared against every value of a repeated
//!   attribute
//!
//! How those predicates combine is set by [`MatchMode`].
//!
//! # Not Implemented
//!
//! - Sibling combinators (`+`, `~`) and selector groups (`,`)
//! - Pseudo-classes and pseudo-elements
//! - Attribute operators other than `=`

/// Compiled selector chains.
pub mod chain;
/// Selector errors.
pub mod error;
/// Selector tokenization.
pub mod lexer;
/// Chain search and the [`Select`] query trait.
pub mod search;
/// Single steps and matching.
pub mod selector;

pub use chain::SelectorChain;
pub use error::SelectorError;
pub use lexer::{StackToken, StepToken, tokenize_stack, tokenize_step};
pub use search::Select;
pub use selector::{MatchMode, Selector};
