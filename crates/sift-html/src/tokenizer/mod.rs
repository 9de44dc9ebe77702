//! Markup tokenizer.
//!
//! A forward-only state machine over a character stream that yields
//! structural [`Event`]s. Script and style bodies, comments, and CDATA
//! sections are handled by dedicated sub-scans inside the same pass.

/// Tokenizer state machine implementation.
pub mod machine;
/// Helper methods for state transitions, emission, and sub-scans.
pub mod helpers;
/// Events produced by the tokenizer.
pub mod event;

pub use machine::{Tokenizer, TokenizerState};
pub use event::Event;
