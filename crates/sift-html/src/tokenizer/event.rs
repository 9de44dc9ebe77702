//! Tokenizer output.

use sift_dom::Attributes;

use crate::reader::Position;

/// A structural event in the markup stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// An opening tag.
    StartTag {
        /// Tag name as written.
        name: String,
        /// Attributes in source order, values unescaped.
        attributes: Attributes,
        /// Where the tag's `<` was read.
        position: Position,
    },
    /// A closing tag, explicit or synthesized for `<x/>` and raw-text bodies.
    EndTag {
        /// Tag name as written.
        name: String,
        /// Where the closing tag started, or the start tag's position when
        /// synthesized for a self-closing tag.
        position: Position,
    },
    /// Character data. Ordinary text is entity-unescaped; raw-text bodies and
    /// CDATA sections are passed through verbatim.
    Text(String),
    /// A `<?target data?>` construct.
    ProcessingInstruction {
        /// Text up to the first whitespace.
        target: String,
        /// Remaining text, trimmed.
        data: String,
    },
}

impl Event {
    /// The tag name for start and end tags.
    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Self::StartTag { name, .. } | Self::EndTag { name, .. } => Some(name),
            Self::Text(_) | Self::ProcessingInstruction { .. } => None,
        }
    }
}
