//! Document tree builder.
//!
//! Consumes tokenizer events and grows a [`Document`], keeping a stack of
//! open elements whose top is the insertion cursor. Close tags are resolved leniently: an end tag
//! closes the nearest open element with that name and everything opened
//! inside it, and an end tag that matches nothing is dropped.

use std::collections::HashMap;
use std::fmt;
use std::io::BufRead;

use sift_dom::{Document, Node, NodeId};
use strum_macros::Display;
use tracing::{debug, warn};

use crate::error::ParseError;
use crate::options::ParseOptions;
use crate::reader::Position;
use crate::tokenizer::{Event, Tokenizer};

/// What kind of recoverable anomaly was seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum IssueKind {
    /// An end tag that matched no open element and was ignored.
    StrayEndTag,
    /// An element closed because an end tag for one of its ancestors arrived.
    ImplicitlyClosed,
    /// An element still open when the input ended.
    UnclosedAtEnd,
}

/// A recoverable anomaly met while building the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// What happened.
    pub kind: IssueKind,
    /// The tag involved, as written.
    pub tag: String,
    /// Character offset where the tag involved started.
    pub offset: u64,
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}> at offset {}", self.kind, self.tag, self.offset)
    }
}

/// Builds a [`Document`] from a character stream.
pub struct TreeBuilder<R> {
    tokenizer: Tokenizer<R>,
    sink: TreeSink,
}

impl<R: BufRead> TreeBuilder<R> {
    /// Builder with the default options.
    pub fn new(base_url: impl Into<String>, reader: R) -> Self {
        Self::with_options(base_url, reader, ParseOptions::default())
    }

    /// Builder with explicit options, shared by the tokenizer and the tree.
    pub fn with_options(base_url: impl Into<String>, reader: R, options: ParseOptions) -> Self {
        Self {
            tokenizer: Tokenizer::with_options(reader, options.clone()),
            sink: TreeSink::new(Document::new(base_url), options),
        }
    }

    /// Run the builder to the end of the stream and return the document.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Stream`] if the stream cannot be read.
    pub fn run(self) -> Result<Document, ParseError> {
        self.run_with_issues().map(|(document, _)| document)
    }

    /// Run the builder and return the document with every recoverable
    /// anomaly it worked around.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Stream`] if the stream cannot be read.
    pub fn run_with_issues(self) -> Result<(Document, Vec<ParseIssue>), ParseError> {
        let Self {
            tokenizer,
            mut sink,
        } = self;
        debug!("Parsing document: {}", sink.document.base_url());
        for event in tokenizer {
            sink.process_event(event?);
        }
        Ok(sink.finish())
    }
}

struct TreeSink {
    document: Document,
    /// Open elements, outermost first. The root is implicit.
    open: Vec<NodeId>,
    /// How many open elements carry each lowercased tag name.
    open_names: HashMap<String, usize>,
    options: ParseOptions,
    issues: Vec<ParseIssue>,
}

impl TreeSink {
    fn new(document: Document, options: ParseOptions) -> Self {
        Self {
            document,
            open: Vec::new(),
            open_names: HashMap::new(),
            options,
            issues: Vec::new(),
        }
    }

    /// The innermost open element.
    fn cursor(&self) -> NodeId {
        self.open.last().copied().unwrap_or(NodeId::ROOT)
    }

    fn process_event(&mut self, event: Event) {
        match event {
            Event::Text(text) => self.document.append_text(self.cursor(), text),
            Event::StartTag {
                name,
                attributes,
                position,
            } => {
                if self.options.is_self_terminating(&name) && self.cursor_has_tag(&name) {
                    self.close(&name, position);
                }
                let key = name.to_ascii_lowercase();
                let id = self
                    .document
                    .append_element(self.cursor(), name, attributes, position.offset);
                self.open.push(id);
                *self.open_names.entry(key).or_default() += 1;
            }
            Event::EndTag { name, position } => self.close(&name, position),
            Event::ProcessingInstruction { target, data } => {
                debug!(%target, %data, "processing instruction");
            }
        }
    }

    fn cursor_has_tag(&self, name: &str) -> bool {
        self.document
            .get(self.cursor())
            .is_some_and(|node| node.has_tag(name))
    }

    fn is_open(&self, name: &str) -> bool {
        self.open_names
            .get(&name.to_ascii_lowercase())
            .is_some_and(|count| *count > 0)
    }

    /// Pop the innermost open element.
    fn pop_open(&mut self) -> Option<NodeId> {
        let id = self.open.pop()?;
        if let Some(tag) = self.document.get(id).and_then(Node::tag_name)
            && let Some(count) = self.open_names.get_mut(&tag.to_ascii_lowercase())
        {
            *count = count.saturating_sub(1);
        }
        Some(id)
    }

    fn close(&mut self, name: &str, position: Position) {
        self.document.condense_text(self.cursor());
        let matched = if self.is_open(name) {
            self.open.iter().rposition(|id| {
                self.document
                    .get(*id)
                    .is_some_and(|node| node.has_tag(name))
            })
        } else {
            None
        };
        let Some(index) = matched else {
            debug!(tag = name, at = %position, "ignoring stray end tag");
            self.issues.push(ParseIssue {
                kind: IssueKind::StrayEndTag,
                tag: name.to_string(),
                offset: position.offset,
            });
            return;
        };

        // Everything above the match is closed with it, innermost first.
        while self.open.len() > index + 1 {
            if let Some(id) = self.pop_open() {
                self.record_element(IssueKind::ImplicitlyClosed, id);
                self.document.condense_text(self.cursor());
            }
        }
        let _ = self.pop_open();
    }

    fn finish(mut self) -> (Document, Vec<ParseIssue>) {
        if !self.open.is_empty() {
            warn!(
                url = self.document.base_url(),
                open = self.open.len(),
                "document ended with unclosed elements"
            );
        }
        while let Some(id) = self.pop_open() {
            self.document.condense_text(id);
            self.record_element(IssueKind::UnclosedAtEnd, id);
        }
        self.document.condense_text(NodeId::ROOT);
        debug!("Parsed {} nodes", self.document.len());
        (self.document, self.issues)
    }

    fn record_element(&mut self, kind: IssueKind, id: NodeId) {
        let Some(node) = self.document.get(id) else {
            return;
        };
        let tag = node.tag_name().unwrap_or_default().to_string();
        let offset = node.starting_offset();
        debug!(%kind, %tag, offset, "recovered");
        self.issues.push(ParseIssue { kind, tag, offset });
    }
}
