//! A single selector step and how it matches an element.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use sift_dom::NodeRef;
use strum_macros::{Display, EnumString};

use crate::error::SelectorError;
use crate::lexer::{StepToken, tokenize_step};

/// How the predicates of one step combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum MatchMode {
    /// Checks run in a fixed order and some of them decide alone: when
    /// classes are required, the class check is the whole answer; otherwise
    /// a bare `[attr]` check is the whole answer; attribute values are only
    /// consulted when neither applies. Existing extraction rules are written
    /// against this behaviour.
    #[default]
    Compatible,
    /// Every predicate must hold, as in CSS.
    Conjunctive,
}

/// One compiled step of a selector, such as `a.external[href]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    /// Required tag name, compared case-insensitively. `None` matches any tag.
    pub tag: Option<String>,
    /// Classes that must all be present.
    pub classes: BTreeSet<String>,
    /// Required `id`.
    pub id: Option<String>,
    /// Attributes that must be present, whatever their value.
    pub attributes: BTreeSet<String>,
    /// Attributes that must carry the given value among their values.
    pub attribute_values: BTreeMap<String, String>,
    /// Only immediate children of the previous step's match qualify.
    pub direct_child: bool,
}

impl Selector {
    /// Compile one step.
    ///
    /// # Errors
    ///
    /// [`SelectorError::UnterminatedBracket`] for an unclosed `[`, and
    /// [`SelectorError::DuplicateId`] for a second `#id`.
    pub fn parse_step(step: &str, direct_child: bool) -> Result<Self, SelectorError> {
        let mut selector = Self {
            direct_child,
            ..Self::default()
        };
        for token in tokenize_step(step)? {
            match token {
                StepToken::Tag(tag) => selector.tag = (tag != "*").then_some(tag),
                StepToken::Class(class) => {
                    let _ = selector.classes.insert(class);
                }
                StepToken::Id(id) => {
                    if selector.id.is_some() {
                        return Err(SelectorError::DuplicateId {
                            step: step.to_string(),
                        });
                    }
                    selector.id = Some(id);
                }
                StepToken::Attribute(raw) => selector.add_attribute(&raw),
            }
        }
        Ok(selector)
    }

    /// `name` or `name=value`, with surrounding whitespace and matching
    /// quotes around the value removed.
    fn add_attribute(&mut self, raw: &str) {
        match raw.split_once('=') {
            Some((name, value)) => {
                let name = name.trim();
                if !name.is_empty() {
                    let _ = self
                        .attribute_values
                        .insert(name.to_string(), strip_quotes(value.trim()).to_string());
                }
            }
            None => {
                let name = raw.trim();
                if !name.is_empty() {
                    let _ = self.attributes.insert(name.to_string());
                }
            }
        }
    }

    /// Whether `node` satisfies this step. The document root never does.
    #[must_use]
    pub fn matches(&self, node: NodeRef<'_>, mode: MatchMode) -> bool {
        let Some(tag) = node.tag_name() else {
            return false;
        };
        if let Some(required) = &self.tag
            && !required.eq_ignore_ascii_case(tag)
        {
            return false;
        }

        match mode {
            MatchMode::Compatible => {
                if !self.classes.is_empty() {
                    return self.matches_classes(node);
                }
                if !self.matches_id(node) {
                    return false;
                }
                if !self.attributes.is_empty() {
                    return self.matches_attributes(node);
                }
                self.matches_attribute_values(node)
            }
            MatchMode::Conjunctive => {
                self.matches_classes(node)
                    && self.matches_id(node)
                    && self.matches_attributes(node)
                    && self.matches_attribute_values(node)
            }
        }
    }

    fn matches_classes(&self, node: NodeRef<'_>) -> bool {
        let present = node.classes();
        self.classes.iter().all(|class| present.contains(class.as_str()))
    }

    fn matches_id(&self, node: NodeRef<'_>) -> bool {
        self.id
            .as_deref()
            .is_none_or(|id| node.element_id() == Some(id))
    }

    fn matches_attributes(&self, node: NodeRef<'_>) -> bool {
        let attributes = node.attributes();
        self.attributes.iter().all(|name| attributes.contains(name))
    }

    fn matches_attribute_values(&self, node: NodeRef<'_>) -> bool {
        let attributes = node.attributes();
        self.attribute_values
            .iter()
            .all(|(name, value)| attributes.has_value(name, value))
    }
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bare = self.classes.is_empty()
            && self.id.is_none()
            && self.attributes.is_empty()
            && self.attribute_values.is_empty();
        match &self.tag {
            Some(tag) => f.write_str(tag)?,
            None if bare => f.write_str("*")?,
            None => {}
        }
        for class in &self.classes {
            write!(f, ".{class}")?;
        }
        if let Some(id) = &self.id {
            write!(f, "#{id}")?;
        }
        for name in &self.attributes {
            write!(f, "[{name}]")?;
        }
        for (name, value) in &self.attribute_values {
            write!(f, "[{name}=\"{value}\"]")?;
        }
        Ok(())
    }
}
