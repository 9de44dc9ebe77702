//! Parser configuration.

/// Knobs for the tokenizer and tree builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Elements whose bodies are scanned literally up to their end tag.
    pub raw_text_elements: Vec<String>,
    /// Elements closed implicitly when another element of the same name
    /// starts directly inside them.
    pub self_terminating: Vec<String>,
}

impl ParseOptions {
    /// Whether `name` is a raw-text element (case-insensitive).
    #[must_use]
    pub fn is_raw_text(&self, name: &str) -> bool {
        contains_ignore_case(&self.raw_text_elements, name)
    }

    /// Whether a repeated `name` start tag closes the open one.
    #[must_use]
    pub fn is_self_terminating(&self, name: &str) -> bool {
        contains_ignore_case(&self.self_terminating, name)
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            raw_text_elements: vec!["script".to_string(), "style".to_string()],
            self_terminating: vec!["p".to_string(), "li".to_string()],
        }
    }
}

fn contains_ignore_case(names: &[String], name: &str) -> bool {
    names.iter().any(|candidate| candidate.eq_ignore_ascii_case(name))
}
