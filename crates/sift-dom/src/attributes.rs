//! Ordered attribute multimap.

/// A single `name="value"` pair as it appeared in the markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name, as written.
    pub name: String,
    /// Attribute value, already entity-unescaped.
    pub value: String,
}

/// Attributes of an element, in source order.
///
/// Names are not unique: `<meta content="a" content="b">` keeps both values.
/// Lookups by name return the first-inserted value; [`Attributes::get_all`]
/// returns every value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<Attribute>,
}

impl Attributes {
    /// Create an empty attribute list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an attribute. Existing attributes with the same name are kept.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push(Attribute {
            name: name.into(),
            value: value.into(),
        });
    }

    /// First value stored under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Every value stored under `name`, in insertion order.
    pub fn get_all<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a str> {
        self.entries
            .iter()
            .filter(move |attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Whether at least one attribute is named `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|attr| attr.name == name)
    }

    /// Whether `value` is among the values stored under `name`.
    #[must_use]
    pub fn has_value(&self, name: &str, value: &str) -> bool {
        self.get_all(name).any(|v| v == value)
    }

    /// Distinct attribute names in order of first appearance.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for attr in &self.entries {
            if !names.contains(&attr.name.as_str()) {
                names.push(&attr.name);
            }
        }
        names
    }

    /// All attributes in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.entries.iter()
    }

    /// Total number of stored pairs, counting repeated names.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no attributes are stored.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut attributes = Self::new();
        for (name, value) in iter {
            attributes.push(name, value);
        }
        attributes
    }
}
