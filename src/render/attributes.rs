//! Ordered HTML attribute map used by the icon renderer.

use serde::{Deserialize, Serialize};

// ============================================================================
// AttributeValue
// ============================================================================

/// An attribute value: a single string, or an ordered list of tokens that
/// serializes space-joined (the usual shape for `class`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(untagged)]
pub enum AttributeValue {
    Single(String),
    List(Vec<String>),
}

impl AttributeValue {
    /// Appends a token: single values grow by a separating space, lists gain
    /// a new entry.
    pub fn append(&mut self, token: &str) {
        match self {
            Self::Single(value) => {
                value.push(' ');
                value.push_str(token);
            }
            Self::List(values) => values.push(token.to_string()),
        }
    }

    fn write_to(&self, out: &mut String) {
        match self {
            Self::Single(value) => push_escaped(out, value),
            Self::List(values) => {
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        out.push(' ');
                    }
                    push_escaped(out, value);
                }
            }
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}

impl From<Vec<&str>> for AttributeValue {
    fn from(values: Vec<&str>) -> Self {
        Self::List(values.into_iter().map(str::to_string).collect())
    }
}

fn push_escaped(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
}

// ============================================================================
// Attributes
// ============================================================================

/// Insertion-ordered HTML attribute map.
///
/// Attribute order is preserved so rendered markup is deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    entries: Vec<(String, AttributeValue)>,
}

impl Attributes {
    /// Creates an empty attribute map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute, replacing any existing value under the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Looks up an attribute by name.
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Merges a token into an attribute: absent attributes are set to the
    /// token, existing ones grow via [`AttributeValue::append`].
    pub fn merge(&mut self, name: &str, token: &str) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, value)) => value.append(token),
            None => self
                .entries
                .push((name.to_string(), AttributeValue::from(token))),
        }
    }

    /// Returns `true` if no attributes are set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Serializes to `name="value"` pairs joined by single spaces, in
    /// insertion order. Double quotes inside values are escaped.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for (i, (name, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push_str(name);
            out.push_str("=\"");
            value.write_to(&mut out);
            out.push('"');
        }
        out
    }
}

impl<N, V> FromIterator<(N, V)> for Attributes
where
    N: Into<String>,
    V: Into<AttributeValue>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut attributes = Attributes::new();
        for (name, value) in iter {
            attributes.set(name, value);
        }
        attributes
    }
}

// ============================================================================
// Tests
// ============================================================================
