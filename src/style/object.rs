//! Style objects: camelCase key/value maps turned into declaration text.
//!
//! Serialization goes through the host's [`StyleSandbox`]: each entry is
//! applied to a fresh scratch target, which silently drops what it does not
//! accept, and the target's resulting text is returned. The expectation is
//! therefore whatever the host itself would have stored for that object.

use std::fmt;

use tracing::trace;

use crate::css::model::Declaration;
use crate::css::properties::to_kebab_case;
use crate::host::{StyleSandbox, StyleTarget};

/// A style object value: text or a number.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Text(String),
    Number(f64),
}

/// Numbers print without a fractional part when they are whole (`1`, not
/// `1.0`).
impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Text(text) => f.write_str(text),
            StyleValue::Number(n) if n.fract() == 0.0 && n.is_finite() => {
                write!(f, "{}", *n as i64)
            }
            StyleValue::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for StyleValue {
    fn from(s: &str) -> Self {
        StyleValue::Text(s.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(s: String) -> Self {
        StyleValue::Text(s)
    }
}

impl From<f64> for StyleValue {
    fn from(n: f64) -> Self {
        StyleValue::Number(n)
    }
}

impl From<i32> for StyleValue {
    fn from(n: i32) -> Self {
        StyleValue::Number(f64::from(n))
    }
}

/// An ordered list of camelCase keys and values, e.g.
/// `{ backgroundColor: "blue", opacity: 0.5 }`.
///
/// Later entries with the same key override earlier ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleObject {
    entries: Vec<(String, StyleValue)>,
}

impl StyleObject {
    /// Create an empty object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry (builder).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add an entry.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<StyleValue>) {
        self.entries.push((key.into(), value.into()));
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<StyleValue>> FromIterator<(K, V)> for StyleObject {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut object = StyleObject::new();
        for (key, value) in iter {
            object.insert(key, value);
        }
        object
    }
}

/// Result of serializing a style object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SerializedStyle {
    /// The scratch target's text, `a: b; c: d;`. Empty when nothing was
    /// accepted.
    pub css_text: String,
    /// Entries the target rejected, with kebab-case names.
    pub rejected: Vec<Declaration>,
}

/// Serialize a style object to declaration text via the host's sandbox.
///
/// Keys are converted to kebab-case. Entries the scratch target rejects are
/// dropped; an object with no acceptable entries yields `""`.
pub fn serialize_style_object<S: StyleSandbox>(sandbox: &S, object: &StyleObject) -> String {
    serialize_style_object_detailed(sandbox, object).css_text
}

/// Like [`serialize_style_object`], also reporting the rejected entries.
pub fn serialize_style_object_detailed<S: StyleSandbox>(
    sandbox: &S,
    object: &StyleObject,
) -> SerializedStyle {
    let mut target = sandbox.scratch();
    let mut rejected = Vec::new();

    for (key, value) in object.iter() {
        let property = to_kebab_case(key);
        let value = value.to_string();
        if !target.set_property(&property, &value) {
            trace!(key, property = %property, value = %value, "style object entry rejected");
            rejected.push(Declaration::new(property, value, false));
        }
    }

    SerializedStyle {
        css_text: target.css_text(),
        rejected,
    }
}
