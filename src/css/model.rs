//! Declaration model: Declaration, DeclarationBlock.

use std::fmt;

use indexmap::IndexMap;

use crate::css::properties::{is_custom_property, lookup_name};

/// A single CSS property declaration, e.g. `color: red`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// The property name exactly as written, e.g. `"color"`, `"Align-items"`.
    pub property: String,
    /// The raw value text, trimmed, without any `!important` suffix.
    pub value: String,
    /// Whether `!important` was specified.
    pub important: bool,
}

impl Declaration {
    /// Create a new declaration.
    pub fn new(property: impl Into<String>, value: impl Into<String>, important: bool) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
            important,
        }
    }

    /// Serialize as `property: value` (with ` !important` when flagged).
    pub fn to_css(&self) -> String {
        if self.important {
            format!("{}: {} !important", self.property, self.value)
        } else {
            format!("{}: {}", self.property, self.value)
        }
    }
}

/// An ordered mapping from property name to [`Declaration`].
///
/// Keys are unique. Inserting a property that is already present replaces its
/// value but keeps its original position, so "last wins" for lookups while the
/// first-seen order is kept for display. Equality ignores order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationBlock {
    declarations: IndexMap<String, Declaration>,
}

impl DeclarationBlock {
    /// Create an empty block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a declaration, replacing any earlier one with the same name.
    pub fn insert(&mut self, declaration: Declaration) {
        self.declarations
            .insert(declaration.property.clone(), declaration);
    }

    /// Insert `property: value` without `!important`.
    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.insert(Declaration::new(property, value, false));
    }

    /// Set a declaration (builder).
    pub fn with(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    /// Remove a declaration by exact name, preserving the order of the rest.
    pub fn remove(&mut self, property: &str) -> Option<Declaration> {
        self.declarations.shift_remove(property)
    }

    /// Look up a declaration by exact name.
    pub fn get(&self, property: &str) -> Option<&Declaration> {
        self.declarations.get(property)
    }

    /// Look up a declaration ignoring ASCII case of the property name.
    ///
    /// Custom properties (`--name`) are case-sensitive and only match exactly.
    pub fn get_ignore_case(&self, property: &str) -> Option<&Declaration> {
        if let Some(found) = self.declarations.get(property) {
            return Some(found);
        }
        if is_custom_property(property) {
            return None;
        }
        let lowered = lookup_name(property);
        if let Some(found) = self.declarations.get(lowered.as_ref()) {
            return Some(found);
        }
        self.declarations
            .iter()
            .find(|(name, _)| !is_custom_property(name) && name.eq_ignore_ascii_case(property))
            .map(|(_, declaration)| declaration)
    }

    /// Returns `true` if a declaration with this exact name exists.
    pub fn contains(&self, property: &str) -> bool {
        self.declarations.contains_key(property)
    }

    /// Number of declarations.
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Returns `true` if there are no declarations.
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Iterate declarations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.values()
    }

    /// Iterate property names in insertion order.
    pub fn properties(&self) -> impl Iterator<Item = &str> {
        self.declarations.keys().map(String::as_str)
    }

    /// Overlay `other` on top of this block: its declarations win.
    pub fn extend_from(&mut self, other: &DeclarationBlock) {
        for declaration in other.iter() {
            self.insert(declaration.clone());
        }
    }

    /// Serialize as single-line declaration text: `a: b; c: d;`.
    ///
    /// An empty block serializes to the empty string.
    pub fn to_css_text(&self) -> String {
        self.iter()
            .map(|d| format!("{};", d.to_css()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl FromIterator<Declaration> for DeclarationBlock {
    fn from_iter<I: IntoIterator<Item = Declaration>>(iter: I) -> Self {
        let mut block = DeclarationBlock::new();
        for declaration in iter {
            block.insert(declaration);
        }
        block
    }
}

impl<'a> IntoIterator for &'a DeclarationBlock {
    type Item = &'a Declaration;
    type IntoIter = indexmap::map::Values<'a, String, Declaration>;

    fn into_iter(self) -> Self::IntoIter {
        self.declarations.values()
    }
}

/// One declaration per line, each terminated by `;`.
impl fmt::Display for DeclarationBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, declaration) in self.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{};", declaration.to_css())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let block = DeclarationBlock::new();
        assert!(block.is_empty());
        assert_eq!(block.len(), 0);
        assert_eq!(block.to_css_text(), "");
    }

    #[test]
    fn test_last_wins_keeps_first_position() {
        let mut block = DeclarationBlock::new();
        block.set("transition-property", "opacity");
        block.set("color", "red");
        block.set("transition-property", "top");

        assert_eq!(block.len(), 2);
        assert_eq!(block.get("transition-property").map(|d| d.value.as_str()), Some("top"));
        assert_eq!(
            block.properties().collect::<Vec<_>>(),
            vec!["transition-property", "color"]
        );
    }

    #[test]
    fn test_get_ignore_case() {
        let block = DeclarationBlock::new().with("align-items", "center");
        assert!(block.get("Align-items").is_none());
        assert_eq!(
            block.get_ignore_case("Align-items").map(|d| d.value.as_str()),
            Some("center")
        );
        assert_eq!(
            block.get_ignore_case("ALIGN-ITEMS").map(|d| d.value.as_str()),
            Some("center")
        );
    }

    #[test]
    fn test_get_ignore_case_finds_mixed_case_keys() {
        let block = DeclarationBlock::new().with("Background-Color", "blue");
        assert!(block.get_ignore_case("background-color").is_some());
    }

    #[test]
    fn test_custom_properties_are_case_sensitive() {
        let block = DeclarationBlock::new().with("--brand", "red");
        assert!(block.get_ignore_case("--brand").is_some());
        assert!(block.get_ignore_case("--Brand").is_none());
    }

    #[test]
    fn test_equality_ignores_order() {
        let a = DeclarationBlock::new().with("a", "1").with("b", "2");
        let b = DeclarationBlock::new().with("b", "2").with("a", "1");
        assert_eq!(a, b);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut block = DeclarationBlock::new()
            .with("a", "1")
            .with("b", "2")
            .with("c", "3");
        assert!(block.remove("b").is_some());
        assert_eq!(block.properties().collect::<Vec<_>>(), vec!["a", "c"]);
    }

    #[test]
    fn test_extend_from_overrides() {
        let mut sheet = DeclarationBlock::new()
            .with("background-color", "black")
            .with("color", "white");
        let inline = DeclarationBlock::new().with("background-color", "blue");
        sheet.extend_from(&inline);

        assert_eq!(
            sheet.get("background-color").map(|d| d.value.as_str()),
            Some("blue")
        );
        assert_eq!(sheet.get("color").map(|d| d.value.as_str()), Some("white"));
    }

    #[test]
    fn test_to_css_text() {
        let mut block = DeclarationBlock::new().with("color", "red");
        block.insert(Declaration::new("height", "100%", true));
        assert_eq!(block.to_css_text(), "color: red; height: 100% !important;");
    }

    #[test]
    fn test_display_one_per_line() {
        let block = DeclarationBlock::new().with("color", "red").with("height", "100%");
        assert_eq!(block.to_string(), "color: red;\nheight: 100%;");
    }

    #[test]
    fn test_from_iterator_last_wins() {
        let block: DeclarationBlock = vec![
            Declaration::new("color", "red", false),
            Declaration::new("color", "blue", false),
        ]
        .into_iter()
        .collect();
        assert_eq!(block.get("color").map(|d| d.value.as_str()), Some("blue"));
    }
}
