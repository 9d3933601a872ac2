//! In-memory document: a slotmap arena of HTML/SVG elements with styles.
//!
//! There is no selector matching and no cascade. Sheet declarations are
//! applied to an element explicitly; inline declarations are layered on top
//! when the applied style is read back.

use slotmap::SlotMap;
use tracing::trace;

use crate::css::model::{Declaration, DeclarationBlock};
use crate::css::parser::{parse_declarations, CssSyntaxError};
use crate::css::properties::lookup_name;
use crate::host::known::is_known_property;
use crate::host::node::{ElementData, ElementId, Namespace, NodeData};
use crate::host::{ComputedStyle, ElementGuard, InvalidElementError, StyleSandbox, StyleTarget};

/// An arena of document nodes.
pub struct Document {
    nodes: SlotMap<ElementId, NodeData>,
    document: ElementId,
}

impl Document {
    /// Create a document containing only its document node.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let document = nodes.insert(NodeData::Document);
        Self { nodes, document }
    }

    /// The document node. Not an element.
    pub fn document_node(&self) -> ElementId {
        self.document
    }

    /// Create an HTML element.
    pub fn create_element(&mut self, tag: impl Into<String>) -> ElementId {
        self.nodes
            .insert(NodeData::Element(ElementData::new(tag, Namespace::Html)))
    }

    /// Create an SVG element.
    pub fn create_svg_element(&mut self, tag: impl Into<String>) -> ElementId {
        self.nodes
            .insert(NodeData::Element(ElementData::new(tag, Namespace::Svg)))
    }

    /// Create a text node.
    pub fn create_text(&mut self, content: impl Into<String>) -> ElementId {
        self.nodes.insert(NodeData::Text(content.into()))
    }

    /// Replace an element's `style` attribute.
    ///
    /// Unknown properties are dropped. Does nothing for non-elements.
    pub fn set_style_attribute(&mut self, id: ElementId, css: &str) -> Result<(), CssSyntaxError> {
        let block = recognized(parse_declarations(css)?);
        if let Some(el) = self.element_mut(id) {
            el.inline_style = block;
        }
        Ok(())
    }

    /// Set one inline property. Returns `false` if it was rejected.
    pub fn set_inline_property(&mut self, id: ElementId, name: &str, value: &str) -> bool {
        let Some(el) = self.element_mut(id) else {
            return false;
        };
        let mut target = ScratchStyle {
            block: std::mem::take(&mut el.inline_style),
        };
        let accepted = target.set_property(name, value);
        el.inline_style = target.block;
        accepted
    }

    /// Apply the declarations of a matched stylesheet rule to an element.
    ///
    /// Later sheets override earlier ones property by property.
    pub fn apply_sheet(&mut self, id: ElementId, css: &str) -> Result<(), CssSyntaxError> {
        let block = recognized(parse_declarations(css)?);
        if let Some(el) = self.element_mut(id) {
            el.sheet_style.extend_from(&block);
        }
        Ok(())
    }

    /// Remove a node. Returns its data, or `None` if it didn't exist.
    ///
    /// The document node cannot be removed.
    pub fn remove(&mut self, id: ElementId) -> Option<NodeData> {
        if id == self.document {
            return None;
        }
        self.nodes.remove(id)
    }

    /// Immutable access to a node's data.
    pub fn get(&self, id: ElementId) -> Option<&NodeData> {
        self.nodes.get(id)
    }

    /// Whether the document contains a node with the given id.
    pub fn contains(&self, id: ElementId) -> bool {
        self.nodes.contains_key(id)
    }

    fn element_mut(&mut self, id: ElementId) -> Option<&mut ElementData> {
        self.nodes.get_mut(id).and_then(NodeData::as_element_mut)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Keep only declarations the host recognizes, with lower-cased names.
fn recognized(block: DeclarationBlock) -> DeclarationBlock {
    block
        .iter()
        .filter(|d| is_known_property(&d.property))
        .map(|d| Declaration::new(lookup_name(&d.property), d.value.clone(), d.important))
        .collect()
}

impl ElementGuard<ElementId> for Document {
    fn check_element(&self, element: &ElementId) -> Result<(), InvalidElementError> {
        match self.nodes.get(*element) {
            Some(NodeData::Element(_)) => Ok(()),
            Some(other) => Err(InvalidElementError::new(other.describe())),
            None => Err(InvalidElementError::new("removed node")),
        }
    }
}

impl ComputedStyle<ElementId> for Document {
    fn computed_style(&self, element: &ElementId) -> DeclarationBlock {
        let Some(el) = self.nodes.get(*element).and_then(NodeData::as_element) else {
            return DeclarationBlock::new();
        };
        let mut style = el.sheet_style.clone();
        style.extend_from(&el.inline_style);
        trace!(tag = %el.tag, declarations = style.len(), "computed style");
        style
    }
}

impl StyleSandbox for Document {
    type Target = ScratchStyle;

    fn scratch(&self) -> ScratchStyle {
        ScratchStyle::default()
    }
}

/// A detached inline style.
///
/// Accepts a declaration when the property is recognized and the value is a
/// non-empty single value that parses on its own.
#[derive(Debug, Clone, Default)]
pub struct ScratchStyle {
    block: DeclarationBlock,
}

impl ScratchStyle {
    /// The accepted declarations.
    pub fn declarations(&self) -> &DeclarationBlock {
        &self.block
    }
}

impl StyleTarget for ScratchStyle {
    fn set_property(&mut self, name: &str, value: &str) -> bool {
        if !is_known_property(name) || value.trim().is_empty() || value.contains(['{', '}']) {
            return false;
        }
        let Ok(parsed) = parse_declarations(&format!("{name}: {value}")) else {
            return false;
        };
        let mut declarations = parsed.iter();
        let (Some(declaration), None) = (declarations.next(), declarations.next()) else {
            return false;
        };
        if declaration.property != name || declaration.value.is_empty() {
            return false;
        }
        self.block.insert(Declaration::new(
            lookup_name(name),
            declaration.value.clone(),
            declaration.important,
        ));
        true
    }

    fn css_text(&self) -> String {
        self.block.to_css_text()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_document_node_is_not_an_element() {
        let doc = Document::new();
        let err = doc.check_element(&doc.document_node()).unwrap_err();
        assert_eq!(err.received, "Document");
        assert_eq!(
            err.to_string(),
            "received value must be an HTMLElement or an SVGElement."
        );
    }

    #[test]
    fn test_html_and_svg_elements_pass_the_guard() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        let circle = doc.create_svg_element("circle");
        assert!(doc.check_element(&div).is_ok());
        assert!(doc.check_element(&circle).is_ok());
    }

    #[test]
    fn test_text_and_removed_nodes_fail_the_guard() {
        let mut doc = Document::new();
        let text = doc.create_text("hello");
        let div = doc.create_element("div");
        doc.remove(div);
        assert_eq!(doc.check_element(&text).unwrap_err().received, "Text");
        assert_eq!(doc.check_element(&div).unwrap_err().received, "removed node");
    }

    #[test]
    fn test_document_node_cannot_be_removed() {
        let mut doc = Document::new();
        assert!(doc.remove(doc.document_node()).is_none());
        assert!(doc.contains(doc.document_node()));
    }

    #[test]
    fn test_inline_overrides_sheet() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        doc.apply_sheet(div, "display: block; color: red").unwrap();
        doc.set_style_attribute(div, "color: blue").unwrap();
        let style = doc.computed_style(&div);
        assert_eq!(style.get("display").map(|d| d.value.as_str()), Some("block"));
        assert_eq!(style.get("color").map(|d| d.value.as_str()), Some("blue"));
    }

    #[test]
    fn test_later_sheets_override_earlier() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        doc.apply_sheet(div, "color: red; height: 1px").unwrap();
        doc.apply_sheet(div, "color: green").unwrap();
        let style = doc.computed_style(&div);
        assert_eq!(style.to_css_text(), "color: green; height: 1px;");
    }

    #[test]
    fn test_unknown_properties_are_not_applied() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        doc.set_style_attribute(div, "whatever: anything; Display: flex").unwrap();
        assert_eq!(doc.computed_style(&div).to_css_text(), "display: flex;");
    }

    #[test]
    fn test_style_attribute_syntax_error() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        let err = doc.set_style_attribute(div, "color red").unwrap_err();
        assert_eq!(err.reason, "property missing ':'");
    }

    #[test]
    fn test_set_inline_property() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        assert!(doc.set_inline_property(div, "opacity", "0.5"));
        assert!(!doc.set_inline_property(div, "nope", "1"));
        assert_eq!(doc.computed_style(&div).to_css_text(), "opacity: 0.5;");
    }

    #[test]
    fn test_computed_style_of_non_element_is_empty() {
        let mut doc = Document::new();
        let text = doc.create_text("x");
        assert!(doc.computed_style(&text).is_empty());
    }

    #[test]
    fn test_scratch_accepts_known_properties() {
        let doc = Document::new();
        let mut scratch = doc.scratch();
        assert!(scratch.set_property("background-color", "blue"));
        assert!(scratch.set_property("--brand", "#fff"));
        assert!(scratch.set_property("-webkit-transition", "opacity 1s"));
        assert_eq!(
            scratch.css_text(),
            "background-color: blue; --brand: #fff; -webkit-transition: opacity 1s;"
        );
    }

    #[test]
    fn test_scratch_rejects_unknown_and_malformed() {
        let doc = Document::new();
        let mut scratch = doc.scratch();
        assert!(!scratch.set_property("whatever", "anything"));
        assert!(!scratch.set_property("color", ""));
        assert!(!scratch.set_property("color", "   "));
        assert!(!scratch.set_property("color", "red; height: 1px"));
        assert!(!scratch.set_property("color", "red }"));
        assert_eq!(scratch.css_text(), "");
        assert!(scratch.declarations().is_empty());
    }

    #[test]
    fn test_scratch_last_write_wins() {
        let doc = Document::new();
        let mut scratch = doc.scratch();
        scratch.set_property("color", "red");
        scratch.set_property("display", "block");
        scratch.set_property("color", "blue");
        assert_eq!(scratch.css_text(), "color: blue; display: block;");
    }

    #[test]
    fn test_scratch_keeps_important() {
        let doc = Document::new();
        let mut scratch = doc.scratch();
        assert!(scratch.set_property("color", "red !important"));
        assert_eq!(scratch.css_text(), "color: red !important;");
    }
}
