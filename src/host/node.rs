//! Node types for the in-memory document: ElementId, Namespace, NodeData.

use slotmap::new_key_type;

use crate::css::model::DeclarationBlock;

new_key_type! {
    /// Unique identifier for a document node. Copy, lightweight (u64).
    pub struct ElementId;
}

/// Element namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Html,
    Svg,
}

/// Data of an element node.
#[derive(Debug, Clone)]
pub struct ElementData {
    /// Tag name as created (e.g. "div", "circle").
    pub tag: String,
    pub namespace: Namespace,
    /// Declarations from the `style` attribute.
    pub inline_style: DeclarationBlock,
    /// Declarations applied from stylesheets, in application order.
    pub sheet_style: DeclarationBlock,
}

impl ElementData {
    pub fn new(tag: impl Into<String>, namespace: Namespace) -> Self {
        Self {
            tag: tag.into(),
            namespace,
            inline_style: DeclarationBlock::new(),
            sheet_style: DeclarationBlock::new(),
        }
    }
}

/// Data associated with a single document node.
#[derive(Debug, Clone)]
pub enum NodeData {
    /// The document node itself.
    Document,
    Element(ElementData),
    /// A text node and its content.
    Text(String),
}

impl NodeData {
    /// Short description used in element-guard failures.
    pub fn describe(&self) -> String {
        match self {
            NodeData::Document => "Document".to_string(),
            NodeData::Element(el) => format!("<{}>", el.tag),
            NodeData::Text(_) => "Text".to_string(),
        }
    }

    pub fn as_element(&self) -> Option<&ElementData> {
        match self {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match self {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }
}
