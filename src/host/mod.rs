//! Host capabilities the matcher depends on, and an in-memory host.
//!
//! The matcher never talks to a DOM directly. It asks a host three things:
//!
//! - [`ElementGuard`]: is this value an element whose style can be inspected?
//! - [`ComputedStyle`]: what declarations are applied to it?
//! - [`StyleSandbox`]: give me a scratch style target so a style object can be
//!   turned into declaration text the way the host would.
//!
//! [`Document`] implements all three for tests and for callers without a
//! live DOM.

pub mod document;
pub mod known;
pub mod node;

pub use document::{Document, ScratchStyle};
pub use node::{ElementId, Namespace};

use crate::css::model::DeclarationBlock;

/// The value handed to the matcher is not an inspectable element.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("received value must be an HTMLElement or an SVGElement.")]
pub struct InvalidElementError {
    /// Short description of what was received, for diagnostics.
    pub received: String,
}

impl InvalidElementError {
    pub fn new(received: impl Into<String>) -> Self {
        Self {
            received: received.into(),
        }
    }
}

/// Rejects values that are not HTML or SVG elements.
pub trait ElementGuard<E: ?Sized> {
    fn check_element(&self, element: &E) -> Result<(), InvalidElementError>;
}

/// Provides the applied (cascaded and inline) declarations of an element.
pub trait ComputedStyle<E: ?Sized> {
    fn computed_style(&self, element: &E) -> DeclarationBlock;
}

/// Produces fresh, empty style targets.
pub trait StyleSandbox {
    type Target: StyleTarget;

    fn scratch(&self) -> Self::Target;
}

/// A writable inline style, such as a detached element's `style` attribute.
pub trait StyleTarget {
    /// Apply one declaration. Returns `false` if the target rejected it.
    fn set_property(&mut self, name: &str, value: &str) -> bool;

    /// The accepted declarations as text, `a: b; c: d;`.
    fn css_text(&self) -> String;
}
