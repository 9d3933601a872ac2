//! Expected-style inputs and the equivalence engine.

pub mod engine;
pub mod object;

pub use engine::{matches, matches_with, MatchResult, Mismatch, MismatchReason, ShorthandHint};
pub use object::{serialize_style_object, SerializedStyle, StyleObject, StyleValue};
