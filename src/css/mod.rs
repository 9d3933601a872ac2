//! CSS text handling: tokenizer, declaration parser, property table, value
//! and color normalization.

pub mod color;
pub mod model;
pub mod parser;
pub mod properties;
pub mod tokenizer;
pub mod value;

pub use model::{Declaration, DeclarationBlock};
pub use parser::{parse_declarations, CssSyntaxError};
