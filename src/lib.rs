//! # style-matcher
//!
//! Assert that an element's applied CSS style contains an expected set of
//! declarations, comparing values by meaning rather than by spelling.
//!
//! Expectations are given as declaration text (`"color: white; height: 100%"`)
//! or as a camelCase style object. Property names match case-insensitively,
//! whitespace and keyword case are normalized, and colors compare by their
//! RGBA channels (`#123456` equals `rgb(18, 52, 86)`). Shorthands are never
//! expanded: a `border-bottom` expectation only matches a `border-bottom`
//! declaration.
//!
//! ## Core Systems
//!
//! - **[`css`]**: Declaration tokenizer and parser, property table, value and color normalization
//! - **[`style`]**: Style objects and the equivalence engine
//! - **[`host`]**: Host capability traits and an in-memory document
//! - **[`matcher`]**: The `to_have_style` assertion with positive/negated polarity
//! - **[`report`]**: Diagnostic text for failed assertions
//! - **[`config`]**: Comparison options
//!
//! ## Example
//!
//! ```
//! use style_matcher::host::Document;
//! use style_matcher::matcher::to_have_style;
//!
//! let mut doc = Document::new();
//! let div = doc.create_element("div");
//! doc.set_style_attribute(div, "background-color: #123456; height: 100%").unwrap();
//!
//! let result = to_have_style(&doc, &div, "background-color: rgb(18, 52, 86)").unwrap();
//! assert!(result.passed());
//! ```

pub mod config;

// Core systems
pub mod css;
pub mod style;

// Host and assertion
pub mod host;
pub mod matcher;
pub mod report;

pub use config::MatchConfig;
pub use matcher::{to_have_style, AssertionFailure, ExpectedStyle, StyleError, StyleMatcher};
