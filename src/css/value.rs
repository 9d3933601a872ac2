//! Value normalization: one canonical spelling per value.
//!
//! Values are lexed into components (words, strings, functions, separators)
//! and written back out in a canonical form:
//!
//! - whitespace runs become one space, leading/trailing whitespace is dropped
//! - no space inside parentheses, `", "` between comma-separated items, no
//!   space around `/`
//! - keywords and function names are ASCII-lowercased; string contents,
//!   `url(...)` arguments, custom-property values and author-defined
//!   identifiers (`animation-name: FadeIn`) keep their case
//! - in color-bearing properties every color becomes `rgba(r, g, b, a)`
//!
//! Two values are equivalent iff their canonical forms are equal.

use std::fmt;
use std::ops::Range;

use logos::Logos;
use tracing::trace;

use crate::config::MatchConfig;
use crate::css::color::{is_color_function, is_color_property, parse_color_word, Rgba};
use crate::css::properties::{has_custom_idents, is_custom_property, is_ident_keyword, lookup_name};

/// Token produced by the value lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum ValueToken {
    #[regex(r"[ \t\n\r\f]+")]
    Whitespace,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r"'([^'\\\n]|\\.)*'")]
    Str,

    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    #[token(",")]
    Comma,

    #[token("/")]
    Slash,

    #[regex(r#"[^ \t\n\r\f(),/'"]+"#)]
    Word,
}

/// One component of a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    /// Keyword, number, dimension, hash.
    Word(String),
    /// Quoted string, quotes included.
    Str(String),
    /// `name(args)`. The name is empty for a bare parenthesized group.
    Function {
        name: String,
        args: Vec<Component>,
        /// Argument text as written, for `url(...)`.
        raw_args: String,
    },
    Comma,
    Slash,
    Space,
}

/// Split a value into components.
///
/// Never fails: input the lexer cannot match (an unterminated quote) is kept
/// as a word.
pub fn parse_components(value: &str) -> Vec<Component> {
    let lexemes = ValueToken::lexer(value)
        .spanned()
        .map(|(result, span)| (result.ok(), span))
        .collect();
    let mut parser = ComponentParser {
        source: value,
        lexemes,
        cursor: 0,
    };
    parser.parse_list(false)
}

struct ComponentParser<'a> {
    source: &'a str,
    lexemes: Vec<(Option<ValueToken>, Range<usize>)>,
    cursor: usize,
}

impl ComponentParser<'_> {
    /// Parse components up to (not including) the `)` that closes a nested
    /// list, or to the end of input.
    fn parse_list(&mut self, nested: bool) -> Vec<Component> {
        let source = self.source;
        let mut out = Vec::new();

        while let Some((token, span)) = self.lexemes.get(self.cursor).cloned() {
            let text = &source[span.clone()];
            match token {
                Some(ValueToken::ParenClose) if nested => break,
                Some(ValueToken::ParenOpen) => {
                    let name = self.take_function_name(&mut out, span.start);
                    self.cursor += 1;
                    let args = self.parse_list(true);
                    let args_end = match self.lexemes.get(self.cursor) {
                        Some((Some(ValueToken::ParenClose), close)) => {
                            let end = close.start;
                            self.cursor += 1;
                            end
                        }
                        _ => source.len(),
                    };
                    out.push(Component::Function {
                        name,
                        args,
                        raw_args: source[span.end..args_end].to_string(),
                    });
                    continue;
                }
                Some(ValueToken::Whitespace) => out.push(Component::Space),
                Some(ValueToken::Comma) => out.push(Component::Comma),
                Some(ValueToken::Slash) => out.push(Component::Slash),
                Some(ValueToken::Str) => out.push(Component::Str(text.to_string())),
                Some(ValueToken::Word) | Some(ValueToken::ParenClose) | None => {
                    out.push(Component::Word(text.to_string()))
                }
            }
            self.cursor += 1;
        }

        out
    }

    /// A word immediately followed by `(` is the function's name.
    fn take_function_name(&self, out: &mut Vec<Component>, paren_start: usize) -> String {
        let adjacent_word = self.cursor > 0
            && matches!(
                self.lexemes.get(self.cursor - 1),
                Some((Some(ValueToken::Word), prev)) if prev.end == paren_start
            );
        if adjacent_word {
            if let Some(Component::Word(name)) = out.pop() {
                return name;
            }
        }
        String::new()
    }
}

/// Canonical form of a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalValue(String);

impl CanonicalValue {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalize a value of `property` with the default configuration.
pub fn normalize_value(property: &str, value: &str) -> CanonicalValue {
    normalize_value_with(&MatchConfig::default(), property, value)
}

/// Normalize a value of `property`.
pub fn normalize_value_with(config: &MatchConfig, property: &str, value: &str) -> CanonicalValue {
    let name = lookup_name(property);
    let custom = is_custom_property(&name);
    let case = if custom || !config.fold_keyword_case {
        Case::Keep
    } else if has_custom_idents(&name) {
        Case::KeywordsOnly
    } else {
        Case::Fold
    };
    let context = Context {
        colors: config.normalize_colors && !custom && is_color_property(&name),
        case,
    };

    let mut out = String::with_capacity(value.len());
    write_list(&mut out, &parse_components(value), context);
    trace!(property, value, canonical = %out, "normalized value");
    CanonicalValue(out)
}

/// Returns `true` if two values of `property` are equivalent.
pub fn values_equivalent(config: &MatchConfig, property: &str, left: &str, right: &str) -> bool {
    normalize_value_with(config, property, left) == normalize_value_with(config, property, right)
}

#[derive(Debug, Clone, Copy)]
struct Context {
    colors: bool,
    case: Case,
}

/// How words are case-folded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Case {
    /// Every word and function name.
    Fold,
    /// Function names and the keywords usable beside identifiers; other
    /// words are identifiers and keep their case.
    KeywordsOnly,
    Keep,
}

/// What was written last, to decide on the separator before the next item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gap {
    Start,
    Item,
    Space,
    Comma,
    Slash,
}

fn write_list(out: &mut String, components: &[Component], context: Context) {
    let mut gap = Gap::Start;
    for component in components {
        match component {
            Component::Space => {
                if gap == Gap::Item {
                    gap = Gap::Space;
                }
            }
            Component::Comma => {
                out.push(',');
                gap = Gap::Comma;
            }
            Component::Slash => {
                out.push('/');
                gap = Gap::Slash;
            }
            item => {
                if matches!(gap, Gap::Space | Gap::Comma) {
                    out.push(' ');
                }
                write_item(out, item, context);
                gap = Gap::Item;
            }
        }
    }
}

fn write_item(out: &mut String, item: &Component, context: Context) {
    match item {
        Component::Word(word) => {
            if let Some(color) = context.colors.then(|| parse_color_word(word)).flatten() {
                out.push_str(&color.to_string());
            } else if context.case == Case::Fold
                || (context.case == Case::KeywordsOnly && is_ident_keyword(word))
            {
                out.push_str(&word.to_ascii_lowercase());
            } else {
                out.push_str(word);
            }
        }
        Component::Str(raw) => {
            let inner = &raw[1..raw.len() - 1];
            if inner.contains('"') {
                out.push_str(raw);
            } else {
                out.push('"');
                out.push_str(inner);
                out.push('"');
            }
        }
        Component::Function {
            name,
            args,
            raw_args,
        } => {
            let name = if context.case != Case::Keep {
                name.to_ascii_lowercase()
            } else {
                name.clone()
            };

            if name.eq_ignore_ascii_case("url") {
                out.push_str(&name);
                out.push('(');
                out.push_str(raw_args.trim());
                out.push(')');
                return;
            }

            let mut inner = String::new();
            write_list(&mut inner, args, context);

            if context.colors && is_color_function(&name) {
                if let Some(color) = Rgba::parse(&format!("{name}({inner})")) {
                    out.push_str(&color.to_string());
                    return;
                }
            }

            out.push_str(&name);
            out.push('(');
            out.push_str(&inner);
            out.push(')');
        }
        Component::Comma | Component::Slash | Component::Space => {}
    }
}
