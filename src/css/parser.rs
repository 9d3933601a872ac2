//! Recursive descent parser for expected-style declaration blocks.
//!
//! The caller's text is wrapped in a synthetic rule (`selector { ... }`) and
//! parsed as a one-rule stylesheet; the declarations of that rule become a
//! [`DeclarationBlock`]. Uses the logos-based lexer from
//! [`crate::css::tokenizer`].
//!
//! Error reasons follow the wording of the stylesheet parser the matcher has
//! always reported, e.g. `property missing ':'` for `font-weight bold`.
//! One reason is this parser's own: an unterminated quote is rejected as
//! `unclosed string` rather than read into the value.

use tracing::{debug, trace};

use crate::css::model::{Declaration, DeclarationBlock};
use crate::css::tokenizer::{lex, Lexeme, Token};

/// Selector of the synthetic rule the declarations are wrapped in.
const SYNTHETIC_SELECTOR: &str = "selector";

/// A syntax error in expected CSS.
///
/// `line` and `column` are 1-based and refer to the caller's text, not to the
/// synthetic wrapper.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Syntax error parsing expected css: {reason} on line: {line}")]
pub struct CssSyntaxError {
    /// The parser's reason, e.g. `property missing ':'`.
    pub reason: String,
    pub line: usize,
    pub column: usize,
    /// The original text that failed to parse.
    pub css: String,
}

/// Parse a declaration block such as `color: red; height: 100%`.
///
/// The final semicolon is optional. Empty, whitespace-only and comment-only
/// input yields an empty block. Property names are kept exactly as written.
pub fn parse_declarations(css: &str) -> Result<DeclarationBlock, CssSyntaxError> {
    let prefix = format!("{SYNTHETIC_SELECTOR} {{ ");
    let wrapped = format!("{prefix}{css} }}");

    let result = blank_comments(&wrapped)
        .map_err(|offset| (offset, "End of comment missing"))
        .and_then(|source| {
            let lexemes = lex(&source).map_err(|offset| (offset, "unclosed string"))?;
            let mut parser = Parser {
                source: &source,
                lexemes,
                cursor: 0,
            };
            parser.parse_stylesheet()
        });

    match result {
        Ok(block) => {
            trace!(declarations = block.len(), "parsed expected css");
            Ok(block)
        }
        Err((offset, reason)) => {
            let local = offset.saturating_sub(prefix.len()).min(css.len());
            let (line, column) = line_and_column(css, local);
            debug!(reason, line, column, "expected css failed to parse");
            Err(CssSyntaxError {
                reason: reason.to_string(),
                line,
                column,
                css: css.to_string(),
            })
        }
    }
}

/// Replace every `/* ... */` comment with spaces, byte for byte.
///
/// Newlines inside comments are kept so line numbers stay correct, and every
/// other byte offset is unchanged. Comment openers inside string literals are
/// left alone. Returns `Err(offset)` for an unterminated comment.
fn blank_comments(input: &str) -> Result<String, usize> {
    let mut bytes = input.as_bytes().to_vec();
    let len = bytes.len();
    let mut quote: Option<u8> = None;
    let mut i = 0;

    while i < len {
        let b = bytes[i];
        match quote {
            Some(q) => {
                if b == b'\\' {
                    i += 1;
                } else if b == q || b == b'\n' {
                    quote = None;
                }
                i += 1;
            }
            None if b == b'"' || b == b'\'' => {
                quote = Some(b);
                i += 1;
            }
            None if b == b'/' && i + 1 < len && bytes[i + 1] == b'*' => {
                let start = i;
                i += 2;
                let mut found_end = false;
                while i + 1 < len {
                    if bytes[i] == b'*' && bytes[i + 1] == b'/' {
                        i += 2;
                        found_end = true;
                        break;
                    }
                    i += 1;
                }
                if !found_end {
                    return Err(start);
                }
                for byte in &mut bytes[start..i] {
                    if *byte != b'\n' {
                        *byte = b' ';
                    }
                }
            }
            None => i += 1,
        }
    }

    // Only whole comments were overwritten with ASCII, so this never replaces.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// 1-based line and column of a byte offset.
fn line_and_column(text: &str, offset: usize) -> (usize, usize) {
    let mut end = offset.min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    let before = &text[..end];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}

/// Returns `true` if `text` can start a declaration as a property name.
fn is_property_name(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii())
}

type Failure = (usize, &'static str);

/// Recursive descent parser state over the blanked, wrapped source.
struct Parser<'a> {
    source: &'a str,
    lexemes: Vec<Lexeme>,
    cursor: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Lexeme> {
        self.lexemes.get(self.cursor)
    }

    fn peek_token(&self) -> Option<Token> {
        self.peek().map(|l| l.token)
    }

    fn advance(&mut self) -> Option<&Lexeme> {
        let lexeme = self.lexemes.get(self.cursor)?;
        self.cursor += 1;
        Some(lexeme)
    }

    /// Byte offset of the current token, or the end of the source.
    fn current_offset(&self) -> usize {
        self.peek()
            .map(|l| l.span.start)
            .unwrap_or(self.source.len())
    }

    /// Parse the synthetic stylesheet and return the first rule's declarations.
    ///
    /// A `}` after a rule ends the stylesheet. Anything else there must be a
    /// further rule; it is parsed for errors and then discarded.
    fn parse_stylesheet(&mut self) -> Result<DeclarationBlock, Failure> {
        let block = self.parse_rule()?;
        while !matches!(self.peek_token(), None | Some(Token::BraceClose)) {
            self.parse_rule()?;
        }
        Ok(block)
    }

    /// Skip tokens up to the next `{` or the end of input.
    fn skip_selector(&mut self) {
        while self
            .peek_token()
            .is_some_and(|t| t != Token::BraceOpen)
        {
            self.advance();
        }
    }

    /// Parse a single rule: selector `{` declarations `}`.
    fn parse_rule(&mut self) -> Result<DeclarationBlock, Failure> {
        let offset = self.current_offset();
        self.skip_selector();
        if self.advance().map(|l| l.token) != Some(Token::BraceOpen) {
            return Err((offset, "missing '{'"));
        }
        self.parse_declarations()
    }

    /// Parse declarations up to and including the closing `}`.
    fn parse_declarations(&mut self) -> Result<DeclarationBlock, Failure> {
        let mut block = DeclarationBlock::new();

        loop {
            while self.peek_token() == Some(Token::Semicolon) {
                self.advance();
            }
            match self.peek() {
                Some(l) if l.token == Token::BraceClose => {
                    self.advance();
                    return Ok(block);
                }
                _ if self.at_property_name() => {
                    block.insert(self.parse_declaration()?);
                }
                _ => return Err((self.current_offset(), "missing '}'")),
            }
        }
    }

    fn at_property_name(&self) -> bool {
        self.peek()
            .is_some_and(|l| l.token == Token::Word && is_property_name(l.text(self.source)))
    }

    /// Parse a single declaration: `property: value [!important]`.
    ///
    /// The value runs to the next `;` outside parentheses, or to the closing
    /// `}`. Its text is taken verbatim from the source, then trimmed.
    fn parse_declaration(&mut self) -> Result<Declaration, Failure> {
        let source = self.source;
        let property = match self.advance() {
            Some(l) => l.text(source).to_string(),
            None => return Err((self.current_offset(), "missing '}'")),
        };

        if self.peek_token() != Some(Token::Colon) {
            return Err((self.current_offset(), "property missing ':'"));
        }
        self.advance();

        let first = self.cursor;
        let mut depth = 0usize;
        while let Some(token) = self.peek_token() {
            match token {
                Token::Semicolon if depth == 0 => break,
                Token::BraceClose => break,
                Token::ParenOpen => depth += 1,
                Token::ParenClose => depth = depth.saturating_sub(1),
                _ => {}
            }
            self.advance();
        }
        let mut value_tokens = &self.lexemes[first..self.cursor];

        let mut important = false;
        if let [rest @ .., bang, word] = value_tokens {
            if bang.token == Token::Bang
                && word.token == Token::Word
                && word.text(source).eq_ignore_ascii_case("important")
            {
                important = true;
                value_tokens = rest;
            }
        }

        let value = match (value_tokens.first(), value_tokens.last()) {
            (Some(start), Some(end)) => source[start.span.start..end.span.end].trim().to_string(),
            _ => String::new(),
        };

        if self.peek_token() == Some(Token::Semicolon) {
            self.advance();
        }

        Ok(Declaration::new(property, value, important))
    }
}
