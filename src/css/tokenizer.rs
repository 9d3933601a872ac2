//! logos-based lexer for declaration blocks.
//!
//! The lexer only needs to find the punctuation that delimits declarations;
//! everything else is an opaque [`Token::Word`] whose source text is recovered
//! from its span. Comments are blanked out before lexing (see
//! [`crate::css::parser`]), so `/` and `*` are ordinary word characters here.
//!
//! Token priority in logos is determined by:
//! 1. Longest match wins
//! 2. For equal length matches, earlier-defined variants win
//!
//! [`Token::Word`] excludes every punctuation character and both quote
//! characters, so it never competes with the other variants.

use std::ops::Range;

use logos::Logos;

/// Token produced by the declaration-block lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    /// Double-quoted string literal, backslash escapes allowed.
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    StringLiteral,

    /// Single-quoted string literal.
    #[regex(r"'([^'\\\n]|\\.)*'")]
    StringLiteralSingle,

    /// `{`
    #[token("{")]
    BraceOpen,

    /// `}`
    #[token("}")]
    BraceClose,

    /// `(`
    #[token("(")]
    ParenOpen,

    /// `)`
    #[token(")")]
    ParenClose,

    /// `:`
    #[token(":")]
    Colon,

    /// `;`
    #[token(";")]
    Semicolon,

    /// `,`
    #[token(",")]
    Comma,

    /// `!`, as in `!important`.
    #[token("!")]
    Bang,

    /// Any other run of characters: property names, keywords, numbers,
    /// dimensions, hashes.
    #[regex(r#"[^ \t\n\r\f{}():;,!'"]+"#)]
    Word,
}

/// A token together with its byte span in the lexed source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
    pub token: Token,
    pub span: Range<usize>,
}

impl Lexeme {
    /// The source text covered by this lexeme.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.span.clone()]
    }
}

/// Lex a declaration block.
///
/// Returns `Err(offset)` with the byte offset of the first input the lexer
/// could not match. In practice that is an unterminated string literal.
pub fn lex(source: &str) -> Result<Vec<Lexeme>, usize> {
    let mut lexemes = Vec::new();
    for (result, span) in Token::lexer(source).spanned() {
        match result {
            Ok(token) => lexemes.push(Lexeme { token, span }),
            Err(()) => return Err(span.start),
        }
    }
    Ok(lexemes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        lex(input)
            .unwrap_or_else(|offset| panic!("lex failed at {offset}"))
            .into_iter()
            .map(|l| l.token)
            .collect()
    }

    fn words(input: &str) -> Vec<String> {
        let lexemes = lex(input).unwrap_or_else(|offset| panic!("lex failed at {offset}"));
        lexemes.iter().map(|l| l.text(input).to_string()).collect()
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(
            tokens("{ } ( ) : ; , !"),
            vec![
                Token::BraceOpen,
                Token::BraceClose,
                Token::ParenOpen,
                Token::ParenClose,
                Token::Colon,
                Token::Semicolon,
                Token::Comma,
                Token::Bang,
            ]
        );
    }

    #[test]
    fn test_simple_declaration() {
        assert_eq!(
            tokens("color: red;"),
            vec![Token::Word, Token::Colon, Token::Word, Token::Semicolon]
        );
    }

    #[test]
    fn test_words_keep_css_value_characters() {
        assert_eq!(
            words("height:100% ; border: 1px solid #fff"),
            vec!["height", ":", "100%", ";", "border", ":", "1px", "solid", "#fff"]
        );
    }

    #[test]
    fn test_function_call() {
        assert_eq!(
            tokens("rgb(18,52,86)"),
            vec![
                Token::Word,
                Token::ParenOpen,
                Token::Word,
                Token::Comma,
                Token::Word,
                Token::Comma,
                Token::Word,
                Token::ParenClose,
            ]
        );
    }

    #[test]
    fn test_string_literals() {
        let input = r#""a;b" 'c:d'"#;
        assert_eq!(
            tokens(input),
            vec![Token::StringLiteral, Token::StringLiteralSingle]
        );
        assert_eq!(words(input), vec![r#""a;b""#, "'c:d'"]);
    }

    #[test]
    fn test_escaped_quote_inside_string() {
        assert_eq!(tokens(r#""say \"hi\"""#), vec![Token::StringLiteral]);
    }

    #[test]
    fn test_important() {
        assert_eq!(
            tokens("color: red !important"),
            vec![Token::Word, Token::Colon, Token::Word, Token::Bang, Token::Word]
        );
    }

    #[test]
    fn test_custom_property_name_is_a_word() {
        assert_eq!(words("--Brand-Color: #abc"), vec!["--Brand-Color", ":", "#abc"]);
    }

    #[test]
    fn test_unterminated_string_reports_offset() {
        assert_eq!(lex("content: 'abc"), Err(9));
    }

    #[test]
    fn test_spans_are_byte_offsets() {
        let lexemes = lex("  a : b").unwrap_or_default();
        assert_eq!(lexemes[0].span, 2..3);
        assert_eq!(lexemes[1].span, 4..5);
        assert_eq!(lexemes[2].span, 6..7);
    }

    #[test]
    fn test_whitespace_only() {
        assert!(tokens(" \t\n\r ").is_empty());
    }
}
