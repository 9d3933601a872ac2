//! The `to_have_style` assertion.
//!
//! Ties the pieces together: the host's element guard, parsing or
//! serializing the expectation, reading the applied style, running the
//! equivalence engine and finally applying the asserted polarity.
//!
//! Invalid elements and malformed CSS are errors, reported before any
//! comparison. They fail an assertion regardless of polarity, so a broken
//! expectation can never make a negated assertion pass.

use tracing::debug;

use crate::config::MatchConfig;
use crate::css::model::{Declaration, DeclarationBlock};
use crate::css::parser::{parse_declarations, CssSyntaxError};
use crate::host::{ComputedStyle, ElementGuard, InvalidElementError, StyleSandbox};
use crate::report;
use crate::style::engine::{matches_with, MatchResult};
use crate::style::object::{serialize_style_object_detailed, StyleObject};

/// The expectation handed to the matcher.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpectedStyle {
    /// Declaration text, e.g. `"color: white; height: 100%"`.
    Css(String),
    /// A camelCase style object.
    Object(StyleObject),
}

impl From<&str> for ExpectedStyle {
    fn from(css: &str) -> Self {
        ExpectedStyle::Css(css.to_string())
    }
}

impl From<String> for ExpectedStyle {
    fn from(css: String) -> Self {
        ExpectedStyle::Css(css)
    }
}

impl From<StyleObject> for ExpectedStyle {
    fn from(object: StyleObject) -> Self {
        ExpectedStyle::Object(object)
    }
}

/// Errors raised before a comparison can take place.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StyleError {
    #[error(transparent)]
    InvalidElement(#[from] InvalidElementError),

    #[error(transparent)]
    CssSyntax(#[from] CssSyntaxError),
}

/// A failed assertion. The message is the rendered diagnostic report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct AssertionFailure {
    pub message: String,
    /// Set when the assertion failed because of an error rather than a
    /// verdict.
    pub error: Option<StyleError>,
}

/// Everything a comparison produced, for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleComparison {
    /// The expectation as declarations, including entries the host rejected.
    pub expected: DeclarationBlock,
    /// The actual declarations for the expected properties that are present.
    pub received: DeclarationBlock,
    pub result: MatchResult,
}

impl StyleComparison {
    pub fn passed(&self) -> bool {
        self.result.passed()
    }
}

/// Runs `to_have_style` assertions against a host.
pub struct StyleMatcher<'h, H> {
    host: &'h H,
    config: MatchConfig,
}

impl<'h, H> StyleMatcher<'h, H> {
    /// Create a matcher with the default configuration.
    pub fn new(host: &'h H) -> Self {
        Self {
            host,
            config: MatchConfig::default(),
        }
    }

    /// Replace the configuration (builder).
    pub fn with_config(mut self, config: MatchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Compare an element's applied style with an expectation.
    pub fn evaluate<E>(
        &self,
        element: &E,
        expected: impl Into<ExpectedStyle>,
    ) -> Result<StyleComparison, StyleError>
    where
        E: ?Sized,
        H: ElementGuard<E> + ComputedStyle<E> + StyleSandbox,
    {
        self.host.check_element(element)?;

        let (expected, rejected) = match expected.into() {
            ExpectedStyle::Css(css) => (parse_declarations(&css)?, Vec::new()),
            ExpectedStyle::Object(object) => {
                let serialized = serialize_style_object_detailed(self.host, &object);
                (parse_declarations(&serialized.css_text)?, serialized.rejected)
            }
        };

        let actual = self.host.computed_style(element);
        let mut result = matches_with(&self.config, &actual, &expected);

        let mut shown = expected;
        for declaration in rejected {
            if shown.contains(&declaration.property) {
                continue;
            }
            result.push_unrecognized(&declaration);
            shown.insert(declaration);
        }

        let received = shown
            .iter()
            .filter_map(|d| {
                actual
                    .get_ignore_case(&d.property)
                    .map(|found| Declaration::new(d.property.clone(), found.value.clone(), found.important))
            })
            .collect();

        debug!(
            expected = shown.len(),
            mismatches = result.mismatches.len(),
            "evaluated to_have_style"
        );

        Ok(StyleComparison {
            expected: shown,
            received,
            result,
        })
    }

    /// Assert that the element has the expected style.
    pub fn assert<E>(
        &self,
        element: &E,
        expected: impl Into<ExpectedStyle>,
    ) -> Result<StyleComparison, AssertionFailure>
    where
        E: ?Sized,
        H: ElementGuard<E> + ComputedStyle<E> + StyleSandbox,
    {
        self.assert_polarity(element, expected.into(), false)
    }

    /// Assert that the element does not have the expected style.
    pub fn assert_not<E>(
        &self,
        element: &E,
        expected: impl Into<ExpectedStyle>,
    ) -> Result<StyleComparison, AssertionFailure>
    where
        E: ?Sized,
        H: ElementGuard<E> + ComputedStyle<E> + StyleSandbox,
    {
        self.assert_polarity(element, expected.into(), true)
    }

    fn assert_polarity<E>(
        &self,
        element: &E,
        expected: ExpectedStyle,
        negated: bool,
    ) -> Result<StyleComparison, AssertionFailure>
    where
        E: ?Sized,
        H: ElementGuard<E> + ComputedStyle<E> + StyleSandbox,
    {
        match self.evaluate(element, expected) {
            Err(error) => Err(AssertionFailure {
                message: report::render_error(&error, negated),
                error: Some(error),
            }),
            Ok(comparison) if comparison.passed() != negated => Ok(comparison),
            Ok(comparison) => Err(AssertionFailure {
                message: report::render_comparison(&comparison, negated),
                error: None,
            }),
        }
    }
}

/// Compare an element's applied style with an expectation using the default
/// configuration. No-match is a result, not an error.
pub fn to_have_style<H, E>(
    host: &H,
    element: &E,
    expected: impl Into<ExpectedStyle>,
) -> Result<MatchResult, StyleError>
where
    E: ?Sized,
    H: ElementGuard<E> + ComputedStyle<E> + StyleSandbox,
{
    StyleMatcher::new(host)
        .evaluate(element, expected)
        .map(|comparison| comparison.result)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::host::{Document, ElementId};
    use crate::style::engine::MismatchReason;

    fn label() -> (Document, ElementId) {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        doc.apply_sheet(div, "background-color: black; color: white").unwrap();
        doc.set_style_attribute(div, "background-color: blue; height: 100%").unwrap();
        (doc, div)
    }

    #[test]
    fn test_css_expectation() {
        let (doc, div) = label();
        let result = to_have_style(&doc, &div, "background-color: blue; color: white").unwrap();
        assert!(result.passed());
    }

    #[test]
    fn test_object_expectation() {
        let (doc, div) = label();
        let object = StyleObject::new().with("backgroundColor", "blue").with("height", "100%");
        assert!(to_have_style(&doc, &div, object).unwrap().passed());
    }

    #[test]
    fn test_unknown_object_entries_do_not_match() {
        let (doc, div) = label();
        let object = StyleObject::new().with("whatever", "anything");
        let result = to_have_style(&doc, &div, object).unwrap();
        assert!(!result.passed());
        assert_eq!(
            result.mismatch("whatever").map(|m| m.reason),
            Some(MismatchReason::Unrecognized)
        );
    }

    #[test]
    fn test_invalid_element() {
        let doc = Document::new();
        let err = to_have_style(&doc, &doc.document_node(), "color: red").unwrap_err();
        assert!(matches!(err, StyleError::InvalidElement(_)));
    }

    #[test]
    fn test_syntax_error_is_an_error() {
        let (doc, div) = label();
        let err = to_have_style(&doc, &div, "font-weight bold").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Syntax error parsing expected css: property missing ':' on line: 1"
        );
    }

    #[test]
    fn test_syntax_error_fails_both_polarities() {
        let (doc, div) = label();
        let matcher = StyleMatcher::new(&doc);
        let positive = matcher.assert(&div, "color white").unwrap_err();
        let negative = matcher.assert_not(&div, "font-weight bold").unwrap_err();
        assert!(matches!(positive.error, Some(StyleError::CssSyntax(_))));
        assert!(matches!(negative.error, Some(StyleError::CssSyntax(_))));
    }

    #[test]
    fn test_polarity() {
        let (doc, div) = label();
        let matcher = StyleMatcher::new(&doc);
        assert!(matcher.assert(&div, "color: white").is_ok());
        assert!(matcher.assert_not(&div, "color: white").is_err());
        assert!(matcher.assert_not(&div, "font-weight: bold").is_ok());
        let failure = matcher.assert(&div, "font-weight: bold").unwrap_err();
        assert!(failure.error.is_none());
        assert!(failure.message.starts_with("expect(element).to_have_style()"));
    }

    #[test]
    fn test_received_only_lists_expected_properties() {
        let (doc, div) = label();
        let comparison = StyleMatcher::new(&doc)
            .evaluate(&div, "color: white; font-weight: bold")
            .unwrap();
        assert_eq!(comparison.received.to_css_text(), "color: white;");
        assert_eq!(comparison.expected.len(), 2);
    }

    #[test]
    fn test_config_reaches_engine() {
        let mut doc = Document::new();
        let span = doc.create_element("span");
        doc.set_style_attribute(span, "color: rgb(0, 0, 0)").unwrap();
        let strict = StyleMatcher::new(&doc)
            .with_config(MatchConfig::new().with_color_normalization(false));
        assert!(!strict.config().normalize_colors);
        assert!(strict.assert(&span, "color: #000").is_err());
        assert!(StyleMatcher::new(&doc).assert(&span, "color: #000").is_ok());
    }
}
