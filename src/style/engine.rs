//! Equivalence engine: does an element's applied style contain an expected
//! declaration block?
//!
//! For every expected property the actual declaration is looked up by name
//! (ASCII case-insensitive, custom properties exactly) and the two values
//! are compared in canonical form. Extra actual properties are ignored, and
//! an empty expectation passes. Shorthands are never expanded: a `border`
//! expectation only matches an actual `border` declaration.

use tracing::debug;

use crate::config::MatchConfig;
use crate::css::model::{Declaration, DeclarationBlock};
use crate::css::properties::{classify, find_shorthand, lookup_name, shorthands_setting, PropertyKind};
use crate::css::value::normalize_value_with;

/// Why an expected declaration did not match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MismatchReason {
    /// The property is absent from the actual style.
    Missing,
    /// The property is present with a different value.
    Different,
    /// The host did not recognize the expected entry, so it never reached
    /// the comparison.
    Unrecognized,
}

/// Related properties that explain a [`MismatchReason::Missing`] result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShorthandHint {
    /// The expected shorthand is absent, but some of its longhands are set.
    LonghandsPresent {
        shorthand: &'static str,
        longhands: Vec<&'static str>,
        round_trips: bool,
    },
    /// The expected longhand is absent, but a shorthand setting it is present.
    ShorthandPresent {
        shorthand: &'static str,
        round_trips: bool,
    },
}

/// One expected declaration that was not satisfied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// The property name as expected.
    pub property: String,
    pub kind: PropertyKind,
    pub reason: MismatchReason,
    /// The expected value as written.
    pub expected: String,
    /// The actual value as stored, when present.
    pub actual: Option<String>,
    pub hint: Option<ShorthandHint>,
}

/// Outcome of comparing an expectation with an actual style.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    /// Number of expected declarations compared.
    pub checked: usize,
    pub mismatches: Vec<Mismatch>,
}

impl MatchResult {
    /// Every expected declaration matched.
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// The mismatch for a property, if any.
    pub fn mismatch(&self, property: &str) -> Option<&Mismatch> {
        self.mismatches.iter().find(|m| m.property == property)
    }

    /// Record an expected entry that the host rejected before comparison.
    pub fn push_unrecognized(&mut self, declaration: &Declaration) {
        self.checked += 1;
        self.mismatches.push(Mismatch {
            property: declaration.property.clone(),
            kind: classify(&lookup_name(&declaration.property)),
            reason: MismatchReason::Unrecognized,
            expected: declaration.value.clone(),
            actual: None,
            hint: None,
        });
    }
}

/// Compare with the default configuration.
pub fn matches(actual: &DeclarationBlock, expected: &DeclarationBlock) -> MatchResult {
    matches_with(&MatchConfig::default(), actual, expected)
}

/// Compare every expected declaration against `actual`.
pub fn matches_with(
    config: &MatchConfig,
    actual: &DeclarationBlock,
    expected: &DeclarationBlock,
) -> MatchResult {
    let mut result = MatchResult::default();

    for declaration in expected {
        result.checked += 1;
        let property = declaration.property.as_str();
        let name = lookup_name(property);
        let kind = classify(&name);

        let Some(found) = actual.get_ignore_case(property) else {
            result.mismatches.push(Mismatch {
                property: property.to_string(),
                kind,
                reason: MismatchReason::Missing,
                expected: declaration.value.clone(),
                actual: None,
                hint: shorthand_hint(&name, kind, actual),
            });
            continue;
        };

        let expected_value = normalize_value_with(config, property, &declaration.value);
        let actual_value = normalize_value_with(config, property, &found.value);
        if expected_value != actual_value {
            result.mismatches.push(Mismatch {
                property: property.to_string(),
                kind,
                reason: MismatchReason::Different,
                expected: declaration.value.clone(),
                actual: Some(found.value.clone()),
                hint: None,
            });
        }
    }

    debug!(
        checked = result.checked,
        mismatches = result.mismatches.len(),
        passed = result.passed(),
        "style comparison"
    );
    result
}

fn shorthand_hint(name: &str, kind: PropertyKind, actual: &DeclarationBlock) -> Option<ShorthandHint> {
    match kind {
        PropertyKind::Shorthand => {
            let shorthand = find_shorthand(name)?;
            let longhands: Vec<&'static str> = shorthand
                .longhands
                .iter()
                .copied()
                .filter(|l| actual.get_ignore_case(l).is_some())
                .collect();
            (!longhands.is_empty()).then_some(ShorthandHint::LonghandsPresent {
                shorthand: shorthand.name,
                longhands,
                round_trips: shorthand.round_trips,
            })
        }
        PropertyKind::Longhand => shorthands_setting(name)
            .find(|s| actual.get_ignore_case(s.name).is_some())
            .map(|s| ShorthandHint::ShorthandPresent {
                shorthand: s.name,
                round_trips: s.round_trips,
            }),
    }
}
