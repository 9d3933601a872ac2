//! Diagnostic text for failed style assertions.
//!
//! A failed comparison renders as the matcher hint, the expected and
//! received declarations (sorted by property, indented by two spaces) and a
//! line per mismatched property. Errors render as the hint followed by the
//! error message; syntax errors also show the failing CSS.

use std::fmt::Write;

use crate::css::model::DeclarationBlock;
use crate::matcher::{StyleComparison, StyleError};
use crate::style::engine::{Mismatch, MismatchReason, ShorthandHint};

/// The first line of every report.
pub fn matcher_hint(negated: bool) -> &'static str {
    if negated {
        "expect(element).not.to_have_style()"
    } else {
        "expect(element).to_have_style()"
    }
}

/// Declarations sorted by property, one per line: `  prop: value;`.
///
/// When `names` is given, every name is printed, with an empty value for
/// properties the block does not contain.
pub fn print_styles(block: &DeclarationBlock, names: Option<&DeclarationBlock>) -> String {
    let mut lines: Vec<(String, String)> = match names {
        Some(names) => names
            .properties()
            .map(|name| {
                let value = block
                    .get(name)
                    .map(|d| d.value.clone())
                    .unwrap_or_default();
                (name.to_string(), value)
            })
            .collect(),
        None => block
            .iter()
            .map(|d| (d.property.clone(), d.value.clone()))
            .collect(),
    };
    lines.sort();
    lines
        .iter()
        .map(|(name, value)| format!("  {name}: {value};"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a comparison whose verdict disagreed with the asserted polarity.
pub fn render_comparison(comparison: &StyleComparison, negated: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", matcher_hint(negated));
    out.push('\n');
    let _ = writeln!(out, "Expected:");
    let _ = writeln!(out, "{}", print_styles(&comparison.expected, None));
    let _ = writeln!(out, "Received:");
    out.push_str(&print_styles(&comparison.received, Some(&comparison.expected)));

    if !comparison.result.mismatches.is_empty() {
        out.push_str("\n\nMismatched properties:");
        for mismatch in &comparison.result.mismatches {
            let _ = write!(out, "\n  {}", describe_mismatch(mismatch));
        }
    }
    out
}

/// Render an error raised before comparison.
pub fn render_error(error: &StyleError, negated: bool) -> String {
    let hint = matcher_hint(negated);
    match error {
        StyleError::CssSyntax(err) => {
            format!("{hint}\n\n{err}\n\nFailing css:\n{}", err.css)
        }
        StyleError::InvalidElement(err) => {
            format!("{hint}\n\n{err}\nReceived: {}", err.received)
        }
    }
}

fn describe_mismatch(mismatch: &Mismatch) -> String {
    let property = &mismatch.property;
    match mismatch.reason {
        MismatchReason::Different => format!(
            "{property}: expected \"{}\", received \"{}\"",
            mismatch.expected,
            mismatch.actual.as_deref().unwrap_or_default()
        ),
        MismatchReason::Unrecognized => format!("{property}: not a recognized property"),
        MismatchReason::Missing => match &mismatch.hint {
            None => format!("{property}: missing"),
            Some(ShorthandHint::LonghandsPresent {
                longhands,
                round_trips,
                ..
            }) => format!(
                "{property}: missing, longhands present: {}{}",
                longhands.join(", "),
                expansion_note(*round_trips)
            ),
            Some(ShorthandHint::ShorthandPresent {
                shorthand,
                round_trips,
            }) => format!(
                "{property}: missing, set through shorthand {shorthand}{}",
                expansion_note(*round_trips)
            ),
        },
    }
}

fn expansion_note(round_trips: bool) -> &'static str {
    if round_trips {
        " (shorthands are not expanded)"
    } else {
        " (border shorthands never match their longhands)"
    }
}
