//! Property names: shorthand/longhand classification and name normalization.
//!
//! Classification is table-driven and exact. Many shorthand names are textual
//! prefixes of unrelated properties (`grid` vs. `grid-area` vs.
//! `grid-row-start`), and several shorthands expand to longhands that cannot
//! be derived from their own name (`place-items` sets `align-items` and
//! `justify-items`), so no prefix or suffix heuristics are used anywhere.

use std::borrow::Cow;

/// Whether a property sets several longhands at once or a single aspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Shorthand,
    Longhand,
}

/// A shorthand property and the longhands it sets.
#[derive(Debug, PartialEq, Eq)]
pub struct Shorthand {
    pub name: &'static str,
    pub longhands: &'static [&'static str],
    /// `false` for the `border` family: a shorthand expectation never matches
    /// longhand-only styles and longhand expectations never match a
    /// shorthand-only style, even when they describe the same box.
    pub round_trips: bool,
}

const fn shorthand(name: &'static str, longhands: &'static [&'static str]) -> Shorthand {
    Shorthand {
        name,
        longhands,
        round_trips: true,
    }
}

const fn border_shorthand(name: &'static str, longhands: &'static [&'static str]) -> Shorthand {
    Shorthand {
        name,
        longhands,
        round_trips: false,
    }
}

/// Every property treated as a shorthand.
pub static SHORTHANDS: &[Shorthand] = &[
    shorthand(
        "animation",
        &[
            "animation-duration",
            "animation-timing-function",
            "animation-delay",
            "animation-iteration-count",
            "animation-direction",
            "animation-fill-mode",
            "animation-play-state",
            "animation-name",
        ],
    ),
    shorthand(
        "background",
        &[
            "background-image",
            "background-position",
            "background-size",
            "background-repeat",
            "background-origin",
            "background-clip",
            "background-attachment",
            "background-color",
        ],
    ),
    border_shorthand("border", &["border-width", "border-style", "border-color"]),
    border_shorthand(
        "border-bottom",
        &["border-bottom-width", "border-bottom-style", "border-bottom-color"],
    ),
    border_shorthand(
        "border-color",
        &[
            "border-top-color",
            "border-right-color",
            "border-bottom-color",
            "border-left-color",
        ],
    ),
    border_shorthand(
        "border-left",
        &["border-left-width", "border-left-style", "border-left-color"],
    ),
    shorthand(
        "border-radius",
        &[
            "border-top-left-radius",
            "border-top-right-radius",
            "border-bottom-right-radius",
            "border-bottom-left-radius",
        ],
    ),
    border_shorthand(
        "border-right",
        &["border-right-width", "border-right-style", "border-right-color"],
    ),
    border_shorthand(
        "border-style",
        &[
            "border-top-style",
            "border-right-style",
            "border-bottom-style",
            "border-left-style",
        ],
    ),
    border_shorthand(
        "border-top",
        &["border-top-width", "border-top-style", "border-top-color"],
    ),
    border_shorthand(
        "border-width",
        &[
            "border-top-width",
            "border-right-width",
            "border-bottom-width",
            "border-left-width",
        ],
    ),
    shorthand(
        "column-rule",
        &["column-rule-width", "column-rule-style", "column-rule-color"],
    ),
    shorthand("columns", &["column-width", "column-count"]),
    shorthand("flex", &["flex-grow", "flex-shrink", "flex-basis"]),
    shorthand("flex-flow", &["flex-direction", "flex-wrap"]),
    shorthand(
        "font",
        &[
            "font-style",
            "font-variant",
            "font-weight",
            "font-stretch",
            "font-size",
            "line-height",
            "font-family",
        ],
    ),
    shorthand(
        "grid",
        &[
            "grid-template-rows",
            "grid-template-columns",
            "grid-template-areas",
            "grid-auto-rows",
            "grid-auto-columns",
            "grid-auto-flow",
        ],
    ),
    shorthand(
        "grid-area",
        &[
            "grid-row-start",
            "grid-column-start",
            "grid-row-end",
            "grid-column-end",
        ],
    ),
    shorthand("grid-column", &["grid-column-start", "grid-column-end"]),
    shorthand("grid-row", &["grid-row-start", "grid-row-end"]),
    shorthand(
        "grid-template",
        &[
            "grid-template-columns",
            "grid-template-rows",
            "grid-template-areas",
        ],
    ),
    shorthand(
        "list-style",
        &["list-style-type", "list-style-position", "list-style-image"],
    ),
    shorthand(
        "margin",
        &["margin-top", "margin-right", "margin-bottom", "margin-left"],
    ),
    shorthand(
        "offset",
        &[
            "offset-position",
            "offset-path",
            "offset-distance",
            "offset-rotate",
            "offset-anchor",
        ],
    ),
    shorthand("outline", &["outline-style", "outline-width", "outline-color"]),
    shorthand("overflow", &["overflow-x", "overflow-y"]),
    shorthand(
        "padding",
        &["padding-top", "padding-right", "padding-bottom", "padding-left"],
    ),
    shorthand("place-content", &["align-content", "justify-content"]),
    shorthand("place-items", &["align-items", "justify-items"]),
    shorthand("place-self", &["align-self", "justify-self"]),
    shorthand(
        "text-decoration",
        &[
            "text-decoration-line",
            "text-decoration-color",
            "text-decoration-style",
            "text-decoration-thickness",
        ],
    ),
    shorthand(
        "transition",
        &[
            "transition-property",
            "transition-duration",
            "transition-timing-function",
            "transition-delay",
        ],
    ),
];

/// Look up a shorthand by exact, case-sensitive name.
pub fn find_shorthand(name: &str) -> Option<&'static Shorthand> {
    SHORTHANDS.iter().find(|s| s.name == name)
}

/// Classify a property name. Exact match only: `border` is a shorthand,
/// `border-top-color` is not.
pub fn classify(name: &str) -> PropertyKind {
    if find_shorthand(name).is_some() {
        PropertyKind::Shorthand
    } else {
        PropertyKind::Longhand
    }
}

/// Returns `true` if `name` is in the shorthand table.
pub fn is_shorthand(name: &str) -> bool {
    classify(name) == PropertyKind::Shorthand
}

/// The longhands set by a shorthand, or `None` for a longhand.
pub fn longhands(name: &str) -> Option<&'static [&'static str]> {
    find_shorthand(name).map(|s| s.longhands)
}

/// Shorthands that set the given longhand, in table order.
pub fn shorthands_setting(longhand: &str) -> impl Iterator<Item = &'static Shorthand> + '_ {
    SHORTHANDS
        .iter()
        .filter(move |s| s.longhands.iter().any(|l| *l == longhand))
}

/// Returns `true` for custom properties (`--name`).
pub fn is_custom_property(name: &str) -> bool {
    name.starts_with("--")
}

/// Properties whose values name author-defined identifiers (animation
/// names, grid line names, counter names). Those identifiers are
/// case-sensitive; only the CSS keywords allowed beside them are not.
static CUSTOM_IDENT_PROPERTIES: &[&str] = &[
    "animation-name",
    "container-name",
    "counter-increment",
    "counter-reset",
    "counter-set",
    "grid-area",
    "grid-column",
    "grid-column-end",
    "grid-column-start",
    "grid-row",
    "grid-row-end",
    "grid-row-start",
    "view-transition-name",
];

/// Keywords that may appear in place of, or next to, an identifier in the
/// properties above.
static IDENT_KEYWORDS: &[&str] = &[
    "auto",
    "inherit",
    "initial",
    "none",
    "revert",
    "revert-layer",
    "span",
    "unset",
];

/// Returns `true` if values of this (lowercase) property contain
/// case-sensitive author-defined identifiers.
pub fn has_custom_idents(name: &str) -> bool {
    CUSTOM_IDENT_PROPERTIES.binary_search(&name).is_ok()
}

/// Returns `true` for the keywords usable beside custom identifiers, in any
/// case.
pub fn is_ident_keyword(word: &str) -> bool {
    IDENT_KEYWORDS
        .iter()
        .any(|keyword| keyword.eq_ignore_ascii_case(word))
}

/// The name used for lookups: ASCII-lowercased, except custom properties,
/// which are case-sensitive.
pub fn lookup_name(name: &str) -> Cow<'_, str> {
    if is_custom_property(name) || !name.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(name.to_ascii_lowercase())
    }
}

/// Convert a camelCase style-object key into a kebab-case property name.
///
/// - `backgroundColor` → `background-color`
/// - `WebkitTransition` → `-webkit-transition`
/// - `msTransform` → `-ms-transform`
/// - `cssFloat` → `float`
/// - `--customProp` is returned unchanged
pub fn to_kebab_case(name: &str) -> String {
    if is_custom_property(name) {
        return name.to_string();
    }
    if name == "cssFloat" {
        return "float".to_string();
    }

    let mut out = String::with_capacity(name.len() + 4);
    if name.starts_with("ms") && name[2..].starts_with(|c: char| c.is_ascii_uppercase()) {
        out.push('-');
    }
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Classification ───────────────────────────────────────────────

    #[test]
    fn test_classify_exact_match() {
        assert_eq!(classify("border"), PropertyKind::Shorthand);
        assert_eq!(classify("border-top-color"), PropertyKind::Longhand);
        assert_eq!(classify("grid-area"), PropertyKind::Shorthand);
        assert_eq!(classify("grid-row-start"), PropertyKind::Longhand);
    }

    #[test]
    fn test_classify_prefix_is_not_enough() {
        assert_eq!(classify("grid"), PropertyKind::Shorthand);
        assert_eq!(classify("grid-auto-flow"), PropertyKind::Longhand);
        assert_eq!(classify("flex"), PropertyKind::Shorthand);
        assert_eq!(classify("flex-grow"), PropertyKind::Longhand);
        assert_eq!(classify("font-family"), PropertyKind::Longhand);
        assert_eq!(classify("borders"), PropertyKind::Longhand);
    }

    #[test]
    fn test_custom_ident_tables() {
        assert!(CUSTOM_IDENT_PROPERTIES.windows(2).all(|w| w[0] < w[1]));
        assert!(has_custom_idents("animation-name"));
        assert!(has_custom_idents("grid-row-start"));
        assert!(!has_custom_idents("align-items"));
        assert!(is_ident_keyword("NONE"));
        assert!(is_ident_keyword("span"));
        assert!(!is_ident_keyword("FadeIn"));
    }

    #[test]
    fn test_classify_is_case_sensitive() {
        assert_eq!(classify("Border"), PropertyKind::Longhand);
        assert_eq!(classify("MARGIN"), PropertyKind::Longhand);
    }

    #[test]
    fn test_every_listed_shorthand_classifies() {
        for s in SHORTHANDS {
            assert!(is_shorthand(s.name), "{} should be a shorthand", s.name);
            for longhand in s.longhands {
                assert!(!is_shorthand(longhand) || s.name == "border", "{longhand}");
            }
        }
    }

    #[test]
    fn test_table_has_no_duplicates() {
        for (i, a) in SHORTHANDS.iter().enumerate() {
            assert!(
                SHORTHANDS[i + 1..].iter().all(|b| b.name != a.name),
                "duplicate entry {}",
                a.name
            );
        }
    }

    #[test]
    fn test_place_shorthands_expand_to_align_and_justify() {
        assert_eq!(
            longhands("place-items"),
            Some(&["align-items", "justify-items"][..])
        );
        assert_eq!(
            longhands("place-content"),
            Some(&["align-content", "justify-content"][..])
        );
        assert_eq!(
            longhands("place-self"),
            Some(&["align-self", "justify-self"][..])
        );
    }

    #[test]
    fn test_grid_area_longhands() {
        assert_eq!(
            longhands("grid-area"),
            Some(
                &[
                    "grid-row-start",
                    "grid-column-start",
                    "grid-row-end",
                    "grid-column-end"
                ][..]
            )
        );
        assert_eq!(longhands("grid-row-start"), None);
    }

    #[test]
    fn test_border_family_does_not_round_trip() {
        for name in [
            "border",
            "border-top",
            "border-right",
            "border-bottom",
            "border-left",
            "border-width",
            "border-style",
            "border-color",
        ] {
            let entry = find_shorthand(name);
            assert_eq!(entry.map(|s| s.round_trips), Some(false), "{name}");
        }
        assert_eq!(find_shorthand("border-radius").map(|s| s.round_trips), Some(true));
        assert_eq!(find_shorthand("transition").map(|s| s.round_trips), Some(true));
    }

    #[test]
    fn test_shorthands_setting() {
        let names: Vec<_> = shorthands_setting("grid-row-start").map(|s| s.name).collect();
        assert_eq!(names, vec!["grid-area", "grid-row"]);

        let names: Vec<_> = shorthands_setting("border-bottom-color").map(|s| s.name).collect();
        assert_eq!(names, vec!["border-bottom", "border-color"]);

        assert_eq!(shorthands_setting("color").count(), 0);
    }

    // ── Names ────────────────────────────────────────────────────────

    #[test]
    fn test_lookup_name() {
        assert_eq!(lookup_name("Align-items"), "align-items");
        assert_eq!(lookup_name("color"), "color");
        assert!(matches!(lookup_name("color"), Cow::Borrowed(_)));
        assert_eq!(lookup_name("--Brand"), "--Brand");
    }

    #[test]
    fn test_to_kebab_case() {
        assert_eq!(to_kebab_case("backgroundColor"), "background-color");
        assert_eq!(to_kebab_case("height"), "height");
        assert_eq!(to_kebab_case("borderTopLeftRadius"), "border-top-left-radius");
    }

    #[test]
    fn test_to_kebab_case_vendor_prefixes() {
        assert_eq!(to_kebab_case("WebkitTransition"), "-webkit-transition");
        assert_eq!(to_kebab_case("MozAppearance"), "-moz-appearance");
        assert_eq!(to_kebab_case("msTransform"), "-ms-transform");
        assert_eq!(to_kebab_case("mask"), "mask");
    }

    #[test]
    fn test_to_kebab_case_special_names() {
        assert_eq!(to_kebab_case("cssFloat"), "float");
        assert_eq!(to_kebab_case("--myColor"), "--myColor");
    }
}
