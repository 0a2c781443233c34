//! Attribute lists embedded in Markdown image and link titles.
//!
//! Two forms are recognised:
//!
//! - trailing: `Fluffy, my cat <class='img-responsive'>`. Everything from the
//!   whitespace before `<` to the end of the title is the attribute list.
//!   Attributes may omit their value (`< hidden class=hide >`).
//! - implicit: the whole title is `name=value` pairs, e.g. ` class=img `.
//!   Every attribute must carry a value, so ordinary prose is never mistaken
//!   for attributes.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use mdattrs_shared::Extraction;

// ---------------------------------------------------------------------------
// Grammar
// ---------------------------------------------------------------------------

// All fragments are written for `(?xi)`: whitespace is insignificant and
// letters match either case.

/// Attribute name. More restrictive than the HTML spec.
const NAME: &str = r"[_:a-z][-.0-9_:a-z]*";

/// Unquoted attribute value. More restrictive than the HTML spec.
const UNQUOTED_VALUE: &str = r"[-.0-9_:a-z]+";

const SINGLE_QUOTED_VALUE: &str = r" ' [^'>]* ' ";

const DOUBLE_QUOTED_VALUE: &str = r#" " [^">]* " "#;

fn value() -> String {
    format!("(?: {UNQUOTED_VALUE} | {SINGLE_QUOTED_VALUE} | {DOUBLE_QUOTED_VALUE} )")
}

/// `name = value`
fn nonempty_attribute() -> String {
    format!(r"{NAME} \s* = \s* {}", value())
}

/// `name` with an optional `= value`.
fn attribute() -> String {
    format!(r"{NAME} (?: \s* = \s* {} )?", value())
}

/// Trailing, possibly empty, list of attributes surrounded by `<>`.
static TRAILING_ATTRS_RE: LazyLock<Regex> = LazyLock::new(|| {
    let attribute = attribute();
    Regex::new(&format!(
        r"(?xi)
        \s* < \s* (?P<attrs>
            (?: {attribute} (?: \s+ {attribute} )* )?
        ) \s* > \s* \z"
    ))
    .expect("valid regex")
});

/// Nothing but a non-empty list of valued attributes, without angle brackets.
static IMPLICIT_ATTRS_RE: LazyLock<Regex> = LazyLock::new(|| {
    let attribute = nonempty_attribute();
    Regex::new(&format!(
        r"(?xi)
        \A \s* (?P<attrs>
            {attribute} (?: \s+ {attribute} )*
        ) \s* \z"
    ))
    .expect("valid regex")
});

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Split a Markdown title into its attribute list and residual title.
///
/// The trailing form wins over the implicit form. If neither matches, the
/// title comes back unchanged with no attributes. The residual title of a
/// trailing match is the text before the match, untrimmed, or `None` when the
/// match starts at the very beginning.
///
/// ```
/// use mdattrs_markdown::extract_attrs_from_title;
///
/// let ex = extract_attrs_from_title(Some("Fluffy <class=img>"));
/// assert_eq!(ex.into_parts(), (Some("class=img"), Some("Fluffy")));
/// ```
pub fn extract_attrs_from_title(title: Option<&str>) -> Extraction<'_> {
    let Some(text) = title.filter(|t| !t.is_empty()) else {
        return Extraction::unchanged(title);
    };

    if let Some(caps) = TRAILING_ATTRS_RE.captures(text) {
        let start = caps.get(0).map_or(0, |m| m.start());
        let attrs = caps.name("attrs").map_or("", |m| m.as_str());
        trace!(form = "trailing", attrs, start, "title attributes found");
        return Extraction {
            attrs: Some(attrs),
            title: (start > 0).then(|| &text[..start]),
        };
    }

    if let Some(caps) = IMPLICIT_ATTRS_RE.captures(text) {
        let attrs = caps.name("attrs").map_or("", |m| m.as_str());
        trace!(form = "implicit", attrs, "title attributes found");
        return Extraction {
            attrs: Some(attrs),
            title: None,
        };
    }

    Extraction::unchanged(title)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
