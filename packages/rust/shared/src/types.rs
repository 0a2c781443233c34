//! Core value types shared between the extractor, renderer and CLI.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// The outcome of splitting a Markdown title into attributes and residual text.
///
/// Both parts borrow from the original title. `attrs` is the raw attribute
/// list text (never parsed into name/value pairs); `title` is whatever human
/// readable title remains, or `None` when nothing is left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Extraction<'a> {
    /// Matched attribute list, verbatim. May be `Some("")` for `<>`.
    pub attrs: Option<&'a str>,
    /// Residual title.
    pub title: Option<&'a str>,
}

impl<'a> Extraction<'a> {
    /// An extraction that found no attributes and leaves `title` untouched.
    pub fn unchanged(title: Option<&'a str>) -> Self {
        Self { attrs: None, title }
    }

    /// Whether an attribute list (possibly empty) was detected.
    pub fn has_attrs(&self) -> bool {
        self.attrs.is_some()
    }

    /// Split into the `(attrs, title)` pair.
    pub fn into_parts(self) -> (Option<&'a str>, Option<&'a str>) {
        (self.attrs, self.title)
    }
}

impl<'a> From<Extraction<'a>> for (Option<&'a str>, Option<&'a str>) {
    fn from(extraction: Extraction<'a>) -> Self {
        extraction.into_parts()
    }
}

impl std::fmt::Display for Extraction<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "attrs: {}", self.attrs.unwrap_or("(none)"))?;
        write!(f, "title: {}", self.title.unwrap_or("(none)"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unchanged_has_no_attrs() {
        let ex = Extraction::unchanged(Some("No attrs"));
        assert!(!ex.has_attrs());
        assert_eq!(ex.into_parts(), (None, Some("No attrs")));
    }

    #[test]
    fn empty_attrs_still_count() {
        let ex = Extraction {
            attrs: Some(""),
            title: Some("Fluffy"),
        };
        assert!(ex.has_attrs());
    }

    #[test]
    fn serializes_absent_parts_as_null() {
        let ex = Extraction {
            attrs: Some("class=img"),
            title: None,
        };
        let json = serde_json::to_string(&ex).expect("serialize");
        assert_eq!(json, r#"{"attrs":"class=img","title":null}"#);
    }

    #[test]
    fn display_marks_absent_parts() {
        let ex = Extraction::unchanged(None);
        assert_eq!(ex.to_string(), "attrs: (none)\ntitle: (none)");
    }
}
