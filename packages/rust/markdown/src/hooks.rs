//! Element hook trait and the built-in title-attributes hook.
//!
//! Hooks see every image and link as a structured [`Element`] before it is
//! serialized, and run in chain order.

use mdattrs_shared::MarkdownConfig;

use crate::attrs::extract_attrs_from_title;
use crate::render::{Element, ElementKind};

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// A rewrite step applied to each image or link before its tag is built.
pub trait ElementHook: Send + Sync {
    /// Human-readable hook name for tracing.
    fn name(&self) -> &str;

    /// Modify the element in place.
    fn apply(&self, element: &mut Element);
}

// ---------------------------------------------------------------------------
// TitleAttributes
// ---------------------------------------------------------------------------

/// Moves attribute lists found in the title onto the tag itself.
///
/// `![cat](cat.jpg "Fluffy <class=img>")` becomes
/// `<img class=img src="cat.jpg" alt="cat" title="Fluffy" />`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleAttributes {
    /// Rewrite image titles.
    pub images: bool,
    /// Rewrite link titles.
    pub links: bool,
}

impl Default for TitleAttributes {
    fn default() -> Self {
        Self {
            images: true,
            links: true,
        }
    }
}

impl TitleAttributes {
    /// Build the hook from the `[markdown]` config section.
    pub fn from_config(config: &MarkdownConfig) -> Self {
        Self {
            images: config.images,
            links: config.links,
        }
    }

    fn handles(&self, kind: ElementKind) -> bool {
        match kind {
            ElementKind::Image => self.images,
            ElementKind::Link => self.links,
        }
    }
}

impl ElementHook for TitleAttributes {
    fn name(&self) -> &str {
        "title-attributes"
    }

    fn apply(&self, element: &mut Element) {
        if !self.handles(element.kind) {
            return;
        }

        let extraction = extract_attrs_from_title(element.title.as_deref());
        if !extraction.has_attrs() {
            return;
        }

        let attrs = extraction.attrs.filter(|a| !a.is_empty()).map(str::to_owned);
        let title = extraction.title.map(str::to_owned);

        // An empty `<>` still strips itself from the title.
        if let Some(attrs) = attrs {
            element.raw_attrs.push(attrs);
        }
        element.title = title;
    }
}
