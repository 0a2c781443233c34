//! HTML attributes for Markdown images and links, written in their titles.
//!
//! `![cat](cat.jpg "Fluffy <class=img>")` renders as an `<img>` carrying
//! `class=img` with the title `Fluffy`. The core is
//! [`extract_attrs_from_title`]; [`Renderer`] applies it while rendering
//! Markdown to HTML through an ordered chain of [`ElementHook`]s.

mod attrs;
mod hooks;
mod render;

pub use attrs::extract_attrs_from_title;
pub use hooks::{ElementHook, TitleAttributes};
pub use mdattrs_shared::Extraction;
pub use render::{Element, ElementKind, Renderer, escape_html, options_from_config};

use mdattrs_shared::MarkdownConfig;

/// Render Markdown to HTML with the renderer described by `config`.
pub fn render_html(markdown: &str, config: &MarkdownConfig) -> String {
    Renderer::from_config(config).render(markdown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_html_applies_title_attributes() {
        let html = render_html(
            r#"![cat](cat.jpg "Fluffy <class=img>")"#,
            &MarkdownConfig::default(),
        );
        assert_eq!(
            html,
            "<p><img class=img src=\"cat.jpg\" alt=\"cat\" title=\"Fluffy\" /></p>\n"
        );
    }

    #[test]
    fn render_html_respects_disabled_images() {
        let config = MarkdownConfig {
            images: false,
            ..MarkdownConfig::default()
        };
        let html = render_html(r#"![cat](cat.jpg "Fluffy <class=img>")"#, &config);
        assert!(html.contains("title=\"Fluffy &lt;class=img&gt;\""));
        assert!(!html.contains("class=img "));
    }
}
