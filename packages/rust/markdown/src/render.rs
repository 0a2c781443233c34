//! Markdown to HTML rendering with an ordered chain of element hooks.
//!
//! Images and links are not left to `pulldown-cmark`'s HTML writer. Each one
//! is turned into an [`Element`], passed through every hook, and then
//! serialized into an inline HTML event.

use pulldown_cmark::{CowStr, Event, LinkType, Options, Parser, Tag, TagEnd};
use tracing::{debug, instrument, trace};

use mdattrs_shared::MarkdownConfig;

use crate::hooks::{ElementHook, TitleAttributes};

// ---------------------------------------------------------------------------
// Element
// ---------------------------------------------------------------------------

/// Which tag an [`Element`] becomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Image,
    Link,
}

/// An image or link, before serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub kind: ElementKind,
    /// `src` for images, `href` for links.
    pub url: String,
    /// `title` attribute. Omitted from the tag when `None`.
    pub title: Option<String>,
    /// Image alt text. Always empty for links.
    pub alt: String,
    /// Attribute fragments inserted verbatim, in order, ahead of `src`/`href`.
    pub raw_attrs: Vec<String>,
}

impl Element {
    pub fn image(url: impl Into<String>, title: Option<String>, alt: impl Into<String>) -> Self {
        Self {
            kind: ElementKind::Image,
            url: url.into(),
            title,
            alt: alt.into(),
            raw_attrs: Vec::new(),
        }
    }

    pub fn link(url: impl Into<String>, title: Option<String>) -> Self {
        Self {
            kind: ElementKind::Link,
            url: url.into(),
            title,
            alt: String::new(),
            raw_attrs: Vec::new(),
        }
    }

    /// Serialize the opening tag (the whole tag for images).
    ///
    /// `url`, `alt` and `title` are escaped; `raw_attrs` are not.
    pub fn open_tag(&self) -> String {
        let mut tag = String::from(match self.kind {
            ElementKind::Image => "<img",
            ElementKind::Link => "<a",
        });

        for raw in &self.raw_attrs {
            tag.push(' ');
            tag.push_str(raw);
        }

        match self.kind {
            ElementKind::Image => {
                tag.push_str(&format!(
                    " src=\"{}\" alt=\"{}\"",
                    escape_html(&self.url),
                    escape_html(&self.alt)
                ));
            }
            ElementKind::Link => {
                tag.push_str(&format!(" href=\"{}\"", escape_html(&self.url)));
            }
        }

        if let Some(title) = &self.title {
            tag.push_str(&format!(" title=\"{}\"", escape_html(title)));
        }

        tag.push_str(match self.kind {
            ElementKind::Image => " />",
            ElementKind::Link => ">",
        });
        tag
    }
}

/// Escape text for use inside a double-quoted HTML attribute.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Map the `[markdown]` extension switches to parser options.
pub fn options_from_config(config: &MarkdownConfig) -> Options {
    let mut options = Options::empty();
    if config.tables {
        options.insert(Options::ENABLE_TABLES);
    }
    if config.footnotes {
        options.insert(Options::ENABLE_FOOTNOTES);
    }
    if config.strikethrough {
        options.insert(Options::ENABLE_STRIKETHROUGH);
    }
    if config.tasklists {
        options.insert(Options::ENABLE_TASKLISTS);
    }
    if config.smart_punctuation {
        options.insert(Options::ENABLE_SMART_PUNCTUATION);
    }
    options
}

/// Markdown renderer with an ordered hook chain.
pub struct Renderer {
    options: Options,
    hooks: Vec<Box<dyn ElementHook>>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("options", &self.options)
            .field("hooks", &self.hook_names())
            .finish()
    }
}

impl Renderer {
    /// Plain CommonMark, no hooks.
    pub fn new() -> Self {
        Self {
            options: Options::empty(),
            hooks: Vec::new(),
        }
    }

    /// Renderer configured from the `[markdown]` section.
    ///
    /// [`TitleAttributes`] is installed first in the chain unless both
    /// `images` and `links` are disabled.
    pub fn from_config(config: &MarkdownConfig) -> Self {
        let renderer = Self::new().with_options(options_from_config(config));
        if config.title_attributes_enabled() {
            renderer.prepend_hook(TitleAttributes::from_config(config))
        } else {
            renderer
        }
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Append a hook; it runs after every hook already installed.
    pub fn push_hook(mut self, hook: impl ElementHook + 'static) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    /// Insert a hook at the front of the chain; it runs before all others.
    pub fn prepend_hook(mut self, hook: impl ElementHook + 'static) -> Self {
        self.hooks.insert(0, Box::new(hook));
        self
    }

    /// Hook names in chain order.
    pub fn hook_names(&self) -> Vec<&str> {
        self.hooks.iter().map(|h| h.name()).collect()
    }

    fn apply_hooks(&self, mut element: Element) -> Element {
        for hook in &self.hooks {
            hook.apply(&mut element);
            trace!(hook = hook.name(), kind = ?element.kind, "hook applied");
        }
        element
    }

    /// Render Markdown to HTML.
    #[instrument(skip_all, fields(len = markdown.len(), hooks = self.hooks.len()))]
    pub fn render(&self, markdown: &str) -> String {
        let mut events: Vec<Event<'_>> = Vec::new();
        let mut pending: Option<PendingImage> = None;
        let mut images = 0usize;
        let mut links = 0usize;

        for event in Parser::new_ext(markdown, self.options) {
            // Inside an image everything up to the matching end is alt text.
            if let Some(mut image) = pending.take() {
                match event {
                    Event::End(TagEnd::Image) if image.depth == 0 => {
                        let element = self.apply_hooks(Element::image(
                            image.url,
                            image.title,
                            image.alt,
                        ));
                        events.push(Event::InlineHtml(element.open_tag().into()));
                        images += 1;
                        continue;
                    }
                    Event::Start(Tag::Image { .. }) => image.depth += 1,
                    Event::End(TagEnd::Image) => image.depth -= 1,
                    Event::Text(text) | Event::Code(text) => image.alt.push_str(&text),
                    Event::SoftBreak | Event::HardBreak => image.alt.push(' '),
                    _ => {}
                }
                pending = Some(image);
                continue;
            }

            match event {
                Event::Start(Tag::Image {
                    dest_url, title, ..
                }) => {
                    pending = Some(PendingImage {
                        url: dest_url.into_string(),
                        title: non_empty(title),
                        alt: String::new(),
                        depth: 0,
                    });
                }
                Event::Start(Tag::Link {
                    link_type,
                    dest_url,
                    title,
                    ..
                }) => {
                    let url = match link_type {
                        LinkType::Email => format!("mailto:{dest_url}"),
                        _ => dest_url.into_string(),
                    };
                    let element = self.apply_hooks(Element::link(url, non_empty(title)));
                    events.push(Event::InlineHtml(element.open_tag().into()));
                    links += 1;
                }
                Event::End(TagEnd::Link) => events.push(Event::InlineHtml("</a>".into())),
                other => events.push(other),
            }
        }

        let mut html = String::with_capacity(markdown.len() * 3 / 2);
        pulldown_cmark::html::push_html(&mut html, events.into_iter());

        debug!(images, links, html_len = html.len(), "render complete");
        html
    }
}

/// Image whose alt text is still being collected.
struct PendingImage {
    url: String,
    title: Option<String>,
    alt: String,
    /// Nesting depth of images inside the alt text.
    depth: usize,
}

fn non_empty(s: CowStr<'_>) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.into_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
