//! Markdown rendering

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

use crate::helpers::AssetResolver;

/// Markdown renderer that resolves local image references
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    assets: AssetResolver,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new(assets: AssetResolver) -> Self {
        Self { assets }
    }

    /// Render markdown to HTML
    ///
    /// Raw HTML in the source is dropped. Never fails: odd input renders
    /// however the parser reads it.
    pub fn render(&self, markdown: &str) -> String {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let events = parser.filter_map(|event| match event {
            Event::Start(Tag::Image {
                link_type,
                dest_url,
                title,
                id,
            }) => Some(Event::Start(Tag::Image {
                link_type,
                dest_url: self.rewrite_src(dest_url),
                title,
                id,
            })),
            Event::Html(_) | Event::InlineHtml(_) => None,
            _ => Some(event),
        });

        let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut html_output, events);
        html_output
    }

    fn rewrite_src<'a>(&self, url: CowStr<'a>) -> CowStr<'a> {
        if self.assets.is_local(&url) {
            CowStr::from(self.assets.resolve(&url))
        } else {
            url
        }
    }
}
