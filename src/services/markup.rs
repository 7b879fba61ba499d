use crate::services::html::{html_escape, LinkBuilder};
use crate::services::slug::encode_title;
use ammonia::Builder;
use anyhow::Result;
use once_cell::sync::Lazy;
use pulldown_cmark::{
    html, CowStr, Event, LinkType, Options, Parser, Tag, TagEnd, TextMergeStream,
};
use regex::Regex;

// [[Page title]] or [[Page title|label]]
static WIKI_LINK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[\[([^\]|]+)(?:\|([^\]]+))?\]\]").expect("Invalid wiki link regex pattern")
});

/// Converts page markup into an HTML fragment.
pub trait MarkupRenderer: Send + Sync {
    fn render(&self, markup: &str) -> Result<String>;
}

/// Markdown with `[[wiki links]]`, sanitized before it is returned.
pub struct MarkdownRenderer {
    links: LinkBuilder,
    sanitizer: Builder<'static>,
}

impl MarkdownRenderer {
    pub fn new(links: LinkBuilder) -> Self {
        let mut tags = ammonia::Builder::default().clone_tags();
        tags.insert("pre");
        tags.insert("code");
        tags.insert("table");
        tags.insert("thead");
        tags.insert("tbody");
        tags.insert("tr");
        tags.insert("th");
        tags.insert("td");
        tags.insert("del");
        tags.insert("input");

        let mut attrs = ammonia::Builder::default().clone_tag_attributes();
        attrs.insert(
            "input",
            ["type", "checked", "disabled"].iter().cloned().collect(),
        );
        for heading in ["h1", "h2", "h3", "h4", "h5", "h6"] {
            attrs.insert(heading, ["id"].iter().cloned().collect());
        }

        let mut sanitizer = Builder::default();
        sanitizer
            .tags(tags)
            .tag_attributes(attrs)
            .link_rel(Some("noopener noreferrer"));

        Self { links, sanitizer }
    }

    /// Split a text run into plain text and links for each `[[wiki link]]`.
    fn expand_wiki_links<'a>(&self, text: &str, out: &mut Vec<Event<'a>>) {
        let mut last = 0;
        for caps in WIKI_LINK_REGEX.captures_iter(text) {
            let Some(whole) = caps.get(0) else { continue };
            let title = caps[1].trim();
            let slug = encode_title(title);
            if slug.is_empty() {
                continue;
            }
            let label = caps.get(2).map(|m| m.as_str().trim()).unwrap_or(title);

            if whole.start() > last {
                out.push(Event::Text(text[last..whole.start()].to_string().into()));
            }
            out.push(Event::Start(Tag::Link {
                link_type: LinkType::Inline,
                dest_url: self.links.page(&slug).into(),
                title: CowStr::Borrowed(""),
                id: CowStr::Borrowed(""),
            }));
            out.push(Event::Text(label.to_string().into()));
            out.push(Event::End(TagEnd::Link));
            last = whole.end();
        }
        if last < text.len() {
            out.push(Event::Text(text[last..].to_string().into()));
        }
    }
}

/// Heading text with wiki links reduced to their labels.
fn wiki_link_labels(text: &str) -> String {
    WIKI_LINK_REGEX
        .replace_all(text, |caps: &regex::Captures| {
            caps.get(2)
                .map(|m| m.as_str().trim())
                .unwrap_or_else(|| caps[1].trim())
                .to_string()
        })
        .into_owned()
}

impl MarkupRenderer for MarkdownRenderer {
    fn render(&self, markup: &str) -> Result<String> {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_HEADING_ATTRIBUTES;

        // Brackets arrive as separate text events unless merged.
        let parser = TextMergeStream::new(Parser::new_ext(markup, options));
        let mut events: Vec<Event> = Vec::new();
        let mut heading: Option<String> = None;
        let mut in_code_block = false;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    in_code_block = true;
                    events.push(Event::Start(Tag::CodeBlock(kind)));
                }
                Event::End(TagEnd::CodeBlock) => {
                    in_code_block = false;
                    events.push(Event::End(TagEnd::CodeBlock));
                }
                Event::Start(Tag::Heading { id: None, .. }) => {
                    heading = Some(String::new());
                }
                Event::Text(text) if heading.is_some() => {
                    if let Some(buf) = heading.as_mut() {
                        buf.push_str(&wiki_link_labels(&text));
                    }
                }
                Event::Code(text) if heading.is_some() => {
                    if let Some(buf) = heading.as_mut() {
                        buf.push_str(&text);
                    }
                }
                Event::End(TagEnd::Heading(level)) => match heading.take() {
                    // Anchors use the same slugs as page URLs.
                    Some(text) => {
                        let n = level as usize;
                        events.push(Event::Html(
                            format!(
                                r#"<h{} id="{}">{}</h{}>"#,
                                n,
                                html_escape(&encode_title(&text)),
                                html_escape(&text),
                                n
                            )
                            .into(),
                        ));
                    }
                    None => events.push(Event::End(TagEnd::Heading(level))),
                },
                _ if heading.is_some() => {}
                Event::Text(text) if !in_code_block => self.expand_wiki_links(&text, &mut events),
                _ => events.push(event),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(self.sanitizer.clean(&html_output).to_string())
    }
}
