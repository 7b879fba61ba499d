//! HTML fragments for page chrome: navigation links, tag blocks, login status.
//!
//! Nothing here reads request state. Callers pass the [`Viewer`] they resolved
//! for the current request.

use crate::models::Viewer;
use crate::services::tags::parse_tags;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

// https://url.spec.whatwg.org/#path-percent-encode-set, plus `/` so an id
// always stays a single segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'#')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'%');

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Route table for the wiki, rooted at the configured app root.
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    root: String,
}

impl LinkBuilder {
    pub fn new(app_root: &str) -> Self {
        Self {
            root: app_root.trim_end_matches('/').to_string(),
        }
    }

    pub fn home(&self) -> String {
        format!("{}/", self.root)
    }

    pub fn page(&self, id: &str) -> String {
        format!("{}/pages/{}", self.root, encode_segment(id))
    }

    pub fn tag(&self, name: &str) -> String {
        format!("{}/pages/tag/{}", self.root, encode_segment(name))
    }

    pub fn new_page(&self) -> String {
        format!("{}/pages/new", self.root)
    }

    pub fn preview(&self) -> String {
        format!("{}/pages/preview", self.root)
    }

    pub fn all_tags(&self) -> String {
        format!("{}/pages/alltags", self.root)
    }

    pub fn settings(&self) -> String {
        format!("{}/settings", self.root)
    }

    pub fn login(&self) -> String {
        format!("{}/login", self.root)
    }

    pub fn logout(&self) -> String {
        format!("{}/logout", self.root)
    }
}

fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

fn anchor(text: &str, href: &str, attrs: Option<&str>) -> String {
    match attrs {
        Some(attrs) if !attrs.trim().is_empty() => format!(
            r#"<a href="{}" {}>{}</a>"#,
            html_escape(href),
            attrs.trim(),
            html_escape(text)
        ),
        _ => format!(r#"<a href="{}">{}</a>"#, html_escape(href), html_escape(text)),
    }
}

/// One `<span class="tagblock">` link per tag in a `;`-delimited tag field.
pub fn tag_blocks(links: &LinkBuilder, content: &str) -> String {
    parse_tags(content)
        .iter()
        .map(|tag| {
            format!(
                r#"<span class="tagblock">{}</span>"#,
                anchor(tag, &links.tag(tag), None)
            )
        })
        .collect()
}

pub fn login_status(viewer: &Viewer) -> String {
    match (&viewer.username, viewer.is_logged_in) {
        (Some(name), true) => format!("Logged in as {}", html_escape(name)),
        (None, true) => "Logged in".to_string(),
        _ => "Not logged in".to_string(),
    }
}

pub fn settings_link(links: &LinkBuilder, viewer: &Viewer, suffix: &str) -> String {
    if viewer.is_admin {
        format!("{}{}", anchor("Site settings", &links.settings(), None), suffix)
    } else {
        String::new()
    }
}

/// Login or logout link. With Windows authentication the browser owns the
/// session, so logged-in viewers only get the suffix.
pub fn login_link(
    links: &LinkBuilder,
    viewer: &Viewer,
    windows_authentication: bool,
    suffix: &str,
) -> String {
    let link = if viewer.is_logged_in {
        if windows_authentication {
            String::new()
        } else {
            anchor("Logout", &links.logout(), None)
        }
    } else {
        anchor("Login", &links.login(), None)
    };
    format!("{}{}", link, suffix)
}

pub fn new_page_link(links: &LinkBuilder, viewer: &Viewer, suffix: &str) -> String {
    if viewer.is_logged_in {
        format!("{}{}", anchor("New page", &links.new_page(), None), suffix)
    } else {
        String::new()
    }
}

pub fn main_page_link(links: &LinkBuilder, text: &str) -> String {
    anchor(text, &links.home(), None)
}

/// `attrs` is emitted verbatim inside the tag, e.g. `class="nav"`.
pub fn page_link(links: &LinkBuilder, text: &str, page_name: &str, attrs: Option<&str>) -> String {
    anchor(text, &links.page(page_name), attrs)
}

pub fn format_file_size(bytes: u64) -> String {
    if bytes > 1024 {
        format!("{}KB", bytes / 1024)
    } else {
        format!("{} bytes", bytes)
    }
}
