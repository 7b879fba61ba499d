use crate::models::Page;
use crate::services::slug::{encode_title, MAX_SLUG_CHARS};
use crate::services::tags::parse_tags;
use anyhow::Result;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Upper bound on `-N` suffixes tried before giving up on a title.
const MAX_DISAMBIGUATION: usize = 1000;

/// Path segments under `/pages/` that belong to fixed routes, so no page may
/// take them as its slug.
pub const RESERVED_SLUGS: &[&str] = &["new", "preview", "alltags"];

/// In-memory page index keyed by slug.
#[derive(Default)]
pub struct PageStore {
    pages: RwLock<HashMap<String, Page>>,
}

impl PageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new page under a slug derived from its title.
    ///
    /// Titles that collide with an existing slug get `-2`, `-3`, ... appended,
    /// shortening the base so the result still fits in a slug. The same goes
    /// for titles that encode to one of [`RESERVED_SLUGS`].
    pub fn create(&self, title: &str, content: &str, tags: &str) -> Result<Page> {
        let base = encode_title(title);
        if base.is_empty() {
            anyhow::bail!("Title '{}' has no characters usable in a URL", title);
        }

        let mut pages = self.write();
        let slug = unique_slug(&base, |candidate| {
            RESERVED_SLUGS.contains(&candidate) || pages.contains_key(candidate)
        })?;

        let mut page_tags: Vec<String> = Vec::new();
        for tag in parse_tags(tags) {
            if !page_tags.contains(&tag) {
                page_tags.push(tag);
            }
        }

        let page = Page {
            title: title.trim().to_string(),
            slug: slug.clone(),
            content: content.to_string(),
            tags: page_tags,
        };
        pages.insert(slug, page.clone());
        tracing::info!("Created page '{}' at '{}'", page.title, page.slug);
        Ok(page)
    }

    pub fn get(&self, slug: &str) -> Option<Page> {
        self.read().get(slug).cloned()
    }

    /// Pages carrying `tag`, ordered by title.
    pub fn with_tag(&self, tag: &str) -> Vec<Page> {
        let mut pages: Vec<Page> = self
            .read()
            .values()
            .filter(|p| p.tags.iter().any(|t| t == tag))
            .cloned()
            .collect();
        pages.sort_by(|a, b| a.title.cmp(&b.title));
        pages
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Page>> {
        self.pages.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Page>> {
        self.pages.write().unwrap_or_else(|e| e.into_inner())
    }
}

/// First of `base`, `base-2`, `base-3`, ... for which `taken` is false.
pub fn unique_slug(base: &str, taken: impl Fn(&str) -> bool) -> Result<String> {
    if !taken(base) {
        return Ok(base.to_string());
    }

    for n in 2..=MAX_DISAMBIGUATION {
        let suffix = format!("-{}", n);
        let room = MAX_SLUG_CHARS - suffix.len();
        let stem: String = base.chars().take(room).collect();
        let candidate = format!("{}{}", stem.trim_end_matches('-'), suffix);
        if !taken(&candidate) {
            return Ok(candidate);
        }
    }

    anyhow::bail!("No free slug left for '{}'", base)
}
