use crate::models::TagSummary;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Separator used by the tag editor's single hidden field.
pub const TAG_DELIMITER: char = ';';

/// Split a `;`-delimited tag field into trimmed, non-blank tag names.
pub fn parse_tags(content: &str) -> Vec<String> {
    content
        .split(TAG_DELIMITER)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// CSS class for a tag in the tag cloud, by the number of pages using it.
///
/// A count of exactly 10 falls between the bands and gets no class.
pub fn tag_cloud_class(count: u32) -> &'static str {
    if count > 10 {
        "tagcloud5"
    } else if (5..10).contains(&count) {
        "tagcloud4"
    } else if (3..5).contains(&count) {
        "tagcloud3"
    } else if count > 1 && count < 3 {
        "tagcloud2"
    } else if count == 1 {
        "tagcloud1"
    } else {
        ""
    }
}

/// In-memory tag counts, shared across request handlers.
#[derive(Default)]
pub struct TagRegistry {
    counts: RwLock<BTreeMap<String, u32>>,
}

impl TagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a list of tag fields, one per page.
    pub fn seeded<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let registry = Self::new();
        for tags in pages {
            registry.record(tags.as_ref());
        }
        registry
    }

    /// Count every tag in a page's tag field once. Returns the tags recorded.
    pub fn record(&self, content: &str) -> Vec<String> {
        let mut tags = parse_tags(content);
        tags.sort();
        tags.dedup();

        let mut counts = self.write();
        for tag in &tags {
            *counts.entry(tag.clone()).or_insert(0) += 1;
        }
        tracing::debug!("Recorded {} tag(s)", tags.len());
        tags
    }

    pub fn get(&self, name: &str) -> Option<TagSummary> {
        self.read()
            .get(name)
            .map(|count| TagSummary::new(name, *count))
    }

    /// All tag names in alphabetical order.
    pub fn names(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    /// Most used first, ties broken by name.
    pub fn summaries(&self) -> Vec<TagSummary> {
        let mut tags: Vec<TagSummary> = self
            .read()
            .iter()
            .map(|(name, count)| TagSummary::new(name.as_str(), *count))
            .collect();
        tags.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        tags
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, u32>> {
        self.counts.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<String, u32>> {
        self.counts.write().unwrap_or_else(|e| e.into_inner())
    }
}
