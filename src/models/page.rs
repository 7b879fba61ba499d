use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub tags: Vec<String>,
}

impl Page {
    /// Tags in the `;`-delimited form the edit form submits.
    pub fn tag_field(&self) -> String {
        self.tags.join(";")
    }
}
