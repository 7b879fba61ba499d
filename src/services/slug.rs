//! Title slugs for page URLs.
//!
//! A slug is derived from a page title in four steps:
//!
//! 1. drop every character that is not a word character, whitespace or `-`
//! 2. collapse each run of whitespace/hyphens into one space and trim
//! 3. keep at most [`MAX_SLUG_CHARS`] characters and trim the end again
//! 4. turn the remaining spaces into hyphens
//!
//! Case is preserved and nothing is percent-encoded. Non-ASCII letters survive,
//! so `"日本語 タイトル"` becomes `"日本語-タイトル"`.

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum slug length, counted in `char`s.
///
/// Older notes describe this limit as 30 characters; 75 is the limit page URLs
/// have always been built with.
pub const MAX_SLUG_CHARS: usize = 75;

static SEPARATOR_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s-]+").expect("Invalid separator regex pattern"));

/// Unicode word character: alphabetic, marks, decimal digits, connector
/// punctuation (`_` included) and join controls.
///
/// This is the `\w` class of the `regex` crate, so the filter behaves the same
/// whether it is written as a predicate or as a pattern.
pub fn is_word_char(c: char) -> bool {
    regex_syntax::is_word_character(c)
}

/// Characters that survive the first encoding step.
pub fn is_slug_char(c: char) -> bool {
    c == '-' || c.is_whitespace() || is_word_char(c)
}

/// Encode a page title into a URL slug.
///
/// Empty input is returned as-is.
pub fn encode_title(title: &str) -> String {
    if title.is_empty() {
        return String::new();
    }

    let filtered: String = title.chars().filter(|c| is_slug_char(*c)).collect();

    let collapsed = SEPARATOR_RUN.replace_all(&filtered, " ");
    let collapsed = collapsed.trim();

    let truncated = match collapsed.char_indices().nth(MAX_SLUG_CHARS) {
        Some((cut, _)) => collapsed[..cut].trim(),
        None => collapsed,
    };

    truncated
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect()
}

/// Same as [`encode_title`], but an absent title stays absent.
pub fn encode_title_opt(title: Option<&str>) -> Option<String> {
    title.map(encode_title)
}

/// Whether `slug` could have been produced by [`encode_title`] from a title
/// with at least one word character.
pub fn is_valid_slug(slug: &str) -> bool {
    if slug.is_empty() || slug.chars().count() > MAX_SLUG_CHARS {
        return false;
    }
    if slug.starts_with('-') || slug.ends_with('-') || slug.contains("--") {
        return false;
    }
    slug.chars().all(|c| c == '-' || is_word_char(c))
}
