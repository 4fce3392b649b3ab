//! Article title resolution from URLs and wikilink tokens.

use percent_encoding::percent_decode_str;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator the wiki uses in place of spaces inside titles.
pub const TITLE_SEPARATOR: &str = "_";

/// Normalized article title.
///
/// Stored in the underscore form used in article URLs. Spaces and
/// underscores are interchangeable, so `"Alan Turing"` and `"Alan_Turing"`
/// produce the same title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleTitle(String);

impl ArticleTitle {
    /// Build a title from free text, collapsing whitespace runs into the separator.
    pub fn new(raw: &str) -> Self {
        let parts: Vec<&str> = raw.split_whitespace().collect();
        Self(parts.join(TITLE_SEPARATOR))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Title with separators turned back into spaces.
    pub fn display_name(&self) -> String {
        space_normalize(&self.0)
    }

    /// Whether this title occurs anywhere inside `value` once both sides are
    /// space-normalized. Containment, not equality: "Jon" appears in "Jonathan".
    pub fn appears_in(&self, value: &str) -> bool {
        space_normalize(value).contains(&self.display_name())
    }
}

impl fmt::Display for ArticleTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

fn space_normalize(value: &str) -> String {
    value.replace(TITLE_SEPARATOR, " ")
}

/// Resolve an article title from either a canonical article URL
/// (`https://<lang>.wikipedia.org/wiki/<Title>`) or a bare title.
///
/// For URLs the path segment after `/wiki/` is returned percent-decoded,
/// without any query string or fragment. Anything else is treated as a title and has its
/// whitespace replaced by [`TITLE_SEPARATOR`].
pub fn resolve_from_url(input: &str) -> ArticleTitle {
    let url_regex = Regex::new(r"(?i)^https://([\w-]+\.)*wikipedia\.org/wiki/([^?#]*)")
        .expect("Invalid regex pattern");

    let input = input.trim();
    match url_regex.captures(input) {
        Some(cap) => {
            let segment = cap.get(2).map_or("", |m| m.as_str());
            ArticleTitle::new(&decode_segment(segment))
        }
        None => ArticleTitle::new(input),
    }
}

/// Percent-decode a URL path segment. Invalid UTF-8 after decoding keeps the
/// segment as written.
fn decode_segment(segment: &str) -> String {
    match percent_decode_str(segment).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => {
            log::warn!("Article path {:?} is not valid UTF-8 once decoded", segment);
            segment.to_string()
        }
    }
}

/// Extract the `Title` portion of a `[[Title]]` or `[[Title|Display]]` token.
///
/// Returns `None` when the token carries no wikilink; such tokens are never
/// fetched.
pub fn extract_link_title(token: &str) -> Option<ArticleTitle> {
    let link_regex =
        Regex::new(r"\[\[([^\]\|]*)(?:\|[^\]]*)?\]\]").expect("Invalid regex pattern");

    let cap = link_regex.captures(token)?;
    let title = ArticleTitle::new(cap.get(1)?.as_str());
    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}
