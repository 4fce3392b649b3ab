//! List dialects used inside relationship fields.
//!
//! Infobox fields encode member lists in several incompatible template
//! syntaxes (`plainlist`, `hlist`, `ublist`, `marriage`, or bare text). Each
//! dialect gets its own variant and its own parse function; [`parse`] only
//! dispatches.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::title::{extract_link_title, ArticleTitle};

/// A single entry parsed out of a field: a wikilink-bearing string
/// (`[[Title]]`) or plain text with no link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberToken(String);

impl MemberToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Linked article title, if the token carries a wikilink.
    pub fn link_title(&self) -> Option<ArticleTitle> {
        extract_link_title(&self.0)
    }
}

impl fmt::Display for MemberToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MemberToken {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// Recognized field dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// `* item` per line
    Plainlist,
    /// inline `[[link]]` sequence
    Hlist,
    /// `[[link]]` or `[[link|` entries separated by pipes
    Ublist,
    /// `marriage|Name|dates`, one spouse
    Marriage,
    /// no recognized tag
    PlainText,
}

impl Dialect {
    fn from_tag(tag: &str) -> Option<Dialect> {
        match tag {
            "plainlist" | "flatlist" => Some(Dialect::Plainlist),
            "hlist" => Some(Dialect::Hlist),
            "ublist" | "ubl" | "unbulletedlist" => Some(Dialect::Ublist),
            "marriage" => Some(Dialect::Marriage),
            _ => None,
        }
    }

    fn parse_with(self, content: &str) -> Option<Vec<MemberToken>> {
        match self {
            Dialect::Plainlist => parse_plainlist(content),
            Dialect::Hlist => parse_hlist(content),
            Dialect::Ublist => parse_ublist(content),
            Dialect::Marriage => parse_marriage(content),
            Dialect::PlainText => Some(parse_plain_text(content)),
        }
    }
}

/// Detect the dialect tag that opens a field (`plainlist|...`).
///
/// The tag is everything before the first `|` on the first line, lower-cased
/// with whitespace removed. Returns `None` when there is no `|` or the tag
/// is not a known dialect.
pub fn classify(field_content: &str) -> Option<Dialect> {
    let tag_regex = Regex::new(r"^(.*?)\|").expect("Invalid regex pattern");

    let cap = tag_regex.captures(field_content)?;
    let tag: String = cap
        .get(1)?
        .as_str()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    Dialect::from_tag(&tag)
}

/// Parse a field's content into member tokens, in source order.
///
/// A dialect whose pattern finds nothing (e.g. `plainlist|` with no `* `
/// lines) yields an empty list and a warning, never an error.
pub fn parse(field_content: &str) -> Vec<MemberToken> {
    if field_content.trim().is_empty() {
        return Vec::new();
    }

    let dialect = classify(field_content).unwrap_or(Dialect::PlainText);
    log::debug!("Parsing field as {:?}: {:?}", dialect, field_content);

    match dialect.parse_with(field_content) {
        Some(tokens) => tokens,
        None => {
            log::warn!(
                "Field content does not match the {:?} dialect, treating as empty: {:?}",
                dialect,
                field_content
            );
            Vec::new()
        }
    }
}

/// Replace the first pipe with a closing `]]`, turning `[[Title|` into `[[Title]]`.
fn close_at_pipe(token: &str) -> String {
    token.replacen('|', "]]", 1)
}

fn non_empty(tokens: Vec<MemberToken>) -> Option<Vec<MemberToken>> {
    if tokens.is_empty() {
        None
    } else {
        Some(tokens)
    }
}

fn parse_plainlist(content: &str) -> Option<Vec<MemberToken>> {
    let item_regex = Regex::new(r"[\n\r]\* *(.*)").expect("Invalid regex pattern");

    let tokens = item_regex
        .captures_iter(content)
        .filter_map(|cap| cap.get(1))
        .map(|m| MemberToken::new(m.as_str().trim_end()))
        .collect();
    non_empty(tokens)
}

fn parse_hlist(content: &str) -> Option<Vec<MemberToken>> {
    let link_regex = Regex::new(r"\[\[(.*?)\]\]").expect("Invalid regex pattern");
    let display_regex = Regex::new(r"\|.*\]\]").expect("Invalid regex pattern");

    let tokens = link_regex
        .find_iter(content)
        .map(|m| MemberToken::new(display_regex.replacen(m.as_str(), 1, "]]")))
        .collect();
    non_empty(tokens)
}

fn parse_ublist(content: &str) -> Option<Vec<MemberToken>> {
    let link_regex = Regex::new(r"\[\[[\w .]+:?(?:\]\]|\|)").expect("Invalid regex pattern");

    let tokens = link_regex
        .find_iter(content)
        .map(|m| MemberToken::new(close_at_pipe(m.as_str())))
        .collect();
    non_empty(tokens)
}

fn parse_marriage(content: &str) -> Option<Vec<MemberToken>> {
    let tag_regex = Regex::new(r"</?\w+[^>]*>").expect("Invalid regex pattern");
    let spouse_regex = Regex::new(r"(?i)marriage\|((\[\[[\w .]+(\]\]|\|))|([\w .]+))")
        .expect("Invalid regex pattern");

    let stripped = tag_regex.replace_all(content, "");
    let spouse = spouse_regex.captures(&stripped)?.get(1)?.as_str();

    Some(vec![MemberToken::new(close_at_pipe(spouse))])
}

fn parse_plain_text(content: &str) -> Vec<MemberToken> {
    let link_regex = Regex::new(r"\[\[[\w .]*[\]\|]*").expect("Invalid regex pattern");

    let tokens: Vec<MemberToken> = link_regex
        .find_iter(content)
        .map(|m| MemberToken::new(close_at_pipe(m.as_str())))
        .collect();

    if tokens.is_empty() {
        vec![MemberToken::new(content)]
    } else {
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(tokens: Vec<MemberToken>) -> Vec<String> {
        tokens.into_iter().map(|t| t.as_str().to_string()).collect()
    }

    #[test]
    fn test_classify_tags() {
        assert_eq!(classify("plainlist|\n* [[A]]"), Some(Dialect::Plainlist));
        assert_eq!(classify(" HList |[[A]]"), Some(Dialect::Hlist));
        assert_eq!(classify("Unbulleted list|[[A]]"), Some(Dialect::Ublist));
        assert_eq!(classify("Marriage|[[A]]|1990"), Some(Dialect::Marriage));
        assert_eq!(classify("[[A]] and [[B]]"), None);
        assert_eq!(classify("small|[[A]]"), None);
    }

    #[test]
    fn test_classify_only_reads_first_line() {
        assert_eq!(classify("Jane Doe\nhlist|[[A]]"), None);
    }

    #[test]
    fn test_parse_plainlist_preserves_order() {
        let tokens = parse("plainlist|\n* [[A]]\n* [[B]]");
        assert_eq!(strings(tokens), vec!["[[A]]", "[[B]]"]);
    }

    #[test]
    fn test_parse_plainlist_keeps_remainder_verbatim() {
        let tokens = parse("plainlist|\r\n* [[Julius Turing|Julius]] (father)\r\n*Ethel Sara\r\n");
        assert_eq!(
            strings(tokens),
            vec!["[[Julius Turing|Julius]] (father)", "Ethel Sara"]
        );
    }

    #[test]
    fn test_parse_plainlist_without_items_is_empty() {
        assert!(parse("plainlist|[[A]]").is_empty());
    }

    #[test]
    fn test_parse_hlist_collapses_display_text() {
        let tokens = parse("hlist|[[A|B]]|[[C]]");
        assert_eq!(strings(tokens), vec!["[[A]]", "[[C]]"]);
    }

    #[test]
    fn test_parse_hlist_without_links_is_empty() {
        assert!(parse("hlist|Anne|Bob").is_empty());
    }

    #[test]
    fn test_parse_ublist_normalizes_pipes() {
        let tokens = parse("ublist|[[A|B]]|[[Carl Smith]]|Dora");
        assert_eq!(strings(tokens), vec!["[[A]]", "[[Carl Smith]]"]);
    }

    #[test]
    fn test_parse_marriage_link() {
        assert_eq!(strings(parse("marriage|[[Jane Doe]]")), vec!["[[Jane Doe]]"]);
        assert_eq!(
            strings(parse("marriage|[[Jane Doe|Jane]]|1990|2001")),
            vec!["[[Jane Doe]]"]
        );
    }

    #[test]
    fn test_parse_marriage_bare_name_and_tags() {
        assert_eq!(
            strings(parse("Marriage|<small>Jane Doe|1990")),
            vec!["Jane Doe"]
        );
    }

    #[test]
    fn test_parse_marriage_without_spouse_is_empty() {
        assert!(parse("marriage|").is_empty());
    }

    #[test]
    fn test_parse_plain_text_links() {
        let tokens = parse("[[Anne Smith|Anne]] and [[Bob Smith]]");
        assert_eq!(strings(tokens), vec!["[[Anne Smith]]", "[[Bob Smith]]"]);
    }

    #[test]
    fn test_parse_plain_text_without_links_is_single_token() {
        let tokens = parse("Three daughters");
        assert_eq!(strings(tokens), vec!["Three daughters"]);
        assert!(tokens_have_no_links("Three daughters"));
    }

    fn tokens_have_no_links(content: &str) -> bool {
        parse(content).iter().all(|t| t.link_title().is_none())
    }

    #[test]
    fn test_parse_blank_field_is_empty() {
        assert!(parse("").is_empty());
        assert!(parse("  \n").is_empty());
    }

    #[test]
    fn test_parse_is_deterministic() {
        let content = "ublist|[[A]]|[[B|b]]|[[C]]";
        assert_eq!(parse(content), parse(content));
    }
}
