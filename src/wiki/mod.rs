//! Wiki markup handling: infobox field extraction, list dialect parsing and
//! title resolution.
//!
//! Everything here is pure computation on strings; fetching lives in
//! [`crate::fetch`].

pub mod dialect;
pub mod field;
pub mod title;

pub use dialect::{classify, parse, Dialect, MemberToken};
pub use field::{extract_field, RelationKind};
pub use title::{extract_link_title, resolve_from_url, ArticleTitle, TITLE_SEPARATOR};

/// Extract and parse one relationship field of an article.
///
/// An absent field is an empty list, same as a field that failed to parse.
pub fn field_members(article_body: &str, kind: RelationKind) -> Vec<MemberToken> {
    match extract_field(article_body, kind.field_name()) {
        Some(raw) => parse(&raw),
        None => {
            log::debug!("Field '{}' absent", kind);
            Vec::new()
        }
    }
}
