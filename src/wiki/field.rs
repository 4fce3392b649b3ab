//! Infobox field extraction.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three relationship fields tracked per article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    Spouse,
    Parents,
    Children,
}

impl RelationKind {
    /// Every kind, in output order.
    pub const ALL: [RelationKind; 3] = [
        RelationKind::Spouse,
        RelationKind::Parents,
        RelationKind::Children,
    ];

    /// Field name as written in article markup.
    pub fn field_name(self) -> &'static str {
        match self {
            RelationKind::Spouse => "spouse",
            RelationKind::Parents => "parents",
            RelationKind::Children => "children",
        }
    }

    /// Field of a relative's own profile that must point back at the root
    /// article for the relationship to be symmetric.
    pub fn reciprocal(self) -> RelationKind {
        match self {
            RelationKind::Spouse => RelationKind::Spouse,
            RelationKind::Parents => RelationKind::Children,
            RelationKind::Children => RelationKind::Parents,
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// Extract the raw value of `field_name = {{ ... }}` from an article body.
///
/// Matching is case-insensitive and spans lines. The first `}}` closes the
/// field, so values with nested `{{ }}` templates are cut short. Returns
/// `None` when the field does not occur.
pub fn extract_field(article_body: &str, field_name: &str) -> Option<String> {
    let pattern = format!(r"(?is){} *= *\{{\{{(.*?)\}}\}}", regex::escape(field_name));
    let field_regex = Regex::new(&pattern).expect("Invalid regex pattern");

    field_regex
        .captures(article_body)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
}
