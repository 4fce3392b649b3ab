//! Family graph: one-hop resolution of an article's relatives and the
//! symmetry check between the root's claims and each relative's own claims.

mod resolver;
mod validate;

pub use resolver::{FamilyGraphResolver, RelativeResolver};
pub use validate::validate;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::wiki::{field_members, ArticleTitle, MemberToken, RelationKind};

/// A relative's own relationship fields, parsed but not resolved further.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileFields {
    pub spouse: Vec<MemberToken>,
    pub parents: Vec<MemberToken>,
    pub children: Vec<MemberToken>,
}

impl ProfileFields {
    /// Extract all three fields from an article body; absent fields are empty.
    pub fn from_article(body: &str) -> Self {
        Self {
            spouse: field_members(body, RelationKind::Spouse),
            parents: field_members(body, RelationKind::Parents),
            children: field_members(body, RelationKind::Children),
        }
    }

    pub fn get(&self, kind: RelationKind) -> &[MemberToken] {
        match kind {
            RelationKind::Spouse => &self.spouse,
            RelationKind::Parents => &self.parents,
            RelationKind::Children => &self.children,
        }
    }
}

/// A relative whose article was fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyMember {
    pub name: ArticleTitle,
    pub info: ProfileFields,
}

/// Verdict attached to a relative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckStatus {
    #[serde(rename = "Can't check")]
    CantCheck,
    #[serde(rename = "Match")]
    Match,
    #[serde(rename = "Does not match")]
    DoesNotMatch,
}

impl CheckStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CheckStatus::CantCheck => "Can't check",
            CheckStatus::Match => "Match",
            CheckStatus::DoesNotMatch => "Does not match",
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
}

impl CheckResult {
    pub fn cant_check(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::CantCheck,
        }
    }
}

/// One entry of a group: a fetched relative awaiting validation, or a
/// finished check (either unresolvable or already validated).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Member {
    Resolved(FamilyMember),
    Checked(CheckResult),
}

impl Member {
    pub fn as_check(&self) -> Option<&CheckResult> {
        match self {
            Member::Checked(check) => Some(check),
            Member::Resolved(_) => None,
        }
    }
}

/// All relatives of one kind, in the order they appear in the root article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMemberGroup {
    pub group_name: RelationKind,
    pub members: Vec<Member>,
}

/// Outcome of resolving a root article: the title its fields were read from
/// (after redirects) and one group per relation kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyGraph {
    pub root: ArticleTitle,
    pub groups: Vec<FamilyMemberGroup>,
}

impl FamilyGraph {
    /// Stamp verdicts on every resolved member.
    pub fn validated(self) -> Self {
        let groups = validate(&self.root, self.groups);
        Self {
            root: self.root,
            groups,
        }
    }
}
