pub mod config;
pub mod error;
pub mod family;
pub mod fetch;
pub mod wiki;

pub use config::Config;
pub use error::{FamcheckError, Result};
pub use family::{
    CheckResult, CheckStatus, FamilyGraph, FamilyGraphResolver, FamilyMember, FamilyMemberGroup,
    Member, ProfileFields,
};
pub use fetch::{ArticleSource, MediaWikiSource, MemorySource};
pub use wiki::{ArticleTitle, MemberToken, RelationKind};
