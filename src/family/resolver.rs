//! One-hop resolution of an article's relatives.

use futures_util::future::try_join_all;

use super::{CheckResult, FamilyGraph, FamilyMember, FamilyMemberGroup, Member, ProfileFields};
use crate::config::{FetchFailurePolicy, ResolverConfig};
use crate::error::{FamcheckError, Result};
use crate::fetch::{ArticleSource, RedirectFollower};
use crate::wiki::{resolve_from_url, MemberToken, RelationKind};

/// Resolves a single member token into a fetched relative.
pub struct RelativeResolver<S> {
    follower: RedirectFollower<S>,
    on_fetch_error: FetchFailurePolicy,
}

impl<S: ArticleSource> RelativeResolver<S> {
    pub fn new(follower: RedirectFollower<S>, on_fetch_error: FetchFailurePolicy) -> Self {
        Self {
            follower,
            on_fetch_error,
        }
    }

    /// Resolve one token.
    ///
    /// Tokens without a wikilink become "Can't check" without any fetch.
    /// Linked tokens are fetched (following redirects) and their own
    /// spouse/parents/children fields parsed; those fields are not resolved
    /// any further.
    pub async fn resolve(&self, token: &MemberToken) -> Result<Member> {
        let Some(title) = token.link_title() else {
            log::debug!("No link in {:?}, can't check", token.as_str());
            return Ok(Member::Checked(CheckResult::cant_check(token.as_str())));
        };

        match self.follower.fetch_resolved(&title).await {
            Ok(article) => Ok(Member::Resolved(FamilyMember {
                name: article.title,
                info: ProfileFields::from_article(&article.content),
            })),
            Err(e) if self.on_fetch_error == FetchFailurePolicy::Degrade => {
                log::warn!("Could not fetch relative '{}': {}", title.as_str(), e);
                Ok(Member::Checked(CheckResult::cant_check(title.display_name())))
            }
            Err(e) => Err(e),
        }
    }
}

/// Resolves a root article's family: fetch the root once, parse its three
/// relationship fields, then resolve every member of every group
/// concurrently.
///
/// All member futures run on the caller's task; suspension happens only at
/// fetches. Groups and members come back in source order regardless of
/// completion order. Under [`FetchFailurePolicy::FailFast`] the first failed
/// fetch fails the whole resolution and the remaining fetches are dropped.
pub struct FamilyGraphResolver<S> {
    relatives: RelativeResolver<S>,
}

impl<S: ArticleSource> FamilyGraphResolver<S> {
    pub fn new(source: S, config: &ResolverConfig) -> Self {
        let follower = RedirectFollower::new(source, config.max_redirects);
        Self {
            relatives: RelativeResolver::new(follower, config.on_fetch_error),
        }
    }

    pub fn source(&self) -> &S {
        self.relatives.follower.source()
    }

    /// Resolve the family of the article named by a URL or bare title.
    ///
    /// Always yields three groups, spouse, parents and children in that
    /// order. A failure fetching the root itself is always fatal.
    pub async fn resolve_family(&self, root_url_or_title: &str) -> Result<FamilyGraph> {
        let root = resolve_from_url(root_url_or_title);
        if root.is_empty() {
            return Err(FamcheckError::InvalidInput(
                "article URL or title is empty".to_string(),
            ));
        }

        let article = self.relatives.follower.fetch_resolved(&root).await?;
        let info = ProfileFields::from_article(&article.content);

        let groups = try_join_all(
            RelationKind::ALL
                .iter()
                .map(|&kind| self.resolve_group(kind, info.get(kind))),
        )
        .await?;

        log::info!(
            "Resolved family of '{}': {} spouse(s), {} parent(s), {} child(ren)",
            article.title,
            info.spouse.len(),
            info.parents.len(),
            info.children.len()
        );

        Ok(FamilyGraph {
            root: article.title,
            groups,
        })
    }

    /// Resolve the family and stamp a verdict on every member.
    pub async fn check_family(&self, root_url_or_title: &str) -> Result<FamilyGraph> {
        Ok(self.resolve_family(root_url_or_title).await?.validated())
    }

    async fn resolve_group(
        &self,
        kind: RelationKind,
        tokens: &[MemberToken],
    ) -> Result<FamilyMemberGroup> {
        let members =
            try_join_all(tokens.iter().map(|token| self.relatives.resolve(token))).await?;

        Ok(FamilyMemberGroup {
            group_name: kind,
            members,
        })
    }
}
