//! Redirect handling on top of an [`ArticleSource`].

use regex::Regex;

use super::ArticleSource;
use crate::error::{FamcheckError, Result};
use crate::wiki::ArticleTitle;

/// Default number of redirect hops followed before giving up.
pub const DEFAULT_MAX_REDIRECTS: usize = 8;

/// Article content together with the title it was finally read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArticle {
    pub title: ArticleTitle,
    pub content: String,
}

/// Fetches articles and transparently follows `#REDIRECT [[Target]]` directives.
///
/// There is no cycle detection; a redirect loop runs until `max_redirects`
/// hops have been taken and then fails with [`FamcheckError::RedirectDepth`].
pub struct RedirectFollower<S> {
    source: S,
    max_redirects: usize,
}

impl<S: ArticleSource> RedirectFollower<S> {
    pub fn new(source: S, max_redirects: usize) -> Self {
        Self {
            source,
            max_redirects,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch `title`, following redirects until an article without one is reached.
    pub async fn fetch_resolved(&self, title: &ArticleTitle) -> Result<ResolvedArticle> {
        let mut current = title.clone();
        let mut hops = 0;

        loop {
            let content = self.source.fetch_raw_article(&current).await?;

            let Some(target) = redirect_target(&content) else {
                return Ok(ResolvedArticle {
                    title: current,
                    content,
                });
            };

            hops += 1;
            if hops > self.max_redirects {
                return Err(FamcheckError::RedirectDepth {
                    title: title.as_str().to_string(),
                    limit: self.max_redirects,
                });
            }

            log::debug!("'{}' redirects to '{}'", current.as_str(), target.as_str());
            current = target;
        }
    }
}

/// Target of a redirect directive anywhere in `content`, without any
/// `#Section` fragment.
pub fn redirect_target(content: &str) -> Option<ArticleTitle> {
    let redirect_regex =
        Regex::new(r"(?i)#redirect\s*\[\[([^\]\|#]*)").expect("Invalid regex pattern");

    let cap = redirect_regex.captures(content)?;
    let target = ArticleTitle::new(cap.get(1)?.as_str());
    if target.is_empty() {
        None
    } else {
        Some(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::MemorySource;

    #[test]
    fn test_redirect_target() {
        assert_eq!(
            redirect_target("#REDIRECT [[Alan Turing]]").unwrap().as_str(),
            "Alan_Turing"
        );
        assert_eq!(
            redirect_target("#redirect[[Turing machine#History|x]]").unwrap().as_str(),
            "Turing_machine"
        );
        assert!(redirect_target("{{Infobox person}}").is_none());
    }

    #[tokio::test]
    async fn test_fetch_without_redirect() {
        let source = MemorySource::new().with_article("A", "plain body");
        let follower = RedirectFollower::new(&source, DEFAULT_MAX_REDIRECTS);

        let article = follower.fetch_resolved(&ArticleTitle::new("A")).await.unwrap();
        assert_eq!(article.title.as_str(), "A");
        assert_eq!(article.content, "plain body");
        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_fetch_follows_redirect_chain() {
        let source = MemorySource::new()
            .with_article("Turing", "#REDIRECT [[Alan M. Turing]]")
            .with_article("Alan M. Turing", "#redirect [[Alan Turing]]")
            .with_article("Alan Turing", "real body");
        let follower = RedirectFollower::new(&source, DEFAULT_MAX_REDIRECTS);

        let article = follower
            .fetch_resolved(&ArticleTitle::new("Turing"))
            .await
            .unwrap();
        assert_eq!(article.title.as_str(), "Alan_Turing");
        assert_eq!(article.content, "real body");
        assert_eq!(source.fetch_count(), 3);
    }

    #[tokio::test]
    async fn test_redirect_loop_hits_depth_limit() {
        let source = MemorySource::new()
            .with_article("A", "#redirect [[B]]")
            .with_article("B", "#redirect [[A]]");
        let follower = RedirectFollower::new(&source, 3);

        let err = follower.fetch_resolved(&ArticleTitle::new("A")).await.unwrap_err();
        assert!(matches!(err, FamcheckError::RedirectDepth { limit: 3, .. }));
        assert_eq!(source.fetch_count(), 4);
    }

    #[tokio::test]
    async fn test_redirect_to_missing_article_fails() {
        let source = MemorySource::new().with_article("A", "#redirect [[Gone]]");
        let follower = RedirectFollower::new(&source, DEFAULT_MAX_REDIRECTS);

        let err = follower.fetch_resolved(&ArticleTitle::new("A")).await.unwrap_err();
        assert!(matches!(err, FamcheckError::Fetch { .. }));
    }
}
