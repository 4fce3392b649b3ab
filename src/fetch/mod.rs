//! Article sources: where raw article markup comes from.
//!
//! The resolver only needs one capability, "give me the markup for this
//! title", expressed by [`ArticleSource`]. [`MediaWikiSource`] talks to a
//! MediaWiki API over HTTP, [`MemorySource`] serves fixed content and is what
//! tests run against. [`RedirectFollower`] layers redirect handling on top of
//! any source.

pub mod mediawiki;
pub mod memory;
pub mod redirect;

pub use mediawiki::MediaWikiSource;
pub use memory::MemorySource;
pub use redirect::{RedirectFollower, ResolvedArticle};

use async_trait::async_trait;

use crate::error::Result;
use crate::wiki::ArticleTitle;

/// Raw article fetch capability.
///
/// Implementations return the article's markup as-is, without following
/// redirects. Any failure (missing page, transport, malformed response) is
/// an error.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    async fn fetch_raw_article(&self, title: &ArticleTitle) -> Result<String>;
}

#[async_trait]
impl<T: ArticleSource + ?Sized> ArticleSource for &T {
    async fn fetch_raw_article(&self, title: &ArticleTitle) -> Result<String> {
        (**self).fetch_raw_article(title).await
    }
}

#[async_trait]
impl<T: ArticleSource + ?Sized> ArticleSource for std::sync::Arc<T> {
    async fn fetch_raw_article(&self, title: &ArticleTitle) -> Result<String> {
        (**self).fetch_raw_article(title).await
    }
}
