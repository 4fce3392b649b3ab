use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use super::ArticleSource;
use crate::error::{FamcheckError, Result};
use crate::wiki::ArticleTitle;

/// In-memory article source
///
/// Serves fixed markup keyed by normalized title. Titles that were never
/// added, or that were marked failing, produce a fetch error. Every call is
/// counted so callers can assert how many fetches a run performed.
#[derive(Debug, Default)]
pub struct MemorySource {
    articles: HashMap<ArticleTitle, String>,
    failing: HashSet<ArticleTitle>,
    fetches: AtomicUsize,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) an article.
    pub fn with_article(mut self, title: &str, content: impl Into<String>) -> Self {
        self.articles.insert(ArticleTitle::new(title), content.into());
        self
    }

    /// Make every fetch of `title` fail.
    pub fn with_failure(mut self, title: &str) -> Self {
        self.failing.insert(ArticleTitle::new(title));
        self
    }

    /// Number of fetches served or refused so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ArticleSource for MemorySource {
    async fn fetch_raw_article(&self, title: &ArticleTitle) -> Result<String> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        if self.failing.contains(title) {
            return Err(FamcheckError::fetch(title.as_str(), "injected failure"));
        }

        self.articles
            .get(title)
            .cloned()
            .ok_or_else(|| FamcheckError::fetch(title.as_str(), "article not found"))
    }
}
