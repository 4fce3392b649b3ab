use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use super::ArticleSource;
use crate::config::ApiConfig;
use crate::error::{FamcheckError, Result};
use crate::wiki::ArticleTitle;

/// Response structure of `action=query&prop=revisions` (formatversion 2)
#[derive(Deserialize)]
struct QueryResponse {
    query: Option<Query>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct ApiError {
    code: String,
    info: String,
}

#[derive(Deserialize)]
struct Query {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Deserialize)]
struct Page {
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    #[serde(default)]
    revisions: Vec<Revision>,
}

/// Revision content sits under `slots.main` when `rvslots` is requested and
/// directly on the revision otherwise.
#[derive(Deserialize)]
struct Revision {
    content: Option<String>,
    slots: Option<Slots>,
}

#[derive(Deserialize)]
struct Slots {
    main: Option<Slot>,
}

#[derive(Deserialize)]
struct Slot {
    content: Option<String>,
}

/// MediaWiki API client
///
/// Fetches the latest revision's wikitext for a title. Redirects are *not*
/// resolved server-side; that is [`super::RedirectFollower`]'s job.
pub struct MediaWikiSource {
    client: Client,
    endpoint: Url,
}

impl MediaWikiSource {
    /// Create a new client
    ///
    /// # Arguments
    ///
    /// * `endpoint` - API endpoint, e.g. `https://en.wikipedia.org/w/api.php`
    /// * `user_agent` - User-Agent header sent with every request
    /// * `timeout` - Per-request timeout
    pub fn new(endpoint: &str, user_agent: &str, timeout: Duration) -> Result<Self> {
        let endpoint = Url::parse(endpoint).map_err(|e| {
            FamcheckError::Config(format!("Invalid API endpoint '{}': {}", endpoint, e))
        })?;

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client, endpoint })
    }

    /// Create a client from the `[api]` config section
    pub fn from_config(api: &ApiConfig) -> Result<Self> {
        Self::new(
            &api.endpoint,
            &api.user_agent,
            Duration::from_secs(api.timeout_secs),
        )
    }

    fn request_url(&self, title: &ArticleTitle) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("action", "query")
            .append_pair("prop", "revisions")
            .append_pair("rvprop", "content")
            .append_pair("rvslots", "main")
            .append_pair("format", "json")
            .append_pair("formatversion", "2")
            .append_pair("titles", title.as_str());
        url
    }
}

#[async_trait]
impl ArticleSource for MediaWikiSource {
    async fn fetch_raw_article(&self, title: &ArticleTitle) -> Result<String> {
        let url = self.request_url(title);
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FamcheckError::fetch(title.as_str(), format!("Network error: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FamcheckError::fetch(
                title.as_str(),
                format!("API returned status {}", status),
            ));
        }

        let body = response.text().await.map_err(|e| {
            FamcheckError::fetch(title.as_str(), format!("Failed to read response: {}", e))
        })?;

        content_from_response(title, &body)
    }
}

/// Pull `query.pages[0].revisions[0]` content out of an API response body.
fn content_from_response(title: &ArticleTitle, body: &str) -> Result<String> {
    let response: QueryResponse = serde_json::from_str(body).map_err(|e| {
        FamcheckError::fetch(title.as_str(), format!("Failed to parse response: {}", e))
    })?;

    if let Some(error) = response.error {
        return Err(FamcheckError::fetch(
            title.as_str(),
            format!("API error {}: {}", error.code, error.info),
        ));
    }

    let page = response
        .query
        .and_then(|q| q.pages.into_iter().next())
        .ok_or_else(|| FamcheckError::fetch(title.as_str(), "response has no pages"))?;

    if page.missing || page.invalid {
        return Err(FamcheckError::fetch(title.as_str(), "article does not exist"));
    }

    page.revisions
        .into_iter()
        .next()
        .and_then(|rev| {
            rev.slots
                .and_then(|s| s.main)
                .and_then(|m| m.content)
                .or(rev.content)
        })
        .ok_or_else(|| FamcheckError::fetch(title.as_str(), "response has no revision content"))
}
