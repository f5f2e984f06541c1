//! Encyclopedia lookups against the MediaWiki action API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{config::WikipediaConfig, Result};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("topic is ambiguous")]
    Ambiguous,
    #[error("topic not found")]
    NotFound,
    #[error("encyclopedia unavailable: {0}")]
    Unavailable(String),
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        LookupError::Unavailable(err.to_string())
    }
}

/// Short topic summaries
#[async_trait]
pub trait Encyclopedia: Send + Sync {
    async fn summarize(&self, topic: &str, sentences: u8) -> std::result::Result<String, LookupError>;
}

// ============================================================================
// Wire format (formatversion=2)
// ============================================================================

#[derive(Debug, Deserialize)]
struct SearchResponse {
    query: Option<SearchQuery>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
    #[serde(default)]
    searchinfo: Option<SearchInfo>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

#[derive(Debug, Deserialize)]
struct SearchInfo {
    #[serde(default)]
    suggestion: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PageResponse {
    query: Option<PageQuery>,
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    extract: Option<String>,
    #[serde(default)]
    pageprops: Option<serde_json::Map<String, serde_json::Value>>,
}

enum SearchOutcome {
    Title(String),
    Suggestion(String),
    Nothing,
}

fn parse_search(body: &str) -> std::result::Result<SearchOutcome, LookupError> {
    let parsed: SearchResponse = serde_json::from_str(body)
        .map_err(|e| LookupError::Unavailable(format!("bad search response: {}", e)))?;
    let Some(query) = parsed.query else {
        return Ok(SearchOutcome::Nothing);
    };

    if let Some(hit) = query.search.into_iter().next() {
        return Ok(SearchOutcome::Title(hit.title));
    }

    Ok(query
        .searchinfo
        .and_then(|info| info.suggestion)
        .map(SearchOutcome::Suggestion)
        .unwrap_or(SearchOutcome::Nothing))
}

fn parse_page(body: &str) -> std::result::Result<String, LookupError> {
    let parsed: PageResponse = serde_json::from_str(body)
        .map_err(|e| LookupError::Unavailable(format!("bad page response: {}", e)))?;
    let page = parsed
        .query
        .and_then(|query| query.pages.into_iter().next())
        .ok_or(LookupError::NotFound)?;

    if page.missing {
        return Err(LookupError::NotFound);
    }
    if page
        .pageprops
        .as_ref()
        .is_some_and(|props| props.contains_key("disambiguation"))
    {
        return Err(LookupError::Ambiguous);
    }

    page.extract
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or(LookupError::NotFound)
}

/// Wikipedia client: search for the best title, then fetch its intro
pub struct WikipediaClient {
    client: Client,
    endpoint: String,
}

impl WikipediaClient {
    pub fn new(config: &WikipediaConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .user_agent(concat!("jarvis/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    async fn get(&self, params: &[(&str, &str)]) -> std::result::Result<String, LookupError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("action", "query"), ("format", "json"), ("formatversion", "2")])
            .query(params)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.text().await?)
    }

    async fn search(&self, topic: &str) -> std::result::Result<SearchOutcome, LookupError> {
        let body = self
            .get(&[
                ("list", "search"),
                ("srsearch", topic),
                ("srlimit", "1"),
                ("srinfo", "suggestion"),
                ("srprop", ""),
            ])
            .await?;
        parse_search(&body)
    }

    async fn best_title(&self, topic: &str) -> std::result::Result<String, LookupError> {
        match self.search(topic).await? {
            SearchOutcome::Title(title) => Ok(title),
            SearchOutcome::Suggestion(suggestion) => {
                debug!("No hits for '{}', retrying with '{}'", topic, suggestion);
                match self.search(&suggestion).await? {
                    SearchOutcome::Title(title) => Ok(title),
                    _ => Err(LookupError::NotFound),
                }
            }
            SearchOutcome::Nothing => Err(LookupError::NotFound),
        }
    }
}

#[async_trait]
impl Encyclopedia for WikipediaClient {
    async fn summarize(&self, topic: &str, sentences: u8) -> std::result::Result<String, LookupError> {
        let title = self.best_title(topic).await?;
        let sentences = sentences.to_string();

        let body = self
            .get(&[
                ("prop", "extracts|pageprops"),
                ("ppprop", "disambiguation"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("exsentences", &sentences),
                ("redirects", "1"),
                ("titles", &title),
            ])
            .await?;

        parse_page(&body).inspect_err(|e| warn!("Wikipedia lookup for '{}' failed: {}", title, e))
    }
}
