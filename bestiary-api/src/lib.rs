//! Minimal Monster Search Service client.
//!
//! This crate provides a focused client for the bestiary HTTP API with:
//! - Name-substring monster search, optionally paged
//! - Single-monster lookup by id
//! - Spell search
//! - Leniently decoded wire records (see [`model`])

pub mod model;

pub use model::{
    Action, ConditionImmunity, DamageImmunity, DamageResistance, DamageVulnerability, Language,
    Monster, SavingThrow, Sense, Skill, SpecialAbility, Speed, Spell,
};

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use url::Url;

const DEFAULT_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_PAGE_SIZE: u32 = 10;

/// Errors that can occur when talking to the Monster Search Service.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Not found")]
    NotFound,

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Connection settings for [`MonsterApi`].
#[derive(Debug, Clone)]
pub struct ApiConfig {
    base_url: Url,
    pub page_size: u32,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl ApiConfig {
    /// Create a config for the service at `base_url`.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            page_size: DEFAULT_PAGE_SIZE,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        })
    }

    /// Read `BESTIARY_API_URL` and `BESTIARY_PAGE_SIZE`, falling back to
    /// `http://localhost:5000` and 10.
    pub fn from_env() -> Result<Self, Error> {
        let base_url =
            std::env::var("BESTIARY_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let mut config = Self::new(&base_url)?;

        if let Ok(raw) = std::env::var("BESTIARY_PAGE_SIZE") {
            let page_size = raw
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("BESTIARY_PAGE_SIZE is not a number: {raw}")))?;
            config = config.with_page_size(page_size);
        }

        Ok(config)
    }

    /// Set the number of records requested per page. Zero is clamped to one.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

/// Parse a base URL and make sure relative joins append to its path.
fn parse_base_url(raw: &str) -> Result<Url, Error> {
    let mut url =
        Url::parse(raw.trim()).map_err(|e| Error::Config(format!("Invalid base URL {raw}: {e}")))?;

    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(Error::Config(format!("Base URL must be http(s): {raw}")));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    Ok(url)
}

/// A name-substring search, optionally paged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery {
    pub name: String,
    pub page: Option<u32>,
    pub page_count: Option<u32>,
}

impl SearchQuery {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            page: None,
            page_count: None,
        }
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_page_count(mut self, page_count: u32) -> Self {
        self.page_count = Some(page_count);
        self
    }
}

/// Monster Search Service client.
#[derive(Clone)]
pub struct MonsterApi {
    client: reqwest::Client,
    config: ApiConfig,
}

impl MonsterApi {
    /// Create a client with the given configuration.
    pub fn new(config: ApiConfig) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Create a client from `BESTIARY_API_URL` / `BESTIARY_PAGE_SIZE`.
    pub fn from_env() -> Result<Self, Error> {
        Self::new(ApiConfig::from_env()?)
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// `GET /monsters?name=<name>`: every monster whose name contains
    /// `name`, case-insensitively. An empty name is sent as-is.
    pub async fn search_monsters(&self, name: &str) -> Result<Vec<Monster>, Error> {
        self.search_monsters_page(&SearchQuery::by_name(name)).await
    }

    /// `GET /monsters` with explicit paging.
    pub async fn search_monsters_page(&self, query: &SearchQuery) -> Result<Vec<Monster>, Error> {
        let url = self.search_url("monsters", query)?;
        self.get_json(url).await
    }

    /// `GET /monsters/<id>`.
    pub async fn get_monster(&self, id: i64) -> Result<Monster, Error> {
        let url = self.endpoint(&format!("monsters/{id}"))?;
        match self.get_json(url).await {
            Err(Error::Api { status: 404, .. }) => Err(Error::NotFound),
            other => other,
        }
    }

    /// `GET /spells?name=<name>` with optional paging.
    pub async fn search_spells(&self, query: &SearchQuery) -> Result<Vec<Spell>, Error> {
        let url = self.search_url("spells", query)?;
        self.get_json(url).await
    }

    fn endpoint(&self, path: &str) -> Result<Url, Error> {
        self.config
            .base_url
            .join(path)
            .map_err(|e| Error::Config(format!("Invalid endpoint {path}: {e}")))
    }

    fn search_url(&self, path: &str, query: &SearchQuery) -> Result<Url, Error> {
        let mut url = self.endpoint(path)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("name", &query.name);
            if let Some(page) = query.page {
                pairs.append_pair("page", &page.to_string());
            }
            if let Some(page_count) = query.page_count {
                pairs.append_pair("page_count", &page_count.to_string());
            }
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        tracing::debug!(%url, "GET");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        tracing::debug!(%url, status = status.as_u16(), "response");

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(%url, status = status.as_u16(), "request failed");
            return Err(Error::Api {
                status: status.as_u16(),
                message: summarize_body(status, &message),
            });
        }

        response
            .json()
            .await
            .map_err(|e| Error::Parse(e.to_string()))
    }
}

/// Pull the `error` field out of a JSON error body, or fall back to the
/// status reason.
fn summarize_body(status: StatusCode, body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        error: String,
    }

    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return parsed.error;
    }
    if body.trim().is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string();
    }
    body.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str) -> MonsterApi {
        MonsterApi::new(ApiConfig::new(base).unwrap()).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = ApiConfig::new(DEFAULT_BASE_URL).unwrap();
        assert_eq!(config.base_url().as_str(), "http://localhost:5000/");
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn test_page_size_never_zero() {
        let config = ApiConfig::new(DEFAULT_BASE_URL).unwrap().with_page_size(0);
        assert_eq!(config.page_size, 1);
    }

    #[test]
    fn test_rejects_bad_base_url() {
        assert!(matches!(ApiConfig::new("not a url"), Err(Error::Config(_))));
        assert!(matches!(
            ApiConfig::new("ftp://example.com"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_search_url_encodes_name() {
        let url = api("http://localhost:5000")
            .search_url("monsters", &SearchQuery::by_name("ancient red dragon"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/monsters?name=ancient+red+dragon"
        );
    }

    #[test]
    fn test_search_url_keeps_empty_name() {
        let url = api("http://localhost:5000")
            .search_url("monsters", &SearchQuery::by_name(""))
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/monsters?name=");
    }

    #[test]
    fn test_search_url_with_paging() {
        let query = SearchQuery::by_name("gob").with_page(2).with_page_count(25);
        let url = api("http://localhost:5000").search_url("monsters", &query).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/monsters?name=gob&page=2&page_count=25"
        );
    }

    #[test]
    fn test_base_path_is_preserved() {
        let url = api("https://example.com/api")
            .endpoint("monsters/7")
            .unwrap();
        assert_eq!(url.as_str(), "https://example.com/api/monsters/7");
    }

    #[test]
    fn test_summarize_body() {
        assert_eq!(
            summarize_body(StatusCode::NOT_FOUND, r#"{"error": "Not found"}"#),
            "Not found"
        );
        assert_eq!(
            summarize_body(StatusCode::INTERNAL_SERVER_ERROR, ""),
            "Internal Server Error"
        );
        assert_eq!(summarize_body(StatusCode::BAD_GATEWAY, " upstream down "), "upstream down");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_network_error() {
        // Port 9 (discard) on localhost is closed in test environments.
        let api = MonsterApi::new(
            ApiConfig::new("http://127.0.0.1:9")
                .unwrap()
                .with_timeout(Duration::from_secs(2)),
        )
        .unwrap();

        let result = api.search_monsters("goblin").await;
        assert!(matches!(result, Err(Error::Network(_))));
    }
}
