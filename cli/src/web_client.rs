use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use cardbase_core::{
    parse_search_page, parse_set_list, Card, CardCatalog, CardSet, Error, Result, SearchPage,
};
use reqwest::{header, StatusCode, Url};
use serde_json::Value;
use tracing::debug;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Catalog client for the Scryfall HTTP API
pub struct ScryfallClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ScryfallClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Client whose requests fail with a transient error after `timeout`
    pub fn with_timeout(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid catalog url '{}'", base_url))?;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let http = reqwest::Client::builder()
            .user_agent(concat!("cardbase/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { http, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidInput(format!("'{}' cannot be a base url", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_text(&self, url: Url, query: &[(&str, String)]) -> Result<(StatusCode, String)> {
        debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        Ok((status, body))
    }
}

fn transport_error(e: reqwest::Error) -> Error {
    Error::TransientIo(format!("catalog request failed: {}", e))
}

/// Parse a response body. Unparseable bodies are transient failures on error
/// statuses and malformed responses on success statuses.
fn response_json(status: StatusCode, body: &str) -> Result<Value> {
    match serde_json::from_str(body) {
        Ok(value) => Ok(value),
        Err(_) if !status.is_success() => {
            Err(Error::TransientIo(format!("catalog returned {}", status)))
        }
        Err(e) => Err(Error::MalformedResponse(e.to_string())),
    }
}

/// Scryfall answers searches without matches with an error object, which
/// the page parser reports as malformed.
fn search_response(status: StatusCode, body: &str) -> Result<SearchPage> {
    parse_search_page(&response_json(status, body)?)
}

fn card_response(status: StatusCode, body: &str) -> Result<Option<Card>> {
    if status == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    if !status.is_success() {
        return Err(Error::TransientIo(format!("catalog returned {}", status)));
    }

    Ok(Some(serde_json::from_value(response_json(status, body)?)?))
}

fn sets_response(status: StatusCode, body: &str) -> Result<Vec<CardSet>> {
    parse_set_list(&response_json(status, body)?)
}

#[async_trait]
impl CardCatalog for ScryfallClient {
    async fn search_cards(&self, query: &str, page: u32) -> Result<SearchPage> {
        let url = self.endpoint(&["cards", "search"])?;
        let (status, body) = self
            .get_text(url, &[("q", query.to_string()), ("page", page.to_string())])
            .await?;

        search_response(status, &body)
    }

    async fn get_card_by_id(&self, id: &str) -> Result<Option<Card>> {
        let url = self.endpoint(&["cards", id])?;
        let (status, body) = self.get_text(url, &[]).await?;

        card_response(status, &body)
    }

    async fn list_sets(&self) -> Result<Vec<CardSet>> {
        let url = self.endpoint(&["sets"])?;
        let (status, body) = self.get_text(url, &[]).await?;

        sets_response(status, &body)
    }
}
