//! Content Delivery API client.
//!
//! Blocking; build it on the thread that uses it (see [`crate::async_api`]).

use crate::model::QueryResponse;
use crate::{ContentSource, Error, Result, SiteConfig};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Error body returned by the API on non-success statuses
#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: Option<String>,
}

pub struct ContentfulClient {
    client: Client,
    config: SiteConfig,
    entries_url: Url,
}

impl ContentfulClient {
    pub fn new(config: SiteConfig) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.access_token))
            .map_err(|e| Error::ConfigError(format!("Invalid access token: {}", e)))?;
        headers.insert(AUTHORIZATION, bearer);
        for (name, value) in &config.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::ConfigError(format!("Invalid header name {:?}: {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| Error::ConfigError(format!("Invalid value for header {}: {}", name, e)))?;
            headers.insert(name, value);
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()
            .map_err(|e| Error::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        let entries_url = Url::parse(&format!(
            "{}://{}/spaces/{}/environments/{}/entries",
            config.scheme, config.host, config.space_id, config.environment
        ))
        .map_err(|e| Error::ConfigError(format!("Invalid API url: {}", e)))?;

        Ok(Self { client, config, entries_url })
    }

    /// Entries endpoint with the given query parameters plus include depth
    /// and a limit of one.
    pub fn query_url(&self, params: &[(&str, &str)]) -> Url {
        let mut url = self.entries_url.clone();
        {
            let mut q = url.query_pairs_mut();
            for (k, v) in params {
                q.append_pair(k, v);
            }
            q.append_pair("include", &self.config.include_depth.to_string());
            q.append_pair("limit", "1");
        }
        url
    }

    fn fetch(&self, url: Url) -> Result<QueryResponse> {
        log::info!("GET {}", url);
        let resp = self.client.get(url.clone()).send().map_err(|e| self.transport_error(e))?;
        let status = resp.status();
        let body = resp.text().map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiError>(&body)
                .ok()
                .and_then(|e| e.message)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
            log::warn!("GET {} answered {}: {}", url, status.as_u16(), message);
            return Err(Error::QueryError { status: status.as_u16(), message });
        }

        let response: QueryResponse = serde_json::from_str(&body)?;
        log::debug!(
            "GET {}: {} item(s), {} included entries, {} included assets",
            url,
            response.items.len(),
            response.includes.entries.len(),
            response.includes.assets.len()
        );
        Ok(response)
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout(self.config.timeout_ms)
        } else {
            err.into()
        }
    }
}

impl ContentSource for ContentfulClient {
    fn query_by_slug(&self, content_type: &str, slug: &str) -> Result<QueryResponse> {
        let url = self.query_url(&[("content_type", content_type), (self.config.slug_field.as_str(), slug)]);
        self.fetch(url)
    }

    fn query_by_id(&self, id: &str) -> Result<QueryResponse> {
        let url = self.query_url(&[("sys.id", id)]);
        self.fetch(url)
    }
}
