use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use url::Url;

use crate::error::{ConfigError, ScrapeError};
use crate::{CrawlRequest, CrawlResult};

pub const DEFAULT_API_URL: &str = "https://api.firecrawl.dev";
const SCRAPE_PATH: &str = "v2/scrape";
const BODY_SNIPPET_CHARS: usize = 200;

/// Anything that can turn a [`CrawlRequest`] into a [`CrawlResult`].
#[async_trait]
pub trait ScrapeService: Send + Sync {
    async fn scrape(&self, request: &CrawlRequest) -> Result<CrawlResult, ScrapeError>;
}

/// Client for the hosted Firecrawl scrape endpoint.
pub struct FirecrawlClient {
    client: reqwest::Client,
    headers: HeaderMap,
    endpoint: Url,
}

#[derive(Debug, Deserialize)]
struct ScrapeResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<CrawlResult>,
    #[serde(default)]
    error: Option<String>,
}

impl FirecrawlClient {
    pub fn new(api_key: impl Into<String>, api_url: &Url) -> Result<Self, ConfigError> {
        let mut base = api_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base
            .join(SCRAPE_PATH)
            .map_err(|source| ConfigError::InvalidApiUrl {
                value: api_url.to_string(),
                source,
            })?;

        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", api_key.into()))
            .map_err(|_| ConfigError::InvalidApiKey)?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(Self {
            client: reqwest::Client::new(),
            headers,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ScrapeService for FirecrawlClient {
    async fn scrape(&self, request: &CrawlRequest) -> Result<CrawlResult, ScrapeError> {
        tracing::debug!(url = %request.url, endpoint = %self.endpoint, "sending scrape request");

        let res = self
            .client
            .post(self.endpoint.clone())
            .headers(self.headers.clone())
            .json(request)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ScrapeResponse>(&body)
                .ok()
                .and_then(|r| r.error)
                .unwrap_or_else(|| snippet(&body));
            return Err(ScrapeError::Api { status, message });
        }

        let parsed: ScrapeResponse = serde_json::from_str(&body)
            .map_err(|e| ScrapeError::Decode(format!("{e}, body: {}", snippet(&body))))?;

        match parsed {
            ScrapeResponse {
                success: true,
                data: Some(data),
                ..
            } => Ok(data),
            ScrapeResponse { error, .. } => Err(ScrapeError::Unsuccessful(
                error.unwrap_or_else(|| "service reported failure without details".into()),
            )),
        }
    }
}

fn snippet(body: &str) -> String {
    let mut out: String = body.chars().take(BODY_SNIPPET_CHARS).collect();
    if body.chars().count() > BODY_SNIPPET_CHARS {
        out.push('…');
    }
    out
}
