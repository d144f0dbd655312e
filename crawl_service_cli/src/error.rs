use reqwest::StatusCode;
use thiserror::Error;

/// Input problems caught before anything is sent downstream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a URL")]
    EmptyUrl,
    #[error("unknown {kind} tag: {tag}")]
    UnknownTag { kind: &'static str, tag: String },
}

/// Failures talking to the scrape service.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("service returned {status}: {message}")]
    Api { status: StatusCode, message: String },
    #[error("could not decode service response: {0}")]
    Decode(String),
    #[error("scrape failed: {0}")]
    Unsuccessful(String),
}

/// The single error surfaced to users for a failed crawl.
///
/// Failure kinds are not told apart; the message of the underlying error is
/// shown as-is.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct CrawlError(#[from] ScrapeError);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "Please set FIRECRAWL_API_KEY in the secrets file ({secrets_file}) or in a .env file.\n\
         For a deployment, add the key to the secrets file; for local development, \
         export FIRECRAWL_API_KEY or put it in .env."
    )]
    MissingApiKey { secrets_file: String },
    #[error("FIRECRAWL_API_KEY contains characters not allowed in an HTTP header")]
    InvalidApiKey,
    #[error("invalid FIRECRAWL_API_URL {value:?}: {source}")]
    InvalidApiUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
}
