use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::error::CrawlError;
use crate::firecrawl::ScrapeService;
use crate::{CrawlRequest, CrawlResult};

/// Result of one user-triggered crawl, successful or not.
#[derive(Debug)]
pub struct CrawlOutcome {
    pub request: CrawlRequest,
    pub requested_at: DateTime<Utc>,
    pub elapsed: Duration,
    pub result: Result<CrawlResult, CrawlError>,
}

impl CrawlOutcome {
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Dispatches one request to the scrape service and waits for the answer.
#[derive(Clone)]
pub struct Crawler {
    service: Arc<dyn ScrapeService>,
}

impl Crawler {
    pub fn new(service: Arc<dyn ScrapeService>) -> Self {
        Self { service }
    }

    pub async fn crawl(&self, request: CrawlRequest) -> CrawlOutcome {
        let requested_at = Utc::now();
        let start = Instant::now();
        tracing::info!(url = %request.url, "crawl started");

        let result = self
            .service
            .scrape(&request)
            .await
            .map_err(CrawlError::from);
        let elapsed = start.elapsed();

        match &result {
            Ok(_) => tracing::info!(
                url = %request.url,
                elapsed_ms = elapsed.as_millis() as u64,
                "crawl completed"
            ),
            Err(e) => tracing::warn!(
                url = %request.url,
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "crawl failed"
            ),
        }

        CrawlOutcome {
            request,
            requested_at,
            elapsed,
            result,
        }
    }
}
