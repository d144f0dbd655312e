use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use crawl_service_cli::crawler::Crawler;
use crawl_service_cli::error::ScrapeError;
use crawl_service_cli::firecrawl::ScrapeService;
use crawl_service_cli::{CrawlRequest, CrawlResult};

/// Scrape service stand-in that records every request it receives.
pub struct FakeScrape {
    pub seen: Mutex<Vec<CrawlRequest>>,
    reply: Result<CrawlResult, String>,
}

impl FakeScrape {
    pub fn replying(result: CrawlResult) -> Arc<Self> {
        Arc::new(Self {
            seen: Mutex::new(Vec::new()),
            reply: Ok(result),
        })
    }

    pub fn succeeding() -> Arc<Self> {
        Self::replying(CrawlResult {
            markdown: Some("# Hi".into()),
            ..Default::default()
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            seen: Mutex::new(Vec::new()),
            reply: Err(message.to_string()),
        })
    }

    pub fn calls(&self) -> Vec<CrawlRequest> {
        self.seen.lock().unwrap().clone()
    }
}

pub trait IntoCrawler {
    fn crawler(&self) -> Crawler;
}

impl IntoCrawler for Arc<FakeScrape> {
    fn crawler(&self) -> Crawler {
        Crawler::new(self.clone())
    }
}

#[async_trait]
impl ScrapeService for FakeScrape {
    async fn scrape(&self, request: &CrawlRequest) -> Result<CrawlResult, ScrapeError> {
        self.seen.lock().unwrap().push(request.clone());
        self.reply
            .clone()
            .map_err(ScrapeError::Unsuccessful)
    }
}
