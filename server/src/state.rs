use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use uuid::Uuid;

use crawl_service_cli::crawler::Crawler;
use crawl_service_cli::render::{Export, ExportKind};

// Upper bound on stored results; the oldest are dropped once it is exceeded.
pub const MAX_STORED_RESULTS: usize = 64;

#[derive(Clone, Debug)]
pub struct StoredExports {
    pub seq: u64,
    pub exports: Vec<Export>,
}

#[derive(Clone)]
pub struct AppState {
    pub crawler: Crawler,
    // result id → exports offered for that render
    pub results: Arc<DashMap<Uuid, StoredExports>>,
    next_seq: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(crawler: Crawler) -> Self {
        AppState {
            crawler,
            results: Arc::new(DashMap::new()),
            next_seq: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn store_exports(&self, exports: Vec<Export>) -> Uuid {
        let id = Uuid::new_v4();
        self.results.insert(
            id,
            StoredExports {
                seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
                exports,
            },
        );

        while self.results.len() > MAX_STORED_RESULTS {
            let oldest = self
                .results
                .iter()
                .min_by_key(|entry| entry.value().seq)
                .map(|entry| *entry.key());
            match oldest {
                Some(oldest) => {
                    self.results.remove(&oldest);
                }
                None => break,
            }
        }
        id
    }

    pub fn export(&self, id: &Uuid, kind: ExportKind) -> Option<Export> {
        self.results
            .get(id)
            .and_then(|stored| stored.exports.iter().find(|e| e.kind == kind).cloned())
    }
}
