pub mod crawl_handlers;
pub mod download_handlers;
