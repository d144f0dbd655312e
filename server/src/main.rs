mod handlers;
mod routes;
mod state;
mod views;

#[cfg(test)]
mod test_support;

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crawl_service_cli::config::Settings;
use crawl_service_cli::crawler::Crawler;
use crawl_service_cli::firecrawl::FirecrawlClient;
use crawl_service_cli::logging::{init_logging, LogConfig};

use routes::crawl::crawl_routes;
use state::AppState;

const BIND_VAR: &str = "CRAWLER_BIND";
const DEFAULT_BIND: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    init_logging(LogConfig::default())?;

    // The key is required before anything is served.
    let settings = match Settings::load(None) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "startup aborted");
            eprintln!("{e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    // One client for the whole process.
    let client = FirecrawlClient::new(settings.api_key, &settings.api_url)?;
    let state = AppState::new(Crawler::new(Arc::new(client)));

    let app = crawl_routes(state).layer(TraceLayer::new_for_http());

    let bind = env::var(BIND_VAR).unwrap_or_else(|_| DEFAULT_BIND.to_string());
    let listener = TcpListener::bind(&bind).await?;
    tracing::info!(address = %bind, api = %settings.api_url, "web crawler listening");
    axum::serve(listener, app).await?;

    Ok(ExitCode::SUCCESS)
}
