use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use crawl_service_cli::{
    config::Settings,
    crawler::Crawler,
    firecrawl::FirecrawlClient,
    logging::{init_logging, LogConfig},
    render::{self, Pane, ERROR_HINT},
    tags::selection_or_defaults,
    utils, CrawlRequest, ExcludeTag, IncludeTag,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Scrape one page through Firecrawl", long_about = None)]
struct Args {
    /// URL to crawl
    #[arg(short, long)]
    url: String,

    /// Tags to keep (repeatable); defaults to h1, h2, h3, p
    #[arg(short, long = "include", value_enum)]
    include: Vec<IncludeTag>,

    /// Tags to strip (repeatable); defaults to script, style
    #[arg(short, long = "exclude", value_enum)]
    exclude: Vec<ExcludeTag>,

    /// Send no tag filters unless given explicitly
    #[arg(long)]
    no_default_tags: bool,

    /// Directory for the exported .md/.html files
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Secrets file holding FIRECRAWL_API_KEY
    #[arg(long)]
    secrets: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // 1) .env, then logging
    dotenvy::dotenv().ok();
    init_logging(LogConfig::default())?;

    let args = Args::parse();

    // 2) credentials
    let settings = match Settings::load(args.secrets.clone()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    // 3) build the request
    let use_defaults = !args.no_default_tags;
    let include = selection_or_defaults(args.include, IncludeTag::DEFAULTS, use_defaults);
    let exclude = selection_or_defaults(args.exclude, ExcludeTag::DEFAULTS, use_defaults);
    let request = match CrawlRequest::new(&args.url, include, exclude) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    // 4) one call, then render
    let client = FirecrawlClient::new(settings.api_key, &settings.api_url)?;
    let crawler = Crawler::new(Arc::new(client));
    let outcome = crawler.crawl(request).await;

    let result = match &outcome.result {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{}", render::error_message(e));
            eprintln!("{ERROR_HINT}");
            eprintln!("(after {:.2} seconds)", outcome.elapsed_secs());
            return Ok(ExitCode::FAILURE);
        }
    };

    println!("{}", render::success_message(outcome.elapsed_secs()));
    let rendered = render::render(result, &outcome.request.url, outcome.requested_at);

    print_pane("Extracted Markdown Content", &rendered.markdown);
    print_pane("HTML Content", &rendered.html);
    println!("\n== Page Metadata ==");
    for entry in &rendered.metadata {
        println!("{}: {}", entry.label, entry.value);
    }

    // 5) exports
    for export in &rendered.exports {
        let path = utils::save_export(export, &args.out_dir)?;
        println!("{} -> {}", export.kind.label(), path.display());
    }

    Ok(ExitCode::SUCCESS)
}

fn print_pane(title: &str, pane: &Pane) {
    println!("\n== {title} ==");
    match pane {
        Pane::Content(text) => println!("{text}"),
        Pane::Unavailable(placeholder) => println!("({placeholder})"),
    }
}
