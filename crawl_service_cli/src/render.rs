//! Maps a [`CrawlResult`] onto the three result panes and their exports.
//!
//! Content is echoed literally. Escaping for a particular surface (HTML page,
//! terminal) is left to whoever displays the panes.

use chrono::{DateTime, Utc};

use crate::CrawlResult;

pub const NOT_AVAILABLE: &str = "N/A";
pub const NO_MARKDOWN: &str = "No markdown content extracted";
pub const NO_HTML: &str = "No HTML content extracted";
pub const ERROR_HINT: &str = "Please check your API key and URL, then try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Markdown,
    Html,
}

impl ExportKind {
    pub fn extension(self) -> &'static str {
        match self {
            ExportKind::Markdown => "md",
            ExportKind::Html => "html",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            ExportKind::Markdown => "text/markdown",
            ExportKind::Html => "text/html",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExportKind::Markdown => "Download Markdown",
            ExportKind::Html => "Download HTML",
        }
    }

    /// Path segment used by download links.
    pub fn slug(self) -> &'static str {
        match self {
            ExportKind::Markdown => "markdown",
            ExportKind::Html => "html",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "markdown" => Some(ExportKind::Markdown),
            "html" => Some(ExportKind::Html),
            _ => None,
        }
    }
}

/// A file the user can save: literal pane content plus its file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub kind: ExportKind,
    pub file_name: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pane {
    Content(String),
    Unavailable(&'static str),
}

impl Pane {
    pub fn content(&self) -> Option<&str> {
        match self {
            Pane::Content(s) => Some(s),
            Pane::Unavailable(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataEntry {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedResult {
    pub markdown: Pane,
    pub html: Pane,
    pub metadata: Vec<MetadataEntry>,
    pub exports: Vec<Export>,
}

impl RenderedResult {
    pub fn export(&self, kind: ExportKind) -> Option<&Export> {
        self.exports.iter().find(|e| e.kind == kind)
    }
}

/// `crawled_content_<unix seconds>.<ext>`
pub fn export_file_name(kind: ExportKind, requested_at: DateTime<Utc>) -> String {
    format!(
        "crawled_content_{}.{}",
        requested_at.timestamp(),
        kind.extension()
    )
}

pub fn success_message(elapsed_secs: f64) -> String {
    format!("Crawling completed in {elapsed_secs:.2} seconds!")
}

pub fn error_message(error: &impl std::fmt::Display) -> String {
    format!("Error during crawling: {error}")
}

pub fn render(
    result: &CrawlResult,
    requested_url: &str,
    requested_at: DateTime<Utc>,
) -> RenderedResult {
    let mut exports = Vec::new();

    let markdown = match result.markdown() {
        Some(md) => {
            exports.push(Export {
                kind: ExportKind::Markdown,
                file_name: export_file_name(ExportKind::Markdown, requested_at),
                content: md.to_string(),
            });
            Pane::Content(md.to_string())
        }
        None => Pane::Unavailable(NO_MARKDOWN),
    };

    let html = match result.html() {
        Some(html) => {
            exports.push(Export {
                kind: ExportKind::Html,
                file_name: export_file_name(ExportKind::Html, requested_at),
                content: html.to_string(),
            });
            Pane::Content(html.to_string())
        }
        None => Pane::Unavailable(NO_HTML),
    };

    RenderedResult {
        markdown,
        html,
        metadata: metadata_entries(result, requested_url),
        exports,
    }
}

fn metadata_entries(result: &CrawlResult, requested_url: &str) -> Vec<MetadataEntry> {
    let meta = result.metadata.clone().unwrap_or_default();
    let or_na = |v: Option<String>| v.unwrap_or_else(|| NOT_AVAILABLE.to_string());

    vec![
        MetadataEntry {
            label: "Title",
            value: or_na(meta.title),
        },
        MetadataEntry {
            label: "Description",
            value: or_na(meta.description),
        },
        MetadataEntry {
            label: "URL",
            value: meta.source_url.unwrap_or_else(|| requested_url.to_string()),
        },
        MetadataEntry {
            label: "Status Code",
            value: or_na(meta.status_code.map(|c| c.to_string())),
        },
        MetadataEntry {
            label: "Language",
            value: or_na(meta.language),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PageMetadata;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn markdown_is_echoed_with_download() {
        let result = CrawlResult {
            markdown: Some("# Hi".into()),
            ..Default::default()
        };
        let rendered = render(&result, "https://example.com", at());

        assert_eq!(rendered.markdown, Pane::Content("# Hi".into()));
        let export = rendered.export(ExportKind::Markdown).unwrap();
        assert_eq!(export.file_name, "crawled_content_1700000000.md");
        assert_eq!(export.content, "# Hi");
    }

    #[test]
    fn missing_markdown_shows_placeholder_without_download() {
        let result = CrawlResult {
            html: Some("<p>x</p>".into()),
            ..Default::default()
        };
        let rendered = render(&result, "https://example.com", at());

        assert_eq!(rendered.markdown, Pane::Unavailable(NO_MARKDOWN));
        assert!(rendered.export(ExportKind::Markdown).is_none());
        assert_eq!(
            rendered.export(ExportKind::Html).unwrap().file_name,
            "crawled_content_1700000000.html"
        );
    }

    #[test]
    fn empty_result_renders_placeholders() {
        let rendered = render(&CrawlResult::default(), "https://example.com", at());

        assert_eq!(rendered.markdown, Pane::Unavailable(NO_MARKDOWN));
        assert_eq!(rendered.html, Pane::Unavailable(NO_HTML));
        assert!(rendered.exports.is_empty());

        let values: Vec<_> = rendered
            .metadata
            .iter()
            .map(|e| (e.label, e.value.as_str()))
            .collect();
        assert_eq!(
            values,
            [
                ("Title", "N/A"),
                ("Description", "N/A"),
                ("URL", "https://example.com"),
                ("Status Code", "N/A"),
                ("Language", "N/A"),
            ]
        );
    }

    #[test]
    fn metadata_values_are_used_when_present() {
        let result = CrawlResult {
            metadata: Some(PageMetadata {
                title: Some("Example Domain".into()),
                description: None,
                source_url: Some("https://example.com/".into()),
                status_code: Some(200),
                language: Some("en".into()),
            }),
            ..Default::default()
        };
        let rendered = render(&result, "https://example.com", at());

        assert_eq!(rendered.metadata[0].value, "Example Domain");
        assert_eq!(rendered.metadata[1].value, NOT_AVAILABLE);
        assert_eq!(rendered.metadata[2].value, "https://example.com/");
        assert_eq!(rendered.metadata[3].value, "200");
        assert_eq!(rendered.metadata[4].value, "en");
    }

    #[test]
    fn banners() {
        assert_eq!(success_message(1.234), "Crawling completed in 1.23 seconds!");
        assert_eq!(error_message(&"boom"), "Error during crawling: boom");
    }

    #[test]
    fn export_slugs_round_trip() {
        for kind in [ExportKind::Markdown, ExportKind::Html] {
            assert_eq!(ExportKind::from_slug(kind.slug()), Some(kind));
        }
        assert_eq!(ExportKind::from_slug("pdf"), None);
    }
}
