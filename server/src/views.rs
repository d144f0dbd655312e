//! Server-rendered single page: the form, a status banner and the result tabs.

use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};
use uuid::Uuid;

use crawl_service_cli::render::{self, ExportKind, Pane, RenderedResult, ERROR_HINT};
use crawl_service_cli::{ExcludeTag, IncludeTag};

/// What the user typed, echoed back into the form.
pub struct FormValues<'a> {
    pub url: &'a str,
    pub include: &'a [IncludeTag],
    pub exclude: &'a [ExcludeTag],
}

impl FormValues<'static> {
    pub fn defaults() -> Self {
        FormValues {
            url: "",
            include: IncludeTag::DEFAULTS,
            exclude: ExcludeTag::DEFAULTS,
        }
    }
}

pub enum Notice {
    None,
    Validation(String),
    Failure {
        message: String,
        elapsed_secs: f64,
    },
    Success {
        elapsed_secs: f64,
        rendered: RenderedResult,
        result_id: Uuid,
    },
}

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; max-width: 1100px; margin: 2rem auto; padding: 0 1rem; }
form .row { display: flex; gap: 2rem; margin: 1rem 0; }
form .row > label { flex: 1; }
input[type=url] { width: 100%; padding: .5rem; }
select { width: 100%; }
button { background: #ff4b4b; color: #fff; border: 0; padding: .6rem 1.2rem; border-radius: .4rem; cursor: pointer; }
.banner { padding: .8rem 1rem; border-radius: .4rem; margin: 1rem 0; }
.success { background: #e6f4ea; } .error { background: #fdecea; } .info { background: #e8f0fe; } .warning { background: #fff4e5; }
.tabs > input { display: none; }
.tabs > label { display: inline-block; padding: .5rem 1rem; cursor: pointer; border-bottom: 2px solid transparent; }
.tabs > input:checked + label { border-bottom-color: #ff4b4b; }
.panel { display: none; padding: 1rem 0; }
#tab-markdown:checked ~ #panel-markdown, #tab-html:checked ~ #panel-html, #tab-metadata:checked ~ #panel-metadata { display: block; }
pre { background: #f6f8fa; padding: 1rem; overflow: auto; white-space: pre-wrap; }
"#;

pub fn page(form: &FormValues<'_>, notice: &Notice) -> String {
    let mut out = String::with_capacity(4096);
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<title>Web Crawler</title>\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = write!(out, "<style>{STYLE}</style>\n</head>\n<body>\n");
    out.push_str("<h1>🕷️ Web Crawler with Firecrawl</h1>\n");
    out.push_str("<p>Enter a URL to crawl and extract content</p>\n");

    write_form(&mut out, form);
    write_notice(&mut out, notice);

    out.push_str("</body>\n</html>\n");
    out
}

fn write_form(out: &mut String, form: &FormValues<'_>) {
    out.push_str("<form method=\"post\" action=\"/crawl\">\n");
    let _ = writeln!(
        out,
        "<label>Enter URL to crawl:<br><input type=\"url\" name=\"url\" placeholder=\"https://example.com\" value=\"{}\"></label>",
        encode_double_quoted_attribute(form.url)
    );

    out.push_str("<div class=\"row\">\n");
    write_select(
        out,
        "Include specific tags (optional):",
        "include_tags",
        IncludeTag::ALL,
        form.include,
        IncludeTag::as_str,
    );
    write_select(
        out,
        "Exclude tags (optional):",
        "exclude_tags",
        ExcludeTag::ALL,
        form.exclude,
        ExcludeTag::as_str,
    );
    out.push_str("</div>\n");

    out.push_str("<button type=\"submit\">🚀 Start Crawling</button>\n");
    out.push_str("<p class=\"hint\">Crawling a website may take a few minutes.</p>\n");
    out.push_str("</form>\n");
}

fn write_select<T: Copy + PartialEq>(
    out: &mut String,
    label: &str,
    name: &str,
    all: &[T],
    selected: &[T],
    as_str: fn(T) -> &'static str,
) {
    let _ = writeln!(
        out,
        "<label>{label}<br><select name=\"{name}\" multiple size=\"{}\">",
        all.len()
    );
    for &tag in all {
        let mark = if selected.contains(&tag) { " selected" } else { "" };
        let _ = writeln!(out, "<option value=\"{0}\"{mark}>{0}</option>", as_str(tag));
    }
    out.push_str("</select></label>\n");
}

fn write_notice(out: &mut String, notice: &Notice) {
    match notice {
        Notice::None => {}
        Notice::Validation(message) => {
            let _ = writeln!(out, "<div class=\"banner error\">{}</div>", encode_text(message));
        }
        Notice::Failure {
            message,
            elapsed_secs,
        } => {
            let _ = writeln!(
                out,
                "<div class=\"banner error\">❌ {}</div>",
                encode_text(&render::error_message(message))
            );
            let _ = writeln!(
                out,
                "<div class=\"banner info\">{ERROR_HINT} (failed after {elapsed_secs:.2} seconds)</div>"
            );
        }
        Notice::Success {
            elapsed_secs,
            rendered,
            result_id,
        } => {
            let _ = writeln!(
                out,
                "<div class=\"banner success\">✅ {}</div>",
                render::success_message(*elapsed_secs)
            );
            write_tabs(out, rendered, result_id);
        }
    }
}

fn write_tabs(out: &mut String, rendered: &RenderedResult, result_id: &Uuid) {
    out.push_str("<div class=\"tabs\">\n");
    out.push_str("<input type=\"radio\" name=\"tab\" id=\"tab-markdown\" checked><label for=\"tab-markdown\">📄 Markdown Content</label>\n");
    out.push_str("<input type=\"radio\" name=\"tab\" id=\"tab-html\"><label for=\"tab-html\">🔧 HTML Content</label>\n");
    out.push_str("<input type=\"radio\" name=\"tab\" id=\"tab-metadata\"><label for=\"tab-metadata\">📊 Metadata</label>\n");

    out.push_str("<section class=\"panel\" id=\"panel-markdown\">\n<h2>Extracted Markdown Content</h2>\n");
    write_pane(out, &rendered.markdown, "markdown");
    write_download(out, rendered, result_id, ExportKind::Markdown);
    out.push_str("</section>\n");

    out.push_str("<section class=\"panel\" id=\"panel-html\">\n<h2>HTML Content</h2>\n");
    write_pane(out, &rendered.html, "html");
    write_download(out, rendered, result_id, ExportKind::Html);
    out.push_str("</section>\n");

    out.push_str("<section class=\"panel\" id=\"panel-metadata\">\n<h2>Page Metadata</h2>\n<ul class=\"metadata\">\n");
    for entry in &rendered.metadata {
        let _ = writeln!(
            out,
            "<li><strong>{}:</strong> {}</li>",
            entry.label,
            encode_text(&entry.value)
        );
    }
    out.push_str("</ul>\n</section>\n</div>\n");
}

fn write_pane(out: &mut String, pane: &Pane, language: &str) {
    match pane {
        Pane::Content(text) => {
            let _ = writeln!(
                out,
                "<pre><code class=\"language-{language}\">{}</code></pre>",
                encode_text(text)
            );
        }
        Pane::Unavailable(placeholder) => {
            let _ = writeln!(out, "<div class=\"banner warning\">{placeholder}</div>");
        }
    }
}

fn write_download(out: &mut String, rendered: &RenderedResult, result_id: &Uuid, kind: ExportKind) {
    if let Some(export) = rendered.export(kind) {
        let _ = writeln!(
            out,
            "<a class=\"download\" href=\"/download/{result_id}/{}\" download=\"{}\">📥 {}</a>",
            kind.slug(),
            encode_double_quoted_attribute(&export.file_name),
            kind.label()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use crawl_service_cli::CrawlResult;

    #[test]
    fn default_form_preselects_tags() {
        let html = page(&FormValues::defaults(), &Notice::None);
        assert!(html.contains("<option value=\"h1\" selected>h1</option>"));
        assert!(html.contains("<option value=\"img\">img</option>"));
        assert!(html.contains("<option value=\"script\" selected>script</option>"));
        assert!(html.contains("<option value=\"nav\">nav</option>"));
        assert!(!html.contains("class=\"tabs\""));
    }

    #[test]
    fn user_text_is_escaped() {
        let form = FormValues {
            url: "\"><script>alert(1)</script>",
            include: &[],
            exclude: &[],
        };
        let html = page(&form, &Notice::Validation("<b>bad</b>".into()));
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(!html.contains("<b>bad</b>"));
    }

    #[test]
    fn success_renders_three_tabs() {
        let at = chrono::Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let result = CrawlResult {
            markdown: Some("# Hi".into()),
            html: Some("<h1>Hi</h1>".into()),
            metadata: None,
        };
        let rendered = render::render(&result, "https://example.com", at);
        let id = Uuid::nil();
        let html = page(
            &FormValues::defaults(),
            &Notice::Success {
                elapsed_secs: 0.5,
                rendered,
                result_id: id,
            },
        );

        assert!(html.contains("Crawling completed in 0.50 seconds!"));
        assert!(html.contains("<code class=\"language-markdown\"># Hi</code>"));
        assert!(html.contains("&lt;h1&gt;Hi&lt;/h1&gt;"));
        let link =
            format!("href=\"/download/{id}/markdown\" download=\"crawled_content_1700000000.md\"");
        assert!(html.contains(&link));
        assert!(html.contains(&format!("href=\"/download/{id}/html\"")));
        assert!(html.contains("<li><strong>URL:</strong> https://example.com</li>"));
    }
}
