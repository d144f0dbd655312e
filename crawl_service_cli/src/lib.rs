pub mod config;
pub mod crawler;
pub mod error;
pub mod firecrawl;
pub mod logging;
pub mod render;
pub mod tags;
pub mod utils;

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub use crate::error::{CrawlError, ValidationError};
pub use crate::tags::{ExcludeTag, IncludeTag};

/// Output formats requested from the scrape service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Markdown,
    Html,
}

/// One scrape request, built fresh for every user action.
///
/// The serialized form is the request body the scrape service expects:
/// empty tag selections are stored as `None` and left out of the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlRequest {
    pub url: String,
    pub formats: BTreeSet<Format>,
    pub only_main_content: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_tags: Option<BTreeSet<IncludeTag>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_tags: Option<BTreeSet<ExcludeTag>>,
}

impl CrawlRequest {
    pub fn new<I, E>(url: &str, include_tags: I, exclude_tags: E) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = IncludeTag>,
        E: IntoIterator<Item = ExcludeTag>,
    {
        let url = url.trim();
        if url.is_empty() {
            return Err(ValidationError::EmptyUrl);
        }

        Ok(Self {
            url: url.to_string(),
            formats: BTreeSet::from([Format::Markdown, Format::Html]),
            only_main_content: true,
            include_tags: non_empty(include_tags.into_iter().collect()),
            exclude_tags: non_empty(exclude_tags.into_iter().collect()),
        })
    }
}

fn non_empty<T>(set: BTreeSet<T>) -> Option<BTreeSet<T>> {
    if set.is_empty() {
        None
    } else {
        Some(set)
    }
}

/// What the scrape service returned for one page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrawlResult {
    #[serde(default)]
    pub markdown: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub metadata: Option<PageMetadata>,
}

/// Page metadata as reported by the service.
///
/// Fields of an unexpected shape decode to `None` instead of failing the
/// whole response; a list yields its first usable element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, rename = "sourceURL", deserialize_with = "lenient_string")]
    pub source_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_status")]
    pub status_code: Option<u16>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub language: Option<String>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(value_to_string))
}

fn value_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => items.into_iter().next().and_then(value_to_string),
        _ => None,
    }
}

fn lenient_status<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .and_then(value_to_string)
        .and_then(|s| s.trim().parse().ok()))
}

impl CrawlResult {
    pub fn markdown(&self) -> Option<&str> {
        self.markdown.as_deref().filter(|s| !s.is_empty())
    }

    pub fn html(&self) -> Option<&str> {
        self.html.as_deref().filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_uses_fixed_options() {
        let req = CrawlRequest::new(
            "https://example.com",
            [IncludeTag::H1, IncludeTag::P],
            [ExcludeTag::Script],
        )
        .unwrap();

        assert_eq!(req.formats, BTreeSet::from([Format::Markdown, Format::Html]));
        assert!(req.only_main_content);
        assert_eq!(
            req.include_tags,
            Some(BTreeSet::from([IncludeTag::H1, IncludeTag::P]))
        );
        assert_eq!(req.exclude_tags, Some(BTreeSet::from([ExcludeTag::Script])));
    }

    #[test]
    fn empty_selections_become_absent() {
        let req = CrawlRequest::new("https://example.com", [], []).unwrap();
        assert!(req.include_tags.is_none());
        assert!(req.exclude_tags.is_none());

        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(
            body,
            json!({
                "url": "https://example.com",
                "formats": ["markdown", "html"],
                "onlyMainContent": true
            })
        );
    }

    #[test]
    fn request_body_carries_selected_tags() {
        let req = CrawlRequest::new(
            "https://example.com",
            [IncludeTag::P, IncludeTag::H1, IncludeTag::P],
            [ExcludeTag::Script],
        )
        .unwrap();

        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body["includeTags"], json!(["h1", "p"]));
        assert_eq!(body["excludeTags"], json!(["script"]));
    }

    #[test]
    fn blank_url_is_rejected() {
        assert_eq!(
            CrawlRequest::new("", [], []).unwrap_err(),
            ValidationError::EmptyUrl
        );
        assert_eq!(
            CrawlRequest::new("   ", [IncludeTag::H1], []).unwrap_err(),
            ValidationError::EmptyUrl
        );
    }

    #[test]
    fn url_is_trimmed() {
        let req = CrawlRequest::new("  https://example.com \n", [], []).unwrap();
        assert_eq!(req.url, "https://example.com");
    }

    #[test]
    fn result_decodes_with_missing_fields() {
        let result: CrawlResult = serde_json::from_value(json!({
            "html": "<h1>Hi</h1>",
            "metadata": { "title": "Hi", "sourceURL": "https://example.com", "statusCode": 200 }
        }))
        .unwrap();

        assert_eq!(result.markdown(), None);
        assert_eq!(result.html(), Some("<h1>Hi</h1>"));
        let metadata = result.metadata.unwrap();
        assert_eq!(metadata.source_url.as_deref(), Some("https://example.com"));
        assert_eq!(metadata.status_code, Some(200));
        assert_eq!(metadata.language, None);
    }

    #[test]
    fn odd_metadata_shapes_do_not_fail_decoding() {
        let result: CrawlResult = serde_json::from_value(json!({
            "markdown": "# Hi",
            "metadata": {
                "title": ["First", "Second"],
                "description": ["a", "b"],
                "sourceURL": { "href": "https://example.com" },
                "statusCode": "404",
                "language": []
            }
        }))
        .unwrap();

        assert_eq!(result.markdown(), Some("# Hi"));
        let metadata = result.metadata.unwrap();
        assert_eq!(metadata.title.as_deref(), Some("First"));
        assert_eq!(metadata.description.as_deref(), Some("a"));
        assert_eq!(metadata.source_url, None);
        assert_eq!(metadata.status_code, Some(404));
        assert_eq!(metadata.language, None);
    }

    #[test]
    fn out_of_range_status_code_is_dropped() {
        let metadata: PageMetadata =
            serde_json::from_value(json!({ "statusCode": 70000, "title": null })).unwrap();
        assert_eq!(metadata.status_code, None);
        assert_eq!(metadata.title, None);
    }

    #[test]
    fn empty_strings_count_as_missing() {
        let result = CrawlResult {
            markdown: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(result.markdown(), None);
    }
}
