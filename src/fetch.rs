//! Article fetching with a two-tier extraction strategy.
//!
//! Tier one is a direct HTML parse: the portal's article containers first
//! (cheap and reliable for aggregator links), then a list of common
//! publisher-site containers, then any sufficiently long paragraph on the
//! page. Tier two, used only when the direct parse finds nothing, hands the
//! page text to the LLM and asks for a `{"title","body"}` JSON pair — slower
//! and costlier, but it copes with layouts no selector list anticipates.
//!
//! A fetch either yields a complete [`ArticleContent`] or a [`FetchError`];
//! partial content never escapes this module.

use itertools::Itertools;
use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::llm::ChatClient;
use crate::models::ArticleContent;
use crate::prompts;

/// Anything that can turn a URL into article content. The orchestrator is
/// generic over this so tests can substitute instrumented stubs.
pub trait FetchArticle {
    async fn fetch(&self, url: &str) -> Result<ArticleContent, FetchError>;
}

/// Collect normalized paragraph text under `scope`, keeping paragraphs
/// longer than `min_chars`.
fn paragraphs_text(scope: ElementRef<'_>, min_chars: usize) -> String {
    let p = Selector::parse("p").unwrap();
    scope
        .select(&p)
        .map(|el| el.text().collect::<Vec<_>>().join(" "))
        .map(|text| text.split_whitespace().join(" "))
        .filter(|text| text.chars().count() > min_chars)
        .join(" ")
}

fn document_title(document: &Html) -> Option<String> {
    let og_title = Selector::parse(r#"meta[property="og:title"]"#).unwrap();
    if let Some(content) = document
        .select(&og_title)
        .next()
        .and_then(|el| el.value().attr("content"))
    {
        let content = content.trim();
        if !content.is_empty() {
            return Some(content.to_string());
        }
    }

    for selector in ["title", "h1, h2, h3"] {
        let selector = Selector::parse(selector).unwrap();
        if let Some(text) = document
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<Vec<_>>().join(" "))
        {
            let text = text.split_whitespace().join(" ");
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

/// Direct (selector-based) extraction. Returns `None` when no usable
/// title/body pair can be assembled.
pub fn extract_direct(html: &str) -> Option<ArticleContent> {
    let document = Html::parse_document(html);
    let title = document_title(&document)?;

    // Portal fast path: the aggregator's article containers.
    let portal = Selector::parse("article#dic_area, div#newsct_article").unwrap();
    if let Some(area) = document.select(&portal).next() {
        let body = paragraphs_text(area, 0);
        if !body.is_empty() {
            return Some(ArticleContent { title, body });
        }
    }

    // Containers seen across publisher sites.
    let generic = Selector::parse(
        "div.article_body, div.article_view, div#article-body, div#news_body_area, \
         div.article_txt, div#article_body, div.article-text, section.article-body, \
         article, main",
    )
    .unwrap();
    if let Some(area) = document.select(&generic).next() {
        let body = paragraphs_text(area, 50);
        if !body.is_empty() {
            return Some(ArticleContent { title, body });
        }
    }

    // Last resort: every long paragraph on the page.
    let body_sel = Selector::parse("body").unwrap();
    let root = document.select(&body_sel).next()?;
    let body = paragraphs_text(root, 50);
    if body.is_empty() {
        None
    } else {
        Some(ArticleContent { title, body })
    }
}

/// Readable text of the page for the assisted extractor: headline and
/// paragraph elements only, so scripts and navigation noise stay out of the
/// prompt. Truncated to `max_chars` characters.
fn page_text(html: &str, max_chars: usize) -> String {
    let document = Html::parse_document(html);
    let selector = Selector::parse("title, h1, h2, h3, p, li").unwrap();
    let text = document
        .select(&selector)
        .map(|el| el.text().collect::<Vec<_>>().join(" "))
        .map(|text| text.split_whitespace().join(" "))
        .filter(|text| !text.is_empty())
        .join("\n");
    match text.char_indices().nth(max_chars) {
        None => text,
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct ExtractedArticle {
    #[serde(default)]
    title: String,
    #[serde(default)]
    body: String,
}

/// The model sometimes wraps its JSON in prose or code fences; take the
/// outermost brace span.
fn json_slice(s: &str) -> Option<&str> {
    let start = s.find('{')?;
    let end = s.rfind('}')?;
    (end >= start).then(|| &s[start..=end])
}

fn parse_extracted(response: &str) -> Option<ArticleContent> {
    let parsed: ExtractedArticle = serde_json::from_str(json_slice(response)?).ok()?;
    let title = parsed.title.trim();
    let body = parsed.body.trim();
    if title.is_empty() || body.is_empty() {
        return None;
    }
    Some(ArticleContent {
        title: title.to_string(),
        body: body.to_string(),
    })
}

/// LLM-assisted extraction fallback.
pub struct AssistedExtractor {
    chat: ChatClient,
    model: String,
    max_chars: usize,
}

impl AssistedExtractor {
    pub fn new(chat: ChatClient, model: impl Into<String>, max_chars: usize) -> Self {
        Self {
            chat,
            model: model.into(),
            max_chars,
        }
    }

    #[instrument(level = "debug", skip_all)]
    async fn extract(&self, html: &str) -> Result<ArticleContent, FetchError> {
        let text = page_text(html, self.max_chars);
        if text.is_empty() {
            return Err(FetchError::EmptyContent);
        }
        let response = self
            .chat
            .chat(
                &self.model,
                prompts::EXTRACT_SYSTEM,
                &prompts::extract_user(&text),
                0.0,
            )
            .await
            .map_err(FetchError::Assist)?;
        parse_extracted(&response).ok_or(FetchError::EmptyContent)
    }
}

/// The production fetcher: bounded-timeout HTTP download, direct parse,
/// optional assisted fallback.
pub struct ArticleFetcher {
    http: reqwest::Client,
    assist: Option<AssistedExtractor>,
}

impl ArticleFetcher {
    pub fn new(config: &FetchConfig, assist: Option<AssistedExtractor>) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self { http, assist })
    }

    async fn download(&self, url: &str) -> Result<String, FetchError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        Ok(response.text().await?)
    }
}

impl FetchArticle for ArticleFetcher {
    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn fetch(&self, url: &str) -> Result<ArticleContent, FetchError> {
        let html = self.download(url).await?;
        if let Some(content) = extract_direct(&html) {
            debug!(title = %content.title, chars = content.body.chars().count(), "direct extraction succeeded");
            return Ok(content);
        }
        match &self.assist {
            Some(assist) => {
                debug!("direct extraction found nothing usable; trying assisted extraction");
                assist.extract(&html).await
            }
            None => Err(FetchError::EmptyContent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONG_KO: &str = "정부는 반도체 산업 지원을 위한 추가 대책을 검토하고 있으며 업계는 수출 회복세가 이어질 것으로 전망했다.";

    #[test]
    fn test_extract_direct_portal_fast_path() {
        let html = format!(
            r#"<html><head>
                 <meta property="og:title" content="반도체 수출 회복" />
               </head><body>
                 <article id="dic_area"><p>첫 문단.</p><p>{LONG_KO}</p></article>
               </body></html>"#
        );
        let content = extract_direct(&html).unwrap();
        assert_eq!(content.title, "반도체 수출 회복");
        assert!(content.body.starts_with("첫 문단."));
        assert!(content.body.contains("수출 회복세"));
    }

    #[test]
    fn test_extract_direct_generic_container_filters_short_paragraphs() {
        let html = format!(
            r#"<html><head><title>publisher page</title></head><body>
                 <div class="article_body"><p>short</p><p>{LONG_KO}</p></div>
               </body></html>"#
        );
        let content = extract_direct(&html).unwrap();
        assert_eq!(content.title, "publisher page");
        assert!(!content.body.contains("short"));
        assert!(content.body.contains("반도체"));
    }

    #[test]
    fn test_extract_direct_body_paragraph_fallback() {
        let html = format!(
            "<html><head><title>t</title></head><body><p>{LONG_KO}</p><p>menu</p></body></html>"
        );
        let content = extract_direct(&html).unwrap();
        assert!(content.body.contains("반도체"));
        assert!(!content.body.contains("menu"));
    }

    #[test]
    fn test_extract_direct_no_body_is_none() {
        let html = "<html><head><title>empty page</title></head><body><p>short</p></body></html>";
        assert!(extract_direct(html).is_none());
    }

    #[test]
    fn test_extract_direct_prefers_og_title_over_title_tag() {
        let html = format!(
            r#"<html><head><title>site - page</title>
                 <meta property="og:title" content="진짜 제목" />
               </head><body><p>{LONG_KO}</p></body></html>"#
        );
        assert_eq!(extract_direct(&html).unwrap().title, "진짜 제목");
    }

    #[test]
    fn test_parse_extracted_handles_fenced_json() {
        let response = "```json\n{\"title\": \"제목\", \"body\": \"본문 텍스트\"}\n```";
        let content = parse_extracted(response).unwrap();
        assert_eq!(content.title, "제목");
        assert_eq!(content.body, "본문 텍스트");
    }

    #[test]
    fn test_parse_extracted_rejects_partial_pairs() {
        assert!(parse_extracted(r#"{"title": "제목", "body": ""}"#).is_none());
        assert!(parse_extracted(r#"{"body": "본문"}"#).is_none());
        assert!(parse_extracted("no json here").is_none());
    }

    #[test]
    fn test_page_text_truncates_by_chars() {
        let html = format!("<html><body><p>{}</p></body></html>", "가".repeat(500));
        let text = page_text(&html, 100);
        assert_eq!(text.chars().count(), 100);
    }

    #[test]
    fn test_page_text_skips_scripts() {
        let html = "<html><body><script>var nav = 1;</script><p>본문</p></body></html>";
        let text = page_text(html, 1000);
        assert_eq!(text, "본문");
    }
}
