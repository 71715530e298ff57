//! Core data types flowing through the report pipeline:
//!
//! - [`NewsItem`]: one search hit in the Naver wire shape
//! - [`ArticleContent`]: extracted (title, body) pair, never partial
//! - [`SummaryOutcome`]: per-article result, success or tagged failure
//! - [`Report`]: synthesized report text plus its source articles
//!
//! Wire-format field names (`originallink`, `pubDate`) are mapped to
//! snake_case with serde renames.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::strip_tags;

/// Fixed publish-timestamp format used by the search API
/// (RFC-822 style with a numeric UTC offset, e.g. `Mon, 28 Jul 2025 10:12:00 +0900`).
pub const PUB_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

/// A single news-search hit, immutable once received.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewsItem {
    /// Headline as returned by the API; may contain `<b>` markup and
    /// HTML entities.
    pub title: String,
    /// Aggregator link (typically a portal mirror of the article).
    pub link: String,
    /// Publisher's canonical URL when the API knows it. Naver emits an
    /// empty string rather than omitting the field, so this is normalized
    /// at the accessor.
    #[serde(rename = "originallink", default)]
    pub original_link: Option<String>,
    /// Publish timestamp in [`PUB_DATE_FORMAT`]. Kept as the raw string;
    /// parsing failures are treated as "not in range", not as errors.
    #[serde(rename = "pubDate", default)]
    pub pub_date: String,
}

impl NewsItem {
    /// The URL to fetch for this item.
    ///
    /// With `prefer_original` set, the publisher's canonical link wins over
    /// the aggregator link when present and non-empty.
    pub fn preferred_link(&self, prefer_original: bool) -> &str {
        if prefer_original {
            if let Some(original) = &self.original_link {
                if !original.trim().is_empty() {
                    return original;
                }
            }
        }
        &self.link
    }

    /// Publish date truncated to a calendar date in the source's own offset.
    ///
    /// `None` when the timestamp is missing or malformed.
    pub fn published_date(&self) -> Option<NaiveDate> {
        DateTime::parse_from_str(&self.pub_date, PUB_DATE_FORMAT)
            .ok()
            .map(|dt| dt.date_naive())
    }

    /// Headline with search-API markup and entities removed.
    pub fn clean_title(&self) -> String {
        strip_tags(&self.title)
    }
}

/// Extracted article text. Both fields are non-empty by construction;
/// a fetch that cannot fill both reports a failure instead.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArticleContent {
    pub title: String,
    pub body: String,
}

/// Why a per-article pipeline failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureReason {
    FetchFailed,
    SummarizeFailed,
    Unknown,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FailureReason::FetchFailed => "크롤링 실패",
            FailureReason::SummarizeFailed => "개별 요약 실패",
            FailureReason::Unknown => "원인 불명",
        };
        f.write_str(label)
    }
}

/// A fully summarized article, ready for synthesis and the reference list.
#[derive(Debug, Clone, Serialize)]
pub struct SummarySuccess {
    /// Cleaned headline (markup stripped).
    pub title: String,
    /// The link that was actually fetched.
    pub link: String,
    /// The originating search hit, kept for publish-date rendering.
    pub item: NewsItem,
    /// Model-produced structured summary text.
    pub summary: String,
}

/// A per-article failure record. The batch always reports these alongside
/// the successes so partial results stay visible.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryFailure {
    pub reason: FailureReason,
    pub link: String,
}

/// Outcome of one per-article pipeline, created exactly once per input item.
#[derive(Debug, Clone)]
pub enum SummaryOutcome {
    Success(SummarySuccess),
    Failure(SummaryFailure),
}

/// The synthesized report, transient between synthesis and rendering.
#[derive(Debug, Clone)]
pub struct Report {
    /// Structured markdown-like body following the fixed section grammar.
    pub body: String,
    /// Source articles in the order they were packed for synthesis.
    pub sources: Vec<SummarySuccess>,
}
