//! Error taxonomy for the report pipeline.
//!
//! Per-item fetch/summarize failures are *not* represented here — they are
//! routine and recorded as [`crate::models::SummaryFailure`] entries while the
//! batch continues. The types below cover everything that must surface to the
//! caller, with enough shape to tell "no results found" apart from "a service
//! misbehaved".

use thiserror::Error;

/// Failure of a chat-completion call.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("chat request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("chat API returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The provider answered 2xx but the message content was empty.
    #[error("model returned an empty response")]
    EmptyResponse,
}

/// Failure of a news-search call.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("search API returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Searching with zero keywords is a caller bug, not an empty result.
    #[error("search invoked with an empty keyword list")]
    EmptyQuery,
}

/// Failure to turn a URL into usable article content.
///
/// These never abort a batch; the orchestrator records them per item.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),

    /// Extraction ran but produced no usable title/body pair.
    #[error("no extractable title or body")]
    EmptyContent,

    #[error("assisted extraction failed: {0}")]
    Assist(#[source] LlmError),
}

/// Errors that end the current report request.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("seed article could not be read: {0}")]
    Seed(#[source] FetchError),

    #[error("keyword extraction failed: {0}")]
    Keywords(#[source] LlmError),

    #[error("news search failed: {0}")]
    Search(#[from] SearchError),

    /// Valid run, empty outcome: nothing matched the date window.
    #[error("no articles matched the requested date range")]
    NoMatches,

    /// Valid run, empty outcome: every article failed fetch or summarize.
    #[error("no article could be summarized; nothing to synthesize")]
    NoSummaries,

    /// Synthesis failed after summaries were collected. Fatal: there is no
    /// partial-report fallback.
    #[error("report synthesis failed: {0}")]
    Synthesis(#[source] LlmError),

    #[error("invalid session transition: {0}")]
    Session(&'static str),

    #[error("configuration error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
