//! Runtime configuration.
//!
//! Every component receives its settings at construction; nothing reads
//! environment variables or config files behind the caller's back. Tunables
//! live in [`AppConfig`] (optionally loaded from a YAML file, every field
//! defaulted); secrets arrive separately via [`Credentials`] so they never
//! round-trip through config files.

use serde::Deserialize;
use std::path::Path;

use crate::error::WorkflowError;

/// Chat-endpoint settings. The per-shape model split mirrors how the
/// pipeline spends money: the cheap model summarizes each article, the
/// strong model extracts keywords and writes the final report.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// OpenAI-compatible API root, e.g. `https://api.openai.com/v1`.
    pub base_url: String,
    pub keyword_model: String,
    pub summary_model: String,
    pub report_model: String,
    /// Model for the assisted-extraction fallback.
    pub extract_model: String,
    pub request_timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            keyword_model: "gpt-4o".to_string(),
            summary_model: "gpt-4o-mini".to_string(),
            report_model: "gpt-4o".to_string(),
            extract_model: "gpt-4o-mini".to_string(),
            request_timeout_secs: 60,
        }
    }
}

/// News-search endpoint settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub endpoint: String,
    pub request_timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://openapi.naver.com/v1/search/news.json".to_string(),
            request_timeout_secs: 10,
        }
    }
}

/// Article-fetching settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Per-request timeout; one slow page must never stall the batch.
    pub timeout_secs: u64,
    /// Fetch the publisher's canonical URL instead of the aggregator link
    /// when the search API provides one.
    pub prefer_original_link: bool,
    /// Fall back to LLM-assisted extraction when the direct parse finds
    /// no usable title/body.
    pub llm_fallback: bool,
    /// Page-text cap (in characters) sent to the assisted extractor.
    pub max_extract_chars: usize,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            prefer_original_link: true,
            llm_fallback: true,
            max_extract_chars: 12_000,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
                .to_string(),
        }
    }
}

/// Report-shaping knobs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Upper bound on extracted keywords.
    pub max_keywords: usize,
    /// How many search results to request.
    pub display: u32,
    /// In-flight per-article pipelines.
    pub concurrency: usize,
    /// Character budget for the packed synthesis input.
    pub synthesis_budget_chars: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            max_keywords: 3,
            display: 30,
            concurrency: 10,
            synthesis_budget_chars: 25_000,
        }
    }
}

/// All tunables, assembled from defaults and an optional YAML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub llm: LlmConfig,
    pub search: SearchConfig,
    pub fetch: FetchConfig,
    pub report: ReportConfig,
}

impl AppConfig {
    /// Load from a YAML file; absent keys keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, WorkflowError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&text)?)
    }
}

/// API secrets, supplied by the CLI (flags or environment variables) and
/// passed through to the upstream services untouched.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub openai_api_key: String,
    pub naver_client_id: String,
    pub naver_client_secret: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.report.max_keywords, 3);
        assert_eq!(config.report.concurrency, 10);
        assert_eq!(config.report.synthesis_budget_chars, 25_000);
        assert_eq!(config.fetch.timeout_secs, 15);
        assert!(config.fetch.prefer_original_link);
        assert_eq!(config.llm.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn test_partial_yaml_overrides() {
        let yaml = r#"
report:
  max_keywords: 10
  display: 50
fetch:
  prefer_original_link: false
"#;
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.report.max_keywords, 10);
        assert_eq!(config.report.display, 50);
        // untouched keys keep defaults
        assert_eq!(config.report.concurrency, 10);
        assert!(!config.fetch.prefer_original_link);
        assert_eq!(config.llm.summary_model, "gpt-4o-mini");
    }

    #[test]
    fn test_from_file_roundtrip() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "report:\n  concurrency: 4").unwrap();
        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.report.concurrency, 4);
    }
}
