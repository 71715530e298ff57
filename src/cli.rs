//! Command-line interface definitions.
//!
//! Run-shaped parameters (seed URL, date window, output paths, caps) are
//! flags; API secrets come from flags or their environment variables; deeper
//! tunables live in the optional YAML config file.

use chrono::NaiveDate;
use clap::Parser;

/// Command-line arguments for one report run.
///
/// # Examples
///
/// ```sh
/// # Keywords suggested by the model, default date window knobs
/// news_analyst https://n.news.naver.com/mnews/article/014/0005371160 \
///     --start-date 2025-07-28 --end-date 2025-07-30 -o report.docx
///
/// # Caller-chosen keywords, more search results
/// news_analyst <SEED_URL> --start-date 2025-07-28 --end-date 2025-07-30 \
///     --keywords "반도체,수출" --display 50
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Seed news article URL that anchors keyword derivation
    pub seed_url: String,

    /// First day of the search window (inclusive), YYYY-MM-DD
    #[arg(long)]
    pub start_date: NaiveDate,

    /// Last day of the search window (inclusive), YYYY-MM-DD
    #[arg(long)]
    pub end_date: NaiveDate,

    /// Comma-separated keywords to use instead of the model's suggestion
    #[arg(long)]
    pub keywords: Option<String>,

    /// Output path for the Word report
    #[arg(short, long, default_value = "news_report.docx")]
    pub output: String,

    /// Optional output path for the Markdown companion
    #[arg(long)]
    pub markdown_output: Option<String>,

    /// Optional path to a YAML config file with deeper tunables
    #[arg(short, long)]
    pub config: Option<String>,

    /// How many search results to request (overrides config)
    #[arg(long)]
    pub display: Option<u32>,

    /// Maximum keywords to extract (overrides config)
    #[arg(long)]
    pub max_keywords: Option<usize>,

    /// Concurrent per-article pipelines (overrides config)
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// OpenAI-compatible API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: String,

    /// Naver API client id
    #[arg(long, env = "NAVER_CLIENT_ID", hide_env_values = true)]
    pub naver_client_id: String,

    /// Naver API client secret
    #[arg(long, env = "NAVER_CLIENT_SECRET", hide_env_values = true)]
    pub naver_client_secret: String,
}

impl Cli {
    /// Caller-edited keyword list, if one was passed.
    pub fn keyword_override(&self) -> Option<Vec<String>> {
        self.keywords.as_ref().map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|keyword| !keyword.is_empty())
                .map(String::from)
                .collect()
        })
    }
}
