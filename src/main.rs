//! # news_analyst
//!
//! A news analysis pipeline that expands a single seed article into an
//! analyst-grade briefing: LLM keyword extraction, related-coverage search,
//! date filtering, parallel per-article summarization, and a synthesized
//! four-section report rendered as a Word document with a Markdown
//! companion.
//!
//! ## Usage
//!
//! ```sh
//! news_analyst https://n.news.naver.com/mnews/article/014/0005371160 \
//!     --start-date 2025-07-28 --end-date 2025-07-30 -o report.docx
//! ```
//!
//! ## Architecture
//!
//! The run is a three-step wizard over a linear pipeline:
//! 1. **Seed & keywords**: fetch the seed article, ask the model for topical
//!    keywords (or take the caller's `--keywords` edit)
//! 2. **Search & filter**: query the news-search API, keep items inside the
//!    inclusive date window
//! 3. **Batch & render**: fetch+summarize every item in parallel (bounded),
//!    synthesize one combined report, render `.docx` and `.md` artifacts

use chrono::Local;
use clap::Parser;
use std::error::Error;
use std::path::Path;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod batch;
mod cli;
mod config;
mod error;
mod fetch;
mod keywords;
mod llm;
mod models;
mod outputs;
mod prompts;
mod search;
mod session;
mod summarize;
mod utils;

use batch::BatchOrchestrator;
use cli::Cli;
use config::{AppConfig, Credentials};
use error::WorkflowError;
use fetch::{ArticleFetcher, AssistedExtractor, FetchArticle};
use keywords::KeywordExtractor;
use llm::ChatClient;
use search::{NaverNewsClient, filter_by_date};
use session::ReportSession;
use summarize::{ArticleSummarizer, ReportSynthesizer};
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news_analyst starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.seed_url, ?args.start_date, ?args.end_date, "Parsed CLI arguments");

    if args.start_date > args.end_date {
        error!(start = %args.start_date, end = %args.end_date, "End date precedes start date");
        return Err("end date must be the same as or later than the start date".into());
    }

    // --- Configuration (explicit; no hidden env reads past this point) ---
    let mut config = match &args.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };
    if let Some(display) = args.display {
        config.report.display = display;
    }
    if let Some(max_keywords) = args.max_keywords {
        config.report.max_keywords = max_keywords;
    }
    if let Some(concurrency) = args.concurrency {
        config.report.concurrency = concurrency;
    }
    let credentials = Credentials {
        openai_api_key: args.openai_api_key.clone(),
        naver_client_id: args.naver_client_id.clone(),
        naver_client_secret: args.naver_client_secret.clone(),
    };
    info!(
        display = config.report.display,
        max_keywords = config.report.max_keywords,
        concurrency = config.report.concurrency,
        "Configuration assembled"
    );

    // Early check: the output locations must be writable
    let output_dir = Path::new(&args.output)
        .parent()
        .map(|parent| parent.to_string_lossy().to_string())
        .filter(|parent| !parent.is_empty())
        .unwrap_or_else(|| ".".to_string());
    if let Err(e) = ensure_writable_dir(&output_dir).await {
        error!(
            path = %output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    // --- Construct clients ---
    let chat = ChatClient::new(&config.llm, &credentials.openai_api_key)?;
    let assist = config.fetch.llm_fallback.then(|| {
        AssistedExtractor::new(
            chat.clone(),
            config.llm.extract_model.clone(),
            config.fetch.max_extract_chars,
        )
    });
    let fetcher = ArticleFetcher::new(&config.fetch, assist)?;
    let search_client = NaverNewsClient::new(
        &config.search,
        &credentials.naver_client_id,
        &credentials.naver_client_secret,
    )?;

    // ---- Step 1: seed article and keywords ----
    info!(url = %args.seed_url, "Fetching seed article");
    let seed = fetcher
        .fetch(&args.seed_url)
        .await
        .map_err(WorkflowError::Seed)?;
    info!(title = %seed.title, chars = seed.body.chars().count(), "Seed article extracted");

    let extractor = KeywordExtractor::new(
        &chat,
        &config.llm.keyword_model,
        config.report.max_keywords,
    );
    let suggested = extractor
        .extract(&seed.title, &seed.body)
        .await
        .map_err(WorkflowError::Keywords)?;

    let mut session = ReportSession::new();
    session.keywords_ready(seed, suggested)?;
    if let Some(edited) = args.keyword_override() {
        info!(keywords = %edited.join(", "), "Using caller-supplied keywords");
        session.replace_keywords(edited)?;
    }
    let final_keywords = session
        .keywords()
        .map(<[String]>::to_vec)
        .unwrap_or_default();

    // ---- Step 2: search and date filter ----
    let items = search_client
        .search(&final_keywords, config.report.display)
        .await
        .map_err(WorkflowError::Search)?;
    info!(count = items.len(), "Search returned candidate articles");

    let filtered = filter_by_date(&items, args.start_date, args.end_date);
    info!(
        count = filtered.len(),
        start = %args.start_date,
        end = %args.end_date,
        "Filtered to the date window"
    );
    if filtered.is_empty() {
        error!("No articles in the date window; adjust the window or the keywords");
        return Err(Box::new(WorkflowError::NoMatches));
    }

    // ---- Step 3: parallel processing and synthesis ----
    let summarizer = ArticleSummarizer::new(&chat, &config.llm.summary_model);
    let synthesizer = ReportSynthesizer::new(
        &chat,
        &config.llm.report_model,
        config.report.synthesis_budget_chars,
    );
    let orchestrator = BatchOrchestrator::new(
        &fetcher,
        &summarizer,
        &synthesizer,
        config.report.concurrency,
        config.fetch.prefer_original_link,
    );

    info!(
        total = filtered.len(),
        concurrency = config.report.concurrency,
        "Starting per-article processing"
    );
    let progress = |completed: usize, total: usize, message: Option<&str>| match message {
        Some(message) => info!(completed, total, "{message}"),
        None => info!("기사 처리 중... ({completed}/{total})"),
    };
    let outcome = orchestrator.run(filtered, Some(&progress)).await?;

    for failure in &outcome.failures {
        warn!(reason = %failure.reason, link = %failure.link, "Article skipped");
    }

    let Some(report) = outcome.report else {
        error!(
            failed = outcome.failures.len(),
            "Every article failed; nothing to synthesize"
        );
        return Err(Box::new(WorkflowError::NoSummaries));
    };
    session.complete(report, outcome.failures)?;
    let (report, failures) = session.into_done()?;

    // ---- Step 4: render and write artifacts ----
    let generated_on = Local::now().date_naive();
    let document = outputs::docx::render_document(
        &report.body,
        &report.sources,
        "AI 뉴스 분석 리포트",
        generated_on,
    );
    outputs::docx::save_docx(document, Path::new(&args.output))?;
    info!(path = %args.output, "Wrote Word report");

    let markdown = outputs::markdown::report_to_markdown(
        &report,
        &failures,
        &final_keywords,
        args.start_date,
        args.end_date,
        generated_on,
    );
    let markdown_path = args.markdown_output.clone().unwrap_or_else(|| {
        match args.output.strip_suffix(".docx") {
            Some(stem) => format!("{stem}.md"),
            None => format!("{}.md", args.output),
        }
    });
    tokio::fs::write(&markdown_path, markdown).await?;
    info!(path = %markdown_path, "Wrote Markdown companion");

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        successful = report.sources.len(),
        failed = failures.len(),
        "Execution complete"
    );

    Ok(())
}
