//! Per-article summarization and whole-report synthesis.
//!
//! Summarization happens once per article inside the batch fan-out;
//! synthesis happens exactly once, after the fan-in barrier, over the packed
//! summaries. Packing enforces a character budget by dropping whole trailing
//! blocks, never by cutting a block in half.

use tracing::{info, instrument};

use crate::error::LlmError;
use crate::llm::ChatClient;
use crate::models::SummarySuccess;
use crate::prompts;

/// Per-article summarization seam; the orchestrator is generic over this.
pub trait SummarizeArticle {
    async fn summarize(&self, title: &str, body: &str) -> Result<String, LlmError>;
}

/// Report-synthesis seam, split from summarization so tests can observe
/// whether the barrier was crossed.
pub trait SynthesizeReport {
    async fn synthesize(&self, summaries: &[SummarySuccess]) -> Result<String, LlmError>;
}

/// Summarizes one article into the fixed four-bullet shape.
pub struct ArticleSummarizer<'a> {
    chat: &'a ChatClient,
    model: &'a str,
}

impl<'a> ArticleSummarizer<'a> {
    pub fn new(chat: &'a ChatClient, model: &'a str) -> Self {
        Self { chat, model }
    }
}

impl SummarizeArticle for ArticleSummarizer<'_> {
    #[instrument(level = "debug", skip_all)]
    async fn summarize(&self, title: &str, body: &str) -> Result<String, LlmError> {
        self.chat
            .chat(
                self.model,
                prompts::SUMMARY_SYSTEM,
                &prompts::summary_user(title, body),
                0.3,
            )
            .await
    }
}

/// Concatenate summaries as numbered blocks in input order, stopping before
/// a block would push the text past `budget_chars` (counted in `char`s).
/// When blocks are dropped, a one-line note discloses how many.
pub fn pack_summaries(summaries: &[SummarySuccess], budget_chars: usize) -> String {
    let mut packed = String::new();
    let mut used = 0usize;
    let mut included = 0usize;

    for (index, summary) in summaries.iter().enumerate() {
        let block = format!(
            "### 뉴스 {}: {}\n{}\n---\n",
            index + 1,
            summary.title,
            summary.summary
        );
        let block_chars = block.chars().count();
        if used + block_chars > budget_chars {
            break;
        }
        packed.push_str(&block);
        used += block_chars;
        included += 1;
    }

    let excluded = summaries.len() - included;
    if excluded > 0 {
        packed.push_str(&format!(
            "(입력 분량 제한으로 {excluded}건의 기사 요약은 종합에서 제외되었습니다)\n"
        ));
    }
    packed
}

/// Produces the final four-section report from the packed summaries.
pub struct ReportSynthesizer<'a> {
    chat: &'a ChatClient,
    model: &'a str,
    budget_chars: usize,
}

impl<'a> ReportSynthesizer<'a> {
    pub fn new(chat: &'a ChatClient, model: &'a str, budget_chars: usize) -> Self {
        Self {
            chat,
            model,
            budget_chars,
        }
    }
}

impl SynthesizeReport for ReportSynthesizer<'_> {
    #[instrument(level = "info", skip_all, fields(summaries = summaries.len()))]
    async fn synthesize(&self, summaries: &[SummarySuccess]) -> Result<String, LlmError> {
        let packed = pack_summaries(summaries, self.budget_chars);
        info!(
            packed_chars = packed.chars().count(),
            budget = self.budget_chars,
            "packed summaries for synthesis"
        );
        self.chat
            .chat(
                self.model,
                prompts::REPORT_SYSTEM,
                &prompts::report_user(&packed),
                0.7,
            )
            .await
    }
}
