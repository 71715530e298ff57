//! Fan-out/fan-in orchestration of the per-article pipelines.
//!
//! Every item runs fetch → summarize concurrently, bounded by
//! `buffer_unordered(concurrency)` so at most that many pipelines hold
//! network resources at once. Completions are reported to the progress
//! callback as they happen (completion order, not submission order);
//! the final result lists are re-sorted to submission order so downstream
//! output is deterministic. Synthesis runs exactly once, after every
//! pipeline has finished, and only when at least one succeeded.

use futures::FutureExt;
use futures::stream::{self, StreamExt};
use std::panic::AssertUnwindSafe;
use tracing::{info, instrument, warn};

use crate::error::WorkflowError;
use crate::fetch::FetchArticle;
use crate::models::{
    FailureReason, NewsItem, Report, SummaryFailure, SummaryOutcome, SummarySuccess,
};
use crate::summarize::{SummarizeArticle, SynthesizeReport};

/// Progress hook: `(completed, total, optional message)`. Called once per
/// finished item and at the start and end of the synthesis phase.
pub type ProgressCallback<'a> = &'a (dyn Fn(usize, usize, Option<&str>) + Send + Sync);

/// Everything a batch run produces. `successes.len() + failures.len()`
/// always equals the input item count; `report` is `None` exactly when
/// `successes` is empty.
#[derive(Debug)]
pub struct BatchOutcome {
    pub report: Option<Report>,
    pub successes: Vec<SummarySuccess>,
    pub failures: Vec<SummaryFailure>,
}

pub struct BatchOrchestrator<'a, F, S, R> {
    fetcher: &'a F,
    summarizer: &'a S,
    synthesizer: &'a R,
    concurrency: usize,
    prefer_original_link: bool,
}

impl<'a, F, S, R> BatchOrchestrator<'a, F, S, R>
where
    F: FetchArticle,
    S: SummarizeArticle,
    R: SynthesizeReport,
{
    pub fn new(
        fetcher: &'a F,
        summarizer: &'a S,
        synthesizer: &'a R,
        concurrency: usize,
        prefer_original_link: bool,
    ) -> Self {
        Self {
            fetcher,
            summarizer,
            synthesizer,
            concurrency,
            prefer_original_link,
        }
    }

    /// Run every per-item pipeline and synthesize the combined report.
    ///
    /// Per-item failures never abort the batch; they are recorded and the
    /// rest continues. Synthesis failure is fatal to the whole request.
    #[instrument(level = "info", skip_all, fields(total = items.len()))]
    pub async fn run(
        &self,
        items: Vec<NewsItem>,
        progress: Option<ProgressCallback<'_>>,
    ) -> Result<BatchOutcome, WorkflowError> {
        let total = items.len();
        let mut indexed: Vec<(usize, SummaryOutcome)> = Vec::with_capacity(total);

        {
            let mut outcomes = stream::iter(items.into_iter().enumerate())
                .map(|(index, item)| {
                    let fallback_link = item.preferred_link(self.prefer_original_link).to_string();
                    async move {
                        let outcome = AssertUnwindSafe(self.process_item(item))
                            .catch_unwind()
                            .await
                            .unwrap_or_else(|_| {
                                warn!(link = %fallback_link, "per-item pipeline panicked");
                                SummaryOutcome::Failure(SummaryFailure {
                                    reason: FailureReason::Unknown,
                                    link: fallback_link,
                                })
                            });
                        (index, outcome)
                    }
                })
                .buffer_unordered(self.concurrency.max(1));

            while let Some((index, outcome)) = outcomes.next().await {
                indexed.push((index, outcome));
                if let Some(callback) = progress {
                    callback(indexed.len(), total, None);
                }
            }
        }

        // Fan-in is unordered; restore submission order for stable output.
        indexed.sort_by_key(|(index, _)| *index);

        let mut successes = Vec::new();
        let mut failures = Vec::new();
        for (_, outcome) in indexed {
            match outcome {
                SummaryOutcome::Success(success) => successes.push(success),
                SummaryOutcome::Failure(failure) => failures.push(failure),
            }
        }
        info!(
            total,
            successful = successes.len(),
            failed = failures.len(),
            "per-article processing complete"
        );

        if successes.is_empty() {
            return Ok(BatchOutcome {
                report: None,
                successes,
                failures,
            });
        }

        if let Some(callback) = progress {
            callback(total, total, Some("종합 보고서를 생성 중입니다..."));
        }
        let body = self
            .synthesizer
            .synthesize(&successes)
            .await
            .map_err(WorkflowError::Synthesis)?;
        if let Some(callback) = progress {
            callback(total, total, Some("종합 보고서 생성 완료"));
        }

        Ok(BatchOutcome {
            report: Some(Report {
                body,
                sources: successes.clone(),
            }),
            successes,
            failures,
        })
    }

    async fn process_item(&self, item: NewsItem) -> SummaryOutcome {
        let link = item.preferred_link(self.prefer_original_link).to_string();

        let content = match self.fetcher.fetch(&link).await {
            Ok(content) => content,
            Err(error) => {
                warn!(%link, %error, "article fetch failed");
                return SummaryOutcome::Failure(SummaryFailure {
                    reason: FailureReason::FetchFailed,
                    link,
                });
            }
        };

        match self.summarizer.summarize(&content.title, &content.body).await {
            Ok(summary) => SummaryOutcome::Success(SummarySuccess {
                title: item.clean_title(),
                link,
                item,
                summary,
            }),
            Err(error) => {
                warn!(%link, %error, "article summarization failed");
                SummaryOutcome::Failure(SummaryFailure {
                    reason: FailureReason::SummarizeFailed,
                    link,
                })
            }
        }
    }
}
