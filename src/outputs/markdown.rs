//! Markdown companion for the Word artifact: the report body for quick
//! review, the failed-item list so partial success stays visible, and the
//! same numbered reference list as the document.

use chrono::NaiveDate;
use std::fmt::Write;

use super::reference_suffix;
use crate::models::{Report, SummaryFailure};

/// Render the companion file. Pure `String` builder; the caller writes it
/// to disk.
pub fn report_to_markdown(
    report: &Report,
    failures: &[SummaryFailure],
    keywords: &[String],
    start: NaiveDate,
    end: NaiveDate,
    generated_on: NaiveDate,
) -> String {
    let mut md = String::new();

    writeln!(md, "# AI 뉴스 분석 리포트\n").unwrap();
    writeln!(md, "- 생성일: {}", generated_on.format("%Y-%m-%d")).unwrap();
    writeln!(
        md,
        "- 검색 기간: {} ~ {}",
        start.format("%Y-%m-%d"),
        end.format("%Y-%m-%d")
    )
    .unwrap();
    writeln!(md, "- 키워드: {}\n", keywords.join(", ")).unwrap();
    writeln!(md, "---\n").unwrap();

    md.push_str(report.body.trim_end());
    md.push('\n');

    if !failures.is_empty() {
        writeln!(md, "\n## ⚠️ 처리 실패한 뉴스 목록 ({}건)\n", failures.len()).unwrap();
        for failure in failures {
            writeln!(md, "- **사유:** {} / **링크:** {}", failure.reason, failure.link).unwrap();
        }
    }

    writeln!(md, "\n## 📎 참고 뉴스 목록\n").unwrap();
    for (index, success) in report.sources.iter().enumerate() {
        writeln!(
            md,
            "{}. [{}]({}){}",
            index + 1,
            success.title,
            success.link,
            reference_suffix(success)
        )
        .unwrap();
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FailureReason, NewsItem, SummarySuccess};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn report() -> Report {
        Report {
            body: "📌 핵심 요약\n* 수출이 늘었다.".to_string(),
            sources: vec![SummarySuccess {
                title: "반도체 기사".to_string(),
                link: "https://n.news.naver.com/article/001/0001".to_string(),
                item: NewsItem {
                    title: "반도체 기사".to_string(),
                    link: "https://n.news.naver.com/article/001/0001".to_string(),
                    original_link: None,
                    pub_date: "Mon, 28 Jul 2025 10:00:00 +0900".to_string(),
                },
                summary: "요약".to_string(),
            }],
        }
    }

    #[test]
    fn test_companion_contains_metadata_body_and_references() {
        let md = report_to_markdown(
            &report(),
            &[],
            &["반도체".to_string(), "수출".to_string()],
            ymd(2025, 7, 28),
            ymd(2025, 7, 30),
            ymd(2025, 7, 30),
        );
        assert!(md.contains("# AI 뉴스 분석 리포트"));
        assert!(md.contains("- 검색 기간: 2025-07-28 ~ 2025-07-30"));
        assert!(md.contains("- 키워드: 반도체, 수출"));
        assert!(md.contains("* 수출이 늘었다."));
        assert!(md.contains(
            "1. [반도체 기사](https://n.news.naver.com/article/001/0001) (네이버뉴스, 2025-07-28)"
        ));
        assert!(!md.contains("처리 실패한 뉴스 목록"));
    }

    #[test]
    fn test_companion_lists_failures_with_reasons() {
        let failures = vec![
            SummaryFailure {
                reason: FailureReason::FetchFailed,
                link: "https://example.com/a".to_string(),
            },
            SummaryFailure {
                reason: FailureReason::SummarizeFailed,
                link: "https://example.com/b".to_string(),
            },
        ];
        let md = report_to_markdown(
            &report(),
            &failures,
            &["금리".to_string()],
            ymd(2025, 7, 28),
            ymd(2025, 7, 30),
            ymd(2025, 7, 30),
        );
        assert!(md.contains("## ⚠️ 처리 실패한 뉴스 목록 (2건)"));
        assert!(md.contains("- **사유:** 크롤링 실패 / **링크:** https://example.com/a"));
        assert!(md.contains("- **사유:** 개별 요약 실패 / **링크:** https://example.com/b"));
    }
}
