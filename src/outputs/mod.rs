//! Output generation: the Word document and its Markdown companion.
//!
//! # Submodules
//!
//! - [`docx`]: parses the report's line grammar and builds the `.docx`
//!   artifact (headings, bullets, page break, hyperlinked references)
//! - [`markdown`]: renders the review companion (report body, failed-item
//!   list, reference list) as a Markdown string
//!
//! Both renderers are pure functions of their inputs; file writes happen at
//! the caller.

pub mod docx;
pub mod markdown;

use crate::models::SummarySuccess;
use crate::utils::{format_pubdate, source_name};

/// `" (<source name>, <YYYY-MM-DD>)"` for a reference entry; the date is
/// omitted when the publish timestamp does not parse.
pub fn reference_suffix(success: &SummarySuccess) -> String {
    let source = source_name(&success.link);
    match format_pubdate(&success.item.pub_date) {
        Some(date) => format!(" ({source}, {date})"),
        None => format!(" ({source})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewsItem;

    fn success(link: &str, pub_date: &str) -> SummarySuccess {
        SummarySuccess {
            title: "기사 제목".to_string(),
            link: link.to_string(),
            item: NewsItem {
                title: "기사 제목".to_string(),
                link: link.to_string(),
                original_link: None,
                pub_date: pub_date.to_string(),
            },
            summary: "요약".to_string(),
        }
    }

    #[test]
    fn test_reference_suffix_with_date() {
        let s = success(
            "https://www.chosun.com/economy/a",
            "Mon, 28 Jul 2025 10:00:00 +0900",
        );
        assert_eq!(reference_suffix(&s), " (조선일보, 2025-07-28)");
    }

    #[test]
    fn test_reference_suffix_omits_unparsable_date() {
        let s = success("https://www.example.com/a", "not a date");
        assert_eq!(reference_suffix(&s), " (example)");
    }
}
