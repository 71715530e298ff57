//! Helpers shared across the pipeline: markup stripping for search-result
//! titles, publisher-name lookup for the reference list, date reformatting,
//! log truncation, and output-directory validation.

use chrono::DateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};
use url::Url;

use crate::models::PUB_DATE_FORMAT;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Strip embedded markup from a search-result title.
///
/// Naver wraps query matches in `<b>` tags and escapes quotes and ampersands;
/// both have to go before the title is shown or sent to a model.
pub fn strip_tags(s: &str) -> String {
    let without_tags = TAG_RE.replace_all(s, "");
    without_tags
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Map a known Korean outlet's domain label to its display name.
fn publisher_name(label: &str) -> Option<&'static str> {
    let name = match label {
        "chosun" => "조선일보",
        "donga" => "동아일보",
        "mk" => "매일경제",
        "joongang" => "중앙일보",
        "hani" => "한겨레",
        "yna" => "연합뉴스",
        "inews24" => "아이뉴스24",
        "fnnews" => "파이낸셜뉴스",
        "naver" => "네이버뉴스",
        _ => return None,
    };
    Some(name)
}

/// Derive a human-readable source name from an article link.
///
/// Takes the registrable domain label (`n.news.naver.com` -> `naver`) and maps
/// it through the publisher table, falling back to the raw label. Unparsable
/// links get a fixed placeholder so the reference list never loses an entry.
pub fn source_name(link: &str) -> String {
    let Some(host) = Url::parse(link).ok().and_then(|u| u.host_str().map(String::from)) else {
        return "알 수 없는 출처".to_string();
    };
    let host = host.strip_prefix("www.").unwrap_or(&host);
    let parts: Vec<&str> = host.split('.').collect();
    // Registrable label: second-to-last, except across Korean second-level
    // suffixes (`yna.co.kr` -> `yna`, not `co`).
    let label = match parts.len() {
        0 => return "알 수 없는 출처".to_string(),
        1 | 2 => parts[0],
        n => {
            let candidate = parts[n - 2];
            if matches!(candidate, "co" | "or" | "go" | "ne") {
                parts[n - 3]
            } else {
                candidate
            }
        }
    };
    publisher_name(label)
        .map(str::to_string)
        .unwrap_or_else(|| label.to_string())
}

/// Reformat a wire-format publish timestamp to `YYYY-MM-DD`.
///
/// Returns `None` when the timestamp does not parse; callers omit the date
/// from the reference entry in that case.
pub fn format_pubdate(raw: &str) -> Option<String> {
    DateTime::parse_from_str(raw, PUB_DATE_FORMAT)
        .ok()
        .map(|dt| dt.format("%Y-%m-%d").to_string())
}

/// Truncate a string for logging purposes.
///
/// Counts characters, not bytes, so multi-byte Korean text never splits on a
/// boundary.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((byte_idx, _)) => format!("{}…(+{} bytes)", &s[..byte_idx], s.len() - byte_idx),
    }
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if needed, then probes it with a throwaway file so
/// permission problems surface before any network work is done.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    if let Err(e) = fs::create_dir_all(path).await {
        return Err(Box::new(e));
    }
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_tags_removes_markup_and_entities() {
        assert_eq!(strip_tags("<b>반도체</b> 수출 &quot;호조&quot;"), "반도체 수출 \"호조\"");
        assert_eq!(strip_tags("plain title"), "plain title");
        assert_eq!(strip_tags("A &amp; B"), "A & B");
    }

    #[test]
    fn test_source_name_known_publisher() {
        assert_eq!(source_name("https://n.news.naver.com/article/014/0005371160"), "네이버뉴스");
        assert_eq!(source_name("https://www.chosun.com/economy/2025/07/29/abc/"), "조선일보");
        assert_eq!(source_name("https://www.yna.co.kr/view/AKR123"), "연합뉴스");
    }

    #[test]
    fn test_source_name_fallback_is_domain_label() {
        assert_eq!(source_name("https://www.example.com/story"), "example");
    }

    #[test]
    fn test_source_name_unparsable_link() {
        assert_eq!(source_name("not a url"), "알 수 없는 출처");
    }

    #[test]
    fn test_format_pubdate() {
        assert_eq!(
            format_pubdate("Mon, 28 Jul 2025 10:12:00 +0900"),
            Some("2025-07-28".to_string())
        );
        assert_eq!(format_pubdate("yesterday-ish"), None);
        assert_eq!(format_pubdate(""), None);
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("Hello, world!", 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_multibyte_safe() {
        let s = "반도체".repeat(50);
        let result = truncate_for_log(&s, 10);
        assert!(result.starts_with("반도체반도체반도체반"));
        assert!(result.contains("…(+"));
    }
}
