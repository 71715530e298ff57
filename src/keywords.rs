//! Keyword extraction: one chat call plus deterministic cleanup of the
//! model's delimited list.

use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{info, instrument};

use crate::error::LlmError;
use crate::llm::ChatClient;
use crate::prompts;

/// Leading ordinal or bullet markers the model likes to prepend
/// (`1. `, `2) `, `- `, `• `).
static ORDINAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(?:\d+\s*[.)]\s*|[-•]\s*)").unwrap());

/// Normalize a raw keyword response into an ordered, bounded list.
///
/// Splits on newlines and commas, strips ordinal markers, drops empties, and
/// truncates to `max_keywords`. Insertion order is preserved; duplicates are
/// not removed (the search query tolerates them and order matters for
/// display).
pub fn clean_keywords(raw: &str, max_keywords: usize) -> Vec<String> {
    raw.split(['\n', ','])
        .map(|candidate| ORDINAL_RE.replace(candidate, "").trim().to_string())
        .filter(|candidate| !candidate.is_empty())
        .take(max_keywords)
        .collect()
}

/// Asks the model for topical keywords describing a seed article.
pub struct KeywordExtractor<'a> {
    chat: &'a ChatClient,
    model: &'a str,
    max_keywords: usize,
}

impl<'a> KeywordExtractor<'a> {
    pub fn new(chat: &'a ChatClient, model: &'a str, max_keywords: usize) -> Self {
        Self {
            chat,
            model,
            max_keywords,
        }
    }

    /// Extract up to the configured number of keywords.
    ///
    /// An empty cleaned list propagates as an error: without keywords there
    /// is no search query, so this is a user-facing failure rather than a
    /// skippable item.
    #[instrument(level = "info", skip_all)]
    pub async fn extract(&self, title: &str, body: &str) -> Result<Vec<String>, LlmError> {
        let response = self
            .chat
            .chat(
                self.model,
                prompts::KEYWORD_SYSTEM,
                &prompts::keyword_user(title, body, self.max_keywords),
                0.2,
            )
            .await?;

        let keywords = clean_keywords(&response, self.max_keywords);
        if keywords.is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        info!(keywords = %keywords.iter().join(", "), "keywords extracted");
        Ok(keywords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_keywords_strips_ordinals() {
        let raw = "1. 반도체\n2) 수출\n금리";
        assert_eq!(clean_keywords(raw, 3), vec!["반도체", "수출", "금리"]);
    }

    #[test]
    fn test_clean_keywords_splits_on_commas_too() {
        assert_eq!(clean_keywords("반도체, 수출, 금리", 3), vec!["반도체", "수출", "금리"]);
    }

    #[test]
    fn test_clean_keywords_drops_empties_and_truncates() {
        let raw = "- 반도체\n\n• 수출\n3. 금리\n환율";
        assert_eq!(clean_keywords(raw, 3), vec!["반도체", "수출", "금리"]);
    }

    #[test]
    fn test_clean_keywords_preserves_order_and_duplicates() {
        assert_eq!(
            clean_keywords("수출\n반도체\n수출", 5),
            vec!["수출", "반도체", "수출"]
        );
    }

    #[test]
    fn test_clean_keywords_empty_input() {
        assert!(clean_keywords("", 3).is_empty());
        assert!(clean_keywords("\n, ,\n", 3).is_empty());
    }
}
