//! Wizard state for one report request.
//!
//! The flow is a three-step wizard: collect the seed and suggest keywords,
//! let the caller confirm or replace them, then run the batch and hold the
//! finished report. The state is a tagged union with checked transitions,
//! so an out-of-order step is a typed error instead of a silent no-op.

use crate::error::WorkflowError;
use crate::models::{ArticleContent, Report, SummaryFailure};

#[derive(Debug)]
pub enum SessionState {
    /// Nothing has happened yet.
    Initial,
    /// Seed article read and keywords suggested; awaiting confirmation.
    KeywordsReady {
        seed: ArticleContent,
        keywords: Vec<String>,
    },
    /// Batch finished; report and failure list available.
    Done {
        report: Report,
        failures: Vec<SummaryFailure>,
    },
}

#[derive(Debug)]
pub struct ReportSession {
    state: SessionState,
}

impl ReportSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Initial,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// `Initial -> KeywordsReady`. Keywords must be non-empty: a report
    /// cannot be searched for without a query.
    pub fn keywords_ready(
        &mut self,
        seed: ArticleContent,
        keywords: Vec<String>,
    ) -> Result<(), WorkflowError> {
        if !matches!(self.state, SessionState::Initial) {
            return Err(WorkflowError::Session("keywords already suggested"));
        }
        if keywords.is_empty() {
            return Err(WorkflowError::Session("keyword list is empty"));
        }
        self.state = SessionState::KeywordsReady { seed, keywords };
        Ok(())
    }

    /// Replace the suggested keywords with a caller-edited list.
    /// Only legal while keywords are awaiting confirmation.
    pub fn replace_keywords(&mut self, keywords: Vec<String>) -> Result<(), WorkflowError> {
        match &mut self.state {
            SessionState::KeywordsReady {
                keywords: current, ..
            } => {
                if keywords.is_empty() {
                    return Err(WorkflowError::Session("keyword list is empty"));
                }
                *current = keywords;
                Ok(())
            }
            _ => Err(WorkflowError::Session("no keyword suggestion to replace")),
        }
    }

    /// The confirmed keywords, once suggested.
    pub fn keywords(&self) -> Option<&[String]> {
        match &self.state {
            SessionState::KeywordsReady { keywords, .. } => Some(keywords),
            _ => None,
        }
    }

    /// `KeywordsReady -> Done`.
    pub fn complete(
        &mut self,
        report: Report,
        failures: Vec<SummaryFailure>,
    ) -> Result<(), WorkflowError> {
        if !matches!(self.state, SessionState::KeywordsReady { .. }) {
            return Err(WorkflowError::Session("no confirmed keywords to run with"));
        }
        self.state = SessionState::Done { report, failures };
        Ok(())
    }

    /// Consume the session and return the finished artifacts.
    pub fn into_done(self) -> Result<(Report, Vec<SummaryFailure>), WorkflowError> {
        match self.state {
            SessionState::Done { report, failures } => Ok((report, failures)),
            _ => Err(WorkflowError::Session("report not generated yet")),
        }
    }
}

impl Default for ReportSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed() -> ArticleContent {
        ArticleContent {
            title: "씨앗 기사".to_string(),
            body: "본문".to_string(),
        }
    }

    fn report() -> Report {
        Report {
            body: "# 보고서".to_string(),
            sources: vec![],
        }
    }

    #[test]
    fn test_happy_path_transitions() {
        let mut session = ReportSession::new();
        assert!(matches!(session.state(), SessionState::Initial));

        session
            .keywords_ready(seed(), vec!["반도체".to_string()])
            .unwrap();
        assert_eq!(session.keywords().unwrap(), ["반도체".to_string()]);

        session
            .replace_keywords(vec!["수출".to_string(), "금리".to_string()])
            .unwrap();
        assert_eq!(session.keywords().unwrap().len(), 2);

        session.complete(report(), vec![]).unwrap();
        let (done_report, failures) = session.into_done().unwrap();
        assert_eq!(done_report.body, "# 보고서");
        assert!(failures.is_empty());
    }

    #[test]
    fn test_illegal_transitions_are_errors() {
        let mut session = ReportSession::new();
        assert!(session.complete(report(), vec![]).is_err());
        assert!(session.replace_keywords(vec!["a".to_string()]).is_err());

        session
            .keywords_ready(seed(), vec!["반도체".to_string()])
            .unwrap();
        assert!(
            session
                .keywords_ready(seed(), vec!["수출".to_string()])
                .is_err()
        );
    }

    #[test]
    fn test_empty_keyword_lists_rejected() {
        let mut session = ReportSession::new();
        assert!(session.keywords_ready(seed(), vec![]).is_err());

        session
            .keywords_ready(seed(), vec!["반도체".to_string()])
            .unwrap();
        assert!(session.replace_keywords(vec![]).is_err());
    }

    #[test]
    fn test_into_done_requires_completion() {
        let session = ReportSession::new();
        assert!(session.into_done().is_err());
    }
}
