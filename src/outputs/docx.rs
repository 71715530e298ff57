//! Word-document rendering of the synthesized report.
//!
//! The report text follows a small fixed grammar (`#`-style headings, the
//! section emoji, `* ` bullets, `**bold**` spans, `---` separators).
//! [`parse_report_text`] turns it into typed blocks — a pure step that keeps
//! the grammar testable without packing OOXML — and [`render_document`]
//! lays the blocks out with the title block, date stamp, page break, and the
//! numbered hyperlinked reference list.

use chrono::NaiveDate;
use docx_rs::{
    AbstractNumbering, BreakType, Docx, Hyperlink, HyperlinkType, IndentLevel, Level, LevelJc,
    LevelText, NumberFormat, Numbering, NumberingId, Paragraph, Run, RunFonts, Start,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::io;
use std::path::Path;

use super::reference_suffix;
use crate::models::SummarySuccess;

/// Emoji the synthesis prompt assigns to its four sections; a line led by
/// one of these is a section heading even without `#` markers.
const SECTION_MARKERS: [&str; 4] = ["📌", "📰", "📊", "🧠"];

static BOLD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());

/// An inline run: plain or bold text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
}

/// One rendered line of the report body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportBlock {
    /// Level 1..=3, rendered bold at descending sizes.
    Heading { level: u8, text: String },
    Bullet { spans: Vec<Span> },
    Paragraph { spans: Vec<Span> },
}

/// Split a line into plain and bold spans on `**...**` markers.
fn parse_spans(line: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut cursor = 0;
    for captures in BOLD_RE.captures_iter(line) {
        let matched = captures.get(0).unwrap();
        if matched.start() > cursor {
            spans.push(Span {
                text: line[cursor..matched.start()].to_string(),
                bold: false,
            });
        }
        spans.push(Span {
            text: captures[1].to_string(),
            bold: true,
        });
        cursor = matched.end();
    }
    if cursor < line.len() {
        spans.push(Span {
            text: line[cursor..].to_string(),
            bold: false,
        });
    }
    spans.retain(|span| !span.text.is_empty());
    spans
}

/// Detect an emoji-led section heading, tolerating a leading ordinal and
/// bold markers (`1.  **📌 Executive Summary**`).
fn emoji_heading(line: &str) -> Option<String> {
    let stripped = line
        .trim_start_matches(|c: char| c.is_ascii_digit() || c == '.' || c == ')' || c == ' ')
        .trim_start_matches("**");
    SECTION_MARKERS
        .iter()
        .any(|marker| stripped.starts_with(marker))
        .then(|| line.replace("**", ""))
}

/// Parse the report body against the line grammar. Pure and idempotent:
/// identical input yields identical blocks.
pub fn parse_report_text(text: &str) -> Vec<ReportBlock> {
    let mut blocks = Vec::new();
    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() || line == "---" {
            continue;
        }
        if let Some(rest) = line.strip_prefix("### ") {
            blocks.push(ReportBlock::Heading {
                level: 3,
                text: rest.trim().replace("**", ""),
            });
        } else if let Some(rest) = line.strip_prefix("## ") {
            blocks.push(ReportBlock::Heading {
                level: 2,
                text: rest.trim().replace("**", ""),
            });
        } else if let Some(rest) = line.strip_prefix("# ") {
            blocks.push(ReportBlock::Heading {
                level: 1,
                text: rest.trim().replace("**", ""),
            });
        } else if let Some(text) = emoji_heading(line) {
            blocks.push(ReportBlock::Heading { level: 2, text });
        } else if let Some(rest) = line.strip_prefix("* ").or_else(|| line.strip_prefix("- ")) {
            blocks.push(ReportBlock::Bullet {
                spans: parse_spans(rest.trim()),
            });
        } else {
            blocks.push(ReportBlock::Paragraph {
                spans: parse_spans(line),
            });
        }
    }
    blocks
}

/// Half-point font size for a heading level (16 pt / 14 pt / 12 pt).
fn heading_size(level: u8) -> usize {
    match level {
        1 => 32,
        2 => 28,
        _ => 24,
    }
}

fn spans_paragraph(paragraph: Paragraph, spans: &[Span]) -> Paragraph {
    spans.iter().fold(paragraph, |paragraph, span| {
        let mut run = Run::new().add_text(span.text.as_str());
        if span.bold {
            run = run.bold();
        }
        paragraph.add_run(run)
    })
}

fn block_paragraph(block: &ReportBlock) -> Paragraph {
    match block {
        ReportBlock::Heading { level, text } => Paragraph::new().add_run(
            Run::new()
                .add_text(text.as_str())
                .bold()
                .size(heading_size(*level)),
        ),
        ReportBlock::Bullet { spans } => spans_paragraph(
            Paragraph::new().numbering(NumberingId::new(1), IndentLevel::new(0)),
            spans,
        ),
        ReportBlock::Paragraph { spans } => spans_paragraph(Paragraph::new(), spans),
    }
}

/// Build the full document: title block, date stamp, report body, page
/// break, numbered reference list. Pure: no clock, no I/O, inputs are not
/// mutated.
pub fn render_document(
    report_text: &str,
    successes: &[SummarySuccess],
    title: &str,
    generated_on: NaiveDate,
) -> Docx {
    let mut document = Docx::new()
        .default_fonts(RunFonts::new().east_asia("맑은 고딕"))
        .add_abstract_numbering(AbstractNumbering::new(1).add_level(Level::new(
            0,
            Start::new(1),
            NumberFormat::new("bullet"),
            LevelText::new("•"),
            LevelJc::new("left"),
        )))
        .add_numbering(Numbering::new(1, 1));

    document = document.add_paragraph(
        Paragraph::new().add_run(Run::new().add_text(title).bold().size(32)),
    );
    document = document.add_paragraph(Paragraph::new().add_run(
        Run::new().add_text(format!("생성일: {}", generated_on.format("%Y-%m-%d"))),
    ));

    for block in parse_report_text(report_text) {
        document = document.add_paragraph(block_paragraph(&block));
    }

    document =
        document.add_paragraph(Paragraph::new().add_run(Run::new().add_break(BreakType::Page)));
    document = document.add_paragraph(
        Paragraph::new().add_run(Run::new().add_text("📎 참고 뉴스 목록").bold().size(32)),
    );

    for (index, success) in successes.iter().enumerate() {
        let paragraph = Paragraph::new()
            .add_run(Run::new().add_text(format!("{}. ", index + 1)))
            .add_hyperlink(
                Hyperlink::new(success.link.as_str(), HyperlinkType::External).add_run(
                    Run::new()
                        .add_text(success.title.as_str())
                        .color("0000FF")
                        .underline("single"),
                ),
            )
            .add_run(Run::new().add_text(reference_suffix(success)));
        document = document.add_paragraph(paragraph);
    }

    document
}

/// Pack the document to disk.
pub fn save_docx(document: Docx, path: &Path) -> io::Result<()> {
    let file = std::fs::File::create(path)?;
    document
        .build()
        .pack(file)
        .map_err(|e| io::Error::other(e.to_string()))
}
