//! Summary extraction.
//!
//! An explicit summary/objective section wins. Without one, the first
//! paragraph-length block near the top of the document that is not contact
//! material is taken at reduced strength.

use crate::patterns;
use crate::segment::{Section, SectionKind};

const MIN_FALLBACK_LEN: usize = 60;
const MIN_FALLBACK_WORDS: usize = 10;

#[derive(Debug, Clone)]
pub struct SummaryOutcome {
    pub summary: Option<String>,
    /// True when the text came from an explicit header.
    pub explicit: bool,
}

pub struct SummaryExtractor;

impl SummaryExtractor {
    /// Extracts the summary from an explicit section's lines.
    pub fn extract_explicit(lines: &[String]) -> SummaryOutcome {
        let joined = join_paragraph(lines);
        SummaryOutcome { summary: (!joined.is_empty()).then_some(joined), explicit: true }
    }

    /// Fallback: the first paragraph-length run in the leading or unknown
    /// blocks that reads like prose rather than contact data.
    pub fn extract_fallback(sections: &[Section]) -> SummaryOutcome {
        for section in sections {
            if !matches!(section.kind, SectionKind::Contact | SectionKind::Unknown) {
                continue;
            }
            let mut paragraph: Vec<&str> = Vec::new();
            for line in section.lines.iter().chain(std::iter::once(&String::new())) {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    if paragraph_qualifies(&paragraph) {
                        let text = paragraph.join(" ");
                        return SummaryOutcome { summary: Some(text), explicit: false };
                    }
                    paragraph.clear();
                    continue;
                }
                if patterns::is_contact_like(trimmed) {
                    paragraph.clear();
                    continue;
                }
                paragraph.push(if patterns::is_bullet(trimmed) {
                    patterns::strip_bullet(trimmed)
                } else {
                    trimmed
                });
            }
        }
        SummaryOutcome { summary: None, explicit: false }
    }
}

fn paragraph_qualifies(paragraph: &[&str]) -> bool {
    let text = paragraph.join(" ");
    text.len() >= MIN_FALLBACK_LEN && text.split_whitespace().count() >= MIN_FALLBACK_WORDS
}

fn join_paragraph(lines: &[String]) -> String {
    lines
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .map(|l| {
            if patterns::is_bullet(l) {
                patterns::strip_bullet(l)
            } else {
                l
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
