//! Section boundary detection.
//!
//! Scans normalized lines for header candidates and splits the document into
//! labeled blocks. Headers match a known synonym table (case-insensitive,
//! optional trailing colon); short ALL-CAPS lines also match with a small
//! fuzzy tolerance. Material before the first header forms an implicit
//! contact block. A document with no recognizable header at all becomes a
//! single `unknown` block so downstream extractors still get a chance.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;

use crate::patterns;

/// Resume section categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Contact,
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    Languages,
    Unknown,
}

impl SectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Contact => "contact",
            SectionKind::Summary => "summary",
            SectionKind::Experience => "experience",
            SectionKind::Education => "education",
            SectionKind::Skills => "skills",
            SectionKind::Projects => "projects",
            SectionKind::Certifications => "certifications",
            SectionKind::Languages => "languages",
            SectionKind::Unknown => "unknown",
        }
    }
}

/// Header synonym table, ordered; the first match wins.
pub const HEADER_SYNONYMS: &[(&str, SectionKind)] = &[
    ("experience", SectionKind::Experience),
    ("work experience", SectionKind::Experience),
    ("professional experience", SectionKind::Experience),
    ("relevant experience", SectionKind::Experience),
    ("employment", SectionKind::Experience),
    ("employment history", SectionKind::Experience),
    ("work history", SectionKind::Experience),
    ("career history", SectionKind::Experience),
    ("professional background", SectionKind::Experience),
    ("education", SectionKind::Education),
    ("educational background", SectionKind::Education),
    ("academic background", SectionKind::Education),
    ("academic credentials", SectionKind::Education),
    ("academic history", SectionKind::Education),
    ("qualifications", SectionKind::Education),
    ("degrees", SectionKind::Education),
    ("skills", SectionKind::Skills),
    ("technical skills", SectionKind::Skills),
    ("core skills", SectionKind::Skills),
    ("key skills", SectionKind::Skills),
    ("competencies", SectionKind::Skills),
    ("core competencies", SectionKind::Skills),
    ("technologies", SectionKind::Skills),
    ("proficiencies", SectionKind::Skills),
    ("technical proficiencies", SectionKind::Skills),
    ("expertise", SectionKind::Skills),
    ("technical expertise", SectionKind::Skills),
    ("projects", SectionKind::Projects),
    ("key projects", SectionKind::Projects),
    ("selected projects", SectionKind::Projects),
    ("personal projects", SectionKind::Projects),
    ("notable projects", SectionKind::Projects),
    ("certifications", SectionKind::Certifications),
    ("certificates", SectionKind::Certifications),
    ("licenses", SectionKind::Certifications),
    ("credentials", SectionKind::Certifications),
    ("professional certifications", SectionKind::Certifications),
    ("summary", SectionKind::Summary),
    ("professional summary", SectionKind::Summary),
    ("executive summary", SectionKind::Summary),
    ("career summary", SectionKind::Summary),
    ("profile", SectionKind::Summary),
    ("professional profile", SectionKind::Summary),
    ("objective", SectionKind::Summary),
    ("career objective", SectionKind::Summary),
    ("about me", SectionKind::Summary),
    ("languages", SectionKind::Languages),
    ("language skills", SectionKind::Languages),
    ("language proficiency", SectionKind::Languages),
    ("contact", SectionKind::Contact),
    ("contact information", SectionKind::Contact),
    ("personal information", SectionKind::Contact),
];

const FUZZY_HEADER_THRESHOLD: f64 = 0.92;
const MAX_HEADER_LEN: usize = 50;

/// Classifies a line as a section header, if it is one.
pub fn header_kind(line: &str) -> Option<SectionKind> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.len() >= MAX_HEADER_LEN {
        return None;
    }
    let cleaned = trimmed.trim_end_matches(':').trim_end();
    if cleaned.is_empty() {
        return None;
    }
    let lower = cleaned.to_lowercase();
    for (synonym, kind) in HEADER_SYNONYMS {
        if lower == *synonym {
            return Some(*kind);
        }
    }
    // Short ALL-CAPS lines tolerate minor misspellings.
    if patterns::is_all_caps(cleaned) {
        for (synonym, kind) in HEADER_SYNONYMS {
            if jaro_winkler(&lower, synonym) >= FUZZY_HEADER_THRESHOLD {
                return Some(*kind);
            }
        }
    }
    None
}

/// A contiguous block of lines attributed to one section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub kind: SectionKind,
    /// The header line as written, when the block was opened by one.
    pub header: Option<String>,
    pub lines: Vec<String>,
    /// 1-based line number where the block starts (header line included).
    pub start_line: usize,
    /// Whether the block was opened by an explicit header.
    pub explicit: bool,
}

impl Section {
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

pub struct SectionSegmenter;

impl SectionSegmenter {
    /// Splits normalized text into labeled blocks, in document order.
    pub fn segment(text: &str) -> Vec<Section> {
        let lines: Vec<&str> = text.lines().collect();
        let mut sections: Vec<Section> = Vec::new();
        let mut seen: HashSet<SectionKind> = HashSet::new();
        let mut current: Option<Section> = None;

        for (idx, raw_line) in lines.iter().enumerate() {
            let trimmed = raw_line.trim();
            let next_is_blank = lines
                .get(idx + 1)
                .map_or(true, |next| next.trim().is_empty());

            let header = match header_kind(trimmed) {
                Some(kind) if !seen.contains(&kind) => {
                    seen.insert(kind);
                    Some(kind)
                }
                // A repeated header is folded into the current block as content.
                Some(_) => None,
                None if Self::caps_header_candidate(trimmed, next_is_blank) => {
                    Some(SectionKind::Unknown)
                }
                None => None,
            };

            if let Some(kind) = header {
                if let Some(section) = current.take() {
                    sections.push(section);
                }
                current = Some(Section {
                    kind,
                    header: Some(trimmed.to_string()),
                    lines: Vec::new(),
                    start_line: idx + 1,
                    explicit: true,
                });
                continue;
            }

            match &mut current {
                Some(section) => section.lines.push(trimmed.to_string()),
                None => {
                    if trimmed.is_empty() {
                        continue;
                    }
                    current = Some(Section {
                        kind: SectionKind::Contact,
                        header: None,
                        lines: vec![trimmed.to_string()],
                        start_line: idx + 1,
                        explicit: false,
                    });
                }
            }
        }

        if let Some(section) = current.take() {
            sections.push(section);
        }

        // No headers anywhere: the whole document is one unknown block.
        if sections.len() == 1 && !sections[0].explicit {
            sections[0].kind = SectionKind::Unknown;
        }

        sections
    }

    /// A short standalone ALL-CAPS line followed by a blank line opens an
    /// `unknown` block even when it matches no known synonym. Lines that look
    /// like job titles, degrees, companies, or contact data stay ordinary
    /// content.
    fn caps_header_candidate(line: &str, next_is_blank: bool) -> bool {
        next_is_blank
            && !line.is_empty()
            && line.len() < MAX_HEADER_LEN
            && line.split_whitespace().count() <= 4
            && patterns::is_all_caps(line)
            && !patterns::JOB_TITLE_KEYWORDS.is_match(line)
            && !patterns::DEGREE_KEYWORDS.is_match(line)
            && !patterns::COMPANY_SUFFIXES.is_match(line)
            && !patterns::is_contact_like(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognizes_plain_and_colon_headers() {
        assert_eq!(header_kind("EXPERIENCE"), Some(SectionKind::Experience));
        assert_eq!(header_kind("Skills:"), Some(SectionKind::Skills));
        assert_eq!(header_kind("Employment History"), Some(SectionKind::Experience));
        assert_eq!(header_kind("Objective"), Some(SectionKind::Summary));
        assert_eq!(header_kind("Led development of services"), None);
    }

    #[test]
    fn test_fuzzy_match_requires_all_caps() {
        assert_eq!(header_kind("SKILS"), Some(SectionKind::Skills));
        assert_eq!(header_kind("Skils"), None);
    }

    #[test]
    fn test_segments_labeled_blocks_in_order() {
        let text = "John Smith\njohn@email.com\n\nEXPERIENCE\nEngineer at Acme\n\nEDUCATION\nState University";
        let sections = SectionSegmenter::segment(text);
        let kinds: Vec<SectionKind> = sections.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![SectionKind::Contact, SectionKind::Experience, SectionKind::Education]
        );
        assert!(!sections[0].explicit);
        assert!(sections[1].explicit);
        assert_eq!(sections[1].header.as_deref(), Some("EXPERIENCE"));
        assert!(sections[1].text().contains("Engineer at Acme"));
    }

    #[test]
    fn test_no_headers_yields_single_unknown_block() {
        let sections = SectionSegmenter::segment("just some text\nwith no headers");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].kind, SectionKind::Unknown);
        assert!(!sections[0].explicit);
    }

    #[test]
    fn test_empty_text_yields_no_sections() {
        assert!(SectionSegmenter::segment("").is_empty());
    }

    #[test]
    fn test_duplicate_header_folds_into_current_block() {
        let text = "SKILLS\nPython\nSKILLS\nRust";
        let sections = SectionSegmenter::segment(text);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].lines, vec!["Python", "SKILLS", "Rust"]);
    }
}
