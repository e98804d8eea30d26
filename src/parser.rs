//! Resume assembly.
//!
//! `ResumeParser` orchestrates normalization, segmentation, the per-section
//! extractors, and confidence scoring. `parse_text` is total: any input,
//! including the empty string, produces a fully formed `Resume`. Extraction
//! never crosses a section boundary as an error; degraded sections are
//! emitted with whatever was recovered and a low score.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::extract::certifications::CertificationsExtractor;
use crate::extract::contact::ContactExtractor;
use crate::extract::education::EducationExtractor;
use crate::extract::experience::ExperienceExtractor;
use crate::extract::languages::LanguagesExtractor;
use crate::extract::projects::ProjectsExtractor;
use crate::extract::skills::SkillsExtractor;
use crate::extract::summary::SummaryExtractor;
use crate::extract::SectionOutcome;
use crate::ingest;
use crate::model::{ContactInfo, ExtractionMetadata, Resume};
use crate::normalize::dates::{DateFormat, DateNormalizer};
use crate::normalize::TextNormalizer;
use crate::score::{ConfidenceScorer, STRENGTH_LABELED, STRENGTH_POSITIONAL};
use crate::segment::{Section, SectionKind, SectionSegmenter};
use crate::taxonomy::SkillTaxonomy;

/// Parser configuration, immutable once the parser is built.
#[derive(Debug, Clone, Default)]
pub struct ParserConfig {
    pub taxonomy: SkillTaxonomy,
    /// Date formats to try ahead of the default order.
    pub date_hints: Vec<DateFormat>,
}

pub struct ResumeParser {
    config: ParserConfig,
    dates: DateNormalizer,
}

impl Default for ResumeParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ResumeParser {
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    pub fn with_config(config: ParserConfig) -> Self {
        let dates = if config.date_hints.is_empty() {
            DateNormalizer::new()
        } else {
            DateNormalizer::with_hints(&config.date_hints)
        };
        Self { config, dates }
    }

    /// Reads a file through the ingest collaborators and parses it.
    pub fn parse_file(&self, path: &Path) -> Result<Resume> {
        let text = ingest::extract_text(path)?;
        Ok(self.parse_text(&text))
    }

    /// Parses raw resume text into a structured record. Never fails.
    pub fn parse_text(&self, text: &str) -> Resume {
        let normalized = TextNormalizer::normalize(text);
        let sections = SectionSegmenter::segment(&normalized);
        let all_lines: Vec<String> = normalized.lines().map(str::to_string).collect();
        let has_structure = sections.iter().any(|s| s.explicit);

        let mut resume = Resume { raw_text: text.to_string(), ..Default::default() };
        let mut confidence: BTreeMap<String, f64> = BTreeMap::new();

        // Contact: leading block if present, whole document otherwise.
        let contact_text = find_section(&sections, SectionKind::Contact)
            .map(|s| s.text())
            .unwrap_or_else(|| normalized.clone());
        let contact = ContactExtractor::extract(&contact_text);
        let contact_score = if contact.contact == ContactInfo::default() {
            ConfidenceScorer::empty_section()
        } else {
            ConfidenceScorer::section(contact.completeness, STRENGTH_LABELED, has_structure)
        };
        resume.contact_info = contact.contact;
        confidence.insert("contact_info".to_string(), contact_score);

        // Summary: explicit section wins, then the leading-paragraph fallback.
        let summary = match find_section(&sections, SectionKind::Summary) {
            Some(section) => SummaryExtractor::extract_explicit(&section.lines),
            None => SummaryExtractor::extract_fallback(&sections),
        };
        let summary_score = match (&summary.summary, summary.explicit) {
            (Some(_), true) => ConfidenceScorer::section(1.0, STRENGTH_LABELED, true),
            (Some(_), false) => ConfidenceScorer::section(1.0, STRENGTH_POSITIONAL, false),
            (None, _) => ConfidenceScorer::empty_section(),
        };
        resume.summary = summary.summary;
        confidence.insert("summary".to_string(), summary_score);

        // Entry sections: explicit block, else whole-document fallback scan.
        let (experience_lines, experience_explicit) =
            section_or_all(&sections, SectionKind::Experience, &all_lines);
        let experience = ExperienceExtractor::extract(experience_lines, &self.dates);
        confidence.insert(
            "experience".to_string(),
            outcome_score(&experience, experience_explicit),
        );
        resume.experience = experience.entries;

        let (education_lines, education_explicit) =
            section_or_all(&sections, SectionKind::Education, &all_lines);
        let education = EducationExtractor::extract(education_lines, &self.dates);
        confidence.insert(
            "education".to_string(),
            outcome_score(&education, education_explicit),
        );
        resume.education = education.entries;

        let (skills_lines, skills_explicit) =
            section_or_all(&sections, SectionKind::Skills, &all_lines);
        let skills = SkillsExtractor::extract(skills_lines, &self.config.taxonomy);
        confidence.insert("skills".to_string(), outcome_score(&skills, skills_explicit));
        resume.skills = skills.entries;

        let (certification_lines, certifications_explicit) =
            section_or_all(&sections, SectionKind::Certifications, &all_lines);
        let certifications = CertificationsExtractor::extract(
            certification_lines,
            &self.dates,
            !certifications_explicit,
        );
        confidence.insert(
            "certifications".to_string(),
            outcome_score(&certifications, certifications_explicit),
        );
        resume.certifications = certifications.entries;

        // Projects and languages are only attempted behind explicit headers.
        if let Some(section) = find_section(&sections, SectionKind::Projects) {
            let projects = ProjectsExtractor::extract(&section.lines, &self.dates);
            confidence.insert("projects".to_string(), outcome_score(&projects, true));
            resume.projects = projects.entries;
        }
        if let Some(section) = find_section(&sections, SectionKind::Languages) {
            let languages = LanguagesExtractor::extract(&section.lines);
            confidence.insert("languages".to_string(), outcome_score(&languages, true));
            resume.languages = languages.entries;
        }

        let overall = ConfidenceScorer::overall(&confidence);
        confidence.insert("overall".to_string(), overall);

        resume.metadata = ExtractionMetadata {
            sections_found: sections
                .iter()
                .filter(|s| s.explicit && s.kind != SectionKind::Unknown)
                .map(|s| s.kind.as_str().to_string())
                .collect(),
            text_length: text.len(),
            line_count: all_lines.len(),
            overall_confidence: overall,
            error: None,
            ..Default::default()
        };
        resume.confidence = confidence;
        resume.refresh_counts();

        debug!(
            sections = resume.metadata.sections_found.len(),
            overall = overall,
            "parsed resume"
        );
        resume
    }
}

fn find_section<'a>(sections: &'a [Section], kind: SectionKind) -> Option<&'a Section> {
    sections.iter().find(|s| s.kind == kind)
}

/// Returns the section's lines when an explicit block exists, or the whole
/// document for the reduced-confidence fallback scan.
fn section_or_all<'a>(
    sections: &'a [Section],
    kind: SectionKind,
    all_lines: &'a [String],
) -> (&'a [String], bool) {
    match find_section(sections, kind) {
        Some(section) if section.explicit => (&section.lines, true),
        _ => (all_lines, false),
    }
}

fn outcome_score<T>(outcome: &SectionOutcome<T>, explicit: bool) -> f64 {
    if outcome.is_empty() {
        ConfidenceScorer::empty_section()
    } else {
        ConfidenceScorer::section(outcome.completeness, outcome.pattern_strength, explicit)
    }
}
