//! Per-section field extractors.
//!
//! Every extractor follows the same discipline: an ordered pattern list is
//! tried per field, the first match wins, and partial entries are retained
//! with a reduced confidence contribution instead of being dropped. No
//! extractor returns an error; degraded input degrades the outcome.

pub mod certifications;
pub mod contact;
pub mod education;
pub mod experience;
pub mod languages;
pub mod projects;
pub mod skills;
pub mod summary;

use crate::patterns;
use crate::segment;

/// Result of running one section extractor: the entries plus the two signals
/// the confidence scorer blends (average field completeness and the strength
/// of the patterns that matched).
#[derive(Debug, Clone)]
pub struct SectionOutcome<T> {
    pub entries: Vec<T>,
    pub completeness: f64,
    pub pattern_strength: f64,
}

impl<T> SectionOutcome<T> {
    pub fn empty() -> Self {
        Self { entries: Vec::new(), completeness: 0.0, pattern_strength: 0.0 }
    }

    /// Builds an outcome from `(entry, completeness, strength)` triples,
    /// averaging the per-entry signals.
    pub fn from_scored(scored: Vec<(T, f64, f64)>) -> Self {
        if scored.is_empty() {
            return Self::empty();
        }
        let count = scored.len() as f64;
        let completeness = scored.iter().map(|(_, c, _)| *c).sum::<f64>() / count;
        let pattern_strength = scored.iter().map(|(_, _, s)| *s).sum::<f64>() / count;
        Self {
            entries: scored.into_iter().map(|(entry, _, _)| entry).collect(),
            completeness,
            pattern_strength,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Splits a section's lines into entry candidates: blank lines are hard
/// boundaries, and within a run a line that looks like the start of a new
/// entry (ALL-CAPS title, degree, or job-title line after enough content)
/// also closes the current candidate.
pub fn split_blocks(lines: &[String]) -> Vec<Vec<String>> {
    let mut majors: Vec<Vec<String>> = Vec::new();
    let mut run: Vec<String> = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            if !run.is_empty() {
                majors.push(std::mem::take(&mut run));
            }
        } else {
            run.push(line.clone());
        }
    }
    if !run.is_empty() {
        majors.push(run);
    }

    let mut blocks: Vec<Vec<String>> = Vec::new();
    for major in majors {
        let mut current: Vec<String> = Vec::new();
        for line in major {
            if !current.is_empty() && starts_new_entry(&line, &current) {
                blocks.push(std::mem::take(&mut current));
            }
            current.push(line);
        }
        if !current.is_empty() {
            blocks.push(current);
        }
    }
    blocks
}

fn starts_new_entry(line: &str, current: &[String]) -> bool {
    if patterns::is_bullet(line) {
        return false;
    }
    let non_bullet = current
        .iter()
        .filter(|l| !l.trim().is_empty() && !patterns::is_bullet(l))
        .count();

    if patterns::is_all_caps(line) && segment::header_kind(line).is_none() && non_bullet >= 2 {
        return true;
    }
    if patterns::DEGREE_KEYWORDS.is_match(line) && non_bullet >= 2 {
        return true;
    }
    if patterns::JOB_TITLE_KEYWORDS.is_match(line)
        && !patterns::DATE_LIKE_LINE.is_match(line)
        && non_bullet >= 3
    {
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(str::to_string).collect()
    }

    #[test]
    fn test_blank_lines_split_blocks() {
        let blocks = split_blocks(&lines("Engineer at Acme\n• did things\n\nAnalyst at Initech"));
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].len(), 2);
    }

    #[test]
    fn test_caps_title_after_content_starts_new_entry() {
        let text = "SENIOR ENGINEER\nAcme Inc\n01/2020 - Present\nSTAFF ENGINEER\nInitech";
        let blocks = split_blocks(&lines(text));
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1][0], "STAFF ENGINEER");
    }

    #[test]
    fn test_bullets_never_start_entries() {
        let text = "Engineer at Acme\n• Led development\n• Managed releases";
        let blocks = split_blocks(&lines(text));
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn test_outcome_averages_scores() {
        let outcome = SectionOutcome::from_scored(vec![((), 1.0, 1.0), ((), 0.5, 0.6)]);
        assert!((outcome.completeness - 0.75).abs() < 1e-9);
        assert!((outcome.pattern_strength - 0.8).abs() < 1e-9);
    }
}
