//! Text normalization ahead of segmentation.
//!
//! Collapses whitespace runs while keeping the line breaks and blank lines the
//! segmenter relies on, canonicalizes bullet glyphs to a single `•` marker,
//! and re-joins lines that upstream text extraction split mid-sentence.

pub mod dates;
pub mod phones;

use crate::patterns;
use crate::segment;

pub struct TextNormalizer;

impl TextNormalizer {
    /// Normalizes raw resume text. Total: any input produces a string.
    pub fn normalize(text: &str) -> String {
        let merged = Self::merge_split_lines(text);
        Self::normalize_whitespace(&merged)
    }

    /// Collapses space runs within lines, canonicalizes bullet markers, and
    /// reduces runs of blank lines to a single blank line.
    fn normalize_whitespace(text: &str) -> String {
        let mut out: Vec<String> = Vec::new();
        let mut blank_pending = false;

        for line in text.lines() {
            let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
            if collapsed.is_empty() {
                if !out.is_empty() {
                    blank_pending = true;
                }
                continue;
            }
            if blank_pending {
                out.push(String::new());
                blank_pending = false;
            }
            if patterns::is_bullet(&collapsed) {
                out.push(format!("• {}", patterns::strip_bullet(&collapsed)));
            } else {
                out.push(collapsed);
            }
        }

        out.join("\n")
    }

    /// Re-joins lines that were split mid-word or mid-sentence by upstream
    /// extraction. Never merges across dates, bullets, locations, headers,
    /// or ALL-CAPS lines.
    fn merge_split_lines(text: &str) -> String {
        let lines: Vec<&str> = text.lines().collect();
        let mut merged: Vec<String> = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let current = lines[i].trim();
            if current.is_empty() {
                merged.push(String::new());
                i += 1;
                continue;
            }

            if i + 1 < lines.len() {
                let next = lines[i + 1].trim();
                match Self::merge_decision(current, next) {
                    MergeDecision::Keep => {
                        merged.push(current.to_string());
                        i += 1;
                    }
                    MergeDecision::Join => {
                        merged.push(format!("{current} {next}"));
                        i += 2;
                    }
                    MergeDecision::JoinHyphenated => {
                        merged.push(format!("{}{next}", &current[..current.len() - 1]));
                        i += 2;
                    }
                }
            } else {
                merged.push(current.to_string());
                i += 1;
            }
        }

        merged.join("\n")
    }

    fn merge_decision(current: &str, next: &str) -> MergeDecision {
        if next.is_empty()
            || patterns::DATE_LIKE_LINE.is_match(next)
            || patterns::is_bullet(next)
            || segment::header_kind(next).is_some()
            || patterns::find_location(current).is_some()
            || patterns::is_contact_like(current)
            || patterns::is_contact_like(next)
        {
            return MergeDecision::Keep;
        }

        let ends_sentence = current.ends_with(['.', '!', '?', ':']);
        if ends_sentence {
            return MergeDecision::Keep;
        }

        if current.ends_with('-') {
            return MergeDecision::JoinHyphenated;
        }

        if next.chars().next().is_some_and(|c| c.is_lowercase()) {
            return MergeDecision::Join;
        }

        // Very short fragments are joined conservatively.
        if current.len() < 20
            && current.matches(' ').count() < 3
            && !patterns::is_all_caps(current)
            && !patterns::JOB_TITLE_KEYWORDS.is_match(current)
            && !patterns::COMPANY_SUFFIXES.is_match(current)
        {
            return MergeDecision::Join;
        }

        MergeDecision::Keep
    }
}

enum MergeDecision {
    Keep,
    Join,
    JoinHyphenated,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(TextNormalizer::normalize(""), "");
        assert_eq!(TextNormalizer::normalize("   \n\n  "), "");
    }

    #[test]
    fn test_collapses_space_runs_within_lines() {
        let out = TextNormalizer::normalize("John    Smith\njohn@email.com");
        assert_eq!(out, "John Smith\njohn@email.com");
    }

    #[test]
    fn test_keeps_single_blank_line_between_blocks() {
        let out = TextNormalizer::normalize("First Corp\n\n\n\nSecond Corp");
        assert_eq!(out, "First Corp\n\nSecond Corp");
    }

    #[test]
    fn test_canonicalizes_bullet_markers() {
        let out = TextNormalizer::normalize("- Led team\n* Shipped product\n▪ Fixed bugs");
        assert_eq!(out, "• Led team\n• Shipped product\n• Fixed bugs");
    }

    #[test]
    fn test_merges_hyphen_split_word() {
        let out = TextNormalizer::normalize("Worked on distrib-\nuted systems daily.");
        assert_eq!(out, "Worked on distributed systems daily.");
    }

    #[test]
    fn test_merges_lowercase_continuation() {
        let out = TextNormalizer::normalize("Responsible for the design\nand rollout of the API.");
        assert_eq!(out, "Responsible for the design and rollout of the API.");
    }

    #[test]
    fn test_does_not_merge_name_into_contact_lines() {
        let out = TextNormalizer::normalize("John Smith\njohn.smith@email.com\n(555) 123-4567");
        assert_eq!(out.lines().count(), 3);
    }

    #[test]
    fn test_does_not_merge_into_dates_or_headers() {
        let text = "Senior Engineer\n01/2020 - Present\nEXPERIENCE\nAcme Inc";
        let out = TextNormalizer::normalize(text);
        assert_eq!(out.lines().count(), 4);
    }
}
