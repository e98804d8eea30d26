//! Education extraction.
//!
//! Degrees are recognized by three pattern families tried in order: full
//! degree names, abbreviations (optionally followed by "in <field>"), and a
//! combined abbreviation-with-major shape. The first family that matches
//! supplies degree and field. GPA validation is advisory: out-of-range values
//! are kept and only the confidence reflects doubt.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::extract::{split_blocks, SectionOutcome};
use crate::model::Education;
use crate::normalize::dates::DateNormalizer;
use crate::patterns;
use crate::score::{STRENGTH_LABELED, STRENGTH_POSITIONAL};

static FULL_DEGREE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(bachelor|master|doctorate|associate|diploma)(?:'s)?\s+(?:of\s+)?(science|arts|engineering|business administration|business|technology|philosophy|education|fine arts|law)\b(?:\s+in\s+([A-Za-z][A-Za-z &]*[A-Za-z]))?",
    )
    .unwrap()
});

static ABBREV_DEGREE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(b\.?s\.?c?|m\.?s\.?c?|b\.?a|m\.?a|b\.?tech|m\.?tech|m\.?b\.?a|ph\.?d|j\.?d|m\.?d)\.?(?:\s+in\s+([A-Za-z][A-Za-z &]*[A-Za-z]))?",
    )
    .unwrap()
});

static COMBINED_DEGREE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(BS|BA|MS|MA|MBA|PhD|B\.S\.|M\.S\.|B\.A\.|M\.A\.|Ph\.D\.)\s+([A-Z][A-Za-z &]+)")
        .unwrap()
});

/// GPA literal patterns, in order.
static GPA_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)gpa:?\s*(\d+\.?\d*)\s*(?:/\s*\d+\.?\d*)?").unwrap(),
        Regex::new(r"(?i)grade\s*point\s*average:?\s*(\d+\.?\d*)").unwrap(),
        Regex::new(r"\b(\d\.\d{1,2})\s*/\s*\d\.\d{1,2}\b").unwrap(),
    ]
});

static HONORS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(summa cum laude|magna cum laude|cum laude|dean'?s list|with honors)\b")
        .unwrap()
});

static GRADUATED: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)graduat").unwrap());

pub struct EducationExtractor;

impl EducationExtractor {
    pub fn extract(lines: &[String], dates: &DateNormalizer) -> SectionOutcome<Education> {
        let mut scored = Vec::new();
        for block in split_blocks(lines) {
            if let Some((education, strength)) = parse_block(&block, dates) {
                let completeness = entry_completeness(&education);
                scored.push((education, completeness, strength));
            }
        }
        SectionOutcome::from_scored(scored)
    }
}

fn entry_completeness(education: &Education) -> f64 {
    let mut score = 0.0;
    if education.institution.is_some() {
        score += 0.4;
    }
    if education.degree.is_some() {
        score += 0.4;
    }
    if education.graduation_date.is_some() {
        score += 0.1;
    }
    if education.gpa.is_some() {
        score += 0.1;
    }
    score
}

fn parse_block(block: &[String], dates: &DateNormalizer) -> Option<(Education, f64)> {
    let first = block.first()?.trim();
    if first.is_empty() || patterns::is_bullet(first) {
        return None;
    }
    // Experience spill-over guard for whole-document fallback scans.
    let verb_lines = block
        .iter()
        .filter(|l| patterns::is_bullet(l) || patterns::starts_with_action_verb(l))
        .count();
    if verb_lines > 3 {
        return None;
    }

    let mut education = Education::default();
    let mut used: HashSet<usize> = HashSet::new();
    let mut strength = STRENGTH_POSITIONAL;

    // Degree pattern families, first match wins.
    'families: for family in 0..3 {
        for (idx, line) in block.iter().enumerate() {
            let line = line.trim();
            if try_degree_family(family, line, &mut education) {
                strength = STRENGTH_LABELED;
                used.insert(idx);
                break 'families;
            }
        }
    }

    // Institution: keyword match first, then a plausible proper-noun line.
    for (idx, line) in block.iter().enumerate() {
        let line = line.trim();
        if used.contains(&idx) {
            continue;
        }
        if patterns::UNIVERSITY_KEYWORDS.is_match(line) {
            let (institution, location) = split_institution_location(line);
            education.institution = Some(institution);
            education.location = location;
            used.insert(idx);
            break;
        }
    }
    // The proper-noun fallback only runs once a degree anchored the block as
    // education; otherwise any capitalized line would become an institution.
    if education.institution.is_none() && education.degree.is_some() {
        for (idx, line) in block.iter().enumerate().take(3) {
            let line = line.trim();
            if used.contains(&idx)
                || line.split_whitespace().count() < 2
                || patterns::is_contact_like(line)
            {
                continue;
            }
            let lower = line.to_lowercase();
            let advisory = ["expected", "graduation", "gpa", "major", "minor", "concentration"];
            if advisory.iter().any(|w| lower.contains(w))
                || patterns::DIGIT_RUN.is_match(line)
                || patterns::is_bullet(line)
            {
                continue;
            }
            // Proper-noun shape: most words capitalized.
            let words: Vec<&str> = line.split_whitespace().collect();
            let capitalized = words
                .iter()
                .filter(|w| w.chars().next().is_some_and(|c| c.is_uppercase()))
                .count();
            if capitalized * 2 < words.len() {
                continue;
            }
            education.institution = Some(line.to_string());
            used.insert(idx);
            break;
        }
    }

    let text = block.join("\n");

    // GPA: ordered literal patterns; the value is taken as written.
    for pattern in GPA_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(&text) {
            if let Ok(gpa) = caps[1].parse::<f64>() {
                education.gpa = Some(gpa);
            }
            break;
        }
    }

    // Graduation date: an explicit "graduated" mention wins, otherwise the
    // latest plausible standalone date in the entry.
    for line in block {
        if GRADUATED.is_match(line) {
            if let Some(date) = dates.parse_date(line) {
                education.graduation_date = Some(date);
                break;
            }
        }
    }
    if education.graduation_date.is_none() {
        education.graduation_date = block
            .iter()
            .filter(|l| !GPA_PATTERNS[0].is_match(l))
            .flat_map(|l| {
                let (start, end) = dates.extract_range(l);
                [start, end]
            })
            .flatten()
            .filter_map(crate::normalize::dates::DateToken::as_date)
            .max();
    }

    if let Some(caps) = HONORS.captures(&text) {
        education.honors = Some(caps[1].to_string());
    }

    if education.location.is_none() {
        for (idx, line) in block.iter().enumerate() {
            if used.contains(&idx) {
                continue;
            }
            if let Some(location) = patterns::find_location(line) {
                education.location = Some(location);
                break;
            }
        }
    }

    if education.institution.is_some() || education.degree.is_some() {
        Some((education, strength))
    } else {
        None
    }
}

fn try_degree_family(family: usize, line: &str, education: &mut Education) -> bool {
    match family {
        0 => {
            if let Some(caps) = FULL_DEGREE.captures(line) {
                let kind = capitalize(&caps[1]);
                let field = capitalize_words(&caps[2]);
                education.degree = Some(format!("{kind} of {field}"));
                education.field = caps.get(3).map(|m| capitalize_words(m.as_str()));
                return true;
            }
            false
        }
        1 => {
            if let Some(caps) = ABBREV_DEGREE.captures(line) {
                let token = caps.get(1).unwrap();
                let has_field = caps.get(2).is_some();
                // Guard against stray two-letter words and state codes: the
                // abbreviation must carry an "in <field>" tail or stand alone
                // on the line. Abbreviation-with-major shapes belong to the
                // combined family below.
                let accept = has_field || token.as_str() == line.trim_end_matches('.');
                if accept {
                    education.degree = Some(token.as_str().to_uppercase().replace('.', ""));
                    education.field = caps.get(2).map(|m| capitalize_words(m.as_str()));
                    return true;
                }
            }
            false
        }
        _ => {
            if let Some(caps) = COMBINED_DEGREE.captures(line) {
                education.degree = Some(caps[1].replace('.', ""));
                education.field = Some(caps[2].trim().to_string());
                return true;
            }
            false
        }
    }
}

fn split_institution_location(line: &str) -> (String, Option<String>) {
    if let Some((institution, location)) = line.split_once(" | ") {
        return (institution.trim().to_string(), Some(location.trim().to_string()));
    }
    if let Some(location) = patterns::find_location(line) {
        if let Some(idx) = line.find(&location[..location.find(',').unwrap_or(location.len())]) {
            if idx > 0 {
                let institution = line[..idx].trim_end_matches([',', ' ']).trim();
                if !institution.is_empty() && patterns::UNIVERSITY_KEYWORDS.is_match(institution) {
                    return (institution.to_string(), Some(location));
                }
            }
        }
        return (line.trim().to_string(), Some(location));
    }
    (line.trim().to_string(), None)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

fn capitalize_words(words: &str) -> String {
    words.split_whitespace().map(capitalize).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CanonicalDate;

    fn extract(text: &str) -> SectionOutcome<Education> {
        let lines: Vec<String> = text.lines().map(str::to_string).collect();
        EducationExtractor::extract(&lines, &DateNormalizer::new())
    }

    #[test]
    fn test_full_degree_with_field() {
        let outcome = extract("Bachelor of Science in Computer Science\nState University\nGraduated May 2018");
        let entry = &outcome.entries[0];
        assert_eq!(entry.degree.as_deref(), Some("Bachelor of Science"));
        assert_eq!(entry.field.as_deref(), Some("Computer Science"));
        assert_eq!(entry.institution.as_deref(), Some("State University"));
        assert_eq!(entry.graduation_date, Some(CanonicalDate::year_month(2018, 5)));
    }

    #[test]
    fn test_abbreviated_degree_with_field() {
        let outcome = extract("M.S. in Data Science\nTech Institute");
        let entry = &outcome.entries[0];
        assert_eq!(entry.degree.as_deref(), Some("MS"));
        assert_eq!(entry.field.as_deref(), Some("Data Science"));
    }

    #[test]
    fn test_state_code_is_not_a_degree() {
        let outcome = extract("Boston College\nBoston, MA\n2016");
        let entry = &outcome.entries[0];
        assert_eq!(entry.degree, None);
        assert_eq!(entry.institution.as_deref(), Some("Boston College"));
    }

    #[test]
    fn test_gpa_first_pattern_wins() {
        let outcome = extract("BS Computer Science\nState University\nGPA: 3.8/4.0");
        assert_eq!(outcome.entries[0].gpa, Some(3.8));
    }

    #[test]
    fn test_out_of_range_gpa_is_kept() {
        let outcome = extract("BS Mathematics\nState University\nGPA: 4.8/5.0");
        assert_eq!(outcome.entries[0].gpa, Some(4.8));
    }

    #[test]
    fn test_latest_date_is_graduation_fallback() {
        let outcome = extract("BA History\nCity College\n2014 - 2018");
        assert_eq!(
            outcome.entries[0].graduation_date,
            Some(CanonicalDate::year(2018))
        );
    }

    #[test]
    fn test_honors_capture() {
        let outcome = extract("BS Physics, magna cum laude\nState University");
        assert_eq!(outcome.entries[0].honors.as_deref(), Some("magna cum laude"));
    }

    #[test]
    fn test_no_degree_or_institution_yields_nothing() {
        let outcome = extract("just a paragraph of text\nnothing educational here at all");
        assert!(outcome.is_empty());
    }
}
