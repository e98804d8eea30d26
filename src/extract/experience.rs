//! Work experience extraction.
//!
//! Each entry candidate is tried against the layout patterns in priority
//! order; the first pattern that matches claims the entry. Entries missing
//! fields are still emitted, with a lower confidence contribution.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::extract::{split_blocks, SectionOutcome};
use crate::model::Experience;
use crate::normalize::dates::{DateNormalizer, DateToken};
use crate::patterns;
use crate::score::{STRENGTH_LABELED, STRENGTH_POSITIONAL};
use crate::segment;

static TITLE_AT_COMPANY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(.{2,60}?)\s+(?:at|@)\s+(.+)$").unwrap());

static TITLE_DASH_COMPANY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.{2,60}?)\s+-\s+(.+)$").unwrap());

pub struct ExperienceExtractor;

impl ExperienceExtractor {
    pub fn extract(lines: &[String], dates: &DateNormalizer) -> SectionOutcome<Experience> {
        let mut scored = Vec::new();
        for block in split_blocks(lines) {
            if let Some((experience, strength)) = parse_block(&block, dates) {
                let completeness = entry_completeness(&experience);
                scored.push((experience, completeness, strength));
            }
        }
        SectionOutcome::from_scored(scored)
    }
}

fn entry_completeness(experience: &Experience) -> f64 {
    let mut score = 0.0;
    if experience.title.is_some() {
        score += 0.3;
    }
    if experience.company.is_some() {
        score += 0.3;
    }
    if experience.start_date.is_some() {
        score += 0.2;
    }
    if !experience.responsibilities.is_empty() || experience.description.is_some() {
        score += 0.2;
    }
    score
}

fn parse_block(block: &[String], dates: &DateNormalizer) -> Option<(Experience, f64)> {
    let first = block.first()?.trim();
    // Blocks opening with a bullet are responsibility spill-over, never an
    // entry; section headers are never entries either.
    if first.is_empty() || patterns::is_bullet(first) || segment::header_kind(first).is_some() {
        return None;
    }

    let mut experience = Experience::default();
    let mut used: HashSet<usize> = HashSet::new();
    let mut strength = STRENGTH_POSITIONAL;

    // Layout patterns, first match wins:
    // (a) Title at Company
    if let Some(caps) = TITLE_AT_COMPANY.captures(first) {
        experience.title = Some(caps[1].trim().to_string());
        let (company, location) = split_company_location(caps[2].trim());
        experience.company = Some(company);
        experience.location = location;
        strength = STRENGTH_LABELED;
        used.insert(0);
    }
    // (b) Company | Title (or Title | Company, resolved by title keywords)
    else if first.contains(" | ") {
        let parts: Vec<&str> = first.splitn(3, " | ").map(str::trim).collect();
        let (company, title) = if patterns::JOB_TITLE_KEYWORDS.is_match(parts[0]) {
            (parts.get(1).copied(), Some(parts[0]))
        } else {
            (Some(parts[0]), parts.get(1).copied())
        };
        experience.company = company.map(str::to_string);
        experience.title = title.map(str::to_string);
        experience.location = parts.get(2).map(|s| s.to_string());
        strength = STRENGTH_LABELED;
        used.insert(0);
    }
    // (c) Title - Company, only when the line carries no date
    else if !patterns::DIGIT_RUN.is_match(first) {
        if let Some(caps) = TITLE_DASH_COMPANY.captures(first) {
            if patterns::JOB_TITLE_KEYWORDS.is_match(&caps[1]) {
                experience.title = Some(caps[1].trim().to_string());
                let (company, location) = split_company_location(caps[2].trim());
                experience.company = Some(company);
                experience.location = location;
                strength = STRENGTH_LABELED;
                used.insert(0);
            }
        }
    }

    // (d) Positional fallback: a title-shaped line, then a company line.
    // The title must look like one (ALL CAPS or job-title keywords) so that
    // arbitrary leading lines are not promoted into entries.
    if experience.title.is_none() && experience.company.is_none() {
        if (patterns::is_all_caps(first) || patterns::JOB_TITLE_KEYWORDS.is_match(first))
            && !patterns::is_contact_like(first)
        {
            experience.title = Some(first.to_string());
            used.insert(0);

            if let Some(second) = block.get(1).map(|l| l.trim()) {
                if !second.is_empty()
                    && !patterns::is_bullet(second)
                    && !patterns::DATE_LIKE_LINE.is_match(second)
                    && !patterns::is_contact_like(second)
                {
                    let (company, location) = split_company_location(second);
                    experience.company = Some(company);
                    if experience.location.is_none() {
                        experience.location = location;
                    }
                    used.insert(1);
                }
            }
        }
    }

    // Date range may sit on any non-bullet line of the entry.
    for (idx, line) in block.iter().enumerate() {
        if used.contains(&idx) || patterns::is_bullet(line) {
            continue;
        }
        if !patterns::DIGIT_RUN.is_match(line) {
            continue;
        }
        let (start, end) = dates.extract_range(line);
        if let Some(DateToken::Date(start_date)) = start {
            experience.start_date = Some(start_date);
            match end {
                Some(DateToken::Date(end_date)) => experience.end_date = Some(end_date),
                Some(DateToken::Present) => experience.current = true,
                None => {}
            }
            if DateNormalizer::is_current(line) {
                experience.current = true;
            }
            if experience.current {
                experience.end_date = None;
            }
            // Location falls back to the date line.
            if experience.location.is_none() {
                experience.location = patterns::find_location(line);
            }
            used.insert(idx);
            break;
        }
    }

    // Responsibilities from bullets or action-verb lines; leftover prose
    // becomes the description.
    let mut responsibilities: Vec<String> = Vec::new();
    let mut description: Vec<String> = Vec::new();
    for (idx, line) in block.iter().enumerate() {
        if used.contains(&idx) {
            continue;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if patterns::is_bullet(trimmed) {
            responsibilities.push(patterns::strip_bullet(trimmed).to_string());
        } else if patterns::starts_with_action_verb(trimmed) {
            responsibilities.push(trimmed.to_string());
        } else {
            description.push(trimmed.to_string());
        }
    }
    experience.responsibilities = responsibilities;
    if !description.is_empty() {
        description.truncate(3);
        experience.description = Some(description.join(" "));
    }

    if experience.title.is_some() || experience.company.is_some() {
        Some((experience, strength))
    } else {
        None
    }
}

/// Splits `Company | Location`, `Company, City, ST`, or a bare company name.
fn split_company_location(line: &str) -> (String, Option<String>) {
    if let Some((company, location)) = line.split_once(" | ") {
        return (company.trim().to_string(), Some(location.trim().to_string()));
    }
    for pattern in patterns::LOCATION_PATTERNS.iter() {
        if let Some(m) = pattern.find(line) {
            let location = patterns::find_location(line);
            if m.start() > 0 {
                let company = line[..m.start()].trim_end_matches([',', ' ']).trim();
                if !company.is_empty() {
                    return (company.to_string(), location);
                }
            }
            return (line.trim().to_string(), location);
        }
    }
    (line.trim().to_string(), None)
}
