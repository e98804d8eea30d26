//! Project extraction.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::extract::{split_blocks, SectionOutcome};
use crate::model::Project;
use crate::normalize::dates::{DateNormalizer, DateToken};
use crate::patterns;
use crate::score::{STRENGTH_LABELED, STRENGTH_POSITIONAL};
use crate::segment;

/// Phrases that introduce an inline technology list.
static TECH_INTRO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:using|built with|technologies:|tech stack:|tools:)\s*(.+)$").unwrap()
});

pub struct ProjectsExtractor;

impl ProjectsExtractor {
    pub fn extract(lines: &[String], dates: &DateNormalizer) -> SectionOutcome<Project> {
        let mut scored = Vec::new();
        for block in split_blocks(lines) {
            if let Some((project, strength)) = parse_block(&block, dates) {
                let completeness = entry_completeness(&project);
                scored.push((project, completeness, strength));
            }
        }
        SectionOutcome::from_scored(scored)
    }
}

fn entry_completeness(project: &Project) -> f64 {
    let mut score = 0.4; // a named project
    if project.description.is_some() {
        score += 0.2;
    }
    if !project.technologies.is_empty() {
        score += 0.2;
    }
    if project.url.is_some() || project.start_date.is_some() {
        score += 0.2;
    }
    score
}

fn parse_block(block: &[String], dates: &DateNormalizer) -> Option<(Project, f64)> {
    let first = block.first()?.trim();
    if first.is_empty() || segment::header_kind(first).is_some() {
        return None;
    }

    let mut project = Project::default();
    let mut strength = STRENGTH_POSITIONAL;

    // First line is the project name, possibly with a trailing date range.
    let name_line = patterns::strip_bullet(first);
    let name = match name_line.split_once(" | ") {
        Some((name, _)) => name,
        None => name_line,
    };
    project.name = Some(name.trim().to_string());

    let text = block.join("\n");
    if let Some(m) = patterns::URL.find(&text) {
        project.url = Some(m.as_str().to_string());
    }

    // Dates from the first two lines.
    let head = block
        .iter()
        .take(2)
        .map(|l| l.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let (start, end) = dates.extract_range(&head);
    if let Some(DateToken::Date(start_date)) = start {
        project.start_date = Some(start_date);
        if let Some(DateToken::Date(end_date)) = end {
            project.end_date = Some(end_date);
        }
    }

    // Inline technology list, first intro phrase wins.
    for line in block {
        if let Some(caps) = TECH_INTRO.captures(line) {
            let mut technologies: Vec<String> = Vec::new();
            for tech in caps[1].split([',', ';']) {
                let tech = tech.trim().trim_end_matches('.').trim();
                if !tech.is_empty() && !technologies.iter().any(|t| t.eq_ignore_ascii_case(tech)) {
                    technologies.push(tech.to_string());
                }
            }
            if !technologies.is_empty() {
                project.technologies = technologies;
                strength = STRENGTH_LABELED;
                break;
            }
        }
    }

    // Remaining non-date lines form the description.
    let description: Vec<&str> = block
        .iter()
        .skip(1)
        .map(|l| patterns::strip_bullet(l.trim()))
        .filter(|l| !l.is_empty() && dates.parse_date(l).is_none())
        .collect();
    if !description.is_empty() {
        project.description = Some(description.join(" "));
    }

    if project.name.as_deref().is_some_and(|n| !n.is_empty()) {
        Some((project, strength))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CanonicalDate;

    fn extract(text: &str) -> SectionOutcome<Project> {
        let lines: Vec<String> = text.lines().map(str::to_string).collect();
        ProjectsExtractor::extract(&lines, &DateNormalizer::new())
    }

    #[test]
    fn test_named_project_with_technologies_and_url() {
        let text = "Task Tracker\nBuilt with Rust, Axum, PostgreSQL\nhttps://github.com/jdoe/tracker";
        let outcome = extract(text);
        let project = &outcome.entries[0];
        assert_eq!(project.name.as_deref(), Some("Task Tracker"));
        assert_eq!(project.technologies, vec!["Rust", "Axum", "PostgreSQL"]);
        assert_eq!(project.url.as_deref(), Some("https://github.com/jdoe/tracker"));
    }

    #[test]
    fn test_dates_from_head_lines() {
        let outcome = extract("Compiler Project | 01/2021 - 06/2021\nWrote a toy compiler.");
        let project = &outcome.entries[0];
        assert_eq!(project.name.as_deref(), Some("Compiler Project"));
        assert_eq!(project.start_date, Some(CanonicalDate::year_month(2021, 1)));
        assert_eq!(project.end_date, Some(CanonicalDate::year_month(2021, 6)));
        assert_eq!(project.description.as_deref(), Some("Wrote a toy compiler."));
    }

    #[test]
    fn test_blocks_split_on_blank_lines() {
        let outcome = extract("Project One\ndetails here\n\nProject Two\nmore details");
        assert_eq!(outcome.entries.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        assert!(extract("").is_empty());
    }
}
