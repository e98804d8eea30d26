//! Skills extraction.
//!
//! Candidates come from labeled sub-lists, bullet lines, and comma-separated
//! runs, plus a taxonomy keyword sweep over the whole block. Recall is
//! prioritized over precision: tokens that match no category are kept with a
//! null category rather than dropped.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::extract::SectionOutcome;
use crate::model::Skill;
use crate::patterns;
use crate::score::{STRENGTH_LABELED, STRENGTH_POSITIONAL};
use crate::taxonomy::SkillTaxonomy;

static LABELED_LIST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z][A-Za-z /&]{1,40}):\s*(.+)$").unwrap());

static TOKEN_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,;/|]|\s{2,}|\band\b").unwrap());

/// Trailing proficiency qualifier: "Python (Expert)".
static PROFICIENCY_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(.*?)\s*\((expert|advanced|intermediate|proficient|basic|beginner)\)$")
        .unwrap()
});

const MIN_TOKEN_LEN: usize = 2;
const MAX_TOKEN_LEN: usize = 40;

/// Lead-ins that mark a token as prose rather than a skill.
const FILLER_PREFIXES: &[&str] = &["with", "using", "including", "such as", "like", "for"];

pub struct SkillsExtractor;

impl SkillsExtractor {
    pub fn extract(lines: &[String], taxonomy: &SkillTaxonomy) -> SectionOutcome<Skill> {
        let mut skills: Vec<Skill> = Vec::new();
        let mut seen: Vec<String> = Vec::new();
        let mut labeled_list_found = false;

        for line in lines {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            // (c) "Label: value, value" sub-lists; the label may carry the
            // category for every token in the list.
            if let Some(caps) = LABELED_LIST.captures(line) {
                labeled_list_found = true;
                let label_category = taxonomy.category_for_label(&caps[1]);
                for token in split_tokens(&caps[2]) {
                    push_skill(&mut skills, &mut seen, &token, label_category, taxonomy);
                }
                continue;
            }

            // (b) bullet lines; (a) comma-separated runs on plain lines.
            let content = if patterns::is_bullet(line) {
                patterns::strip_bullet(line)
            } else if line.contains(',') || line.contains(';') {
                line
            } else {
                continue;
            };
            for token in split_tokens(content) {
                push_skill(&mut skills, &mut seen, &token, None, taxonomy);
            }
        }

        // Taxonomy keyword sweep over the whole block.
        let text_lower = lines.join("\n").to_lowercase();
        for (_category, keywords) in taxonomy.categories() {
            for keyword in keywords {
                if seen.iter().any(|s| s == keyword) {
                    continue;
                }
                if crate::taxonomy::keyword_in(&text_lower, keyword) {
                    let display = title_case_token(keyword);
                    push_skill(&mut skills, &mut seen, &display, None, taxonomy);
                }
            }
        }

        if skills.is_empty() {
            return SectionOutcome::empty();
        }
        let completeness = (skills.len() as f64 / 20.0).min(1.0);
        let pattern_strength = if labeled_list_found {
            STRENGTH_LABELED
        } else {
            STRENGTH_POSITIONAL
        };
        SectionOutcome { entries: skills, completeness, pattern_strength }
    }
}

fn split_tokens(text: &str) -> Vec<String> {
    TOKEN_SPLIT
        .split(text)
        .map(|t| t.trim().trim_end_matches('.').trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

fn push_skill(
    skills: &mut Vec<Skill>,
    seen: &mut Vec<String>,
    token: &str,
    label_category: Option<&str>,
    taxonomy: &SkillTaxonomy,
) {
    let (token, proficiency) = match PROFICIENCY_SUFFIX.captures(token) {
        Some(caps) => {
            let name = caps.get(1).map_or("", |m| m.as_str()).trim().to_string();
            let level = capitalize_first(&caps[2]);
            (name, Some(level))
        }
        None => (token.to_string(), None),
    };
    if !is_valid_token(&token) {
        return;
    }
    let lower = token.to_lowercase();
    if seen.iter().any(|s| s == &lower) {
        return;
    }
    let category = label_category.or_else(|| taxonomy.category_of(&token));
    skills.push(Skill {
        name: token,
        category: category.map(str::to_string),
        proficiency,
    });
    seen.push(lower);
}

fn is_valid_token(token: &str) -> bool {
    if token.len() < MIN_TOKEN_LEN || token.len() > MAX_TOKEN_LEN {
        return false;
    }
    if !token.chars().any(|c| c.is_alphanumeric()) {
        return false;
    }
    let lower = token.to_lowercase();
    if FILLER_PREFIXES
        .iter()
        .any(|p| lower.starts_with(p) && lower.len() > p.len() && lower.as_bytes()[p.len()] == b' ')
    {
        return false;
    }
    true
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

fn title_case_token(token: &str) -> String {
    token
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
