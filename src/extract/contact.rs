//! Contact information extraction.
//!
//! Works on the leading block when segmentation found one, or the whole
//! document otherwise. Field heuristics are ordered; the name heuristics
//! cross-check against the job-title keyword list so a headline like
//! "Senior Software Engineer" is never mistaken for a name.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::ContactInfo;
use crate::normalize::phones::PhoneNormalizer;
use crate::patterns;
use crate::segment;

/// Per-field reliability weights, mirroring how strongly each pattern is
/// trusted when it matches.
const SCORE_NAME: f64 = 0.9;
const SCORE_EMAIL: f64 = 1.0;
const SCORE_PHONE_VALID: f64 = 0.95;
const SCORE_PHONE_UNVALIDATED: f64 = 0.7;
const SCORE_HANDLE: f64 = 0.95;
const SCORE_HANDLE_URL_ONLY: f64 = 0.8;
const SCORE_ADDRESS: f64 = 0.8;
const SCORE_WEBSITE: f64 = 0.7;

#[derive(Debug, Clone)]
pub struct ContactOutcome {
    pub contact: ContactInfo,
    /// Average of per-field scores; name/email/phone always count, the
    /// optional fields only when found.
    pub completeness: f64,
}

pub struct ContactExtractor;

impl ContactExtractor {
    pub fn extract(text: &str) -> ContactOutcome {
        let mut contact = ContactInfo::default();
        let mut scores: Vec<f64> = Vec::new();

        match extract_name(text) {
            Some(name) => {
                contact.name = Some(name);
                scores.push(SCORE_NAME);
            }
            None => scores.push(0.0),
        }

        match patterns::EMAIL.find(text) {
            Some(m) => {
                contact.email = Some(m.as_str().to_string());
                scores.push(SCORE_EMAIL);
            }
            None => scores.push(0.0),
        }

        let candidates = PhoneNormalizer::extract_candidates(text);
        if let Some(valid) = candidates.iter().find(|c| PhoneNormalizer::validate(c)) {
            contact.phone = PhoneNormalizer::normalize(valid);
            scores.push(SCORE_PHONE_VALID);
        } else if let Some(first) = candidates.first() {
            // Keep the first candidate even when strict validation fails.
            contact.phone = PhoneNormalizer::format(first);
            scores.push(SCORE_PHONE_UNVALIDATED);
        } else {
            scores.push(0.0);
        }

        if let Some(caps) = patterns::LINKEDIN_URL.captures(text) {
            contact.linkedin = Some(format!("https://linkedin.com/in/{}", &caps[1]));
            scores.push(SCORE_HANDLE);
        } else if let Some(url) = find_url_containing(text, "linkedin.com") {
            contact.linkedin = Some(url);
            scores.push(SCORE_HANDLE_URL_ONLY);
        }

        if let Some(caps) = patterns::GITHUB_URL.captures(text) {
            contact.github = Some(format!("https://github.com/{}", &caps[1]));
            scores.push(SCORE_HANDLE);
        } else if let Some(url) = find_url_containing(text, "github.com") {
            contact.github = Some(url);
            scores.push(SCORE_HANDLE_URL_ONLY);
        }

        // Address: look only in the leading material.
        let head: String = text.lines().take(10).collect::<Vec<_>>().join("\n");
        if let Some(location) = patterns::find_location(&head) {
            contact.address = Some(location);
            scores.push(SCORE_ADDRESS);
        }

        if let Some(url) = patterns::URL.find_iter(text).find(|m| {
            let lower = m.as_str().to_lowercase();
            !lower.contains("linkedin.com") && !lower.contains("github.com")
        }) {
            contact.website = Some(url.as_str().to_string());
            scores.push(SCORE_WEBSITE);
        }

        let completeness = scores.iter().sum::<f64>() / scores.len() as f64;
        ContactOutcome { contact, completeness }
    }
}

fn find_url_containing(text: &str, needle: &str) -> Option<String> {
    patterns::URL
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .find(|url| url.to_lowercase().contains(needle))
}

static PROPER_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][a-z]+(?:\s+[A-Z][a-z]+){1,3}$").unwrap());

static ALL_CAPS_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][A-Z\s]+$").unwrap());

/// Words that disqualify a line from being a person's name.
const NAME_EXCLUDE_WORDS: &[&str] = &[
    "resume",
    "curriculum",
    "vitae",
    "profile",
    "summary",
    "objective",
    "experience",
    "education",
    "skills",
    "contact",
    "information",
    "phone",
    "email",
    "address",
    "references",
    "certifications",
    "projects",
    "languages",
];

/// Lowercase particles allowed mid-name ("Ludwig van Beethoven").
const NAME_CONNECTORS: &[&str] =
    &["de", "del", "van", "von", "der", "la", "le", "di", "da", "dos", "das"];

/// Ordered name heuristics over the leading lines.
fn extract_name(text: &str) -> Option<String> {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();

    // Strategy 1: first non-empty lines in name shape.
    for line in lines.iter().take(5) {
        if line.is_empty() || skip_for_name(line) {
            continue;
        }
        if ALL_CAPS_NAME.is_match(line) {
            let words = line.split_whitespace().count();
            if (2..=4).contains(&words) && !patterns::JOB_TITLE_KEYWORDS.is_match(line) {
                return Some(title_case(line));
            }
        }
        if PROPER_NAME.is_match(line) && !patterns::JOB_TITLE_KEYWORDS.is_match(line) {
            return Some(line.to_string());
        }
    }

    // Strategy 2: the lines right above the email address.
    if let Some(email) = patterns::EMAIL.find(text) {
        let before: Vec<&str> = text[..email.start()].lines().map(str::trim).collect();
        for line in before.iter().rev().take(3) {
            if line.is_empty() || skip_for_name(line) {
                continue;
            }
            if patterns::is_all_caps(line) && line.contains(' ') {
                return Some(title_case(line));
            }
            if PROPER_NAME.is_match(line) && !patterns::JOB_TITLE_KEYWORDS.is_match(line) {
                return Some(line.to_string());
            }
        }
    }

    // Strategy 3: validated line-by-line sweep.
    for line in lines.iter().take(10) {
        if line.is_empty() || skip_for_name(line) {
            continue;
        }
        if is_valid_name(line) && !patterns::JOB_TITLE_KEYWORDS.is_match(line) {
            return Some(if patterns::is_all_caps(line) {
                title_case(line)
            } else {
                line.to_string()
            });
        }
    }

    None
}

fn skip_for_name(line: &str) -> bool {
    segment::header_kind(line).is_some()
        || patterns::is_contact_like(line)
        || patterns::is_bullet(line)
        || line.len() < 3
        || line.len() > 50
}

/// Shape validation for a candidate name line.
fn is_valid_name(line: &str) -> bool {
    let lower = line.to_lowercase();
    if NAME_EXCLUDE_WORDS.iter().any(|w| lower.contains(w)) {
        return false;
    }
    if line
        .chars()
        .any(|c| c.is_ascii_digit() || ",|@#$%^&*()_+=[]{};:\"\\<>?/".contains(c))
    {
        return false;
    }
    if !line.contains(' ') && !patterns::is_all_caps(line) {
        return false;
    }
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.is_empty() || parts.len() > 5 {
        return false;
    }
    parts.iter().all(|part| {
        NAME_CONNECTORS.contains(&part.to_lowercase().as_str())
            || part.chars().next().is_some_and(|c| c.is_uppercase())
    })
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_basic_contact_block() {
        let text = "John Smith\njohn.smith@email.com\n(555) 123-4567";
        let outcome = ContactExtractor::extract(text);
        assert_eq!(outcome.contact.name.as_deref(), Some("John Smith"));
        assert_eq!(outcome.contact.email.as_deref(), Some("john.smith@email.com"));
        assert_eq!(outcome.contact.phone.as_deref(), Some("(555) 123-4567"));
        assert!(outcome.completeness > 0.8);
    }

    #[test]
    fn test_all_caps_name_is_title_cased() {
        let outcome = ContactExtractor::extract("JANE VAN DOE\njane@email.com");
        assert_eq!(outcome.contact.name.as_deref(), Some("Jane Van Doe"));
    }

    #[test]
    fn test_job_title_is_not_a_name() {
        let text = "Senior Software Engineer\nJohn Smith\njohn@email.com";
        let outcome = ContactExtractor::extract(text);
        assert_eq!(outcome.contact.name.as_deref(), Some("John Smith"));
    }

    #[test]
    fn test_social_handles_rebuild_canonical_urls() {
        let text = "Jane Doe\nlinkedin.com/in/janedoe\ngithub.com/jdoe";
        let outcome = ContactExtractor::extract(text);
        assert_eq!(
            outcome.contact.linkedin.as_deref(),
            Some("https://linkedin.com/in/janedoe")
        );
        assert_eq!(outcome.contact.github.as_deref(), Some("https://github.com/jdoe"));
    }

    #[test]
    fn test_address_and_website() {
        let text = "Jane Doe\nAustin, TX\nhttps://janedoe.dev\njane@email.com";
        let outcome = ContactExtractor::extract(text);
        assert_eq!(outcome.contact.address.as_deref(), Some("Austin, TX"));
        assert_eq!(outcome.contact.website.as_deref(), Some("https://janedoe.dev"));
    }

    #[test]
    fn test_empty_input() {
        let outcome = ContactExtractor::extract("");
        assert_eq!(outcome.contact, ContactInfo::default());
        assert_eq!(outcome.completeness, 0.0);
    }
}
