//! Shared regex tables used across the extractors.
//!
//! Pattern lists are ordered; callers rely on first-match-wins, so the order
//! here is part of the extraction contract.

use once_cell::sync::Lazy;
use regex::Regex;

/// RFC-lite email address.
pub static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap());

/// http(s) URL.
pub static URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"https?://(?:[-\w.])+(?:[:\d]+)?(?:/(?:[\w/_.\-])*(?:\?(?:[\w&=%.\-])*)?)?")
        .unwrap()
});

/// github.com profile reference, capturing the handle.
pub static GITHUB_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:https?://)?(?:www\.)?github\.com/([A-Za-z0-9_.-]+)/?").unwrap());

/// linkedin.com/in profile reference, capturing the handle.
pub static LINKEDIN_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:https?://)?(?:www\.)?linkedin\.com/in/([A-Za-z0-9_.-]+)/?").unwrap()
});

/// Location shapes, tried in order: `City, ST`, `City | ST`, `City, State`.
pub static LOCATION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"\b([A-Za-z][A-Za-z .\-]+?),\s*([A-Z]{2})\b").unwrap(),
        Regex::new(r"\b([A-Za-z][A-Za-z .\-]+?)\s*\|\s*([A-Z]{2})\b").unwrap(),
        Regex::new(r"\b([A-Za-z][A-Za-z .\-]+?),\s*([A-Z][a-z]+(?:\s+[A-Z][a-z]+)?)\b").unwrap(),
    ]
});

/// Words that mark a line as a job title. Shared between the experience
/// extractor and the contact name heuristics (name/title tie-break).
pub static JOB_TITLE_KEYWORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:engineer|developer|manager|analyst|specialist|coordinator|director|associate|senior|junior|lead|principal|architect|consultant|intern|designer|administrator|executive|officer|technician|supervisor|assistant|representative|advisor|strategist|scientist|researcher|programmer|tester|writer|editor|trainer|instructor|planner|producer|head|chief|vp|vice\s+president|president|ceo|cto|cfo|coo|founder|co-founder|owner|partner)\b",
    )
    .unwrap()
});

/// Corporate suffixes that mark a line as a company name.
pub static COMPANY_SUFFIXES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:inc|llc|corp|corporation|ltd|limited|co|company|group|technologies|tech|systems|solutions|services|consulting|associates|partners|industries|enterprises|holdings|ventures|labs|laboratory|studios|agency|firm|institute|foundation|organization|bank|financial|capital|global|international)\b",
    )
    .unwrap()
});

/// Institution keywords for the education extractor.
pub static UNIVERSITY_KEYWORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:university|college|institute|school|academy|polytechnic)\b").unwrap()
});

/// Quick degree check used when deciding entry boundaries.
pub static DEGREE_KEYWORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:bachelor|master|phd|ph\.d|doctorate|associate|diploma|b\.?s\.?c?|m\.?s\.?c?|b\.?a\.?|m\.?a\.?|m\.?b\.?a\.?|b\.?tech|m\.?tech)\b",
    )
    .unwrap()
});

/// A line that opens with the canonical bullet marker.
pub static BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[•▪▫‣⁃*\-]\s*").unwrap());

/// A line that is probably a date or date range rather than a field value.
pub static DATE_LIKE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\d{1,2}/\d{4}|\d{4}\s*[-–—]\s*(?:\d{4}|present|current)|^\d{4}$").unwrap()
});

/// Three or more consecutive digits, the cheap phone/date smell test.
pub static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{3,}").unwrap());

/// True for lines carrying contact data (email, URL, phone digits). Such
/// lines never participate in split-line merging.
pub fn is_contact_like(line: &str) -> bool {
    EMAIL.is_match(line)
        || line.contains("http")
        || line.contains("www.")
        || DIGIT_RUN.is_match(line)
}

/// Verbs that open a responsibility line when no bullet marker is present.
pub const ACTION_VERBS: &[&str] = &[
    "managed",
    "developed",
    "led",
    "created",
    "implemented",
    "designed",
    "built",
    "established",
    "improved",
    "coordinated",
    "analyzed",
    "increased",
    "reduced",
    "streamlined",
    "optimized",
    "collaborated",
    "delivered",
    "architected",
    "launched",
    "spearheaded",
];

/// True when the line is entirely uppercase letters (plus spaces/punctuation)
/// and contains at least one letter.
pub fn is_all_caps(line: &str) -> bool {
    let mut has_letter = false;
    for ch in line.chars() {
        if ch.is_alphabetic() {
            has_letter = true;
            if !ch.is_uppercase() {
                return false;
            }
        }
    }
    has_letter
}

/// True when the line starts a bullet item.
pub fn is_bullet(line: &str) -> bool {
    BULLET.is_match(line.trim_start())
}

/// Strips a leading bullet marker, returning the item text.
pub fn strip_bullet(line: &str) -> &str {
    let trimmed = line.trim_start();
    match BULLET.find(trimmed) {
        Some(m) => trimmed[m.end()..].trim(),
        None => trimmed.trim(),
    }
}

/// True when the line starts with a known action verb.
pub fn starts_with_action_verb(line: &str) -> bool {
    let lower = line.trim_start().to_lowercase();
    ACTION_VERBS.iter().any(|verb| {
        lower.starts_with(verb)
            && lower[verb.len()..]
                .chars()
                .next()
                .map_or(true, |c| !c.is_alphanumeric())
    })
}

/// Finds the first `City, ST`-shaped location in the line.
pub fn find_location(line: &str) -> Option<String> {
    for pattern in LOCATION_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(line) {
            let city = caps.get(1).map(|m| m.as_str().trim())?;
            let state = caps.get(2).map(|m| m.as_str().trim())?;
            return Some(format!("{city}, {state}"));
        }
    }
    None
}
