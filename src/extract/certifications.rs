//! Certification extraction.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::extract::{split_blocks, SectionOutcome};
use crate::model::Certification;
use crate::normalize::dates::DateNormalizer;
use crate::patterns;
use crate::score::{STRENGTH_LABELED, STRENGTH_POSITIONAL};
use crate::segment;

/// Issuer patterns, in order: labeled first, then free-form "by <issuer>".
static ISSUER_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)(?:issued by|issuer):\s*([A-Za-z][A-Za-z .&]+?)(?:\s*[,|]|$)").unwrap(),
        Regex::new(r"(?i)\b(?:by|from)\s+([A-Z][A-Za-z .&]+?)(?:\s*[,|]|$)").unwrap(),
    ]
});

static ISSUE_DATE_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:date|issued|earned|completed):?\s").unwrap());

static EXPIRY_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:expires?|expiry|valid until|valid through):?\s").unwrap());

static CREDENTIAL_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:credential|certificate|license|id)(?:\s*#)?\s*[:#]\s*([A-Za-z0-9-]+)")
        .unwrap()
});

static BARE_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"#\s*([A-Za-z0-9-]{4,})").unwrap());

/// Words that anchor a block as certification material; required when
/// scanning outside an explicit certifications section.
static CERT_SIGNAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:certified|certification|certificate|licensed?|credential)").unwrap()
});

pub struct CertificationsExtractor;

impl CertificationsExtractor {
    /// Extracts certification entries. With `strict` set (whole-document
    /// fallback), blocks must carry a certification keyword to qualify.
    pub fn extract(
        lines: &[String],
        dates: &DateNormalizer,
        strict: bool,
    ) -> SectionOutcome<Certification> {
        let mut scored = Vec::new();
        for block in split_blocks(lines) {
            if strict && !block.iter().any(|l| CERT_SIGNAL.is_match(l)) {
                continue;
            }
            if let Some((certification, strength)) = parse_block(&block, dates) {
                let completeness = entry_completeness(&certification);
                scored.push((certification, completeness, strength));
            }
        }
        SectionOutcome::from_scored(scored)
    }
}

fn entry_completeness(certification: &Certification) -> f64 {
    let mut score = 0.4; // a named certification
    if certification.issuer.is_some() {
        score += 0.3;
    }
    if certification.date_issued.is_some() || certification.expiry_date.is_some() {
        score += 0.2;
    }
    if certification.credential_id.is_some() {
        score += 0.1;
    }
    score
}

fn parse_block(block: &[String], dates: &DateNormalizer) -> Option<(Certification, f64)> {
    let first = block.first()?.trim();
    if first.is_empty() || segment::header_kind(first).is_some() {
        return None;
    }

    let mut certification = Certification::default();
    let mut strength = STRENGTH_POSITIONAL;

    // Comma-delimited single-line entries keep only the leading field as the
    // name; the rest is scanned for issuer/date/id below.
    let name_line = patterns::strip_bullet(first);
    let name = name_line
        .split(&[',', '|'][..])
        .next()
        .unwrap_or(name_line)
        .trim();
    if name.is_empty() {
        return None;
    }
    certification.name = Some(name.to_string());

    for (idx, line) in block.iter().enumerate() {
        let line = line.trim();

        // Issuer: labeled patterns first, then a plausible second line.
        if certification.issuer.is_none() {
            let search = if idx == 0 {
                name_line.get(name.len()..).unwrap_or("")
            } else {
                line
            };
            for pattern in ISSUER_PATTERNS.iter() {
                if let Some(caps) = pattern.captures(search) {
                    certification.issuer = Some(caps[1].trim().to_string());
                    strength = STRENGTH_LABELED;
                    break;
                }
            }
            if certification.issuer.is_none()
                && idx == 1
                && !line.contains(':')
                && !patterns::DIGIT_RUN.is_match(line)
                && line.split_whitespace().count() >= 2
            {
                certification.issuer = Some(line.to_string());
            }
        }

        // Dates behind explicit labels; expiry is checked first so "valid
        // until" is never read as an issue date.
        if EXPIRY_LABEL.is_match(line) {
            if certification.expiry_date.is_none() {
                certification.expiry_date = dates.parse_date(line);
            }
        } else if ISSUE_DATE_LABEL.is_match(line) {
            if certification.date_issued.is_none() {
                certification.date_issued = dates.parse_date(line);
            }
        }

        if certification.credential_id.is_none() {
            if let Some(caps) = CREDENTIAL_ID.captures(line) {
                certification.credential_id = Some(caps[1].to_string());
            } else if let Some(caps) = BARE_ID.captures(line) {
                certification.credential_id = Some(caps[1].to_string());
            }
        }
    }

    // Unlabeled date fallback: the first date anywhere is the issue date.
    if certification.date_issued.is_none() && certification.expiry_date.is_none() {
        certification.date_issued = block.iter().find_map(|l| dates.parse_date(l));
    }

    Some((certification, strength))
}
