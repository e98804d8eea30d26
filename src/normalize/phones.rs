//! Phone number normalization.
//!
//! Candidates are located by a small ordered pattern list, validated by digit
//! count (and US area-code rules for 10/11-digit numbers), and formatted into
//! a canonical string. Implausible digit counts yield `None`.

use once_cell::sync::Lazy;
use regex::Regex;

static CANDIDATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        // US shapes: (123) 456-7890, 123-456-7890, 123.456.7890
        Regex::new(r"\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").unwrap(),
        // International with country code: +1 123 456 7890
        Regex::new(r"\+\d{1,3}[-.\s]?\d{3}[-.\s]?\d{3}[-.\s]?\d{4}").unwrap(),
        // General international: +XX XXXXXXXXX
        Regex::new(r"\+\d{1,3}[-.\s]?\d{4,14}").unwrap(),
        // Bare 10-digit run
        Regex::new(r"\b\d{10}\b").unwrap(),
    ]
});

pub struct PhoneNormalizer;

impl PhoneNormalizer {
    /// Finds phone-number candidates in document order, deduplicated.
    pub fn extract_candidates(text: &str) -> Vec<String> {
        let mut found: Vec<(usize, String)> = Vec::new();
        for pattern in CANDIDATE_PATTERNS.iter() {
            for m in pattern.find_iter(text) {
                let digits = digit_count(m.as_str());
                if (7..=15).contains(&digits) {
                    found.push((m.start(), m.as_str().trim().to_string()));
                }
            }
        }
        found.sort_by_key(|(start, _)| *start);

        let mut unique = Vec::new();
        for (_, candidate) in found {
            if !unique.contains(&candidate) {
                unique.push(candidate);
            }
        }
        unique
    }

    /// Digit-count and US-prefix validation.
    pub fn validate(raw: &str) -> bool {
        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
        if !(7..=15).contains(&digits.len()) {
            return false;
        }
        let bytes = digits.as_bytes();
        match digits.len() {
            // US: area code and exchange must not start with 0 or 1.
            10 => !matches!(bytes[0], b'0' | b'1') && !matches!(bytes[3], b'0' | b'1'),
            11 if bytes[0] == b'1' => {
                !matches!(bytes[1], b'0' | b'1') && !matches!(bytes[4], b'0' | b'1')
            }
            _ => true,
        }
    }

    /// Canonical formatting: `(nnn) nnn-nnnn` for US numbers, `+1 (nnn)
    /// nnn-nnnn` with a country code, `+<digits>` otherwise.
    pub fn format(raw: &str) -> Option<String> {
        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
        match digits.len() {
            10 => Some(format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..])),
            11 if digits.starts_with('1') => Some(format!(
                "+1 ({}) {}-{}",
                &digits[1..4],
                &digits[4..7],
                &digits[7..]
            )),
            7..=15 if raw.trim_start().starts_with('+') => Some(format!("+{digits}")),
            7..=15 => Some(digits),
            _ => None,
        }
    }

    /// Validates and formats in one step.
    pub fn normalize(raw: &str) -> Option<String> {
        if Self::validate(raw) {
            Self::format(raw)
        } else {
            None
        }
    }
}

fn digit_count(s: &str) -> usize {
    s.chars().filter(|c| c.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_us_formats() {
        for raw in ["(555) 867-5309", "555-867-5309", "555.867.5309", "5558675309"] {
            assert_eq!(PhoneNormalizer::normalize(raw).as_deref(), Some("(555) 867-5309"));
        }
    }

    #[test]
    fn test_normalizes_with_country_code() {
        assert_eq!(
            PhoneNormalizer::normalize("+1 555 867 5309").as_deref(),
            Some("+1 (555) 867-5309")
        );
    }

    #[test]
    fn test_rejects_implausible_digit_counts() {
        assert_eq!(PhoneNormalizer::normalize("12345"), None);
        assert_eq!(PhoneNormalizer::normalize("12345678901234567890"), None);
    }

    #[test]
    fn test_rejects_bad_us_prefixes() {
        assert!(!PhoneNormalizer::validate("055-867-5309"));
        // Exchange starting with 0/1 fails strict validation; callers may
        // still format such numbers canonically at lower confidence.
        assert!(!PhoneNormalizer::validate("555-123-4567"));
        assert_eq!(
            PhoneNormalizer::format("555-123-4567").as_deref(),
            Some("(555) 123-4567")
        );
        assert!(PhoneNormalizer::validate("555-867-5309"));
    }

    #[test]
    fn test_extracts_candidates_in_document_order() {
        let text = "home (555) 123-4567\nwork 555.987.6543";
        let found = PhoneNormalizer::extract_candidates(text);
        assert_eq!(found.len(), 2);
        assert!(found[0].contains("123"));
        assert!(found[1].contains("987"));
    }

    #[test]
    fn test_no_candidates_in_plain_text() {
        assert!(PhoneNormalizer::extract_candidates("no numbers here").is_empty());
    }
}
