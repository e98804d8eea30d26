//! Spoken language extraction.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::extract::SectionOutcome;
use crate::taxonomy::keyword_in;

/// Fixed set of recognized language names.
const KNOWN_LANGUAGES: &[&str] = &[
    "english",
    "spanish",
    "french",
    "german",
    "italian",
    "portuguese",
    "russian",
    "chinese",
    "mandarin",
    "cantonese",
    "japanese",
    "korean",
    "arabic",
    "hindi",
    "dutch",
    "swedish",
    "norwegian",
    "danish",
    "polish",
    "turkish",
    "greek",
    "hebrew",
    "punjabi",
    "bengali",
    "urdu",
    "vietnamese",
    "thai",
    "tagalog",
];

/// `Fluent: Spanish` / `Native English` style lines.
static PROFICIENCY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:native|fluent|proficient|basic|intermediate|advanced|conversational)\b:?\s*([A-Za-z]+)",
    )
    .unwrap()
});

pub struct LanguagesExtractor;

impl LanguagesExtractor {
    /// Returns language names in discovery order, deduplicated. Only names
    /// from the fixed set are accepted; proficiency adjectives merely help
    /// locate them.
    pub fn extract(lines: &[String]) -> SectionOutcome<String> {
        let text = lines.join("\n");
        let text_lower = text.to_lowercase();
        let mut languages: Vec<String> = Vec::new();

        let mut found: Vec<(usize, &str)> = Vec::new();
        for language in KNOWN_LANGUAGES {
            if keyword_in(&text_lower, language) {
                if let Some(pos) = text_lower.find(language) {
                    found.push((pos, language));
                }
            }
        }
        found.sort_by_key(|(pos, _)| *pos);
        for (_, language) in found {
            push_unique(&mut languages, capitalize(language));
        }

        for caps in PROFICIENCY.captures_iter(&text) {
            let candidate = caps[1].to_lowercase();
            if KNOWN_LANGUAGES.contains(&candidate.as_str()) {
                push_unique(&mut languages, capitalize(&candidate));
            }
        }

        if languages.is_empty() {
            return SectionOutcome::empty();
        }
        SectionOutcome {
            entries: languages,
            completeness: 1.0,
            pattern_strength: 1.0,
        }
    }
}

fn push_unique(languages: &mut Vec<String>, language: String) {
    if !languages.contains(&language) {
        languages.push(language);
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Vec<String> {
        let lines: Vec<String> = text.lines().map(str::to_string).collect();
        LanguagesExtractor::extract(&lines).entries
    }

    #[test]
    fn test_known_languages_in_order() {
        assert_eq!(
            extract("English (native), Spanish (fluent), German (basic)"),
            vec!["English", "Spanish", "German"]
        );
    }

    #[test]
    fn test_proficiency_labels() {
        assert_eq!(extract("Native: English\nConversational: Japanese"), vec![
            "English", "Japanese"
        ]);
    }

    #[test]
    fn test_unknown_words_are_not_languages() {
        assert!(extract("Fluent: Klingon").is_empty());
    }

    #[test]
    fn test_dedup() {
        assert_eq!(extract("English, english\nFluent English"), vec!["English"]);
    }
}
