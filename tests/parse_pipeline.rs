//! End-to-end tests for the parsing pipeline.
//!
//! These exercise the public `ResumeParser` API against whole documents and
//! verify the engine's contract properties: totality, determinism,
//! confidence bounds, and the current-position invariant.

use resume_parser::{DateNormalizer, Resume, ResumeParser};

fn parse(text: &str) -> Resume {
    ResumeParser::new().parse_text(text)
}

const FULL_RESUME: &str = "\
JANE DOE
jane.doe@email.com
(555) 867-5309
Austin, TX
linkedin.com/in/janedoe

SUMMARY
Backend engineer with eight years of experience designing and operating distributed systems at scale.

EXPERIENCE
Senior Software Engineer
Tech Corporation, San Francisco, CA
January 2020 - Present
• Led development of microservices
• Reduced deployment times significantly

Software Engineer at Initech
06/2015 - 12/2019
• Built internal tooling

EDUCATION
Bachelor of Science in Computer Science
State University
Graduated May 2015
GPA: 3.8/4.0

SKILLS
Programming: Python, Rust, Go
Databases: PostgreSQL, Redis

CERTIFICATIONS
AWS Certified Solutions Architect
Amazon Web Services
Issued: March 2022

LANGUAGES
English (native), Spanish (conversational)
";

// ============================================================================
// Concrete scenarios
// ============================================================================

mod scenarios {
    use super::*;

    #[test]
    fn test_contact_only_input() {
        let resume = parse("John Smith\njohn.smith@email.com\n(555) 123-4567");
        assert_eq!(resume.contact_info.name.as_deref(), Some("John Smith"));
        assert_eq!(resume.contact_info.email.as_deref(), Some("john.smith@email.com"));
        assert_eq!(resume.contact_info.phone.as_deref(), Some("(555) 123-4567"));
        assert!(resume.experience.is_empty());
        assert!(resume.education.is_empty());
        assert!(resume.confidence["contact_info"] > 0.5);
    }

    #[test]
    fn test_experience_header_with_structured_entry() {
        let text = "EXPERIENCE\nSenior Software Engineer\nTech Corporation, San Francisco, CA\nJanuary 2020 - Present\n• Led development of microservices";
        let resume = parse(text);
        assert_eq!(resume.experience.len(), 1);
        let entry = &resume.experience[0];
        assert_eq!(entry.title.as_deref(), Some("Senior Software Engineer"));
        assert_eq!(entry.company.as_deref(), Some("Tech Corporation"));
        assert!(entry.location.as_deref().unwrap().contains("San Francisco"));
        assert_eq!(entry.start_date.unwrap().to_string(), "2020-01");
        assert_eq!(entry.end_date, None);
        assert!(entry.current);
        assert!(entry
            .responsibilities
            .iter()
            .any(|r| r.contains("Led development of microservices")));
    }

    #[test]
    fn test_empty_string_input() {
        let resume = parse("");
        assert!(resume.contact_info.name.is_none());
        assert!(resume.summary.is_none());
        assert!(resume.experience.is_empty());
        assert!(resume.education.is_empty());
        assert!(resume.skills.is_empty());
        assert!(resume.metadata.sections_found.is_empty());
        let overall = resume.confidence["overall"];
        assert!(overall >= 0.0 && overall < 0.1);
    }

    #[test]
    fn test_gpa_extraction() {
        let resume = parse("EDUCATION\nBS Computer Science\nState University\nGPA: 3.8/4.0");
        assert_eq!(resume.education.len(), 1);
        assert_eq!(resume.education[0].gpa, Some(3.8));
    }

    #[test]
    fn test_seasonal_date_is_distinct_from_bare_year() {
        let dates = DateNormalizer::new();
        let season = dates.parse_date("Spring 2020").expect("season should parse");
        let bare = dates.parse_date("2020").expect("bare year should parse");
        assert_ne!(season, bare);
        assert_eq!(season.to_string(), "2020-03");
    }

    #[test]
    fn test_full_resume_end_to_end() {
        let resume = parse(FULL_RESUME);

        assert_eq!(resume.contact_info.name.as_deref(), Some("Jane Doe"));
        assert_eq!(resume.contact_info.email.as_deref(), Some("jane.doe@email.com"));
        assert_eq!(resume.contact_info.phone.as_deref(), Some("(555) 867-5309"));
        assert_eq!(resume.contact_info.address.as_deref(), Some("Austin, TX"));
        assert_eq!(
            resume.contact_info.linkedin.as_deref(),
            Some("https://linkedin.com/in/janedoe")
        );
        assert!(resume.contact_info.is_complete());

        assert!(resume.summary.as_deref().unwrap().starts_with("Backend engineer"));

        assert_eq!(resume.experience.len(), 2);
        assert!(resume.experience[0].current);
        assert_eq!(resume.experience[1].company.as_deref(), Some("Initech"));
        assert_eq!(resume.experience[1].end_date.unwrap().to_string(), "2019-12");

        assert_eq!(resume.education.len(), 1);
        let education = &resume.education[0];
        assert_eq!(education.degree.as_deref(), Some("Bachelor of Science"));
        assert_eq!(education.field.as_deref(), Some("Computer Science"));
        assert_eq!(education.institution.as_deref(), Some("State University"));
        assert_eq!(education.gpa, Some(3.8));

        let skill_names: Vec<&str> = resume.skills.iter().map(|s| s.name.as_str()).collect();
        for expected in ["Python", "Rust", "Go", "PostgreSQL", "Redis"] {
            assert!(skill_names.contains(&expected), "missing skill {expected}");
        }
        let python = resume.skills.iter().find(|s| s.name == "Python").unwrap();
        assert_eq!(python.category.as_deref(), Some("programming"));

        assert_eq!(resume.certifications.len(), 1);
        assert_eq!(
            resume.certifications[0].issuer.as_deref(),
            Some("Amazon Web Services")
        );

        assert_eq!(resume.languages, vec!["English", "Spanish"]);

        assert_eq!(
            resume.metadata.sections_found,
            vec!["summary", "experience", "education", "skills", "certifications", "languages"]
        );
        assert_eq!(resume.metadata.experience_count, 2);
        assert!(resume.confidence["experience"] > 0.5);
    }
}

// ============================================================================
// Contract properties
// ============================================================================

mod properties {
    use super::*;

    const INPUTS: &[&str] = &[
        "",
        "   \n \t \n  ",
        "just one line",
        "日本語のレジュメ\n未知の形式",
        "• • •\n-- -- --",
        FULL_RESUME,
    ];

    #[test]
    fn test_totality_and_no_throw() {
        for input in INPUTS {
            let resume = parse(input);
            assert_eq!(resume.raw_text, *input);
            assert!(resume.confidence.contains_key("overall"));
        }
    }

    #[test]
    fn test_determinism() {
        for input in INPUTS {
            let first = serde_json::to_string(&parse(input)).unwrap();
            let second = serde_json::to_string(&parse(input)).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_confidence_bounds_and_overall_mean() {
        for input in INPUTS {
            let resume = parse(input);
            for (section, score) in &resume.confidence {
                assert!(
                    (0.0..=1.0).contains(score),
                    "score for {section} out of bounds: {score}"
                );
            }
            let sections: Vec<f64> = resume
                .confidence
                .iter()
                .filter(|(k, _)| k.as_str() != "overall")
                .map(|(_, v)| *v)
                .collect();
            if !sections.is_empty() {
                let mean = sections.iter().sum::<f64>() / sections.len() as f64;
                assert!((resume.confidence["overall"] - mean).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_current_position_invariant() {
        for input in INPUTS {
            let resume = parse(input);
            for entry in &resume.experience {
                if entry.current {
                    assert_eq!(entry.end_date, None, "current entry must have no end date");
                }
            }
        }
    }

    #[test]
    fn test_serde_round_trip() {
        for input in INPUTS {
            let resume = parse(input);
            let value = serde_json::to_value(&resume).unwrap();
            let back: Resume = serde_json::from_value(value.clone()).unwrap();
            assert_eq!(back, resume);
            assert_eq!(serde_json::to_value(&back).unwrap(), value);
        }
    }
}
