//! Data model for parsed resumes.
//!
//! Every entity is built once by the assembler and never mutated afterwards;
//! the `Resume` is the sole externally visible artifact.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Canonical year-month(-day) representation of a date found in a resume.
///
/// Serialized as `"YYYY"`, `"YYYY-MM"`, or `"YYYY-MM-DD"`. Ordering is
/// chronological; a bare year sorts before any month of that year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalDate {
    pub year: u16,
    pub month: Option<u8>,
    pub day: Option<u8>,
}

impl CanonicalDate {
    pub fn year(year: u16) -> Self {
        Self { year, month: None, day: None }
    }

    pub fn year_month(year: u16, month: u8) -> Self {
        Self { year, month: Some(month), day: None }
    }

    pub fn full(year: u16, month: u8, day: u8) -> Self {
        Self { year, month: Some(month), day: Some(day) }
    }
}

impl fmt::Display for CanonicalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.month, self.day) {
            (Some(m), Some(d)) => write!(f, "{:04}-{:02}-{:02}", self.year, m, d),
            (Some(m), None) => write!(f, "{:04}-{:02}", self.year, m),
            _ => write!(f, "{:04}", self.year),
        }
    }
}

impl FromStr for CanonicalDate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().splitn(3, '-');
        let year = parts
            .next()
            .and_then(|p| p.parse::<u16>().ok())
            .ok_or_else(|| format!("invalid canonical date: {s}"))?;
        let month = match parts.next() {
            Some(p) => Some(p.parse::<u8>().map_err(|_| format!("invalid month in: {s}"))?),
            None => None,
        };
        let day = match parts.next() {
            Some(p) => Some(p.parse::<u8>().map_err(|_| format!("invalid day in: {s}"))?),
            None => None,
        };
        if let Some(m) = month {
            if !(1..=12).contains(&m) {
                return Err(format!("month out of range in: {s}"));
            }
        }
        if let Some(d) = day {
            if !(1..=31).contains(&d) {
                return Err(format!("day out of range in: {s}"));
            }
        }
        Ok(Self { year, month, day })
    }
}

impl Serialize for CanonicalDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CanonicalDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Contact information from the top of a resume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub website: Option<String>,
}

impl ContactInfo {
    /// A contact record is complete when name, email, and phone are all present.
    pub fn is_complete(&self) -> bool {
        self.name.is_some() && self.email.is_some() && self.phone.is_some()
    }
}

/// A single work experience entry, in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<CanonicalDate>,
    pub end_date: Option<CanonicalDate>,
    /// When true, `end_date` is always `None`.
    pub current: bool,
    pub description: Option<String>,
    pub responsibilities: Vec<String>,
}

/// An education entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub degree: Option<String>,
    pub institution: Option<String>,
    /// Field of study (major).
    pub field: Option<String>,
    pub location: Option<String>,
    pub graduation_date: Option<CanonicalDate>,
    /// Advisory range 0.0-4.0; out-of-range values are kept as-is.
    pub gpa: Option<f64>,
    pub honors: Option<String>,
}

/// A skill with optional category and proficiency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub category: Option<String>,
    pub proficiency: Option<String>,
}

/// A project entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: Option<String>,
    pub description: Option<String>,
    pub technologies: Vec<String>,
    pub url: Option<String>,
    pub start_date: Option<CanonicalDate>,
    pub end_date: Option<CanonicalDate>,
}

/// A certification entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub name: Option<String>,
    pub issuer: Option<String>,
    pub date_issued: Option<CanonicalDate>,
    pub expiry_date: Option<CanonicalDate>,
    pub credential_id: Option<String>,
}

/// Metadata describing how the extraction went.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionMetadata {
    /// Section kinds found via explicit headers, in document order.
    pub sections_found: Vec<String>,
    pub text_length: usize,
    pub line_count: usize,
    pub has_name: bool,
    pub has_email: bool,
    pub has_phone: bool,
    pub experience_count: usize,
    pub education_count: usize,
    pub skill_count: usize,
    pub project_count: usize,
    pub certification_count: usize,
    pub overall_confidence: f64,
    /// Set when a section had to be emitted degraded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Complete parsed resume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resume {
    pub contact_info: ContactInfo,
    pub summary: Option<String>,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
    pub certifications: Vec<Certification>,
    /// Detected spoken languages.
    pub languages: Vec<String>,
    /// Section name -> confidence in [0,1]; also carries an `overall` key.
    pub confidence: BTreeMap<String, f64>,
    pub metadata: ExtractionMetadata,
    /// Original input text, kept verbatim.
    pub raw_text: String,
}

impl Resume {
    /// One-line `name | email | phone` summary of whatever contact fields exist.
    pub fn contact_summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(name) = &self.contact_info.name {
            parts.push(name.as_str());
        }
        if let Some(email) = &self.contact_info.email {
            parts.push(email.as_str());
        }
        if let Some(phone) = &self.contact_info.phone {
            parts.push(phone.as_str());
        }
        parts.join(" | ")
    }

    /// Recomputes the per-section entry counts after sections were replaced.
    pub fn refresh_counts(&mut self) {
        self.metadata.has_name = self.contact_info.name.is_some();
        self.metadata.has_email = self.contact_info.email.is_some();
        self.metadata.has_phone = self.contact_info.phone.is_some();
        self.metadata.experience_count = self.experience.len();
        self.metadata.education_count = self.education.len();
        self.metadata.skill_count = self.skills.len();
        self.metadata.project_count = self.projects.len();
        self.metadata.certification_count = self.certifications.len();
    }
}
