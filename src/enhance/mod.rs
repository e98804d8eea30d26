//! Optional LLM enhancement collaborator.
//!
//! A provider may replace whole sections of a parsed resume. The regex
//! engine's own result is always authoritative: when no provider is
//! configured, the provider is unreachable, or its output cannot be parsed,
//! the core result is returned unchanged.

use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{ParserError, Result};
use crate::model::{
    Certification, ContactInfo, Education, Experience, Project, Resume, Skill,
};
use crate::score::ConfidenceScorer;

/// Confidence assigned to sections a provider replaced.
const ENHANCED_SCORE: f64 = 0.9;

pub trait ResumeEnhancer {
    fn name(&self) -> &str;
    fn is_available(&self) -> bool;
    fn enhance(&self, text: &str, base: &Resume) -> Result<Resume>;
}

/// Runs the enhancer when one is present and available; every failure path
/// keeps the core result.
pub fn enhance_or_keep(
    enhancer: Option<&dyn ResumeEnhancer>,
    text: &str,
    base: Resume,
) -> Resume {
    let Some(enhancer) = enhancer else {
        return base;
    };
    if !enhancer.is_available() {
        debug!(provider = enhancer.name(), "enhancer not available");
        return base;
    }
    match enhancer.enhance(text, &base) {
        Ok(enhanced) => enhanced,
        Err(e) => {
            warn!(
                provider = enhancer.name(),
                error = %e,
                "enhancement failed, keeping core result"
            );
            base
        }
    }
}

/// Section payload a provider may return; absent or empty sections leave the
/// core result in place.
#[derive(Debug, Default, Deserialize)]
struct EnhancedPayload {
    #[serde(default)]
    contact_info: Option<ContactInfo>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    experience: Vec<Experience>,
    #[serde(default)]
    education: Vec<Education>,
    #[serde(default)]
    skills: Vec<Skill>,
    #[serde(default)]
    projects: Vec<Project>,
    #[serde(default)]
    certifications: Vec<Certification>,
    #[serde(default)]
    languages: Vec<String>,
}

/// Talks to an Ollama-style local HTTP endpoint (`/api/generate`).
pub struct HttpEnhancer {
    endpoint: String,
    model: String,
    client: reqwest::blocking::Client,
}

impl HttpEnhancer {
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap_or_default();
        Self { endpoint: endpoint.into(), model: model.into(), client }
    }

    fn merge(base: &Resume, payload: EnhancedPayload) -> Resume {
        let mut merged = base.clone();
        let mut replaced: Vec<&str> = Vec::new();

        if let Some(contact) = payload.contact_info {
            if contact != ContactInfo::default() {
                merged.contact_info = contact;
                replaced.push("contact_info");
            }
        }
        if let Some(summary) = payload.summary {
            if !summary.trim().is_empty() {
                merged.summary = Some(summary);
                replaced.push("summary");
            }
        }
        if !payload.experience.is_empty() {
            merged.experience = payload.experience;
            replaced.push("experience");
        }
        if !payload.education.is_empty() {
            merged.education = payload.education;
            replaced.push("education");
        }
        if !payload.skills.is_empty() {
            merged.skills = payload.skills;
            replaced.push("skills");
        }
        if !payload.projects.is_empty() {
            merged.projects = payload.projects;
            replaced.push("projects");
        }
        if !payload.certifications.is_empty() {
            merged.certifications = payload.certifications;
            replaced.push("certifications");
        }
        if !payload.languages.is_empty() {
            merged.languages = payload.languages;
            replaced.push("languages");
        }

        // Enforce the current-position invariant on provider output too.
        for experience in &mut merged.experience {
            if experience.current {
                experience.end_date = None;
            }
        }

        for section in &replaced {
            merged.confidence.insert(section.to_string(), ENHANCED_SCORE);
        }
        merged.confidence.remove("overall");
        let overall = ConfidenceScorer::overall(&merged.confidence);
        merged.confidence.insert("overall".to_string(), overall);
        merged.metadata.overall_confidence = overall;
        merged.refresh_counts();
        merged
    }

    fn prompt(text: &str) -> String {
        format!(
            "Extract the following resume into JSON with keys contact_info \
             (name, email, phone, address, linkedin, github, website), summary, \
             experience (title, company, location, start_date, end_date, current, \
             description, responsibilities), education (degree, institution, field, \
             location, graduation_date, gpa, honors), skills (name, category, \
             proficiency), projects, certifications, languages. Dates must be \
             YYYY or YYYY-MM strings. Respond with JSON only.\n\nRESUME:\n{text}"
        )
    }
}

impl ResumeEnhancer for HttpEnhancer {
    fn name(&self) -> &str {
        "http"
    }

    fn is_available(&self) -> bool {
        // Any response means the server is reachable; POST-only endpoints
        // answer GET with an error status.
        self.client.get(&self.endpoint).send().is_ok()
    }

    fn enhance(&self, text: &str, base: &Resume) -> Result<Resume> {
        let body = json!({
            "model": self.model,
            "prompt": Self::prompt(text),
            "stream": false,
            "format": "json",
        });
        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .map_err(|e| ParserError::Enhance(e.to_string()))?;
        if !response.status().is_success() {
            return Err(ParserError::Enhance(format!(
                "endpoint returned {}",
                response.status()
            )));
        }
        let envelope: serde_json::Value = response
            .json()
            .map_err(|e| ParserError::Enhance(e.to_string()))?;
        let raw = envelope
            .get("response")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ParserError::Enhance("missing response field".to_string()))?;
        let payload: EnhancedPayload = serde_json::from_str(raw)
            .map_err(|e| ParserError::Enhance(format!("unparseable payload: {e}")))?;
        Ok(Self::merge(base, payload))
    }
}
