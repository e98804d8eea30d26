//! Skill category configuration.
//!
//! An immutable category -> keyword mapping supplied to the skills extractor
//! at construction time. Callers wanting custom categories build a new
//! taxonomy instead of mutating shared state, which keeps parallel parsing
//! deterministic.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ParserError, Result};

#[derive(Debug, Clone)]
pub struct SkillTaxonomy {
    /// Ordered (category, keywords) pairs; lookup respects this order.
    categories: Vec<(String, Vec<String>)>,
}

impl Default for SkillTaxonomy {
    fn default() -> Self {
        let builtin: &[(&str, &[&str])] = &[
            (
                "programming",
                &[
                    "python", "java", "javascript", "typescript", "c++", "c#", "ruby", "go",
                    "rust", "php", "swift", "kotlin", "scala", "r", "matlab", "perl", "bash",
                    "shell", "powershell", "objective-c", "dart", "lua", "haskell", "erlang",
                    "clojure", "elixir", "julia", "fortran", "cobol",
                ],
            ),
            (
                "web",
                &[
                    "html", "css", "react", "angular", "vue", "node.js", "express", "django",
                    "flask", "spring", "rails", "asp.net", "jquery", "bootstrap", "sass",
                    "webpack", "next.js", "svelte", "laravel", "fastapi", "graphql", "rest",
                    "websocket",
                ],
            ),
            (
                "database",
                &[
                    "sql", "mysql", "postgresql", "mongodb", "redis", "oracle", "sqlite",
                    "cassandra", "dynamodb", "elasticsearch", "neo4j", "firebase", "mariadb",
                    "snowflake", "redshift", "bigquery", "memcached", "influxdb",
                ],
            ),
            (
                "cloud",
                &[
                    "aws", "azure", "gcp", "docker", "kubernetes", "terraform", "ansible",
                    "jenkins", "circleci", "gitlab", "github actions", "puppet", "chef",
                    "vagrant", "consul", "vault", "istio", "helm", "prometheus", "grafana",
                    "datadog", "cloudformation", "openstack", "heroku", "netlify", "vercel",
                ],
            ),
            (
                "data",
                &[
                    "pandas", "numpy", "scikit-learn", "tensorflow", "pytorch", "keras",
                    "spark", "hadoop", "tableau", "powerbi", "looker", "sas", "spss",
                    "jupyter", "matplotlib", "seaborn", "plotly", "nltk", "spacy", "opencv",
                    "airflow", "dask", "mlflow", "xgboost", "lightgbm",
                ],
            ),
            (
                "tools",
                &[
                    "git", "jira", "confluence", "slack", "trello", "asana", "figma",
                    "sketch", "photoshop", "illustrator", "notion", "linear", "bitbucket",
                    "subversion", "mercurial", "visual studio", "vscode", "intellij",
                    "eclipse", "vim", "emacs", "postman", "wireshark",
                ],
            ),
        ];
        Self {
            categories: builtin
                .iter()
                .map(|(category, keywords)| {
                    (
                        category.to_string(),
                        keywords.iter().map(|k| k.to_string()).collect(),
                    )
                })
                .collect(),
        }
    }
}

impl SkillTaxonomy {
    /// Builds a taxonomy from explicit (category, keywords) pairs.
    pub fn from_pairs(pairs: Vec<(String, Vec<String>)>) -> Result<Self> {
        if pairs.is_empty() {
            return Err(ParserError::InvalidTaxonomy("no categories defined".to_string()));
        }
        for (category, keywords) in &pairs {
            if category.trim().is_empty() {
                return Err(ParserError::InvalidTaxonomy("empty category name".to_string()));
            }
            if keywords.is_empty() {
                return Err(ParserError::InvalidTaxonomy(format!(
                    "category '{category}' has no keywords"
                )));
            }
        }
        let categories = pairs
            .into_iter()
            .map(|(category, keywords)| {
                (
                    category.to_lowercase(),
                    keywords.into_iter().map(|k| k.to_lowercase()).collect(),
                )
            })
            .collect();
        Ok(Self { categories })
    }

    /// Loads a `{ "category": ["keyword", ...] }` JSON file. Categories are
    /// ordered alphabetically for determinism.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let map: BTreeMap<String, Vec<String>> = serde_json::from_str(&raw)
            .map_err(|e| ParserError::InvalidTaxonomy(e.to_string()))?;
        Self::from_pairs(map.into_iter().collect())
    }

    /// Iterates categories in configured order.
    pub fn categories(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.categories
            .iter()
            .map(|(category, keywords)| (category.as_str(), keywords.as_slice()))
    }

    /// Resolves the category of a skill token: exact keyword match first,
    /// then word-boundary containment, in category order.
    pub fn category_of(&self, token: &str) -> Option<&str> {
        let lower = token.to_lowercase();
        for (category, keywords) in &self.categories {
            if keywords.iter().any(|k| k == &lower) {
                return Some(category);
            }
        }
        for (category, keywords) in &self.categories {
            if keywords.iter().any(|k| keyword_in(&lower, k)) {
                return Some(category);
            }
        }
        None
    }

    /// Resolves a labeled sub-list header ("Databases:", "Cloud:") to a
    /// category by name match.
    pub fn category_for_label(&self, label: &str) -> Option<&str> {
        let lower = label.to_lowercase();
        self.categories
            .iter()
            .map(|(category, _)| category.as_str())
            .find(|category| lower.contains(*category) || category.contains(lower.as_str()))
    }
}

/// Word-boundary containment for lowercase text: the keyword must not be
/// flanked by alphanumerics, so "r" never matches inside "weaving" while
/// "node.js" and "c++" still match as written.
pub fn keyword_in(text_lower: &str, keyword: &str) -> bool {
    let mut start = 0;
    while let Some(pos) = text_lower[start..].find(keyword) {
        let begin = start + pos;
        let end = begin + keyword.len();
        let before_ok =
            begin == 0 || !text_lower.as_bytes()[begin - 1].is_ascii_alphanumeric();
        let after_ok =
            end >= text_lower.len() || !text_lower.as_bytes()[end].is_ascii_alphanumeric();
        if before_ok && after_ok {
            return true;
        }
        start = end;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_in_respects_boundaries() {
        assert!(keyword_in("expert in r and go", "r"));
        assert!(!keyword_in("underwater basket weaving", "r"));
        assert!(keyword_in("node.js services", "node.js"));
    }

    #[test]
    fn test_default_categorizes_known_keywords() {
        let taxonomy = SkillTaxonomy::default();
        assert_eq!(taxonomy.category_of("Python"), Some("programming"));
        assert_eq!(taxonomy.category_of("PostgreSQL"), Some("database"));
        assert_eq!(taxonomy.category_of("made-up-skill"), None);
    }

    #[test]
    fn test_substring_match_is_second_choice() {
        let taxonomy = SkillTaxonomy::default();
        // Exact keyword in another category must win over substring.
        assert_eq!(taxonomy.category_of("react"), Some("web"));
        assert_eq!(taxonomy.category_of("react native"), Some("web"));
    }

    #[test]
    fn test_label_resolution() {
        let taxonomy = SkillTaxonomy::default();
        assert_eq!(taxonomy.category_for_label("Databases"), Some("database"));
        assert_eq!(taxonomy.category_for_label("Cloud & DevOps"), Some("cloud"));
        assert_eq!(taxonomy.category_for_label("Hobbies"), None);
    }

    #[test]
    fn test_rejects_empty_configuration() {
        assert!(SkillTaxonomy::from_pairs(Vec::new()).is_err());
        assert!(SkillTaxonomy::from_pairs(vec![("x".to_string(), Vec::new())]).is_err());
    }
}
