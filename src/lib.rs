pub mod enhance;
pub mod error;
pub mod extract;
pub mod ingest;
pub mod model;
pub mod normalize;
pub mod parser;
pub mod patterns;
pub mod score;
pub mod segment;
pub mod taxonomy;

pub use error::{ParserError, Result};
pub use model::{
    CanonicalDate, Certification, ContactInfo, Education, Experience, ExtractionMetadata,
    Project, Resume, Skill,
};
pub use normalize::dates::{DateFormat, DateNormalizer, DateToken};
pub use normalize::phones::PhoneNormalizer;
pub use normalize::TextNormalizer;
pub use parser::{ParserConfig, ResumeParser};
pub use score::ConfidenceScorer;
pub use segment::{Section, SectionKind, SectionSegmenter};
pub use taxonomy::SkillTaxonomy;
