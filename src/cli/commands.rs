use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;
use walkdir::WalkDir;

use resume_parser::enhance::{enhance_or_keep, HttpEnhancer, ResumeEnhancer};
use resume_parser::{
    ingest, ParserConfig, Resume, ResumeParser, SectionSegmenter, SkillTaxonomy, TextNormalizer,
};

#[derive(Parser)]
#[command(name = "resume-parser")]
#[command(about = "Parses resumes into structured, confidence-scored records")]
#[command(version)]
#[command(after_long_help = r#"
EXAMPLES:
    # Parse a single resume to JSON
    resume-parser parse resume.txt

    # Human-readable summary with confidence scores
    resume-parser parse resume.pdf --format text

    # Parse with LLM enhancement from a local Ollama endpoint
    resume-parser parse resume.txt --llm http://localhost:11434/api/generate

    # Parse a whole directory in parallel and write a report
    resume-parser batch ./resumes --output report.json

    # Inspect detected section boundaries
    resume-parser sections resume.txt
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Custom skill taxonomy JSON file ({"category": ["keyword", ...]})
    #[arg(long, global = true)]
    pub taxonomy: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a single resume file
    Parse {
        /// Path to the resume file
        file: PathBuf,

        /// Output format: json or text
        #[arg(long, default_value = "json")]
        format: String,

        /// LLM endpoint for optional enhancement (Ollama-style generate API)
        #[arg(long)]
        llm: Option<String>,

        /// Model name passed to the LLM endpoint
        #[arg(long, default_value = "llama3")]
        llm_model: String,
    },

    /// Parse every supported file in a directory and write a report
    Batch {
        /// Directory to scan
        dir: PathBuf,

        /// Report output path
        #[arg(long, default_value = "report.json")]
        output: PathBuf,

        /// Number of worker threads (defaults to all cores)
        #[arg(long)]
        jobs: Option<usize>,
    },

    /// Show detected section boundaries for a file
    Sections {
        /// Path to the resume file
        file: PathBuf,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let taxonomy = match &cli.taxonomy {
        Some(path) => SkillTaxonomy::from_json_file(path)
            .with_context(|| format!("loading taxonomy from {}", path.display()))?,
        None => SkillTaxonomy::default(),
    };
    let parser = ResumeParser::with_config(ParserConfig { taxonomy, date_hints: Vec::new() });

    match cli.command {
        Commands::Parse { file, format, llm, llm_model } => {
            parse_one(&parser, &file, &format, llm.as_deref(), &llm_model)
        }
        Commands::Batch { dir, output, jobs } => batch(&parser, &dir, &output, jobs),
        Commands::Sections { file } => show_sections(&file),
    }
}

fn parse_one(
    parser: &ResumeParser,
    file: &Path,
    format: &str,
    llm: Option<&str>,
    llm_model: &str,
) -> anyhow::Result<()> {
    let text = ingest::extract_text(file)?;
    let resume = parser.parse_text(&text);

    let enhancer = llm.map(|endpoint| HttpEnhancer::new(endpoint, llm_model));
    let resume = enhance_or_keep(
        enhancer.as_ref().map(|e| e as &dyn ResumeEnhancer),
        &text,
        resume,
    );

    match format {
        "text" => print_summary(&resume),
        _ => println!("{}", serde_json::to_string_pretty(&resume)?),
    }
    Ok(())
}

fn print_summary(resume: &Resume) {
    println!("Contact: {}", resume.contact_summary());
    if let Some(summary) = &resume.summary {
        println!("Summary: {summary}");
    }
    println!(
        "Entries: {} experience, {} education, {} skills, {} projects, {} certifications",
        resume.experience.len(),
        resume.education.len(),
        resume.skills.len(),
        resume.projects.len(),
        resume.certifications.len(),
    );
    if !resume.languages.is_empty() {
        println!("Languages: {}", resume.languages.join(", "));
    }
    println!("Confidence:");
    for (section, score) in &resume.confidence {
        println!("  {section:<16} {score:.2}");
    }
}

#[derive(Serialize)]
struct FileReport {
    path: String,
    overall_confidence: f64,
    sections_found: Vec<String>,
    name: Option<String>,
    email: Option<String>,
    error: Option<String>,
}

#[derive(Serialize)]
struct BatchReport {
    processed: usize,
    succeeded: usize,
    failed: usize,
    average_confidence: f64,
    files: Vec<FileReport>,
}

fn batch(
    parser: &ResumeParser,
    dir: &Path,
    output: &Path,
    jobs: Option<usize>,
) -> anyhow::Result<()> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .map(|e| ingest::SUPPORTED_EXTENSIONS.contains(&e.to_lowercase().as_str()))
                .unwrap_or(false)
        })
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("no supported resume files under {}", dir.display());
    }
    info!(count = files.len(), "parsing resumes");

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
            .expect("valid progress template"),
    );

    let process = |path: &PathBuf| -> FileReport {
        let report = match parser.parse_file(path) {
            Ok(resume) => FileReport {
                path: path.display().to_string(),
                overall_confidence: resume.metadata.overall_confidence,
                sections_found: resume.metadata.sections_found.clone(),
                name: resume.contact_info.name.clone(),
                email: resume.contact_info.email.clone(),
                error: None,
            },
            Err(e) => FileReport {
                path: path.display().to_string(),
                overall_confidence: 0.0,
                sections_found: Vec::new(),
                name: None,
                email: None,
                error: Some(e.to_string()),
            },
        };
        progress.inc(1);
        report
    };

    // One parse invocation per file; the engine is stateless, so rayon can
    // fan out without any locking.
    let reports: Vec<FileReport> = match jobs {
        Some(n) => rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build()
            .context("building worker pool")?
            .install(|| files.par_iter().map(process).collect()),
        None => files.par_iter().map(process).collect(),
    };
    progress.finish_and_clear();

    let succeeded = reports.iter().filter(|r| r.error.is_none()).count();
    let confidences: Vec<f64> = reports
        .iter()
        .filter(|r| r.error.is_none())
        .map(|r| r.overall_confidence)
        .collect();
    let average_confidence = if confidences.is_empty() {
        0.0
    } else {
        confidences.iter().sum::<f64>() / confidences.len() as f64
    };

    let report = BatchReport {
        processed: reports.len(),
        succeeded,
        failed: reports.len() - succeeded,
        average_confidence,
        files: reports,
    };
    fs::write(output, serde_json::to_string_pretty(&report)?)
        .with_context(|| format!("writing report to {}", output.display()))?;

    println!(
        "Parsed {} files ({} failed), average confidence {:.2}; report: {}",
        report.processed,
        report.failed,
        report.average_confidence,
        output.display()
    );
    Ok(())
}

fn show_sections(file: &Path) -> anyhow::Result<()> {
    let text = ingest::extract_text(file)?;
    let normalized = TextNormalizer::normalize(&text);
    let sections = SectionSegmenter::segment(&normalized);

    if sections.is_empty() {
        println!("no sections detected");
        return Ok(());
    }
    for section in &sections {
        println!(
            "{:>5}  {:<15} {:<30} {} lines",
            section.start_line,
            section.kind.as_str(),
            section.header.as_deref().unwrap_or("(implicit)"),
            section.lines.iter().filter(|l| !l.trim().is_empty()).count(),
        );
    }
    Ok(())
}
