//! Parse-throughput benchmarks.
//!
//! Run with: `cargo bench --bench parsing`

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use resume_parser::ResumeParser;

const SMALL_RESUME: &str = "\
John Smith
john.smith@email.com
(555) 123-4567
";

fn full_resume() -> String {
    let mut text = String::from(
        "JANE DOE\njane.doe@email.com\n(555) 867-5309\nAustin, TX\n\nSUMMARY\n\
         Backend engineer with eight years of experience building distributed systems.\n\n\
         EXPERIENCE\n",
    );
    for i in 0..20 {
        text.push_str(&format!(
            "Software Engineer at Company{i}\n01/20{:02} - 12/20{:02}\n\
             • Led development of services\n• Reduced costs\n\n",
            i % 20, (i + 1) % 20
        ));
    }
    text.push_str(
        "EDUCATION\nBachelor of Science in Computer Science\nState University\nGPA: 3.8/4.0\n\n\
         SKILLS\nProgramming: Python, Rust, Go, Java, TypeScript\nDatabases: PostgreSQL, Redis\n",
    );
    text
}

fn bench_parse(c: &mut Criterion) {
    let parser = ResumeParser::new();
    let large = full_resume();

    c.bench_function("parse_small_resume", |b| {
        b.iter(|| parser.parse_text(black_box(SMALL_RESUME)))
    });

    c.bench_function("parse_full_resume", |b| {
        b.iter(|| parser.parse_text(black_box(&large)))
    });
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
