use criterion::{Criterion, criterion_group, criterion_main};

use acore::display::format_jobs;
use acore::formatting::preview_text;
use acore::models::{AnalysisResult, Job, JobStatus, Sentiment};

fn sample_jobs(count: usize) -> Vec<Job> {
    (0..count)
        .map(|i| Job {
            job_id: format!("4b1c6c0e-9f4e-4ab1-94a6-{:012}", i),
            status: match i % 4 {
                0 => JobStatus::Pending,
                1 => JobStatus::Processing,
                2 => JobStatus::Completed,
                _ => JobStatus::Error,
            },
            created_at: None,
            updated_at: None,
            text: Some("the service was excellent and the delivery arrived on time".to_string()),
            results: Some(AnalysisResult {
                sentiment: Sentiment::Positive,
                confidence: 0.873,
                keywords: vec!["service".to_string(), "delivery".to_string()],
            }),
        })
        .collect()
}

fn benchmark_format_jobs(c: &mut Criterion) {
    let jobs = sample_jobs(200);
    c.bench_function("format_jobs 200", |b| b.iter(|| format_jobs(&jobs, 40)));
}

fn benchmark_preview_text(c: &mut Criterion) {
    let text = "lorem ipsum dolor sit amet ".repeat(50);
    c.bench_function("preview_text", |b| b.iter(|| preview_text(&text, 40)));
}

criterion_group!(benches, benchmark_format_jobs, benchmark_preview_text);
criterion_main!(benches);
