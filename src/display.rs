use std::io::{self, Write};

use crate::models::job::JobRecord;

/// One block per record: title, employer line, posting date and the link.
pub fn render<W: Write>(out: &mut W, records: &[JobRecord]) -> io::Result<()> {
    if records.is_empty() {
        return writeln!(out, "No jobs found");
    }

    for (index, job) in records.iter().enumerate() {
        writeln!(out, "{:>3}. {}", index + 1, job.title)?;
        writeln!(out, "     {} - {}", job.company, job.location)?;
        if !job.date_posted.is_empty() {
            writeln!(out, "     Posted: {}", job.date_posted)?;
        }
        writeln!(out, "     {}", job.url)?;
    }
    writeln!(out)?;
    writeln!(out, "Found {} jobs", records.len())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn renders_one_block_per_record() {
        let records = vec![
            JobRecord {
                keyword: "Rust".to_string(),
                job_id: "1".to_string(),
                title: "Rust Developer".to_string(),
                company: "Acme".to_string(),
                location: "Remote".to_string(),
                url: "https://www.linkedin.com/jobs/view/1".to_string(),
                date_posted: "2025-02-01".to_string(),
                scrape_time: Utc::now(),
            },
            JobRecord {
                keyword: "Rust".to_string(),
                job_id: "indeed-fallback".to_string(),
                title: "Search Rust jobs on Indeed".to_string(),
                company: "Indeed".to_string(),
                location: "Various locations".to_string(),
                url: "https://www.indeed.com/jobs?q=Rust&l=".to_string(),
                date_posted: String::new(),
                scrape_time: Utc::now(),
            },
        ];

        let mut out = Vec::new();
        render(&mut out, &records).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("  1. Rust Developer\n     Acme - Remote\n     Posted: 2025-02-01\n"));
        assert!(text.contains("  2. Search Rust jobs on Indeed\n     Indeed - Various locations\n     https://"));
        assert!(text.ends_with("Found 2 jobs\n"));
    }

    #[test]
    fn empty_results_say_so() {
        let mut out = Vec::new();
        render(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No jobs found\n");
    }
}
