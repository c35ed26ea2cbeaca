use airwise_chat::LatencySummary;
use airwise_telemetry::{read_records, BatchRecord};
use anyhow::Context;
use std::path::Path;

pub fn run(results: &Path) -> anyhow::Result<()> {
    let records: Vec<BatchRecord> = read_records(results)
        .with_context(|| format!("could not read batch results from {}", results.display()))?;
    println!("{}", build_report(&records));
    Ok(())
}

fn build_report(records: &[BatchRecord]) -> String {
    if records.is_empty() {
        return "No batch results recorded yet.".to_string();
    }

    let mut sections = vec![LatencySummary::from_records(records).to_string()];

    let failures: Vec<&BatchRecord> = records.iter().filter(|r| r.latency_seconds < 0.0).collect();
    if !failures.is_empty() {
        let lines: Vec<String> = failures
            .iter()
            .take(10)
            .map(|r| format!("  #{} {}: {}", r.query_id, r.query_text, r.response_text))
            .collect();
        sections.push(format!("\nFailures\n--------\n{}", lines.join("\n")));
    }

    let mut slowest: Vec<&BatchRecord> =
        records.iter().filter(|r| r.latency_seconds >= 0.0).collect();
    slowest.sort_by(|a, b| b.latency_seconds.total_cmp(&a.latency_seconds));
    if !slowest.is_empty() {
        let lines: Vec<String> = slowest
            .iter()
            .take(5)
            .map(|r| format!("  #{} {:.3}s {}", r.query_id, r.latency_seconds, r.query_text))
            .collect();
        sections.push(format!("\nSlowest Queries\n---------------\n{}", lines.join("\n")));
    }

    sections.join("\n")
}
