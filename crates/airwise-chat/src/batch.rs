//! Sequential batch replay with latency capture

use crate::client::ChatClient;
use airwise_core::{GroundingContext, MINIMAL_SYSTEM_PROMPT};
use airwise_telemetry::{
    append_record, start_log, BatchRecord, BatchStatus, TranscriptRecord, TranscriptRole,
};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const DEFAULT_DELAY: Duration = Duration::from_millis(100);
const PROGRESS_EVERY: usize = 50;
const FAILED_LATENCY: f64 = -1.0;

/// Which system prompt accompanies each query
#[derive(Debug, Clone, Copy)]
pub enum PromptMode<'a> {
    /// Dataset-grounded prompt, same as the interactive session
    Grounded(&'a GroundingContext),
    /// One-line prompt for raw endpoint latency
    Minimal,
}

impl PromptMode<'_> {
    pub fn system_prompt(&self) -> String {
        match self {
            PromptMode::Grounded(context) => context.system_prompt(),
            PromptMode::Minimal => MINIMAL_SYSTEM_PROMPT.to_string(),
        }
    }
}

/// Trimmed, non-blank lines
pub fn parse_queries(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

pub fn read_queries(path: &Path) -> std::io::Result<Vec<String>> {
    Ok(parse_queries(&std::fs::read_to_string(path)?))
}

pub struct BatchRunner<C> {
    client: C,
    system_prompt: String,
    delay: Duration,
    results_log: Option<PathBuf>,
    transcript: Option<PathBuf>,
}

impl<C: ChatClient> BatchRunner<C> {
    pub fn new(client: C, mode: PromptMode<'_>) -> Self {
        Self {
            client,
            system_prompt: mode.system_prompt(),
            delay: DEFAULT_DELAY,
            results_log: None,
            transcript: None,
        }
    }

    /// Pause between consecutive calls
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Truncated and given a header at run start, then one row per query
    pub fn with_results_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.results_log = Some(path.into());
        self
    }

    /// Also log queries and replies as batch_user / batch_assistant turns
    pub fn with_transcript(mut self, path: impl Into<PathBuf>) -> Self {
        self.transcript = Some(path.into());
        self
    }

    pub fn run(&self, queries: &[String]) -> BatchReport {
        if let Some(path) = &self.results_log {
            if let Err(e) = start_log::<BatchRecord>(path) {
                tracing::warn!("could not start results log: {}", e);
            }
        }

        let total = queries.len();
        let mut results = Vec::with_capacity(total);
        for (i, query) in queries.iter().enumerate() {
            if (i + 1) % PROGRESS_EVERY == 0 {
                tracing::info!("processed {}/{} queries", i + 1, total);
            }

            self.log_turn(TranscriptRole::BatchUser, query);
            let record = self.run_one(i + 1, query);
            if let Some(path) = &self.results_log {
                if let Err(e) = append_record(path, &record) {
                    tracing::warn!(query_id = record.query_id, "could not log batch result: {}", e);
                }
            }
            self.log_turn(TranscriptRole::BatchAssistant, &record.response_text);
            results.push(record);

            if i + 1 < total && !self.delay.is_zero() {
                std::thread::sleep(self.delay);
            }
        }

        BatchReport { results }
    }

    fn run_one(&self, query_id: usize, query: &str) -> BatchRecord {
        let start = Instant::now();
        let (response_text, latency_seconds) =
            match self.client.complete(&self.system_prompt, query) {
                Ok(reply) => {
                    let latency = reply
                        .service_time
                        .unwrap_or_else(|| start.elapsed().as_secs_f64());
                    (reply.content, latency)
                }
                Err(e) => {
                    tracing::warn!(query_id, "batch query failed: {}", e);
                    (format!("API_ERROR: {}", e), FAILED_LATENCY)
                }
            };

        BatchRecord {
            query_id,
            query_text: query.to_string(),
            response_text,
            latency_seconds,
            status: BatchStatus::from_latency(latency_seconds),
        }
    }

    fn log_turn(&self, role: TranscriptRole, content: &str) {
        if let Some(path) = &self.transcript {
            if let Err(e) = append_record(path, &TranscriptRecord::new(role, content)) {
                tracing::warn!("Could not log message to CSV: {}", e);
            }
        }
    }
}

/// Per-query results of one run, in input order
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    pub results: Vec<BatchRecord>,
}

impl BatchReport {
    pub fn summary(&self) -> LatencySummary {
        LatencySummary::from_records(&self.results)
    }
}

/// Latency statistics over successful queries only
#[derive(Debug, Clone, PartialEq)]
pub struct LatencySummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
}

impl LatencySummary {
    pub fn from_records(records: &[BatchRecord]) -> Self {
        let mut latencies: Vec<f64> = records
            .iter()
            .filter(|r| r.status == BatchStatus::Success)
            .map(|r| r.latency_seconds)
            .collect();
        latencies.sort_by(f64::total_cmp);

        let succeeded = latencies.len();
        let mean = (succeeded > 0).then(|| latencies.iter().sum::<f64>() / succeeded as f64);
        let median = match succeeded {
            0 => None,
            n if n % 2 == 1 => Some(latencies[n / 2]),
            n => Some((latencies[n / 2 - 1] + latencies[n / 2]) / 2.0),
        };

        Self {
            attempted: records.len(),
            succeeded,
            failed: records.len() - succeeded,
            mean,
            median,
        }
    }
}

impl fmt::Display for LatencySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seconds = |v: Option<f64>| match v {
            Some(v) => format!("{:.3} seconds", v),
            None => "N/A".to_string(),
        };
        write!(
            f,
            "Latency Summary\n===============\n\
             Total queries attempted: {}\n\
             Successful calls: {}\n\
             Failed calls: {}\n\
             Mean TRT: {}\n\
             Median TRT: {}",
            self.attempted,
            self.succeeded,
            self.failed,
            seconds(self.mean),
            seconds(self.median)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_context, ScriptedClient};
    use airwise_telemetry::read_records;
    use tempfile::TempDir;

    fn queries(list: &[&str]) -> Vec<String> {
        list.iter().map(|q| q.to_string()).collect()
    }

    #[test]
    fn test_parse_queries_skips_blank_lines() {
        let text = "What is the worst city's AQI?\n\n   \n  Compare PM2.5 and PM10.  \n";
        assert_eq!(
            parse_queries(text),
            vec!["What is the worst city's AQI?", "Compare PM2.5 and PM10."]
        );
    }

    #[test]
    fn test_read_queries_missing_file() {
        let temp = TempDir::new().unwrap();
        assert!(read_queries(&temp.path().join("nope.txt")).is_err());
    }

    #[test]
    fn test_failure_in_middle_is_recorded_and_run_continues() {
        let client = ScriptedClient::new(vec![
            ScriptedClient::reply("a1", Some(1.0)),
            ScriptedClient::failure(),
            ScriptedClient::reply("a3", Some(3.0)),
        ]);
        let runner = BatchRunner::new(&client, PromptMode::Minimal).with_delay(Duration::ZERO);

        let report = runner.run(&queries(&["q1", "q2", "q3"]));

        let statuses: Vec<_> = report.results.iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![BatchStatus::Success, BatchStatus::Failure, BatchStatus::Success]
        );
        let failed = &report.results[1];
        assert_eq!(failed.latency_seconds, -1.0);
        assert!(failed.response_text.starts_with("API_ERROR:"));
        assert_eq!(failed.query_id, 2);

        let summary = report.summary();
        assert_eq!(summary.attempted, 3);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.mean, Some(2.0));
        assert_eq!(summary.median, Some(2.0));
    }

    #[test]
    fn test_local_elapsed_used_without_service_time() {
        let client = ScriptedClient::new(vec![ScriptedClient::reply("ok", None)]);
        let runner = BatchRunner::new(&client, PromptMode::Minimal).with_delay(Duration::ZERO);

        let report = runner.run(&queries(&["q"]));
        let latency = report.results[0].latency_seconds;
        assert!(latency >= 0.0);
        assert!(latency < 1.0);
        assert_eq!(report.results[0].status, BatchStatus::Success);
    }

    #[test]
    fn test_prompt_modes() {
        let client = ScriptedClient::new(vec![
            ScriptedClient::reply("x", None),
            ScriptedClient::reply("y", None),
        ]);
        let context = sample_context();

        BatchRunner::new(&client, PromptMode::Minimal)
            .with_delay(Duration::ZERO)
            .run(&queries(&["a"]));
        BatchRunner::new(&client, PromptMode::Grounded(&context))
            .with_delay(Duration::ZERO)
            .run(&queries(&["b"]));

        let calls = client.calls.borrow();
        assert_eq!(calls[0].0, MINIMAL_SYSTEM_PROMPT);
        assert_eq!(calls[1].0, context.system_prompt());
    }

    #[test]
    fn test_results_log_written_incrementally() {
        let temp = TempDir::new().unwrap();
        let results = temp.path().join("batch_results.csv");
        let transcript = temp.path().join("chat_log.csv");
        std::fs::write(&results, "old,run\n").unwrap();

        let client = ScriptedClient::new(vec![
            ScriptedClient::reply("fine", Some(0.5)),
            ScriptedClient::failure(),
        ]);
        let report = BatchRunner::new(&client, PromptMode::Minimal)
            .with_delay(Duration::ZERO)
            .with_results_log(&results)
            .with_transcript(&transcript)
            .run(&queries(&["q1", "q2"]));

        let logged: Vec<BatchRecord> = read_records(&results).unwrap();
        assert_eq!(logged, report.results);

        let turns: Vec<TranscriptRecord> = read_records(&transcript).unwrap();
        let roles: Vec<_> = turns.iter().map(|t| t.role).collect();
        assert_eq!(
            roles,
            vec![
                TranscriptRole::BatchUser,
                TranscriptRole::BatchAssistant,
                TranscriptRole::BatchUser,
                TranscriptRole::BatchAssistant,
            ]
        );
    }

    #[test]
    fn test_summary_even_count_median_and_no_successes() {
        let record = |id: usize, latency: f64| BatchRecord {
            query_id: id,
            query_text: String::new(),
            response_text: String::new(),
            latency_seconds: latency,
            status: BatchStatus::from_latency(latency),
        };
        let summary =
            LatencySummary::from_records(&[record(1, 4.0), record(2, 1.0), record(3, 2.0), record(4, 3.0)]);
        assert_eq!(summary.median, Some(2.5));
        assert_eq!(summary.mean, Some(2.5));

        let none = LatencySummary::from_records(&[record(1, -1.0)]);
        assert_eq!(none.succeeded, 0);
        assert_eq!(none.mean, None);
        assert!(none.to_string().contains("Mean TRT: N/A"));
    }

    #[test]
    fn test_empty_batch() {
        let client = ScriptedClient::new(vec![]);
        let report = BatchRunner::new(&client, PromptMode::Minimal).run(&[]);
        assert!(report.results.is_empty());
        assert_eq!(report.summary().attempted, 0);
    }
}
