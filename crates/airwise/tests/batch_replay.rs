mod common;

use airwise_chat::{read_queries, BatchRunner, LatencySummary, PromptMode};
use airwise_core::{Config, MINIMAL_SYSTEM_PROMPT};
use airwise_data::DatasetLoader;
use airwise_telemetry::{
    read_records, BatchRecord, BatchStatus, DataFiles, TranscriptRecord, TranscriptRole,
};
use common::{write_dataset, MockClient};
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_batch_over_grounded_prompt() {
    let temp = TempDir::new().unwrap();
    write_dataset(temp.path());
    let dataset = DatasetLoader::new(DataFiles::in_dir(temp.path()))
        .load()
        .unwrap();
    let context = dataset.grounding(&Config::new());

    let queries_path = temp.path().join("queries.txt");
    std::fs::write(
        &queries_path,
        "Which city has the worst AQI?\n\nIs Bandra safe today?\nWhat does Severe mean?\n",
    )
    .unwrap();
    let queries = read_queries(&queries_path).unwrap();
    assert_eq!(queries.len(), 3);

    let results = temp.path().join("batch_results.csv");
    let transcript = temp.path().join("chat_log.csv");
    let client = MockClient::new(vec![
        MockClient::ok("Delhi, at 420.", 1.0),
        MockClient::rate_limited(),
        MockClient::ok("Severe means AQI above 400.", 3.0),
    ]);

    let report = BatchRunner::new(&client, PromptMode::Grounded(&context))
        .with_delay(Duration::ZERO)
        .with_results_log(&results)
        .with_transcript(&transcript)
        .run(&queries);

    let statuses: Vec<BatchStatus> = report.results.iter().map(|r| r.status).collect();
    assert_eq!(
        statuses,
        vec![BatchStatus::Success, BatchStatus::Failure, BatchStatus::Success]
    );
    assert!(client
        .prompts
        .borrow()
        .iter()
        .all(|(system, _)| *system == context.system_prompt()));

    let summary = report.summary();
    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.mean, Some(2.0));

    // The results log alone reproduces the summary
    let logged: Vec<BatchRecord> = read_records(&results).unwrap();
    assert_eq!(logged.len(), 3);
    assert_eq!(logged[1].latency_seconds, -1.0);
    assert!(logged[1].response_text.starts_with("API_ERROR:"));
    assert_eq!(LatencySummary::from_records(&logged), summary);

    let header = std::fs::read_to_string(&results).unwrap();
    assert!(header.starts_with("query_id,query_text,response_text,latency_seconds,status\n"));

    let turns: Vec<TranscriptRecord> = read_records(&transcript).unwrap();
    assert_eq!(turns.len(), 6);
    assert!(turns
        .iter()
        .all(|t| matches!(t.role, TranscriptRole::BatchUser | TranscriptRole::BatchAssistant)));
}

#[test]
fn test_minimal_prompt_needs_no_dataset() {
    let temp = TempDir::new().unwrap();
    let results = temp.path().join("batch_results.csv");
    let client = MockClient::new(vec![MockClient::ok("fast", 0.2)]);

    let report = BatchRunner::new(&client, PromptMode::Minimal)
        .with_delay(Duration::ZERO)
        .with_results_log(&results)
        .run(&["Is PM2.5 harmful?".to_string()]);

    assert_eq!(report.results[0].latency_seconds, 0.2);
    assert_eq!(client.prompts.borrow()[0].0, MINIMAL_SYSTEM_PROMPT);
    assert!(!temp.path().join("city_day.csv").exists());
}

#[test]
fn test_rerun_truncates_results_log() {
    let temp = TempDir::new().unwrap();
    let results = temp.path().join("batch_results.csv");

    for _ in 0..2 {
        let client = MockClient::new(vec![MockClient::ok("a", 0.1), MockClient::ok("b", 0.1)]);
        BatchRunner::new(&client, PromptMode::Minimal)
            .with_delay(Duration::ZERO)
            .with_results_log(&results)
            .run(&["q1".to_string(), "q2".to_string()]);
    }

    let logged: Vec<BatchRecord> = read_records(&results).unwrap();
    assert_eq!(logged.len(), 2);
}
