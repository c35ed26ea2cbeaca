mod common;

use airwise_chat::ChatSession;
use airwise_core::{classify, parse_header, AlertTier, Config, EntityKind};
use airwise_data::{DatasetLoader, LoadError};
use airwise_telemetry::{read_records, DataFiles, TranscriptRecord, TranscriptRole};
use common::{write_dataset, MockClient};
use tempfile::TempDir;

fn load(dir: &TempDir) -> airwise_data::Dataset {
    write_dataset(dir.path());
    DatasetLoader::new(DataFiles::in_dir(dir.path()))
        .load()
        .unwrap()
}

#[test]
fn test_latest_snapshot_from_files() {
    let temp = TempDir::new().unwrap();
    let dataset = load(&temp);

    // Patna's latest row has no AQI, so it is dropped rather than falling back
    assert_eq!(dataset.city_names, vec!["Chennai", "Delhi", "Mumbai"]);

    let delhi = dataset.cities.get("Delhi").unwrap();
    assert_eq!(delhi.aqi, 420.0);
    assert_eq!(delhi.aqi_bucket.as_deref(), Some("Severe"));

    let mumbai = dataset.cities.get("Mumbai").unwrap();
    assert_eq!(mumbai.aqi, 80.0);

    let orphan = dataset.stations.get("XX999").unwrap();
    assert!(orphan.station_name.is_none());
    assert!(orphan.city.is_none());
    assert_eq!(dataset.station_names, vec!["Anand Vihar", "Bandra"]);
}

#[test]
fn test_context_puts_worst_first() {
    let temp = TempDir::new().unwrap();
    let dataset = load(&temp);
    let context = dataset.grounding(&Config::new());

    assert_eq!(context.cities().rows()[0].entity_id, "Delhi");
    assert_eq!(context.stations().rows()[0].entity_id, "DL001");
    assert_eq!(parse_header(context.city_context()), EntityKind::City.columns());
    assert_eq!(
        parse_header(context.station_context()),
        EntityKind::Station.columns()
    );

    let prompt = context.system_prompt();
    assert!(prompt.contains("Available Cities (Total 3)"));
    assert!(prompt.contains("Anand Vihar"));
}

#[test]
fn test_small_cap_keeps_worst_city() {
    let temp = TempDir::new().unwrap();
    let dataset = load(&temp);
    let config = Config {
        city_cap: 1,
        ..Config::new()
    };
    let context = dataset.grounding(&config);

    assert_eq!(context.cities().len(), 1);
    assert!(context.cities().contains("Delhi"));
    assert!(!context.city_context().contains("Chennai"));
}

#[test]
fn test_alert_for_worst_city() {
    let temp = TempDir::new().unwrap();
    let dataset = load(&temp);

    let alert = dataset.worst_city_alert().unwrap();
    assert_eq!(alert.tier, AlertTier::Severe);
    assert_eq!(classify(alert.aqi).0, AlertTier::Severe);
    let message = alert.message();
    assert!(message.contains("Delhi"));
    assert!(message.contains("2020-07-01"));
}

#[test]
fn test_session_over_loaded_dataset() {
    let temp = TempDir::new().unwrap();
    let dataset = load(&temp);
    let log = temp.path().join("chat_log.csv");
    let client = MockClient::new(vec![
        MockClient::ok("Delhi is Severe at 420.", 0.3),
        MockClient::rate_limited(),
    ]);

    let mut session =
        ChatSession::new(&client, dataset.grounding(&Config::new())).with_transcript(&log);
    assert!(session.history()[0].content.contains("Delhi"));

    assert_eq!(session.submit("Worst city?"), "Delhi is Severe at 420.");
    let failed = session.submit("And Chennai?");
    assert!(failed.contains("error"));

    let prompts = client.prompts.borrow();
    assert!(prompts[0].0.contains("Delhi"));
    assert_eq!(prompts[1].1, "And Chennai?");

    let rows: Vec<TranscriptRecord> = read_records(&log).unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].role, TranscriptRole::User);
    assert_eq!(rows[3].role, TranscriptRole::Assistant);
    assert_eq!(rows[3].content, failed);
}

#[test]
fn test_missing_file_is_fatal() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("city_day.csv"), common::CITY_DAY).unwrap();

    let result = DatasetLoader::new(DataFiles::in_dir(temp.path())).load();
    assert!(matches!(result, Err(LoadError::Missing { .. })));
}
