use iot_data_pipeline::{
    LocalStorage, ObjectLocation, PipelineRunner, StorageGateway, DEMO_SENSOR_DATA,
};
use tempfile::TempDir;

fn locations() -> (ObjectLocation, ObjectLocation) {
    (
        ObjectLocation::new("raw-bucket", "raw/2024/readings.jsonl"),
        ObjectLocation::new("processed-bucket", "processed/readings.jsonl"),
    )
}

#[tokio::test]
async fn end_to_end_run_over_local_storage() {
    let dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(dir.path());
    let (input, output) = locations();

    let input_data = concat!(
        "{\"device_id\": \"sensor-001\", \"temperature\": 25.5, \"humidity\": 60}\n",
        "\n",
        "this is a bad line\n",
        "{\"device_id\": \"sensor-002\", \"temperature\": \"hot\"}\n",
        "{\"device_id\": \"sensor-003\", \"humidity\": 70}\n",
    );
    storage.put(&input, input_data.as_bytes()).await.unwrap();

    let runner = PipelineRunner::new(storage.clone());
    let report = runner.run(&input, &output).await.unwrap();

    assert_eq!(report.accepted, 3);
    assert_eq!(report.skipped, 1);

    let written = storage.fetch(&output).await.unwrap();
    let text = String::from_utf8(written).unwrap();
    let records: Vec<serde_json::Value> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    // Input order survives, skips leave no trace.
    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["device_id"], "sensor-001");
    assert_eq!(records[1]["device_id"], "sensor-002");
    assert_eq!(records[2]["device_id"], "sensor-003");

    // Conversion only where the temperature was numeric.
    let converted = records[0]["temp_fahrenheit"].as_f64().unwrap();
    assert!((converted - 77.9).abs() < 1e-9);
    assert!(records[1].get("temp_fahrenheit").is_none());
    assert!(records[2].get("temp_fahrenheit").is_none());

    // Untouched fields pass through unaltered.
    assert_eq!(records[0]["humidity"], 60);
    assert_eq!(records[1]["temperature"], "hot");

    for record in &records {
        assert!(record.get("processed_timestamp").is_some());
    }
}

#[tokio::test]
async fn missing_input_object_fails_without_output() {
    let dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(dir.path());
    let (input, output) = locations();

    let runner = PipelineRunner::new(storage.clone());
    let err = runner.run(&input, &output).await.unwrap_err();

    assert!(err.is_not_found());
    assert!(storage.fetch(&output).await.is_err());
}

#[tokio::test]
async fn zero_valid_records_produce_an_empty_output_object() {
    let dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(dir.path());
    let (input, output) = locations();

    storage
        .put(&input, b"garbage\n[1, 2, 3]\n\"just a string\"\n")
        .await
        .unwrap();

    let runner = PipelineRunner::new(storage.clone());
    let report = runner.run(&input, &output).await.unwrap();

    assert_eq!(report.accepted, 0);
    assert_eq!(report.skipped, 3);
    assert_eq!(report.bytes_written, 0);
    assert_eq!(storage.fetch(&output).await.unwrap(), Vec::<u8>::new());
}

#[tokio::test]
async fn demo_sample_data_exercises_all_line_outcomes() {
    let dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(dir.path());
    let input = ObjectLocation::new("demo", "raw_sensor_data.jsonl");
    let output = ObjectLocation::new("demo", "processed_sensor_data.jsonl");

    storage
        .put(&input, DEMO_SENSOR_DATA.as_bytes())
        .await
        .unwrap();

    let runner = PipelineRunner::new(storage.clone());
    let report = runner.run(&input, &output).await.unwrap();

    // Four records survive, the deliberately malformed line does not.
    assert_eq!(report.accepted, 4);
    assert_eq!(report.skipped, 1);

    let text = String::from_utf8(storage.fetch(&output).await.unwrap()).unwrap();
    let records: Vec<serde_json::Value> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    // The legacy temp_celsius alias converts too.
    let legacy = records
        .iter()
        .find(|r| r["device_id"] == "sensor-003")
        .unwrap();
    let converted = legacy["temp_fahrenheit"].as_f64().unwrap();
    assert!((converted - 68.18).abs() < 1e-9);

    // The record without a temperature is stamped but not converted.
    let plain = records
        .iter()
        .find(|r| r["device_id"] == "sensor-004")
        .unwrap();
    assert!(plain.get("temp_fahrenheit").is_none());
    assert!(plain.get("processed_timestamp").is_some());
}
