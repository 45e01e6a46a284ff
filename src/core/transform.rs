use crate::domain::model::{ProcessingOutcome, Record, SkipReason};
use chrono::{SecondsFormat, Utc};
use serde_json::{Number, Value};

pub const TEMPERATURE_FIELD: &str = "temperature";
/// Field name emitted by older sensor firmware.
pub const LEGACY_TEMPERATURE_FIELD: &str = "temp_celsius";

pub const PROCESSED_TIMESTAMP_FIELD: &str = "processed_timestamp";
pub const FAHRENHEIT_FIELD: &str = "temp_fahrenheit";

/// Turns one raw input line into a transformed record or a classified skip.
///
/// Accepted records get a `processed_timestamp`, and a `temp_fahrenheit`
/// when a numeric temperature field is present. All other fields pass
/// through untouched, in their original order. No I/O happens here;
/// diagnostics go through `tracing`.
pub fn transform_line(line: &str) -> ProcessingOutcome {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ProcessingOutcome::Skipped(SkipReason::EmptyLine);
    }

    let value: Value = match serde_json::from_str(trimmed) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(line = trimmed, error = %e, "skipping malformed JSON line");
            return ProcessingOutcome::Skipped(SkipReason::ParseError);
        }
    };

    let mut record: Record = match value {
        Value::Object(map) => map,
        _ => {
            tracing::warn!(line = trimmed, "skipping JSON value that is not an object");
            return ProcessingOutcome::Skipped(SkipReason::NotARecord);
        }
    };

    record.insert(
        PROCESSED_TIMESTAMP_FIELD.to_string(),
        Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)),
    );

    let temperature = record
        .get(TEMPERATURE_FIELD)
        .or_else(|| record.get(LEGACY_TEMPERATURE_FIELD))
        .cloned();

    if let Some(celsius) = temperature {
        match fahrenheit(&celsius) {
            Some(converted) => {
                record.insert(FAHRENHEIT_FIELD.to_string(), Value::Number(converted));
            }
            None => {
                tracing::warn!(value = %celsius, "temperature field is not numeric, skipping conversion");
            }
        }
    }

    ProcessingOutcome::Accepted(record)
}

/// Celsius to Fahrenheit, preserving the numeric kind of the input:
/// float in, float out; integer in, integer out when the result is exact.
fn fahrenheit(celsius: &Value) -> Option<Number> {
    let celsius_value = celsius.as_f64()?;
    let converted = celsius_value * 9.0 / 5.0 + 32.0;
    if !celsius.is_f64() && converted.fract() == 0.0 {
        return Some(Number::from(converted as i64));
    }
    Number::from_f64(converted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn accept(line: &str) -> Record {
        match transform_line(line) {
            ProcessingOutcome::Accepted(record) => record,
            other => panic!("expected accepted record, got {:?}", other),
        }
    }

    #[test]
    fn converts_float_temperature_and_stamps_record() {
        let record = accept(r#"{"device_id": "sensor-001", "temperature": 25.5, "humidity": 60}"#);

        let converted = record[FAHRENHEIT_FIELD].as_f64().unwrap();
        assert!((converted - 77.9).abs() < 1e-9);

        let stamp = record[PROCESSED_TIMESTAMP_FIELD].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(stamp).is_ok());
    }

    #[test]
    fn integer_temperature_stays_integral_when_exact() {
        let record = accept(r#"{"temperature": 25}"#);
        assert_eq!(record[FAHRENHEIT_FIELD], serde_json::json!(77));

        let record = accept(r#"{"temperature": 21}"#);
        let converted = record[FAHRENHEIT_FIELD].as_f64().unwrap();
        assert!((converted - 69.8).abs() < 1e-9);
    }

    #[test]
    fn accepts_legacy_temperature_alias() {
        let record = accept(r#"{"device_id": "sensor-003", "temp_celsius": 20.1}"#);
        let converted = record[FAHRENHEIT_FIELD].as_f64().unwrap();
        assert!((converted - 68.18).abs() < 1e-9);
    }

    #[test]
    fn non_numeric_temperature_passes_through_without_conversion() {
        let record = accept(r#"{"device_id": "sensor-009", "temperature": "hot"}"#);
        assert!(!record.contains_key(FAHRENHEIT_FIELD));
        assert_eq!(record["temperature"], serde_json::json!("hot"));
        assert!(record.contains_key(PROCESSED_TIMESTAMP_FIELD));
    }

    #[test]
    fn record_without_temperature_is_still_stamped() {
        let record = accept(r#"{"device_id": "sensor-004", "humidity": 70}"#);
        assert!(!record.contains_key(FAHRENHEIT_FIELD));
        assert!(record.contains_key(PROCESSED_TIMESTAMP_FIELD));
    }

    #[test]
    fn blank_lines_are_skipped_as_empty() {
        assert_eq!(
            transform_line(""),
            ProcessingOutcome::Skipped(SkipReason::EmptyLine)
        );
        assert_eq!(
            transform_line("   \t"),
            ProcessingOutcome::Skipped(SkipReason::EmptyLine)
        );
    }

    #[test]
    fn malformed_json_is_skipped_as_parse_error() {
        assert_eq!(
            transform_line("this is a bad line"),
            ProcessingOutcome::Skipped(SkipReason::ParseError)
        );
    }

    #[test]
    fn non_object_values_are_skipped() {
        assert_eq!(
            transform_line("42"),
            ProcessingOutcome::Skipped(SkipReason::NotARecord)
        );
        assert_eq!(
            transform_line(r#"["a", "b"]"#),
            ProcessingOutcome::Skipped(SkipReason::NotARecord)
        );
        assert_eq!(
            transform_line(r#""just a string""#),
            ProcessingOutcome::Skipped(SkipReason::NotARecord)
        );
    }

    #[test]
    fn original_field_order_is_preserved() {
        let record = accept(r#"{"z_field": 1, "a_field": 2, "m_field": 3}"#);
        let keys: Vec<&str> = record.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["z_field", "a_field", "m_field", PROCESSED_TIMESTAMP_FIELD]
        );
        assert_eq!(record["z_field"], serde_json::json!(1));
        assert_eq!(record["a_field"], serde_json::json!(2));
        assert_eq!(record["m_field"], serde_json::json!(3));
    }
}
