use serde_json::Value;
use std::fmt;

/// One decoded telemetry reading. Backed by `serde_json::Map` with the
/// `preserve_order` feature so output lines keep the input field order.
pub type Record = serde_json::Map<String, Value>;

/// Why a line was dropped instead of transformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    EmptyLine,
    ParseError,
    NotARecord,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            SkipReason::EmptyLine => "empty_line",
            SkipReason::ParseError => "parse_error",
            SkipReason::NotARecord => "not_a_record",
        };
        write!(f, "{}", reason)
    }
}

/// Result of transforming a single raw line.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessingOutcome {
    Accepted(Record),
    Skipped(SkipReason),
}

/// Serialized batch output plus the per-line accounting.
///
/// Blank lines count in neither bucket: `accepted + skipped` equals the
/// number of non-blank input lines.
#[derive(Debug, Clone)]
pub struct BatchOutput {
    pub bytes: Vec<u8>,
    pub accepted: usize,
    pub skipped: usize,
    pub blank: usize,
}

/// A (bucket, key) pair addressing one object in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectLocation {
    pub bucket: String,
    pub key: String,
}

impl ObjectLocation {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

impl fmt::Display for ObjectLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}

/// Parameters injected into one worker launch, derived from a single
/// creation-event entry plus the configured destination bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobParameters {
    pub input: ObjectLocation,
    pub output: ObjectLocation,
}

impl JobParameters {
    /// The four environment variables the worker expects.
    pub fn to_env(&self) -> Vec<(String, String)> {
        vec![
            ("INPUT_BUCKET".to_string(), self.input.bucket.clone()),
            ("INPUT_KEY".to_string(), self.input.key.clone()),
            ("OUTPUT_BUCKET".to_string(), self.output.bucket.clone()),
            ("OUTPUT_KEY".to_string(), self.output.key.clone()),
        ]
    }
}

/// Summary of one completed pipeline run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub accepted: usize,
    pub skipped: usize,
    pub bytes_written: usize,
}
