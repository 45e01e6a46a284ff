use crate::domain::model::{JobParameters, ObjectLocation};
use crate::domain::ports::JobLauncher;
use crate::utils::error::{PipelineError, Result};
use serde::Deserialize;
use serde_json::Value;

const OBJECT_STORE_SOURCE: &str = "aws:s3";
const CREATED_EVENT_PREFIX: &str = "ObjectCreated";

/// Prefix prepended to the input key's basename to form the output key.
pub const OUTPUT_KEY_PREFIX: &str = "processed/";

/// An object-store notification event, as delivered to the dispatcher.
#[derive(Debug, Deserialize)]
pub struct CreationEvent {
    #[serde(rename = "Records")]
    pub records: Option<Vec<EventEntry>>,
}

#[derive(Debug, Deserialize)]
pub struct EventEntry {
    #[serde(rename = "eventSource", default)]
    pub event_source: String,
    #[serde(rename = "eventName", default)]
    pub event_name: String,
    #[serde(default)]
    pub s3: Option<S3Entity>,
}

#[derive(Debug, Deserialize)]
pub struct S3Entity {
    pub bucket: BucketEntity,
    pub object: ObjectEntity,
}

#[derive(Debug, Deserialize)]
pub struct BucketEntity {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ObjectEntity {
    pub key: String,
}

/// Acknowledgment returned to the event source.
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub status_code: u16,
    pub body: String,
    pub launched: Vec<String>,
}

impl DispatchOutcome {
    fn client_error(body: impl Into<String>) -> Self {
        Self {
            status_code: 400,
            body: body.into(),
            launched: Vec::new(),
        }
    }
}

/// Maps creation events onto worker launches, one launch per qualifying
/// entry. Entries for other sources or non-creation events are skipped
/// silently. A launch failure never blocks the remaining entries; the
/// overall call reports failure iff at least one entry failed, so the
/// event source can redeliver.
pub struct NotificationDispatcher<L: JobLauncher> {
    launcher: L,
    output_bucket: String,
}

impl<L: JobLauncher> NotificationDispatcher<L> {
    pub fn new(launcher: L, output_bucket: String) -> Self {
        Self {
            launcher,
            output_bucket,
        }
    }

    pub async fn dispatch(&self, event: Value) -> Result<DispatchOutcome> {
        let event: CreationEvent = match serde_json::from_value(event) {
            Ok(event) => event,
            Err(e) => {
                tracing::error!(error = %e, "notification event does not match the expected schema");
                return Ok(DispatchOutcome::client_error("Invalid event structure"));
            }
        };

        let Some(entries) = event.records else {
            tracing::error!("notification event is missing the Records list");
            return Ok(DispatchOutcome::client_error("Invalid event structure"));
        };

        let mut launched = Vec::new();
        let mut attempted = 0usize;
        let mut failed = 0usize;

        for entry in &entries {
            let Some(params) = self.job_parameters(entry) else {
                continue;
            };

            attempted += 1;
            tracing::info!(input = %params.input, output = %params.output, "launching worker");
            match self.launcher.launch(&params).await {
                Ok(launch_id) => {
                    tracing::info!(%launch_id, input = %params.input, "worker launched");
                    launched.push(launch_id);
                }
                Err(e) => {
                    tracing::error!(input = %params.input, error = %e, "worker launch failed");
                    failed += 1;
                }
            }
        }

        if failed > 0 {
            return Err(PipelineError::LaunchError { failed, attempted });
        }

        Ok(DispatchOutcome {
            status_code: 200,
            body: format!("Launched {} worker task(s)", launched.len()),
            launched,
        })
    }

    /// Pure derivation of launch parameters from one event entry; `None`
    /// when the entry does not qualify.
    fn job_parameters(&self, entry: &EventEntry) -> Option<JobParameters> {
        if entry.event_source != OBJECT_STORE_SOURCE
            || !entry.event_name.starts_with(CREATED_EVENT_PREFIX)
        {
            return None;
        }

        let s3 = entry.s3.as_ref()?;
        let output_key = format!(
            "{}{}",
            OUTPUT_KEY_PREFIX,
            last_path_segment(&s3.object.key)
        );

        Some(JobParameters {
            input: ObjectLocation::new(&s3.bucket.name, &s3.object.key),
            output: ObjectLocation::new(&self.output_bucket, output_key),
        })
    }
}

fn last_path_segment(key: &str) -> &str {
    key.rsplit('/').next().unwrap_or(key)
}
