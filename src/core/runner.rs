use crate::core::batch::process_batch;
use crate::domain::model::{ObjectLocation, RunReport};
use crate::domain::ports::StorageGateway;
use crate::utils::error::Result;

/// Drives one fetch → process → write cycle against a storage gateway.
///
/// Each runner instance handles exactly one input object; the steps are
/// strictly sequential and nothing is retried. A missing input object or
/// any storage failure aborts the run before any output is written.
pub struct PipelineRunner<S: StorageGateway> {
    storage: S,
}

impl<S: StorageGateway> PipelineRunner<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub async fn run(&self, input: &ObjectLocation, output: &ObjectLocation) -> Result<RunReport> {
        tracing::info!(%input, "fetching input object");
        let raw = self.storage.fetch(input).await?;
        let text = String::from_utf8(raw)?;

        let batch = process_batch(text.lines())?;
        tracing::info!(
            accepted = batch.accepted,
            skipped = batch.skipped,
            blank = batch.blank,
            "batch processing finished"
        );

        tracing::info!(%output, bytes = batch.bytes.len(), "writing processed output");
        self.storage.put(output, &batch.bytes).await?;

        Ok(RunReport {
            accepted: batch.accepted,
            skipped: batch.skipped,
            bytes_written: batch.bytes.len(),
        })
    }
}
