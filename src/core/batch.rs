use crate::core::transform::transform_line;
use crate::domain::model::{BatchOutput, ProcessingOutcome, SkipReason};
use crate::utils::error::Result;

/// Runs the record transform over a whole line stream and serializes the
/// accepted records, one JSON object per line, in input order.
///
/// Per-line failures never abort the batch; they are logged and counted.
/// Zero accepted records is a valid (empty) result, diagnosed as a warning.
pub fn process_batch<'a, I>(lines: I) -> Result<BatchOutput>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut bytes = Vec::new();
    let mut accepted = 0usize;
    let mut skipped = 0usize;
    let mut blank = 0usize;

    for line in lines {
        match transform_line(line) {
            ProcessingOutcome::Accepted(record) => {
                serde_json::to_writer(&mut bytes, &record)?;
                bytes.push(b'\n');
                accepted += 1;
            }
            ProcessingOutcome::Skipped(SkipReason::EmptyLine) => blank += 1,
            ProcessingOutcome::Skipped(reason) => {
                tracing::debug!(%reason, "line skipped");
                skipped += 1;
            }
        }
    }

    if accepted == 0 {
        tracing::warn!(skipped, blank, "no records accepted, output object will be empty");
    }

    Ok(BatchOutput {
        bytes,
        accepted,
        skipped,
        blank,
    })
}
