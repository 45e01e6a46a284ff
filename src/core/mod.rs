pub mod batch;
pub mod dispatch;
pub mod runner;
pub mod transform;

pub use crate::domain::model::{
    BatchOutput, JobParameters, ObjectLocation, ProcessingOutcome, Record, RunReport, SkipReason,
};
pub use crate::domain::ports::{JobLauncher, StorageGateway};
pub use crate::utils::error::Result;
