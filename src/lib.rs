pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::worker::{
    LocalDemoConfig, LocalStorage, RunnerConfig, S3Storage, StoreConfig, DEMO_SENSOR_DATA,
};

#[cfg(feature = "lambda")]
pub use config::lambda::{DispatcherConfig, EcsLauncher};

pub use core::batch::process_batch;
pub use core::dispatch::{DispatchOutcome, NotificationDispatcher};
pub use core::runner::PipelineRunner;
pub use core::transform::transform_line;
pub use domain::model::{
    BatchOutput, JobParameters, ObjectLocation, ProcessingOutcome, Record, RunReport, SkipReason,
};
pub use domain::ports::{JobLauncher, StorageGateway};
pub use utils::error::{PipelineError, Result, StorageError};
