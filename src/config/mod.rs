pub mod worker;

#[cfg(feature = "lambda")]
pub mod lambda;

pub use worker::{LocalDemoConfig, LocalStorage, RunnerConfig, S3Storage, StoreConfig};
