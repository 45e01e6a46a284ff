use crate::domain::model::{JobParameters, ObjectLocation};
use crate::utils::error::{Result, StorageError};
use async_trait::async_trait;

/// Fetch and put byte blobs by (bucket, key). Errors are tagged so callers
/// can branch on `NotFound` vs transport failures.
#[async_trait]
pub trait StorageGateway: Send + Sync {
    async fn fetch(&self, location: &ObjectLocation) -> std::result::Result<Vec<u8>, StorageError>;

    /// Overwrite semantics; no conditional write.
    async fn put(
        &self,
        location: &ObjectLocation,
        data: &[u8],
    ) -> std::result::Result<(), StorageError>;
}

/// Starts one isolated worker process with the given parameter set and
/// returns a launch identifier.
#[async_trait]
pub trait JobLauncher: Send + Sync {
    async fn launch(&self, params: &JobParameters) -> Result<String>;
}
