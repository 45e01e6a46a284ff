use crate::domain::model::ObjectLocation;
use crate::domain::ports::StorageGateway;
use crate::utils::error::{Result, StorageError};
use crate::utils::validation::{validate_bucket_name, validate_object_key, Validate};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client as S3Client;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Store-backed run: all four locations resolved from the environment.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub input: ObjectLocation,
    pub output: ObjectLocation,
}

/// Demo run against the local filesystem, used when the store locations
/// are not configured. A test/demo path, not a production behavior.
#[derive(Debug, Clone)]
pub struct LocalDemoConfig {
    pub base_dir: PathBuf,
    pub input: ObjectLocation,
    pub output: ObjectLocation,
}

impl LocalDemoConfig {
    pub fn in_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            input: ObjectLocation::new("demo", "raw_sensor_data.jsonl"),
            output: ObjectLocation::new("demo", "processed_sensor_data.jsonl"),
        }
    }
}

/// Fixed sample telemetry for demo mode, including a malformed line and a
/// record without a temperature to exercise the skip paths.
pub const DEMO_SENSOR_DATA: &str = concat!(
    "{\"device_id\": \"sensor-001\", \"temperature\": 25.5, \"humidity\": 60}\n",
    "{\"device_id\": \"sensor-002\", \"temperature\": 30.0, \"humidity\": 65}\n",
    "{\"device_id\": \"sensor-003\", \"temp_celsius\": 20.1, \"humidity\": 55}\n",
    "this is a bad line\n",
    "{\"device_id\": \"sensor-004\", \"humidity\": 70}\n",
);

/// How one worker invocation is configured. The variant is explicit in the
/// type: missing location variables select demo mode rather than failing.
#[derive(Debug, Clone)]
pub enum RunnerConfig {
    Store(StoreConfig),
    LocalDemo(LocalDemoConfig),
}

impl RunnerConfig {
    pub fn from_env() -> Self {
        let resolved = (
            env::var("INPUT_BUCKET"),
            env::var("INPUT_KEY"),
            env::var("OUTPUT_BUCKET"),
            env::var("OUTPUT_KEY"),
        );

        match resolved {
            (Ok(input_bucket), Ok(input_key), Ok(output_bucket), Ok(output_key)) => {
                RunnerConfig::Store(StoreConfig {
                    input: ObjectLocation::new(input_bucket, input_key),
                    output: ObjectLocation::new(output_bucket, output_key),
                })
            }
            _ => {
                tracing::warn!(
                    "missing one of INPUT_BUCKET, INPUT_KEY, OUTPUT_BUCKET, OUTPUT_KEY; \
                     falling back to local demo mode"
                );
                RunnerConfig::LocalDemo(LocalDemoConfig::in_dir("."))
            }
        }
    }
}

impl Validate for StoreConfig {
    fn validate(&self) -> Result<()> {
        validate_bucket_name("INPUT_BUCKET", &self.input.bucket)?;
        validate_object_key("INPUT_KEY", &self.input.key)?;
        validate_bucket_name("OUTPUT_BUCKET", &self.output.bucket)?;
        validate_object_key("OUTPUT_KEY", &self.output.key)?;
        Ok(())
    }
}

/// Object-store gateway backed by S3. Get/put only, single attempt each.
#[derive(Debug, Clone)]
pub struct S3Storage {
    client: S3Client,
}

impl S3Storage {
    pub fn new(client: S3Client) -> Self {
        Self { client }
    }

    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        Self::new(S3Client::new(&config))
    }
}

#[async_trait]
impl StorageGateway for S3Storage {
    async fn fetch(&self, location: &ObjectLocation) -> std::result::Result<Vec<u8>, StorageError> {
        let response = self
            .client
            .get_object()
            .bucket(&location.bucket)
            .key(&location.key)
            .send()
            .await
            .map_err(|err| {
                let service_err = err.into_service_error();
                if service_err.is_no_such_key() {
                    StorageError::NotFound {
                        bucket: location.bucket.clone(),
                        key: location.key.clone(),
                    }
                } else {
                    StorageError::Transport {
                        bucket: location.bucket.clone(),
                        key: location.key.clone(),
                        message: service_err.to_string(),
                    }
                }
            })?;

        let data = response
            .body
            .collect()
            .await
            .map_err(|e| StorageError::Transport {
                bucket: location.bucket.clone(),
                key: location.key.clone(),
                message: format!("failed to collect object body: {}", e),
            })?;

        Ok(data.into_bytes().to_vec())
    }

    async fn put(
        &self,
        location: &ObjectLocation,
        data: &[u8],
    ) -> std::result::Result<(), StorageError> {
        self.client
            .put_object()
            .bucket(&location.bucket)
            .key(&location.key)
            .body(data.to_vec().into())
            .send()
            .await
            .map_err(|err| StorageError::Transport {
                bucket: location.bucket.clone(),
                key: location.key.clone(),
                message: err.into_service_error().to_string(),
            })?;

        Ok(())
    }
}

/// Filesystem-backed gateway for demo mode and tests. Objects live under
/// `<base>/<bucket>/<key>`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn full_path(&self, location: &ObjectLocation) -> PathBuf {
        Path::new(&self.base_path)
            .join(&location.bucket)
            .join(&location.key)
    }
}

#[async_trait]
impl StorageGateway for LocalStorage {
    async fn fetch(&self, location: &ObjectLocation) -> std::result::Result<Vec<u8>, StorageError> {
        let full_path = self.full_path(location);
        match fs::read(&full_path) {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(StorageError::NotFound {
                bucket: location.bucket.clone(),
                key: location.key.clone(),
            }),
            Err(e) => Err(StorageError::Unexpected {
                message: format!("{}: {}", full_path.display(), e),
            }),
        }
    }

    async fn put(
        &self,
        location: &ObjectLocation,
        data: &[u8],
    ) -> std::result::Result<(), StorageError> {
        let full_path = self.full_path(location);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::Unexpected {
                message: format!("{}: {}", parent.display(), e),
            })?;
        }

        fs::write(&full_path, data).map_err(|e| StorageError::Unexpected {
            message: format!("{}: {}", full_path.display(), e),
        })?;

        Ok(())
    }
}
