use thiserror::Error;

/// Failures raised by a storage gateway, tagged by kind so callers can
/// branch on `NotFound` without string-matching service errors.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("object not found: s3://{bucket}/{key}")]
    NotFound { bucket: String, key: String },

    #[error("storage transport error for s3://{bucket}/{key}: {message}")]
    Transport {
        bucket: String,
        key: String,
        message: String,
    },

    #[error("unexpected storage error: {message}")]
    Unexpected { message: String },
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("input object is not valid UTF-8: {0}")]
    EncodingError(#[from] std::string::FromUtf8Error),

    #[error("configuration error: {message}")]
    ConfigError { message: String },

    #[error("invalid config value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("invalid notification event: {message}")]
    InvalidEventError { message: String },

    #[error("failed to launch worker task: {message}")]
    TaskLaunchError { message: String },

    #[error("{failed} of {attempted} job launches failed")]
    LaunchError { failed: usize, attempted: usize },
}

impl PipelineError {
    /// True when the failure means the requested input object does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, PipelineError::Storage(StorageError::NotFound { .. }))
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
