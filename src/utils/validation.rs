use crate::utils::error::{PipelineError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PipelineError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "value cannot be empty".to_string(),
        });
    }
    Ok(())
}

pub fn validate_object_key(field_name: &str, key: &str) -> Result<()> {
    validate_non_empty_string(field_name, key)?;

    if key.starts_with('/') {
        return Err(PipelineError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: key.to_string(),
            reason: "object key must not start with '/'".to_string(),
        });
    }

    Ok(())
}

pub fn validate_bucket_name(field_name: &str, bucket_name: &str) -> Result<()> {
    validate_non_empty_string(field_name, bucket_name)?;

    if bucket_name.len() < 3 || bucket_name.len() > 63 {
        return Err(PipelineError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "S3 bucket name must be between 3 and 63 characters".to_string(),
        });
    }

    if !bucket_name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
    {
        return Err(PipelineError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "S3 bucket name can only contain lowercase letters, numbers, hyphens, and dots"
                .to_string(),
        });
    }

    if bucket_name.starts_with('-') || bucket_name.ends_with('-') {
        return Err(PipelineError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "S3 bucket name cannot start or end with a hyphen".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_typical_bucket_names() {
        assert!(validate_bucket_name("bucket", "raw-sensor-data").is_ok());
        assert!(validate_bucket_name("bucket", "my.data.bucket-2024").is_ok());
    }

    #[test]
    fn rejects_bad_bucket_names() {
        assert!(validate_bucket_name("bucket", "").is_err());
        assert!(validate_bucket_name("bucket", "ab").is_err());
        assert!(validate_bucket_name("bucket", "Uppercase-Bucket").is_err());
        assert!(validate_bucket_name("bucket", "-leading-hyphen").is_err());
    }

    #[test]
    fn rejects_absolute_object_keys() {
        assert!(validate_object_key("key", "/raw/data.jsonl").is_err());
        assert!(validate_object_key("key", "raw/data.jsonl").is_ok());
    }
}
