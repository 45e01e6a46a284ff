use crate::domain::model::JobParameters;
use crate::domain::ports::JobLauncher;
use crate::utils::error::{PipelineError, Result};
use crate::utils::validation::{validate_bucket_name, validate_non_empty_string, Validate};
use async_trait::async_trait;
use aws_sdk_ecs::types::{
    AssignPublicIp, AwsVpcConfiguration, ContainerOverride, KeyValuePair, LaunchType,
    NetworkConfiguration, TaskOverride,
};
use aws_sdk_ecs::Client as EcsClient;
use std::env;

const DEFAULT_CONTAINER_NAME: &str = "iot-data-processor-container";

#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    pub cluster: String,
    pub task_definition: String,
    pub subnets: Vec<String>,
    pub security_groups: Vec<String>,
    pub container_name: String,
    pub output_bucket: String,
}

impl DispatcherConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            cluster: require_env("ECS_CLUSTER_NAME")?,
            task_definition: require_env("ECS_TASK_DEFINITION_ARN")?,
            subnets: split_list(env::var("SUBNET_IDS").ok()),
            security_groups: split_list(env::var("SECURITY_GROUP_IDS").ok()),
            container_name: env::var("CONTAINER_NAME")
                .unwrap_or_else(|_| DEFAULT_CONTAINER_NAME.to_string()),
            output_bucket: require_env("PROCESSED_DATA_BUCKET_NAME")?,
        })
    }
}

impl Validate for DispatcherConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("ECS_CLUSTER_NAME", &self.cluster)?;
        validate_non_empty_string("ECS_TASK_DEFINITION_ARN", &self.task_definition)?;
        validate_non_empty_string("CONTAINER_NAME", &self.container_name)?;
        validate_bucket_name("PROCESSED_DATA_BUCKET_NAME", &self.output_bucket)?;

        if self.subnets.is_empty() {
            return Err(PipelineError::InvalidConfigValueError {
                field: "SUBNET_IDS".to_string(),
                value: String::new(),
                reason: "at least one subnet is required to launch tasks".to_string(),
            });
        }

        Ok(())
    }
}

fn require_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| PipelineError::ConfigError {
        message: format!("{} environment variable is required", name),
    })
}

fn split_list(raw: Option<String>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(|part| part.trim().to_string())
            .filter(|part| !part.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

/// Launches one Fargate task per call, injecting the job parameters as
/// container environment variables.
#[derive(Debug, Clone)]
pub struct EcsLauncher {
    client: EcsClient,
    config: DispatcherConfig,
}

impl EcsLauncher {
    pub fn new(client: EcsClient, config: DispatcherConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl JobLauncher for EcsLauncher {
    async fn launch(&self, params: &JobParameters) -> Result<String> {
        let environment: Vec<KeyValuePair> = params
            .to_env()
            .into_iter()
            .map(|(name, value)| KeyValuePair::builder().name(name).value(value).build())
            .collect();

        let overrides = TaskOverride::builder()
            .container_overrides(
                ContainerOverride::builder()
                    .name(&self.config.container_name)
                    .set_environment(Some(environment))
                    .build(),
            )
            .build();

        let vpc_configuration = AwsVpcConfiguration::builder()
            .set_subnets(Some(self.config.subnets.clone()))
            .set_security_groups(Some(self.config.security_groups.clone()))
            .assign_public_ip(AssignPublicIp::Enabled)
            .build()
            .map_err(|e| PipelineError::ConfigError {
                message: format!("invalid network configuration: {}", e),
            })?;

        let response = self
            .client
            .run_task()
            .cluster(&self.config.cluster)
            .launch_type(LaunchType::Fargate)
            .task_definition(&self.config.task_definition)
            .count(1)
            .platform_version("LATEST")
            .network_configuration(
                NetworkConfiguration::builder()
                    .awsvpc_configuration(vpc_configuration)
                    .build(),
            )
            .overrides(overrides)
            .send()
            .await
            .map_err(|e| PipelineError::TaskLaunchError {
                message: e.into_service_error().to_string(),
            })?;

        if let Some(task_arn) = response.tasks().first().and_then(|task| task.task_arn()) {
            return Ok(task_arn.to_string());
        }

        // run_task can "succeed" while placing nothing; surface the reason.
        let reason = response
            .failures()
            .first()
            .and_then(|failure| failure.reason())
            .unwrap_or("no task was placed");
        Err(PipelineError::TaskLaunchError {
            message: reason.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_list_trims_and_drops_empty_entries() {
        assert_eq!(
            split_list(Some("subnet-a, subnet-b,,subnet-c".to_string())),
            vec!["subnet-a", "subnet-b", "subnet-c"]
        );
        assert!(split_list(None).is_empty());
        assert!(split_list(Some(String::new())).is_empty());
    }

    #[test]
    fn dispatcher_config_requires_subnets() {
        let config = DispatcherConfig {
            cluster: "iot-cluster".to_string(),
            task_definition: "arn:aws:ecs:task-def".to_string(),
            subnets: vec![],
            security_groups: vec!["sg-1".to_string()],
            container_name: DEFAULT_CONTAINER_NAME.to_string(),
            output_bucket: "processed-bucket".to_string(),
        };
        assert!(config.validate().is_err());

        let config = DispatcherConfig {
            subnets: vec!["subnet-a".to_string()],
            ..config
        };
        assert!(config.validate().is_ok());
    }
}
