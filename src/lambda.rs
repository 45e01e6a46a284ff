#[cfg(feature = "lambda")]
use aws_config::BehaviorVersion;
#[cfg(feature = "lambda")]
use aws_sdk_ecs::Client as EcsClient;
#[cfg(feature = "lambda")]
use iot_data_pipeline::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use iot_data_pipeline::{DispatcherConfig, EcsLauncher, NotificationDispatcher};
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use serde::Serialize;
#[cfg(feature = "lambda")]
use serde_json::Value;

#[cfg(feature = "lambda")]
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,
    pub body: String,
}

#[cfg(feature = "lambda")]
async fn function_handler(
    dispatcher: &NotificationDispatcher<EcsLauncher>,
    event: LambdaEvent<Value>,
) -> Result<Response, Error> {
    tracing::info!("received object-store notification event");

    // A launch failure propagates as an invocation error so the event
    // source can redeliver; malformed events answer 400 instead.
    let outcome = dispatcher
        .dispatch(event.payload)
        .await
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

    tracing::info!(
        status_code = outcome.status_code,
        launched = outcome.launched.len(),
        "dispatch finished"
    );

    Ok(Response {
        status_code: outcome.status_code,
        body: outcome.body,
    })
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let config = DispatcherConfig::from_env()?;
    config.validate()?;
    let output_bucket = config.output_bucket.clone();

    let aws_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let launcher = EcsLauncher::new(EcsClient::new(&aws_config), config);
    let dispatcher = NotificationDispatcher::new(launcher, output_bucket);

    let dispatcher_ref = &dispatcher;
    run(service_fn(move |event| async move {
        function_handler(dispatcher_ref, event).await
    }))
    .await
}
