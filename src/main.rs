use clap::Parser;
use iot_data_pipeline::utils::{logger, validation::Validate};
use iot_data_pipeline::{
    LocalDemoConfig, LocalStorage, PipelineRunner, Result, RunReport, RunnerConfig, S3Storage,
    StorageGateway, StoreConfig, DEMO_SENSOR_DATA,
};

#[derive(Debug, Parser)]
#[command(name = "iot-data-pipeline")]
#[command(about = "Transforms newline-delimited IoT telemetry between object-store locations")]
struct WorkerArgs {
    /// Directory used for input/output objects in local demo mode
    #[arg(long, default_value = ".")]
    demo_dir: String,

    #[arg(long, help = "Enable verbose output")]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = WorkerArgs::parse();
    logger::init_worker_logger(args.verbose);

    match RunnerConfig::from_env() {
        RunnerConfig::Store(config) => run_store_mode(config).await,
        RunnerConfig::LocalDemo(_) => run_demo_mode(LocalDemoConfig::in_dir(&args.demo_dir)).await,
    }
}

async fn run_store_mode(config: StoreConfig) {
    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "configuration validation failed");
        std::process::exit(1);
    }

    tracing::info!(input = %config.input, output = %config.output, "starting store-backed run");
    let runner = PipelineRunner::new(S3Storage::from_env().await);

    match runner.run(&config.input, &config.output).await {
        Ok(report) => log_report(&report),
        Err(e) => {
            if e.is_not_found() {
                tracing::error!(input = %config.input, "input object not found");
            } else {
                tracing::error!(
                    input = %config.input,
                    output = %config.output,
                    error = %e,
                    "pipeline run failed"
                );
            }
            std::process::exit(1);
        }
    }
}

async fn run_demo_mode(config: LocalDemoConfig) {
    tracing::info!(
        base_dir = %config.base_dir.display(),
        "processing fixed local sample data for demonstration"
    );

    match run_demo(&config).await {
        Ok(report) => {
            log_report(&report);
            tracing::info!(
                output = %config.base_dir.join(&config.output.bucket).join(&config.output.key).display(),
                "demo output written"
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "demo run failed");
            std::process::exit(1);
        }
    }
}

async fn run_demo(config: &LocalDemoConfig) -> Result<RunReport> {
    let storage = LocalStorage::new(&config.base_dir);
    storage
        .put(&config.input, DEMO_SENSOR_DATA.as_bytes())
        .await?;

    let runner = PipelineRunner::new(storage);
    runner.run(&config.input, &config.output).await
}

fn log_report(report: &RunReport) {
    tracing::info!(
        accepted = report.accepted,
        skipped = report.skipped,
        bytes_written = report.bytes_written,
        "pipeline run complete"
    );
}
