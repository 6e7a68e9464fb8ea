mod handler;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use lambda_runtime::{service_fn, LambdaEvent};
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use snapsight_core::{
    load_config, load_config_from_env, load_sdk_config, validate_config, AnalysisOrchestrator,
    ComprehendAnalyzer, Config, DynamoRecordStore, LogFormat, LoggingConfig, RekognitionDetector,
    S3Event, SnsNotifier,
};

/// Environment variable naming an optional TOML config file.
const CONFIG_PATH_VAR: &str = "SNAPSIGHT_CONFIG";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = match load() {
        Ok(config) => config,
        Err(e) => {
            // Still get the failure into the function's log stream.
            init_logging(&LoggingConfig::default())?;
            return Err(e);
        }
    };
    init_logging(&config.logging)?;

    info!("Configuration loaded successfully");
    info!("Target label: {:?}", config.analysis.target_label);
    info!("Results table: {:?}", config.storage.table_name);
    info!("Notification topic: {:?}", config.notifier.topic_arn);

    let sdk_config = load_sdk_config(&config.aws).await;

    let detector = Arc::new(RekognitionDetector::from_sdk_config(&sdk_config));
    let orchestrator = AnalysisOrchestrator::new(
        config.analysis,
        detector.clone(),
        detector,
        Arc::new(ComprehendAnalyzer::from_sdk_config(&sdk_config)),
        Arc::new(DynamoRecordStore::from_sdk_config(&sdk_config, config.storage)),
        Arc::new(SnsNotifier::from_sdk_config(&sdk_config, config.notifier)),
    );
    info!("Service clients initialized, waiting for events");

    let orchestrator = &orchestrator;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<S3Event>| async move {
        handler::handle(orchestrator, event).await
    }))
    .await
    .map_err(|e| anyhow!(e))?;

    Ok(())
}

fn load() -> Result<Config> {
    let config = match std::env::var(CONFIG_PATH_VAR) {
        Ok(path) => {
            let path = PathBuf::from(path);
            load_config(&path).with_context(|| format!("Failed to load config from {:?}", path))?
        }
        Err(_) => load_config_from_env().context("Failed to load config from environment")?,
    };

    validate_config(&config).context("Configuration validation failed")?;
    Ok(config)
}

fn init_logging(logging: &LoggingConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&logging.filter)
            .with_context(|| format!("Invalid log filter '{}'", logging.filter))?,
    };

    let registry = tracing_subscriber::registry().with(filter);
    match logging.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .try_init()?,
        LogFormat::Pretty => registry.with(fmt::layer().pretty()).try_init()?,
    }

    Ok(())
}
