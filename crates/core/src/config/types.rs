use serde::{Deserialize, Serialize};

use crate::notifier::NotifierConfig;
use crate::orchestrator::AnalysisConfig;
use crate::store::StorageConfig;

/// Root configuration
///
/// Every section is optional. Service settings that are missing only fail
/// the stage that needs them.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub notifier: NotifierConfig,
    #[serde(default)]
    pub aws: AwsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// AWS client configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AwsConfig {
    /// Region override; the default provider chain decides when unset.
    #[serde(default)]
    pub region: Option<String>,
    /// Endpoint override for every service (e.g. a local emulator).
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
    /// `EnvFilter` directives, used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// One JSON object per line (CloudWatch friendly).
    #[default]
    Json,
    /// Human-readable multi-line output.
    Pretty,
}
