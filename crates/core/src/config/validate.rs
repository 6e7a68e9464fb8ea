use super::{types::Config, ConfigError};

/// Validate configuration
/// Only values that are present are checked:
/// - analysis.min_confidence is a percentage
/// - analysis.language_code is not empty
///
/// Missing service settings (target label, table, topic) are not
/// checked here; the stage that needs them fails instead.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.analysis.min_confidence > 100 {
        return Err(ConfigError::ValidationError(format!(
            "analysis.min_confidence must be between 0 and 100, got {}",
            config.analysis.min_confidence
        )));
    }

    if config.analysis.language_code.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "analysis.language_code cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::AnalysisConfig;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_confidence_over_100_fails() {
        let config = Config {
            analysis: AnalysisConfig::with_target("cat").with_min_confidence(101),
            ..Default::default()
        };
        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validate_empty_language_fails() {
        let config = Config {
            analysis: AnalysisConfig::default().with_language(" "),
            ..Default::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_does_not_require_service_settings() {
        let config = Config::default();
        assert!(config.storage.table_name.is_none());
        assert!(config.notifier.topic_arn.is_none());
        assert!(validate_config(&config).is_ok());
    }
}
