use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Prefix of environment overrides; nested keys are separated by `__`,
/// e.g. `SNAPSIGHT_ANALYSIS__TARGET_LABEL`.
pub const ENV_PREFIX: &str = "SNAPSIGHT_";

fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX).split("__")
}

/// Load configuration from file with environment variable overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    Figment::new()
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Load configuration from environment variables alone
pub fn load_config_from_env() -> Result<Config, ConfigError> {
    Figment::new()
        .merge(env_provider())
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_str_valid() {
        let toml = r#"
[analysis]
target_label = "Cat"

[storage]
table_name = "results"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.analysis.target_label.as_deref(), Some("Cat"));
        assert_eq!(config.storage.table_name.as_deref(), Some("results"));
    }

    #[test]
    fn test_load_config_from_str_invalid() {
        let toml = r#"
[analysis]
min_confidence = "high"
"#;
        let result = load_config_from_str(toml);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/snapsight.toml"));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[analysis]
target_label = "Bicycle"
min_confidence = 80

[notifier]
topic_arn = "arn:aws:sns:eu-west-1:123456789012:uploads"
"#
        )
        .unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.analysis.target_label.as_deref(), Some("Bicycle"));
        assert_eq!(config.analysis.min_confidence, 80);
        assert_eq!(
            config.notifier.topic_arn.as_deref(),
            Some("arn:aws:sns:eu-west-1:123456789012:uploads")
        );
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "snapsight.toml",
                r#"
[analysis]
target_label = "Cat"
min_confidence = 80
"#,
            )?;
            jail.set_env("SNAPSIGHT_ANALYSIS__TARGET_LABEL", "Dog");
            jail.set_env("SNAPSIGHT_STORAGE__TABLE_NAME", "from-env");

            let config = load_config(Path::new("snapsight.toml")).unwrap();
            assert_eq!(config.analysis.target_label.as_deref(), Some("Dog"));
            assert_eq!(config.analysis.min_confidence, 80);
            assert_eq!(config.storage.table_name.as_deref(), Some("from-env"));
            Ok(())
        });
    }

    #[test]
    fn test_load_config_from_env_only() {
        Jail::expect_with(|jail| {
            jail.set_env("SNAPSIGHT_NOTIFIER__TOPIC_ARN", "arn:aws:sns:us-east-1:1:t");
            jail.set_env("SNAPSIGHT_ANALYSIS__MIN_CONFIDENCE", "90");

            let config = load_config_from_env().unwrap();
            assert_eq!(
                config.notifier.topic_arn.as_deref(),
                Some("arn:aws:sns:us-east-1:1:t")
            );
            assert_eq!(config.analysis.min_confidence, 90);
            assert!(config.analysis.target_label.is_none());
            Ok(())
        });
    }
}
