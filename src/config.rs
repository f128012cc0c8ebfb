use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::{EligibilityRules, PremiumRates, RiskModel, ValueWeights};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub recommendation: EligibilityRules,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub premium: PremiumRates,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

fn default_catalog_path() -> String { "data/catalog.json".to_string() }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub risk: RiskModel,
    #[serde(default)]
    pub value: ValueWeights,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LoggingSettings {
    /// Filter directives: `rust_log` (RUST_LOG) wins over the configured level
    pub fn filter_directives(&self, rust_log: Option<&str>) -> String {
        match rust_log.map(str::trim) {
            Some(directives) if !directives.is_empty() => directives.to_string(),
            _ => self.level.clone(),
        }
    }

    /// Output format: `format_override` (LOG_FORMAT) wins over the configured format
    pub fn output_format(&self, format_override: Option<&str>) -> LogFormat {
        let format = format_override
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .unwrap_or(&self.format);

        if format.eq_ignore_ascii_case("pretty") {
            LogFormat::Pretty
        } else {
            LogFormat::Json
        }
    }
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with OPTIMIZER__)
    /// 5. CATALOG_PATH, if set
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., OPTIMIZER__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("OPTIMIZER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = apply_env_overrides(settings)?;

        let settings: Settings = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("OPTIMIZER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject weights and rate tables the scorer cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scoring
            .risk
            .validate()
            .map_err(|e| ConfigError::Message(format!("scoring.risk: {}", e)))?;
        self.scoring
            .value
            .validate()
            .map_err(|e| ConfigError::Message(format!("scoring.value: {}", e)))?;
        self.premium
            .validate()
            .map_err(|e| ConfigError::Message(format!("premium: {}", e)))?;

        if self.recommendation.max_limit == 0 {
            return Err(ConfigError::Message(
                "recommendation.max_limit must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

/// Apply plain environment variable overrides
///
/// CATALOG_PATH takes precedence over catalog.path from any other source.
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    let catalog_path = std::env::var("CATALOG_PATH").ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(path) = catalog_path {
        builder = builder.set_override("catalog.path", path)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_weights() {
        let weights = ValueWeights::default();
        assert_eq!(weights.risk, 0.5);
        assert_eq!(weights.affordability, 0.5);
        assert_eq!(weights.goal, 0.15);
        assert_eq!(weights.protection.comprehensive, 1.0);
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_load_from_file_with_partial_overrides() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            r#"
            [server]
            port = 9090

            [catalog]
            path = "custom.json"

            [scoring.value]
            affordability = 0.25

            [recommendation]
            default_limit = 3
            "#
        )
        .unwrap();

        let settings = Settings::load_from(file.path()).unwrap();

        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.catalog.path, "custom.json");
        assert_eq!(settings.scoring.value.affordability, 0.25);
        assert_eq!(settings.scoring.value.risk, 0.5);
        assert_eq!(settings.scoring.risk, RiskModel::default());
        assert_eq!(settings.recommendation.default_limit, 3);
        assert_eq!(settings.recommendation.max_limit, 20);
        assert_eq!(settings.premium, PremiumRates::default());
    }

    #[test]
    fn test_rejects_invalid_weights() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            r#"
            [scoring.value]
            affordability = 1.5
            "#
        )
        .unwrap();

        assert!(Settings::load_from(file.path()).is_err());
    }

    #[test]
    fn test_rejects_unsorted_age_bands() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            r#"
            [scoring.risk]
            age_bands = [
                {{ below = 50.0, factor = 2.0 }},
                {{ below = 25.0, factor = 1.0 }},
            ]
            "#
        )
        .unwrap();

        let err = Settings::load_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("scoring.risk"));
    }

    #[test]
    fn test_rejects_negative_premium_base() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            r#"
            [premium.base]
            term_life = 5.0
            health = -8.0
            comprehensive = 12.0
            accident_cover = 3.0
            other = 8.0
            "#
        )
        .unwrap();

        let err = Settings::load_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("premium"));
    }

    #[test]
    fn test_logging_uses_configured_level_and_format() {
        let logging = LoggingSettings {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        };

        assert_eq!(logging.filter_directives(None), "debug");
        assert_eq!(logging.output_format(None), LogFormat::Pretty);
        assert_eq!(LoggingSettings::default().output_format(None), LogFormat::Json);
    }

    #[test]
    fn test_logging_env_takes_precedence() {
        let logging = LoggingSettings {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        };

        assert_eq!(
            logging.filter_directives(Some("policy_optimizer=trace")),
            "policy_optimizer=trace"
        );
        assert_eq!(logging.filter_directives(Some("  ")), "debug");
        assert_eq!(logging.output_format(Some("json")), LogFormat::Json);
        assert_eq!(logging.output_format(Some("")), LogFormat::Pretty);
    }
}
