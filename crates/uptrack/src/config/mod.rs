use crate::reporting::ReportConfig;
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub reports: ReportSettings,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("UPTRACK_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("UPTRACK_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let output_dir = env::var("UPTRACK_REPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("reports"));
        let format = env::var("UPTRACK_REPORT_FORMAT").unwrap_or_else(|_| "txt".to_string());
        let send_report = flag_var("UPTRACK_SEND_REPORT", false)?;
        let recipients = env::var("UPTRACK_REPORT_RECIPIENTS")
            .map(|raw| parse_recipients(&raw))
            .unwrap_or_default();

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            reports: ReportSettings {
                output_dir,
                format,
                send_report,
                recipients,
            },
        })
    }

    /// Report options seeded from the configured defaults.
    pub fn report_config(&self) -> ReportConfig {
        let mut config =
            ReportConfig::new(self.reports.format.clone(), self.reports.output_dir.clone());
        config.send_report = self.reports.send_report;
        config.recipients = self.reports.recipients.clone();
        config
    }
}

/// Defaults applied to generated reports.
#[derive(Debug, Clone)]
pub struct ReportSettings {
    pub output_dir: PathBuf,
    pub format: String,
    pub send_report: bool,
    pub recipients: Vec<String>,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

fn flag_var(name: &'static str, default: bool) -> Result<bool, ConfigError> {
    let Ok(raw) = env::var(name) else {
        return Ok(default);
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag { name, value: raw }),
    }
}

fn parse_recipients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|recipient| !recipient.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidFlag { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidFlag { name, value } => {
                write!(f, "{name} must be a boolean flag, got '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
