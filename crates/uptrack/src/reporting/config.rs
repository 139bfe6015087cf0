use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    Html,
    Txt,
    Csv,
    Pdf,
}

impl ReportFormat {
    pub const fn ordered() -> [Self; 4] {
        [Self::Html, Self::Txt, Self::Csv, Self::Pdf]
    }

    /// File extension, also the accepted configuration value.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Txt => "txt",
            Self::Csv => "csv",
            Self::Pdf => "pdf",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported report format '{0}', expected one of html, txt, csv, pdf")]
pub struct UnsupportedFormat(pub String);

impl FromStr for ReportFormat {
    type Err = UnsupportedFormat;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ordered()
            .into_iter()
            .find(|format| format.extension() == value)
            .ok_or_else(|| UnsupportedFormat(value.to_string()))
    }
}

/// Options for a single report run. The format stays a raw string so that
/// validation happens when the report is generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    pub format: String,
    pub include_tasks: bool,
    pub include_users: bool,
    pub include_statistics: bool,
    pub include_charts: bool,
    pub output_dir: PathBuf,
    pub send_report: bool,
    pub recipients: Vec<String>,
    pub use_sample_data: bool,
}

impl ReportConfig {
    pub fn new(format: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            format: format.into(),
            include_tasks: true,
            include_users: true,
            include_statistics: true,
            include_charts: false,
            output_dir: output_dir.into(),
            send_report: false,
            recipients: Vec::new(),
            use_sample_data: true,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn with_tasks(mut self, include: bool) -> Self {
        self.include_tasks = include;
        self
    }

    pub fn with_users(mut self, include: bool) -> Self {
        self.include_users = include;
        self
    }

    pub fn with_statistics(mut self, include: bool) -> Self {
        self.include_statistics = include;
        self
    }

    pub fn with_charts(mut self, include: bool) -> Self {
        self.include_charts = include;
        self
    }

    pub fn with_sample_data(mut self, enabled: bool) -> Self {
        self.use_sample_data = enabled;
        self
    }

    /// Request dispatch of the finished report to the given recipients.
    pub fn with_dispatch(mut self, recipients: Vec<String>) -> Self {
        self.send_report = true;
        self.recipients = recipients;
        self
    }
}
