use std::fs::{self, File};
use std::io::{self, BufWriter, Write as _};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use tracing::{debug, error, info, warn};

use super::aggregate::ReportAggregator;
use super::config::{ReportConfig, ReportFormat, UnsupportedFormat};
use super::dispatch::{DispatchHook, LoggingDispatchHook};
use super::render::ReportRenderer;
use crate::tracking::{RepositoryError, TaskSource, UserSource};

const FILE_PREFIX: &str = "UpTrack_Report_";
const FILE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Name of the report file written for `format` at `now`.
pub fn report_file_name(format: ReportFormat, now: NaiveDateTime) -> String {
    format!(
        "{FILE_PREFIX}{}.{}",
        now.format(FILE_TIMESTAMP_FORMAT),
        format.extension()
    )
}

/// Error raised while producing a report file.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error(transparent)]
    Format(#[from] UnsupportedFormat),
    #[error("unable to create output directory {}: {source}", .path.display())]
    OutputDir { path: PathBuf, source: io::Error },
    #[error("unable to load report data: {0}")]
    Source(#[from] RepositoryError),
    #[error("unable to write report {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Orchestrates validation, aggregation, rendering, file output and dispatch.
pub struct ReportGenerator<U, T> {
    users: Arc<U>,
    tasks: Arc<T>,
    aggregator: ReportAggregator,
    dispatch: Box<dyn DispatchHook>,
}

impl<U, T> ReportGenerator<U, T>
where
    U: UserSource + 'static,
    T: TaskSource + 'static,
{
    pub fn new(users: Arc<U>, tasks: Arc<T>) -> Self {
        Self {
            users,
            tasks,
            aggregator: ReportAggregator::default(),
            dispatch: Box::new(LoggingDispatchHook),
        }
    }

    pub fn with_aggregator(mut self, aggregator: ReportAggregator) -> Self {
        self.aggregator = aggregator;
        self
    }

    pub fn with_dispatch(mut self, dispatch: Box<dyn DispatchHook>) -> Self {
        self.dispatch = dispatch;
        self
    }

    pub fn aggregator(&self) -> &ReportAggregator {
        &self.aggregator
    }

    /// Generate a report stamped with the local time. Returns whether the
    /// report file was written; failures are logged.
    pub fn generate_report(&self, config: &ReportConfig) -> bool {
        self.generate_report_at(config, Local::now().naive_local())
    }

    pub fn generate_report_at(&self, config: &ReportConfig, now: NaiveDateTime) -> bool {
        match self.try_generate_report_at(config, now) {
            Ok(_) => true,
            Err(err) => {
                error!(%err, "report generation failed");
                false
            }
        }
    }

    /// Generate a report and return the path of the written file.
    pub fn try_generate_report_at(
        &self,
        config: &ReportConfig,
        now: NaiveDateTime,
    ) -> Result<PathBuf, ReportError> {
        info!(format = %config.format, "starting report generation");

        let format: ReportFormat = config.format.parse()?;
        let output_dir = config.output_dir();
        ensure_output_dir(output_dir)?;
        let path = output_dir.join(report_file_name(format, now));

        let users = self.users.list_all_users()?;
        let tasks = self.tasks.list_all_tasks()?;
        let data = self
            .aggregator
            .aggregate(&users, &tasks, now.date(), config.use_sample_data);
        if data.used_sample_data {
            info!(
                count = data.total_tasks,
                "no tasks found; report uses sample tasks"
            );
        }

        let narrative = self.aggregator.narrative(&data, config, format, now);
        let content = ReportRenderer::render(&narrative, format);
        write_report(&path, &content).map_err(|source| ReportError::Write {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), "report written");

        if config.send_report && !config.recipients.is_empty() {
            if let Err(err) = self.dispatch.send(&path, &config.recipients) {
                warn!(%err, "report was created but could not be dispatched");
            }
        }

        Ok(path)
    }
}

fn ensure_output_dir(dir: &Path) -> Result<(), ReportError> {
    if dir.is_dir() {
        return Ok(());
    }

    debug!(dir = %dir.display(), "creating report output directory");
    fs::create_dir_all(dir).map_err(|source| ReportError::OutputDir {
        path: dir.to_path_buf(),
        source,
    })
}

fn write_report(path: &Path, content: &str) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(content.as_bytes())?;
    writer.flush()
}
