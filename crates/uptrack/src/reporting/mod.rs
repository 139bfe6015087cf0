mod aggregate;
mod config;
mod dispatch;
mod generator;
mod narrative;
mod render;
mod sample;
pub mod views;

pub use aggregate::{
    ActivityPolicy, AggregatedReportData, AssigneeWorkload, AssignmentRule, ReportAggregator,
    TaskSnapshot, UserSnapshot, DUE_SOON_DAYS, UNASSIGNED,
};
pub use config::{ReportConfig, ReportFormat, UnsupportedFormat};
pub use dispatch::{DispatchError, DispatchHook, LoggingDispatchHook};
pub use generator::{report_file_name, ReportError, ReportGenerator};
pub use render::ReportRenderer;
pub use sample::sample_tasks;
pub use views::ReportSummary;
