//! Task lifecycle auditing and report generation for the UpTrack tracker.

pub mod config;
pub mod error;
pub mod reporting;
pub mod telemetry;
pub mod tracking;
