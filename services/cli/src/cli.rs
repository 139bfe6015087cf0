use crate::commands::{run_report, run_summary, ReportArgs, SummaryArgs};
use clap::{Parser, Subcommand};
use tracing::debug;
use uptrack::config::AppConfig;
use uptrack::error::AppError;
use uptrack::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "uptrack",
    about = "Generate UpTrack task and user reports from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a report file into the output directory
    Report(ReportArgs),
    /// Print aggregated report statistics as JSON
    Summary(SummaryArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    debug!(environment = ?config.environment, "configuration loaded");

    match cli.command {
        Command::Report(args) => run_report(&config, args),
        Command::Summary(args) => run_summary(args),
    }
}
