use chrono::{Local, NaiveDate};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use uptrack::config::AppConfig;
use uptrack::error::AppError;
use uptrack::reporting::{ActivityPolicy, AssignmentRule, ReportAggregator, ReportGenerator};
use uptrack::tracking::{InMemoryTaskStore, InMemoryUserStore, TaskSource, UserSource};

#[derive(Args, Debug, Default)]
pub(crate) struct PolicyArgs {
    /// Usernames reported as active (repeatable). All users are active when omitted.
    #[arg(long = "active-user")]
    pub(crate) active_users: Vec<String>,
    /// Assignee pool for tasks without an owner, used in rotation (repeatable)
    #[arg(long = "assignee")]
    pub(crate) assignees: Vec<String>,
    /// Report an empty task store as empty instead of using the sample tasks
    #[arg(long)]
    pub(crate) no_sample_data: bool,
}

impl PolicyArgs {
    fn aggregator(&self) -> ReportAggregator {
        let activity = if self.active_users.is_empty() {
            ActivityPolicy::AllActive
        } else {
            ActivityPolicy::active_set(self.active_users.iter().cloned())
        };
        let assignment = if self.assignees.is_empty() {
            AssignmentRule::Explicit
        } else {
            AssignmentRule::RoundRobin(self.assignees.clone())
        };
        ReportAggregator::new(activity, assignment)
    }
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Output format: html, txt, csv or pdf (defaults to UPTRACK_REPORT_FORMAT)
    #[arg(long)]
    pub(crate) format: Option<String>,
    /// Directory for the report file (defaults to UPTRACK_REPORT_DIR)
    #[arg(long)]
    pub(crate) output_dir: Option<PathBuf>,
    /// Append the visualization section
    #[arg(long)]
    pub(crate) charts: bool,
    /// Leave out the user section
    #[arg(long)]
    pub(crate) no_users: bool,
    /// Leave out the task section
    #[arg(long)]
    pub(crate) no_tasks: bool,
    /// Leave out statistics blocks
    #[arg(long)]
    pub(crate) no_statistics: bool,
    /// Dispatch the finished report to this recipient (repeatable)
    #[arg(long = "recipient")]
    pub(crate) recipients: Vec<String>,
    #[command(flatten)]
    pub(crate) policy: PolicyArgs,
}

#[derive(Args, Debug)]
pub(crate) struct SummaryArgs {
    /// Evaluation date for due-date buckets (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    #[command(flatten)]
    pub(crate) policy: PolicyArgs,
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn demo_stores() -> (Arc<InMemoryUserStore>, Arc<InMemoryTaskStore>) {
    (
        Arc::new(InMemoryUserStore::with_default_admin()),
        Arc::new(InMemoryTaskStore::new()),
    )
}

pub(crate) fn run_report(config: &AppConfig, args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        format,
        output_dir,
        charts,
        no_users,
        no_tasks,
        no_statistics,
        recipients,
        policy,
    } = args;

    let mut report = config.report_config();
    if let Some(format) = format {
        report.format = format;
    }
    if let Some(output_dir) = output_dir {
        report.output_dir = output_dir;
    }
    if !recipients.is_empty() {
        report = report.with_dispatch(recipients);
    }
    let report = report
        .with_charts(charts)
        .with_users(!no_users)
        .with_tasks(!no_tasks)
        .with_statistics(!no_statistics)
        .with_sample_data(!policy.no_sample_data);

    let (users, tasks) = demo_stores();
    let generator = ReportGenerator::new(users, tasks).with_aggregator(policy.aggregator());
    let path = generator.try_generate_report_at(&report, Local::now().naive_local())?;

    println!("Report written to {}", path.display());
    Ok(())
}

pub(crate) fn run_summary(args: SummaryArgs) -> Result<(), AppError> {
    let SummaryArgs { today, policy } = args;
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    let (users, tasks) = demo_stores();
    let data = policy.aggregator().aggregate(
        &users.list_all_users()?,
        &tasks.list_all_tasks()?,
        today,
        !policy.no_sample_data,
    );

    let json = serde_json::to_string_pretty(&data.summary()).map_err(std::io::Error::from)?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_iso_dates() {
        assert_eq!(
            parse_date("2026-10-14"),
            Ok(NaiveDate::from_ymd_opt(2026, 10, 14).expect("valid date"))
        );
        assert!(parse_date("14.10.2026").is_err());
    }

    #[test]
    fn policy_args_default_to_explicit_all_active() {
        let aggregator = PolicyArgs::default().aggregator();

        assert_eq!(aggregator.activity(), &ActivityPolicy::AllActive);
        assert_eq!(aggregator.assignment(), &AssignmentRule::Explicit);
    }

    #[test]
    fn policy_args_build_round_robin_pool() {
        let args = PolicyArgs {
            active_users: vec!["admin".to_string()],
            assignees: vec!["alice".to_string(), "bob".to_string()],
            no_sample_data: false,
        };
        let aggregator = args.aggregator();

        assert_eq!(
            aggregator.assignment(),
            &AssignmentRule::RoundRobin(vec!["alice".to_string(), "bob".to_string()])
        );
        assert_eq!(aggregator.activity(), &ActivityPolicy::active_set(["admin"]));
    }
}
