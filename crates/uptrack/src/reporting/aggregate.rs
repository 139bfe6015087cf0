use super::config::{ReportConfig, ReportFormat};
use super::narrative;
use super::sample::sample_tasks;
use super::views::{ProductivityEntry, ReportSummary, RoleCountEntry, StatusCountEntry};
use crate::tracking::{Task, TaskStatus, User, UserRole};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Assignee key for tasks the assignment rule leaves without an owner.
pub const UNASSIGNED: &str = "Nicht zugewiesen";

/// Open tasks due within this many days of today (inclusive) count as due soon.
pub const DUE_SOON_DAYS: i64 = 7;

/// Decides which users are reported as active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ActivityPolicy {
    #[default]
    AllActive,
    ActiveSet(HashSet<String>),
}

impl ActivityPolicy {
    pub fn active_set<I, S>(usernames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::ActiveSet(usernames.into_iter().map(Into::into).collect())
    }

    pub fn is_active(&self, user: &User) -> bool {
        match self {
            Self::AllActive => true,
            Self::ActiveSet(active) => active.contains(user.username()),
        }
    }
}

/// Decides which assignee key a task is attributed to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AssignmentRule {
    /// The task's own assignee, or [`UNASSIGNED`].
    #[default]
    Explicit,
    /// The task's own assignee when set, otherwise the next pool entry.
    RoundRobin(Vec<String>),
}

struct Assigner<'a> {
    rule: &'a AssignmentRule,
    cursor: usize,
}

impl<'a> Assigner<'a> {
    fn new(rule: &'a AssignmentRule) -> Self {
        Self { rule, cursor: 0 }
    }

    fn assign(&mut self, task: &Task) -> String {
        if let Some(assignee) = task.assignee() {
            return assignee.to_string();
        }

        match self.rule {
            AssignmentRule::RoundRobin(pool) if !pool.is_empty() => {
                let assignee = pool[self.cursor % pool.len()].clone();
                self.cursor += 1;
                assignee
            }
            _ => UNASSIGNED.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserSnapshot {
    pub username: String,
    pub role: UserRole,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskSnapshot {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub due_date: Option<String>,
    pub assignee: String,
    pub history: Vec<String>,
}

/// Tasks attributed to one assignee key.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AssigneeWorkload {
    pub assignee: String,
    pub task_titles: Vec<String>,
    pub completed: usize,
}

impl AssigneeWorkload {
    pub fn total(&self) -> usize {
        self.task_titles.len()
    }

    pub fn completion_rate(&self) -> f64 {
        percentage(self.completed, self.total())
    }
}

/// Counts and snapshots for one report run.
#[derive(Debug, Clone, Default)]
pub struct AggregatedReportData {
    pub users: Vec<UserSnapshot>,
    pub total_users: usize,
    pub active_users: usize,
    pub inactive_users: usize,
    pub role_counts: HashMap<UserRole, usize>,

    pub tasks: Vec<TaskSnapshot>,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub open_tasks: usize,
    pub canceled_tasks: usize,
    pub completion_rate: f64,
    pub status_counts: HashMap<TaskStatus, usize>,
    /// Assignees in order of first appearance.
    pub assignments: Vec<AssigneeWorkload>,
    pub overdue_count: usize,
    pub due_soon_count: usize,

    pub used_sample_data: bool,
    /// Titles of open tasks whose due date could not be parsed.
    pub invalid_due_dates: Vec<String>,
}

impl AggregatedReportData {
    pub fn role_count(&self, role: UserRole) -> usize {
        self.role_counts.get(&role).copied().unwrap_or(0)
    }

    pub fn status_count(&self, status: TaskStatus) -> usize {
        self.status_counts.get(&status).copied().unwrap_or(0)
    }

    pub fn workload(&self, assignee: &str) -> Option<&AssigneeWorkload> {
        self.assignments
            .iter()
            .find(|workload| workload.assignee == assignee)
    }

    pub fn summary(&self) -> ReportSummary {
        let role_counts = UserRole::ordered()
            .into_iter()
            .filter_map(|role| {
                self.role_counts.get(&role).map(|count| RoleCountEntry {
                    role,
                    role_label: role.label(),
                    count: *count,
                })
            })
            .collect();

        let status_counts = TaskStatus::ordered()
            .into_iter()
            .filter_map(|status| {
                self.status_counts
                    .get(&status)
                    .map(|count| StatusCountEntry {
                        status,
                        status_label: status.label(),
                        count: *count,
                    })
            })
            .collect();

        let productivity = self
            .assignments
            .iter()
            .map(|workload| ProductivityEntry {
                assignee: workload.assignee.clone(),
                total: workload.total(),
                completed: workload.completed,
                completion_rate: workload.completion_rate(),
            })
            .collect();

        ReportSummary {
            total_users: self.total_users,
            active_users: self.active_users,
            inactive_users: self.inactive_users,
            role_counts,
            total_tasks: self.total_tasks,
            completed_tasks: self.completed_tasks,
            open_tasks: self.open_tasks,
            canceled_tasks: self.canceled_tasks,
            completion_rate: self.completion_rate,
            status_counts,
            productivity,
            overdue_tasks: self.overdue_count,
            due_soon_tasks: self.due_soon_count,
            used_sample_data: self.used_sample_data,
            invalid_due_dates: self.invalid_due_dates.clone(),
        }
    }
}

enum DueBucket {
    Overdue,
    DueSoon,
    Later,
    Invalid,
}

/// Exactly `YYYY-MM-DD`: ten ASCII characters, zero-padded, no sign or padding.
fn is_iso_date(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(index, byte)| match index {
            4 | 7 => *byte == b'-',
            _ => byte.is_ascii_digit(),
        })
}

fn due_bucket(raw: &str, today: NaiveDate) -> DueBucket {
    if !is_iso_date(raw) {
        return DueBucket::Invalid;
    }
    let Ok(due) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") else {
        return DueBucket::Invalid;
    };

    if due < today {
        DueBucket::Overdue
    } else if (due - today).num_days() <= DUE_SOON_DAYS {
        DueBucket::DueSoon
    } else {
        DueBucket::Later
    }
}

pub(crate) fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Reduces users and tasks into report statistics using injected,
/// deterministic activity and assignment rules.
#[derive(Debug, Clone, Default)]
pub struct ReportAggregator {
    activity: ActivityPolicy,
    assignment: AssignmentRule,
}

impl ReportAggregator {
    pub fn new(activity: ActivityPolicy, assignment: AssignmentRule) -> Self {
        Self {
            activity,
            assignment,
        }
    }

    pub fn activity(&self) -> &ActivityPolicy {
        &self.activity
    }

    pub fn assignment(&self) -> &AssignmentRule {
        &self.assignment
    }

    pub fn aggregate(
        &self,
        users: &[User],
        tasks: &[Task],
        today: NaiveDate,
        use_sample_data: bool,
    ) -> AggregatedReportData {
        let mut data = AggregatedReportData::default();

        for user in users {
            let active = self.activity.is_active(user);
            *data.role_counts.entry(user.role()).or_default() += 1;
            if active {
                data.active_users += 1;
            } else {
                data.inactive_users += 1;
            }
            data.users.push(UserSnapshot {
                username: user.username().to_string(),
                role: user.role(),
                active,
            });
        }
        data.total_users = users.len();

        let samples;
        let tasks = if tasks.is_empty() && use_sample_data {
            samples = sample_tasks();
            debug!(count = samples.len(), "no tasks stored; using sample tasks");
            data.used_sample_data = true;
            samples.as_slice()
        } else {
            tasks
        };

        let mut assigner = Assigner::new(&self.assignment);
        for task in tasks {
            let status = task.status();
            *data.status_counts.entry(status).or_default() += 1;
            match status {
                TaskStatus::Completed => data.completed_tasks += 1,
                TaskStatus::Open => data.open_tasks += 1,
                TaskStatus::Canceled => data.canceled_tasks += 1,
                TaskStatus::Reopened => {}
            }

            let assignee = assigner.assign(task);
            record_assignment(&mut data.assignments, &assignee, task);

            if status == TaskStatus::Open {
                if let Some(raw) = task.due_date() {
                    match due_bucket(raw, today) {
                        DueBucket::Overdue => data.overdue_count += 1,
                        DueBucket::DueSoon => data.due_soon_count += 1,
                        DueBucket::Later => {}
                        DueBucket::Invalid => {
                            warn!(
                                task = task.title(),
                                due_date = raw,
                                "invalid due date; skipping due-date analysis"
                            );
                            data.invalid_due_dates.push(task.title().to_string());
                        }
                    }
                }
            }

            data.tasks.push(TaskSnapshot {
                title: task.title().to_string(),
                description: task.description().to_string(),
                status,
                due_date: task.due_date().map(str::to_string),
                assignee,
                history: task.history(),
            });
        }

        data.total_tasks = tasks.len();
        data.completion_rate = percentage(data.completed_tasks, data.total_tasks);

        data
    }

    /// Builds the markdown-like text body consumed by the renderer.
    pub fn narrative(
        &self,
        data: &AggregatedReportData,
        config: &ReportConfig,
        format: ReportFormat,
        generated_at: NaiveDateTime,
    ) -> String {
        narrative::build(data, config, format, generated_at)
    }
}

fn record_assignment(assignments: &mut Vec<AssigneeWorkload>, assignee: &str, task: &Task) {
    let index = match assignments
        .iter()
        .position(|workload| workload.assignee == assignee)
    {
        Some(index) => index,
        None => {
            assignments.push(AssigneeWorkload {
                assignee: assignee.to_string(),
                ..AssigneeWorkload::default()
            });
            assignments.len() - 1
        }
    };

    let workload = &mut assignments[index];
    workload.task_titles.push(task.title().to_string());
    if task.status() == TaskStatus::Completed {
        workload.completed += 1;
    }
}
