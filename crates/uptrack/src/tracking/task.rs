use super::audit::AuditLog;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Open,
    Completed,
    Canceled,
    Reopened,
}

impl TaskStatus {
    pub const fn ordered() -> [Self; 4] {
        [Self::Open, Self::Completed, Self::Canceled, Self::Reopened]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Completed => "Completed",
            Self::Canceled => "Canceled",
            Self::Reopened => "Reopened",
        }
    }

    /// Label printed in generated reports.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "Offen",
            Self::Completed => "Abgeschlossen",
            Self::Canceled => "Abgebrochen",
            Self::Reopened => "Wiedereröffnet",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tracked piece of work. Every mutation goes through a method that also
/// appends to the task's audit log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    title: String,
    description: String,
    status: TaskStatus,
    due_date: Option<String>,
    assignee: Option<String>,
    history: AuditLog,
}

impl Task {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        let mut history = AuditLog::new();
        history.append("task created");

        Self {
            title: title.into(),
            description: description.into(),
            status: TaskStatus::Open,
            due_date: None,
            assignee: None,
            history,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    /// Raw due date as entered; parsing happens when reports are built.
    pub fn due_date(&self) -> Option<&str> {
        self.due_date.as_deref()
    }

    pub fn assignee(&self) -> Option<&str> {
        self.assignee.as_deref()
    }

    pub fn history(&self) -> Vec<String> {
        self.history.entries()
    }

    pub fn history_len(&self) -> usize {
        self.history.count()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.record(format!("title changed to {}", self.title));
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
        self.record(format!("description changed to {}", self.description));
    }

    pub fn set_due_date(&mut self, due_date: impl Into<String>) {
        let due_date = due_date.into();
        self.record(format!("due date set to {due_date}"));
        self.due_date = Some(due_date);
    }

    pub fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
        self.record(format!("status changed to {status}"));
    }

    pub fn assign_to(&mut self, username: impl Into<String>) {
        let username = username.into();
        self.record(format!("assigned to {username}"));
        self.assignee = Some(username);
    }

    pub fn complete(&mut self) {
        self.status = TaskStatus::Completed;
        self.record("task completed");
    }

    pub fn reopen(&mut self) {
        self.status = TaskStatus::Reopened;
        self.record("task reopened");
    }

    pub fn cancel(&mut self) {
        self.status = TaskStatus::Canceled;
        self.record("task canceled");
    }

    fn record(&mut self, event: impl Into<String>) {
        self.history.append(event);
    }
}
