use crate::tracking::{TaskStatus, UserRole};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct RoleCountEntry {
    pub role: UserRole,
    pub role_label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusCountEntry {
    pub status: TaskStatus,
    pub status_label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductivityEntry {
    pub assignee: String,
    pub total: usize,
    pub completed: usize,
    pub completion_rate: f64,
}

/// Ordered, serializable view of one aggregation run.
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub total_users: usize,
    pub active_users: usize,
    pub inactive_users: usize,
    pub role_counts: Vec<RoleCountEntry>,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub open_tasks: usize,
    pub canceled_tasks: usize,
    pub completion_rate: f64,
    pub status_counts: Vec<StatusCountEntry>,
    pub productivity: Vec<ProductivityEntry>,
    pub overdue_tasks: usize,
    pub due_soon_tasks: usize,
    pub used_sample_data: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub invalid_due_dates: Vec<String>,
}
