mod audit;
mod repository;
mod task;
mod user;

pub use audit::AuditLog;
pub use repository::{
    InMemoryTaskStore, InMemoryUserStore, RepositoryError, TaskSource, UserSource,
};
pub use task::{Task, TaskStatus};
pub use user::{User, UserRole};
