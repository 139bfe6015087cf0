use std::sync::{Mutex, MutexGuard};

use super::task::Task;
use super::user::User;

/// Read access to the accounts that appear in reports.
pub trait UserSource: Send + Sync {
    fn list_all_users(&self) -> Result<Vec<User>, RepositoryError>;
}

/// Storage abstraction for tasks. Reports only read; the rest serves UI glue.
pub trait TaskSource: Send + Sync {
    fn list_all_tasks(&self) -> Result<Vec<Task>, RepositoryError>;
    fn add(&self, task: Task) -> Result<(), RepositoryError>;
    fn update(&self, task: Task) -> Result<(), RepositoryError>;
    fn delete(&self, task: &Task) -> Result<(), RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists: {0}")]
    Conflict(String),
    #[error("record not found: {0}")]
    NotFound(String),
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable("store mutex poisoned".to_string()))
}

/// Users keyed by username, listed in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with the built-in `admin` account.
    pub fn with_default_admin() -> Self {
        Self {
            users: Mutex::new(vec![User::administrator("admin", "password")]),
        }
    }

    pub fn add_user(&self, user: User) -> Result<(), RepositoryError> {
        let mut users = lock(&self.users)?;
        if users.iter().any(|existing| existing.username() == user.username()) {
            return Err(RepositoryError::Conflict(user.username().to_string()));
        }
        users.push(user);
        Ok(())
    }

    pub fn user_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let users = lock(&self.users)?;
        Ok(users
            .iter()
            .find(|user| user.username() == username)
            .cloned())
    }

    pub fn update_user(&self, user: User) -> Result<(), RepositoryError> {
        let mut users = lock(&self.users)?;
        let slot = users
            .iter_mut()
            .find(|existing| existing.username() == user.username())
            .ok_or_else(|| RepositoryError::NotFound(user.username().to_string()))?;
        *slot = user;
        Ok(())
    }

    pub fn delete_user(&self, username: &str) -> Result<(), RepositoryError> {
        let mut users = lock(&self.users)?;
        let before = users.len();
        users.retain(|user| user.username() != username);
        if users.len() == before {
            return Err(RepositoryError::NotFound(username.to_string()));
        }
        Ok(())
    }
}

impl UserSource for InMemoryUserStore {
    fn list_all_users(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(lock(&self.users)?.clone())
    }
}

/// Tasks keyed by title, listed in insertion order. Titles are not unique
/// across the tracker in general, but this store rejects duplicates so
/// `update` and `delete` have an unambiguous target.
#[derive(Debug, Default)]
pub struct InMemoryTaskStore {
    tasks: Mutex<Vec<Task>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TaskSource for InMemoryTaskStore {
    fn list_all_tasks(&self) -> Result<Vec<Task>, RepositoryError> {
        Ok(lock(&self.tasks)?.clone())
    }

    fn add(&self, task: Task) -> Result<(), RepositoryError> {
        let mut tasks = lock(&self.tasks)?;
        if tasks.iter().any(|existing| existing.title() == task.title()) {
            return Err(RepositoryError::Conflict(task.title().to_string()));
        }
        tasks.push(task);
        Ok(())
    }

    fn update(&self, task: Task) -> Result<(), RepositoryError> {
        let mut tasks = lock(&self.tasks)?;
        let slot = tasks
            .iter_mut()
            .find(|existing| existing.title() == task.title())
            .ok_or_else(|| RepositoryError::NotFound(task.title().to_string()))?;
        *slot = task;
        Ok(())
    }

    fn delete(&self, task: &Task) -> Result<(), RepositoryError> {
        let mut tasks = lock(&self.tasks)?;
        let before = tasks.len();
        tasks.retain(|existing| existing.title() != task.title());
        if tasks.len() == before {
            return Err(RepositoryError::NotFound(task.title().to_string()));
        }
        Ok(())
    }
}
