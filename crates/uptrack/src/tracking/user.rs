use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Administrator,
    StandardUser,
}

impl UserRole {
    pub const fn ordered() -> [Self; 2] {
        [Self::Administrator, Self::StandardUser]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Administrator => "Administrator",
            Self::StandardUser => "Standardbenutzer",
        }
    }
}

/// Account known to the tracker. The role is fixed at construction.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    username: String,
    // Stored as entered; credential handling lives outside this crate.
    password: String,
    role: UserRole,
}

impl User {
    pub fn administrator(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::with_role(username, password, UserRole::Administrator)
    }

    pub fn standard(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::with_role(username, password, UserRole::StandardUser)
    }

    fn with_role(username: impl Into<String>, password: impl Into<String>, role: UserRole) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            role,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn is_administrator(&self) -> bool {
        self.role == UserRole::Administrator
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}
