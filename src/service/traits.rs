//! Trait abstraction for the account service to enable mocking in tests

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered account as returned by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    /// Credentials are never stored, only when they last changed
    #[serde(default)]
    pub password_updated_at: Option<DateTime<Utc>>,
}

/// Values submitted by the sign-up form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Account operations, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Fetch every existing account
    async fn list_users(&self) -> Result<Vec<User>>;

    /// Create a new account
    async fn register(&self, registration: Registration) -> Result<User>;

    /// Replace the password of an existing account
    async fn update_password(&self, email: &str, password: &str) -> Result<()>;
}
