//! JSON-file account store
//!
//! Stands in for a remote account backend. Every operation reads the whole
//! file and writes it back through a temp file; a mutex serialises writers
//! within the process. Passwords are kept only as salted argon2 hashes.

use super::traits::{AccountService, Registration, User};
use anyhow::{anyhow, Context, Result};
use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use async_trait::async_trait;
use chrono::Utc;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use uuid::Uuid;

/// One line of the account file: the public user plus its verifier
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AccountRecord {
    #[serde(flatten)]
    user: User,
    /// PHC string; absent for accounts written before hashes were stored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    password_hash: Option<String>,
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("Failed to hash password: {e}"))?;
    Ok(hash.to_string())
}

/// Account store backed by a single JSON array on disk
pub struct LocalAccountStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl LocalAccountStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether `password` matches the stored verifier for `email`
    pub async fn verify_password(&self, email: &str, password: &str) -> Result<bool> {
        let records = self.load().await?;
        let Some(hash) = records
            .iter()
            .find(|r| r.user.email == email)
            .and_then(|r| r.password_hash.as_deref())
        else {
            return Ok(false);
        };
        let parsed =
            PasswordHash::new(hash).map_err(|e| anyhow!("Invalid stored hash for {email}: {e}"))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    async fn load(&self) -> Result<Vec<AccountRecord>> {
        let exists = tokio::fs::try_exists(&self.path)
            .await
            .with_context(|| format!("Failed to access {}", self.path.display()))?;
        if !exists {
            return Ok(Vec::new());
        }
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content)
            .with_context(|| format!("Malformed account file {}", self.path.display()))
    }

    async fn save(&self, records: &[AccountRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(records)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, content)
            .await
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("Failed to replace {}", self.path.display()))
    }
}

#[async_trait]
impl AccountService for LocalAccountStore {
    async fn list_users(&self) -> Result<Vec<User>> {
        Ok(self.load().await?.into_iter().map(|r| r.user).collect())
    }

    async fn register(&self, registration: Registration) -> Result<User> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await?;
        if records.iter().any(|r| r.user.email == registration.email) {
            return Err(anyhow!("Email already registered: {}", registration.email));
        }
        let password_hash = hash_password(&registration.password)?;
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: registration.email,
            username: registration.username,
            created_at: now,
            password_updated_at: Some(now),
        };
        records.push(AccountRecord {
            user: user.clone(),
            password_hash: Some(password_hash),
        });
        self.save(&records).await?;
        tracing::info!(user_id = %user.id, "account registered");
        Ok(user)
    }

    async fn update_password(&self, email: &str, password: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await?;
        let record = records
            .iter_mut()
            .find(|r| r.user.email == email)
            .ok_or_else(|| anyhow!("No account for {}", email))?;
        record.password_hash = Some(hash_password(password)?);
        record.user.password_updated_at = Some(Utc::now());
        let user_id = record.user.id;
        self.save(&records).await?;
        tracing::info!(%user_id, "password updated");
        Ok(())
    }
}
