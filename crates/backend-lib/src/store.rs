// ============================
// crates/backend-lib/src/store.rs
// ============================
//! Credential store abstraction with flat-file implementation.
use crate::error::{AppError, ConflictField};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gatekeeper_common::Role;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tokio::fs as tokio_fs;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A stored account record. Created at registration, never mutated.
#[derive(Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    /// Stored lowercased; uniqueness is case-insensitive
    pub email: String,
    /// PHC-formatted hash; the plaintext is never stored
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

// Keep the hash out of debug output and logs.
impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("role", &self.role)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Input for account creation. The role is set by the caller, not the
/// request: self-registration always passes `Role::User`.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// Trait for credential store backends.
///
/// The store is the final arbiter of uniqueness: `insert` must check and
/// reserve atomically, because a separate check-then-insert sequence in the
/// service is race-prone by construction.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Look up an account by (normalized) email
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError>;

    /// Look up an account by username
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AppError>;

    /// Persist a new account. Fails with `AppError::Conflict` if the email
    /// or username is already taken, including when a concurrent insert won
    /// the race after the service's own existence checks.
    async fn insert(&self, new_account: NewAccount) -> Result<Account, AppError>;
}

/// Uniqueness index over the on-disk records.
#[derive(Default)]
struct Index {
    by_email: HashMap<String, Uuid>,
    by_username: HashMap<String, Uuid>,
}

/// Flat-file implementation of the `CredentialStore` trait: one JSON
/// document per account under `<root>/accounts/`, plus an in-memory index
/// rebuilt from disk at open.
pub struct FlatFileStore {
    root: PathBuf,
    index: RwLock<Index>,
}

impl FlatFileStore {
    /// Open a store rooted at `root`, creating directories as needed and
    /// rebuilding the index from existing records.
    pub fn open<P: AsRef<Path>>(root: P) -> anyhow::Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(root.join("accounts"))?;

        let mut index = Index::default();
        for entry in fs::read_dir(root.join("accounts"))? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let account: Account = serde_json::from_str(&fs::read_to_string(&path)?)?;
            index.by_email.insert(account.email.clone(), account.id);
            index.by_username.insert(account.username.clone(), account.id);
        }

        Ok(Self {
            root,
            index: RwLock::new(index),
        })
    }

    fn account_path(&self, id: Uuid) -> PathBuf {
        self.root.join("accounts").join(format!("{id}.json"))
    }

    async fn read_account(&self, id: Uuid) -> Result<Account, AppError> {
        let content = tokio_fs::read_to_string(self.account_path(id)).await?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[async_trait]
impl CredentialStore for FlatFileStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError> {
        let id = self.index.read().await.by_email.get(email).copied();
        match id {
            Some(id) => Ok(Some(self.read_account(id).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AppError> {
        let id = self.index.read().await.by_username.get(username).copied();
        match id {
            Some(id) => Ok(Some(self.read_account(id).await?)),
            None => Ok(None),
        }
    }

    async fn insert(&self, new_account: NewAccount) -> Result<Account, AppError> {
        // The write lock is held across check, durable write, and reserve,
        // so two racing inserts on the same email or username yield exactly
        // one success and one conflict.
        let mut index = self.index.write().await;

        if index.by_email.contains_key(&new_account.email) {
            return Err(AppError::Conflict(ConflictField::Email));
        }
        if index.by_username.contains_key(&new_account.username) {
            return Err(AppError::Conflict(ConflictField::Username));
        }

        let account = Account {
            id: Uuid::new_v4(),
            username: new_account.username,
            email: new_account.email,
            password_hash: new_account.password_hash,
            role: new_account.role,
            created_at: Utc::now(),
        };

        let json = serde_json::to_string_pretty(&account)?;
        tokio_fs::write(self.account_path(account.id), json).await?;

        index.by_email.insert(account.email.clone(), account.id);
        index
            .by_username
            .insert(account.username.clone(), account.id);

        Ok(account)
    }
}
