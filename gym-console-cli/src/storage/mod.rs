// Durable session storage backed by sled.
// Tokens and the cached user live under three keys in one tree.

use anyhow::{Context, Result};
use sled::{Batch, Db, Tree};
use std::path::Path;

use crate::models::User;

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub const CURRENT_USER_KEY: &str = "currentUser";

const SESSION_TREE: &str = "session";

/// Storage manager for the local embedded database
#[derive(Clone)]
pub struct Storage {
    db: Db,
}

impl Storage {
    /// Open the database at the configured data directory
    pub fn init() -> Result<Self> {
        let path = crate::config::Config::data_dir()?;
        Self::open(&path)
    }

    /// Open the database at an explicit path
    pub fn open(path: &Path) -> Result<Self> {
        tracing::debug!("Opening session database at {:?}", path);

        let db = sled::open(path).context("Failed to open sled database")?;

        Ok(Self { db })
    }

    /// In-memory database, discarded on drop
    pub fn temporary() -> Result<Self> {
        let db = sled::Config::new()
            .temporary(true)
            .open()
            .context("Failed to open temporary sled database")?;

        Ok(Self { db })
    }

    fn session_tree(&self) -> Result<Tree> {
        self.db
            .open_tree(SESSION_TREE)
            .context("Failed to open session tree")
    }

    /// Read a string value
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let tree = self.session_tree()?;

        match tree.get(key).context("Failed to read session key")? {
            Some(value) => {
                let value = String::from_utf8(value.to_vec())
                    .with_context(|| format!("Session key {} is not valid UTF-8", key))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Write a string value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let tree = self.session_tree()?;

        tree.insert(key, value.as_bytes())
            .context("Failed to write session key")?;

        self.db.flush().context("Failed to flush database")?;
        Ok(())
    }

    /// Persist tokens and identity in one batch
    pub fn save_session(&self, access: &str, refresh: &str, user: &User) -> Result<()> {
        let tree = self.session_tree()?;
        let user_json = serde_json::to_string(user).context("Failed to serialize user")?;

        let mut batch = Batch::default();
        batch.insert(ACCESS_TOKEN_KEY, access.as_bytes());
        batch.insert(REFRESH_TOKEN_KEY, refresh.as_bytes());
        batch.insert(CURRENT_USER_KEY, user_json.as_bytes());

        tree.apply_batch(batch)
            .context("Failed to write session")?;

        self.db.flush().context("Failed to flush database")?;

        tracing::debug!("Saved session for {}", user.username);
        Ok(())
    }

    /// Stored identity, if any
    pub fn load_user(&self) -> Result<Option<User>> {
        let Some(raw) = self.get(CURRENT_USER_KEY)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                tracing::warn!("Ignoring unreadable stored identity: {}", e);
                Ok(None)
            }
        }
    }

    pub fn access_token(&self) -> Result<Option<String>> {
        Ok(self.get(ACCESS_TOKEN_KEY)?.filter(|t| !t.is_empty()))
    }

    /// Remove tokens and identity together
    pub fn clear_session(&self) -> Result<()> {
        let tree = self.session_tree()?;

        let mut batch = Batch::default();
        batch.remove(ACCESS_TOKEN_KEY);
        batch.remove(REFRESH_TOKEN_KEY);
        batch.remove(CURRENT_USER_KEY);

        tree.apply_batch(batch)
            .context("Failed to clear session")?;

        self.db.flush().context("Failed to flush database")?;

        tracing::debug!("Cleared stored session");
        Ok(())
    }
}
