//! Per-process application context.
//!
//! Built once in [`Cli::execute`](crate::commands::Cli::execute) and passed by
//! reference to every page, so nothing reaches for global state.

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

use crate::api::{ApiClient, ResourceClient, ResourceKind};
use crate::auth::AuthSession;
use crate::config::Config;
use crate::models::User;
use crate::storage::Storage;

pub struct AppContext {
    config: Config,
    config_path: Option<PathBuf>,
    auth: AuthSession,
}

impl AppContext {
    /// Wire the API client and restore the stored identity
    pub fn new(mut config: Config, config_path: Option<PathBuf>, storage: Storage) -> Result<Self> {
        config.ui.sanitize();
        let api = ApiClient::new(config.api.clone(), storage)?;
        let auth = AuthSession::restore(api);

        Ok(Self {
            config,
            config_path,
            auth,
        })
    }

    /// Load the config file and open the session database
    pub fn from_env(config_path: Option<PathBuf>) -> Result<Self> {
        let config = Config::load(config_path.as_deref())?;
        let storage = Storage::init()?;
        Self::new(config, config_path, storage)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    pub fn auth(&self) -> &AuthSession {
        &self.auth
    }

    pub fn api(&self) -> &ApiClient {
        self.auth.api()
    }

    pub fn resource<K: ResourceKind>(&self) -> ResourceClient<K> {
        ResourceClient::new(self.api().clone())
    }

    /// The logged-in user, or an error telling how to log in
    pub fn require_user(&self) -> Result<User> {
        match self.auth.current_user() {
            Some(user) => Ok(user),
            None => bail!("Not logged in. Use 'gym-console login' to authenticate."),
        }
    }
}
