//! Provider session management
//!
//! One `SessionManager` is built by the host application and shared (behind
//! an `Arc`) by every adapter. The first successful `ensure_ready()` creates
//! the HTTP client and binds the credential; every later call reuses it.

use crate::config::Config;
use crate::constants::api::USER_AGENT;
use crate::error::{Error, Result};
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::info;

/// A ready provider handle: shared HTTP client plus credential
#[derive(Debug)]
pub struct Session {
    client: reqwest::Client,
    api_key: String,
}

impl Session {
    /// The shared HTTP client (connection pool lives for the whole process)
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// The bound provider credential
    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

/// Lazily initialized, write-once provider session
#[derive(Debug)]
pub struct SessionManager {
    api_key: Option<String>,
    timeout: Duration,
    session: OnceCell<Session>,
}

impl SessionManager {
    /// Create a manager; nothing is initialized until `ensure_ready()`
    pub fn new(api_key: Option<String>, timeout: Duration) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            timeout,
            session: OnceCell::new(),
        }
    }

    /// Create a manager from configuration (credential + timeout)
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.api_key(),
            Duration::from_secs(config.provider.timeout_secs),
        )
    }

    /// Make sure the session exists, creating it on first use
    ///
    /// Fails with `Error::ProviderUnavailable` when no credential is
    /// configured or the client cannot be built. A failed attempt leaves the
    /// manager uninitialized, so a later caller-initiated query tries again.
    pub async fn ensure_ready(&self) -> Result<&Session> {
        self.session
            .get_or_try_init(|| async { self.initialize() })
            .await
    }

    /// The session, if it has been initialized
    pub fn get(&self) -> Option<&Session> {
        self.session.get()
    }

    /// Has `ensure_ready()` succeeded at least once?
    pub fn is_ready(&self) -> bool {
        self.session.initialized()
    }

    fn initialize(&self) -> Result<Session> {
        let api_key = self.api_key.clone().ok_or_else(|| {
            Error::ProviderUnavailable("no API credential configured".to_string())
        })?;

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(self.timeout)
            .build()
            .map_err(|e| {
                Error::ProviderUnavailable(format!("Failed to build HTTP client: {}", e))
            })?;

        info!(timeout_secs = self.timeout.as_secs(), "provider session initialized");

        Ok(Session { client, api_key })
    }
}
