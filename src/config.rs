use std::fmt;
use std::time::Duration;

use crate::errors::{KountaError, KountaResult};

pub const DEFAULT_BASE_URL: &str = "https://api.kounta.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Immutable settings for talking to Kounta on behalf of one OAuth client.
#[derive(Clone, PartialEq)]
pub struct KountaConfig {
    pub base_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
    /// Authorization code returned to `redirect_url`, exchanged by
    /// `access_token`.
    pub store_code: Option<String>,
    pub timeout: Duration,
}

const REDACTED: &str = "<redacted>";

impl fmt::Debug for KountaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KountaConfig")
            .field("base_url", &self.base_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &REDACTED)
            .field("redirect_url", &self.redirect_url)
            .field("store_code", &self.store_code.as_ref().map(|_| REDACTED))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl KountaConfig {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_url: impl Into<String>,
    ) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_url: redirect_url.into(),
            store_code: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_store_code(mut self, code: impl Into<String>) -> Self {
        self.store_code = Some(code.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read `KOUNTA_*` variables, loading a `.env` file first if present.
    pub fn from_env() -> KountaResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> KountaResult<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| KountaError::Config(format!("{} must be set", key)))
        };

        let mut config = Self::new(
            required("KOUNTA_CLIENT_ID")?,
            required("KOUNTA_CLIENT_SECRET")?,
            required("KOUNTA_REDIRECT_URL")?,
        );

        if let Some(code) = lookup("KOUNTA_STORE_CODE").filter(|v| !v.is_empty()) {
            config = config.with_store_code(code);
        }
        if let Some(base_url) = lookup("KOUNTA_BASE_URL").filter(|v| !v.is_empty()) {
            config = config.with_base_url(base_url);
        }
        if let Some(secs) = lookup("KOUNTA_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| {
                KountaError::Config(format!("KOUNTA_TIMEOUT_SECS must be a number, got '{}'", secs))
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }
}
