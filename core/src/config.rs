//! Client configuration, from code or from the environment.

use std::time::Duration;

use crate::client::DEFAULT_BASE_URL;
use crate::error::ApiError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const ENV_BASE_URL: &str = "YCLIENTS_BASE_URL";
pub const ENV_PARTNER_TOKEN: &str = "YCLIENTS_PARTNER_TOKEN";
pub const ENV_TIMEOUT_SECS: &str = "YCLIENTS_TIMEOUT_SECS";

#[derive(Clone)]
pub struct YclientsConfig {
    pub base_url: String,
    pub partner_token: Option<String>,
    /// Applied to the whole request, connect through body.
    pub timeout: Duration,
}

impl Default for YclientsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            partner_token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl std::fmt::Debug for YclientsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YclientsConfig")
            .field("base_url", &self.base_url)
            .field("partner_token", &self.partner_token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl YclientsConfig {
    /// Read `YCLIENTS_BASE_URL`, `YCLIENTS_PARTNER_TOKEN` and
    /// `YCLIENTS_TIMEOUT_SECS`, falling back to defaults for unset values.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let mut config = Self::default();
        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            config.base_url = base_url;
        }
        config.partner_token = lookup(ENV_PARTNER_TOKEN).filter(|v| !v.trim().is_empty());
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|e| ApiError::Config(format!("{ENV_TIMEOUT_SECS}={raw:?}: {e}")))?;
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }
}
