//! Engine configuration

use std::env;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use url::Url;

use crate::infrastructure::dnd5e_api::{DEFAULT_DND5E_API_URL, DEFAULT_REQUEST_TIMEOUT};
use crate::use_cases::DetailFailurePolicy;

/// Engine configuration loaded from environment
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Base URL of the spell data source, including the `/api` prefix
    pub api_url: String,
    /// Per-request timeout; `None` waits indefinitely
    pub request_timeout: Option<Duration>,
    /// Handling of per-item failures during catalog loading
    pub detail_failure: DetailFailurePolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_DND5E_API_URL.to_string(),
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
            detail_failure: DetailFailurePolicy::FailBatch,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup("SPELLTOME_API_URL") {
            config = config
                .with_api_url(&url)
                .context("SPELLTOME_API_URL must be an absolute http(s) URL")?;
        }

        if let Some(secs) = lookup("SPELLTOME_REQUEST_TIMEOUT_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .context("SPELLTOME_REQUEST_TIMEOUT_SECS must be a whole number of seconds")?;
            config.request_timeout = (secs > 0).then_some(Duration::from_secs(secs));
        }

        if let Some(partial) = lookup("SPELLTOME_PARTIAL_RESULTS") {
            if parse_flag(&partial).context("SPELLTOME_PARTIAL_RESULTS must be true or false")? {
                config.detail_failure = DetailFailurePolicy::SkipFailed;
            }
        }

        Ok(config)
    }

    /// Replace the data source URL after checking it is an absolute http(s) URL.
    pub fn with_api_url(mut self, url: &str) -> Result<Self> {
        let url = url.trim();
        let parsed = Url::parse(url).with_context(|| format!("invalid URL '{url}'"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!("unsupported URL scheme '{}'", parsed.scheme());
        }
        self.api_url = url.trim_end_matches('/').to_string();
        Ok(self)
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("unrecognized flag value '{other}'"),
    }
}
