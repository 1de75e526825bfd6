//! Harness configuration: where the API lives and how to talk to it.
//!
//! Values come from command-line flags with environment fallbacks; nothing
//! below the CLI reads the environment.

use std::time::Duration;

use clap::Args;
use reqwest::Url;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use thiserror::Error;

use crate::http::HttpTransport;
use crate::scenario::FailurePolicy;

pub const DEFAULT_BASE_URL: &str = "https://reqres.in/api/";
pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid base URL `{url}`: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("base URL `{0}` must use http or https")]
    UnsupportedScheme(String),
    #[error("invalid header `{line}`: {reason}")]
    InvalidHeader { line: String, reason: String },
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

#[derive(Debug, Clone, Args)]
pub struct HarnessConfig {
    /// Base URL every endpoint path is resolved against.
    #[arg(long, env = "REQRES_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// API key, sent as `x-api-key`.
    #[arg(long, env = "REQRES_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Extra request header as `Name: value`. Repeatable.
    #[arg(long = "header", value_name = "NAME: VALUE")]
    pub headers: Vec<String>,

    /// Per-request timeout in milliseconds.
    #[arg(long, env = "REQRES_TIMEOUT_MS", default_value_t = 10_000)]
    pub timeout_ms: u64,

    /// Stop a scenario at its first failing step.
    #[arg(long)]
    pub abort_on_failure: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            headers: Vec::new(),
            timeout_ms: 10_000,
            abort_on_failure: false,
        }
    }
}

impl HarnessConfig {
    /// The base URL, its path ending in `/` so relative paths keep it.
    /// Query and fragment are left untouched.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let raw = self.base_url.trim();
        let mut url = Url::parse(raw).map_err(|source| ConfigError::InvalidBaseUrl {
            url: raw.to_string(),
            source,
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(raw.to_string()));
        }

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    pub fn header_map(&self) -> Result<HeaderMap, ConfigError> {
        let mut headers = HeaderMap::new();

        for line in &self.headers {
            let raw = line.trim();
            if raw.is_empty() {
                continue;
            }

            let (key, value) = raw.split_once(':').ok_or_else(|| ConfigError::InvalidHeader {
                line: raw.to_string(),
                reason: "expected `Name: value`".to_string(),
            })?;
            insert_header(&mut headers, raw, key.trim(), value.trim())?;
        }

        if let Some(key) = self.api_key.as_deref().map(str::trim).filter(|key| !key.is_empty()) {
            insert_header(&mut headers, API_KEY_HEADER, API_KEY_HEADER, key)?;
        }

        Ok(headers)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        if self.abort_on_failure {
            FailurePolicy::Abort
        } else {
            FailurePolicy::Continue
        }
    }

    pub fn transport(&self) -> Result<HttpTransport, ConfigError> {
        HttpTransport::new(self.base_url()?, self.header_map()?, self.timeout())
            .map_err(ConfigError::Client)
    }
}

fn insert_header(
    headers: &mut HeaderMap,
    line: &str,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidHeader {
        line: line.to_string(),
        reason,
    };

    if key.is_empty() {
        return Err(invalid("header name is empty".to_string()));
    }
    let name = HeaderName::from_bytes(key.as_bytes())
        .map_err(|e| invalid(format!("bad name: {e}")))?;
    let mut value =
        HeaderValue::from_str(value).map_err(|e| invalid(format!("bad value: {e}")))?;
    if name.as_str() == API_KEY_HEADER {
        value.set_sensitive(true);
    }
    headers.insert(name, value);
    Ok(())
}
