//! Upstream feed configuration parsing from environment variables.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;
use url::Url;

pub const DEFAULT_FEED_URL: &str = "https://sun-win.onrender.com/api/history";

/// Feed environment configuration
#[derive(Debug, Clone)]
pub struct FeedEnvConfig {
    pub api_url: Url,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl FeedEnvConfig {
    pub fn from_env() -> Result<Self> {
        let raw_url = env::var("FEED_API_URL").unwrap_or_else(|_| DEFAULT_FEED_URL.to_string());
        let api_url = Url::parse(&raw_url)
            .with_context(|| format!("Invalid FEED_API_URL: {}", raw_url))?;
        if !matches!(api_url.scheme(), "http" | "https") {
            anyhow::bail!("FEED_API_URL must be http or https, got {}", api_url.scheme());
        }

        let timeout_secs = parse_secs("FEED_TIMEOUT_SECS", 30)?;
        let connect_timeout_secs = parse_secs("FEED_CONNECT_TIMEOUT_SECS", 10)?;

        Ok(Self {
            api_url,
            timeout: Duration::from_secs(timeout_secs),
            connect_timeout: Duration::from_secs(connect_timeout_secs),
        })
    }
}

// Unparseable values fall back to the default; zero is rejected.
fn parse_secs(key: &str, default: u64) -> Result<u64> {
    let secs = env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default);
    if secs == 0 {
        anyhow::bail!("{} must be greater than zero", key);
    }
    Ok(secs)
}
