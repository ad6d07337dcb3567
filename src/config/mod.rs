//! Configuration module.
//!
//! Settings are loaded from environment variables (optionally via a `.env`
//! file), organized by concern: HTTP server and upstream feed.

mod feed_config;
mod server_config;

pub use feed_config::{DEFAULT_FEED_URL, FeedEnvConfig};
pub use server_config::ServerEnvConfig;

use anyhow::{Context, Result};

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerEnvConfig,
    pub feed: FeedEnvConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let server = ServerEnvConfig::from_env();
        let feed = FeedEnvConfig::from_env().context("Failed to load feed config")?;

        Ok(Self { server, feed })
    }
}
