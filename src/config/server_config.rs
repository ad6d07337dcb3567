//! HTTP server configuration parsing from environment variables.

use std::env;

/// Server environment configuration
#[derive(Debug, Clone)]
pub struct ServerEnvConfig {
    pub bind_address: String,
    pub port: u16,
    /// Body of `GET /`.
    pub banner: String,
    /// Value of the `id` field on forecasts and history entries.
    pub predictor_tag: String,
}

impl Default for ServerEnvConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 5000,
            banner: "t.me/CuTools".to_string(),
            predictor_tag: "@mryanhdz".to_string(),
        }
    }
}

impl ServerEnvConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_address: env::var("SERVER_BIND_ADDRESS").unwrap_or(defaults.bind_address),
            port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(defaults.port),
            banner: env::var("BANNER_TEXT").unwrap_or(defaults.banner),
            predictor_tag: env::var("PREDICTOR_TAG").unwrap_or(defaults.predictor_tag),
        }
    }

    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}
