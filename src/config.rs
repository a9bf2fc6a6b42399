use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} is not a valid socket address: {value}")]
    InvalidAddr { key: &'static str, value: String },
    #[error("{key} must be a whole number of seconds: {value}")]
    InvalidNumber { key: &'static str, value: String },
}

/// Connection settings for the hosted listing service.
///
/// Only built when both the endpoint and the public key are present, so holding
/// one means network attempts are allowed.
#[derive(Clone)]
pub struct ServiceConfig {
    pub base_url: Url,
    pub anon_key: String,
}

impl std::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("base_url", &self.base_url)
            .field("anon_key", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub http_timeout: Duration,
    pub service: Option<ServiceConfig>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = match non_blank("LISTINGS_BIND_ADDR") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidAddr {
                key: "LISTINGS_BIND_ADDR",
                value: raw,
            })?,
            None => DEFAULT_BIND_ADDR
                .parse()
                .map_err(|_| ConfigError::InvalidAddr {
                    key: "LISTINGS_BIND_ADDR",
                    value: DEFAULT_BIND_ADDR.to_string(),
                })?,
        };

        let timeout_secs = match non_blank("LISTINGS_HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidNumber {
                    key: "LISTINGS_HTTP_TIMEOUT_SECS",
                    value: raw,
                })?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        let service = match (non_blank("SUPABASE_URL"), non_blank("SUPABASE_ANON_KEY")) {
            (Some(url), Some(key)) => match Url::parse(url.trim()) {
                Ok(base_url) => Some(ServiceConfig {
                    base_url,
                    anon_key: key.trim().to_string(),
                }),
                Err(e) => {
                    tracing::warn!(error = %e, "SUPABASE_URL does not parse, live listings disabled");
                    None
                }
            },
            _ => None,
        };

        Ok(Self {
            bind_addr,
            http_timeout: Duration::from_secs(timeout_secs),
            service,
        })
    }
}
